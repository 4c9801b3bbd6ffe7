use crate::domain::model::{
    CategoryCounts, Coordinates, InputRecord, OutputRecord, PriceTier, RestaurantDetails,
};
use crate::domain::services::ranking::rank_categories;
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

/// Flatten one record, or return `Ok(None)` when it has no usable coordinates.
///
/// Fields beyond `categories` and `coordinates` are only decoded for records
/// that pass the coordinate filter.
pub fn transform_record(record: InputRecord, counts: &CategoryCounts) -> Result<Option<OutputRecord>> {
    let alias = record.alias().map(str::to_string);
    let InputRecord {
        line,
        mut categories,
        coordinates,
        fields,
    } = record;

    rank_categories(&mut categories, counts);
    let category = categories.into_iter().next();

    let usable = Coordinates::from_value(&coordinates)
        .map_err(|e| EtlError::SchemaError {
            line,
            alias: alias.clone(),
            message: format!("coordinates: {}", e),
        })?
        .is_usable();
    if !usable {
        tracing::trace!("Dropping record on line {}: missing coordinates", line);
        return Ok(None);
    }

    let details: RestaurantDetails =
        serde_json::from_value(Value::Object(fields)).map_err(|e| EtlError::SchemaError {
            line,
            alias,
            message: e.to_string(),
        })?;

    let price = details
        .price
        .as_ref()
        .and_then(Value::as_str)
        .and_then(PriceTier::parse);

    Ok(Some(OutputRecord {
        name: details.name,
        alias: details.alias,
        image_url: details.image_url,
        neighborhood: details.neighborhood,
        category,
        rating: details.rating,
        review_count: details.review_count,
        url: details.url,
        coordinates,
        display_phone: details.display_phone,
        display_address: details.location.display_address,
        is_closed: details.is_closed,
        price,
    }))
}
