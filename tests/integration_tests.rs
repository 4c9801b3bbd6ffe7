use anyhow::Result;
use restaurant_cleanup::{
    CleanupPipeline, EtlEngine, EtlError, LocalStorage, PipelineSettings, RunReport,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn restaurant(alias: &str, categories: &[&str], coordinates: Value, price: Value) -> Value {
    let categories: Vec<Value> = categories
        .iter()
        .map(|c| json!({"alias": c, "title": c.to_uppercase()}))
        .collect();
    json!({
        "name": format!("Restaurant {}", alias),
        "alias": alias,
        "image_url": format!("https://img.example.com/{}.jpg", alias),
        "neighborhood": "Midtown West",
        "categories": categories,
        "rating": 4.0,
        "review_count": 42,
        "url": format!("https://www.example.com/biz/{}", alias),
        "coordinates": coordinates,
        "display_phone": "(212) 555-0100",
        "location": {"display_address": ["1 Main St", "New York, NY 10001"]},
        "is_closed": false,
        "price": price
    })
}

fn at(latitude: f64, longitude: f64) -> Value {
    json!({"latitude": latitude, "longitude": longitude})
}

fn write_input(dir: &TempDir, records: &[Value]) -> Result<PathBuf> {
    let path = dir.path().join("restaurants.ndjson");
    let mut content = String::new();
    for record in records {
        content.push_str(&serde_json::to_string(record)?);
        content.push('\n');
    }
    std::fs::write(&path, content)?;
    Ok(path)
}

fn run(input: &Path, output: &Path) -> restaurant_cleanup::Result<RunReport> {
    let settings = PipelineSettings::new(input, output);
    EtlEngine::new(CleanupPipeline::new(LocalStorage::new(), settings)).run()
}

fn read_output(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        records.push(serde_json::from_str(line)?);
    }
    Ok(records)
}

#[test]
fn test_shared_category_wins() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[
            restaurant("one", &["pizza"], at(40.75, -73.99), json!("$")),
            restaurant("two", &["bar", "pizza"], at(40.76, -73.98), json!("$$")),
        ],
    )?;
    let output = temp_dir.path().join("out.ndjson");

    let report = run(&input, &output)?;

    assert_eq!(report.category_counts.get("pizza"), 2);
    assert_eq!(report.category_counts.get("bar"), 1);
    let records = read_output(&output)?;
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record["category"], json!({"alias": "pizza", "title": "PIZZA"}));
    }
    Ok(())
}

#[test]
fn test_zero_latitude_record_is_dropped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[restaurant("equator", &["pizza"], json!({"latitude": 0, "longitude": -122.4}), json!("$"))],
    )?;
    let output = temp_dir.path().join("out.ndjson");

    let report = run(&input, &output)?;

    assert_eq!(report.summary.dropped_missing_coordinates, 1);
    assert!(read_output(&output)?.is_empty());
    Ok(())
}

#[test]
fn test_valid_price_is_kept() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[restaurant("priced", &["pizza"], at(40.7, -73.9), json!("$$"))],
    )?;
    let output = temp_dir.path().join("out.ndjson");

    run(&input, &output)?;

    let records = read_output(&output)?;
    assert_eq!(records[0]["price"], json!("$$"));
    Ok(())
}

#[test]
fn test_invalid_price_key_is_omitted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[restaurant("free", &["pizza"], at(40.7, -73.9), json!("free"))],
    )?;
    let output = temp_dir.path().join("out.ndjson");

    let report = run(&input, &output)?;

    let records = read_output(&output)?;
    assert!(records[0].get("price").is_none());
    assert_eq!(report.summary.invalid_price, 1);
    Ok(())
}

#[test]
fn test_record_without_categories_is_kept_with_null_category() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[restaurant("plain", &[], at(40.7, -73.9), json!("$"))],
    )?;
    let output = temp_dir.path().join("out.ndjson");

    let report = run(&input, &output)?;

    let records = read_output(&output)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["category"], Value::Null);
    assert_eq!(report.summary.without_category, 1);
    Ok(())
}

#[test]
fn test_output_schema_and_filtering() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[
            restaurant("a", &["thai"], at(40.70, -73.90), json!("$")),
            restaurant("b", &["thai"], json!({"latitude": null, "longitude": -73.9}), json!("$")),
            restaurant("c", &["sushi"], json!({"latitude": 40.71}), json!(null)),
            restaurant("d", &["sushi", "thai"], at(40.72, -73.92), json!("$$$$")),
            restaurant("e", &["thai"], at(40.73, 0.0), json!("$$$")),
        ],
    )?;
    let output = temp_dir.path().join("out.ndjson");

    let report = run(&input, &output)?;
    let records = read_output(&output)?;

    // every output record has nonzero, non-null coordinates
    for record in &records {
        let latitude = record["coordinates"]["latitude"].as_f64().unwrap();
        let longitude = record["coordinates"]["longitude"].as_f64().unwrap();
        assert!(latitude != 0.0 && longitude != 0.0);
    }

    // survivors keep input order
    let aliases: Vec<&str> = records.iter().map(|r| r["alias"].as_str().unwrap()).collect();
    assert_eq!(aliases, vec!["a", "d"]);

    // thai is counted from all four records that list it, dropped ones included
    assert_eq!(report.category_counts.get("thai"), 4);
    assert_eq!(report.category_counts.get("sushi"), 2);
    assert_eq!(records[1]["category"]["alias"], "thai");

    let keys: Vec<&str> = records[1].as_object().unwrap().keys().map(String::as_str).collect();
    let mut expected = vec![
        "name",
        "alias",
        "imageUrl",
        "neighborhood",
        "category",
        "rating",
        "reviewCount",
        "url",
        "coordinates",
        "displayPhone",
        "displayAddress",
        "isClosed",
        "price",
    ];
    let mut sorted_keys = keys.clone();
    sorted_keys.sort_unstable();
    expected.sort_unstable();
    assert_eq!(sorted_keys, expected);

    assert_eq!(records[1]["displayAddress"], json!(["1 Main St", "New York, NY 10001"]));
    assert_eq!(records[1]["reviewCount"], 42);
    assert_eq!(records[1]["isClosed"], false);
    assert_eq!(records[1]["imageUrl"], "https://img.example.com/d.jpg");
    Ok(())
}

#[test]
fn test_output_lines_are_compact_in_field_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[restaurant("a", &["thai"], at(40.5, -73.5), json!("$"))],
    )?;
    let output = temp_dir.path().join("out.ndjson");

    run(&input, &output)?;
    let content = std::fs::read_to_string(&output)?;

    assert_eq!(
        content,
        concat!(
            r#"{"name":"Restaurant a","alias":"a","imageUrl":"https://img.example.com/a.jpg","#,
            r#""neighborhood":"Midtown West","category":{"alias":"thai","title":"THAI"},"#,
            r#""rating":4.0,"reviewCount":42,"url":"https://www.example.com/biz/a","#,
            r#""coordinates":{"latitude":40.5,"longitude":-73.5},"displayPhone":"(212) 555-0100","#,
            r#""displayAddress":["1 Main St","New York, NY 10001"],"isClosed":false,"price":"$"}"#,
            "\n"
        )
    );
    Ok(())
}

#[test]
fn test_integer_rating_and_coordinates_are_not_rewritten() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("restaurants.ndjson");
    std::fs::write(
        &input,
        concat!(
            r#"{"name":"Int","alias":"int","image_url":"u","neighborhood":"SoHo","#,
            r#""categories":[{"alias":"cafe","title":"Cafes"}],"rating":4,"review_count":7,"#,
            r#""url":"v","coordinates":{"latitude":40,"longitude":-74,"source":"gps"},"#,
            r#""display_phone":"","location":{"display_address":[]},"is_closed":true}"#,
            "\n"
        ),
    )?;
    let output = temp_dir.path().join("out.ndjson");

    run(&input, &output)?;
    let content = std::fs::read_to_string(&output)?;

    assert_eq!(
        content,
        concat!(
            r#"{"name":"Int","alias":"int","imageUrl":"u","neighborhood":"SoHo","#,
            r#""category":{"alias":"cafe","title":"Cafes"},"rating":4,"reviewCount":7,"url":"v","#,
            r#""coordinates":{"latitude":40,"longitude":-74,"source":"gps"},"displayPhone":"","#,
            r#""displayAddress":[],"isClosed":true}"#,
            "\n"
        )
    );
    Ok(())
}

#[test]
fn test_rerun_is_identical_and_truncates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[
            restaurant("a", &["bar", "cafe"], at(40.1, -73.1), json!("$")),
            restaurant("b", &["cafe", "bar"], at(40.2, -73.2), json!("$$")),
            restaurant("c", &["cafe"], at(40.3, -73.3), json!(null)),
        ],
    )?;
    let output = temp_dir.path().join("out.ndjson");
    std::fs::write(&output, "stale line that must disappear\n".repeat(100))?;

    run(&input, &output)?;
    let first = std::fs::read_to_string(&output)?;
    run(&input, &output)?;
    let second = std::fs::read_to_string(&output)?;

    assert_eq!(first, second);
    assert!(!first.contains("stale"));
    assert_eq!(first.lines().count(), 3);
    Ok(())
}

#[test]
fn test_invalid_json_line_aborts_without_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("restaurants.ndjson");
    let good = serde_json::to_string(&restaurant("a", &["bar"], at(40.1, -73.1), json!("$")))?;
    std::fs::write(&input, format!("{}\n{}\nnot json\n", good, good))?;
    let output = temp_dir.path().join("out.ndjson");

    let err = run(&input, &output).unwrap_err();

    match &err {
        EtlError::ParseError { line, .. } => assert_eq!(*line, 3),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.exit_code(), 1);
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_missing_input_file_is_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("absent.ndjson");
    let output = temp_dir.path().join("out.ndjson");

    let err = run(&input, &output).unwrap_err();

    assert!(matches!(err, EtlError::FileError { .. }));
    assert!(err.to_string().contains("absent.ndjson"));
    assert_ne!(err.exit_code(), 0);
    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[restaurant("a", &["bar"], at(40.1, -73.1), json!("$"))],
    )?;
    let output = temp_dir.path().join("out.ndjson");

    let settings = PipelineSettings::new(&input, &output);
    let engine = EtlEngine::new(CleanupPipeline::new(LocalStorage::new(), settings));
    let report = engine.dry_run()?;

    assert!(report.output_path.is_none());
    assert_eq!(report.summary.records_kept, 1);
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_output_directory_is_created() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        &[restaurant("a", &["bar"], at(40.1, -73.1), json!("$"))],
    )?;
    let output = temp_dir.path().join("cleaned").join("restaurants.ndjson");

    let report = run(&input, &output)?;

    assert_eq!(report.output_path.as_deref(), Some(output.to_str().unwrap()));
    assert_eq!(read_output(&output)?.len(), 1);
    Ok(())
}
