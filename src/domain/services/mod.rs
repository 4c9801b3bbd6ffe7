pub mod ranking;
pub mod transform;

pub use ranking::{compute_category_counts, rank_categories};
pub use transform::transform_record;
