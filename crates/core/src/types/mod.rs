pub mod community;
pub mod date_range;
pub mod field_filter;

pub use community::Community;
pub use date_range::{DateRange, EpochBounds, ResolvedRange};
pub use field_filter::FieldFilter;
