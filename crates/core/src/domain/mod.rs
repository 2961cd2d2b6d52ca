pub mod post;

pub use post::{PostRecord, VOLATILE_FIELDS};
