pub mod dto;
pub mod filters;
pub mod pivot;
pub mod query;

pub use dto::*;
pub use filters::*;
pub use query::*;
