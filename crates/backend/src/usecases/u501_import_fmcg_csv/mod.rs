pub mod csv_parser;
pub mod executor;

pub use executor::{import_csv, seed_if_empty};
