pub mod category;
pub mod config;
pub mod python;
pub mod validation;

pub mod errors;

pub use category::{CategoryCode, EmissionCategory};
pub use errors::{CategoryError, CategoryResult};
