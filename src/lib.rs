mod python;

pub use emission_categories_core::*;
