pub mod analyzer;
pub mod catalog_cache;
pub mod crop_tips;
pub mod fertilizer;
pub mod rules;
pub mod suitability;

pub use analyzer::analyze_soil;
pub use catalog_cache::CatalogCache;
pub use suitability::rank_crops;
