// src/extractors/mod.rs
pub mod customizations;
pub mod section;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use customizations::{CustomizationMiner, CustomizationRecord, MinerPolicy, PmTool};
#[allow(unused_imports)]
pub use section::SectionExtractor;
