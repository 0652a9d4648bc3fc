pub mod model;
pub mod scoring;

pub use model::{ClassWeights, LinearModel, ModelError};
pub use scoring::{classify, ClassScore, ClassificationResult};
