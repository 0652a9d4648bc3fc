pub mod condition;
pub mod features;
pub mod prediction;

pub use condition::ConditionLabel;
pub use features::{EnvironmentBaseline, Feature, FeatureVector, LegacyFeatureVector, FEATURE_COUNT};
pub use prediction::{PredictionOutcome, PredictionRecord};
