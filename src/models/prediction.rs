//! Persisted prediction records and the outcome pair returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ConditionLabel, FeatureVector};

/// The `{label, note}` pair handed back to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionOutcome {
    pub predicted_condition: ConditionLabel,
    pub explanatory_note: String,
}

/// One classified reading as stored. Environmental readings are absent for
/// records created from legacy input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRecord {
    #[serde(skip)]
    pub id: Option<i64>,
    #[serde(rename = "hr")]
    pub heart_rate: f64,
    pub spo2: f64,
    #[serde(rename = "temp")]
    pub body_temp: f64,
    #[serde(rename = "atmTemp")]
    pub ambient_temp: Option<f64>,
    #[serde(rename = "gsr")]
    pub skin_conductance: f64,
    #[serde(rename = "airQuality")]
    pub air_quality: Option<f64>,
    pub predicted_condition: ConditionLabel,
    pub explanatory_note: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(
        features: &FeatureVector,
        outcome: &PredictionOutcome,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            heart_rate: features.heart_rate,
            spo2: features.spo2,
            body_temp: features.body_temp,
            ambient_temp: Some(features.ambient_temp),
            skin_conductance: features.skin_conductance,
            air_quality: Some(features.air_quality),
            predicted_condition: outcome.predicted_condition,
            explanatory_note: outcome.explanatory_note.clone(),
            created_at,
        }
    }

    /// Drop the environmental readings, which were never measured.
    pub fn without_environment(mut self) -> Self {
        self.ambient_temp = None;
        self.air_quality = None;
        self
    }

    pub fn outcome(&self) -> PredictionOutcome {
        PredictionOutcome {
            predicted_condition: self.predicted_condition,
            explanatory_note: self.explanatory_note.clone(),
        }
    }
}
