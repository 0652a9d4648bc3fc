//! Sensor feature vectors.
//!
//! The canonical shape carries six readings in a fixed order; the model
//! weights and the note pipeline both follow that order. The four-reading
//! legacy shape is only accepted at the input boundary and widened into the
//! canonical one before classification.

use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 6;

/// One named reading, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    HeartRate,
    Spo2,
    BodyTemp,
    SkinConductance,
    AmbientTemp,
    AirQuality,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::HeartRate,
        Feature::Spo2,
        Feature::BodyTemp,
        Feature::SkinConductance,
        Feature::AmbientTemp,
        Feature::AirQuality,
    ];

    /// Field name used by form and JSON input.
    pub fn input_key(&self) -> &'static str {
        match self {
            Feature::HeartRate => "hr",
            Feature::Spo2 => "spo2",
            Feature::BodyTemp => "temp",
            Feature::SkinConductance => "gsr",
            Feature::AmbientTemp => "atmTemp",
            Feature::AirQuality => "airQuality",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub heart_rate: f64,
    pub spo2: f64,
    pub body_temp: f64,
    pub skin_conductance: f64,
    pub ambient_temp: f64,
    pub air_quality: f64,
}

impl FeatureVector {
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::HeartRate => self.heart_rate,
            Feature::Spo2 => self.spo2,
            Feature::BodyTemp => self.body_temp,
            Feature::SkinConductance => self.skin_conductance,
            Feature::AmbientTemp => self.ambient_temp,
            Feature::AirQuality => self.air_quality,
        }
    }

    /// Values in canonical order, matching the model's weight layout.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        Feature::ALL.map(|feature| self.value(feature))
    }
}

/// Deprecated four-reading shape without environmental sensors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFeatureVector {
    pub heart_rate: f64,
    pub spo2: f64,
    pub body_temp: f64,
    pub skin_conductance: f64,
}

impl LegacyFeatureVector {
    /// Widen into the canonical shape, filling the unmeasured environmental
    /// readings from `baseline`.
    pub fn widen(&self, baseline: &EnvironmentBaseline) -> FeatureVector {
        FeatureVector {
            heart_rate: self.heart_rate,
            spo2: self.spo2,
            body_temp: self.body_temp,
            skin_conductance: self.skin_conductance,
            ambient_temp: baseline.ambient_temp,
            air_quality: baseline.air_quality,
        }
    }
}

/// Environmental readings assumed when a legacy request omits them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentBaseline {
    pub ambient_temp: f64,
    pub air_quality: f64,
}

impl Default for EnvironmentBaseline {
    fn default() -> Self {
        Self {
            ambient_temp: 25.0,
            air_quality: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureVector {
        FeatureVector {
            heart_rate: 75.0,
            spo2: 98.0,
            body_temp: 36.8,
            skin_conductance: 2.0,
            ambient_temp: 25.0,
            air_quality: 300.0,
        }
    }

    #[test]
    fn array_follows_canonical_order() {
        assert_eq!(sample().to_array(), [75.0, 98.0, 36.8, 2.0, 25.0, 300.0]);
    }

    #[test]
    fn legacy_widening_uses_baseline() {
        let legacy = LegacyFeatureVector {
            heart_rate: 80.0,
            spo2: 97.0,
            body_temp: 37.0,
            skin_conductance: 1.5,
        };
        let baseline = EnvironmentBaseline {
            ambient_temp: 22.0,
            air_quality: 120.0,
        };

        let widened = legacy.widen(&baseline);
        assert_eq!(widened.to_array(), [80.0, 97.0, 37.0, 1.5, 22.0, 120.0]);
    }
}
