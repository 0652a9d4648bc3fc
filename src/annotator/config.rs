//! Tunable cut points for the note cascades.
//!
//! Defaults are the reference calibration. Values may be overridden from the
//! settings file; [`AnnotationThresholds::validate`] rejects orderings that
//! would leave a cascade with unreachable or overlapping bands.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{feature} threshold `{field}` must be finite")]
    NonFinite {
        feature: &'static str,
        field: &'static str,
    },
    #[error("{feature} thresholds out of order: expected {expected}")]
    Unordered {
        feature: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeartRateBands {
    pub bradycardia_below: f64,
    pub tachycardia_above: f64,
    pub mild_tachycardia_above: f64,
}

impl Default for HeartRateBands {
    fn default() -> Self {
        Self {
            bradycardia_below: 50.0,
            tachycardia_above: 130.0,
            mild_tachycardia_above: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Spo2Bands {
    pub severe_hypoxia_below: f64,
    pub moderate_hypoxia_below: f64,
    pub mild_hypoxemia_below: f64,
}

impl Default for Spo2Bands {
    fn default() -> Self {
        Self {
            severe_hypoxia_below: 85.0,
            moderate_hypoxia_below: 90.0,
            mild_hypoxemia_below: 95.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyTempBands {
    pub invalid_below: f64,
    pub hypothermia_below: f64,
    pub severe_hyperthermia_above: f64,
    pub high_fever_from: f64,
    pub mild_fever_from: f64,
}

impl Default for BodyTempBands {
    fn default() -> Self {
        Self {
            invalid_below: 0.0,
            hypothermia_below: 32.0,
            severe_hyperthermia_above: 40.0,
            high_fever_from: 39.0,
            mild_fever_from: 38.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkinConductanceBands {
    pub critical_above: f64,
    pub high_stress_above: f64,
    pub mild_stress_above: f64,
}

impl Default for SkinConductanceBands {
    fn default() -> Self {
        Self {
            critical_above: 7.0,
            high_stress_above: 5.5,
            mild_stress_above: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmbientTempBands {
    pub invalid_below: f64,
    pub very_low_below: f64,
    pub very_high_above: f64,
    pub comfortable_min: f64,
    pub comfortable_max: f64,
}

impl Default for AmbientTempBands {
    fn default() -> Self {
        Self {
            invalid_below: 0.0,
            very_low_below: 10.0,
            very_high_above: 40.0,
            comfortable_min: 20.0,
            comfortable_max: 30.0,
        }
    }
}

pub const AIR_QUALITY_TIER_COUNT: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AirQualityBands {
    pub invalid_below: f64,
    /// Hazard tiers, most severe first; a reading above `hazard_above[i]`
    /// lands in tier `i`.
    pub hazard_above: [f64; AIR_QUALITY_TIER_COUNT],
}

impl Default for AirQualityBands {
    fn default() -> Self {
        Self {
            invalid_below: 0.0,
            hazard_above: [1000.0, 900.0, 800.0, 700.0, 600.0, 500.0],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnnotationThresholds {
    pub heart_rate: HeartRateBands,
    pub spo2: Spo2Bands,
    pub body_temp: BodyTempBands,
    pub skin_conductance: SkinConductanceBands,
    pub ambient_temp: AmbientTempBands,
    pub air_quality: AirQualityBands,
}

fn finite(feature: &'static str, fields: &[(&'static str, f64)]) -> Result<(), ConfigError> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(ConfigError::NonFinite {
            feature,
            field: *field,
        }),
        None => Ok(()),
    }
}

fn ordered(feature: &'static str, holds: bool, expected: &'static str) -> Result<(), ConfigError> {
    if holds {
        Ok(())
    } else {
        Err(ConfigError::Unordered { feature, expected })
    }
}

impl AnnotationThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hr = &self.heart_rate;
        finite(
            "heart_rate",
            &[
                ("bradycardia_below", hr.bradycardia_below),
                ("tachycardia_above", hr.tachycardia_above),
                ("mild_tachycardia_above", hr.mild_tachycardia_above),
            ],
        )?;
        ordered(
            "heart_rate",
            hr.bradycardia_below < hr.mild_tachycardia_above
                && hr.mild_tachycardia_above < hr.tachycardia_above,
            "bradycardia_below < mild_tachycardia_above < tachycardia_above",
        )?;

        let spo2 = &self.spo2;
        finite(
            "spo2",
            &[
                ("severe_hypoxia_below", spo2.severe_hypoxia_below),
                ("moderate_hypoxia_below", spo2.moderate_hypoxia_below),
                ("mild_hypoxemia_below", spo2.mild_hypoxemia_below),
            ],
        )?;
        ordered(
            "spo2",
            spo2.severe_hypoxia_below < spo2.moderate_hypoxia_below
                && spo2.moderate_hypoxia_below < spo2.mild_hypoxemia_below,
            "severe_hypoxia_below < moderate_hypoxia_below < mild_hypoxemia_below",
        )?;

        let temp = &self.body_temp;
        finite(
            "body_temp",
            &[
                ("invalid_below", temp.invalid_below),
                ("hypothermia_below", temp.hypothermia_below),
                ("severe_hyperthermia_above", temp.severe_hyperthermia_above),
                ("high_fever_from", temp.high_fever_from),
                ("mild_fever_from", temp.mild_fever_from),
            ],
        )?;
        ordered(
            "body_temp",
            temp.invalid_below < temp.hypothermia_below
                && temp.hypothermia_below < temp.mild_fever_from
                && temp.mild_fever_from < temp.high_fever_from
                && temp.high_fever_from <= temp.severe_hyperthermia_above,
            "invalid_below < hypothermia_below < mild_fever_from < high_fever_from <= severe_hyperthermia_above",
        )?;

        let gsr = &self.skin_conductance;
        finite(
            "skin_conductance",
            &[
                ("critical_above", gsr.critical_above),
                ("high_stress_above", gsr.high_stress_above),
                ("mild_stress_above", gsr.mild_stress_above),
            ],
        )?;
        ordered(
            "skin_conductance",
            gsr.mild_stress_above < gsr.high_stress_above
                && gsr.high_stress_above < gsr.critical_above,
            "mild_stress_above < high_stress_above < critical_above",
        )?;

        let ambient = &self.ambient_temp;
        finite(
            "ambient_temp",
            &[
                ("invalid_below", ambient.invalid_below),
                ("very_low_below", ambient.very_low_below),
                ("very_high_above", ambient.very_high_above),
                ("comfortable_min", ambient.comfortable_min),
                ("comfortable_max", ambient.comfortable_max),
            ],
        )?;
        ordered(
            "ambient_temp",
            ambient.invalid_below < ambient.very_low_below
                && ambient.very_low_below <= ambient.comfortable_min
                && ambient.comfortable_min < ambient.comfortable_max
                && ambient.comfortable_max <= ambient.very_high_above,
            "invalid_below < very_low_below <= comfortable_min < comfortable_max <= very_high_above",
        )?;

        let air = &self.air_quality;
        finite("air_quality", &[("invalid_below", air.invalid_below)])?;
        if air.hazard_above.iter().any(|tier| !tier.is_finite()) {
            return Err(ConfigError::NonFinite {
                feature: "air_quality",
                field: "hazard_above",
            });
        }
        ordered(
            "air_quality",
            air.hazard_above.windows(2).all(|pair| pair[0] > pair[1])
                && air.invalid_below <= air.hazard_above[AIR_QUALITY_TIER_COUNT - 1],
            "hazard_above strictly descending and above invalid_below",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        assert_eq!(AnnotationThresholds::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_hypoxia_bands() {
        let mut thresholds = AnnotationThresholds::default();
        thresholds.spo2.severe_hypoxia_below = 91.0;
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::Unordered { feature: "spo2", .. })
        ));
    }

    #[test]
    fn rejects_non_descending_air_quality_tiers() {
        let mut thresholds = AnnotationThresholds::default();
        thresholds.air_quality.hazard_above = [1000.0, 900.0, 900.0, 700.0, 600.0, 500.0];
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::Unordered {
                feature: "air_quality",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_cut_point() {
        let mut thresholds = AnnotationThresholds::default();
        thresholds.ambient_temp.comfortable_max = f64::NAN;
        assert_eq!(
            thresholds.validate(),
            Err(ConfigError::NonFinite {
                feature: "ambient_temp",
                field: "comfortable_max",
            })
        );
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let thresholds: AnnotationThresholds =
            serde_json::from_str(r#"{"body_temp": {"mild_fever_from": 37.8}}"#).unwrap();
        assert_eq!(thresholds.body_temp.mild_fever_from, 37.8);
        assert_eq!(thresholds.body_temp.high_fever_from, 39.0);
        assert_eq!(thresholds.heart_rate, HeartRateBands::default());
        assert_eq!(thresholds.validate(), Ok(()));
    }
}
