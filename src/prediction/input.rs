//! Raw request fields to validated sensor input.
//!
//! Form posts deliver every value as text and JSON bodies may send numbers or
//! strings, so each field is accepted as either and parsed here. A request
//! that names neither environmental field is a legacy four-reading request.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Feature, FeatureVector, LegacyFeatureVector};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn parse(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) => Some(*value),
            RawValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }

    fn describe(&self) -> String {
        match self {
            RawValue::Number(value) => value.to_string(),
            RawValue::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawReadings {
    #[serde(default)]
    pub hr: Option<RawValue>,
    #[serde(default)]
    pub spo2: Option<RawValue>,
    #[serde(default)]
    pub temp: Option<RawValue>,
    #[serde(default)]
    pub gsr: Option<RawValue>,
    #[serde(default, rename = "atmTemp")]
    pub atm_temp: Option<RawValue>,
    #[serde(default, rename = "airQuality")]
    pub air_quality: Option<RawValue>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("missing required field `{0}`")]
    Missing(&'static str),
    #[error("field `{field}` is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("field `{0}` must be a finite number")]
    NonFinite(&'static str),
}

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            InputError::Missing(field) | InputError::NonFinite(field) => *field,
            InputError::NotANumber { field, .. } => *field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorInput {
    Current(FeatureVector),
    Legacy(LegacyFeatureVector),
}

impl RawReadings {
    fn raw(&self, feature: Feature) -> Option<&RawValue> {
        match feature {
            Feature::HeartRate => self.hr.as_ref(),
            Feature::Spo2 => self.spo2.as_ref(),
            Feature::BodyTemp => self.temp.as_ref(),
            Feature::SkinConductance => self.gsr.as_ref(),
            Feature::AmbientTemp => self.atm_temp.as_ref(),
            Feature::AirQuality => self.air_quality.as_ref(),
        }
    }

    fn finite(&self, feature: Feature) -> Result<f64, InputError> {
        let field = feature.input_key();
        let raw = self.raw(feature).ok_or(InputError::Missing(field))?;
        let value = raw.parse().ok_or_else(|| InputError::NotANumber {
            field,
            value: raw.describe(),
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(InputError::NonFinite(field))
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.atm_temp.is_none() && self.air_quality.is_none()
    }

    /// Parse every required field; the first failure in canonical order
    /// rejects the whole request.
    pub fn validate(&self) -> Result<SensorInput, InputError> {
        let heart_rate = self.finite(Feature::HeartRate)?;
        let spo2 = self.finite(Feature::Spo2)?;
        let body_temp = self.finite(Feature::BodyTemp)?;
        let skin_conductance = self.finite(Feature::SkinConductance)?;

        if self.is_legacy() {
            return Ok(SensorInput::Legacy(LegacyFeatureVector {
                heart_rate,
                spo2,
                body_temp,
                skin_conductance,
            }));
        }

        Ok(SensorInput::Current(FeatureVector {
            heart_rate,
            spo2,
            body_temp,
            skin_conductance,
            ambient_temp: self.finite(Feature::AmbientTemp)?,
            air_quality: self.finite(Feature::AirQuality)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<RawValue> {
        Some(RawValue::Text(value.to_string()))
    }

    fn current() -> RawReadings {
        RawReadings {
            hr: text("75"),
            spo2: text("98"),
            temp: text("36.8"),
            gsr: text("2"),
            atm_temp: text("25"),
            air_quality: text("300"),
        }
    }

    #[test]
    fn text_fields_parse_into_current_vector() {
        let input = current().validate().unwrap();
        assert_eq!(
            input,
            SensorInput::Current(FeatureVector {
                heart_rate: 75.0,
                spo2: 98.0,
                body_temp: 36.8,
                skin_conductance: 2.0,
                ambient_temp: 25.0,
                air_quality: 300.0,
            })
        );
    }

    #[test]
    fn json_accepts_numbers_and_strings() {
        let raw: RawReadings = serde_json::from_str(
            r#"{"hr": 140, "spo2": "80", "temp": 41.0, "atmTemp": 45, "gsr": " 8 ", "airQuality": 1100}"#,
        )
        .unwrap();
        let SensorInput::Current(features) = raw.validate().unwrap() else {
            panic!("expected six-feature input");
        };
        assert_eq!(features.to_array(), [140.0, 80.0, 41.0, 8.0, 45.0, 1100.0]);
    }

    #[test]
    fn omitting_environment_selects_legacy_shape() {
        let raw = RawReadings {
            atm_temp: None,
            air_quality: None,
            ..current()
        };
        assert!(matches!(raw.validate(), Ok(SensorInput::Legacy(_))));
    }

    #[test]
    fn one_environmental_field_requires_the_other() {
        let raw = RawReadings {
            air_quality: None,
            ..current()
        };
        assert_eq!(raw.validate(), Err(InputError::Missing("airQuality")));
    }

    #[test]
    fn rejects_unparseable_and_non_finite_values() {
        let raw = RawReadings {
            spo2: text("ninety"),
            ..current()
        };
        let err = raw.validate().unwrap_err();
        assert_eq!(err.field(), "spo2");
        assert!(matches!(err, InputError::NotANumber { .. }));

        let raw = RawReadings {
            temp: text("inf"),
            ..current()
        };
        assert_eq!(raw.validate(), Err(InputError::NonFinite("temp")));

        let raw = RawReadings {
            gsr: text(""),
            ..current()
        };
        assert_eq!(raw.validate().unwrap_err().field(), "gsr");
    }

    #[test]
    fn missing_physiological_field_is_rejected() {
        let raw = RawReadings {
            hr: None,
            ..current()
        };
        assert_eq!(raw.validate(), Err(InputError::Missing("hr")));
    }
}
