//! Rule-based explanatory notes.
//!
//! Every feature runs through its own cascade (see [`bands`]) and the
//! resulting notes are collected in canonical feature order, then joined with
//! `"; "`.

pub mod bands;
pub mod config;

use std::fmt;

use serde::{Serialize, Serializer};

pub use bands::Note;
pub use config::{AnnotationThresholds, ConfigError};

use crate::models::{Feature, FeatureVector, LegacyFeatureVector};

pub const HEALTHY_FALLBACK: &str = "Sensor readings are in healthy range";
pub const NOTE_SEPARATOR: &str = "; ";

/// Ordered diagnostic notes; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanatoryNote {
    entries: Vec<&'static str>,
}

impl ExplanatoryNote {
    fn from_notes(notes: Vec<Note>) -> Self {
        let mut entries: Vec<&'static str> = notes.into_iter().map(|note| note.text).collect();
        if entries.is_empty() {
            entries.push(HEALTHY_FALLBACK);
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[&'static str] {
        &self.entries
    }

    pub fn is_healthy_fallback(&self) -> bool {
        self.entries == [HEALTHY_FALLBACK]
    }
}

impl fmt::Display for ExplanatoryNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries.join(NOTE_SEPARATOR))
    }
}

impl Serialize for ExplanatoryNote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Run the cascade belonging to one feature.
pub fn feature_note(feature: Feature, value: f64, thresholds: &AnnotationThresholds) -> Option<Note> {
    match feature {
        Feature::HeartRate => bands::heart_rate(value, &thresholds.heart_rate),
        Feature::Spo2 => bands::spo2(value, &thresholds.spo2),
        Feature::BodyTemp => bands::body_temp(value, &thresholds.body_temp),
        Feature::SkinConductance => bands::skin_conductance(value, &thresholds.skin_conductance),
        Feature::AmbientTemp => bands::ambient_temp(value, &thresholds.ambient_temp),
        Feature::AirQuality => bands::air_quality(value, &thresholds.air_quality),
    }
}

/// Notes for all six features, in canonical order.
pub fn collect_notes(features: &FeatureVector, thresholds: &AnnotationThresholds) -> Vec<Note> {
    Feature::ALL
        .into_iter()
        .filter_map(|feature| feature_note(feature, features.value(feature), thresholds))
        .collect()
}

pub fn annotate(features: &FeatureVector, thresholds: &AnnotationThresholds) -> ExplanatoryNote {
    ExplanatoryNote::from_notes(collect_notes(features, thresholds))
}

/// Legacy readings have no environmental sensors and report only abnormal
/// findings, so an unremarkable reading collapses to the healthy fallback.
pub fn annotate_legacy(
    legacy: &LegacyFeatureVector,
    thresholds: &AnnotationThresholds,
) -> ExplanatoryNote {
    let readings = [
        (Feature::HeartRate, legacy.heart_rate),
        (Feature::Spo2, legacy.spo2),
        (Feature::BodyTemp, legacy.body_temp),
        (Feature::SkinConductance, legacy.skin_conductance),
    ];
    let notes = readings
        .into_iter()
        .filter_map(|(feature, value)| feature_note(feature, value, thresholds))
        .filter(|note| !note.in_range)
        .collect();
    ExplanatoryNote::from_notes(notes)
}
