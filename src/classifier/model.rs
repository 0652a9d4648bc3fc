//! Linear discriminant model: one weight vector and bias per condition.
//!
//! Classes are kept in an explicit ordered list. Declaration order is the
//! tie-break order used by [`super::classify`].

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ConditionLabel, FEATURE_COUNT};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClassWeights {
    pub label: ConditionLabel,
    /// Coefficients in canonical feature order.
    pub weights: [f64; FEATURE_COUNT],
    pub bias: f64,
}

impl ClassWeights {
    pub const fn new(label: ConditionLabel, weights: [f64; FEATURE_COUNT], bias: f64) -> Self {
        Self {
            label,
            weights,
            bias,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("model declares no classes")]
    Empty,
    #[error("model declares {0} more than once")]
    DuplicateLabel(ConditionLabel),
    #[error("{label} has a non-finite coefficient")]
    NonFinite { label: ConditionLabel },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<ClassWeights>", into = "Vec<ClassWeights>")]
pub struct LinearModel {
    classes: Vec<ClassWeights>,
}

const REFERENCE_CLASSES: [ClassWeights; 4] = [
    ClassWeights::new(
        ConditionLabel::Critical,
        [-0.027, -1.079, -0.003, 1.392, -0.072, 0.141],
        0.803,
    ),
    ClassWeights::new(
        ConditionLabel::Mild,
        [0.029, 0.653, -0.035, -0.133, 0.124, -0.068],
        0.002,
    ),
    ClassWeights::new(
        ConditionLabel::Moderate,
        [-0.020, -0.655, -0.290, -1.210, -0.147, 0.135],
        -0.821,
    ),
    ClassWeights::new(
        ConditionLabel::Normal,
        [0.018, 1.080, 0.327, -0.049, 0.096, -0.208],
        0.015,
    ),
];

impl LinearModel {
    pub fn new(classes: Vec<ClassWeights>) -> Result<Self, ModelError> {
        if classes.is_empty() {
            return Err(ModelError::Empty);
        }

        for (index, class) in classes.iter().enumerate() {
            if classes[..index].iter().any(|seen| seen.label == class.label) {
                return Err(ModelError::DuplicateLabel(class.label));
            }
            if !class.bias.is_finite() || class.weights.iter().any(|w| !w.is_finite()) {
                return Err(ModelError::NonFinite { label: class.label });
            }
        }

        Ok(Self { classes })
    }

    /// The fixed coefficients shipped with the service.
    pub fn reference() -> Self {
        Self {
            classes: REFERENCE_CLASSES.to_vec(),
        }
    }

    /// Load externally supplied coefficients: a JSON array of
    /// `{label, weights, bias}` objects in tie-break order.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read model from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid model definition in {}", path.display()))
    }

    pub fn classes(&self) -> &[ClassWeights] {
        &self.classes
    }
}

impl Default for LinearModel {
    fn default() -> Self {
        Self::reference()
    }
}

impl TryFrom<Vec<ClassWeights>> for LinearModel {
    type Error = ModelError;

    fn try_from(classes: Vec<ClassWeights>) -> Result<Self, Self::Error> {
        Self::new(classes)
    }
}

impl From<LinearModel> for Vec<ClassWeights> {
    fn from(model: LinearModel) -> Self {
        model.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reference_declares_every_label_once() {
        let model = LinearModel::reference();
        let labels: Vec<_> = model.classes().iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec![
                ConditionLabel::Critical,
                ConditionLabel::Mild,
                ConditionLabel::Moderate,
                ConditionLabel::Normal,
            ]
        );
        assert_eq!(LinearModel::new(REFERENCE_CLASSES.to_vec()), Ok(model));
    }

    #[test]
    fn rejects_empty_and_duplicate_models() {
        assert_eq!(LinearModel::new(Vec::new()), Err(ModelError::Empty));

        let duplicate = vec![REFERENCE_CLASSES[0], REFERENCE_CLASSES[1], REFERENCE_CLASSES[0]];
        assert_eq!(
            LinearModel::new(duplicate),
            Err(ModelError::DuplicateLabel(ConditionLabel::Critical))
        );
    }

    #[test]
    fn rejects_non_finite_coefficients() {
        let mut class = REFERENCE_CLASSES[1];
        class.weights[2] = f64::NAN;
        assert_eq!(
            LinearModel::new(vec![class]),
            Err(ModelError::NonFinite {
                label: ConditionLabel::Mild
            })
        );
    }

    #[test]
    fn loads_model_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"label": "Normal", "weights": [0, 1, 0, 0, 0, 0], "bias": 0.5}},
                {{"label": "Critical", "weights": [1, 0, 0, 0, 0, 0], "bias": -1}}
            ]"#
        )
        .unwrap();

        let model = LinearModel::from_json_file(&path).unwrap();
        assert_eq!(model.classes().len(), 2);
        assert_eq!(model.classes()[0].label, ConditionLabel::Normal);
        assert_eq!(model.classes()[1].bias, -1.0);
    }

    #[test]
    fn json_with_duplicate_labels_fails_to_load() {
        let raw = r#"[
            {"label": "Mild", "weights": [0, 0, 0, 0, 0, 0], "bias": 0},
            {"label": "Mild", "weights": [0, 0, 0, 0, 0, 0], "bias": 1}
        ]"#;
        assert!(serde_json::from_str::<LinearModel>(raw).is_err());
    }
}
