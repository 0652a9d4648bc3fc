use serde::Serialize;

use super::model::{ClassWeights, LinearModel};
use crate::models::{ConditionLabel, FeatureVector};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ClassScore {
    pub label: ConditionLabel,
    pub score: f64,
}

/// Winning label plus every class score, in the model's declared order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassificationResult {
    pub label: ConditionLabel,
    pub scores: Vec<ClassScore>,
}

impl ClassificationResult {
    pub fn score(&self, label: ConditionLabel) -> Option<f64> {
        self.scores
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.score)
    }
}

/// Weighted sum of the readings plus the class bias.
pub fn linear_score(class: &ClassWeights, features: &FeatureVector) -> f64 {
    let dot = class
        .weights
        .iter()
        .zip(features.to_array())
        .fold(0.0, |acc, (weight, value)| acc + weight * value);
    dot + class.bias
}

/// Score every class and pick the highest. Equal scores resolve to the class
/// declared first. Inputs are expected to be finite; no validation happens
/// here.
pub fn classify(model: &LinearModel, features: &FeatureVector) -> ClassificationResult {
    let scores: Vec<ClassScore> = model
        .classes()
        .iter()
        .map(|class| ClassScore {
            label: class.label,
            score: linear_score(class, features),
        })
        .collect();

    // LinearModel guarantees at least one class.
    let mut best = scores[0];
    for candidate in &scores[1..] {
        if candidate.score > best.score {
            best = *candidate;
        }
    }

    ClassificationResult {
        label: best.label,
        scores,
    }
}
