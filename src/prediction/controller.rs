use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::Utc;
use tokio::task::JoinHandle;

use super::{
    input::{InputError, RawReadings, SensorInput},
    store::PredictionStore,
};
use crate::{
    annotator::{annotate, annotate_legacy, AnnotationThresholds, ExplanatoryNote},
    classifier::{classify, ClassificationResult, LinearModel},
    models::{EnvironmentBaseline, PredictionOutcome, PredictionRecord},
    settings::Settings,
};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// Classification, note and the record that will be stored for one input.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub classification: ClassificationResult,
    pub note: ExplanatoryNote,
    pub record: PredictionRecord,
}

impl Assessment {
    pub fn outcome(&self) -> PredictionOutcome {
        self.record.outcome()
    }
}

/// Result handed back as soon as classification finishes. Persistence runs
/// on its own task; dropping the submission detaches it.
pub struct Submission {
    pub outcome: PredictionOutcome,
    pub classification: ClassificationResult,
    persistence: JoinHandle<bool>,
}

impl Submission {
    /// Wait for the background write; `true` if the record was stored.
    pub async fn persisted(self) -> bool {
        self.persistence.await.unwrap_or(false)
    }
}

#[derive(Clone)]
pub struct PredictionController {
    model: Arc<LinearModel>,
    thresholds: Arc<AnnotationThresholds>,
    baseline: EnvironmentBaseline,
    store: Arc<dyn PredictionStore>,
    persist_timeout: Duration,
    history_limit: usize,
    chart_limit: usize,
}

impl PredictionController {
    pub fn new(settings: &Settings, model: LinearModel, store: Arc<dyn PredictionStore>) -> Self {
        Self {
            model: Arc::new(model),
            thresholds: Arc::new(settings.thresholds.clone()),
            baseline: settings.legacy_baseline,
            store,
            persist_timeout: Duration::from_millis(settings.persist_timeout_ms),
            history_limit: settings.history_limit,
            chart_limit: settings.chart_limit,
        }
    }

    /// Classify and annotate validated input. Pure apart from the timestamp.
    pub fn assess(&self, input: &SensorInput) -> Assessment {
        let created_at = Utc::now();
        match input {
            SensorInput::Current(features) => {
                let classification = classify(&self.model, features);
                let note = annotate(features, &self.thresholds);
                let outcome = PredictionOutcome {
                    predicted_condition: classification.label,
                    explanatory_note: note.to_string(),
                };
                let record = PredictionRecord::new(features, &outcome, created_at);
                Assessment {
                    classification,
                    note,
                    record,
                }
            }
            SensorInput::Legacy(legacy) => {
                let features = legacy.widen(&self.baseline);
                let classification = classify(&self.model, &features);
                let note = annotate_legacy(legacy, &self.thresholds);
                let outcome = PredictionOutcome {
                    predicted_condition: classification.label,
                    explanatory_note: note.to_string(),
                };
                let record =
                    PredictionRecord::new(&features, &outcome, created_at).without_environment();
                Assessment {
                    classification,
                    note,
                    record,
                }
            }
        }
    }

    /// Validate, classify, annotate and hand the record to storage without
    /// waiting for the write.
    pub fn submit(&self, raw: &RawReadings) -> Result<Submission, InputError> {
        let input = raw.validate()?;
        let assessment = self.assess(&input);
        let outcome = assessment.outcome();

        let persistence = tokio::spawn(persist(
            Arc::clone(&self.store),
            assessment.record,
            self.persist_timeout,
        ));

        Ok(Submission {
            outcome,
            classification: assessment.classification,
            persistence,
        })
    }

    /// Newest records first, for the history table.
    pub async fn history(&self) -> Result<Vec<PredictionRecord>> {
        self.store.recent(self.history_limit).await
    }

    /// Most recent records in chronological order, for charting.
    pub async fn latest(&self) -> Result<Vec<PredictionRecord>> {
        let mut records = self.store.recent(self.chart_limit).await?;
        records.reverse();
        Ok(records)
    }
}

async fn persist(store: Arc<dyn PredictionStore>, record: PredictionRecord, timeout: Duration) -> bool {
    let label = record.predicted_condition;
    match tokio::time::timeout(timeout, store.append(record)).await {
        Ok(Ok(id)) => {
            log_info!("stored prediction {id} ({label})");
            true
        }
        Ok(Err(err)) => {
            log_error!("failed to store prediction ({label}): {err:?}");
            false
        }
        Err(_) => {
            log_warn!(
                "storing prediction ({label}) timed out after {}ms; record discarded",
                timeout.as_millis()
            );
            false
        }
    }
}
