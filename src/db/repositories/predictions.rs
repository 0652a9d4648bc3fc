use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{format_datetime, parse_datetime, parse_label, to_i64},
    Database,
};
use crate::models::PredictionRecord;
use crate::prediction::PredictionStore;

fn row_to_record(row: &Row) -> Result<PredictionRecord> {
    let label: String = row.get("predicted_condition")?;
    let created_at: String = row.get("created_at")?;

    Ok(PredictionRecord {
        id: Some(row.get("id")?),
        heart_rate: row.get("heart_rate")?,
        spo2: row.get("spo2")?,
        body_temp: row.get("body_temp")?,
        ambient_temp: row.get("ambient_temp")?,
        skin_conductance: row.get("skin_conductance")?,
        air_quality: row.get("air_quality")?,
        predicted_condition: parse_label(&label)?,
        explanatory_note: row.get("explanatory_note")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    pub async fn insert_prediction(&self, record: &PredictionRecord) -> Result<i64> {
        let record = record.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO predictions (
                    heart_rate,
                    spo2,
                    body_temp,
                    skin_conductance,
                    ambient_temp,
                    air_quality,
                    predicted_condition,
                    explanatory_note,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.heart_rate,
                    record.spo2,
                    record.body_temp,
                    record.skin_conductance,
                    record.ambient_temp,
                    record.air_quality,
                    record.predicted_condition.as_str(),
                    record.explanatory_note,
                    format_datetime(&record.created_at),
                ],
            )
            .with_context(|| "failed to insert prediction")?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    /// Most recent predictions, newest first.
    pub async fn get_recent_predictions(&self, limit: usize) -> Result<Vec<PredictionRecord>> {
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, heart_rate, spo2, body_temp, skin_conductance, ambient_temp,
                        air_quality, predicted_condition, explanatory_note, created_at
                 FROM predictions
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1",
            )?;

            let mut rows = stmt.query(params![limit])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(row_to_record(row)?);
            }

            Ok(records)
        })
        .await
    }
}

#[async_trait]
impl PredictionStore for Database {
    async fn append(&self, record: PredictionRecord) -> Result<i64> {
        self.insert_prediction(&record).await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>> {
        self.get_recent_predictions(limit).await
    }
}
