use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{annotator::AnnotationThresholds, models::EnvironmentBaseline};

pub const CONFIG_PATH_VAR: &str = "VITALSENSE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub bind_address: String,
    pub database_path: PathBuf,
    /// Rows shown in the history table.
    pub history_limit: usize,
    /// Records returned for charting.
    pub chart_limit: usize,
    /// Offset used when rendering timestamps; the default is IST.
    pub display_utc_offset_minutes: i32,
    pub persist_timeout_ms: u64,
    /// Optional JSON file with externally supplied model coefficients.
    pub model_path: Option<PathBuf>,
    pub thresholds: AnnotationThresholds,
    pub legacy_baseline: EnvironmentBaseline,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7000".into(),
            database_path: PathBuf::from("vitalsense.sqlite3"),
            history_limit: 500,
            chart_limit: 50,
            display_utc_offset_minutes: 330,
            persist_timeout_ms: 5_000,
            model_path: None,
            thresholds: AnnotationThresholds::default(),
            legacy_baseline: EnvironmentBaseline::default(),
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults when the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    /// Settings for the running process: the file named by
    /// `VITALSENSE_CONFIG` (if any), then environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut settings = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("VITALSENSE_BIND") {
            self.bind_address = bind;
        }
        if let Some(db) = lookup("VITALSENSE_DB") {
            self.database_path = PathBuf::from(db);
        }
        if let Some(limit) = lookup("VITALSENSE_HISTORY_LIMIT") {
            self.history_limit = limit
                .parse()
                .with_context(|| format!("invalid VITALSENSE_HISTORY_LIMIT '{limit}'"))?;
        }
        if let Some(limit) = lookup("VITALSENSE_CHART_LIMIT") {
            self.chart_limit = limit
                .parse()
                .with_context(|| format!("invalid VITALSENSE_CHART_LIMIT '{limit}'"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 || self.chart_limit == 0 {
            bail!("history_limit and chart_limit must be greater than zero");
        }
        if self.persist_timeout_ms == 0 {
            bail!("persist_timeout_ms must be greater than zero");
        }
        if self.display_utc_offset_minutes.abs() >= 24 * 60 {
            bail!(
                "display_utc_offset_minutes {} is outside a day",
                self.display_utc_offset_minutes
            );
        }
        if !self.legacy_baseline.ambient_temp.is_finite()
            || !self.legacy_baseline.air_quality.is_finite()
        {
            bail!("legacy_baseline readings must be finite");
        }
        self.thresholds
            .validate()
            .context("invalid annotation thresholds")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_reference_service() {
        let settings = Settings::default();
        assert_eq!(settings.bind_address, "0.0.0.0:7000");
        assert_eq!(settings.history_limit, 500);
        assert_eq!(settings.chart_limit, 50);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"chart_limit": 20, "thresholds": {"spo2": {"mild_hypoxemia_below": 94}}}"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.chart_limit, 20);
        assert_eq!(settings.history_limit, 500);
        assert_eq!(settings.thresholds.spo2.mild_hypoxemia_below, 94.0);
        assert_eq!(settings.thresholds.spo2.severe_hypoxia_below, 85.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn environment_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("VITALSENSE_BIND", "127.0.0.1:8080"),
            ("VITALSENSE_DB", "/tmp/readings.sqlite3"),
            ("VITALSENSE_HISTORY_LIMIT", "100"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.database_path, PathBuf::from("/tmp/readings.sqlite3"));
        assert_eq!(settings.history_limit, 100);
        assert_eq!(settings.chart_limit, 50);
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut settings = Settings::default();
        let result = settings.apply_overrides(|key| {
            (key == "VITALSENSE_CHART_LIMIT").then(|| "many".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn inconsistent_thresholds_fail_validation() {
        let mut settings = Settings::default();
        settings.thresholds.heart_rate.mild_tachycardia_above = 140.0;
        assert!(settings.validate().is_err());

        let settings = Settings {
            chart_limit: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
