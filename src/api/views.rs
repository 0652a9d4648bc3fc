//! Server-rendered HTML for the dashboard form, result page and history
//! table.

use std::fmt::Write;

use chrono::FixedOffset;

use crate::models::{ConditionLabel, PredictionOutcome, PredictionRecord};

const HISTORY_STYLE: &str = r#"
    body { font-family: 'Segoe UI', Arial, sans-serif; background: #f4f8fb; margin: 0; }
    .dashboard-header {
        display: flex; justify-content: space-between; align-items: center;
        padding: 10px 35px; background: #fff; box-shadow: 0 2px 8px #0001;
    }
    .dashboard-title { color: #1d2536; font-size: 2.7rem; margin: 0; font-weight: 700; }
    .nav-btn {
        display: inline-block; padding: 8px 21px; background: #317fd8;
        color: #fff; text-decoration: none; border-radius: 7px; font-size: 17px;
    }
    .nav-btn:hover { background: #0656b1; }
    table {
        width: 98%; margin: 30px auto 0 auto; border-collapse: collapse;
        background: #fff; box-shadow: 0 2px 10px #0001; border-radius: 9px;
    }
    th, td { padding: 10px 12px; border: 1px solid #e8eaef; text-align: center; }
    th { background: #f3f7fa; color: #333; font-weight: 600; }
    tr:nth-child(even) { background: #f6fafd; }
    .cond { font-weight: bold; color: #fff; padding: 2px 14px; border-radius: 5px; }
    .cond-normal { background: #5d92ce; }
    .cond-mild { background: #f1d87b; color: #232325; }
    .cond-moderate { background: #e79a5a; }
    .cond-critical { background: #d16a62; }
    .note { max-width: 350px; overflow-x: auto; white-space: pre-line; }
"#;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn condition_class(label: ConditionLabel) -> &'static str {
    match label {
        ConditionLabel::Normal => "cond-normal",
        ConditionLabel::Mild => "cond-mild",
        ConditionLabel::Moderate => "cond-moderate",
        ConditionLabel::Critical => "cond-critical",
    }
}

fn optional_reading(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn dashboard_page() -> String {
    let fields = [
        ("hr", "Heart rate (bpm)"),
        ("spo2", "SpO₂ (%)"),
        ("temp", "Body temperature (°C)"),
        ("gsr", "Skin conductance (GSR)"),
        ("atmTemp", "Ambient temperature (°C)"),
        ("airQuality", "Air quality"),
    ];

    let mut inputs = String::new();
    for (name, label) in fields {
        let _ = writeln!(
            inputs,
            r#"<label>{label} <input name="{name}" type="number" step="any" required></label><br>"#
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Health Dashboard</title><meta charset="UTF-8"></head>
<body>
  <h1>Health Dashboard</h1>
  <form method="post" action="/predict">
    {inputs}
    <button type="submit">Predict</button>
  </form>
  <p><a href="/history">History</a></p>
</body>
</html>"#
    )
}

pub fn result_page(outcome: &PredictionOutcome) -> String {
    format!(
        r#"
        <h2>Health Prediction Result</h2>
        <p><strong>Predicted Condition:</strong> {}</p>
        <p><strong>Explanation:</strong> {}</p>
        <br>
        <a href="/">Try Again</a>
    "#,
        outcome.predicted_condition,
        escape_html(&outcome.explanatory_note)
    )
}

pub fn history_page(records: &[PredictionRecord], offset: FixedOffset) -> String {
    let mut rows = String::new();
    for record in records {
        let timestamp = record
            .created_at
            .with_timezone(&offset)
            .format("%-d/%-m/%Y, %I:%M:%S %P");
        let label = record.predicted_condition;
        let _ = write!(
            rows,
            r#"
            <tr>
                <td>{timestamp}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td><span class="cond {}">{label}</span></td>
                <td class="note">{}</td>
            </tr>"#,
            record.heart_rate,
            record.spo2,
            record.body_temp,
            optional_reading(record.ambient_temp),
            record.skin_conductance,
            optional_reading(record.air_quality),
            condition_class(label),
            escape_html(&record.explanatory_note),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Prediction History</title>
  <meta charset="UTF-8">
  <style>{HISTORY_STYLE}</style>
</head>
<body>
  <div class="dashboard-header">
    <h1 class="dashboard-title">History Table</h1>
    <a class="nav-btn" href="/">Dashboard</a>
  </div>
  <div style="max-width:99vw;margin:0 20px;">
    <table>
      <thead>
        <tr>
          <th>Timestamp</th>
          <th>HR</th>
          <th>SpO₂</th>
          <th>Temp</th>
          <th>Atm Temp</th>
          <th>GSR</th>
          <th>Air Q.</th>
          <th>Condition</th>
          <th>Explanation</th>
        </tr>
      </thead>
      <tbody>{rows}
      </tbody>
    </table>
  </div>
</body>
</html>"#
    )
}
