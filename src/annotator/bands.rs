//! One cascade per feature. Within a cascade the bands are tried most severe
//! first and the first match wins; `None` means the reading is unremarkable
//! and the feature contributes nothing.

use super::config::{
    AirQualityBands, AmbientTempBands, BodyTempBands, HeartRateBands, SkinConductanceBands,
    Spo2Bands,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub text: &'static str,
    /// The reading sits in its healthy band; the note only confirms that.
    pub in_range: bool,
}

impl Note {
    const fn finding(text: &'static str) -> Self {
        Self {
            text,
            in_range: false,
        }
    }

    const fn in_range(text: &'static str) -> Self {
        Self {
            text,
            in_range: true,
        }
    }
}

pub const BRADYCARDIA: &str = "Bradycardia—low HR";
pub const TACHYCARDIA: &str = "Tachycardia—high HR";
pub const MILD_TACHYCARDIA: &str = "Mild tachycardia—slightly high HR";

pub const SEVERE_HYPOXIA: &str = "Severe hypoxia—SpO₂ dangerously low";
pub const MODERATE_HYPOXIA: &str = "Moderate hypoxia—SpO₂ low";
pub const MILD_HYPOXEMIA: &str = "Mild hypoxemia—SpO₂ slightly low";

pub const BODY_TEMP_SENSOR_ERROR: &str = "Sensor error: invalid body temperature reading.";
pub const HYPOTHERMIA: &str = "Hypothermia—temp abnormally low";
pub const SEVERE_HYPERTHERMIA: &str = "Severe hyperthermia—temp excessively high";
pub const HIGH_FEVER: &str = "High fever";
pub const MILD_FEVER: &str = "Mild fever";
pub const NORMAL_BODY_TEMP: &str = "Normal body temperature";

pub const CRITICAL_GSR: &str = "Critical GSR—extreme stress/sweat";
pub const HIGH_STRESS: &str = "High stress or pain (moderate GSR)";
pub const MILD_STRESS: &str = "Mild stress/sweat (mild GSR)";

pub const AMBIENT_UNAVAILABLE: &str = "Ambient temperature data unavailable";
pub const AMBIENT_SENSOR_ERROR: &str = "Sensor error: invalid ambient temperature reading.";
pub const AMBIENT_VERY_LOW: &str = "Very low ambient temperature";
pub const AMBIENT_VERY_HIGH: &str =
    "Very high ambient temperature, Risk of heatstroke, UV exposure";
pub const AMBIENT_UNCOMFORTABLE: &str =
    "Uncomfortable ambient temperature, slight UV exposure risk";
pub const AMBIENT_COMFORTABLE: &str = "Comfortable ambient temperature";

pub const AIR_QUALITY_UNAVAILABLE: &str = "Air quality data unavailable";
pub const AIR_QUALITY_SENSOR_ERROR: &str = "Sensor error: invalid air quality reading.";
pub const AIR_QUALITY_TIERS: [&str; 6] = [
    "Extremely hazardous: high CO, VOCs, PAHs; cancer risk.",
    "Hazardous gases: CO, smoke; lung, heart damage risk",
    "Very poor air: benzene, formaldehyde; respiratory, cancer risk.",
    "Poor air: carcinogenic combustion by-products; asthma, lung irritation.",
    "Moderate gas: VOCs and smoke; mild respiratory discomfort.",
    "Slight gas elevation; monitor for ventilation or odor changes.",
];
pub const AIR_QUALITY_GOOD: &str =
    "Good air quality — minimal risk from toxic or carcinogenic gases.";
pub const AIR_QUALITY_INVALID: &str = "Invalid air quality reading.";

pub fn heart_rate(value: f64, bands: &HeartRateBands) -> Option<Note> {
    if value < bands.bradycardia_below {
        Some(Note::finding(BRADYCARDIA))
    } else if value > bands.tachycardia_above {
        Some(Note::finding(TACHYCARDIA))
    } else if value > bands.mild_tachycardia_above {
        Some(Note::finding(MILD_TACHYCARDIA))
    } else {
        None
    }
}

pub fn spo2(value: f64, bands: &Spo2Bands) -> Option<Note> {
    if value < bands.severe_hypoxia_below {
        Some(Note::finding(SEVERE_HYPOXIA))
    } else if value < bands.moderate_hypoxia_below {
        Some(Note::finding(MODERATE_HYPOXIA))
    } else if value < bands.mild_hypoxemia_below {
        Some(Note::finding(MILD_HYPOXEMIA))
    } else {
        None
    }
}

pub fn body_temp(value: f64, bands: &BodyTempBands) -> Option<Note> {
    let note = if value < bands.invalid_below {
        Note::finding(BODY_TEMP_SENSOR_ERROR)
    } else if value < bands.hypothermia_below {
        Note::finding(HYPOTHERMIA)
    } else if value > bands.severe_hyperthermia_above {
        Note::finding(SEVERE_HYPERTHERMIA)
    } else if value >= bands.high_fever_from {
        Note::finding(HIGH_FEVER)
    } else if value >= bands.mild_fever_from {
        Note::finding(MILD_FEVER)
    } else {
        Note::in_range(NORMAL_BODY_TEMP)
    };
    Some(note)
}

pub fn skin_conductance(value: f64, bands: &SkinConductanceBands) -> Option<Note> {
    if value > bands.critical_above {
        Some(Note::finding(CRITICAL_GSR))
    } else if value > bands.high_stress_above {
        Some(Note::finding(HIGH_STRESS))
    } else if value > bands.mild_stress_above {
        Some(Note::finding(MILD_STRESS))
    } else {
        None
    }
}

pub fn ambient_temp(value: f64, bands: &AmbientTempBands) -> Option<Note> {
    let note = if value.is_nan() {
        Note::finding(AMBIENT_UNAVAILABLE)
    } else if value < bands.invalid_below {
        Note::finding(AMBIENT_SENSOR_ERROR)
    } else if value < bands.very_low_below {
        Note::finding(AMBIENT_VERY_LOW)
    } else if value > bands.very_high_above {
        Note::finding(AMBIENT_VERY_HIGH)
    } else if value < bands.comfortable_min || value > bands.comfortable_max {
        Note::finding(AMBIENT_UNCOMFORTABLE)
    } else {
        Note::in_range(AMBIENT_COMFORTABLE)
    };
    Some(note)
}

pub fn air_quality(value: f64, bands: &AirQualityBands) -> Option<Note> {
    if value.is_nan() {
        return Some(Note::finding(AIR_QUALITY_UNAVAILABLE));
    }
    if value < bands.invalid_below {
        return Some(Note::finding(AIR_QUALITY_SENSOR_ERROR));
    }

    let tier = bands
        .hazard_above
        .iter()
        .zip(AIR_QUALITY_TIERS)
        .find(|(cut, _)| value > **cut);
    let note = match tier {
        Some((_, text)) => Note::finding(text),
        None if value >= bands.invalid_below => Note::in_range(AIR_QUALITY_GOOD),
        None => Note::finding(AIR_QUALITY_INVALID),
    };
    Some(note)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(note: Option<Note>) -> Option<&'static str> {
        note.map(|n| n.text)
    }

    #[test]
    fn heart_rate_boundaries() {
        let bands = HeartRateBands::default();
        assert_eq!(text(heart_rate(49.9, &bands)), Some(BRADYCARDIA));
        assert_eq!(text(heart_rate(50.0, &bands)), None);
        assert_eq!(text(heart_rate(100.0, &bands)), None);
        assert_eq!(text(heart_rate(100.5, &bands)), Some(MILD_TACHYCARDIA));
        assert_eq!(text(heart_rate(130.0, &bands)), Some(MILD_TACHYCARDIA));
        assert_eq!(text(heart_rate(130.1, &bands)), Some(TACHYCARDIA));
    }

    #[test]
    fn spo2_boundaries() {
        let bands = Spo2Bands::default();
        assert_eq!(text(spo2(84.9, &bands)), Some(SEVERE_HYPOXIA));
        assert_eq!(text(spo2(85.0, &bands)), Some(MODERATE_HYPOXIA));
        assert_eq!(text(spo2(90.0, &bands)), Some(MILD_HYPOXEMIA));
        assert_eq!(text(spo2(95.0, &bands)), None);
    }

    #[test]
    fn body_temp_boundaries() {
        let bands = BodyTempBands::default();
        assert_eq!(text(body_temp(-0.1, &bands)), Some(BODY_TEMP_SENSOR_ERROR));
        assert_eq!(text(body_temp(0.0, &bands)), Some(HYPOTHERMIA));
        assert_eq!(text(body_temp(32.0, &bands)), Some(NORMAL_BODY_TEMP));
        assert_eq!(text(body_temp(37.99, &bands)), Some(NORMAL_BODY_TEMP));
        assert_eq!(text(body_temp(38.0, &bands)), Some(MILD_FEVER));
        assert_eq!(text(body_temp(39.0, &bands)), Some(HIGH_FEVER));
        assert_eq!(text(body_temp(40.0, &bands)), Some(HIGH_FEVER));
        assert_eq!(text(body_temp(40.1, &bands)), Some(SEVERE_HYPERTHERMIA));
    }

    #[test]
    fn normal_body_temp_is_in_range() {
        let bands = BodyTempBands::default();
        assert!(body_temp(36.6, &bands).unwrap().in_range);
        assert!(!body_temp(38.5, &bands).unwrap().in_range);
    }

    #[test]
    fn skin_conductance_boundaries() {
        let bands = SkinConductanceBands::default();
        assert_eq!(text(skin_conductance(4.0, &bands)), None);
        assert_eq!(text(skin_conductance(4.01, &bands)), Some(MILD_STRESS));
        assert_eq!(text(skin_conductance(5.5, &bands)), Some(MILD_STRESS));
        assert_eq!(text(skin_conductance(5.6, &bands)), Some(HIGH_STRESS));
        assert_eq!(text(skin_conductance(7.0, &bands)), Some(HIGH_STRESS));
        assert_eq!(text(skin_conductance(7.1, &bands)), Some(CRITICAL_GSR));
    }

    #[test]
    fn ambient_temp_boundaries() {
        let bands = AmbientTempBands::default();
        assert_eq!(text(ambient_temp(f64::NAN, &bands)), Some(AMBIENT_UNAVAILABLE));
        assert_eq!(text(ambient_temp(-1.0, &bands)), Some(AMBIENT_SENSOR_ERROR));
        assert_eq!(text(ambient_temp(0.0, &bands)), Some(AMBIENT_VERY_LOW));
        assert_eq!(text(ambient_temp(10.0, &bands)), Some(AMBIENT_UNCOMFORTABLE));
        assert_eq!(text(ambient_temp(20.0, &bands)), Some(AMBIENT_COMFORTABLE));
        assert_eq!(text(ambient_temp(30.0, &bands)), Some(AMBIENT_COMFORTABLE));
        assert_eq!(text(ambient_temp(30.5, &bands)), Some(AMBIENT_UNCOMFORTABLE));
        assert_eq!(text(ambient_temp(40.0, &bands)), Some(AMBIENT_UNCOMFORTABLE));
        assert_eq!(text(ambient_temp(40.5, &bands)), Some(AMBIENT_VERY_HIGH));
    }

    #[test]
    fn negative_ambient_reports_only_the_sensor_error() {
        let note = ambient_temp(-5.0, &AmbientTempBands::default()).unwrap();
        assert_eq!(note.text, AMBIENT_SENSOR_ERROR);
        assert!(!note.in_range);
    }

    #[test]
    fn air_quality_tiers() {
        let bands = AirQualityBands::default();
        assert_eq!(text(air_quality(f64::NAN, &bands)), Some(AIR_QUALITY_UNAVAILABLE));
        assert_eq!(text(air_quality(-0.5, &bands)), Some(AIR_QUALITY_SENSOR_ERROR));
        assert_eq!(text(air_quality(0.0, &bands)), Some(AIR_QUALITY_GOOD));
        assert_eq!(text(air_quality(500.0, &bands)), Some(AIR_QUALITY_GOOD));
        assert_eq!(text(air_quality(500.5, &bands)), Some(AIR_QUALITY_TIERS[5]));
        assert_eq!(text(air_quality(600.0, &bands)), Some(AIR_QUALITY_TIERS[5]));
        assert_eq!(text(air_quality(601.0, &bands)), Some(AIR_QUALITY_TIERS[4]));
        assert_eq!(text(air_quality(700.0, &bands)), Some(AIR_QUALITY_TIERS[4]));
        assert_eq!(text(air_quality(701.0, &bands)), Some(AIR_QUALITY_TIERS[3]));
        assert_eq!(text(air_quality(800.0, &bands)), Some(AIR_QUALITY_TIERS[3]));
        assert_eq!(text(air_quality(801.0, &bands)), Some(AIR_QUALITY_TIERS[2]));
        assert_eq!(text(air_quality(900.0, &bands)), Some(AIR_QUALITY_TIERS[2]));
        assert_eq!(text(air_quality(901.0, &bands)), Some(AIR_QUALITY_TIERS[1]));
        assert_eq!(text(air_quality(1000.0, &bands)), Some(AIR_QUALITY_TIERS[1]));
        assert_eq!(text(air_quality(1000.1, &bands)), Some(AIR_QUALITY_TIERS[0]));
    }
}
