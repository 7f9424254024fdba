use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};
use crate::tracker::identity::IdentityGenerator;
use crate::types::workout::{is_positive, Activity, Coordinate, Workout, WorkoutKind};

/// A form value as submitted: browsers send numbers or the raw input text.
/// Anything else (booleans, objects) is kept so validation can name the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// `None` when the value is not numeric at all.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            RawValue::Other(_) => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    #[serde(default, alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub distance_km: Option<RawValue>,
    #[serde(default)]
    pub duration_min: Option<RawValue>,
    #[serde(default)]
    pub cadence: Option<RawValue>,
    #[serde(default)]
    pub elevation_gain_m: Option<RawValue>,
}

impl WorkoutInput {
    pub fn running(
        distance_km: impl Into<RawValue>,
        duration_min: impl Into<RawValue>,
        cadence: impl Into<RawValue>,
    ) -> Self {
        Self {
            kind: WorkoutKind::Running.as_str().to_string(),
            distance_km: Some(distance_km.into()),
            duration_min: Some(duration_min.into()),
            cadence: Some(cadence.into()),
            elevation_gain_m: None,
        }
    }

    pub fn cycling(
        distance_km: impl Into<RawValue>,
        duration_min: impl Into<RawValue>,
        elevation_gain_m: impl Into<RawValue>,
    ) -> Self {
        Self {
            kind: WorkoutKind::Cycling.as_str().to_string(),
            distance_km: Some(distance_km.into()),
            duration_min: Some(duration_min.into()),
            cadence: None,
            elevation_gain_m: Some(elevation_gain_m.into()),
        }
    }
}

/// Validates form input and builds the matching workout variant.
#[derive(Debug, Default)]
pub struct WorkoutFactory {
    ids: IdentityGenerator,
}

impl WorkoutFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes later identities sort after one restored from storage.
    pub fn observe_identity(&mut self, identity: &str) {
        self.ids.observe(identity);
    }

    pub fn create(
        &mut self,
        input: &WorkoutInput,
        coordinate: Coordinate,
    ) -> Result<Workout, ValidationError> {
        self.create_at(input, coordinate, Utc::now())
    }

    /// Like [`create`](Self::create) with an explicit creation time. An
    /// identity is only consumed when validation succeeds.
    pub fn create_at(
        &mut self,
        input: &WorkoutInput,
        coordinate: Coordinate,
        now: DateTime<Utc>,
    ) -> Result<Workout, ValidationError> {
        let mut failed = Vec::new();

        let kind = WorkoutKind::from_str(&input.kind);
        if kind.is_none() {
            failed.push(Field::Kind);
        }
        let distance_km = positive(input.distance_km.as_ref(), Field::Distance, &mut failed);
        let duration_min = positive(input.duration_min.as_ref(), Field::Duration, &mut failed);

        let activity = match kind {
            Some(WorkoutKind::Running) => cadence(input.cadence.as_ref(), &mut failed)
                .map(|cadence| Activity::Running { cadence }),
            Some(WorkoutKind::Cycling) => {
                elevation_gain(input.elevation_gain_m.as_ref(), &mut failed)
                    .map(|elevation_gain_m| Activity::Cycling { elevation_gain_m })
            }
            None => None,
        };

        match (distance_km, duration_min, activity) {
            (Some(distance_km), Some(duration_min), Some(activity)) if failed.is_empty() => {
                let identity = self.ids.next(now);
                Ok(Workout::new(
                    identity,
                    now,
                    distance_km,
                    duration_min,
                    coordinate,
                    activity,
                ))
            }
            _ => Err(ValidationError::new(failed)),
        }
    }
}

fn positive(value: Option<&RawValue>, field: Field, failed: &mut Vec<Field>) -> Option<f64> {
    match value.and_then(RawValue::as_number) {
        Some(n) if is_positive(n) => Some(n),
        _ => {
            failed.push(field);
            None
        }
    }
}

fn cadence(value: Option<&RawValue>, failed: &mut Vec<Field>) -> Option<u32> {
    match value.and_then(RawValue::as_number) {
        Some(n) if is_positive(n) && n.fract() == 0.0 && n <= u32::MAX as f64 => Some(n as u32),
        _ => {
            failed.push(Field::Cadence);
            None
        }
    }
}

fn elevation_gain(value: Option<&RawValue>, failed: &mut Vec<Field>) -> Option<f64> {
    match value.and_then(RawValue::as_number) {
        Some(n) if n.is_finite() && n >= 0.0 => Some(n),
        _ => {
            failed.push(Field::ElevationGain);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn here() -> Coordinate {
        Coordinate::new(51.5, -0.12)
    }

    #[test]
    fn running_input_builds_running_workout() {
        let mut factory = WorkoutFactory::new();
        let now = Utc.with_ymd_and_hms(2026, 4, 14, 7, 0, 0).unwrap();
        let workout = factory
            .create_at(&WorkoutInput::running(5.0, 25.0, 180.0), here(), now)
            .unwrap();

        assert_eq!(workout.kind(), WorkoutKind::Running);
        assert_eq!(workout.pace(), Some(5.0));
        assert_eq!(workout.label(), "Running on April 14");
        assert_eq!(workout.activity().cadence(), Some(180));
        assert_eq!(workout.coordinate(), here());
        assert_eq!(workout.created_at(), now);
    }

    #[test]
    fn text_values_are_parsed() {
        let mut factory = WorkoutFactory::new();
        let workout = factory
            .create(&WorkoutInput::cycling("20", "60", "150"), here())
            .unwrap();
        assert_eq!(format!("{:.2}", workout.speed().unwrap()), "0.33");
    }

    #[test]
    fn rejects_non_positive_and_non_numeric_values() {
        let mut factory = WorkoutFactory::new();

        let err = factory
            .create(&WorkoutInput::running(0.0, 25.0, 180.0), here())
            .unwrap_err();
        assert_eq!(err.fields, vec![Field::Distance]);

        let err = factory
            .create(&WorkoutInput::running(-5.0, 25.0, 180.0), here())
            .unwrap_err();
        assert!(err.names(Field::Distance));

        let err = factory
            .create(&WorkoutInput::running(5.0, f64::NAN, 180.0), here())
            .unwrap_err();
        assert_eq!(err.fields, vec![Field::Duration]);

        let err = factory
            .create(&WorkoutInput::running(5.0, 25.0, "abc"), here())
            .unwrap_err();
        assert_eq!(err.fields, vec![Field::Cadence]);
    }

    #[test]
    fn reports_every_failing_field() {
        let mut factory = WorkoutFactory::new();
        let err = factory
            .create(&WorkoutInput::cycling("", 0.0, f64::INFINITY), here())
            .unwrap_err();
        assert_eq!(
            err.fields,
            vec![Field::Distance, Field::Duration, Field::ElevationGain]
        );
        assert_eq!(
            err.to_string(),
            "Invalid input: distance, duration, elevation gain"
        );
    }

    #[test]
    fn elevation_may_be_zero_but_not_negative() {
        let mut factory = WorkoutFactory::new();
        assert!(factory
            .create(&WorkoutInput::cycling(10.0, 30.0, 0.0), here())
            .is_ok());
        let err = factory
            .create(&WorkoutInput::cycling(10.0, 30.0, -1.0), here())
            .unwrap_err();
        assert_eq!(err.fields, vec![Field::ElevationGain]);
    }

    #[test]
    fn cadence_must_be_whole_and_present() {
        let mut factory = WorkoutFactory::new();
        assert!(factory
            .create(&WorkoutInput::running(5.0, 25.0, 180.5), here())
            .is_err());

        let mut input = WorkoutInput::running(5.0, 25.0, 180.0);
        input.cadence = None;
        let err = factory.create(&input, here()).unwrap_err();
        assert_eq!(err.fields, vec![Field::Cadence]);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut factory = WorkoutFactory::new();
        let mut input = WorkoutInput::running(5.0, 25.0, 180.0);
        input.kind = "swimming".into();
        let err = factory.create(&input, here()).unwrap_err();
        assert_eq!(err.fields, vec![Field::Kind]);
    }

    #[test]
    fn identities_differ_within_one_instant() {
        let mut factory = WorkoutFactory::new();
        let now = Utc::now();
        let a = factory
            .create_at(&WorkoutInput::running(5.0, 25.0, 180.0), here(), now)
            .unwrap();
        let b = factory
            .create_at(&WorkoutInput::running(5.0, 25.0, 180.0), here(), now)
            .unwrap();
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn null_missing_and_boolean_values_fail_validation() {
        let mut factory = WorkoutFactory::new();
        let input: WorkoutInput =
            serde_json::from_str(r#"{"type":"running","distanceKm":null,"cadence":true}"#).unwrap();
        assert_eq!(input.cadence, Some(RawValue::Other(serde_json::Value::Bool(true))));

        let err = factory.create(&input, here()).unwrap_err();
        assert_eq!(
            err.fields,
            vec![Field::Distance, Field::Duration, Field::Cadence]
        );
    }

    #[test]
    fn deserializes_form_payload() {
        let input: WorkoutInput = serde_json::from_str(
            r#"{"type":"running","distanceKm":"5","durationMin":25,"cadence":"abc"}"#,
        )
        .unwrap();
        assert_eq!(input.kind, "running");
        assert_eq!(input.distance_km.and_then(|d| d.as_number()), Some(5.0));
        assert_eq!(input.cadence.and_then(|c| c.as_number()), None);
    }
}
