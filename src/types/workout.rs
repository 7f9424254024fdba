use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};
use crate::types::record::WorkoutRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.lat, coordinate.lng]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    #[default]
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "running" => Some(WorkoutKind::Running),
            "cycling" => Some(WorkoutKind::Cycling),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn derived_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "min/km",
            WorkoutKind::Cycling => "km/h",
        }
    }

    pub fn type_specific_unit(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "spm",
            WorkoutKind::Cycling => "m",
        }
    }

    pub fn popup_class(&self) -> String {
        format!("{}-popup", self.as_str())
    }
}

/// Variant-specific data of a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    /// Cadence in steps per minute.
    Running { cadence: u32 },
    Cycling { elevation_gain_m: f64 },
}

impl Activity {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn cadence(&self) -> Option<u32> {
        match self {
            Activity::Running { cadence } => Some(*cadence),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain_m(&self) -> Option<f64> {
        match self {
            Activity::Running { .. } => None,
            Activity::Cycling { elevation_gain_m } => Some(*elevation_gain_m),
        }
    }
}

/// One recorded activity. Fields are private so an entity cannot drift from
/// the values it was validated with.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    identity: String,
    created_at: DateTime<Utc>,
    distance_km: f64,
    duration_min: f64,
    coordinate: Coordinate,
    label: String,
    activity: Activity,
}

impl Workout {
    /// Builds an entity from already-validated values.
    pub(crate) fn new(
        identity: String,
        created_at: DateTime<Utc>,
        distance_km: f64,
        duration_min: f64,
        coordinate: Coordinate,
        activity: Activity,
    ) -> Self {
        let label = describe(activity.kind(), created_at);
        Self {
            identity,
            created_at,
            distance_km,
            duration_min,
            coordinate,
            label,
            activity,
        }
    }

    /// Rebuilds an entity from a persisted record. Inputs are validated again
    /// and the derived metric is recomputed; the stored label is kept as is.
    pub fn from_record(record: WorkoutRecord) -> Result<Self, ValidationError> {
        let mut failed = Vec::new();
        if !is_positive(record.distance_km) {
            failed.push(Field::Distance);
        }
        if !is_positive(record.duration_min) {
            failed.push(Field::Duration);
        }

        let activity = match record.kind {
            WorkoutKind::Running => match record.cadence {
                Some(cadence) if cadence > 0 => Some(Activity::Running { cadence }),
                _ => {
                    failed.push(Field::Cadence);
                    None
                }
            },
            WorkoutKind::Cycling => match record.elevation_gain_m {
                Some(gain) if gain.is_finite() && gain >= 0.0 => Some(Activity::Cycling {
                    elevation_gain_m: gain,
                }),
                _ => {
                    failed.push(Field::ElevationGain);
                    None
                }
            },
        };

        match activity {
            Some(activity) if failed.is_empty() => Ok(Self {
                identity: record.identity,
                created_at: record.created_at,
                distance_km: record.distance_km,
                duration_min: record.duration_min,
                coordinate: record.coordinate,
                label: record.label,
                activity,
            }),
            _ => Err(ValidationError::new(failed)),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Pace in min/km for running, speed in km/min for cycling.
    pub fn derived_value(&self) -> f64 {
        match self.activity {
            Activity::Running { .. } => self.duration_min / self.distance_km,
            Activity::Cycling { .. } => self.distance_km / self.duration_min,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { .. } => Some(self.derived_value()),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { .. } => None,
            Activity::Cycling { .. } => Some(self.derived_value()),
        }
    }

    pub fn type_specific_value(&self) -> f64 {
        match self.activity {
            Activity::Running { cadence } => cadence as f64,
            Activity::Cycling { elevation_gain_m } => elevation_gain_m,
        }
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// "Running on April 14"
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.display_name(), created_at.format("%B %-d"))
}
