use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::workout::{Coordinate, Workout, WorkoutKind};

/// Plain record stored in the persistence slot. It carries every field a list
/// entry or marker needs, so a client can render it without the entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub identity: String,
    pub created_at: DateTime<Utc>,
    pub kind: WorkoutKind,
    pub distance_km: f64,
    pub duration_min: f64,
    pub coordinate: Coordinate,
    pub label: String,
    pub derived_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain_m: Option<f64>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let activity = workout.activity();
        Self {
            identity: workout.identity().to_string(),
            created_at: workout.created_at(),
            kind: workout.kind(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            coordinate: workout.coordinate(),
            label: workout.label().to_string(),
            derived_value: workout.derived_value(),
            cadence: activity.cadence(),
            elevation_gain_m: activity.elevation_gain_m(),
        }
    }
}
