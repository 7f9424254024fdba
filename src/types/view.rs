use serde::{Deserialize, Serialize};

use crate::types::workout::{Coordinate, Workout, WorkoutKind};

/// What the list view needs to draw one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub identity: String,
    pub kind: WorkoutKind,
    pub label: String,
    pub distance_km: f64,
    pub duration_min: f64,
    pub derived_value: String,
    pub derived_unit: String,
    pub type_specific_value: String,
    pub type_specific_unit: String,
}

impl From<&Workout> for RenderModel {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            identity: workout.identity().to_string(),
            kind,
            label: workout.label().to_string(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            derived_value: format!("{:.2}", workout.derived_value()),
            derived_unit: kind.derived_unit().to_string(),
            type_specific_value: workout.type_specific_value().to_string(),
            type_specific_unit: kind.type_specific_unit().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerModel {
    pub identity: String,
    pub coordinate: Coordinate,
    pub popup_content: String,
    pub style_class: String,
}

impl From<&Workout> for MarkerModel {
    fn from(workout: &Workout) -> Self {
        Self {
            identity: workout.identity().to_string(),
            coordinate: workout.coordinate(),
            popup_content: workout.label().to_string(),
            style_class: workout.kind().popup_class(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::workout::Activity;
    use chrono::Utc;

    #[test]
    fn entry_rounds_derived_value_to_two_decimals() {
        let workout = Workout::new(
            "1-0".into(),
            Utc::now(),
            20.0,
            60.0,
            Coordinate::new(0.0, 0.0),
            Activity::Cycling {
                elevation_gain_m: 150.0,
            },
        );
        let entry = RenderModel::from(&workout);
        assert_eq!(entry.derived_value, "0.33");
        assert_eq!(entry.derived_unit, "km/h");
        assert_eq!(entry.type_specific_value, "150");
        assert_eq!(entry.type_specific_unit, "m");

        let marker = MarkerModel::from(&workout);
        assert_eq!(marker.style_class, "cycling-popup");
        assert_eq!(marker.popup_content, workout.label());
    }
}
