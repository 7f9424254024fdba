use std::collections::HashMap;

use crate::error::StoreError;
use crate::types::workout::Workout;

/// Workouts of the current session in creation order, indexed by identity.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    index: HashMap<String, usize>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, workout: Workout) -> Result<(), StoreError> {
        if self.index.contains_key(workout.identity()) {
            return Err(StoreError::DuplicateIdentity(workout.identity().to_string()));
        }
        self.index
            .insert(workout.identity().to_string(), self.workouts.len());
        self.workouts.push(workout);
        Ok(())
    }

    pub fn find_by_identity(&self, identity: &str) -> Option<&Workout> {
        self.index.get(identity).map(|&i| &self.workouts[i])
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Swaps in a whole new sequence. On a duplicate identity nothing changes.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) -> Result<(), StoreError> {
        let mut index = HashMap::with_capacity(workouts.len());
        for (i, workout) in workouts.iter().enumerate() {
            if index.insert(workout.identity().to_string(), i).is_some() {
                return Err(StoreError::DuplicateIdentity(workout.identity().to_string()));
            }
        }
        self.workouts = workouts;
        self.index = index;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::workout::{Activity, Coordinate};
    use chrono::Utc;

    fn workout(identity: &str) -> Workout {
        Workout::new(
            identity.to_string(),
            Utc::now(),
            5.0,
            25.0,
            Coordinate::new(51.5, -0.12),
            Activity::Running { cadence: 180 },
        )
    }

    #[test]
    fn keeps_insertion_order_and_finds_by_identity() {
        let mut store = WorkoutStore::new();
        store.append(workout("b")).unwrap();
        store.append(workout("a")).unwrap();

        let ids: Vec<&str> = store.all().iter().map(Workout::identity).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(store.find_by_identity("a").map(Workout::identity), Some("a"));
        assert!(store.find_by_identity("c").is_none());
    }

    #[test]
    fn duplicate_append_leaves_store_unchanged() {
        let mut store = WorkoutStore::new();
        store.append(workout("a")).unwrap();
        let err = store.append(workout("a")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateIdentity(id) if id == "a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_all_swaps_contents() {
        let mut store = WorkoutStore::new();
        store.append(workout("old")).unwrap();
        store
            .replace_all(vec![workout("x"), workout("y")])
            .unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.find_by_identity("old").is_none());
        assert!(store.find_by_identity("y").is_some());

        assert!(store
            .replace_all(vec![workout("z"), workout("z")])
            .is_err());
        assert_eq!(store.len(), 2);
        assert!(store.find_by_identity("x").is_some());
    }
}
