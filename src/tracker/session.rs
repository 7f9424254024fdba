use std::collections::HashSet;

use serde::Serialize;

use crate::error::{GeolocationError, SessionError};
use crate::storage::PersistenceAdapter;
use crate::tracker::collaborators::View;
use crate::tracker::factory::{WorkoutFactory, WorkoutInput};
use crate::tracker::store::WorkoutStore;
use crate::types::view::{MarkerModel, RenderModel};
use crate::types::workout::{Coordinate, Workout, WorkoutKind};

pub const DEFAULT_ZOOM_LEVEL: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Phase {
    Idle,
    /// The map was clicked and the entry form is open for that spot.
    AwaitingInput { coordinate: Coordinate },
}

/// Drives one user session: map clicks open the form, submissions become
/// workouts, and every change is drawn on the view and written to storage.
pub struct Session<V> {
    view: V,
    store: WorkoutStore,
    factory: WorkoutFactory,
    persistence: PersistenceAdapter,
    zoom_level: u8,
    phase: Phase,
}

impl<V: View> Session<V> {
    pub fn new(view: V, persistence: PersistenceAdapter, zoom_level: u8) -> Self {
        Self {
            view,
            store: WorkoutStore::new(),
            factory: WorkoutFactory::new(),
            persistence,
            zoom_level,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom_level
    }

    /// Rehydrates the store from storage and draws every stored workout.
    /// Returns how many workouts were restored.
    pub fn startup(&mut self) -> usize {
        let records = self.persistence.load().unwrap_or_default();
        let mut seen = HashSet::with_capacity(records.len());
        let mut workouts = Vec::with_capacity(records.len());

        for record in records {
            let identity = record.identity.clone();
            let stored_value = record.derived_value;
            match Workout::from_record(record) {
                Ok(workout) if seen.insert(identity.clone()) => {
                    if workout.derived_value() != stored_value {
                        tracing::debug!(
                            "Recomputed derived value for {} ({} -> {})",
                            identity,
                            stored_value,
                            workout.derived_value()
                        );
                    }
                    workouts.push(workout);
                }
                Ok(_) => tracing::warn!("Skipping stored workout with duplicate identity {}", identity),
                Err(err) => tracing::warn!("Skipping stored workout {}: {}", identity, err),
            }
        }

        if let Err(err) = self.store.replace_all(workouts) {
            tracing::warn!("Could not restore workouts: {}", err);
        }

        for workout in self.store.all() {
            self.factory.observe_identity(workout.identity());
            self.view.append_entry(RenderModel::from(workout));
            self.view.add_marker(MarkerModel::from(workout));
        }
        self.phase = Phase::Idle;

        tracing::info!("Restored {} workouts", self.store.len());
        self.store.len()
    }

    /// Continuation of the one-shot geolocation request. A failure only
    /// means the map stays without a center.
    pub fn position_resolved(&mut self, position: Result<Coordinate, GeolocationError>) {
        match position {
            Ok(center) => {
                tracing::info!("Centering map on {}, {}", center.lat, center.lng);
                self.view.initialize(center, self.zoom_level);
            }
            Err(err) => tracing::info!("{}; continuing without a map center", err),
        }
    }

    pub fn map_clicked(&mut self, coordinate: Coordinate) {
        self.phase = Phase::AwaitingInput { coordinate };
        self.view.show();
        self.view.focus_primary_field();
    }

    pub fn change_type(&mut self, kind: WorkoutKind) {
        self.view.show_type_field(kind);
    }

    /// Turns a form submission into a stored workout. On a validation error
    /// the user is alerted and the form stays open.
    pub fn submit(&mut self, input: &WorkoutInput) -> Result<&Workout, SessionError> {
        let Phase::AwaitingInput { coordinate } = self.phase else {
            return Err(SessionError::NoPendingLocation);
        };

        let workout = match self.factory.create(input, coordinate) {
            Ok(workout) => workout,
            Err(err) => {
                self.view.alert(&err.to_string());
                return Err(err.into());
            }
        };
        let identity = workout.identity().to_string();
        let entry = RenderModel::from(&workout);
        let marker = MarkerModel::from(&workout);
        if let Err(err) = self.store.append(workout) {
            self.view.alert(&err.to_string());
            return Err(err.into());
        }

        self.view.hide();
        self.view.clear();
        self.view.add_marker(marker);
        self.view.append_entry(entry);
        self.phase = Phase::Idle;

        // A rendered but unsaved workout is acceptable; it is logged and kept.
        if let Err(err) = self.persistence.save(&self.store) {
            tracing::error!("Failed to persist workout {}: {}", identity, err);
        }

        tracing::info!("Recorded workout {}", identity);
        self.store
            .find_by_identity(&identity)
            .ok_or(SessionError::NotFound(identity))
    }

    /// Centers the map on the workout behind a clicked list entry.
    pub fn focus_entry(&mut self, identity: &str) -> Result<Coordinate, SessionError> {
        let coordinate = self
            .store
            .find_by_identity(identity)
            .map(Workout::coordinate)
            .ok_or_else(|| SessionError::NotFound(identity.to_string()))?;
        self.view.set_view(coordinate, self.zoom_level);
        Ok(coordinate)
    }

    /// Clears the storage slot and reloads the session from it.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.persistence.clear()?;

        self.view.remove_entries();
        self.view.remove_markers();
        self.view.clear_view();
        self.view.hide();
        self.view.clear();
        self.view.show_type_field(WorkoutKind::default());
        self.store = WorkoutStore::new();
        self.startup();
        Ok(())
    }
}
