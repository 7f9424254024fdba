use crate::error::GeolocationError;
use crate::types::view::{MarkerModel, RenderModel};
use crate::types::workout::{Coordinate, WorkoutKind};

pub trait MapView {
    fn initialize(&mut self, center: Coordinate, zoom: u8);
    fn add_marker(&mut self, marker: MarkerModel);
    fn set_view(&mut self, center: Coordinate, zoom: u8);
    fn remove_markers(&mut self);
    /// Drops the current center, as before the map was first initialized.
    fn clear_view(&mut self);
}

pub trait ListView {
    fn append_entry(&mut self, entry: RenderModel);
    fn remove_entries(&mut self);
}

pub trait EntryForm {
    fn show(&mut self);
    fn hide(&mut self);
    fn clear(&mut self);
    fn focus_primary_field(&mut self);
    /// Shows the cadence field for running, elevation gain for cycling.
    fn show_type_field(&mut self, kind: WorkoutKind);
}

pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Everything the session draws on.
pub trait View: MapView + ListView + EntryForm + Notifier {}

impl<T: MapView + ListView + EntryForm + Notifier> View for T {}

/// One-shot position provider.
pub trait Geolocator: Send + Sync {
    fn locate(&self) -> Result<Coordinate, GeolocationError>;
}

/// A position known up front, e.g. from configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Option<Coordinate>);

impl Geolocator for FixedLocation {
    fn locate(&self) -> Result<Coordinate, GeolocationError> {
        self.0.ok_or(GeolocationError::Unavailable)
    }
}
