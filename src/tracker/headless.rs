use serde::Serialize;

use crate::tracker::collaborators::{EntryForm, ListView, MapView, Notifier};
use crate::types::view::{MarkerModel, RenderModel};
use crate::types::workout::{Coordinate, WorkoutKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub visible: bool,
    pub focused: bool,
    pub type_field: WorkoutKind,
}

/// Records what would be drawn instead of drawing it. The HTTP surface hands
/// this state to the browser client, which owns the real map and list.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlessView {
    pub viewport: Option<Viewport>,
    pub markers: Vec<MarkerModel>,
    pub entries: Vec<RenderModel>,
    pub form: FormState,
    pub last_alert: Option<String>,
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapView for HeadlessView {
    fn initialize(&mut self, center: Coordinate, zoom: u8) {
        self.viewport = Some(Viewport { center, zoom });
    }

    fn add_marker(&mut self, marker: MarkerModel) {
        self.markers.push(marker);
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.viewport = Some(Viewport { center, zoom });
    }

    fn remove_markers(&mut self) {
        self.markers.clear();
    }

    fn clear_view(&mut self) {
        self.viewport = None;
    }
}

impl ListView for HeadlessView {
    fn append_entry(&mut self, entry: RenderModel) {
        self.entries.push(entry);
    }

    fn remove_entries(&mut self) {
        self.entries.clear();
    }
}

impl EntryForm for HeadlessView {
    fn show(&mut self) {
        self.form.visible = true;
    }

    fn hide(&mut self) {
        self.form.visible = false;
        self.form.focused = false;
    }

    fn clear(&mut self) {
        self.last_alert = None;
    }

    fn focus_primary_field(&mut self) {
        self.form.focused = true;
    }

    fn show_type_field(&mut self, kind: WorkoutKind) {
        self.form.type_field = kind;
    }
}

impl Notifier for HeadlessView {
    fn alert(&mut self, message: &str) {
        self.last_alert = Some(message.to_string());
    }
}
