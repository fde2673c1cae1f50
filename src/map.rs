//! Map and geolocation collaborators, and the adapter that drives the map.

use crate::dlog;
use crate::types::{Coords, Workout, WorkoutType};

pub const DEFAULT_ZOOM: u8 = 13;
pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Marker popup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
    pub content: String,
}

impl Popup {
    /// Stays open until closed by hand.
    pub fn for_workout(workout: &Workout) -> Self {
        let class = match workout.kind() {
            WorkoutType::Running => "running-popup",
            WorkoutType::Cycling => "cycling-popup",
        };
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: class.to_string(),
            content: format!("{} km", workout.distance()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    /// seconds
    pub duration: f64,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration: 1.0,
        }
    }
}

/// The map widget.
pub trait MapView {
    fn set_view(&mut self, center: Coords, zoom: u8);
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);
    fn add_marker(&mut self, at: Coords, popup: &Popup);
    fn pan_to(&mut self, target: Coords, zoom: u8, pan: PanOptions);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("permission to read the position was denied")]
    Denied,
    #[error("position is unavailable")]
    Unavailable,
}

/// Source of the user's current position. Asked once per session.
pub trait Geolocator {
    fn current_position(&mut self) -> Result<Coords, GeolocationError>;
}

/// A position fixed up front, e.g. from configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Option<Coords>);

impl Geolocator for FixedPosition {
    fn current_position(&mut self) -> Result<Coords, GeolocationError> {
        self.0.ok_or(GeolocationError::Unavailable)
    }
}

/// Tile source and zoom used when the map loads and when panning.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_url: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapState {
    Unloaded,
    Loaded { center: Coords },
}

pub struct MapAdapter<M> {
    view: M,
    settings: MapSettings,
    state: MapState,
}

impl<M: MapView> MapAdapter<M> {
    pub const fn new(view: M, settings: MapSettings) -> Self {
        Self {
            view,
            settings,
            state: MapState::Unloaded,
        }
    }

    pub const fn state(&self) -> MapState {
        self.state
    }

    pub const fn is_loaded(&self) -> bool {
        matches!(self.state, MapState::Loaded { .. })
    }

    pub const fn view(&self) -> &M {
        &self.view
    }

    pub const fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Show the base map around `center`. Returns false if it was already loaded.
    pub fn load(&mut self, center: Coords) -> bool {
        if self.is_loaded() {
            dlog!("map already loaded; ignoring load at {center}");
            return false;
        }
        self.view.set_view(center, self.settings.zoom);
        self.view
            .add_tile_layer(&self.settings.tile_url, &self.settings.attribution);
        self.state = MapState::Loaded { center };
        tracing::info!(%center, zoom = self.settings.zoom, "map loaded");
        true
    }

    /// Back to unloaded, as on a fresh page. The view keeps what it drew.
    pub fn unload(&mut self) {
        self.state = MapState::Unloaded;
    }

    /// Place the workout's marker. Skipped while unloaded.
    pub fn render_marker(&mut self, workout: &Workout) -> bool {
        if !self.is_loaded() {
            dlog!("map not loaded; deferring marker for {}", workout.id());
            return false;
        }
        self.view
            .add_marker(workout.coords(), &Popup::for_workout(workout));
        true
    }

    pub fn pan_to(&mut self, target: Coords) -> bool {
        if !self.is_loaded() {
            return false;
        }
        self.view
            .pan_to(target, self.settings.zoom, PanOptions::default());
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    SetView { center: Coords, zoom: u8 },
    TileLayer { url_template: String, attribution: String },
    Marker { at: Coords, popup: Popup },
    PanTo { target: Coords, zoom: u8, pan: PanOptions },
}

/// Headless map that remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingMap {
    calls: Vec<MapCall>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[MapCall] {
        &self.calls
    }

    pub fn markers(&self) -> impl Iterator<Item = (&Coords, &Popup)> {
        self.calls.iter().filter_map(|c| match c {
            MapCall::Marker { at, popup } => Some((at, popup)),
            _ => None,
        })
    }

    pub fn last_pan(&self) -> Option<Coords> {
        self.calls.iter().rev().find_map(|c| match c {
            MapCall::PanTo { target, .. } => Some(*target),
            _ => None,
        })
    }
}

impl MapView for RecordingMap {
    fn set_view(&mut self, center: Coords, zoom: u8) {
        dlog!("map set_view center={center} zoom={zoom}");
        self.calls.push(MapCall::SetView { center, zoom });
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        dlog!("map tile_layer url={url_template}");
        self.calls.push(MapCall::TileLayer {
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
        });
    }

    fn add_marker(&mut self, at: Coords, popup: &Popup) {
        dlog!("map marker at={at} class={}", popup.class_name);
        self.calls.push(MapCall::Marker {
            at,
            popup: popup.clone(),
        });
    }

    fn pan_to(&mut self, target: Coords, zoom: u8, pan: PanOptions) {
        dlog!("map pan_to target={target} zoom={zoom}");
        self.calls.push(MapCall::PanTo { target, zoom, pan });
    }
}
