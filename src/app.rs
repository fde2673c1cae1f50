//! The application session: owns the workout log and wires the form, map,
//! list and storage together.

use crate::dlog;
use crate::error::{
    AppError, INVALID_INPUT_ALERT, LOCATION_ALERT, RESET_ALERT, Result, SAVE_ALERT,
};
use crate::form::{Field, Form, FormState};
use crate::map::{Geolocator, MapAdapter, MapSettings, MapView};
use crate::render::ListPanel;
use crate::storage::{KeyValueStore, clear_workouts, load_workouts, save_workouts};
use crate::types::{Coords, Workout, WorkoutType, id_from_millis};
use chrono::{DateTime, Local, TimeZone};

/// Blocking user-facing messages.
pub trait Alerter {
    fn alert(&mut self, message: &str);
}

impl Alerter for Vec<String> {
    fn alert(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// A click inside the workout list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListClick<'a> {
    /// Inside the entry carrying this id.
    Entry(&'a str),
    /// Anywhere not inside an entry.
    Outside,
}

pub struct Session<S, M, A> {
    workouts: Vec<Workout>,
    form: Form,
    list: ListPanel,
    map: MapAdapter<M>,
    store: S,
    alerter: A,
}

impl<S: KeyValueStore, M: MapView, A: Alerter> Session<S, M, A> {
    /// Load the stored log and list it. The map stays unloaded until
    /// [`Session::locate`] succeeds.
    pub fn start(store: S, view: M, settings: MapSettings, alerter: A) -> Result<Self> {
        let mut session = Self {
            workouts: Vec::new(),
            form: Form::new(),
            list: ListPanel::new(),
            map: MapAdapter::new(view, settings),
            store,
            alerter,
        };
        session.rehydrate()?;
        Ok(session)
    }

    fn rehydrate(&mut self) -> Result<()> {
        self.workouts = load_workouts(&self.store);
        for w in &self.workouts {
            self.list.push(w).map_err(AppError::Render)?;
        }
        dlog!("rehydrated {} workouts", self.workouts.len());
        Ok(())
    }

    /// Ask for the current position once and load the map around it.
    /// On failure the user is alerted and the map stays unloaded.
    pub fn locate<G: Geolocator + ?Sized>(&mut self, geo: &mut G) -> Result<Coords> {
        match geo.current_position() {
            Ok(position) => {
                self.load_map(position);
                Ok(position)
            }
            Err(e) => {
                tracing::warn!(err = %e, "geolocation failed");
                self.alerter.alert(LOCATION_ALERT);
                Err(AppError::Geolocation(e))
            }
        }
    }

    /// Load the base map and place markers for every workout known so far.
    pub fn load_map(&mut self, center: Coords) {
        if !self.map.load(center) {
            return;
        }
        for w in &self.workouts {
            self.map.render_marker(w);
        }
    }

    /// Map click: remember where and show the form.
    pub fn on_map_click(&mut self, at: Coords) -> Result<()> {
        if !self.map.is_loaded() {
            return Err(AppError::MapNotLoaded);
        }
        dlog!("map click at {at}; showing form");
        self.form.show(at);
        Ok(())
    }

    pub fn select_type(&mut self, kind: WorkoutType) {
        self.form.select(kind);
    }

    pub fn toggle_type(&mut self) {
        self.form.toggle_type();
    }

    pub fn set_input(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn cancel(&mut self) {
        self.form.hide();
    }

    /// Submit the form with the current local time as creation time.
    pub fn submit(&mut self) -> Result<&Workout> {
        self.submit_at(&Local::now())
    }

    /// Validate the form and record a new workout created at `now`.
    ///
    /// On invalid input the user is alerted, the form stays open and nothing
    /// is recorded.
    pub fn submit_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<&Workout> {
        let FormState::Visible { at } = self.form.state() else {
            return Err(AppError::FormHidden);
        };

        let draft = match self.form.validate() {
            Ok(draft) => draft,
            Err(e) => {
                tracing::info!(err = %e, "rejected workout input");
                self.alerter.alert(INVALID_INPUT_ALERT);
                return Err(AppError::Invalid(e));
            }
        };

        let workout = Workout::from_draft(now, at, draft);
        let id = self.unique_id(workout.id());
        let workout = workout.with_id(id);

        self.list.push(&workout).map_err(AppError::Render)?;
        self.map.render_marker(&workout);
        tracing::info!(id = workout.id(), kind = %workout.kind(), "workout recorded");
        self.workouts.push(workout);
        self.form.hide();

        if let Err(e) = save_workouts(&mut self.store, &self.workouts) {
            tracing::error!(err = %e, "saving workout log failed");
            self.alerter.alert(SAVE_ALERT);
        }

        let idx = self.workouts.len() - 1;
        Ok(&self.workouts[idx])
    }

    /// Ids come from the creation millisecond; bump until free.
    fn unique_id(&self, candidate: &str) -> String {
        let taken = |id: &str| self.workouts.iter().any(|w| w.id() == id);
        if !taken(candidate) {
            return candidate.to_string();
        }
        let Ok(mut n) = candidate.parse::<i64>() else {
            return candidate.to_string();
        };
        loop {
            n += 1;
            let id = id_from_millis(n);
            if !taken(&id) {
                dlog!("id {candidate} taken; using {id}");
                return id;
            }
        }
    }

    /// List click: pan to the clicked workout. Returns the pan target, or
    /// `None` when the click hit no entry, the id is unknown or the map is
    /// not loaded.
    pub fn on_list_click(&mut self, click: ListClick<'_>) -> Option<Coords> {
        let ListClick::Entry(id) = click else {
            return None;
        };
        let target = self.workouts.iter().find(|w| w.id() == id)?.coords();
        self.map.pan_to(target).then_some(target)
    }

    /// Drop the stored log and start over as after a page reload.
    ///
    /// The session is discarded even when the store refuses the removal; the
    /// user is alerted and the storage error is returned afterwards.
    pub fn reset(&mut self) -> Result<()> {
        let cleared = clear_workouts(&mut self.store);
        tracing::info!(discarded = self.workouts.len(), "workout log reset");
        self.workouts.clear();
        self.list.clear();
        self.form = Form::new();
        self.map.unload();

        match cleared {
            Ok(()) => self.rehydrate(),
            Err(e) => {
                tracing::error!(err = %e, "removing stored workout log failed");
                self.alerter.alert(RESET_ALERT);
                Err(AppError::Storage(e))
            }
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub const fn form(&self) -> &Form {
        &self.form
    }

    pub const fn list(&self) -> &ListPanel {
        &self.list
    }

    pub const fn map(&self) -> &MapAdapter<M> {
        &self.map
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn alerter(&self) -> &A {
        &self.alerter
    }
}
