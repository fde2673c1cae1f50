//! mapty: log running and cycling workouts against map locations.
//!
//! The browser collaborators of a map-based workout log (the map widget,
//! geolocation, local storage, alert dialogs) are traits here, so the whole
//! flow can be driven headless from the command line or from tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod form;
pub mod map;
pub mod render;
pub mod storage;
pub mod types;
pub mod utils;
