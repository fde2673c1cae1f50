use crate::types::{Coords, WorkoutType};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts at map locations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,

    /// SQLite file holding the workout log. Overrides `MAPTY_STORE`.
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Current position as LAT,LNG. Overrides `MAPTY_HOME`.
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true, global = true)]
    pub home: Option<Coords>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Click the map at a location and submit a workout there.
    Add {
        #[arg(long = "type", value_enum, default_value_t = WorkoutType::Running)]
        kind: WorkoutType,

        /// Where the workout happened, as LAT,LNG
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        at: Coords,

        /// km
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// min
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// steps/min (running)
        #[arg(long, allow_hyphen_values = true)]
        cadence: Option<String>,

        /// meters climbed (cycling)
        #[arg(long, allow_hyphen_values = true)]
        elevation: Option<String>,
    },

    /// Print the stored workouts, newest first.
    List {
        /// Print the list markup instead of a summary table
        #[arg(long)]
        html: bool,
    },

    /// Pan the map to a stored workout.
    Pan {
        /// Workout id, as printed by `list`
        id: String,
    },

    /// Delete every stored workout.
    Reset,
}
