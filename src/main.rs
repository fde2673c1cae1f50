#![deny(warnings, clippy::all, clippy::pedantic, clippy::nursery)]

use anyhow::{Result, bail};
use clap::Parser;
use mapty::{
    app::{Alerter, ListClick, Session},
    cli,
    config::Config,
    database::SqliteStore,
    form::Field,
    map::{FixedPosition, RecordingMap},
    types::{Activity, Workout},
    utils,
};

#[macro_use]
extern crate mapty;

/// Alerts go straight to the terminal, outside the log stream.
struct TerminalAlerter;

impl Alerter for TerminalAlerter {
    fn alert(&mut self, message: &str) {
        eprintln!("alert: {message}");
    }
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let mut config = Config::from_env()?;
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    if cli.home.is_some() {
        config.home = cli.home;
    }
    dlog!(
        "store={} home={:?} zoom={}",
        config.store_path.display(),
        config.home,
        config.map.zoom
    );

    let store = SqliteStore::open(&config.store_path)?;
    let mut session = Session::start(
        store,
        RecordingMap::new(),
        config.map.clone(),
        TerminalAlerter,
    )?;
    let mut geo = FixedPosition(config.home);

    match cli.cmd {
        cli::Cmd::Add {
            kind,
            at,
            distance,
            duration,
            cadence,
            elevation,
        } => {
            session.locate(&mut geo)?;
            session.on_map_click(at)?;
            session.select_type(kind);
            session.set_input(Field::Distance, distance);
            session.set_input(Field::Duration, duration);
            session.set_input(Field::Cadence, cadence.unwrap_or_default());
            session.set_input(Field::Elevation, elevation.unwrap_or_default());

            let workout = session.submit()?;
            println!("{}", summary_line(workout));
            if let Some(entry) = session.list().entries().first() {
                dlog!("list entry:\n{}", entry.html);
            }
            Ok(())
        }
        cli::Cmd::List { html } => {
            if session.workouts().is_empty() {
                tracing::info!("no workouts logged yet");
                return Ok(());
            }
            if html {
                print!("{}", session.list().markup());
            } else {
                for w in session.workouts().iter().rev() {
                    println!("{}", summary_line(w));
                }
            }
            Ok(())
        }
        cli::Cmd::Pan { id } => {
            session.locate(&mut geo)?;
            let Some(target) = session.on_list_click(ListClick::Entry(&id)) else {
                bail!("No workout with id {id}. Run `mapty list` to see ids.");
            };
            println!("{target}");
            Ok(())
        }
        cli::Cmd::Reset => {
            session.reset()?;
            println!("workout log cleared");
            Ok(())
        }
    }
}

fn summary_line(w: &Workout) -> String {
    let unit = match w.activity() {
        Activity::Running { .. } => "min/km",
        Activity::Cycling { .. } => "km/h",
    };
    format!(
        "{}\t{}\t{}\t{} km\t{} min\t{} {unit}\t{}",
        w.id(),
        w.date().to_rfc3339(),
        w.coords(),
        w.distance(),
        w.duration(),
        utils::one_decimal(w.metric()),
        w.description(),
    )
}
