use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// indexed by `month0()`
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A latitude/longitude pair. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coords {
    type Err = String;

    /// Parses `LAT,LNG`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("bad latitude {lat:?}"))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| format!("bad longitude {lng:?}"))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(format!("coordinates out of range: {lat},{lng}"));
        }
        Ok(Self { lat, lng })
    }
}

/// The discriminator of a workout, as selected in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific fields. The derived metric is computed once at
/// construction and stored alongside the input it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Running {
        /// steps/min
        cadence: f64,
        /// min/km
        pace: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        /// meters
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

impl Activity {
    pub const fn kind(&self) -> WorkoutType {
        match self {
            Self::Running { .. } => WorkoutType::Running,
            Self::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Validated form values, ready to become a [`Workout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDraft {
    Running {
        distance: f64,
        duration: f64,
        cadence: f64,
    },
    Cycling {
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    },
}

/// One logged workout. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    date: DateTime<Utc>,
    id: String,
    coords: Coords,
    /// km
    distance: f64,
    /// min
    duration: f64,
    description: String,
    #[serde(flatten)]
    activity: Activity,
}

impl Workout {
    pub fn running<Tz: TimeZone>(
        created: &DateTime<Tz>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        let pace = duration / distance;
        Self::build(
            created,
            coords,
            distance,
            duration,
            Activity::Running { cadence, pace },
        )
    }

    pub fn cycling<Tz: TimeZone>(
        created: &DateTime<Tz>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        let speed = distance / (duration / 60.0);
        Self::build(
            created,
            coords,
            distance,
            duration,
            Activity::Cycling {
                elevation_gain,
                speed,
            },
        )
    }

    pub fn from_draft<Tz: TimeZone>(
        created: &DateTime<Tz>,
        coords: Coords,
        draft: WorkoutDraft,
    ) -> Self {
        match draft {
            WorkoutDraft::Running {
                distance,
                duration,
                cadence,
            } => Self::running(created, coords, distance, duration, cadence),
            WorkoutDraft::Cycling {
                distance,
                duration,
                elevation_gain,
            } => Self::cycling(created, coords, distance, duration, elevation_gain),
        }
    }

    fn build<Tz: TimeZone>(
        created: &DateTime<Tz>,
        coords: Coords,
        distance: f64,
        duration: f64,
        activity: Activity,
    ) -> Self {
        let description = describe(activity.kind(), created);
        Self {
            date: created.with_timezone(&Utc),
            id: id_from_millis(created.timestamp_millis()),
            coords,
            distance,
            duration,
            description,
            activity,
        }
    }

    /// Replace the id. Only the session uses this, to resolve same-millisecond
    /// collisions before the workout is published.
    pub(crate) fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    pub const fn distance(&self) -> f64 {
        self.distance
    }

    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn activity(&self) -> &Activity {
        &self.activity
    }

    pub const fn kind(&self) -> WorkoutType {
        self.activity.kind()
    }

    /// min/km, for running workouts.
    pub const fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace, .. } => Some(pace),
            Activity::Cycling { .. } => None,
        }
    }

    /// km/h, for cycling workouts.
    pub const fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed, .. } => Some(speed),
            Activity::Running { .. } => None,
        }
    }

    /// The derived metric of either variant: pace for running, speed for cycling.
    pub const fn metric(&self) -> f64 {
        match self.activity {
            Activity::Running { pace, .. } => pace,
            Activity::Cycling { speed, .. } => speed,
        }
    }
}

/// `"Running on April 14"`, using the calendar date in `created`'s zone.
pub fn describe<Tz: TimeZone>(kind: WorkoutType, created: &DateTime<Tz>) -> String {
    let month = MONTHS[created.month0() as usize];
    format!("{} on {month} {}", kind.label(), created.day())
}

/// Last ten digits of the epoch-millisecond timestamp.
pub fn id_from_millis(millis: i64) -> String {
    let s = millis.to_string();
    let start = s.len().saturating_sub(10);
    s[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn running_pace_is_duration_over_distance() {
        let w = Workout::running(&at(2024, 4, 14), Coords::new(1.0, 2.0), 10.0, 60.0, 150.0);
        assert_eq!(w.pace(), Some(6.0));
        assert_eq!(w.speed(), None);
        assert_eq!(w.kind(), WorkoutType::Running);
    }

    #[test]
    fn cycling_speed_is_km_per_hour() {
        let w = Workout::cycling(&at(2024, 4, 14), Coords::new(1.0, 2.0), 20.0, 60.0, 500.0);
        assert_eq!(w.speed(), Some(20.0));
        assert_eq!(w.pace(), None);
        assert_eq!(w.metric(), 20.0);
    }

    #[test]
    fn description_uses_month_and_day() {
        let w = Workout::cycling(&at(2023, 12, 3), Coords::new(0.0, 0.0), 5.0, 30.0, 0.0);
        assert_eq!(w.description(), "Cycling on December 3");
    }

    #[test]
    fn description_follows_creation_zone() {
        // 2024-01-31T23:30Z is already February 1st at UTC+2.
        let utc = Utc.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).unwrap();
        let local = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        let w = Workout::running(&local, Coords::new(0.0, 0.0), 1.0, 5.0, 170.0);
        assert_eq!(w.description(), "Running on February 1");
        assert_eq!(w.date(), utc);
    }

    #[test]
    fn id_keeps_last_ten_digits() {
        assert_eq!(id_from_millis(1_713_087_000_123), "3087000123");
        assert_eq!(id_from_millis(42), "42");
    }

    #[test]
    fn serializes_with_type_tag_and_camel_case() {
        let w = Workout::cycling(&at(2024, 4, 14), Coords::new(48.85, 2.35), 20.0, 60.0, 500.0);
        let v = serde_json::to_value(&w).unwrap();
        assert_eq!(v["type"], "cycling");
        assert_eq!(v["elevationGain"], 500.0);
        assert_eq!(v["speed"], 20.0);
        assert_eq!(v["coords"], serde_json::json!([48.85, 2.35]));
    }

    #[test]
    fn coords_parse() {
        let c: Coords = "48.85, 2.35".parse().unwrap();
        assert_eq!(c, Coords::new(48.85, 2.35));
        assert!("48.85".parse::<Coords>().is_err());
        assert!("91,0".parse::<Coords>().is_err());
        assert!("a,b".parse::<Coords>().is_err());
    }
}
