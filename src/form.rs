//! The new-workout form: type selection, raw inputs, validation.

use crate::types::{Coords, WorkoutDraft, WorkoutType};
use std::fmt;

/// Numeric inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
            Self::Cadence => "cadence",
            Self::Elevation => "elevation gain",
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a number, got {raw:?}")]
    NotANumber { field: Field, raw: String },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: Field, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: Field, value: f64 },
}

impl ValidationError {
    pub const fn field(&self) -> Field {
        match self {
            Self::NotANumber { field, .. }
            | Self::NotPositive { field, .. }
            | Self::Negative { field, .. } => *field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Hidden,
    /// Shown after a map click at `at`.
    Visible { at: Coords },
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    state: Option<Coords>,
    kind: WorkoutType,
    distance: String,
    duration: String,
    cadence: String,
    elevation: String,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> FormState {
        match self.state {
            Some(at) => FormState::Visible { at },
            None => FormState::Hidden,
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.state.is_some()
    }

    /// Open the form for a workout at `at`. A second click while open just
    /// moves the target; typed values are kept.
    pub fn show(&mut self, at: Coords) {
        self.state = Some(at);
    }

    /// Close the form and clear every numeric input. The type selection stays.
    pub fn hide(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
        self.state = None;
    }

    pub const fn kind(&self) -> WorkoutType {
        self.kind
    }

    pub fn select(&mut self, kind: WorkoutType) {
        self.kind = kind;
    }

    pub fn toggle_type(&mut self) {
        self.kind = match self.kind {
            WorkoutType::Running => WorkoutType::Cycling,
            WorkoutType::Cycling => WorkoutType::Running,
        };
    }

    /// Whether the row of `field` is hidden for the current selection.
    pub const fn is_row_hidden(&self, field: Field) -> bool {
        matches!(
            (self.kind, field),
            (WorkoutType::Running, Field::Elevation) | (WorkoutType::Cycling, Field::Cadence)
        )
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Duration => &self.duration,
            Field::Cadence => &self.cadence,
            Field::Elevation => &self.elevation,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Distance => &mut self.distance,
            Field::Duration => &mut self.duration,
            Field::Cadence => &mut self.cadence,
            Field::Elevation => &mut self.elevation,
        }
    }

    /// Read the inputs of the selected type. Hidden rows are ignored.
    pub fn validate(&self) -> Result<WorkoutDraft, ValidationError> {
        let distance = self.positive(Field::Distance)?;
        let duration = self.positive(Field::Duration)?;
        match self.kind {
            WorkoutType::Running => Ok(WorkoutDraft::Running {
                distance,
                duration,
                cadence: self.non_negative(Field::Cadence)?,
            }),
            WorkoutType::Cycling => Ok(WorkoutDraft::Cycling {
                distance,
                duration,
                elevation_gain: self.non_negative(Field::Elevation)?,
            }),
        }
    }

    fn number(&self, field: Field) -> Result<f64, ValidationError> {
        let raw = self.value(field);
        parse_number(raw).ok_or_else(|| ValidationError::NotANumber {
            field,
            raw: raw.to_string(),
        })
    }

    fn positive(&self, field: Field) -> Result<f64, ValidationError> {
        let value = self.number(field)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ValidationError::NotPositive { field, value })
        }
    }

    fn non_negative(&self, field: Field) -> Result<f64, ValidationError> {
        let value = self.number(field)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(ValidationError::Negative { field, value })
        }
    }
}

/// A finite number, surrounding whitespace allowed. Blank is not a number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
