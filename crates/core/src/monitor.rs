//! Threshold monitor: evaluates a progress snapshot against daily
//! checkpoints and produces alert notices.
//!
//! The evaluator is pure apart from the explicit [`MonitorState`] it is
//! handed, which remembers what has already fired. The background task
//! owns one state for the lifetime of the process.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::status::AlertSeverity;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Checkpoints
// ---------------------------------------------------------------------------

/// Fixed times of day at which lagging projects are flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkpoint {
    /// 11:00, before the lunch break.
    BeforeBreak,
    /// 15:00, two hours of work left.
    TwoHoursLeft,
    /// 16:30, last half hour.
    LastHalfHour,
}

impl Checkpoint {
    pub const ALL: [Checkpoint; 3] = [
        Checkpoint::BeforeBreak,
        Checkpoint::TwoHoursLeft,
        Checkpoint::LastHalfHour,
    ];

    /// `(hour, first minute)` the checkpoint opens at. Each stays open
    /// for [`CHECKPOINT_WINDOW_MINUTES`].
    fn opens_at(self) -> (u32, u32) {
        match self {
            Self::BeforeBreak => (11, 0),
            Self::TwoHoursLeft => (15, 0),
            Self::LastHalfHour => (16, 30),
        }
    }

    /// Daily rate below which a project is flagged at this checkpoint.
    fn threshold(self) -> f64 {
        match self {
            Self::BeforeBreak => 50.0,
            Self::TwoHoursLeft => 100.0,
            Self::LastHalfHour => 90.0,
        }
    }

    fn severity(self) -> AlertSeverity {
        match self {
            Self::BeforeBreak | Self::TwoHoursLeft => AlertSeverity::Yellow,
            Self::LastHalfHour => AlertSeverity::Red,
        }
    }

    fn is_open(self, now: NaiveDateTime) -> bool {
        let (hour, minute) = self.opens_at();
        now.hour() == hour
            && now.minute() >= minute
            && now.minute() < minute + CHECKPOINT_WINDOW_MINUTES
    }

    fn notice(self, project: &ProjectSnapshot) -> Notice {
        let rate = project.daily_rate;
        let (message, action) = match self {
            Self::BeforeBreak => (
                format!("{}: significant delay ({rate:.0}%)", project.name),
                "Speed up before the break",
            ),
            Self::TwoHoursLeft => (
                format!(
                    "{}: daily objective not met ({rate:.0}%), 2 hours of work left",
                    project.name
                ),
                "Prioritise this project for the rest of the afternoon",
            ),
            Self::LastHalfHour => (
                format!("{}: objective at risk ({rate:.0}%)", project.name),
                "Last half hour, focus on this project",
            ),
        };
        Notice {
            project_id: Some(project.project_id),
            severity: self.severity(),
            message,
            recommended_action: Some(action.to_string()),
        }
    }
}

/// How long a checkpoint stays open after it opens.
pub const CHECKPOINT_WINDOW_MINUTES: u32 = 5;

/// Working hours as `[start, end)` hour ranges.
pub const WORKING_HOURS: [(u32, u32); 2] = [(8, 12), (13, 17)];

pub fn is_working_hours(now: NaiveDateTime) -> bool {
    WORKING_HOURS
        .iter()
        .any(|&(start, end)| now.hour() >= start && now.hour() < end)
}

// ---------------------------------------------------------------------------
// State and inputs
// ---------------------------------------------------------------------------

/// Progress of one active project at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSnapshot {
    pub project_id: DbId,
    pub name: String,
    pub daily_rate: f64,
}

/// A generated alert, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub project_id: Option<DbId>,
    pub severity: AlertSeverity,
    pub message: String,
    pub recommended_action: Option<String>,
}

/// What the monitor has already observed and reported.
#[derive(Debug, Default)]
pub struct MonitorState {
    last_daily_rate: HashMap<DbId, f64>,
    fired: HashSet<(NaiveDate, Checkpoint)>,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    fn forget_other_days(&mut self, today: NaiveDate) {
        self.fired.retain(|(date, _)| *date == today);
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate a snapshot taken at local wall-clock time `now`.
///
/// - A project whose daily rate reaches 100 (from below) yields a green notice.
/// - During working hours, each open checkpoint flags lagging projects once
///   per day.
pub fn evaluate(
    state: &mut MonitorState,
    snapshot: &[ProjectSnapshot],
    now: NaiveDateTime,
) -> Vec<Notice> {
    let mut notices = Vec::new();

    for project in snapshot {
        let previous = state
            .last_daily_rate
            .insert(project.project_id, project.daily_rate)
            .unwrap_or(0.0);
        if project.daily_rate >= 100.0 && previous < 100.0 {
            notices.push(Notice {
                project_id: Some(project.project_id),
                severity: AlertSeverity::Green,
                message: format!("Daily objective reached for {}", project.name),
                recommended_action: None,
            });
        }
    }

    if !is_working_hours(now) {
        return notices;
    }

    let today = now.date();
    state.forget_other_days(today);

    for checkpoint in Checkpoint::ALL {
        if !checkpoint.is_open(now) || !state.fired.insert((today, checkpoint)) {
            continue;
        }
        notices.extend(
            snapshot
                .iter()
                .filter(|p| p.daily_rate < checkpoint.threshold())
                .map(|p| checkpoint.notice(p)),
        );
    }

    notices
}
