//! This module provides the `Planner`, which owns a `PlanState` and keeps
//! its schedule and progress consistent as settings change.
//!
//! The schedule functions themselves are pure; the planner is the caller
//! that decides when a recompute is needed. It remembers the inputs of
//! the last schedule it built and only rebuilds when they differ.

use std::cmp;

use super::allocate::{days_needed, total_length};
use super::books::{NEW_TESTAMENT, OLD_TESTAMENT};
use super::errors::*;
use super::reference;
use super::schedule::{self, ProgressMap, ScheduleRow, Track, Version};
use super::state::{PlanState, Settings, StoredDay};

/// Smallest chapters-per-day setting accepted from the user.
pub const MIN_CHAPTERS: u32 = 1;
/// Largest chapters-per-day setting accepted from the user.
pub const MAX_CHAPTERS: u32 = 100;

pub const OT_LABEL: &'static str = "Old Testament";
pub const NT_LABEL: &'static str = "New Testament";

/// What a schedule was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inputs {
    Default(Settings),
    Custom(Version),
}

#[derive(Debug)]
struct Memo {
    inputs: Inputs,
    rows: Vec<ScheduleRow>,
}

/// A quick overview of progress through the active plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total_days: usize,
    pub completed: usize,
    /// The first day not yet done, or `None` if every day is done
    pub next_day: Option<u32>,
}

/// Checks a chapters-per-day value entered by the user.
pub fn check_chapters(side: &str, value: u32) -> Result<u32> {
    if value < MIN_CHAPTERS || value > MAX_CHAPTERS {
        Err(ErrorKind::InvalidRate(side.to_owned(), value.to_string(), MIN_CHAPTERS, MAX_CHAPTERS).into())
    } else {
        Ok(value)
    }
}

/// Parses and checks a chapters-per-day value entered by the user.
pub fn parse_chapters(side: &str, value: &str) -> Result<u32> {
    match value.trim().parse() {
        Ok(n) => check_chapters(side, n),
        Err(_) => Err(ErrorKind::InvalidRate(side.to_owned(), value.to_owned(), MIN_CHAPTERS, MAX_CHAPTERS).into()),
    }
}

/// Owns the plan state and produces the schedule of the active plan.
#[derive(Debug)]
pub struct Planner {
    state: PlanState,
    memo: Option<Memo>,
}

impl Planner {
    pub fn new(state: PlanState) -> Planner {
        Planner {
            state: state,
            memo: None,
        }
    }

    /// Returns the current state, e.g. for saving.
    pub fn state(&self) -> &PlanState {
        &self.state
    }

    /// Returns whether the custom plan is active.
    pub fn is_custom(&self) -> bool {
        self.state.is_custom_schedule
    }

    /// Returns the progress of the active plan.
    pub fn progress(&self) -> &ProgressMap {
        self.state.active_progress()
    }

    /// Returns how many days the default plan lasts with the current
    /// settings, whichever plan is active.
    pub fn default_days(&self) -> usize {
        let settings = self.state.settings;
        cmp::max(days_needed(total_length(OLD_TESTAMENT), settings.ot_chapters),
                 days_needed(total_length(NEW_TESTAMENT), settings.nt_chapters))
    }

    fn inputs(&self) -> Inputs {
        if self.state.is_custom_schedule {
            Inputs::Custom(self.state.settings.version)
        } else {
            Inputs::Default(self.state.settings)
        }
    }

    /// Returns the schedule of the active plan, rebuilding it if the
    /// settings changed since it was last built. The active progress map
    /// gains an entry for every day of a rebuilt schedule.
    pub fn schedule(&mut self) -> Result<&[ScheduleRow]> {
        let inputs = self.inputs();
        let stale = self.memo.as_ref().map_or(true, |m| m.inputs != inputs);

        if stale {
            let rows = match inputs {
                Inputs::Default(settings) => {
                    let assembled = schedule::assemble(&Track {
                                                           label: OT_LABEL,
                                                           units: OLD_TESTAMENT,
                                                           rate: settings.ot_chapters,
                                                       },
                                                       &Track {
                                                           label: NT_LABEL,
                                                           units: NEW_TESTAMENT,
                                                           rate: settings.nt_chapters,
                                                       },
                                                       settings.version,
                                                       &self.state.progress_map)?;
                    self.state.progress_map = assembled.progress;
                    assembled.schedule
                }
                Inputs::Custom(version) => {
                    let rows = reference::rows_from_stored(&self.state.custom_schedule, version);
                    self.state.custom_progress_map = schedule::reconcile_progress(&self.state.custom_progress_map,
                                                                                  rows.len());
                    rows
                }
            };
            debug!(days = rows.len(), custom = self.state.is_custom_schedule, "rebuilt schedule");
            self.memo = Some(Memo {
                inputs: inputs,
                rows: rows,
            });
        } else {
            trace!("schedule inputs unchanged, reusing rows");
        }

        Ok(self.memo.as_ref().map(|m| m.rows.as_slice()).unwrap_or(&[]))
    }

    /// Replaces the settings of the default plan.
    ///
    /// Both chapter counts must be between `MIN_CHAPTERS` and
    /// `MAX_CHAPTERS`. If they change, progress through the default plan
    /// no longer lines up with its days, so it is cleared unless
    /// `keep_progress` is set.
    pub fn update_settings(&mut self, settings: Settings, keep_progress: bool) -> Result<()> {
        check_chapters(OT_LABEL, settings.ot_chapters)?;
        check_chapters(NT_LABEL, settings.nt_chapters)?;

        let old = self.state.settings;
        let rates_changed = old.ot_chapters != settings.ot_chapters || old.nt_chapters != settings.nt_chapters;
        if rates_changed && !keep_progress {
            debug!("chapter counts changed, clearing default progress");
            self.state.progress_map.clear();
        }
        self.state.settings = settings;
        Ok(())
    }

    /// Loads a custom plan from text, one passage per line, and makes it
    /// the active plan. Returns the number of days in the new plan.
    pub fn load_custom(&mut self, text: &str, keep_progress: bool) -> Result<usize> {
        let rows = reference::build_custom(text, self.state.settings.version)?;

        self.state.custom_schedule = rows.into_iter()
            .map(|r| {
                StoredDay {
                    day: r.day,
                    passages: r.passages,
                }
            })
            .collect();
        if !keep_progress {
            self.state.custom_progress_map.clear();
        }
        self.state.is_custom_schedule = true;
        self.memo = None;

        Ok(self.schedule()?.len())
    }

    /// Makes the previously loaded custom plan active again.
    pub fn use_custom(&mut self) -> Result<()> {
        if self.state.custom_schedule.is_empty() {
            bail!("no custom plan has been loaded");
        }
        self.state.is_custom_schedule = true;
        Ok(())
    }

    /// Makes the default plan active. The custom plan is kept.
    pub fn use_default(&mut self) {
        self.state.is_custom_schedule = false;
    }

    /// Marks `day` of the active plan as done or not done.
    pub fn set_done(&mut self, day: u32, done: bool) -> Result<()> {
        let total = self.schedule()?.len();
        if day < 1 || day as usize > total {
            return Err(ErrorKind::DayOutOfRange(day, total).into());
        }
        self.state.active_progress_mut().insert(day, done);
        Ok(())
    }

    /// Marks every day of the active plan as not done, and forgets
    /// progress recorded for days outside it.
    pub fn clear_progress(&mut self) -> Result<()> {
        let total = self.schedule()?.len() as u32;
        *self.state.active_progress_mut() = (1..total + 1).map(|d| (d, false)).collect();
        Ok(())
    }

    /// Returns whether `day` of the active plan is done.
    pub fn is_done(&self, day: u32) -> bool {
        self.progress().get(&day).cloned().unwrap_or(false)
    }

    pub fn summary(&mut self) -> Result<Summary> {
        let days: Vec<u32> = self.schedule()?.iter().map(|r| r.day).collect();
        let completed = days.iter().filter(|&&d| self.is_done(d)).count();
        let next_day = days.iter().cloned().find(|&d| !self.is_done(d));

        Ok(Summary {
            total_days: days.len(),
            completed: completed,
            next_day: next_day,
        })
    }
}
