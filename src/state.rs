//! The persisted state of a reading plan: settings for the default plan,
//! the custom plan (if any), and the progress recorded against each.

use super::schedule::{ProgressMap, Version};

/// Default chapters of the Old Testament read each day.
pub const DEFAULT_OT_CHAPTERS: u32 = 3;
/// Default chapters of the New Testament read each day.
pub const DEFAULT_NT_CHAPTERS: u32 = 1;

/// Settings of the default (chapters per day) plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Settings {
    pub version: Version,
    pub ot_chapters: u32,
    pub nt_chapters: u32,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            version: Version::default(),
            ot_chapters: DEFAULT_OT_CHAPTERS,
            nt_chapters: DEFAULT_NT_CHAPTERS,
        }
    }
}

/// One day of a custom plan as stored. The URL is left out since it
/// depends on the current version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDay {
    pub day: u32,
    pub passages: String,
}

/// Everything that is saved between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanState {
    pub settings: Settings,
    /// Whether the custom plan is the active one
    pub is_custom_schedule: bool,
    /// Progress through the default plan
    pub progress_map: ProgressMap,
    /// Progress through the custom plan
    pub custom_progress_map: ProgressMap,
    pub custom_schedule: Vec<StoredDay>,
}

impl PlanState {
    /// Returns the progress map of whichever plan is active.
    pub fn active_progress(&self) -> &ProgressMap {
        if self.is_custom_schedule {
            &self.custom_progress_map
        } else {
            &self.progress_map
        }
    }

    /// Returns the progress map of whichever plan is active, mutably.
    pub fn active_progress_mut(&mut self) -> &mut ProgressMap {
        if self.is_custom_schedule {
            &mut self.custom_progress_map
        } else {
            &mut self.progress_map
        }
    }
}
