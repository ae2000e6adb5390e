// For `error_chain!`
#![recursion_limit = "1024"]

#[macro_use]
extern crate serde_derive;

extern crate app_dirs;
extern crate percent_encoding;
extern crate rust_xlsxwriter;
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate tracing;
extern crate tracing_subscriber;

#[cfg(test)]
extern crate tempfile;
#[cfg(test)]
extern crate zip;

#[macro_use]
extern crate error_chain;

pub mod errors {
    error_chain!{
        errors {
            /// A daily rate was not a number or fell outside the allowed
            /// range (includes which side, the value, and the bounds).
            InvalidRate(side: String, value: String, min: u32, max: u32) {
                description("invalid rate")
                display("invalid {} rate '{}': must be a whole number from {} to {}",
                        side, value, min, max)
            }
            /// A custom plan had too few or too many non-blank lines.
            LineCountOutOfRange(count: usize) {
                description("line count out of range")
                display("custom plan has {} passages; it must have between 1 and {}",
                        count, ::reference::MAX_CUSTOM_LINES)
            }
            /// A progress edit named a day that is not in the schedule.
            DayOutOfRange(day: u32, total: usize) {
                description("day out of range")
                display("day {} is not in the schedule (days 1 to {})", day, total)
            }
            /// The user's data directory could not be found or deduced.
            CannotLocateDataDir {
                description("cannot locate data directory")
            }
            /// The logging subscriber could not be installed.
            Logging(t: String) {
                description("logging error")
                display("could not initialize logging: {}", t)
            }
            /// An IO error (usually caused by `std::io::Error`).
            Io(t: String) {
                description("io error")
                display("{}", t)
            }
            /// A JSON error (usually caused by `serde_json::Error`).
            Json(t: String) {
                description("json error")
                display("{}", t)
            }
        }
    }
}

pub use errors::*;

pub mod allocate;
pub mod books;
pub mod export;
pub mod files;
pub mod logging;
pub mod observe;
pub mod planner;
pub mod reference;
pub mod schedule;
pub mod state;

pub use allocate::{allocate, Unit};
pub use files::LocalStore;
pub use planner::{Planner, Summary};
pub use schedule::{assemble, build_url, Assembled, ProgressMap, ScheduleRow, Track, Version};
pub use state::{PlanState, Settings, StoredDay};
