//! This module distributes an ordered list of `Unit`s (books, each with
//! a fixed number of chapters) over a number of days at a fixed daily
//! rate, producing one line of text per day.
//!
//! The allocator knows nothing about testaments or URLs; it is driven by
//! the schedule assembler in the `schedule` module.

use std::fmt;

/// A named run of sub-items, e.g. a book of the Bible and its number
/// of chapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    name: &'a str,
    length: u32,
}

impl<'a> Unit<'a> {
    /// Returns a `Unit` with the given name and number of sub-items.
    pub const fn new(name: &'a str, length: u32) -> Unit<'a> {
        Unit {
            name: name,
            length: length,
        }
    }

    /// Returns the name of the unit.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the number of sub-items in the unit.
    pub fn length(&self) -> u32 {
        self.length
    }
}

/// The portion of a single unit read on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chunk<'a> {
    name: &'a str,
    start: u32,
    end: u32,
}

impl<'a> fmt::Display for Chunk<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{} {}", self.name, self.start)
        } else {
            write!(f, "{} {}-{}", self.name, self.start, self.end)
        }
    }
}

/// Position of the next sub-item to read. `offset` is 1-based.
struct Cursor {
    unit: usize,
    offset: u32,
}

impl Cursor {
    fn start() -> Cursor {
        Cursor { unit: 0, offset: 1 }
    }
}

/// Returns the total number of sub-items across all units.
pub fn total_length(units: &[Unit]) -> u32 {
    units.iter().map(|u| u.length).sum()
}

/// Returns the number of days needed to read `total` sub-items at
/// `rate` sub-items a day, rounding up.
///
/// A rate of zero needs no days, since nothing would ever be read.
pub fn days_needed(total: u32, rate: u32) -> usize {
    if rate == 0 {
        return 0;
    }
    ((total + rate - 1) / rate) as usize
}

/// Produces exactly `total_days` strings, the `n`th describing what is
/// read from `units` on day `n + 1`.
///
/// Each day consumes `rate` sub-items, spanning into following units when
/// the current one runs out; the pieces of a day are joined with `", "`.
/// When the list is exhausted, `cycle` restarts it from the first unit;
/// otherwise the remaining days come out shorter or empty.
pub fn allocate(units: &[Unit], rate: u32, total_days: usize, cycle: bool) -> Vec<String> {
    // Nothing to read; cycling an empty list would never finish a day
    if total_length(units) == 0 {
        return vec![String::new(); total_days];
    }

    let mut cursor = Cursor::start();
    let mut days = Vec::with_capacity(total_days);

    for _ in 0..total_days {
        let mut remaining = rate;
        let mut chunks = Vec::new();

        while remaining > 0 {
            if cursor.unit >= units.len() {
                if cycle {
                    cursor = Cursor::start();
                } else {
                    break;
                }
            }

            let unit = &units[cursor.unit];
            if unit.length == 0 {
                cursor.unit += 1;
                continue;
            }

            let available = unit.length - cursor.offset + 1;
            if available <= remaining {
                chunks.push(Chunk {
                    name: unit.name,
                    start: cursor.offset,
                    end: unit.length,
                });
                cursor.unit += 1;
                cursor.offset = 1;
                remaining -= available;
            } else {
                chunks.push(Chunk {
                    name: unit.name,
                    start: cursor.offset,
                    end: cursor.offset + remaining - 1,
                });
                cursor.offset += remaining;
                remaining = 0;
            }
        }

        days.push(chunks.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", "));
    }

    days
}
