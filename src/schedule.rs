//! This module assembles the default two-track reading schedule (one
//! track for each testament) and reconciles it with previously recorded
//! progress.
//!
//! Every function here is pure: the same inputs always produce the same
//! rows, so callers are free to skip a recompute when their inputs have
//! not changed (see `Planner`).

use std::cmp;
use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::allocate::{self, Unit};
use super::errors::*;

/// Smallest daily rate accepted by `assemble`.
pub const MIN_RATE: u32 = 1;
/// Largest daily rate accepted by `assemble`.
pub const MAX_RATE: u32 = 2000;

/// Characters escaped in a URI query component; everything but ASCII
/// alphanumerics and `-_.!~*'()`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Completion state of each day, keyed by day number.
pub type ProgressMap = BTreeMap<u32, bool>;

/// The Bible translation used when linking to a day's passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Version {
    Nasb,
    Lsb,
    Esv,
}

impl Version {
    /// Returns the version for a tag such as `"esv"`. Tags must match
    /// exactly; anything else falls back to the default version.
    pub fn from_tag(tag: &str) -> Version {
        match tag {
            "nasb" => Version::Nasb,
            "lsb" => Version::Lsb,
            "esv" => Version::Esv,
            other => {
                warn!(tag = other, "unknown version tag, using nasb");
                Version::Nasb
            }
        }
    }

    /// Returns the tag for this version, as stored and accepted on the
    /// command line.
    pub fn tag(&self) -> &'static str {
        match *self {
            Version::Nasb => "nasb",
            Version::Lsb => "lsb",
            Version::Esv => "esv",
        }
    }

    fn url_base(&self) -> &'static str {
        match *self {
            Version::Lsb => "https://read.lsbible.org/?q=",
            Version::Esv => "https://esv.literalword.com/?q=",
            Version::Nasb => "https://www.literalword.com/?q=",
        }
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::Nasb
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<String> for Version {
    fn from(tag: String) -> Version {
        Version::from_tag(&tag)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> String {
        version.tag().to_owned()
    }
}

/// Builds the link used to read `text` in the given version.
pub fn build_url(text: &str, version: Version) -> String {
    format!("{}{}", version.url_base(), utf8_percent_encode(text, QUERY_COMPONENT))
}

/// One day of a schedule: what to read and where to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub day: u32,
    pub passages: String,
    pub url: String,
}

impl ScheduleRow {
    /// Returns a row for `day`, deriving the URL from the passages.
    pub fn new(day: u32, passages: String, version: Version) -> ScheduleRow {
        let url = build_url(&passages, version);
        ScheduleRow {
            day: day,
            passages: passages,
            url: url,
        }
    }
}

/// One list of units read side by side with another, at its own rate.
#[derive(Debug, Clone, Copy)]
pub struct Track<'a> {
    /// Name used in error messages, e.g. "Old Testament".
    pub label: &'a str,
    pub units: &'a [Unit<'a>],
    pub rate: u32,
}

impl<'a> Track<'a> {
    fn check_rate(&self) -> Result<()> {
        if self.rate < MIN_RATE || self.rate > MAX_RATE {
            return Err(ErrorKind::InvalidRate(self.label.to_owned(), self.rate.to_string(), MIN_RATE, MAX_RATE)
                .into());
        }
        Ok(())
    }

    fn days_needed(&self) -> usize {
        allocate::days_needed(allocate::total_length(self.units), self.rate)
    }
}

/// The result of `assemble`: the rows and the reconciled progress map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub schedule: Vec<ScheduleRow>,
    pub progress: ProgressMap,
}

/// Builds the combined schedule for two tracks.
///
/// The schedule lasts as long as the slower track needs; the faster track
/// starts over from its first unit once it is finished. The returned
/// progress map is `previous` with every new day filled in as not done.
pub fn assemble(a: &Track, b: &Track, version: Version, previous: &ProgressMap) -> Result<Assembled> {
    a.check_rate()?;
    b.check_rate()?;

    let days_a = a.days_needed();
    let days_b = b.days_needed();
    let total_days = cmp::max(days_a, days_b);
    debug!(days_a, days_b, total_days, %version, "assembling schedule");

    let chunks_a = allocate::allocate(a.units, a.rate, total_days, days_a < total_days);
    let chunks_b = allocate::allocate(b.units, b.rate, total_days, days_b < total_days);

    let schedule = (0..total_days)
        .map(|i| {
            let passages = [chunks_a.get(i), chunks_b.get(i)]
                .iter()
                .filter_map(|c| *c)
                .filter(|c| !c.is_empty())
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            ScheduleRow::new(i as u32 + 1, passages, version)
        })
        .collect();

    Ok(Assembled {
        schedule: schedule,
        progress: reconcile_progress(previous, total_days),
    })
}

/// Returns a copy of `previous` with an entry for every day from 1 to
/// `total_days`. Days already present keep their value; missing days are
/// not done. Days past `total_days` are left alone.
pub fn reconcile_progress(previous: &ProgressMap, total_days: usize) -> ProgressMap {
    let mut progress = previous.clone();
    for day in 1..total_days as u32 + 1 {
        progress.entry(day).or_insert(false);
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use books::{NEW_TESTAMENT, OLD_TESTAMENT};
    use errors::ErrorKind;

    fn canonical(ot: u32, nt: u32, previous: &ProgressMap) -> Result<Assembled> {
        assemble(&Track {
                     label: "Old Testament",
                     units: OLD_TESTAMENT,
                     rate: ot,
                 },
                 &Track {
                     label: "New Testament",
                     units: NEW_TESTAMENT,
                     rate: nt,
                 },
                 Version::Nasb,
                 previous)
    }

    #[test]
    fn url_templates() {
        assert_eq!(build_url("Gen 1-2, Matt 1", Version::Esv),
                   "https://esv.literalword.com/?q=Gen%201-2%2C%20Matt%201");
        assert_eq!(build_url("John 3", Version::Lsb), "https://read.lsbible.org/?q=John%203");
        assert_eq!(build_url("John 3:16", Version::Nasb),
                   "https://www.literalword.com/?q=John%203%3A16");
        assert_eq!(build_url("Ps 119; Ps 1", Version::from_tag("kjv")),
                   "https://www.literalword.com/?q=Ps%20119%3B%20Ps%201");
    }

    #[test]
    fn version_tags() {
        assert_eq!(Version::from_tag("esv"), Version::Esv);
        assert_eq!(Version::from_tag("lsb"), Version::Lsb);
        assert_eq!(Version::from_tag("LSB"), Version::Nasb);
        assert_eq!(Version::from_tag(" esv "), Version::Nasb);
        assert_eq!(build_url("x", Version::from_tag("LSB")), "https://www.literalword.com/?q=x");
        assert_eq!(Version::from_tag(""), Version::Nasb);
        let json = ::serde_json::to_string(&Version::Lsb).unwrap();
        assert_eq!(json, "\"lsb\"");
        let parsed: Version = ::serde_json::from_str("\"nkjv\"").unwrap();
        assert_eq!(parsed, Version::Nasb);
    }

    #[test]
    fn total_days_follows_slower_track() {
        let result = canonical(2, 1, &ProgressMap::new()).unwrap();
        assert_eq!(result.schedule.len(), 465);
        assert_eq!(result.schedule[0].passages, "Genesis 1-2, Matthew 1");
        assert_eq!(result.schedule[259].passages, "Psalms 41-42, Revelation 22");
        // New Testament starts over the day after Revelation
        assert_eq!(result.schedule[260].passages, "Psalms 43-44, Matthew 1");
        assert_eq!(result.schedule[464].passages, "Malachi 4, Hebrews 1");

        let result = canonical(1, 1, &ProgressMap::new()).unwrap();
        assert_eq!(result.schedule.len(), 929);
        assert_eq!(result.schedule[928].passages, "Malachi 4, 1 Corinthians 16");
    }

    #[test]
    fn days_are_dense_and_one_based() {
        let result = canonical(3, 1, &ProgressMap::new()).unwrap();
        assert_eq!(result.schedule.len(), 310);
        for (i, row) in result.schedule.iter().enumerate() {
            assert_eq!(row.day, i as u32 + 1);
            assert_eq!(row.url, build_url(&row.passages, Version::Nasb));
        }
    }

    #[test]
    fn old_testament_cycles_when_new_testament_is_slower() {
        let result = canonical(100, 1, &ProgressMap::new()).unwrap();
        assert_eq!(result.schedule.len(), 260);
        assert_eq!(result.schedule[9].passages,
                   "Nahum 1-3, Habakkuk 1-3, Zephaniah 1-3, Haggai 1-2, Zechariah 1-14, Malachi 1-4, \
                    Genesis 1-50, Exodus 1-21, Matthew 10");
        assert!(result.schedule.iter().all(|r| !r.passages.is_empty()));
    }

    #[test]
    fn assemble_is_idempotent() {
        let mut previous = ProgressMap::new();
        previous.insert(4, true);
        assert_eq!(canonical(4, 2, &previous).unwrap(), canonical(4, 2, &previous).unwrap());
    }

    #[test]
    fn progress_keeps_existing_entries() {
        let mut previous = ProgressMap::new();
        previous.insert(1, true);
        previous.insert(3, false);
        previous.insert(5000, true);

        let progress = canonical(50, 50, &previous).unwrap().progress;
        let total_days = 19;
        for day in 1..total_days + 1 {
            assert!(progress.contains_key(&day));
        }
        assert_eq!(progress[&1], true);
        assert_eq!(progress[&2], false);
        assert_eq!(progress[&3], false);
        assert_eq!(progress[&5000], true);
        assert_eq!(progress.len(), total_days as usize + 1);
    }

    #[test]
    fn rejects_rates_outside_bounds() {
        match canonical(0, 1, &ProgressMap::new()) {
            Err(Error(ErrorKind::InvalidRate(side, value, 1, 2000), _)) => {
                assert_eq!(side, "Old Testament");
                assert_eq!(value, "0");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        match canonical(1, 2001, &ProgressMap::new()) {
            Err(Error(ErrorKind::InvalidRate(side, _, _, _), _)) => assert_eq!(side, "New Testament"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(canonical(2000, 2000, &ProgressMap::new()).is_ok());
    }

    #[test]
    fn whole_bible_in_one_day() {
        let result = canonical(2000, 2000, &ProgressMap::new()).unwrap();
        assert_eq!(result.schedule.len(), 1);
        assert!(result.schedule[0].passages.starts_with("Genesis 1-50, Exodus 1-40"));
        assert!(result.schedule[0].passages.ends_with("Jude 1, Revelation 1-22"));
    }
}
