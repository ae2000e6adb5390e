//! This module provides a small key-value store kept in a directory,
//! used to save plan settings and progress between runs. Each key is
//! stored as a JSON document in its own file, `{key}.json`.
//!
//! The default directory is determined by the `app_dirs` crate, which
//! will return a path based on the operating system (Windows, OS X, or
//! Linux). It is only created once something is written to it, so
//! reading from a fresh store simply finds nothing.

use std::fs::{self, File};
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use app_dirs::{self, AppDataType, AppDirsError, AppInfo};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json;

use super::errors::*;
use super::observe::StoreObserver;
use super::schedule::ProgressMap;
use super::state::{PlanState, Settings, StoredDay};

/// The information for app_dirs
const APP_INFO: AppInfo = AppInfo {
    name: "reading-plan",
    author: "Ian Johnson",
};

/// The keys under which plan state is stored.
pub mod keys {
    pub const VERSION: &'static str = "version";
    pub const OT_CHAPTERS: &'static str = "otChapters";
    pub const NT_CHAPTERS: &'static str = "ntChapters";
    pub const IS_CUSTOM_SCHEDULE: &'static str = "isCustomSchedule";
    pub const PROGRESS_MAP: &'static str = "progressMap";
    pub const CUSTOM_PROGRESS_MAP: &'static str = "customProgressMap";
    pub const CUSTOM_SCHEDULE: &'static str = "customSchedule";

    /// Every key, in the order they are written by `save_state`.
    pub const ALL: [&'static str; 7] = [VERSION,
                                        OT_CHAPTERS,
                                        NT_CHAPTERS,
                                        IS_CUSTOM_SCHEDULE,
                                        PROGRESS_MAP,
                                        CUSTOM_PROGRESS_MAP,
                                        CUSTOM_SCHEDULE];
}

/// Returns the location of the default store directory if possible.
pub fn default_dir() -> Result<PathBuf> {
    match app_dirs::get_app_dir(AppDataType::UserData, &APP_INFO, "store") {
        Ok(p) => Ok(p),
        Err(AppDirsError::NotSupported) => Err(ErrorKind::CannotLocateDataDir.into()),
        Err(AppDirsError::Io(e)) => Err(e).chain_err(|| ErrorKind::Io("could not find data directory".into())),
        Err(AppDirsError::InvalidAppInfo) => Err(ErrorKind::CannotLocateDataDir.into()),
    }
}

/// A directory of JSON documents, one per key.
pub struct LocalStore {
    dir: PathBuf,
    observer: Option<Box<dyn StoreObserver>>,
}

impl LocalStore {
    /// Returns a store kept in `dir`. Nothing is touched on disk until
    /// the first write.
    pub fn open<P: Into<PathBuf>>(dir: P) -> LocalStore {
        LocalStore {
            dir: dir.into(),
            observer: None,
        }
    }

    /// Returns a store kept in the default directory (see `default_dir`).
    pub fn open_default() -> Result<LocalStore> {
        Ok(LocalStore::open(default_dir()?))
    }

    /// Attaches an observer that is told about every read and write.
    pub fn with_observer<O: StoreObserver + 'static>(mut self, observer: O) -> LocalStore {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns the directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        let mut filename = self.dir.join(key);
        filename.set_extension("json");
        filename
    }

    /// Reads the value stored under `key`, or `None` if nothing is.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        if let Some(ref o) = self.observer {
            o.on_read(key);
        }
        let filename = self.path(key);
        let f = match File::open(&filename) {
            Ok(f) => f,
            Err(ref e) if e.kind() == IoErrorKind::NotFound => {
                debug!(key, "store key not set");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).chain_err(|| ErrorKind::Io(format!("could not open '{}'", filename.display())));
            }
        };
        debug!(key, "read store key");

        serde_json::from_reader(f)
            .map(Some)
            .chain_err(|| ErrorKind::Json(format!("json error in stored key '{}'", key)))
    }

    /// Writes `value` under `key`, replacing whatever was there.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        if let Some(ref o) = self.observer {
            o.on_write(key);
        }
        fs::create_dir_all(&self.dir).chain_err(|| ErrorKind::Io("could not create data directory".into()))?;
        let mut f = File::create(self.path(key))
            .chain_err(|| ErrorKind::Io(format!("could not write stored key '{}'", key)))?;
        debug!(key, "write store key");

        serde_json::to_writer(&mut f, value)
            .chain_err(|| ErrorKind::Json(format!("could not serialize stored key '{}'", key)))
    }

    /// Removes the value stored under `key`. Removing a key that is not
    /// set is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).chain_err(|| ErrorKind::Io(format!("could not remove stored key '{}'", key))),
        }
    }

    /// Reads the whole plan state. Keys that are not set take their
    /// default values.
    pub fn load_state(&self) -> Result<PlanState> {
        let defaults = Settings::default();

        Ok(PlanState {
            settings: Settings {
                version: self.get(keys::VERSION)?.unwrap_or(defaults.version),
                ot_chapters: self.get(keys::OT_CHAPTERS)?.unwrap_or(defaults.ot_chapters),
                nt_chapters: self.get(keys::NT_CHAPTERS)?.unwrap_or(defaults.nt_chapters),
            },
            is_custom_schedule: self.get(keys::IS_CUSTOM_SCHEDULE)?.unwrap_or(false),
            progress_map: self.get::<ProgressMap>(keys::PROGRESS_MAP)?.unwrap_or_default(),
            custom_progress_map: self.get::<ProgressMap>(keys::CUSTOM_PROGRESS_MAP)?.unwrap_or_default(),
            custom_schedule: self.get::<Vec<StoredDay>>(keys::CUSTOM_SCHEDULE)?.unwrap_or_default(),
        })
    }

    /// Writes the whole plan state.
    pub fn save_state(&self, state: &PlanState) -> Result<()> {
        self.set(keys::VERSION, &state.settings.version)?;
        self.set(keys::OT_CHAPTERS, &state.settings.ot_chapters)?;
        self.set(keys::NT_CHAPTERS, &state.settings.nt_chapters)?;
        self.set(keys::IS_CUSTOM_SCHEDULE, &state.is_custom_schedule)?;
        self.set(keys::PROGRESS_MAP, &state.progress_map)?;
        self.set(keys::CUSTOM_PROGRESS_MAP, &state.custom_progress_map)?;
        self.set(keys::CUSTOM_SCHEDULE, &state.custom_schedule)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile;

    use super::*;
    use observe::Tally;
    use schedule::Version;

    #[test]
    fn fresh_store_loads_defaults_without_creating_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("store");
        let store = LocalStore::open(&dir);

        assert_eq!(store.load_state().unwrap(), PlanState::default());
        assert!(!dir.exists());
    }

    #[test]
    fn state_survives_a_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());

        let mut state = PlanState::default();
        state.settings.version = Version::Esv;
        state.settings.ot_chapters = 2;
        state.is_custom_schedule = true;
        state.progress_map.insert(1, true);
        state.custom_progress_map.insert(2, false);
        state.custom_schedule.push(StoredDay {
            day: 1,
            passages: "Gen 1".into(),
        });
        store.save_state(&state).unwrap();

        assert_eq!(store.load_state().unwrap(), state);
    }

    #[test]
    fn values_are_plain_json_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());
        let mut progress = ProgressMap::new();
        progress.insert(3, true);
        store.set(keys::PROGRESS_MAP, &progress).unwrap();
        store.set(keys::VERSION, &Version::Lsb).unwrap();

        let progress_json = fs::read_to_string(tmp.path().join("progressMap.json")).unwrap();
        assert_eq!(progress_json, r#"{"3":true}"#);
        let version_json = fs::read_to_string(tmp.path().join("version.json")).unwrap();
        assert_eq!(version_json, r#""lsb""#);
    }

    #[test]
    fn malformed_value_names_the_key() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("otChapters.json"), "three").unwrap();
        let store = LocalStore::open(tmp.path());

        let err = store.load_state().unwrap_err();
        assert!(err.to_string().contains("otChapters"));
    }

    #[test]
    fn remove_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::open(tmp.path());
        store.set(keys::IS_CUSTOM_SCHEDULE, &true).unwrap();
        store.remove(keys::IS_CUSTOM_SCHEDULE).unwrap();
        store.remove(keys::IS_CUSTOM_SCHEDULE).unwrap();
        assert_eq!(store.get::<bool>(keys::IS_CUSTOM_SCHEDULE).unwrap(), None);
    }

    #[test]
    fn observer_sees_every_key() {
        let tmp = tempfile::tempdir().unwrap();
        let tally = Tally::new();
        let store = LocalStore::open(tmp.path()).with_observer(tally.clone());

        store.save_state(&PlanState::default()).unwrap();
        store.load_state().unwrap();
        assert_eq!(tally.writes(), keys::ALL.len());
        assert_eq!(tally.reads(), keys::ALL.len());
    }
}
