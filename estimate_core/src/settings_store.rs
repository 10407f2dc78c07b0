//! # Settings Store
//!
//! Where stored pricing configuration meets the pure calculations:
//! - **Sources**: [`SettingsSource`] yields the settings for a run
//! - **Atomic saves**: Write to `.tmp`, fsync, rename over the target
//! - **File locking**: Exclusive advisory lock on a `.lock` sidecar while saving
//! - **Version validation**: Refuse settings files from an incompatible schema
//!
//! Loading never writes. A missing settings file yields the defaults and the
//! file is only created by an explicit [`FileSettingsStore::save_settings`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::settings::CalculationSettings;
//! use estimate_core::settings_store::{FileSettingsStore, SettingsSource};
//!
//! let store = FileSettingsStore::new("estimate-settings.json");
//! let settings = CalculationSettings::from_form(30.0, 80.0, true)?;
//! store.save_settings(&settings)?;
//!
//! assert_eq!(store.load_settings()?, settings);
//! # Ok::<(), estimate_core::errors::EstimateError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculations::{calculate_estimate, validate_estimate_input, EstimateInput, EstimateOutput, LineItemInput};
use crate::errors::{EstimateError, EstimateResult};
use crate::materials::ProjectCategory;
use crate::settings::CalculationSettings;

/// Current settings file schema version
pub const SETTINGS_SCHEMA_VERSION: &str = "0.1.0";

/// Anything that can supply the settings for a pricing run.
pub trait SettingsSource {
    fn load_settings(&self) -> EstimateResult<CalculationSettings>;
}

/// A fixed settings value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticSettings(pub CalculationSettings);

impl SettingsSource for StaticSettings {
    fn load_settings(&self) -> EstimateResult<CalculationSettings> {
        Ok(self.0)
    }
}

/// On-disk layout of a settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsFile {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub settings: CalculationSettings,
}

/// Settings persisted as a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSettingsStore { path: path.into() }
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save settings with atomic write semantics.
    ///
    /// The save process:
    /// 1. Validate the settings
    /// 2. Lock the `.lock` sidecar (fails fast if another writer holds it)
    /// 3. Write to a temporary file (`.tmp`) and fsync
    /// 4. Rename the temporary file over the settings file
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Settings saved
    /// * `Err(EstimateError::InvalidInput)` - Settings out of range
    /// * `Err(EstimateError::FileLocked)` - Another writer holds the lock
    /// * `Err(EstimateError::FileError)` - I/O error
    pub fn save_settings(&self, settings: &CalculationSettings) -> EstimateResult<()> {
        settings.validate()?;

        let _lock = SettingsLock::acquire(&self.path)?;

        let file = SettingsFile {
            version: SETTINGS_SCHEMA_VERSION.to_string(),
            saved_at: Utc::now(),
            settings: *settings,
        };
        let json = serde_json::to_string_pretty(&file).map_err(EstimateError::serialization)?;

        let tmp_path = sidecar_path(&self.path, "tmp");
        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            EstimateError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
        })?;

        tmp_file.write_all(json.as_bytes()).map_err(|e| {
            EstimateError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;

        tmp_file.sync_all().map_err(|e| {
            EstimateError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            EstimateError::file_error("rename to final", self.path.display().to_string(), e.to_string())
        })?;

        info!(
            path = %self.path.display(),
            markup = settings.default_markup,
            labor_rate = settings.labor_rate,
            "saved calculation settings"
        );
        Ok(())
    }
}

impl SettingsSource for FileSettingsStore {
    fn load_settings(&self) -> EstimateResult<CalculationSettings> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(CalculationSettings::default());
            }
            Err(e) => {
                return Err(EstimateError::file_error(
                    "open",
                    self.path.display().to_string(),
                    e.to_string(),
                ))
            }
        };

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            EstimateError::file_error("read", self.path.display().to_string(), e.to_string())
        })?;

        let value: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| EstimateError::serialization(format!("Invalid JSON in {}: {}", self.path.display(), e)))?;
        for key in ["version", "settings"] {
            if value.get(key).is_none() {
                return Err(EstimateError::missing_field(key));
            }
        }
        let stored: SettingsFile = serde_json::from_value(value)
            .map_err(|e| EstimateError::serialization(format!("Invalid settings in {}: {}", self.path.display(), e)))?;

        validate_version(&stored.version)?;
        stored.settings.validate()?;

        debug!(path = %self.path.display(), version = %stored.version, "loaded calculation settings");
        Ok(stored.settings)
    }
}

/// Price a line-item estimate with settings from `source`.
///
/// Loads the settings, validates the input, then runs the pure calculation.
///
/// # Example
///
/// ```rust
/// use estimate_core::calculations::LineItemInput;
/// use estimate_core::materials::ProjectCategory;
/// use estimate_core::settings::DEFAULT_SETTINGS;
/// use estimate_core::settings_store::{price_estimate, StaticSettings};
/// use estimate_core::units::Unit;
///
/// let items = vec![LineItemInput::new("Interior paint", 400.0, Unit::SquareFeet)];
/// let output = price_estimate(&StaticSettings(DEFAULT_SETTINGS), ProjectCategory::Paint, items)?;
/// assert_eq!(output.line_items.len(), 1);
/// # Ok::<(), estimate_core::errors::EstimateError>(())
/// ```
pub fn price_estimate(
    source: &dyn SettingsSource,
    project_type: ProjectCategory,
    line_items: Vec<LineItemInput>,
) -> EstimateResult<EstimateOutput> {
    let settings = source.load_settings()?;
    let input = EstimateInput {
        project_type,
        line_items,
        settings,
    };
    validate_estimate_input(&input).into_result()?;
    Ok(calculate_estimate(&input))
}

/// Exclusive lock on a settings file's `.lock` sidecar.
///
/// Released when the handle closes. The sidecar itself is never removed, so
/// every writer locks the same inode.
struct SettingsLock {
    _lock_file: File,
}

impl SettingsLock {
    fn acquire(path: &Path) -> EstimateResult<Self> {
        let lock_path = sidecar_path(path, "lock");

        // Opened without truncation so a holder's note survives a failed attempt
        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| EstimateError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        if lock_file.try_lock_exclusive().is_err() {
            let mut holder = String::new();
            let _ = lock_file.read_to_string(&mut holder);
            let holder = match holder.trim() {
                "" => "another process".to_string(),
                note => note.to_string(),
            };
            warn!(path = %path.display(), holder = %holder, "settings file is locked");
            return Err(EstimateError::file_locked(path.display().to_string(), holder));
        }

        let write_note = |file: &mut File| -> std::io::Result<()> {
            file.set_len(0)?;
            file.write_all(format!("pid {}", std::process::id()).as_bytes())?;
            file.sync_all()
        };
        write_note(&mut lock_file)
            .map_err(|e| EstimateError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        Ok(SettingsLock { _lock_file: lock_file })
    }
}

/// `settings.json` -> `settings.json.<suffix>`
fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> EstimateResult<()> {
    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SETTINGS_SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let (file_parts, current_parts) = match (parse(file_version), parse(SETTINGS_SCHEMA_VERSION)) {
        (Some(f), Some(c)) if !f.is_empty() && !c.is_empty() => (f, c),
        _ => return Err(mismatch()),
    };

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // Within 0.x a newer minor may change the layout
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
