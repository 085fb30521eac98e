//! Persistent default-simulator selection.
//!
//! The default is a single UDID stored in `~/.config/isim/default`. Callers
//! work against the [`DefaultStore`] trait so that tests can use
//! [`MemoryDefaultStore`] instead of touching the filesystem.
//!
//! # Example
//!
//! ```no_run
//! use isim_core::store::{DefaultStore, FileDefaultStore};
//!
//! let store = FileDefaultStore::at_default_location().unwrap();
//! match store.get().unwrap() {
//!     Some(udid) => println!("default: {}", udid),
//!     None => println!("no default set"),
//! }
//! ```

use std::cell::RefCell;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::device::DeviceRecord;
use crate::error::{IsimError, Result};
use crate::filter::find_by_udid;
use crate::simctl::SimulatorBackend;

const DEFAULT_FILENAME: &str = "default";

/// Storage for the default simulator UDID.
pub trait DefaultStore {
    /// Returns the stored UDID, or `None` if unset.
    fn get(&self) -> Result<Option<String>>;

    /// Stores `udid`, replacing any previous value.
    fn set(&self, udid: &str) -> Result<()>;
}

/// Returns `~/.config/isim`.
pub fn default_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        IsimError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine home directory",
        ))
    })?;
    Ok(home.join(".config").join("isim"))
}

/// [`DefaultStore`] backed by a plain text file.
#[derive(Debug, Clone)]
pub struct FileDefaultStore {
    dir: PathBuf,
}

impl FileDefaultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at [`default_config_dir`].
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(default_config_dir()?))
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(DEFAULT_FILENAME)
    }
}

impl DefaultStore for FileDefaultStore {
    fn get(&self) -> Result<Option<String>> {
        let path = self.path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let udid = contents.trim();
                debug!(path = %path.display(), "read default");
                Ok((!udid.is_empty()).then(|| udid.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, udid: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path();
        std::fs::write(&path, format!("{}\n", udid))?;
        info!(path = %path.display(), %udid, "stored default");
        Ok(())
    }
}

/// In-memory [`DefaultStore`], useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryDefaultStore {
    value: RefCell<Option<String>>,
}

impl MemoryDefaultStore {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            value: RefCell::new(initial.map(str::to_string)),
        }
    }
}

impl DefaultStore for MemoryDefaultStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn set(&self, udid: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(udid.to_string());
        Ok(())
    }
}

/// Validates `udid` against the current device list and stores it.
///
/// The device's canonical UDID is stored, so a lowercased argument is
/// normalised. Unknown UDIDs fail with [`IsimError::InvalidDefault`] and leave
/// the store untouched, unless `force` is set, in which case the argument is
/// stored verbatim and `Ok(None)` is returned.
pub fn select_default<B, S>(
    backend: &B,
    store: &S,
    udid: &str,
    force: bool,
) -> Result<Option<DeviceRecord>>
where
    B: SimulatorBackend + ?Sized,
    S: DefaultStore + ?Sized,
{
    let udid = udid.trim();
    if udid.is_empty() {
        return Err(IsimError::Usage("UDID must not be empty".to_string()));
    }

    let devices = backend.list_devices()?;
    match find_by_udid(&devices, udid) {
        Some(device) => {
            store.set(&device.udid)?;
            Ok(Some(device.clone()))
        }
        None if force => {
            store.set(udid)?;
            Ok(None)
        }
        None => Err(IsimError::InvalidDefault(udid.to_string())),
    }
}
