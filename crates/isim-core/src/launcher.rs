//! Resolves a device and brings it up in Simulator.app.

use tracing::debug;

use crate::device::DeviceRecord;
use crate::error::{IsimError, Result};
use crate::filter::{find_by_udid, resolve};
use crate::simctl::SimulatorBackend;
use crate::store::DefaultStore;

/// Launches simulators through a [`SimulatorBackend`].
pub struct Launcher<'a, B: SimulatorBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: SimulatorBackend + ?Sized> Launcher<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Resolves `query` against the live device list and launches the match.
    ///
    /// # Errors
    ///
    /// - [`IsimError::NotFound`] if nothing matches
    /// - [`IsimError::AmbiguousQuery`] if more than one device matches
    /// - any enumeration, boot or foreground failure from the backend
    pub fn launch(&self, query: &str) -> Result<DeviceRecord> {
        let devices = self.backend.list_devices()?;
        let device = resolve(&devices, query)?.clone();
        self.start(&device)?;
        Ok(device)
    }

    /// Launches the device with exactly this UDID.
    pub fn launch_udid(&self, udid: &str) -> Result<DeviceRecord> {
        let devices = self.backend.list_devices()?;
        let device = find_by_udid(&devices, udid)
            .cloned()
            .ok_or_else(|| IsimError::NotFound(udid.to_string()))?;
        self.start(&device)?;
        Ok(device)
    }

    /// Launches the stored default.
    ///
    /// Fails with [`IsimError::NoDefault`] when nothing is stored and
    /// [`IsimError::InvalidDefault`] when the stored UDID is not available.
    pub fn launch_default<S: DefaultStore + ?Sized>(&self, store: &S) -> Result<DeviceRecord> {
        let udid = store.get()?.ok_or(IsimError::NoDefault)?;
        self.launch_udid(&udid).map_err(|e| match e {
            IsimError::NotFound(udid) => IsimError::InvalidDefault(udid),
            other => other,
        })
    }

    fn start(&self, device: &DeviceRecord) -> Result<()> {
        if device.state.is_booted() {
            debug!(udid = %device.udid, "already booted, skipping boot");
        } else {
            self.backend.boot(&device.udid)?;
        }
        self.backend.foreground_app(&device.udid)
    }
}
