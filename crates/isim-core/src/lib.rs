//! # isim-core
//!
//! Core library for picking and launching iOS Simulator devices on macOS.
//!
//! ## Modules
//!
//! - [`simctl`] - Wrapper around Apple's `xcrun simctl` CLI, behind the
//!   [`simctl::SimulatorBackend`] trait
//! - [`device`] - Device records and runtime identifier parsing
//! - [`filter`] - Case-insensitive query matching over devices
//! - [`store`] - Persistent default simulator selection
//! - [`launcher`] - Boot and foreground a resolved device
//! - [`error`] - The shared [`error::IsimError`] type
//!
//! ## External Dependencies
//!
//! - **Xcode** (for `xcrun simctl`) - Provides simulator enumeration and boot
//! - **open(1)** - Brings Simulator.app to the foreground
//!
//! ## Example
//!
//! ```no_run
//! use isim_core::launcher::Launcher;
//! use isim_core::simctl::Simctl;
//!
//! let device = Launcher::new(&Simctl).launch("iPhone 15 Pro").expect("launch failed");
//! println!("Launched {} ({})", device.name, device.os_version);
//! ```

pub mod device;
pub mod error;
pub mod filter;
pub mod launcher;
pub mod simctl;
pub mod store;

#[cfg(test)]
mod fixtures;

pub use device::{DeviceRecord, DeviceState};
pub use error::{IsimError, Result};
