//! Subcommand implementations.
//!
//! [`App`] holds the backend and default store as injected collaborators so
//! every subcommand can be exercised without `xcrun` or the real config file.

use std::io::Write;

use isim_core::filter::{filter_devices, find_by_udid};
use isim_core::launcher::Launcher;
use isim_core::simctl::SimulatorBackend;
use isim_core::store::{select_default, DefaultStore};
use isim_core::{DeviceRecord, IsimError, Result};
use tracing::warn;

use crate::format::{describe, render_legend, render_table, Theme, Themes};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct App<'a, B: SimulatorBackend + ?Sized, S: DefaultStore + ?Sized> {
    backend: &'a B,
    store: &'a S,
    format: OutputFormat,
    quiet: bool,
    themes: Themes,
}

fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    writeln!(out, "{}", text)?;
    Ok(())
}

fn device_json(device: &DeviceRecord) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(device).map_err(std::io::Error::from)?)
}

impl<'a, B: SimulatorBackend + ?Sized, S: DefaultStore + ?Sized> App<'a, B, S> {
    pub fn new(
        backend: &'a B,
        store: &'a S,
        format: OutputFormat,
        quiet: bool,
        themes: Themes,
    ) -> Self {
        Self {
            backend,
            store,
            format,
            quiet,
            themes,
        }
    }

    fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    /// `isim list [filter] [--booted]`
    pub fn list(
        &self,
        filter: Option<&str>,
        booted_only: bool,
        out: &mut dyn Write,
    ) -> Result<bool> {
        let devices = self.backend.list_devices()?;
        let mut shown = filter_devices(&devices, filter.unwrap_or(""));
        if booted_only {
            shown.retain(|d| d.state.is_booted());
        }

        if self.format == OutputFormat::Json {
            let records = shown
                .iter()
                .map(|d| device_json(d))
                .collect::<Result<Vec<_>>>()?;
            write_json(out, &serde_json::Value::Array(records))?;
            return Ok(!shown.is_empty());
        }

        if shown.is_empty() {
            eprintln!("{}", no_matches_message(filter, booted_only));
            return Ok(false);
        }

        let theme = &self.themes.stdout;
        let default_udid = self.store.get()?;
        write!(out, "{}", render_table(&shown, default_udid.as_deref(), theme))?;
        writeln!(out)?;
        write!(out, "{}", render_legend(theme))?;
        Ok(true)
    }

    /// `isim launch <query>`
    pub fn launch(&self, query: &str, out: &mut dyn Write) -> Result<bool> {
        let device = Launcher::new(self.backend).launch(query)?;
        self.report_launch(&device, out)
    }

    /// `isim` with no subcommand.
    pub fn launch_default(&self, out: &mut dyn Write) -> Result<bool> {
        let device = Launcher::new(self.backend).launch_default(self.store)?;
        self.report_launch(&device, out)
    }

    fn report_launch(&self, device: &DeviceRecord, out: &mut dyn Write) -> Result<bool> {
        if self.format == OutputFormat::Json {
            write_json(
                out,
                &serde_json::json!({
                    "success": true,
                    "udid": device.udid,
                    "name": device.name,
                    "os": device.os_version,
                }),
            )?;
        } else {
            self.status(&format!("Launched {}", describe(device, &self.themes.stderr)));
        }
        Ok(true)
    }

    /// `isim default`
    pub fn show_default(&self, out: &mut dyn Write) -> Result<bool> {
        let Some(udid) = self.store.get()? else {
            if self.format == OutputFormat::Json {
                write_json(out, &serde_json::json!({ "udid": null, "device": null }))?;
            } else {
                eprintln!("No default set. Run: isim default <udid>");
            }
            return Ok(false);
        };

        let device = match self.backend.list_devices() {
            Ok(devices) => find_by_udid(&devices, &udid).cloned(),
            Err(e) => {
                warn!(error = %e, "could not enumerate simulators");
                None
            }
        };

        if self.format == OutputFormat::Json {
            let device = device.as_ref().map(device_json).transpose()?;
            write_json(out, &serde_json::json!({ "udid": udid, "device": device }))?;
            return Ok(true);
        }

        match device {
            Some(device) => {
                writeln!(out, "Default: {}", describe(&device, &self.themes.stdout))?;
                writeln!(out, "  UDID: {}", udid)?;
            }
            None => {
                writeln!(out, "Default UDID: {} (not found in available simulators)", udid)?;
            }
        }
        Ok(true)
    }

    /// `isim default <udid> [--force]`
    pub fn set_default(&self, udid: &str, force: bool, out: &mut dyn Write) -> Result<bool> {
        let device = select_default(self.backend, self.store, udid, force)?;

        if self.format == OutputFormat::Json {
            let stored = device.as_ref().map_or(udid.trim(), |d| d.udid.as_str());
            write_json(out, &serde_json::json!({ "success": true, "udid": stored }))?;
            return Ok(true);
        }

        let theme = &self.themes.stderr;
        match device {
            Some(device) => self.status(&format!("Default set to: {}", describe(&device, theme))),
            None => {
                eprintln!(
                    "{} UDID '{}' not found in available simulators; stored anyway.",
                    theme.marker("Warning:"),
                    udid.trim()
                );
            }
        }
        Ok(true)
    }
}

fn no_matches_message(filter: Option<&str>, booted_only: bool) -> String {
    let mut msg = String::from(if booted_only {
        "No booted simulators found"
    } else {
        "No simulators found"
    });
    if let Some(f) = filter.filter(|f| !f.trim().is_empty()) {
        msg.push_str(&format!(" matching '{}'", f));
    }
    msg.push('.');
    msg
}

/// Maps an error to the process exit status.
pub fn exit_status(err: &IsimError) -> u8 {
    match err {
        IsimError::NotFound(_)
        | IsimError::AmbiguousQuery { .. }
        | IsimError::InvalidDefault(_)
        | IsimError::NoDefault => 1,
        IsimError::Usage(_) => 2,
        IsimError::Enumeration(_) | IsimError::CommandFailed(_) => 3,
        IsimError::Io(_) => 4,
    }
}

/// Writes an error, plus a hint or candidate list where one helps.
pub fn report_error(err: &IsimError, theme: &Theme, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Error: {}", err)?;
    match err {
        IsimError::NotFound(_) => writeln!(out, "Run 'isim list' to see available simulators."),
        IsimError::NoDefault => writeln!(
            out,
            "Run 'isim list' to browse simulators, then: isim default <udid>"
        ),
        IsimError::InvalidDefault(_) => writeln!(
            out,
            "Run 'isim list' to see available simulators, or pass --force to store it anyway."
        ),
        IsimError::AmbiguousQuery { candidates, .. } => {
            let candidates: Vec<&DeviceRecord> = candidates.iter().collect();
            writeln!(out)?;
            write!(out, "{}", render_table(&candidates, None, theme))
        }
        _ => Ok(()),
    }
}
