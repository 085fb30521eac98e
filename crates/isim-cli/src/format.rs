//! Text rendering for device tables and status lines.

use std::io::IsTerminal;

use crossterm::style::{Attribute, Color, ContentStyle};
use isim_core::DeviceRecord;

const UDID_WIDTH: usize = 36;
const OS_WIDTH: usize = 12;
const STATE_WIDTH: usize = 8;
const MIN_NAME_WIDTH: usize = 6;

/// Terminal styling, disabled when the stream is not a TTY or `NO_COLOR` is set.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    color: bool,
}

/// One theme per output stream, since either may be redirected on its own.
#[derive(Debug, Clone, Copy)]
pub struct Themes {
    pub stdout: Theme,
    pub stderr: Theme,
}

impl Themes {
    pub fn detect() -> Self {
        Self {
            stdout: Theme::detect(std::io::stdout().is_terminal()),
            stderr: Theme::detect(std::io::stderr().is_terminal()),
        }
    }

    pub fn plain() -> Self {
        Self {
            stdout: Theme::plain(),
            stderr: Theme::plain(),
        }
    }
}

impl Theme {
    fn detect(is_terminal: bool) -> Self {
        Self {
            color: is_terminal && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, text: &str, style: ContentStyle) -> String {
        if self.color {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn style(fg: Option<Color>, attribute: Option<Attribute>) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = fg;
        if let Some(attr) = attribute {
            style.attributes.set(attr);
        }
        style
    }

    /// Table header.
    pub fn header(&self, text: &str) -> String {
        self.paint(text, Self::style(Some(Color::Cyan), Some(Attribute::Bold)))
    }

    /// Separators and secondary text.
    pub fn muted(&self, text: &str) -> String {
        self.paint(text, Self::style(None, Some(Attribute::Dim)))
    }

    /// Rows for booted devices.
    pub fn booted(&self, text: &str) -> String {
        self.paint(text, Self::style(Some(Color::Green), None))
    }

    /// The default-device marker.
    pub fn marker(&self, text: &str) -> String {
        self.paint(text, Self::style(Some(Color::Yellow), Some(Attribute::Bold)))
    }

    /// Device names in status lines.
    pub fn emphasis(&self, text: &str) -> String {
        self.paint(text, Self::style(None, Some(Attribute::Bold)))
    }

    /// OS versions in status lines.
    pub fn os(&self, text: &str) -> String {
        self.paint(text, Self::style(Some(Color::Cyan), None))
    }
}

/// Format: `iPhone 15 Pro (iOS 17.0)`
pub fn describe(device: &DeviceRecord, theme: &Theme) -> String {
    format!("{} ({})", theme.emphasis(&device.name), theme.os(&device.os_version))
}

/// Renders the device table, marking `default_udid` with a star.
///
/// Columns are UDID, DEVICE, OS and STATE; the DEVICE column is as wide as
/// the longest name. Every line ends with a newline.
pub fn render_table(
    devices: &[&DeviceRecord],
    default_udid: Option<&str>,
    theme: &Theme,
) -> String {
    let name_width = devices
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_WIDTH);

    let mut out = String::new();
    let header = format!(
        "  {:<UDID_WIDTH$}  {:<name_width$}  {:<OS_WIDTH$}  {:<STATE_WIDTH$}",
        "UDID", "DEVICE", "OS", "STATE"
    );
    let separator = format!(
        "  {}  {}  {}  {}",
        "─".repeat(UDID_WIDTH),
        "─".repeat(name_width),
        "─".repeat(OS_WIDTH),
        "─".repeat(STATE_WIDTH)
    );
    out.push_str(&theme.header(&header));
    out.push('\n');
    out.push_str(&theme.muted(&separator));
    out.push('\n');

    for device in devices {
        let is_default = default_udid.is_some_and(|u| u.eq_ignore_ascii_case(&device.udid));
        let prefix = if is_default { theme.marker("★ ") } else { "  ".to_string() };
        let line = format!(
            "{:<UDID_WIDTH$}  {:<name_width$}  {:<OS_WIDTH$}  {:<STATE_WIDTH$}",
            device.udid,
            device.name,
            device.os_version,
            device.state.as_str()
        );
        let line = if device.state.is_booted() { theme.booted(&line) } else { line };
        out.push_str(&prefix);
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Legend explaining the table markers.
pub fn render_legend(theme: &Theme) -> String {
    format!(
        "  {} = default   {} = booted\n",
        theme.marker("★"),
        theme.booted("green")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use isim_core::DeviceState;

    fn device(udid: &str, name: &str, state: DeviceState) -> DeviceRecord {
        DeviceRecord {
            udid: udid.to_string(),
            name: name.to_string(),
            os_version: "iOS 17.0".to_string(),
            state,
            device_type: None,
            version: (17, 0, 0),
        }
    }

    #[test]
    fn test_table_layout() {
        let a = device(
            "A1B2C3D4-E5F6-7890-ABCD-EF1234567890",
            "iPhone 15 Pro",
            DeviceState::Booted,
        );
        let b = device(
            "B2C3D4E5-F6A7-8901-BCDE-F12345678901",
            "iPhone 15",
            DeviceState::Shutdown,
        );
        let table = render_table(&[&a, &b], None, &Theme::plain());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  UDID"));
        assert!(lines[0].contains("DEVICE"));
        assert!(lines[1].trim_start().starts_with('─'));
        assert_eq!(
            lines[2],
            "  A1B2C3D4-E5F6-7890-ABCD-EF1234567890  iPhone 15 Pro  iOS 17.0      Booted  "
        );
        assert_eq!(
            lines[3],
            "  B2C3D4E5-F6A7-8901-BCDE-F12345678901  iPhone 15      iOS 17.0      Shutdown"
        );
    }

    #[test]
    fn test_table_marks_default() {
        let a = device("A1B2", "iPhone 15 Pro", DeviceState::Shutdown);
        let b = device("B2C3", "iPhone 15", DeviceState::Shutdown);
        let table = render_table(&[&a, &b], Some("b2c3"), &Theme::plain());
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[2].starts_with("  A1B2"));
        assert!(lines[3].starts_with("★ B2C3"));
    }

    #[test]
    fn test_name_column_has_minimum_width() {
        let a = device("X", "SE", DeviceState::Shutdown);
        let table = render_table(&[&a], None, &Theme::plain());
        let header = table.lines().next().unwrap();
        assert!(header.contains("DEVICE  OS"));
    }

    #[test]
    fn test_plain_theme_has_no_escapes() {
        let a = device("A1B2", "iPhone 15 Pro", DeviceState::Booted);
        let table = render_table(&[&a], Some("A1B2"), &Theme::plain());
        assert!(!table.contains('\x1b'));
        assert!(!render_legend(&Theme::plain()).contains('\x1b'));
    }

    #[test]
    fn test_non_terminal_stream_is_plain() {
        let theme = Theme::detect(false);
        assert_eq!(theme.marker("Warning:"), "Warning:");
        assert_eq!(theme.booted("row"), "row");

        let themes = Themes::plain();
        assert!(!themes.stderr.color);
        assert!(!themes.stdout.color);
    }

    #[test]
    fn test_colored_theme_keeps_text() {
        let theme = Theme { color: true };
        assert!(theme.booted("row").contains("row"));
        assert!(theme.header("UDID").contains("UDID"));
    }

    #[test]
    fn test_describe() {
        let a = device("A1B2", "iPhone 15 Pro", DeviceState::Booted);
        assert_eq!(describe(&a, &Theme::plain()), "iPhone 15 Pro (iOS 17.0)");
    }
}
