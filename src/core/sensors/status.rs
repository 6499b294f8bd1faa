// src/core/sensors/status.rs

use std::fmt;

// Reported when the status file cannot be read
pub const UNKNOWN_STATUS: &str = "Unknown";

const TRAILING_BLANKS: &[char] = &[' ', '\n', '\r', '\t'];

/// Charging state as written by the kernel's power_supply class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatteryStatus {
    Unknown,
    Charging,
    Discharging,
    NotCharging,
    Full,
    // Anything else a vendor driver writes, kept verbatim
    Other(String),
}

impl BatteryStatus {
    pub fn parse(text: &str) -> Self {
        match text {
            "Unknown" => BatteryStatus::Unknown,
            "Charging" => BatteryStatus::Charging,
            "Discharging" => BatteryStatus::Discharging,
            "Not charging" => BatteryStatus::NotCharging,
            "Full" => BatteryStatus::Full,
            other => BatteryStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BatteryStatus::Unknown => "Unknown",
            BatteryStatus::Charging => "Charging",
            BatteryStatus::Discharging => "Discharging",
            BatteryStatus::NotCharging => "Not charging",
            BatteryStatus::Full => "Full",
            BatteryStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first line of the status file, exactly as read.
///
/// Both external shapes come from here: the first byte as a character
/// code, and the text with trailing blanks removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    raw: Vec<u8>,
}

impl StatusLine {
    pub fn from_raw(raw: Vec<u8>) -> Self {
        StatusLine { raw }
    }

    // First byte as an unsigned character code, 0 if there is none
    pub fn char_code(&self) -> i32 {
        self.raw.first().map_or(0, |&b| i32::from(b))
    }

    // Trailing space/newline/CR/tab removed; leading blanks are kept
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw)
            .trim_end_matches(TRAILING_BLANKS)
            .to_string()
    }

    pub fn status(&self) -> BatteryStatus {
        BatteryStatus::parse(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_blanks_only() {
        let line = StatusLine::from_raw(b"Charging \n".to_vec());
        assert_eq!(line.text(), "Charging");

        let line = StatusLine::from_raw(b" Full\t\r\n".to_vec());
        assert_eq!(line.text(), " Full");
    }

    #[test]
    fn char_code_is_first_raw_byte() {
        let line = StatusLine::from_raw(b"Discharging\n".to_vec());
        assert_eq!(line.char_code(), i32::from(b'D'));

        // a blank line still has a first byte
        let line = StatusLine::from_raw(b"\n".to_vec());
        assert_eq!(line.char_code(), 10);
        assert_eq!(line.text(), "");

        let line = StatusLine::from_raw(vec![0xC3, 0xA9]);
        assert_eq!(line.char_code(), 0xC3);
    }

    #[test]
    fn parses_kernel_strings() {
        let cases = [
            ("Charging\n", BatteryStatus::Charging),
            ("Discharging\n", BatteryStatus::Discharging),
            ("Not charging\n", BatteryStatus::NotCharging),
            ("Full\n", BatteryStatus::Full),
            ("Unknown\n", BatteryStatus::Unknown),
        ];
        for (raw, expected) in cases {
            let line = StatusLine::from_raw(raw.as_bytes().to_vec());
            assert_eq!(line.status(), expected);
            assert_eq!(line.status().to_string(), line.text());
        }
    }

    #[test]
    fn vendor_strings_are_kept() {
        let line = StatusLine::from_raw(b"Fast charging\n".to_vec());
        assert_eq!(
            line.status(),
            BatteryStatus::Other("Fast charging".to_string())
        );
        assert_eq!(line.status().as_str(), "Fast charging");
    }
}
