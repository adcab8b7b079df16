//! Simple parser for the PWM controller section of a board config
//!
//! This handles only the TOML subset used for driver settings, without
//! pulling a full TOML implementation onto the target. It does NOT
//! support the full TOML spec.
//!
//! Supported features:
//! - `[pca9685]` and `[pca9685.<label>]` section headers
//! - Key = value pairs (string, integer, float, boolean)
//! - Hexadecimal integers (`address = 0x41`)
//! - Comments (# ...), whole-line or trailing, headers included
//! - One section per config
//!
//! ```text
//! [pca9685.arm]
//! address = 0x41       # A0 bridged
//! frequency = 50
//! reset_on_init = true
//! ```

use heapless::String as HString;

use super::types::{DriverConfig, MAX_LABEL_LEN};

/// Section name that holds driver settings
const SECTION: &str = "pca9685";

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or foreign section header
    InvalidSection,
    /// Key not known to the driver
    InvalidKey,
    /// Invalid value type or out-of-range value
    InvalidValue,
    /// Label longer than [`MAX_LABEL_LEN`]
    LabelTooLong,
}

/// Parse driver settings into a [`DriverConfig`]
///
/// Keys before any section header are accepted too, so a file holding only
/// the driver settings needs no header. Missing keys keep their defaults.
/// A config describes one chip: a second section header is
/// [`ParseError::InvalidSection`].
pub fn parse_config(input: &str) -> Result<DriverConfig, ParseError> {
    let mut config = DriverConfig::new();
    let mut has_section = false;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            if has_section {
                return Err(ParseError::InvalidSection);
            }
            has_section = true;
            if let Some(label) = parse_section_header(header)? {
                config.label = label;
            }
            continue;
        }

        let (key, value) = split_assignment(line).ok_or(ParseError::InvalidValue)?;
        apply_value(&mut config, key, value)?;
    }

    Ok(config)
}

/// Parse "pca9685" or "pca9685.label", returning the label if present
fn parse_section_header(header: &str) -> Result<Option<HString<MAX_LABEL_LEN>>, ParseError> {
    let header = header.trim();

    if header == SECTION {
        return Ok(None);
    }

    match header.split_once('.') {
        Some((SECTION, label)) if !label.is_empty() && !label.contains('.') => {
            parse_label(label).map(Some)
        }
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(config: &mut DriverConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "label" | "name" => config.label = parse_label(unquote(value))?,
        "address" => config.address = parse_address(value)?,
        "frequency" | "frequency_hz" => config.frequency_hz = parse_float(value)?,
        "reset_on_init" => config.reset_on_init = parse_bool(value)?,
        _ => return Err(ParseError::InvalidKey),
    }
    Ok(())
}

/// Cut a line at the first `#` outside double quotes
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (pos, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..pos],
            _ => {}
        }
    }
    line
}

/// Split a comment-free `key = value` line; both sides must be non-empty
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

/// Drop one pair of surrounding double quotes; bare words pass through
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_label(value: &str) -> Result<HString<MAX_LABEL_LEN>, ParseError> {
    HString::try_from(value).map_err(|_| ParseError::LabelTooLong)
}

/// Parse a 7-bit I2C address, decimal or 0x-prefixed hex
fn parse_address(value: &str) -> Result<u8, ParseError> {
    let address = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    if address > 0x7F {
        return Err(ParseError::InvalidValue);
    }
    Ok(address)
}

/// Parse a float value (integers accepted)
fn parse_float(value: &str) -> Result<f32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// `true` or `false`, lowercase only
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}
