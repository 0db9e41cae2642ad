//! GSTIN format validation.
//!
//! Layout of the 15 characters:
//!
//! | Pos | Content |
//! |-----|---------|
//! | 1-2 | state code |
//! | 3-12 | PAN: 5 letters, 4 digits, 1 letter |
//! | 13 | entity number (1-9, A-Z) |
//! | 14 | `Z` |
//! | 15 | check character |

use std::fmt;

use super::states::{is_known_state_code, state_name};

const CHARSET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Error returned when a GSTIN fails format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GstinFormatError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for GstinFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid GSTIN '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for GstinFormatError {}

/// A structurally valid GSTIN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gstin(String);

impl Gstin {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-digit state code.
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }

    pub fn state_name(&self) -> Option<&'static str> {
        state_name(self.state_code())
    }

    /// The embedded PAN of the registered business.
    pub fn pan(&self) -> &str {
        &self.0[2..12]
    }
}

impl fmt::Display for Gstin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a GSTIN by format and check character (no network call).
///
/// Input is trimmed and upper-cased before checking.
pub fn validate_gstin(input: &str) -> Result<Gstin, GstinFormatError> {
    let value = input.trim().to_ascii_uppercase();
    let fail = |reason: &str| GstinFormatError {
        value: value.clone(),
        reason: reason.into(),
    };

    if value.len() != 15 || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(fail("must be 15 alphanumeric characters"));
    }
    let b = value.as_bytes();

    if !is_known_state_code(&value[..2]) {
        return Err(fail("unknown state code"));
    }
    let pan_ok = b[2..7].iter().all(u8::is_ascii_uppercase)
        && b[7..11].iter().all(u8::is_ascii_digit)
        && b[11].is_ascii_uppercase();
    if !pan_ok {
        return Err(fail("characters 3-12 are not a valid PAN"));
    }
    if b[12] == b'0' {
        return Err(fail("entity number must not be 0"));
    }
    if b[13] != b'Z' {
        return Err(fail("character 14 must be 'Z'"));
    }

    let expected = gstin_check_char(&value[..14]).ok_or_else(|| fail("invalid characters"))?;
    if b[14] as char != expected {
        return Err(fail(&format!("check character should be '{expected}'")));
    }

    Ok(Gstin(value))
}

/// Compute the mod-36 check character for the first 14 GSTIN characters.
///
/// Returns `None` if the input is not 14 characters of `0-9A-Z`.
pub fn gstin_check_char(first14: &str) -> Option<char> {
    if first14.len() != 14 {
        return None;
    }
    let mut sum = 0u32;
    for (i, byte) in first14.bytes().enumerate() {
        let value = CHARSET.iter().position(|&c| c == byte)? as u32;
        let factor = if i % 2 == 0 { 1 } else { 2 };
        let product = value * factor;
        sum += product / 36 + product % 36;
    }
    let check = (36 - sum % 36) % 36;
    Some(CHARSET[check as usize] as char)
}
