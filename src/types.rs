use std::fmt;

use thiserror::Error;

/// A GPS fix in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's Display always uses `.` as the decimal separator,
        // regardless of locale.
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

const VIN_LEN: usize = 17;

/// A validated VIN: 17 ASCII alphanumeric characters, excluding I, O and Q,
/// stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vin(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidVin {
    #[error("expected 17 characters, got {0}")]
    Length(usize),
    #[error("character {0:?} is not allowed in a VIN")]
    Character(char),
}

impl Vin {
    pub fn parse(candidate: &str) -> Result<Vin, InvalidVin> {
        let len = candidate.chars().count();
        if len != VIN_LEN {
            return Err(InvalidVin::Length(len));
        }
        if let Some(c) = candidate.chars().find(|c| !is_vin_char(*c)) {
            return Err(InvalidVin::Character(c));
        }
        Ok(Vin(candidate.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_vin_char(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c.to_ascii_uppercase(), 'I' | 'O' | 'Q')
}
