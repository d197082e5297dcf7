use std::collections::HashMap;

use derive_more::Display;
use serde::Serialize;

use crate::Error;

/// Register codes read and written by the translator.
pub mod code {
    pub const POWER: &str = "power";
    pub const MODE: &str = "mode";
    pub const FAN_MODE: &str = "fanmute";
    pub const CURRENT_TEMP: &str = "currenttemp";
}

/// The power register holds exactly this value while the unit is running.
pub const POWER_ON: &str = "1";
pub const POWER_OFF: &str = "0";

/// Register values read from the device at one point in time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Snapshot {
    registers: HashMap<String, String>,
}

impl Snapshot {
    pub fn get(&self, code: &str) -> Option<&str> {
        self.registers.get(code).map(String::as_str)
    }

    pub fn require(&self, code: &str) -> Result<&str, Error> {
        self.get(code).ok_or_else(|| Error::MissingRegister { code: code.to_owned() })
    }

    /// Reads a numeric register. Absent registers are `None`, present
    /// registers must hold a number.
    pub fn parse_temperature(&self, code: &str) -> Result<Option<f32>, Error> {
        let Some(value) = self.get(code) else {
            return Ok(None);
        };

        match value.trim().parse::<f32>() {
            Ok(temp) if temp.is_finite() => Ok(Some(temp)),
            _ => Err(Error::Parse { code: code.to_owned(), value: value.to_owned() }),
        }
    }

    pub fn insert(&mut self, code: impl Into<String>, value: impl Into<String>) {
        self.registers.insert(code.into(), value.into());
    }

    /// Merges register writes into the snapshot, as the device would once
    /// it has accepted them.
    pub fn apply(&mut self, writes: &[RegisterWrite]) {
        for write in writes {
            self.insert(write.code.clone(), write.value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.registers.iter().map(|(code, value)| (code.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Snapshot {
            registers: iter.into_iter()
                .map(|(code, value)| (code.into(), value.into()))
                .collect(),
        }
    }
}

/// A single register assignment for the transport to deliver.
#[derive(Debug, Display, Clone, PartialEq, Eq, Serialize)]
#[display("{code} = {value}")]
pub struct RegisterWrite {
    pub code: String,
    pub value: String,
}

impl RegisterWrite {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        RegisterWrite { code: code.into(), value: value.into() }
    }
}
