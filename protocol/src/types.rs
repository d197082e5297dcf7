use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumIter};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    Off,
    Cool,
    Heat,
    Auto,
}

/// Fan speeds, carried on the wire by the manual mute flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FanMode {
    Auto,
    Low,
}

impl FromStr for HvacMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(HvacMode::Off),
            "cool" => Ok(HvacMode::Cool),
            "heat" => Ok(HvacMode::Heat),
            "auto" => Ok(HvacMode::Auto),
            _ => Err(Error::InvalidMode(s.to_owned())),
        }
    }
}

impl FromStr for FanMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(FanMode::Auto),
            "low" => Ok(FanMode::Low),
            _ => Err(Error::InvalidMode(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateState {
    pub hvac_mode: HvacMode,
    pub fan_mode: FanMode,
    /// `None` while powered off or when the mode has no set point register.
    pub target_temperature: Option<f32>,
    pub current_temperature: Option<f32>,
    pub min_temperature: f32,
    pub max_temperature: f32,
}

impl Default for ClimateState {
    fn default() -> Self {
        ClimateState {
            hvac_mode: HvacMode::Off,
            fan_mode: FanMode::Auto,
            target_temperature: None,
            current_temperature: None,
            min_temperature: 0.0,
            max_temperature: 0.0,
        }
    }
}
