//! Fixed vocabulary shared with the heat pump firmware. These tables must
//! stay exactly as the device expects them.

use crate::register::code;
use crate::types::{FanMode, HvacMode};

/// An enumeration carried on the wire as a string code in a single register.
pub trait VendorCode: Sized + Copy + PartialEq + 'static {
    const REGISTER: &'static str;
    const CODES: &'static [(Self, &'static str)];

    fn to_code(self) -> Option<&'static str> {
        Self::CODES.iter()
            .find(|(value, _)| *value == self)
            .map(|(_, code)| *code)
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::CODES.iter()
            .find(|(_, candidate)| *candidate == code)
            .map(|(value, _)| *value)
    }
}

// off has no code, it is expressed through the power register instead
impl VendorCode for HvacMode {
    const REGISTER: &'static str = code::MODE;
    const CODES: &'static [(Self, &'static str)] = &[
        (HvacMode::Cool, "0"),
        (HvacMode::Heat, "1"),
        (HvacMode::Auto, "2"),
    ];
}

impl VendorCode for FanMode {
    const REGISTER: &'static str = code::FAN_MODE;
    const CODES: &'static [(Self, &'static str)] = &[
        (FanMode::Auto, "0"),
        (FanMode::Low, "1"),
    ];
}

/// Names of the registers holding a mode's temperature limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempBounds {
    pub min: &'static str,
    pub max: &'static str,
}

const TEMPERATURE_BOUNDS: &[(HvacMode, TempBounds)] = &[
    (HvacMode::Cool, TempBounds { min: "mintemp0", max: "maxtemp0" }),
    (HvacMode::Heat, TempBounds { min: "mintemp1", max: "maxtemp1" }),
];

pub fn temperature_bounds(mode: HvacMode) -> Option<TempBounds> {
    TEMPERATURE_BOUNDS.iter()
        .find(|(candidate, _)| *candidate == mode)
        .map(|(_, bounds)| *bounds)
}

/// Register holding the set point for `mode`, `None` for off.
pub fn target_temperature_register(mode: HvacMode) -> Option<String> {
    mode.to_code().map(|code| format!("R0{code}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_codes() {
        assert_eq!(HvacMode::Off.to_code(), None);
        assert_eq!(HvacMode::Cool.to_code(), Some("0"));
        assert_eq!(HvacMode::Heat.to_code(), Some("1"));
        assert_eq!(HvacMode::Auto.to_code(), Some("2"));

        assert_eq!(HvacMode::from_code("2"), Some(HvacMode::Auto));
        assert_eq!(HvacMode::from_code("9"), None);
        assert_eq!(HvacMode::from_code(""), None);
    }

    #[test]
    fn fan_codes() {
        assert_eq!(FanMode::Auto.to_code(), Some("0"));
        assert_eq!(FanMode::Low.to_code(), Some("1"));
        assert_eq!(FanMode::from_code("1"), Some(FanMode::Low));
        assert_eq!(FanMode::from_code("3"), None);
    }

    #[test]
    fn target_registers() {
        assert_eq!(target_temperature_register(HvacMode::Cool).as_deref(), Some("R00"));
        assert_eq!(target_temperature_register(HvacMode::Heat).as_deref(), Some("R01"));
        assert_eq!(target_temperature_register(HvacMode::Auto).as_deref(), Some("R02"));
        assert_eq!(target_temperature_register(HvacMode::Off), None);
    }

    #[test]
    fn bounds_only_for_cool_and_heat() {
        assert_eq!(temperature_bounds(HvacMode::Heat).map(|b| b.min), Some("mintemp1"));
        assert_eq!(temperature_bounds(HvacMode::Cool).map(|b| b.max), Some("maxtemp0"));
        assert_eq!(temperature_bounds(HvacMode::Auto), None);
        assert_eq!(temperature_bounds(HvacMode::Off), None);
    }
}
