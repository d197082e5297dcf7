pub mod mapping;
pub mod pretty;
pub mod register;
pub mod translate;
pub mod types;

use thiserror::Error;

pub use mapping::VendorCode;
pub use register::{RegisterWrite, Snapshot};
pub use translate::{
    decode_state, encode_set_fan_mode, encode_set_hvac_mode, encode_set_temperature, Writes,
};
pub use types::{ClimateState, FanMode, HvacMode};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("missing register: {code}")]
    MissingRegister { code: String },
    #[error("register {code} is not a number: {value:?}")]
    Parse { code: String, value: String },
    #[error("invalid mode: {0}")]
    InvalidMode(String),
    #[error("unrecognized code for {register}: {code:?}")]
    UnrecognizedCode { register: &'static str, code: String },
    #[error("invalid temperature: {0}")]
    InvalidTemperature(f32),
}
