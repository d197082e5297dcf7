use crate::mapping::{self, VendorCode};
use crate::register::{code, RegisterWrite, Snapshot, POWER_OFF, POWER_ON};
use crate::types::{ClimateState, FanMode, HvacMode};
use crate::Error;

/// Register writes for a single command. Changing mode takes at most a
/// power write and a mode write.
pub type Writes = heapless::Vec<RegisterWrite, 2>;

pub fn decode_state(snapshot: &Snapshot) -> Result<ClimateState, Error> {
    let power = snapshot.get(code::POWER);
    let is_power_on = power == Some(POWER_ON);

    // the mode register is meaningless while the unit is off
    let hvac_mode = if is_power_on {
        decode_code::<HvacMode>(snapshot.require(code::MODE)?)?
    } else {
        HvacMode::Off
    };

    let (min_temperature, max_temperature) = match mapping::temperature_bounds(hvac_mode) {
        Some(bounds) => (
            snapshot.parse_temperature(bounds.min)?.unwrap_or(0.0),
            snapshot.parse_temperature(bounds.max)?.unwrap_or(0.0),
        ),
        None => (0.0, 0.0),
    };

    let target_temperature = match mapping::target_temperature_register(hvac_mode) {
        Some(register) if is_power_on => snapshot.parse_temperature(&register)?,
        _ => None,
    };

    let fan_mode = match snapshot.get(code::FAN_MODE) {
        Some(raw) => decode_code::<FanMode>(raw)?,
        None => FanMode::Auto,
    };

    let current_temperature = snapshot.parse_temperature(code::CURRENT_TEMP)?;

    log::debug!("{}: {:?}", code::POWER, power);
    log::debug!("{}: {:?}", code::MODE, snapshot.get(code::MODE));
    log::debug!("{}: {:?}", code::FAN_MODE, snapshot.get(code::FAN_MODE));
    log::debug!("{}: {:?}", code::CURRENT_TEMP, current_temperature);

    let state = ClimateState {
        hvac_mode,
        fan_mode,
        target_temperature,
        current_temperature,
        min_temperature,
        max_temperature,
    };

    log::debug!("decoded: {state:?}");

    Ok(state)
}

fn decode_code<T: VendorCode>(raw: &str) -> Result<T, Error> {
    T::from_code(raw).ok_or_else(|| Error::UnrecognizedCode {
        register: T::REGISTER,
        code: raw.to_owned(),
    })
}

/// Sets the set point of `mode`, which must be the unit's current mode.
pub fn encode_set_temperature(mode: HvacMode, temperature: f32) -> Result<RegisterWrite, Error> {
    if !temperature.is_finite() {
        return Err(Error::InvalidTemperature(temperature));
    }

    let register = mapping::target_temperature_register(mode)
        .ok_or_else(|| Error::InvalidMode(mode.to_string()))?;

    Ok(RegisterWrite::new(register, temperature.to_string()))
}

pub fn encode_set_hvac_mode(mode: HvacMode) -> Result<Writes, Error> {
    let mut writes = Writes::new();

    match mode.to_code() {
        None => {
            push(&mut writes, RegisterWrite::new(code::POWER, POWER_OFF));
        }
        Some(mode_code) => {
            push(&mut writes, RegisterWrite::new(code::POWER, POWER_ON));
            push(&mut writes, RegisterWrite::new(code::MODE, mode_code));
        }
    }

    Ok(writes)
}

pub fn encode_set_fan_mode(fan: FanMode) -> Result<RegisterWrite, Error> {
    let fan_code = fan.to_code()
        .ok_or_else(|| Error::InvalidMode(fan.to_string()))?;

    Ok(RegisterWrite::new(code::FAN_MODE, fan_code))
}

fn push(writes: &mut Writes, write: RegisterWrite) {
    writes.push(write)
        .map_err(|_| ())
        .expect("exceeded writes capacity, should never happen");
}
