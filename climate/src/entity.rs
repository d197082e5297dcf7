use std::cell::{Ref, RefCell};
use std::rc::Rc;

use aquatemp_protocol::{
    decode_state, encode_set_fan_mode, encode_set_hvac_mode, encode_set_temperature,
    ClimateState, FanMode, HvacMode, RegisterWrite,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{Device, Error, Publish};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityConfig {
    #[serde(rename = "id")]
    pub device_id: String,
    pub name: String,
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capabilities {
    pub unique_id: String,
    pub name: String,
    pub hvac_modes: Vec<HvacMode>,
    pub fan_modes: Vec<FanMode>,
    pub features: Features,
    pub temperature_unit: TemperatureUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Features {
    pub target_temperature: bool,
    pub fan_mode: bool,
}

/// Climate control entity for one heat pump. Clones share the device and
/// the last known good state.
pub struct ClimateEntity<D, P> {
    inner: Rc<Inner<D, P>>,
}

impl<D, P> Clone for ClimateEntity<D, P> {
    fn clone(&self) -> Self {
        ClimateEntity { inner: self.inner.clone() }
    }
}

struct Inner<D, P> {
    config: EntityConfig,
    device: D,
    publisher: P,
    state: RefCell<ClimateState>,
}

impl<D: Device, P: Publish> ClimateEntity<D, P> {
    pub fn new(config: EntityConfig, device: D, publisher: P) -> Self {
        ClimateEntity {
            inner: Rc::new(Inner {
                config,
                device,
                publisher,
                state: RefCell::new(ClimateState::default()),
            }),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        let config = &self.inner.config;

        Capabilities {
            unique_id: slugify(&format!("climate_{}", config.device_id)),
            name: config.name.clone(),
            hvac_modes: HvacMode::iter().collect(),
            fan_modes: FanMode::iter().collect(),
            features: Features {
                target_temperature: true,
                fan_mode: true,
            },
            temperature_unit: config.temperature_unit,
        }
    }

    /// Last successfully decoded state.
    pub fn state(&self) -> Ref<'_, ClimateState> {
        self.inner.state.borrow()
    }

    pub fn device(&self) -> &D {
        &self.inner.device
    }

    pub fn publisher(&self) -> &P {
        &self.inner.publisher
    }

    pub async fn refresh(&self) {
        if let Err(err) = self.try_refresh().await {
            log::warn!("{}: refreshing state: {err}", self.inner.config.name);
        }
    }

    /// Reads and decodes the device registers. On failure the previous
    /// state is kept and nothing is published.
    pub async fn try_refresh(&self) -> Result<(), Error<D::Error>> {
        let snapshot = self.inner.device.snapshot().await.map_err(Error::Device)?;
        let state = decode_state(&snapshot)?;

        self.inner.publisher.publish(&state);
        *self.inner.state.borrow_mut() = state;

        Ok(())
    }

    pub async fn set_temperature(&self, temperature: f32) {
        if let Err(err) = self.try_set_temperature(temperature).await {
            log::warn!("{}: setting temperature {temperature}: {err}", self.inner.config.name);
        }
    }

    /// Sets the set point of the mode the unit is currently running in.
    pub async fn try_set_temperature(&self, temperature: f32) -> Result<(), Error<D::Error>> {
        let mode = self.state().hvac_mode;
        let write = encode_set_temperature(mode, temperature)?;
        self.write_and_refresh(&[write]).await
    }

    pub async fn set_hvac_mode(&self, mode: HvacMode) {
        if let Err(err) = self.try_set_hvac_mode(mode).await {
            log::warn!("{}: setting hvac mode {mode}: {err}", self.inner.config.name);
        }
    }

    pub async fn try_set_hvac_mode(&self, mode: HvacMode) -> Result<(), Error<D::Error>> {
        let writes = encode_set_hvac_mode(mode)?;
        self.write_and_refresh(&writes).await
    }

    pub async fn set_fan_mode(&self, fan: FanMode) {
        if let Err(err) = self.try_set_fan_mode(fan).await {
            log::warn!("{}: setting fan mode {fan}: {err}", self.inner.config.name);
        }
    }

    pub async fn try_set_fan_mode(&self, fan: FanMode) -> Result<(), Error<D::Error>> {
        let write = encode_set_fan_mode(fan)?;
        self.write_and_refresh(&[write]).await
    }

    async fn write_and_refresh(&self, writes: &[RegisterWrite]) -> Result<(), Error<D::Error>> {
        for write in writes {
            log::info!("{}: write {write}", self.inner.config.name);
        }

        self.inner.device.write(writes).await.map_err(Error::Device)?;

        // the device may still report the old values, the next poll
        // corrects that
        self.refresh().await;

        Ok(())
    }
}

fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len());

    for ch in ascii.chars().map(|ch| ch.to_ascii_lowercase()) {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }

    while slug.ends_with('_') {
        slug.pop();
    }

    slug
}
