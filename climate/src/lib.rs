use aquatemp_protocol::{ClimateState, RegisterWrite, Snapshot};
use thiserror::Error;
use tokio::sync::watch;

mod entity;
pub mod poll;

pub use entity::{Capabilities, ClimateEntity, EntityConfig, Features, TemperatureUnit};

/// Register access to a single heat pump, provided by the transport.
pub trait Device {
    type Error: std::error::Error + 'static;

    fn snapshot(&self) -> impl Future<Output = Result<Snapshot, Self::Error>>;

    /// Writes are assumed to take effect eventually; the device does not
    /// confirm them.
    fn write(&self, writes: &[RegisterWrite]) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Receives every successfully decoded state.
pub trait Publish {
    fn publish(&self, state: &ClimateState);
}

impl Publish for watch::Sender<Option<ClimateState>> {
    fn publish(&self, state: &ClimateState) {
        self.send_replace(Some(state.clone()));
    }
}

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error(transparent)]
    Protocol(#[from] aquatemp_protocol::Error),
    #[error("device: {0}")]
    Device(E),
}
