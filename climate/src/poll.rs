use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use crate::{ClimateEntity, Device, Publish};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Refreshes the entity every `period`, starting immediately. Never returns.
pub async fn run<D: Device, P: Publish>(entity: &ClimateEntity<D, P>, period: Duration) {
    log::info!("polling every {}s", period.as_secs_f32());

    let mut interval = time::interval(period);
    // no catch-up reads after a slow refresh
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        entity.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::convert::Infallible;

    use aquatemp_protocol::{ClimateState, HvacMode, RegisterWrite, Snapshot};

    use super::*;
    use crate::{EntityConfig, TemperatureUnit};

    struct CountingDevice {
        reads: Cell<usize>,
    }

    impl Device for CountingDevice {
        type Error = Infallible;

        async fn snapshot(&self) -> Result<Snapshot, Infallible> {
            self.reads.set(self.reads.get() + 1);
            Ok(Snapshot::from_iter([("power", "1"), ("mode", "2")]))
        }

        async fn write(&self, _: &[RegisterWrite]) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct Latest(RefCell<Option<ClimateState>>);

    impl Publish for Latest {
        fn publish(&self, state: &ClimateState) {
            *self.0.borrow_mut() = Some(state.clone());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polls_periodically() {
        let config = EntityConfig {
            device_id: "hp".into(),
            name: "hp".into(),
            temperature_unit: TemperatureUnit::Celsius,
        };
        let device = CountingDevice { reads: Cell::new(0) };
        let entity = ClimateEntity::new(config, device, Latest(RefCell::new(None)));

        let _ = time::timeout(Duration::from_millis(2500), run(&entity, Duration::from_secs(1))).await;

        // ticks at 0s, 1s and 2s
        assert_eq!(entity.device().reads.get(), 3);
        let latest = entity.publisher().0.borrow();
        assert_eq!(latest.as_ref().map(|state| state.hvac_mode), Some(HvacMode::Auto));
    }

    #[tokio::test]
    async fn watch_sender_publishes() {
        let (tx, rx) = tokio::sync::watch::channel::<Option<ClimateState>>(None);
        tx.publish(&ClimateState::default());
        assert_eq!(*rx.borrow(), Some(ClimateState::default()));
    }
}
