use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use aquatemp_climate::{poll, ClimateEntity, Publish};
use aquatemp_protocol::pretty::{pretty_print_state, pretty_print_writes};
use aquatemp_protocol::{
    decode_state, encode_set_fan_mode, encode_set_hvac_mode, encode_set_temperature,
    ClimateState, FanMode, HvacMode, RegisterWrite,
};
use structopt::StructOpt;
use thiserror::Error;
use tokio::sync::watch;

mod config;
mod file_device;

use config::{Config, ConfigError};
use file_device::{FileDevice, FileError};

/// Translates AquaTemp heat pump registers into climate state and back.
/// Commands without a file argument use the device from the config file.
#[derive(StructOpt)]
struct Opt {
    /// Print JSON instead of text
    #[structopt(long)]
    json: bool,
    /// Register file to use instead of the configured one
    #[structopt(long, parse(from_os_str))]
    snapshot: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(StructOpt)]
enum Cmd {
    /// Decode a register snapshot file
    Decode {
        #[structopt(parse(from_os_str))]
        file: Option<PathBuf>,
    },
    /// Print the register writes for a command without applying them
    Encode(EncodeCmd),
    /// Apply a command to the configured device
    Set(SetCmd),
    /// Poll the configured device and print every state
    Watch,
}

#[derive(StructOpt)]
enum EncodeCmd {
    Temperature { mode: HvacMode, temperature: f32 },
    Mode { mode: HvacMode },
    Fan { fan: FanMode },
}

#[derive(StructOpt)]
enum SetCmd {
    /// Set the target temperature of the current mode
    Temperature { temperature: f32 },
    Mode { mode: HvacMode },
    Fan { fan: FanMode },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ExitCode> {
    let opt = Opt::from_args();

    aquatemp_common::init_logging();

    run(opt).await.map_err(|err| {
        log::error!("{err}");
        ExitCode::FAILURE
    })
}

#[derive(Error, Debug)]
enum RunError {
    #[error("reading config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    File(#[from] FileError),
    #[error(transparent)]
    Protocol(#[from] aquatemp_protocol::Error),
    #[error(transparent)]
    Device(#[from] aquatemp_climate::Error<FileError>),
    #[error(transparent)]
    Output(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

async fn run(opt: Opt) -> Result<(), RunError> {
    let output = Output { json: opt.json, use_color: use_color() };

    match opt.cmd {
        Cmd::Decode { file } => {
            let path = match file.or(opt.snapshot) {
                Some(path) => path,
                None => load_config()?.device.snapshot,
            };
            let snapshot = file_device::read_snapshot(&path)?;
            output.state(&decode_state(&snapshot)?)?;
        }
        Cmd::Encode(cmd) => {
            output.writes(&encode(cmd)?)?;
        }
        Cmd::Set(cmd) => {
            let config = load_config()?;
            let device = FileDevice::new(opt.snapshot.unwrap_or(config.device.snapshot));
            let (publisher, _) = watch::channel::<Option<ClimateState>>(None);
            let entity = ClimateEntity::new(config.device.entity, device, publisher);

            // temperature commands depend on the current mode
            entity.try_refresh().await?;

            match cmd {
                SetCmd::Temperature { temperature } => entity.try_set_temperature(temperature).await?,
                SetCmd::Mode { mode } => entity.try_set_hvac_mode(mode).await?,
                SetCmd::Fan { fan } => entity.try_set_fan_mode(fan).await?,
            }

            output.state(&entity.state())?;
        }
        Cmd::Watch => {
            let config = load_config()?;
            let interval = config.device.poll_interval();
            let device = FileDevice::new(opt.snapshot.unwrap_or(config.device.snapshot));
            let entity = ClimateEntity::new(config.device.entity, device, output);

            log::info!("capabilities: {}", serde_json::to_string(&entity.capabilities())?);

            poll::run(&entity, interval).await;
        }
    }

    Ok(())
}

fn load_config() -> Result<Config, ConfigError> {
    config::load_config(&aquatemp_common::config_path())
}

fn encode(cmd: EncodeCmd) -> Result<Vec<RegisterWrite>, aquatemp_protocol::Error> {
    Ok(match cmd {
        EncodeCmd::Temperature { mode, temperature } => {
            vec![encode_set_temperature(mode, temperature)?]
        }
        EncodeCmd::Mode { mode } => encode_set_hvac_mode(mode)?.to_vec(),
        EncodeCmd::Fan { fan } => vec![encode_set_fan_mode(fan)?],
    })
}

#[derive(Clone, Copy)]
struct Output {
    json: bool,
    use_color: bool,
}

impl Output {
    fn state(&self, state: &ClimateState) -> Result<(), RunError> {
        let rendered = if self.json {
            serde_json::to_string(state)? + "\n"
        } else {
            let mut rendered = String::new();
            pretty_print_state(&mut rendered, state, self.use_color).map_err(io::Error::other)?;
            rendered
        };

        io::stdout().write_all(rendered.as_bytes())?;
        Ok(())
    }

    fn writes(&self, writes: &[RegisterWrite]) -> Result<(), RunError> {
        let rendered = if self.json {
            serde_json::to_string(writes)? + "\n"
        } else {
            let mut rendered = String::new();
            pretty_print_writes(&mut rendered, writes, self.use_color).map_err(io::Error::other)?;
            rendered
        };

        io::stdout().write_all(rendered.as_bytes())?;
        Ok(())
    }
}

impl Publish for Output {
    fn publish(&self, state: &ClimateState) {
        if let Err(err) = self.state(state) {
            log::warn!("printing state: {err}");
        }
    }
}

fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_mode() {
        let writes = encode(EncodeCmd::Mode { mode: HvacMode::Heat }).unwrap();
        assert_eq!(writes, vec![
            RegisterWrite::new("power", "1"),
            RegisterWrite::new("mode", "1"),
        ]);
    }

    #[test]
    fn encode_temperature_while_off() {
        let result = encode(EncodeCmd::Temperature { mode: HvacMode::Off, temperature: 20.0 });
        assert!(matches!(result, Err(aquatemp_protocol::Error::InvalidMode(_))));
    }

    #[test]
    fn parse_args() {
        let opt = Opt::from_iter(["aquatemp", "--json", "encode", "fan", "low"]);
        assert!(opt.json);
        assert!(matches!(opt.cmd, Cmd::Encode(EncodeCmd::Fan { fan: FanMode::Low })));

        assert!(opt.snapshot.is_none());

        let result = Opt::from_iter_safe(["aquatemp", "set", "mode", "dry"]);
        assert!(result.is_err());
    }

    #[test]
    fn snapshot_override() {
        let opt = Opt::from_iter(["aquatemp", "--snapshot", "/tmp/registers.toml", "set", "fan", "auto"]);
        assert_eq!(opt.snapshot, Some(PathBuf::from("/tmp/registers.toml")));
        assert!(matches!(opt.cmd, Cmd::Set(SetCmd::Fan { fan: FanMode::Auto })));

        let opt = Opt::from_iter(["aquatemp", "--snapshot", "a.toml", "watch"]);
        assert_eq!(opt.snapshot, Some(PathBuf::from("a.toml")));
        assert!(matches!(opt.cmd, Cmd::Watch));
    }
}
