use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use aquatemp_climate::Device;
use aquatemp_protocol::{RegisterWrite, Snapshot};
use serde::Deserialize;
use thiserror::Error;

/// A device whose registers live in a TOML file. Writes are merged into
/// the file straight away.
pub struct FileDevice {
    path: PathBuf,
}

#[derive(Error, Debug)]
pub enum FileError {
    #[error("{path}: {err}")]
    Io { path: PathBuf, err: io::Error },
    #[error("{path}: {err}")]
    Parse { path: PathBuf, err: toml::de::Error },
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

// hand-written files may use plain toml scalars
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl RawValue {
    fn into_register(self) -> String {
        match self {
            RawValue::Text(text) => text,
            RawValue::Integer(value) => value.to_string(),
            RawValue::Float(value) => value.to_string(),
            RawValue::Bool(value) => (if value { "1" } else { "0" }).to_owned(),
        }
    }
}

pub fn parse_snapshot(text: &str) -> Result<Snapshot, toml::de::Error> {
    let raw: BTreeMap<String, RawValue> = toml::from_str(text)?;
    Ok(raw.into_iter().map(|(code, value)| (code, value.into_register())).collect())
}

pub fn read_snapshot(path: &Path) -> Result<Snapshot, FileError> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| FileError::Io { path: path.to_owned(), err })?;

    parse_snapshot(&text)
        .map_err(|err| FileError::Parse { path: path.to_owned(), err })
}

impl FileDevice {
    pub fn new(path: PathBuf) -> Self {
        FileDevice { path }
    }

    fn store(&self, snapshot: &Snapshot) -> Result<(), FileError> {
        // written sorted by register code
        let sorted = snapshot.iter().collect::<BTreeMap<_, _>>();
        let text = toml::to_string(&sorted)?;

        std::fs::write(&self.path, text)
            .map_err(|err| FileError::Io { path: self.path.clone(), err })
    }
}

impl Device for FileDevice {
    type Error = FileError;

    async fn snapshot(&self) -> Result<Snapshot, FileError> {
        read_snapshot(&self.path)
    }

    async fn write(&self, writes: &[RegisterWrite]) -> Result<(), FileError> {
        let mut snapshot = read_snapshot(&self.path)?;
        snapshot.apply(writes);
        self.store(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_scalars() {
        let snapshot = parse_snapshot(r#"
            power = 1
            mode = "1"
            R01 = 22.5
            fanmute = false
        "#).unwrap();

        assert_eq!(snapshot.get("power"), Some("1"));
        assert_eq!(snapshot.get("mode"), Some("1"));
        assert_eq!(snapshot.get("R01"), Some("22.5"));
        assert_eq!(snapshot.get("fanmute"), Some("0"));
    }

    #[test]
    fn rejects_tables() {
        assert!(parse_snapshot("[nested]\nkey = 1\n").is_err());
    }

    #[tokio::test]
    async fn write_merges_into_file() {
        let path = std::env::temp_dir()
            .join(format!("aquatemp-file-device-{}.toml", std::process::id()));
        std::fs::write(&path, "power = \"0\"\nmode = \"1\"\n").unwrap();

        let device = FileDevice::new(path.clone());
        device.write(&[
            RegisterWrite::new("power", "1"),
            RegisterWrite::new("R01", "21.5"),
        ]).await.unwrap();

        let snapshot = device.snapshot().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(snapshot.get("power"), Some("1"));
        assert_eq!(snapshot.get("mode"), Some("1"));
        assert_eq!(snapshot.get("R01"), Some("21.5"));
    }

    #[tokio::test]
    async fn missing_file() {
        let device = FileDevice::new(PathBuf::from("/nonexistent/aquatemp/registers.toml"));
        assert!(matches!(device.snapshot().await, Err(FileError::Io { .. })));
    }
}
