use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "aquatemp.toml";
pub const SYSTEM_CONFIG_DIR: &str = "/etc/aquatemp";

pub fn init_logging() {
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(default_log_level())
        .parse_default_env()
        .init();
}

pub fn default_log_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Locates the config file: `CONFIG_PATH` if set, then the working
/// directory, then the system config directory.
pub fn config_path() -> PathBuf {
    let env = std::env::var_os("CONFIG_PATH").map(PathBuf::from);
    let cwd = std::env::current_dir().ok();
    resolve_config_path(env, cwd.as_deref())
}

fn resolve_config_path(env: Option<PathBuf>, cwd: Option<&Path>) -> PathBuf {
    if let Some(path) = env {
        return path;
    }

    if let Some(cwd) = cwd {
        let cwd_config = cwd.join(CONFIG_FILE);
        if cwd_config.exists() {
            return cwd_config;
        }
    }

    Path::new(SYSTEM_CONFIG_DIR).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_path_wins() {
        let path = resolve_config_path(Some("/tmp/custom.toml".into()), Some(Path::new("/")));
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn falls_back_to_system_dir() {
        let path = resolve_config_path(None, Some(Path::new("/nonexistent/aquatemp-dir")));
        assert_eq!(path, PathBuf::from("/etc/aquatemp/aquatemp.toml"));

        let path = resolve_config_path(None, None);
        assert_eq!(path, PathBuf::from("/etc/aquatemp/aquatemp.toml"));
    }
}
