use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "harvest.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding repository snapshots
    #[serde(default)]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Deadline applied to each adapter's fetch
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// History depth for shallow clones
    #[serde(default = "default_shallow_depth")]
    pub shallow_depth: u32,

    /// Upper bound on adapters running at once
    #[serde(default = "default_max_parallel_adapters")]
    pub max_parallel_adapters: usize,

    /// Adapters to run when none are named on the command line
    #[serde(default)]
    pub adapters: Vec<String>,
}

const fn default_fetch_timeout() -> Duration {
    Duration::from_secs(10 * 60)
}

const fn default_shallow_depth() -> u32 {
    1
}

const fn default_max_parallel_adapters() -> usize {
    4
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `harvest.toml` in `base_dir` is used when present.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))
    }

    /// Validate configuration values against the set of known adapters
    pub fn validate(&self, known_adapters: &[&str]) -> Result<()> {
        if self.fetch_timeout.is_zero() {
            return Err(app_err!("fetch_timeout must be greater than zero"));
        }

        if self.shallow_depth == 0 {
            return Err(app_err!("shallow_depth must be at least 1"));
        }

        if self.max_parallel_adapters == 0 {
            return Err(app_err!("max_parallel_adapters must be at least 1"));
        }

        if let Some(unknown) = self.adapters.iter().find(|name| !known_adapters.contains(&name.as_str())) {
            return Err(app_err!("unknown adapter '{unknown}' in configuration"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &[&str] = &["azure-vm", "cloudwatch-lambda"];

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate(KNOWN).unwrap();
        assert_eq!(config.fetch_timeout, Duration::from_secs(600));
        assert_eq!(config.shallow_depth, 1);
        assert_eq!(config.max_parallel_adapters, 4);
        assert!(config.adapters.is_empty());
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config { fetch_timeout: Duration::ZERO, ..Config::default() };
        assert!(config.validate(KNOWN).is_err());
    }

    #[test]
    fn test_validate_zero_depth() {
        let config = Config { shallow_depth: 0, ..Config::default() };
        assert!(config.validate(KNOWN).is_err());
    }

    #[test]
    fn test_validate_zero_parallelism() {
        let config = Config { max_parallel_adapters: 0, ..Config::default() };
        assert!(config.validate(KNOWN).is_err());
    }

    #[test]
    fn test_validate_unknown_adapter() {
        let config = Config { adapters: vec!["azure-vm".into(), "nope".into()], ..Config::default() };
        let err = config.validate(KNOWN).unwrap_err();
        assert!(err.to_string().contains("'nope'"));
    }

    #[test]
    fn test_parse_overrides() {
        let config: Config = toml::from_str(
            r#"
            cache_dir = "/tmp/snapshots"
            fetch_timeout = "90s"
            shallow_depth = 3
            max_parallel_adapters = 2
            adapters = ["azure-vm"]
            "#,
        )
        .unwrap();

        assert_eq!(config.cache_dir.as_deref(), Some(Utf8Path::new("/tmp/snapshots")));
        assert_eq!(config.fetch_timeout, Duration::from_secs(90));
        assert_eq!(config.shallow_depth, 3);
        assert_eq!(config.max_parallel_adapters, 2);
        config.validate(KNOWN).unwrap();
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<Config, _> = toml::from_str("colour = true");
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = Utf8PathBuf::try_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        Config::save_default(&output_path).unwrap();
        let loaded = Config::load(&Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap(), Some(&output_path)).unwrap();
        loaded.validate(KNOWN).unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_picks_up_file_in_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        fs::write(base.join(CONFIG_FILE_NAME), "max_parallel_adapters = 7\n").unwrap();

        let config = Config::load(&base, None).unwrap();
        assert_eq!(config.max_parallel_adapters, 7);
        assert_eq!(config.shallow_depth, 1);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base, None).unwrap();
        config.validate(KNOWN).unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_explicit_missing_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let missing = base.join("missing.toml");
        assert!(Config::load(&base, Some(&missing)).is_err());
    }
}
