//! Configuration loading.
//!
//! Sources, lowest precedence first: struct defaults, the YAML config file,
//! `READYBLOG_*` environment variables, then command line overrides.

use std::path::{Path, PathBuf};

use super::{BlogConfig, CONFIG_FILE, ConfigError, ENV_PREFIX};

/// Values given on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
}

impl BlogConfig {
    /// Load the config from the command line argument, defaulting to `readyblog.yaml`.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load_from_arg(
        config_file: Option<&Path>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };
        let path = if path.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(path)
        } else {
            path
        };

        if required && !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        Self::load(&path, overrides)
    }

    /// Load the config from a (possibly absent) file path plus the environment.
    pub(crate) fn load(path: &Path, overrides: &Overrides) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let mut config = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<BlogConfig>()?;

        tracing::debug!(path = %path.display(), "loaded configuration");

        config.apply(overrides);
        Ok(config)
    }

    fn apply(&mut self, overrides: &Overrides) {
        if let Some(root) = &overrides.root {
            self.root = root.clone();
        }
        if let Some(output) = &overrides.output {
            self.output = output.clone();
        }
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
    }
}
