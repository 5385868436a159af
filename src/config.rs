use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

const DEFAULT_SHINGLE_SIZE: usize = 3;
const DEFAULT_MAX_FILE_BYTES: u64 = 64 * 1024 * 1024; // 64 MiB

/// Percentage rounding rule. The scoring contract only fixes the value
/// range; the rounding rule is a documented constant, half-up by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    HalfUp,
    HalfEven,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Tokens per shingle. Documents shorter than this yield a single
    /// shingle covering the whole token sequence.
    #[serde(default = "default_shingle_size")]
    pub shingle_size: usize,

    #[serde(default = "default_rounding")]
    pub rounding: Rounding,

    /// Per-file size ceiling. Larger files fail with ResourceExceeded
    /// instead of being parsed.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_shingle_size() -> usize {
    DEFAULT_SHINGLE_SIZE
}

fn default_rounding() -> Rounding {
    Rounding::HalfUp
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            shingle_size: default_shingle_size(),
            rounding: default_rounding(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
