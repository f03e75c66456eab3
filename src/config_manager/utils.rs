use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config_manager::main::{Config, ConfigError};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid"));

/// Read a config file, substitute `${VAR}` placeholders and deserialize it.
/// `.json` / `.jsonld` files are parsed as JSON, everything else as YAML.
pub fn read_config_file<F>(config_path: &str, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !Path::new(config_path).exists() {
        return Err(ConfigError::NotFound(config_path.to_string()));
    }

    let content = load_text_file_with_guess_encoding(config_path)?;
    let content = substitute_env_vars(&content, env);

    let path_lower = config_path.to_lowercase();
    let config = if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
        let json_value: Value = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_value(json_value).map_err(|e| ConfigError::Parse {
            path: config_path.to_string(),
            reason: e.to_string(),
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_string(),
            reason: e.to_string(),
        })?
    };

    debug!("Parsed configuration file {}", config_path);
    Ok(config)
}

/// Replace `${VAR}` with the variable's value. Unknown variables are left as-is
/// so validation can name them.
pub fn substitute_env_vars<F>(content: &str, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ENV_PLACEHOLDER
        .replace_all(content, |caps: &Captures| {
            env(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Load a text file as UTF-8 (BOM stripped), falling back to GBK
pub fn load_text_file_with_guess_encoding(file_path: &str) -> Result<String, ConfigError> {
    let bytes = fs::read(file_path).map_err(|source| ConfigError::Read {
        path: file_path.to_string(),
        source,
    })?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            let (decoded, _, had_errors) = encoding_rs::GBK.decode(bytes);
            if had_errors {
                warn!("{} is neither UTF-8 nor GBK; some characters were replaced", file_path);
            }
            Ok(decoded.into_owned())
        }
    }
}
