use std::fs;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Size in bytes of the native integer kinds on the target (4 or 8).
    pub pointer_width: usize,
    /// If true, the TypeContext is dumped at debug level on request.
    pub dump_type_context: bool,
}

impl Config {
    pub fn default() -> Self {
        Self {
            pointer_width: std::mem::size_of::<usize>(),
            dump_type_context: false,
        }
    }

    pub fn test() -> Self {
        Self {
            pointer_width: 8,
            dump_type_context: false,
        }
    }

    pub fn debug() -> Self {
        Self {
            pointer_width: std::mem::size_of::<usize>(),
            dump_type_context: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    types: Option<TypesSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TypesSection {
    pointer_width: Option<usize>,
    dump_type_context: Option<bool>,
}

/// Parse a TOML config document. Missing keys keep their default values.
pub fn load_config_str(src: &str) -> Result<Config, String> {
    let file: ConfigFile = toml::from_str(src).map_err(|e| format!("invalid config: {}", e))?;
    let mut config = Config::default();

    if let Some(types) = file.types {
        if let Some(width) = types.pointer_width {
            if width != 4 && width != 8 {
                return Err(format!(
                    "invalid config: pointer-width must be 4 or 8, got {}",
                    width
                ));
            }
            config.pointer_width = width;
        }
        if let Some(dump) = types.dump_type_context {
            config.dump_type_context = dump;
        }
    }

    Ok(config)
}

/// Read and parse a TOML config file.
pub fn load_config_file(path: &str) -> Result<Config, String> {
    let src = fs::read_to_string(path).map_err(|_| format!("failed to read config file: {}", path))?;
    load_config_str(&src)
}
