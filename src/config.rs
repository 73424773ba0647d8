// Startup configuration
//
// Everything is read from the environment once at startup. Unset
// variables take their defaults, malformed ones are errors.

use host::WindowMode;
use utils::{anyhow, Context, Result};

pub const ENV_WINDOW_MODE: &str = "ANEMONE_WINDOW_MODE";
pub const ENV_WINDOW_SIZE: &str = "ANEMONE_WINDOW_SIZE";
pub const ENV_WINDOW_TITLE: &str = "ANEMONE_WINDOW_TITLE";
pub const ENV_VALIDATION: &str = "ANEMONE_VALIDATION";
pub const ENV_MAX_FRAMES: &str = "ANEMONE_MAX_FRAMES";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub window_mode: WindowMode,
    /// Outer size of the game window
    pub window_size: (i32, i32),
    pub window_title: String,
    /// Vulkan validation layers and debug messenger
    pub validation: bool,
    /// Stop after this many frames, for smoke runs
    pub max_frames: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_mode: WindowMode::Windowed,
            window_size: (1280, 720),
            window_title: "Anemone".to_string(),
            validation: cfg!(debug_assertions),
            max_frames: None,
        }
    }
}

fn parse_mode(val: &str) -> Result<WindowMode> {
    match val.trim().to_lowercase().as_str() {
        "windowed" => Ok(WindowMode::Windowed),
        "fullscreen" => Ok(WindowMode::Fullscreen),
        "borderless" => Ok(WindowMode::Borderless),
        other => Err(anyhow!(
            "unknown window mode \"{}\", expected windowed, fullscreen or borderless",
            other
        )),
    }
}

/// Parse `WIDTHxHEIGHT`
fn parse_size(val: &str) -> Result<(i32, i32)> {
    let (width, height) = val
        .trim()
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got \"{}\"", val))?;

    let width: i32 = width.parse().context("invalid width")?;
    let height: i32 = height.parse().context("invalid height")?;
    if width <= 0 || height <= 0 {
        return Err(anyhow!("window size must be positive, got {}x{}", width, height));
    }

    Ok((width, height))
}

fn parse_bool(val: &str) -> Result<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(anyhow!("expected 0 or 1, got \"{}\"", other)),
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable
    /// name to its value
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let mut ret = Self::default();

        if let Some(val) = lookup(ENV_WINDOW_MODE) {
            ret.window_mode = parse_mode(&val).context(ENV_WINDOW_MODE)?;
        }
        if let Some(val) = lookup(ENV_WINDOW_SIZE) {
            ret.window_size = parse_size(&val).context(ENV_WINDOW_SIZE)?;
        }
        if let Some(val) = lookup(ENV_WINDOW_TITLE) {
            ret.window_title = val;
        }
        if let Some(val) = lookup(ENV_VALIDATION) {
            ret.validation = parse_bool(&val).context(ENV_VALIDATION)?;
        }
        if let Some(val) = lookup(ENV_MAX_FRAMES) {
            ret.max_frames = Some(
                val.trim()
                    .parse()
                    .with_context(|| format!("{} must be a frame count", ENV_MAX_FRAMES))?,
            );
        }

        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn every_variable_is_read() {
        let config = config_from(&[
            (ENV_WINDOW_MODE, "Borderless"),
            (ENV_WINDOW_SIZE, "1920x1080"),
            (ENV_WINDOW_TITLE, "smoke"),
            (ENV_VALIDATION, "0"),
            (ENV_MAX_FRAMES, "120"),
        ])
        .unwrap();

        assert_eq!(config.window_mode, WindowMode::Borderless);
        assert_eq!(config.window_size, (1920, 1080));
        assert_eq!(config.window_title, "smoke");
        assert!(!config.validation);
        assert_eq!(config.max_frames, Some(120));
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = config_from(&[(ENV_WINDOW_SIZE, "1920by1080")]).unwrap_err();
        assert!(format!("{:#}", err).contains(ENV_WINDOW_SIZE));

        let err = config_from(&[(ENV_WINDOW_MODE, "exclusive")]).unwrap_err();
        assert!(format!("{:#}", err).contains("exclusive"));

        assert!(config_from(&[(ENV_WINDOW_SIZE, "0x720")]).is_err());
        assert!(config_from(&[(ENV_VALIDATION, "maybe")]).is_err());
        assert!(config_from(&[(ENV_MAX_FRAMES, "-1")]).is_err());
    }
}
