//! Runtime configuration: defaults overridable from the command line.

use std::fmt;
use std::path::PathBuf;

use crate::engine::{RasterizerType, RenderMode};

pub const WINDOW_WIDTH: u32 = 720;
pub const WINDOW_HEIGHT: u32 = 720;
pub const FPS: u32 = 60;
pub const TITLE: &str = "Tiny Renderer";
/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 16_384;

pub const USAGE: &str = "\
usage: tiny-renderer [--width N] [--height N] [--mode wireframe|filled|both]
                     [--rasterizer scanline|edge-table] [--png PATH [--frames N]]
                     [--log FILTER] MESH...";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub title: String,
    pub render_mode: RenderMode,
    pub rasterizer: RasterizerType,
    /// Render headless into this PNG instead of opening a window.
    pub png: Option<PathBuf>,
    /// Frames to render in headless mode.
    pub frames: u64,
    pub log_filter: Option<String>,
    pub meshes: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            fps: FPS,
            title: TITLE.to_string(),
            render_mode: RenderMode::default(),
            rasterizer: RasterizerType::default(),
            png: None,
            frames: 1,
            log_filter: None,
            meshes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownFlag(String),
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, message: String },
    NoMeshes,
    Help,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownFlag(flag) => write!(f, "unknown option '{flag}'"),
            ConfigError::MissingValue(flag) => write!(f, "{flag} needs a value"),
            ConfigError::InvalidValue { flag, message } => write!(f, "{flag}: {message}"),
            ConfigError::NoMeshes => write!(f, "no mesh files given"),
            ConfigError::Help => write!(f, "{USAGE}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &'static str) -> Result<String, ConfigError> {
    args.next().ok_or(ConfigError::MissingValue(flag))
}

fn positive(text: &str, flag: &'static str) -> Result<u32, ConfigError> {
    match text.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            flag,
            message: format!("expected a positive integer, got '{text}'"),
        }),
    }
}

fn dimension(text: &str, flag: &'static str) -> Result<u32, ConfigError> {
    let n = positive(text, flag)?;
    if n > MAX_DIMENSION {
        return Err(ConfigError::InvalidValue {
            flag,
            message: format!("{n} exceeds the maximum of {MAX_DIMENSION}"),
        });
    }
    Ok(n)
}

impl Config {
    /// Build a configuration from command-line arguments (program name excluded).
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => config.width = dimension(&value(&mut args, "--width")?, "--width")?,
                "--height" => {
                    config.height = dimension(&value(&mut args, "--height")?, "--height")?
                }
                "--mode" => {
                    config.render_mode = value(&mut args, "--mode")?
                        .parse()
                        .map_err(|message| ConfigError::InvalidValue {
                            flag: "--mode",
                            message,
                        })?
                }
                "--rasterizer" => {
                    config.rasterizer = value(&mut args, "--rasterizer")?
                        .parse()
                        .map_err(|message| ConfigError::InvalidValue {
                            flag: "--rasterizer",
                            message,
                        })?
                }
                "--png" => config.png = Some(value(&mut args, "--png")?.into()),
                "--frames" => {
                    config.frames = u64::from(positive(&value(&mut args, "--frames")?, "--frames")?)
                }
                "--log" => config.log_filter = Some(value(&mut args, "--log")?),
                "-h" | "--help" => return Err(ConfigError::Help),
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()))
                }
                _ => config.meshes.push(arg.into()),
            }
        }

        if config.meshes.is_empty() {
            return Err(ConfigError::NoMeshes);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        Config::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        let config = parse(&["cube.obj"]).unwrap();
        assert_eq!(config.width, 720);
        assert_eq!(config.height, 720);
        assert_eq!(config.fps, 60);
        assert_eq!(config.title, "Tiny Renderer");
        assert_eq!(config.render_mode, RenderMode::Wireframe);
        assert_eq!(config.rasterizer, RasterizerType::Scanline);
        assert_eq!(config.png, None);
        assert_eq!(config.meshes, vec![PathBuf::from("cube.obj")]);
    }

    #[test]
    fn all_options() {
        let config = parse(&[
            "--width", "320", "--height", "200", "--mode", "both", "--rasterizer",
            "edge-table", "--png", "out.png", "--frames", "3", "--log", "debug", "a.obj",
            "b.obj",
        ])
        .unwrap();
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.render_mode, RenderMode::FilledWireframe);
        assert_eq!(config.rasterizer, RasterizerType::EdgeTable);
        assert_eq!(config.png, Some(PathBuf::from("out.png")));
        assert_eq!(config.frames, 3);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.meshes.len(), 2);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse(&["--fast", "a.obj"]), Err(ConfigError::UnknownFlag("--fast".into())));
        assert_eq!(parse(&["a.obj", "--width"]), Err(ConfigError::MissingValue("--width")));
        assert!(matches!(
            parse(&["--width", "0", "a.obj"]),
            Err(ConfigError::InvalidValue { flag: "--width", .. })
        ));
        assert!(matches!(
            parse(&["--mode", "dots", "a.obj"]),
            Err(ConfigError::InvalidValue { flag: "--mode", .. })
        ));
        assert_eq!(parse(&[]), Err(ConfigError::NoMeshes));
        assert_eq!(parse(&["--help"]), Err(ConfigError::Help));
    }

    #[test]
    fn rejects_oversized_surfaces() {
        for flag in ["--width", "--height"] {
            assert!(matches!(
                parse(&[flag, "70000", "a.obj"]),
                Err(ConfigError::InvalidValue { .. })
            ));
        }
        let config = parse(&["--width", "16384", "--height", "16384", "a.obj"]).unwrap();
        assert_eq!((config.width, config.height), (MAX_DIMENSION, MAX_DIMENSION));
        // frame counts are not surface sizes
        assert_eq!(parse(&["--frames", "70000", "a.obj"]).unwrap().frames, 70_000);
    }
}
