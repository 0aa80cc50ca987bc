use crate::world::map::DEFAULT_TILE_CACHE;
use crate::world::viewport::ViewportSize;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct AppConfig {
    pub root: PathBuf,
    pub things_path: PathBuf,
    pub scene_path: PathBuf,
    pub tile_cache: usize,
    pub viewport: ViewportSize,
    pub debug: bool,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        Self::from_parts(args, |name| std::env::var(name).ok())
    }

    fn from_parts<F>(args: &[String], lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if args.len() < 2 {
            return Err(
                "usage: tibia-client <asset-root> [things.yml] [scene.yml]".to_string(),
            );
        }
        let env = |name: &str| {
            lookup(name).and_then(|value| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let root = Path::new(&args[1]).to_path_buf();
        let things_path = match args.get(2) {
            Some(path) => PathBuf::from(path),
            None => root.join("things.yml"),
        };
        let scene_path = match args.get(3) {
            Some(path) => PathBuf::from(path),
            None => root.join("scene.yml"),
        };
        let tile_cache = match env("TIBIA_TILE_CACHE") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity > 0)
                .ok_or_else(|| format!("invalid TIBIA_TILE_CACHE '{}'", value))?,
            None => DEFAULT_TILE_CACHE,
        };
        let viewport = match env("TIBIA_VIEWPORT") {
            Some(value) => ViewportSize::parse(&value)?,
            None => ViewportSize::default(),
        };
        let debug = env("TIBIA_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            root,
            things_path,
            scene_path,
            tile_cache,
            viewport,
            debug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn defaults_derive_from_root() {
        let config = AppConfig::from_parts(&args(&["tibia-client", "assets"]), |_| None)
            .expect("config");
        assert_eq!(config.things_path, Path::new("assets").join("things.yml"));
        assert_eq!(config.scene_path, Path::new("assets").join("scene.yml"));
        assert_eq!(config.tile_cache, DEFAULT_TILE_CACHE);
        assert_eq!(config.viewport, ViewportSize::default());
        assert!(!config.debug);
    }

    #[test]
    fn explicit_paths_and_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TIBIA_TILE_CACHE", " 64 "),
            ("TIBIA_VIEWPORT", "15x11"),
            ("TIBIA_DEBUG", "true"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_parts(
            &args(&["tibia-client", "assets", "dat/things.yml", "scenes/temple.yml"]),
            |name| env.get(name).map(|value| value.to_string()),
        )
        .expect("config");
        assert_eq!(config.things_path, PathBuf::from("dat/things.yml"));
        assert_eq!(config.scene_path, PathBuf::from("scenes/temple.yml"));
        assert_eq!(config.tile_cache, 64);
        assert_eq!(config.viewport, ViewportSize { width: 15, height: 11 });
        assert!(config.debug);
    }

    #[test]
    fn rejects_missing_root_and_bad_env() {
        assert!(AppConfig::from_parts(&args(&["tibia-client"]), |_| None).is_err());
        let err = AppConfig::from_parts(&args(&["tibia-client", "assets"]), |name| {
            (name == "TIBIA_TILE_CACHE").then(|| "0".to_string())
        })
        .expect_err("zero cache");
        assert!(err.contains("TIBIA_TILE_CACHE"), "{}", err);
        // Blank values fall back to defaults.
        let config = AppConfig::from_parts(&args(&["tibia-client", "assets"]), |_| {
            Some("  ".to_string())
        })
        .expect("config");
        assert_eq!(config.tile_cache, DEFAULT_TILE_CACHE);
    }
}
