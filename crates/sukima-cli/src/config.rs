// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sukima_app::{DATE_WINDOW, Screen};

const CONFIG_VERSION: i64 = 1;
const DEFAULT_MAP_REFRESH_MS: i64 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub map: Map,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            catalog: CatalogSection::default(),
            ui: Ui::default(),
            map: Map::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_screen: Option<String>,
    pub date_window: Option<i64>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_screen: Some(Screen::Home.as_str().to_owned()),
            date_window: Some(DATE_WINDOW as i64),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Map {
    pub refresh_delay_ms: Option<i64>,
}

impl Default for Map {
    fn default() -> Self {
        Self {
            refresh_delay_ms: Some(DEFAULT_MAP_REFRESH_MS),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SUKIMA_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set SUKIMA_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(sukima_catalog::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [catalog], [ui], and [map]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(catalog_path) = &self.catalog.path {
            sukima_catalog::validate_catalog_path(catalog_path)?;
        }

        // Screen names inside the app are trusted constants; a config file
        // is user input, so an unknown name fails loudly instead of
        // degrading to a silent no-op.
        if let Some(name) = &self.ui.start_screen
            && Screen::parse(name).is_none()
        {
            bail!(
                "ui.start_screen {name:?} in {} is not a known screen; use one of: home, favorites, work, messages, my-page, map",
                path.display()
            );
        }

        if let Some(window) = self.ui.date_window
            && window <= 0
        {
            bail!(
                "ui.date_window in {} must be positive, got {}",
                path.display(),
                window
            );
        }

        if let Some(delay) = self.map.refresh_delay_ms
            && delay < 0
        {
            bail!(
                "map.refresh_delay_ms in {} must be non-negative, got {}",
                path.display(),
                delay
            );
        }

        Ok(())
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.catalog.path {
            return Some(PathBuf::from(path));
        }
        env::var_os("SUKIMA_CATALOG_PATH").map(PathBuf::from)
    }

    pub fn start_screen(&self) -> Option<Screen> {
        self.ui.start_screen.as_deref().and_then(Screen::parse)
    }

    pub fn date_window(&self) -> usize {
        self.ui
            .date_window
            .unwrap_or(DATE_WINDOW as i64)
            .max(1) as usize
    }

    pub fn map_refresh_delay(&self) -> Duration {
        let millis = self
            .map
            .refresh_delay_ms
            .unwrap_or(DEFAULT_MAP_REFRESH_MS)
            .max(0) as u64;
        Duration::from_millis(millis)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# sukima config\n# Place this file at: {}\n\nversion = 1\n\n[catalog]\n# Optional. Default is the embedded demo catalog.\n# path = \"/absolute/path/to/catalog.json\"\n\n[ui]\nstart_screen = \"home\"\ndate_window = {}\n\n[map]\nrefresh_delay_ms = {}\n",
            path.display(),
            DATE_WINDOW,
            DEFAULT_MAP_REFRESH_MS,
        )
    }
}
