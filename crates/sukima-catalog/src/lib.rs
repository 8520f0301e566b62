// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use sukima_app::{JobRecord, MapPin, MapPoint};

pub const APP_NAME: &str = "sukima";

const DEMO_DATA: &str = include_str!("data/demo.json");

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    jobs: Vec<JobRecord>,
    #[serde(default)]
    map_center: Option<MapPoint>,
    #[serde(default)]
    map_pins: Vec<MapPin>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    jobs: Vec<JobRecord>,
    map_center: Option<MapPoint>,
    map_pins: Vec<MapPin>,
}

impl Catalog {
    pub fn from_parts(
        jobs: Vec<JobRecord>,
        map_center: Option<MapPoint>,
        map_pins: Vec<MapPin>,
    ) -> Self {
        Self {
            jobs,
            map_center,
            map_pins,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw).context("decode catalog JSON")?;
        Ok(Self {
            jobs: file.jobs,
            map_center: file.map_center,
            map_pins: file.map_pins,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read catalog file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parse catalog file {}", path.display()))
    }

    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_DATA).context("parse embedded demo catalog")
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn get(&self, index: usize) -> Option<&JobRecord> {
        self.jobs.get(index)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn map_center(&self) -> Option<MapPoint> {
        self.map_center
    }

    pub fn map_pins(&self) -> &[MapPin] {
        &self.map_pins
    }
}

pub fn validate_catalog_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("catalog path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "catalog path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.contains('?') {
        bail!(
            "catalog path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}
