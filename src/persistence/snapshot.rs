use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, ParkId};
use crate::error::ImportError;
use crate::tracker::{Stats, VisitedSet};

const FILE_PREFIX: &str = "ebrp-progress-";

/// Exported progress document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub total_parks: usize,
    pub visited_count: usize,
    pub percentage: u32,
    pub export_date: String,
    pub visited_parks: Vec<VisitedParkRecord>,
    pub visited_park_ids: Vec<ParkId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisitedParkRecord {
    pub id: ParkId,
    pub name: String,
    pub city: String,
    pub county: String,
    pub acres: f64,
}

impl Snapshot {
    pub fn build(catalog: &Catalog, visited: &VisitedSet, stats: &Stats, date: NaiveDate) -> Self {
        let visited_parks = catalog
            .iter()
            .filter(|p| visited.contains(&p.id))
            .map(|p| VisitedParkRecord {
                id: p.id,
                name: p.name.clone(),
                city: p.city.clone(),
                county: p.county.clone(),
                acres: p.acres,
            })
            .collect();

        Self {
            total_parks: stats.total,
            visited_count: stats.visited,
            percentage: stats.percentage,
            export_date: date.format("%Y-%m-%d").to_string(),
            visited_parks,
            visited_park_ids: visited.iter().copied().collect(),
        }
    }

    /// `ebrp-progress-<exportDate>.json`
    pub fn file_name(&self) -> String {
        format!("{}{}.json", FILE_PREFIX, self.export_date)
    }

    /// Write the pretty-printed document into `dir`, returning its path
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let path = dir.join(self.file_name());
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// What an import file offers before it is confirmed
#[derive(Clone, Debug, PartialEq)]
pub struct IncomingSnapshot {
    /// Every integer id listed under `visitedParkIds`
    pub ids: Vec<ParkId>,
    pub export_date: Option<String>,
}

/// Validate an import document. Only `visitedParkIds` is required; entries
/// that are not ids are skipped like unknown ids.
pub fn parse_import(content: &str) -> Result<IncomingSnapshot, ImportError> {
    let doc: serde_json::Value = serde_json::from_str(content)?;

    let ids = doc
        .get("visitedParkIds")
        .and_then(|v| v.as_array())
        .ok_or(ImportError::MissingVisitedIds)?
        .iter()
        .filter_map(|v| v.as_u64())
        .filter_map(|id| ParkId::try_from(id).ok())
        .collect();

    let export_date = doc
        .get("exportDate")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    Ok(IncomingSnapshot { ids, export_date })
}

pub fn read_import(path: &Path) -> Result<IncomingSnapshot, ImportError> {
    let content = fs::read_to_string(path)?;
    parse_import(&content)
}
