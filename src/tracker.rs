use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryFeature;
use crate::catalog::{Catalog, ParkId};
use crate::error::ImportError;
use crate::list::{ListView, SortMode};
use crate::map::MapView;
use crate::persistence::{read_import, IncomingSnapshot, Snapshot, VisitedStore};

/// Ids of visited parks, always a subset of the catalog
pub type VisitedSet = BTreeSet<ParkId>;

/// Progress counters shown in the stats panel
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub visited: usize,
    pub total: usize,
    pub percentage: u32,
    pub total_acres: f64,
    pub visited_acres: f64,
}

impl Stats {
    pub fn compute(catalog: &Catalog, visited: &VisitedSet) -> Self {
        let total_acres = catalog.iter().map(|p| p.acres).sum();
        let visited_acres = catalog
            .iter()
            .filter(|p| visited.contains(&p.id))
            .map(|p| p.acres)
            .sum();

        Self {
            visited: visited.len(),
            total: catalog.len(),
            percentage: percentage(visited.len(), catalog.len()),
            total_acres,
            visited_acres,
        }
    }

    /// Progress bar fill in [0, 1]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.visited as f64 / self.total as f64).clamp(0.0, 1.0)
        }
    }
}

/// Rounded share of `part` in `total`, 0 for an empty total
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

/// A validated import waiting for the user's confirmation
#[derive(Clone, Debug, PartialEq)]
pub struct ImportPreview {
    pub current_count: usize,
    pub incoming_count: usize,
    pub unknown_count: usize,
    pub export_date: Option<String>,
    ids: VisitedSet,
}

impl ImportPreview {
    pub fn summary(&self) -> String {
        let date = self.export_date.as_deref().unwrap_or("an unknown date");
        let mut text = format!(
            "This will replace your current progress ({} parks visited) with imported data ({} parks visited) from {}.",
            self.current_count, self.incoming_count, date
        );
        if self.unknown_count > 0 {
            text.push_str(&format!(" {} unknown park ids will be ignored.", self.unknown_count));
        }
        text
    }
}

/// Owns the visited set and sort mode; every mutation goes through here
/// and is pushed to the map, the list, the stats and the store.
pub struct Tracker {
    catalog: Catalog,
    visited: VisitedSet,
    sort_mode: SortMode,
    map: MapView,
    list: ListView,
    stats: Stats,
    store: VisitedStore,
    save_error: Option<String>,
}

impl Tracker {
    pub fn new(
        catalog: Catalog,
        features: &[BoundaryFeature],
        store: VisitedStore,
        sort_mode: SortMode,
    ) -> Self {
        let visited = store.load(&catalog);
        let map = MapView::build(&catalog, features, &visited);
        let list = ListView::new(&catalog, &visited, sort_mode);
        let stats = Stats::compute(&catalog, &visited);

        Self {
            catalog,
            visited,
            sort_mode,
            map,
            list,
            stats,
            store,
            save_error: None,
        }
    }

    /// Flip one park. Unknown ids are ignored; returns whether anything changed.
    pub fn toggle_visit(&mut self, id: ParkId) -> bool {
        let Some(park) = self.catalog.get(id) else {
            log::debug!("ignoring toggle of unknown park {}", id);
            return false;
        };

        let visited = if self.visited.remove(&id) {
            false
        } else {
            self.visited.insert(id);
            true
        };
        log::info!("{} marked {}", park.name, if visited { "visited" } else { "not visited" });

        self.map.update_visual_state(park, visited);
        self.list.sync_row(id, visited);
        self.stats = self.compute_stats();
        self.persist();
        true
    }

    /// Forget every visit. Callers confirm with the user first.
    pub fn clear_all(&mut self) {
        log::info!("clearing {} visited parks", self.visited.len());
        self.visited.clear();
        self.refresh_all();
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.list.rebuild(&self.catalog, &self.visited, mode);
    }

    pub fn compute_stats(&self) -> Stats {
        Stats::compute(&self.catalog, &self.visited)
    }

    /// Export document for `date`
    pub fn snapshot(&self, date: NaiveDate) -> Snapshot {
        Snapshot::build(&self.catalog, &self.visited, &self.stats, date)
    }

    /// Write `ebrp-progress-<date>.json` into `dir`
    pub fn export_snapshot(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        let path = self.snapshot(date).write_to_dir(dir)?;
        log::info!("exported progress to {}", path.display());
        Ok(path)
    }

    /// Read and validate an import file without touching state
    pub fn preview_import(&self, path: &Path) -> Result<ImportPreview, ImportError> {
        let incoming = read_import(path).inspect_err(|err| {
            log::warn!("rejected import {}: {}", path.display(), err);
        })?;
        Ok(self.preview(incoming))
    }

    /// Resolve incoming ids against the catalog
    pub fn preview(&self, incoming: IncomingSnapshot) -> ImportPreview {
        let unknown_count = incoming
            .ids
            .iter()
            .filter(|id| !self.catalog.contains(**id))
            .count();
        let ids: VisitedSet = incoming
            .ids
            .into_iter()
            .filter(|id| self.catalog.contains(*id))
            .collect();

        ImportPreview {
            current_count: self.visited.len(),
            incoming_count: ids.len(),
            unknown_count,
            export_date: incoming.export_date,
            ids,
        }
    }

    /// Replace the visited set with a confirmed import
    pub fn apply_import(&mut self, preview: ImportPreview) {
        log::info!(
            "importing {} visited parks (replacing {})",
            preview.ids.len(),
            self.visited.len()
        );
        self.visited = preview.ids;
        self.refresh_all();
    }

    /// Push the whole visited set to every view, then recompute and save
    fn refresh_all(&mut self) {
        for park in self.catalog.iter() {
            self.map.update_visual_state(park, self.visited.contains(&park.id));
        }
        self.list.rebuild(&self.catalog, &self.visited, self.sort_mode);
        self.stats = self.compute_stats();
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.visited) {
            log::error!("failed to save progress: {:#}", err);
            self.save_error = Some(format!("Could not save progress: {:#}", err));
        }
    }

    /// Last save failure, cleared once taken
    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }

    pub fn is_visited(&self, id: ParkId) -> bool {
        self.visited.contains(&id)
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapView {
        &mut self.map
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    /// Open the detail popup for a park
    pub fn show_details(&mut self, id: ParkId) {
        if let Some(park) = self.catalog.get(id) {
            self.map.open_popup(park, self.visited.contains(&id));
        }
    }
}
