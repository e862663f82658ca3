use std::cmp::Ordering;

use clap::ValueEnum;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Park, ParkId};
use crate::tracker::VisitedSet;

/// Ordering of the checklist; never affects stored state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Alphabetical,
    City,
    Visited,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Alphabetical, SortMode::City, SortMode::Visited];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Alphabetical => "A-Z",
            SortMode::City => "City",
            SortMode::Visited => "Visited",
        }
    }

    /// Next mode in selector order
    pub fn next(self) -> Self {
        match self {
            SortMode::Alphabetical => SortMode::City,
            SortMode::City => SortMode::Visited,
            SortMode::Visited => SortMode::Alphabetical,
        }
    }
}

/// Caseless comparison with an exact tie break, standing in for a
/// locale collation
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Parks in display order for `mode`; the catalog itself is untouched
pub fn sorted_parks<'a>(catalog: &'a Catalog, visited: &VisitedSet, mode: SortMode) -> Vec<&'a Park> {
    let mut parks: Vec<&Park> = catalog.iter().collect();
    match mode {
        SortMode::Alphabetical => parks.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortMode::City => parks.sort_by(|a, b| {
            locale_cmp(&a.city, &b.city).then_with(|| locale_cmp(&a.name, &b.name))
        }),
        SortMode::Visited => parks.sort_by(|a, b| {
            let a_visited = visited.contains(&a.id);
            let b_visited = visited.contains(&b.id);
            b_visited
                .cmp(&a_visited)
                .then_with(|| locale_cmp(&a.name, &b.name))
        }),
    }
    parks
}

/// One checklist row
#[derive(Clone, Debug, PartialEq)]
pub struct ListRow {
    pub park_id: ParkId,
    pub name: String,
    pub city: String,
    pub checked: bool,
}

/// Sortable checklist of every park
#[derive(Default)]
pub struct ListView {
    rows: Vec<ListRow>,
    pub state: ListState,
    /// Inner area of the last render, for mouse hit-testing
    pub area: Rect,
}

impl ListView {
    pub fn new(catalog: &Catalog, visited: &VisitedSet, mode: SortMode) -> Self {
        let mut view = Self::default();
        view.rebuild(catalog, visited, mode);
        view
    }

    /// Full re-render; the selection stays on the same park when possible
    pub fn rebuild(&mut self, catalog: &Catalog, visited: &VisitedSet, mode: SortMode) {
        let selected = self.selected_park();
        self.rows = sorted_parks(catalog, visited, mode)
            .into_iter()
            .map(|p| ListRow {
                park_id: p.id,
                name: p.name.clone(),
                city: p.city.clone(),
                checked: visited.contains(&p.id),
            })
            .collect();

        let index = selected
            .and_then(|id| self.rows.iter().position(|r| r.park_id == id))
            .or(if self.rows.is_empty() { None } else { Some(0) });
        self.state.select(index);
    }

    /// Set one row's checkbox without reordering or moving the selection
    pub fn sync_row(&mut self, id: ParkId, checked: bool) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.park_id == id) {
            row.checked = checked;
        }
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn selected_park(&self) -> Option<ParkId> {
        self.state.selected().and_then(|i| self.rows.get(i)).map(|r| r.park_id)
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_previous(&mut self) {
        self.move_selection(-1);
    }

    pub fn page_down(&mut self) {
        self.move_selection(self.page_size());
    }

    pub fn page_up(&mut self) {
        self.move_selection(-self.page_size());
    }

    pub fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.state.select(Some(self.rows.len() - 1));
        }
    }

    fn page_size(&self) -> isize {
        (self.area.height as isize).max(1)
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.state.selected().unwrap_or(0) as isize;
        let last = self.rows.len() as isize - 1;
        self.state.select(Some((current + delta).clamp(0, last) as usize));
    }

    /// Park on the row under a terminal position, using the last render's
    /// area and scroll offset
    pub fn row_at(&self, col: u16, row: u16) -> Option<ParkId> {
        let area = self.area;
        if col < area.x || col >= area.x + area.width || row < area.y || row >= area.y + area.height {
            return None;
        }
        let index = self.state.offset() + (row - area.y) as usize;
        self.rows.get(index).map(|r| r.park_id)
    }

    /// Select the row showing `id`
    pub fn select_park(&mut self, id: ParkId) {
        if let Some(i) = self.rows.iter().position(|r| r.park_id == id) {
            self.state.select(Some(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::park;

    fn names(parks: &[&Park]) -> Vec<String> {
        parks.iter().map(|p| p.name.clone()).collect()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            park(1, "C Park", "Berkeley", 1.0),
            park(2, "a Park", "Oakland", 1.0),
            park(3, "B Park", "Berkeley", 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_alphabetical_is_caseless() {
        let catalog = catalog();
        let parks = sorted_parks(&catalog, &VisitedSet::new(), SortMode::Alphabetical);
        assert_eq!(names(&parks), ["a Park", "B Park", "C Park"]);
        // Catalog order untouched
        assert_eq!(catalog.ids().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_city_then_name() {
        let catalog = catalog();
        let parks = sorted_parks(&catalog, &VisitedSet::new(), SortMode::City);
        assert_eq!(names(&parks), ["B Park", "C Park", "a Park"]);
    }

    #[test]
    fn test_visited_first_then_name() {
        let catalog = Catalog::new(vec![
            park(1, "A", "X", 1.0),
            park(2, "B", "X", 1.0),
            park(3, "C", "X", 1.0),
        ])
        .unwrap();
        let visited: VisitedSet = [1, 3].into_iter().collect();
        let parks = sorted_parks(&catalog, &visited, SortMode::Visited);
        assert_eq!(names(&parks), ["A", "C", "B"]);
    }

    #[test]
    fn test_sync_row_keeps_order_and_selection() {
        let catalog = catalog();
        let mut list = ListView::new(&catalog, &VisitedSet::new(), SortMode::Visited);
        list.select_park(1);
        let order: Vec<_> = list.rows().iter().map(|r| r.park_id).collect();

        list.sync_row(1, true);
        assert_eq!(list.rows().iter().map(|r| r.park_id).collect::<Vec<_>>(), order);
        assert!(list.rows().iter().find(|r| r.park_id == 1).unwrap().checked);
        assert_eq!(list.selected_park(), Some(1));
    }

    #[test]
    fn test_rebuild_keeps_selected_park() {
        let catalog = catalog();
        let mut list = ListView::new(&catalog, &VisitedSet::new(), SortMode::Alphabetical);
        list.select_park(3);
        list.rebuild(&catalog, &VisitedSet::new(), SortMode::City);
        assert_eq!(list.selected_park(), Some(3));
    }

    #[test]
    fn test_selection_clamps() {
        let catalog = catalog();
        let mut list = ListView::new(&catalog, &VisitedSet::new(), SortMode::Alphabetical);
        list.select_previous();
        assert_eq!(list.state.selected(), Some(0));
        list.select_last();
        list.select_next();
        assert_eq!(list.state.selected(), Some(2));
    }

    #[test]
    fn test_row_at() {
        let catalog = catalog();
        let mut list = ListView::new(&catalog, &VisitedSet::new(), SortMode::Alphabetical);
        list.area = Rect::new(10, 5, 20, 2);
        assert_eq!(list.row_at(12, 5), Some(2));
        assert_eq!(list.row_at(12, 6), Some(3));
        assert_eq!(list.row_at(12, 7), None);
        assert_eq!(list.row_at(5, 5), None);
    }

    #[test]
    fn test_sort_mode_cycle() {
        let mut mode = SortMode::default();
        for expected in SortMode::ALL.iter().skip(1).chain(SortMode::ALL.iter().take(1)) {
            mode = mode.next();
            assert_eq!(mode, *expected);
        }
    }
}
