use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use std::path::PathBuf;

use crate::catalog::ParkId;
use crate::list::SortMode;
use crate::map::{HitGrid, Viewport};
use crate::tracker::{ImportPreview, Tracker};
use crate::ui::Theme;

/// Panel receiving navigation keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Map,
    List,
}

/// Dialog drawn over the whole screen; it captures every key while open
#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    ConfirmClear,
    ConfirmImport(ImportPreview),
    ImportPath(String),
    Alert(String),
}

/// Everything a key press or click can ask for
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Quit,
    SwitchFocus,
    Pan(i32, i32),
    ZoomIn,
    ZoomOut,
    ResetView,
    SelectNext,
    SelectPrevious,
    PageDown,
    PageUp,
    SelectFirst,
    SelectLast,
    Toggle(ParkId),
    /// Map click: toggle and show the park's details
    ToggleAndShow(ParkId),
    /// List click: select the row, then toggle
    ToggleRow(ParkId),
    ShowDetails(ParkId),
    ClosePopup,
    CycleSort,
    SetSort(SortMode),
    RequestClear,
    ConfirmClear,
    Export,
    BeginImport,
    InsertChar(char),
    DeleteChar,
    SubmitImport,
    ConfirmImport,
    Dismiss,
}

pub struct App {
    pub tracker: Tracker,
    pub viewport: Viewport,
    /// Fit the viewport to all parks on the next draw
    pub pending_fit: bool,
    pub focus: Focus,
    pub modal: Option<Modal>,
    /// One-line feedback shown in the status bar
    pub status: Option<String>,
    pub theme: Theme,
    pub export_dir: PathBuf,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position
    pub mouse_pos: Option<(u16, u16)>,
    drag_moved: bool,
    /// Inner map area of the last draw
    pub map_area: Rect,
    /// Detail popup area of the last draw; it hides the map beneath it
    pub popup_area: Option<Rect>,
    /// Hit grid of the last drawn map frame
    pub hits: HitGrid,
}

impl App {
    pub fn new(tracker: Tracker, export_dir: PathBuf, theme: Theme) -> Self {
        // Sized properly on the first draw
        let (lon, lat) = tracker
            .map()
            .bounds()
            .map(|b| b.center())
            .unwrap_or((-122.1, 37.8));

        Self {
            tracker,
            viewport: Viewport::new(lon, lat, 1.0, 0, 0),
            pending_fit: true,
            focus: Focus::Map,
            modal: None,
            status: None,
            theme,
            export_dir,
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
            drag_moved: false,
            map_area: Rect::default(),
            popup_area: None,
            hits: HitGrid::new(0, 0),
        }
    }

    /// Translate a key press into an action for the current focus and modal
    pub fn key_action(&self, key: KeyEvent) -> Option<Action> {
        if let Some(modal) = &self.modal {
            return match (modal, key.code) {
                (Modal::ImportPath(_), KeyCode::Enter) => Some(Action::SubmitImport),
                (Modal::ImportPath(_), KeyCode::Esc) => Some(Action::Dismiss),
                (Modal::ImportPath(_), KeyCode::Backspace) => Some(Action::DeleteChar),
                (Modal::ImportPath(_), KeyCode::Char(c)) => Some(Action::InsertChar(c)),
                (Modal::ImportPath(_), _) => None,
                (Modal::Alert(_), _) => Some(Action::Dismiss),
                (Modal::ConfirmClear, KeyCode::Char('y') | KeyCode::Enter) => Some(Action::ConfirmClear),
                (Modal::ConfirmImport(_), KeyCode::Char('y') | KeyCode::Enter) => {
                    Some(Action::ConfirmImport)
                }
                (_, KeyCode::Char('n') | KeyCode::Esc) => Some(Action::Dismiss),
                _ => None,
            };
        }

        let popup_park = self.tracker.map().popup().map(|p| p.park_id);
        let action = match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc if popup_park.is_some() => Action::ClosePopup,
            KeyCode::Esc => Action::Quit,
            KeyCode::Tab | KeyCode::BackTab => Action::SwitchFocus,

            KeyCode::Char('+') | KeyCode::Char('=') => Action::ZoomIn,
            KeyCode::Char('-') | KeyCode::Char('_') => Action::ZoomOut,
            KeyCode::Char('r') | KeyCode::Char('0') => Action::ResetView,

            KeyCode::Char('s') => Action::CycleSort,
            KeyCode::Char('1') => Action::SetSort(SortMode::Alphabetical),
            KeyCode::Char('2') => Action::SetSort(SortMode::City),
            KeyCode::Char('3') => Action::SetSort(SortMode::Visited),

            KeyCode::Char('c') => Action::RequestClear,
            KeyCode::Char('e') => Action::Export,
            KeyCode::Char('i') => Action::BeginImport,
            KeyCode::Char('v') => Action::Toggle(popup_park?),
            KeyCode::Char('o') => Action::ShowDetails(self.tracker.list().selected_park()?),

            code => match self.focus {
                Focus::Map => Self::map_key(code, popup_park)?,
                Focus::List => self.list_key(code)?,
            },
        };
        Some(action)
    }

    fn map_key(code: KeyCode, popup_park: Option<ParkId>) -> Option<Action> {
        let action = match code {
            KeyCode::Left | KeyCode::Char('h') => Action::Pan(-10, 0),
            KeyCode::Right | KeyCode::Char('l') => Action::Pan(10, 0),
            KeyCode::Up | KeyCode::Char('k') => Action::Pan(0, -6),
            KeyCode::Down | KeyCode::Char('j') => Action::Pan(0, 6),
            KeyCode::Enter | KeyCode::Char(' ') => Action::Toggle(popup_park?),
            _ => return None,
        };
        Some(action)
    }

    fn list_key(&self, code: KeyCode) -> Option<Action> {
        let action = match code {
            KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
            KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::Home | KeyCode::Char('g') => Action::SelectFirst,
            KeyCode::End | KeyCode::Char('G') => Action::SelectLast,
            KeyCode::Enter | KeyCode::Char(' ') => Action::Toggle(self.tracker.list().selected_park()?),
            _ => return None,
        };
        Some(action)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = self.key_action(key) {
            self.dispatch(action);
        }
    }

    /// Apply one action to the tracker or the UI state
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwitchFocus => {
                self.focus = match self.focus {
                    Focus::Map => Focus::List,
                    Focus::List => Focus::Map,
                }
            }
            Action::Pan(dx, dy) => self.viewport.pan(dx, dy),
            Action::ZoomIn => self.viewport.zoom_in(),
            Action::ZoomOut => self.viewport.zoom_out(),
            Action::ResetView => self.pending_fit = true,

            Action::SelectNext => self.tracker.list_mut().select_next(),
            Action::SelectPrevious => self.tracker.list_mut().select_previous(),
            Action::PageDown => self.tracker.list_mut().page_down(),
            Action::PageUp => self.tracker.list_mut().page_up(),
            Action::SelectFirst => self.tracker.list_mut().select_first(),
            Action::SelectLast => self.tracker.list_mut().select_last(),

            Action::Toggle(id) => {
                self.tracker.toggle_visit(id);
            }
            Action::ToggleAndShow(id) => {
                if self.tracker.toggle_visit(id) {
                    self.tracker.show_details(id);
                }
            }
            Action::ToggleRow(id) => {
                self.focus = Focus::List;
                self.tracker.list_mut().select_park(id);
                self.tracker.toggle_visit(id);
            }
            Action::ShowDetails(id) => self.show_details(id),
            Action::ClosePopup => self.tracker.map_mut().close_popup(),

            Action::CycleSort => {
                let next = self.tracker.sort_mode().next();
                self.tracker.set_sort_mode(next);
            }
            Action::SetSort(mode) => self.tracker.set_sort_mode(mode),

            Action::RequestClear => self.modal = Some(Modal::ConfirmClear),
            Action::ConfirmClear => {
                self.modal = None;
                self.tracker.clear_all();
                self.status = Some("Cleared all visited parks".to_string());
            }
            Action::Export => self.export(),
            Action::BeginImport => self.modal = Some(Modal::ImportPath(String::new())),
            Action::InsertChar(c) => {
                if let Some(Modal::ImportPath(input)) = &mut self.modal {
                    input.push(c);
                }
            }
            Action::DeleteChar => {
                if let Some(Modal::ImportPath(input)) = &mut self.modal {
                    input.pop();
                }
            }
            Action::SubmitImport => self.submit_import(),
            Action::ConfirmImport => match self.modal.take() {
                Some(Modal::ConfirmImport(preview)) => {
                    let count = preview.incoming_count;
                    self.tracker.apply_import(preview);
                    self.status = Some(format!("Imported {} visited parks", count));
                }
                other => self.modal = other,
            },
            Action::Dismiss => self.modal = None,
        }

        if let Some(err) = self.tracker.take_save_error() {
            self.status = Some(err);
        }
    }

    /// Open a park's details and center the map on it
    fn show_details(&mut self, id: ParkId) {
        self.tracker.show_details(id);
        if let Some(park) = self.tracker.catalog().get(id).filter(|p| p.has_location()) {
            self.viewport.center_lon = park.lng;
            self.viewport.center_lat = park.lat;
        }
    }

    fn export(&mut self) {
        let date = Utc::now().date_naive();
        match self.tracker.export_snapshot(&self.export_dir, date) {
            Ok(path) => self.status = Some(format!("Exported progress to {}", path.display())),
            Err(err) => {
                log::error!("export failed: {:#}", err);
                self.modal = Some(Modal::Alert(format!("Export failed: {:#}", err)));
            }
        }
    }

    fn submit_import(&mut self) {
        let Some(Modal::ImportPath(input)) = self.modal.take() else {
            return;
        };
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        let path = expand_home(input);
        self.modal = Some(match self.tracker.preview_import(&path) {
            Ok(preview) => Modal::ConfirmImport(preview),
            Err(err) => Modal::Alert(format!("Error importing file: {}", err)),
        });
    }

    /// Map cell under a terminal position; cells covered by the popup are
    /// not part of the map
    pub fn map_cell(&self, col: u16, row: u16) -> Option<(usize, usize)> {
        if self.over_popup(col, row) {
            return None;
        }
        let area = self.map_area;
        if col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height {
            Some(((col - area.x) as usize, (row - area.y) as usize))
        } else {
            None
        }
    }

    fn over_popup(&self, col: u16, row: u16) -> bool {
        match self.popup_area {
            Some(area) if self.tracker.map().popup().is_some() => {
                col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
            }
            _ => false,
        }
    }

    /// Convert terminal coords to braille pixel coords; each cell is 2x4 pixels
    fn map_pixel(&self, col: u16, row: u16) -> (i32, i32) {
        let px = (col.saturating_sub(self.map_area.x) as i32) * 2;
        let py = (row.saturating_sub(self.map_area.y) as i32) * 4;
        (px, py)
    }

    /// Scroll up: zoom the map towards the cursor, or move the list selection
    pub fn scroll_up(&mut self, col: u16, row: u16) {
        if self.map_cell(col, row).is_some() {
            let (px, py) = self.map_pixel(col, row);
            self.viewport.zoom_in_at(px, py);
        } else if self.tracker.list().row_at(col, row).is_some() {
            self.tracker.list_mut().select_previous();
        }
    }

    pub fn scroll_down(&mut self, col: u16, row: u16) {
        if self.map_cell(col, row).is_some() {
            let (px, py) = self.map_pixel(col, row);
            self.viewport.zoom_out_at(px, py);
        } else if self.tracker.list().row_at(col, row).is_some() {
            self.tracker.list_mut().select_next();
        }
    }

    /// Left button pressed; drags only start on the map
    pub fn begin_drag(&mut self, col: u16, row: u16) {
        self.drag_moved = false;
        self.last_mouse = self.map_cell(col, row).map(|_| (col, row));
    }

    /// Pan the map while dragging
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            if dx != 0 || dy != 0 {
                self.drag_moved = true;
                // Cells are 2x4 pixels; follow the cursor
                self.viewport.pan(dx * 2, dy * 4);
            }
            self.last_mouse = Some((x, y));
        }
    }

    /// Left button released; a release without movement is a click
    pub fn end_drag(&mut self, col: u16, row: u16) {
        if !self.drag_moved {
            self.click(col, row);
        }
        self.last_mouse = None;
        self.drag_moved = false;
    }

    /// What a click at a terminal position means
    pub fn click_action(&self, col: u16, row: u16) -> Option<Action> {
        if let Some((c, r)) = self.map_cell(col, row) {
            return match self.hits.at(c, r) {
                Some(id) => Some(Action::ToggleAndShow(id)),
                None if self.tracker.map().popup().is_some() => Some(Action::ClosePopup),
                None => None,
            };
        }
        self.tracker.list().row_at(col, row).map(Action::ToggleRow)
    }

    pub fn click(&mut self, col: u16, row: u16) {
        if self.modal.is_some() {
            return;
        }
        if let Some(action) = self.click_action(col, row) {
            self.dispatch(action);
        }
    }

    /// Track the cursor and emphasize the park under it
    pub fn hover(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
        let hovered = self.map_cell(col, row).and_then(|(c, r)| self.hits.at(c, r));
        self.tracker.map_mut().set_hover(hovered);
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.3}°{}, {:.3}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    /// Name of the park under the cursor
    pub fn hovered_name(&self) -> Option<&str> {
        let id = self.tracker.map().hovered()?;
        self.tracker.catalog().get(id).map(|p| p.name.as_str())
    }
}

/// Expand a leading `~` to the home directory, as a shell would
pub fn expand_home(input: &str) -> PathBuf {
    let rest = match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(input),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryFeature;
    use crate::catalog::tests::park;
    use crate::catalog::Catalog;
    use crate::persistence::{KeyValueStore, MemoryStore, VisitedStore, VISITED_KEY};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(memory: &MemoryStore) -> App {
        let catalog = Catalog::new(vec![
            park(1, "Alpha", "Oakland", 10.0),
            park(2, "Bravo", "Berkeley", 20.0),
            park(3, "Charlie", "Fremont", 30.0),
        ])
        .unwrap();
        let features: Vec<BoundaryFeature> = Vec::new();
        let tracker = Tracker::new(
            catalog,
            &features,
            VisitedStore::new(Box::new(memory.clone())),
            SortMode::Alphabetical,
        );
        let mut app = App::new(tracker, PathBuf::from("."), Theme::default());
        app.map_area = Rect::new(1, 1, 40, 20);
        app.viewport.width = 80;
        app.viewport.height = 80;
        app.hits = HitGrid::new(40, 20);
        app
    }

    #[test]
    fn test_map_click_toggles_and_opens_popup() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.hits.claim(5, 5, 2);

        app.begin_drag(6, 6);
        app.end_drag(6, 6);
        assert!(app.tracker.is_visited(2));
        let popup = app.tracker.map().popup().unwrap();
        assert_eq!(popup.park_id, 2);
        assert_eq!(popup.action_label, "Mark as Not Visited");
        assert_eq!(memory.get(VISITED_KEY).as_deref(), Some("[2]"));

        // Popup action flips it back
        app.handle_key(key(KeyCode::Char('v')));
        assert!(!app.tracker.is_visited(2));
        assert_eq!(app.tracker.map().popup().unwrap().action_label, "Mark as Visited");
    }

    #[test]
    fn test_drag_does_not_toggle() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.hits.claim(5, 5, 2);
        let before = app.viewport.center_lon;

        app.begin_drag(6, 6);
        app.handle_drag(9, 6);
        app.end_drag(9, 6);
        assert!(!app.tracker.is_visited(2));
        assert_ne!(app.viewport.center_lon, before);
    }

    #[test]
    fn test_empty_map_click_closes_popup() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.tracker.show_details(1);
        app.click(20, 15);
        assert!(app.tracker.map().popup().is_none());
        assert!(app.tracker.visited().is_empty());
    }

    #[test]
    fn test_list_click_selects_and_toggles() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.tracker.list_mut().area = Rect::new(50, 2, 30, 10);

        app.click(55, 4);
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.tracker.list().selected_park(), Some(3));
        assert!(app.tracker.is_visited(3));
    }

    #[test]
    fn test_list_keys_toggle_selected() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.tracker.is_visited(2));
    }

    #[test]
    fn test_hover_follows_hits() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.hits.claim(0, 0, 1);
        app.hover(1, 1);
        assert_eq!(app.hovered_name(), Some("Alpha"));
        app.hover(30, 10);
        assert_eq!(app.hovered_name(), None);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.tracker.toggle_visit(1);
        app.tracker.toggle_visit(2);

        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.modal, Some(Modal::ConfirmClear));
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.modal, None);
        assert_eq!(app.tracker.visited().len(), 2);

        app.handle_key(key(KeyCode::Char('c')));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.tracker.visited().is_empty());
        assert_eq!(memory.get(VISITED_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_modal_blocks_clicks() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.hits.claim(0, 0, 1);
        app.modal = Some(Modal::ConfirmClear);
        app.click(1, 1);
        assert!(!app.tracker.is_visited(1));
    }

    #[test]
    fn test_export_then_import_through_prompt() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        let dir = tempfile::tempdir().unwrap();
        app.export_dir = dir.path().to_path_buf();
        app.tracker.toggle_visit(1);
        app.tracker.toggle_visit(3);

        app.handle_key(key(KeyCode::Char('e')));
        let exported = std::fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap().path();
        assert!(app.status.as_deref().unwrap().starts_with("Exported progress"));

        app.tracker.clear_all();
        app.handle_key(key(KeyCode::Char('i')));
        for c in exported.to_string_lossy().chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        let Some(Modal::ConfirmImport(preview)) = &app.modal else {
            panic!("expected import confirmation, got {:?}", app.modal);
        };
        assert_eq!((preview.current_count, preview.incoming_count), (0, 2));

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.modal, None);
        assert_eq!(app.tracker.visited().iter().copied().collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn test_bad_import_shows_alert() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.tracker.toggle_visit(2);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"totalParks": 3}"#).unwrap();

        app.dispatch(Action::BeginImport);
        for c in path.to_string_lossy().chars() {
            app.dispatch(Action::InsertChar(c));
        }
        app.dispatch(Action::SubmitImport);
        let Some(Modal::Alert(message)) = &app.modal else {
            panic!("expected alert");
        };
        assert!(message.contains("missing visitedParkIds"));
        assert_eq!(app.tracker.visited().iter().copied().collect::<Vec<_>>(), [2]);

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.modal, None);
    }

    #[test]
    fn test_escape_closes_popup_before_quitting() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.tracker.show_details(1);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.tracker.map().popup().is_none());
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/a.json"), PathBuf::from("/tmp/a.json"));
        assert_eq!(expand_home("~other/a.json"), PathBuf::from("~other/a.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/Downloads/a.json"), home.join("Downloads/a.json"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn test_popup_hides_map_cells() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.hits.claim(5, 5, 2);
        app.tracker.show_details(1);
        app.popup_area = Some(Rect::new(4, 4, 10, 6));

        app.hover(6, 6);
        assert_eq!(app.hovered_name(), None);
        app.click(6, 6);
        assert!(app.tracker.visited().is_empty());
        assert_eq!(app.tracker.map().popup().map(|p| p.park_id), Some(1));

        // Once the popup is closed the cell is reachable again
        app.tracker.map_mut().close_popup();
        app.click(6, 6);
        assert!(app.tracker.is_visited(2));
    }

    #[test]
    fn test_sort_keys() {
        let memory = MemoryStore::new();
        let mut app = app_with(&memory);
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.tracker.sort_mode(), SortMode::City);
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.tracker.sort_mode(), SortMode::Visited);
    }
}
