use std::str::FromStr;

use crate::app::{App, Focus, Modal};
use crate::braille::{bits_of, glyph, BrailleCanvas};
use crate::config::ThemeSettings;
use crate::map::{MapFrame, PlacedMarker, Popup, ShapeStyle, LAYER_COUNT};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};

const SIDE_PANEL_WIDTH: u16 = 44;
const MARKER_GLYPH: char = '●';

/// Fixed colors for the two visit states
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub visited: Color,
    pub unvisited: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            visited: Color::Rgb(0xFF, 0xC1, 0x07),
            unvisited: Color::Rgb(0x4C, 0xAF, 0x50),
        }
    }
}

impl Theme {
    /// Parse configured colors; invalid values fall back to the defaults
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let defaults = Self::default();
        Self {
            visited: parse_color(&settings.visited, defaults.visited),
            unvisited: parse_color(&settings.unvisited, defaults.unvisited),
        }
    }

    pub fn color(&self, visited: bool) -> Color {
        if visited {
            self.visited
        } else {
            self.unvisited
        }
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        log::warn!("invalid theme color {:?}, using default", value);
        fallback
    })
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Split into main area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map and side panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(chunks[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(main[1]);

    render_map(frame, app, main[0]);
    render_stats(frame, app, side[0]);
    render_list(frame, app, side[1]);
    render_status_bar(frame, app, chunks[1]);

    if let Some(modal) = &app.modal {
        render_modal(frame, modal, area);
    }
}

fn panel(title: String, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

fn render_map(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel(" East Bay Regional Parks ".to_string(), app.focus == Focus::Map);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Braille gives 2x4 resolution per character
    app.map_area = inner;
    app.viewport.width = inner.width as usize * 2;
    app.viewport.height = inner.height as usize * 4;

    if app.pending_fit && inner.width > 0 && inner.height > 0 {
        if let Some(bounds) = app.tracker.map().bounds() {
            app.viewport.fit_bounds(&bounds);
        }
        app.pending_fit = false;
    }

    let MapFrame { layers, markers, hits } =
        app.tracker
            .map()
            .render(&app.viewport, inner.width as usize, inner.height as usize);
    app.hits = hits;

    frame.render_widget(
        MapWidget {
            layers,
            markers,
            theme: app.theme,
        },
        inner,
    );

    app.popup_area = app.tracker.map().popup().and_then(|popup| {
        let visited = app.tracker.is_visited(popup.park_id);
        render_popup(frame, popup, visited, &app.theme, inner)
    });
}

/// Braille map with park markers overlaid
struct MapWidget {
    layers: [BrailleCanvas; LAYER_COUNT],
    markers: Vec<PlacedMarker>,
    theme: Theme,
}

impl MapWidget {
    /// Render a braille layer, merging dots with what is already drawn
    fn render_layer(&self, canvas: &BrailleCanvas, style: Style, area: Rect, buf: &mut Buffer) {
        for (col, row, _) in canvas.glyphs() {
            if col >= area.width as usize || row >= area.height as usize {
                continue;
            }
            let cell = &mut buf[(area.x + col as u16, area.y + row as u16)];
            let existing = cell.symbol().chars().next().and_then(bits_of).unwrap_or(0);
            cell.set_char(glyph(existing | canvas.bits(col, row)))
                .set_style(style);
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plain layers first, emphasized (hovered) layers on top
        for (layer, canvas) in self.layers.iter().enumerate() {
            let shape = ShapeStyle::from_layer(layer);
            let mut style = Style::default().fg(self.theme.color(shape.visited));
            if shape.emphasized {
                style = style.add_modifier(Modifier::BOLD);
            }
            self.render_layer(canvas, style, area, buf);
        }

        for marker in &self.markers {
            if marker.col >= area.width || marker.row >= area.height {
                continue;
            }
            buf[(area.x + marker.col, area.y + marker.row)]
                .set_char(MARKER_GLYPH)
                .set_fg(self.theme.color(marker.style.visited));
        }
    }
}

/// Draw the detail popup in the map's top-right corner, returning its area
fn render_popup(
    frame: &mut Frame,
    popup: &Popup,
    visited: bool,
    theme: &Theme,
    map_area: Rect,
) -> Option<Rect> {
    let width = map_area.width.min(48);
    let height = (popup.lines.len() as u16 + 8).min(map_area.height);
    if width < 10 || height < 4 {
        return None;
    }
    let area = Rect::new(map_area.x + map_area.width - width, map_area.y, width, height);

    let label = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = popup
        .lines
        .iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", name), label),
                Span::raw(value.clone()),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("[v] ", label),
        Span::styled(
            popup.action_label,
            Style::default()
                .fg(theme.color(!visited))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [Esc] close", label),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.color(visited)))
        .title(Span::styled(
            format!(" {} ", popup.title),
            Style::default().add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
    Some(area)
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel(" Progress ".to_string(), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let stats = app.tracker.stats();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(app.theme.visited).add_modifier(Modifier::BOLD);

    let counts = Line::from(vec![
        Span::styled(" Visited ", label),
        Span::styled(stats.visited.to_string(), value),
        Span::styled(" / ", label),
        Span::raw(stats.total.to_string()),
        Span::styled(format!("  ({}%)", stats.percentage), label),
    ]);
    let acres = Line::from(vec![
        Span::styled(" Acres   ", label),
        Span::styled(group_thousands(stats.visited_acres), value),
        Span::styled(" / ", label),
        Span::raw(group_thousands(stats.total_acres)),
    ]);
    frame.render_widget(Paragraph::new(counts), rows[0]);
    frame.render_widget(Paragraph::new(acres), rows[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.visited).bg(Color::DarkGray))
        .ratio(stats.ratio())
        .label(format!("{}%", stats.percentage));
    frame.render_widget(gauge, rows[2]);
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(" Parks · {} [s] ", app.tracker.sort_mode().label());
    let block = panel(title, app.focus == Focus::List);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let city = Style::default().fg(Color::DarkGray);
    let items: Vec<ListItem> = app
        .tracker
        .list()
        .rows()
        .iter()
        .map(|row| {
            let mark = if row.checked { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(app.theme.color(row.checked))),
                Span::raw(row.name.clone()),
                Span::styled(format!(" ({})", row.city), city),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let view = app.tracker.list_mut();
    view.area = inner;
    frame.render_stateful_widget(list, inner, &mut view.state);
}

fn render_modal(frame: &mut Frame, modal: &Modal, screen: Rect) {
    let hint = Style::default().fg(Color::DarkGray);
    let (title, mut lines) = match modal {
        Modal::ConfirmClear => (
            " Clear progress ",
            vec![
                Line::raw("Are you sure you want to clear all visited parks?"),
                Line::raw("This cannot be undone."),
            ],
        ),
        Modal::ConfirmImport(preview) => (
            " Import progress ",
            vec![Line::raw(preview.summary()), Line::raw("Continue?")],
        ),
        Modal::ImportPath(input) => (
            " Import progress ",
            vec![
                Line::raw("Path to an exported progress file:"),
                Line::from(vec![
                    Span::styled("> ", hint),
                    Span::raw(input.clone()),
                    Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                ]),
            ],
        ),
        Modal::Alert(message) => (" Notice ", vec![Line::raw(message.clone())]),
    };

    lines.push(Line::default());
    lines.push(Line::styled(
        match modal {
            Modal::ConfirmClear | Modal::ConfirmImport(_) => "[y] yes   [n] no",
            Modal::ImportPath(_) => "[Enter] import   [Esc] cancel",
            Modal::Alert(_) => "press any key",
        },
        hint,
    ));

    let area = centered(screen, 64, 10);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
    ];

    if let Some(name) = app.hovered_name() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(name.to_string(), Style::default().fg(Color::White)));
    }

    match &app.status {
        Some(status) => {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(status.clone(), Style::default().fg(Color::Magenta)));
        }
        None => spans.push(Span::styled(
            " | tab:focus space:toggle s:sort c:clear e:export i:import q:quit",
            Style::default().fg(Color::DarkGray),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Rect of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Whole acres with thousands separators
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.max(0.0));
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use crate::catalog::Catalog;
    use crate::list::SortMode;
    use crate::persistence::{MemoryStore, VisitedStore};
    use crate::tracker::Tracker;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn builtin_app() -> App {
        let tracker = Tracker::new(
            Catalog::builtin(),
            &[],
            VisitedStore::new(Box::new(MemoryStore::new())),
            SortMode::Alphabetical,
        );
        App::new(tracker, PathBuf::from("."), Theme::default())
    }

    #[test]
    fn test_render_fits_map_and_records_areas() {
        let mut app = builtin_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        assert!(!app.pending_fit);
        assert_eq!(app.map_area, Rect::new(1, 1, 120 - SIDE_PANEL_WIDTH - 2, 37));
        assert_eq!(app.viewport.width, app.map_area.width as usize * 2);
        assert!(app.tracker.list().area.height > 0);

        let text = screen_text(&terminal);
        assert!(text.contains("East Bay Regional Parks"));
        assert!(text.contains("[ ] "));
        assert!(text.contains(MARKER_GLYPH));
    }

    #[test]
    fn test_rendered_markers_are_clickable() {
        let mut app = builtin_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let area = app.map_area;
        let (x, y) = (area.y..area.y + area.height)
            .flat_map(|y| (area.x..area.x + area.width).map(move |x| (x, y)))
            .find(|&(x, y)| buffer[(x, y)].symbol() == MARKER_GLYPH.to_string())
            .unwrap();

        app.click(x, y);
        let popup = app.tracker.map().popup().unwrap();
        assert!(app.tracker.is_visited(popup.park_id));
    }

    #[test]
    fn test_popup_click_leaves_hidden_park_alone() {
        let mut app = builtin_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let first = app.tracker.catalog().ids().next().unwrap();
        app.dispatch(Action::ShowDetails(first));
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        let popup = app.popup_area.unwrap();

        // Put a park under every popup cell so any leak would toggle it
        let hidden = app.tracker.catalog().ids().nth(1).unwrap();
        for y in popup.y..popup.y + popup.height {
            for x in popup.x..popup.x + popup.width {
                let (col, row) = (x - app.map_area.x, y - app.map_area.y);
                app.hits.claim(col as usize, row as usize, hidden);
            }
        }

        let (x, y) = (popup.x + popup.width / 2, popup.y + popup.height / 2);
        app.hover(x, y);
        assert_eq!(app.tracker.map().hovered(), None);
        app.begin_drag(x, y);
        app.end_drag(x, y);

        assert!(app.tracker.visited().is_empty());
        assert_eq!(app.tracker.map().popup().map(|p| p.park_id), Some(first));
    }

    #[test]
    fn test_closed_popup_frees_its_area() {
        let mut app = builtin_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let first = app.tracker.catalog().ids().next().unwrap();
        app.dispatch(Action::ShowDetails(first));
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        assert!(app.popup_area.is_some());

        app.dispatch(Action::ClosePopup);
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        assert_eq!(app.popup_area, None);
    }

    #[test]
    fn test_modal_is_drawn() {
        let mut app = builtin_app();
        app.modal = Some(Modal::ConfirmClear);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        assert!(screen_text(&terminal).contains("clear all visited parks"));
    }

    #[test]
    fn test_theme_from_settings() {
        let theme = Theme::from_settings(&ThemeSettings {
            visited: "#102030".to_string(),
            unvisited: "not a color".to_string(),
        });
        assert_eq!(theme.visited, Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(theme.unvisited, Theme::default().unvisited);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(1234.0), "1,234");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
    }
}
