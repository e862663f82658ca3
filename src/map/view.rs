use std::collections::BTreeMap;

use crate::boundary::{BoundaryFeature, Ring};
use crate::braille::BrailleCanvas;
use crate::catalog::{Catalog, Park, ParkId};
use crate::map::geometry::{draw_line, draw_thick_line, fill_cells, Plot};
use crate::map::hit::HitGrid;
use crate::map::projection::{Bounds, Viewport};
use crate::tracker::VisitedSet;

/// Number of braille layers in a frame, one per [`ShapeStyle`]
pub const LAYER_COUNT: usize = 4;

/// Projected coordinates are clamped so Bresenham never walks absurd spans
const PIXEL_LIMIT: i32 = 1 << 20;

/// Visual state of one shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShapeStyle {
    pub visited: bool,
    pub emphasized: bool,
}

impl ShapeStyle {
    /// Layer index; emphasized layers are drawn last
    pub fn layer(self) -> usize {
        self.emphasized as usize * 2 + self.visited as usize
    }

    pub fn from_layer(layer: usize) -> Self {
        Self {
            visited: layer % 2 == 1,
            emphasized: layer >= 2,
        }
    }
}

/// One rendered boundary polygon
#[derive(Clone, Debug)]
pub struct PolygonHandle {
    rings: Vec<Ring>,
    bounds: Bounds,
    pub style: ShapeStyle,
}

impl PolygonHandle {
    fn new(rings: Vec<Ring>, visited: bool) -> Option<Self> {
        let first = rings.first()?.first()?;
        let mut bounds = Bounds::from_point(first.0, first.1);
        for &(lon, lat) in rings.iter().flatten() {
            bounds.extend(lon, lat);
        }
        Some(Self {
            rings,
            bounds,
            style: ShapeStyle { visited, emphasized: false },
        })
    }
}

/// Point marker for a park without boundary data
#[derive(Clone, Debug)]
pub struct MarkerHandle {
    pub lon: f64,
    pub lat: f64,
    pub style: ShapeStyle,
}

/// Visual handles owned by one park, resolved once at startup
#[derive(Clone, Debug)]
pub enum ShapeBinding {
    NoShape,
    Polygons(Vec<PolygonHandle>),
    Marker(MarkerHandle),
}

/// Detail popup for one park
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub park_id: ParkId,
    pub title: String,
    pub lines: Vec<(&'static str, String)>,
    pub action_label: &'static str,
}

impl Popup {
    fn new(park: &Park, visited: bool) -> Self {
        Self {
            park_id: park.id,
            title: park.name.clone(),
            lines: vec![
                ("City", park.city.clone()),
                ("County", park.county.clone()),
                ("Size", format!("{} acres", park.acres)),
                ("Description", park.description.clone()),
                ("Website", park.website.clone()),
            ],
            action_label: if visited { "Mark as Not Visited" } else { "Mark as Visited" },
        }
    }
}

/// A marker glyph placed on the character grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedMarker {
    pub col: u16,
    pub row: u16,
    pub style: ShapeStyle,
}

/// Everything the UI needs to draw one map frame
pub struct MapFrame {
    pub layers: [BrailleCanvas; LAYER_COUNT],
    pub markers: Vec<PlacedMarker>,
    pub hits: HitGrid,
}

/// Map of parks: one polygon set or marker per park
pub struct MapView {
    bindings: BTreeMap<ParkId, ShapeBinding>,
    hovered: Option<ParkId>,
    popup: Option<Popup>,
    unmatched_features: usize,
}

impl MapView {
    /// Bind boundary polygons to parks by exact name, then give every park
    /// that received none a point marker
    pub fn build(catalog: &Catalog, features: &[BoundaryFeature], visited: &VisitedSet) -> Self {
        let mut polygons: BTreeMap<ParkId, Vec<PolygonHandle>> = BTreeMap::new();
        let mut unmatched_features = 0;

        for feature in features {
            let Some(park) = catalog.find_by_name(&feature.official_name) else {
                unmatched_features += 1;
                log::debug!("no park named {:?}", feature.official_name);
                continue;
            };
            if let Some(handle) = PolygonHandle::new(feature.rings.clone(), visited.contains(&park.id)) {
                polygons.entry(park.id).or_default().push(handle);
            }
        }

        let mut bindings: BTreeMap<ParkId, ShapeBinding> = polygons
            .into_iter()
            .map(|(id, handles)| (id, ShapeBinding::Polygons(handles)))
            .collect();

        for park in catalog.iter() {
            bindings.entry(park.id).or_insert_with(|| {
                if park.has_location() {
                    ShapeBinding::Marker(MarkerHandle {
                        lon: park.lng,
                        lat: park.lat,
                        style: ShapeStyle { visited: visited.contains(&park.id), emphasized: false },
                    })
                } else {
                    ShapeBinding::NoShape
                }
            });
        }

        let view = Self {
            bindings,
            hovered: None,
            popup: None,
            unmatched_features,
        };
        log::info!(
            "map bound {} polygons and {} markers ({} boundary features unmatched)",
            view.polygon_count(),
            view.marker_count(),
            unmatched_features
        );
        view
    }

    pub fn binding(&self, id: ParkId) -> Option<&ShapeBinding> {
        self.bindings.get(&id)
    }

    pub fn polygon_count(&self) -> usize {
        self.bindings
            .values()
            .map(|b| match b {
                ShapeBinding::Polygons(handles) => handles.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn marker_count(&self) -> usize {
        self.bindings
            .values()
            .filter(|b| matches!(b, ShapeBinding::Marker(_)))
            .count()
    }

    pub fn unmatched_features(&self) -> usize {
        self.unmatched_features
    }

    /// Restyle every shape bound to `park` and refresh its open popup.
    /// Idempotent.
    pub fn update_visual_state(&mut self, park: &Park, visited: bool) {
        match self.bindings.get_mut(&park.id) {
            Some(ShapeBinding::Polygons(handles)) => {
                for handle in handles {
                    handle.style.visited = visited;
                }
            }
            Some(ShapeBinding::Marker(marker)) => marker.style.visited = visited,
            Some(ShapeBinding::NoShape) | None => {}
        }

        if self.popup.as_ref().is_some_and(|p| p.park_id == park.id) {
            self.popup = Some(Popup::new(park, visited));
        }
    }

    /// Emphasize the polygons of the hovered park; markers have no hover style
    pub fn set_hover(&mut self, id: Option<ParkId>) {
        if self.hovered == id {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            self.set_emphasis(prev, false);
        }
        if let Some(next) = id {
            self.set_emphasis(next, true);
        }
        self.hovered = id;
    }

    pub fn hovered(&self) -> Option<ParkId> {
        self.hovered
    }

    fn set_emphasis(&mut self, id: ParkId, emphasized: bool) {
        if let Some(ShapeBinding::Polygons(handles)) = self.bindings.get_mut(&id) {
            for handle in handles {
                handle.style.emphasized = emphasized;
            }
        }
    }

    pub fn open_popup(&mut self, park: &Park, visited: bool) {
        self.popup = Some(Popup::new(park, visited));
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Geographic extent of every bound shape
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut add = |lon: f64, lat: f64| {
            bounds.get_or_insert(Bounds::from_point(lon, lat)).extend(lon, lat);
        };

        for binding in self.bindings.values() {
            match binding {
                ShapeBinding::Polygons(handles) => {
                    for h in handles {
                        add(h.bounds.min_lon, h.bounds.min_lat);
                        add(h.bounds.max_lon, h.bounds.max_lat);
                    }
                }
                ShapeBinding::Marker(m) => add(m.lon, m.lat),
                ShapeBinding::NoShape => {}
            }
        }
        bounds
    }

    /// Render polygons and markers for a `cols` x `rows` character area
    pub fn render(&self, viewport: &Viewport, cols: usize, rows: usize) -> MapFrame {
        let mut layers: [BrailleCanvas; LAYER_COUNT] =
            std::array::from_fn(|_| BrailleCanvas::new(cols, rows));
        let mut hits = HitGrid::new(cols, rows);
        let mut markers = Vec::new();

        // Project visible polygons once
        let mut projected: Vec<(ParkId, &PolygonHandle, Vec<Vec<(i32, i32)>>, i64)> = Vec::new();
        for (&id, binding) in &self.bindings {
            let ShapeBinding::Polygons(handles) = binding else {
                continue;
            };
            for handle in handles {
                let (x0, y0) = project_clamped(viewport, handle.bounds.min_lon, handle.bounds.max_lat);
                let (x1, y1) = project_clamped(viewport, handle.bounds.max_lon, handle.bounds.min_lat);
                if !viewport.line_might_be_visible((x0, y0), (x1, y1)) {
                    continue;
                }
                let rings = handle
                    .rings
                    .iter()
                    .map(|ring| {
                        ring.iter()
                            .map(|&(lon, lat)| project_clamped(viewport, lon, lat))
                            .collect()
                    })
                    .collect();
                let area = (x1 - x0).abs() as i64 * (y1 - y0).abs() as i64;
                projected.push((id, handle, rings, area));
            }
        }

        // Interiors: larger shapes first so nested parks stay clickable
        projected.sort_by(|a, b| b.3.cmp(&a.3));
        for (id, _, rings, _) in &projected {
            fill_cells(rings, cols, rows, |col, row| hits.claim(col, row, *id));
        }

        for (id, handle, rings, _) in &projected {
            let layer = &mut layers[handle.style.layer()];
            for ring in rings {
                draw_ring(layer, ring, viewport, handle.style.emphasized);
                draw_ring(&mut hits.painter(*id), ring, viewport, false);
            }
        }

        // Markers sit on top of everything
        for (&id, binding) in &self.bindings {
            let ShapeBinding::Marker(marker) = binding else {
                continue;
            };
            let (px, py) = project_clamped(viewport, marker.lon, marker.lat);
            if !viewport.is_visible(px, py) {
                continue;
            }
            let (col, row) = (px as usize / 2, py as usize / 4);
            if col < cols && row < rows {
                hits.claim(col, row, id);
                markers.push(PlacedMarker {
                    col: col as u16,
                    row: row as u16,
                    style: marker.style,
                });
            }
        }

        MapFrame { layers, markers, hits }
    }
}

fn project_clamped(viewport: &Viewport, lon: f64, lat: f64) -> (i32, i32) {
    let (x, y) = viewport.project(lon, lat);
    (x.clamp(-PIXEL_LIMIT, PIXEL_LIMIT), y.clamp(-PIXEL_LIMIT, PIXEL_LIMIT))
}

/// Draw a closed ring with viewport culling
fn draw_ring<P: Plot + ?Sized>(target: &mut P, ring: &[(i32, i32)], viewport: &Viewport, thick: bool) {
    if ring.len() < 2 {
        return;
    }
    let max_span = 8 * (viewport.width + viewport.height) as i32;
    let closing = std::iter::once((ring[ring.len() - 1], ring[0]));

    for (a, b) in ring.windows(2).map(|w| (w[0], w[1])).chain(closing) {
        let span = (b.0 - a.0).abs() + (b.1 - a.1).abs();
        if span >= max_span || !viewport.line_might_be_visible(a, b) {
            continue;
        }
        if thick {
            draw_thick_line(target, a.0, a.1, b.0, b.1);
        } else {
            draw_line(target, a.0, a.1, b.0, b.1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::park;

    fn square(lon: f64, lat: f64, size: f64) -> Ring {
        vec![(lon, lat), (lon + size, lat), (lon + size, lat + size), (lon, lat + size)]
    }

    fn feature(name: &str, ring: Ring) -> BoundaryFeature {
        BoundaryFeature { official_name: name.to_string(), rings: vec![ring] }
    }

    fn fixture() -> (Catalog, Vec<BoundaryFeature>) {
        let catalog = Catalog::new(vec![
            park(1, "Alpha", "Oakland", 10.0),
            park(5, "Five", "Fremont", 50.0),
            park(9, "Nine", "Hayward", 90.0),
        ])
        .unwrap();
        let features = vec![
            feature("Five", square(-122.30, 37.70, 0.05)),
            feature("Five", square(-122.10, 37.70, 0.05)),
            feature("Unknown Park", square(-122.0, 37.0, 0.1)),
        ];
        (catalog, features)
    }

    #[test]
    fn test_bindings_are_exclusive() {
        let (catalog, features) = fixture();
        let view = MapView::build(&catalog, &features, &VisitedSet::new());

        assert!(matches!(view.binding(5), Some(ShapeBinding::Polygons(h)) if h.len() == 2));
        assert!(matches!(view.binding(1), Some(ShapeBinding::Marker(_))));
        assert!(matches!(view.binding(9), Some(ShapeBinding::Marker(_))));
        assert_eq!(view.polygon_count(), 2);
        assert_eq!(view.marker_count(), 2);
        assert_eq!(view.unmatched_features(), 1);
    }

    #[test]
    fn test_no_location_gets_no_shape() {
        let mut lost = park(2, "Lost", "Nowhere", 1.0);
        lost.lat = f64::NAN;
        let catalog = Catalog::new(vec![lost]).unwrap();
        let view = MapView::build(&catalog, &[], &VisitedSet::new());
        assert!(matches!(view.binding(2), Some(ShapeBinding::NoShape)));
    }

    #[test]
    fn test_update_visual_state_restyles_all_polygons() {
        let (catalog, features) = fixture();
        let mut view = MapView::build(&catalog, &features, &VisitedSet::new());
        let five = catalog.get(5).unwrap();

        view.update_visual_state(five, true);
        view.update_visual_state(five, true);
        let Some(ShapeBinding::Polygons(handles)) = view.binding(5) else {
            panic!("expected polygons");
        };
        assert!(handles.iter().all(|h| h.style.visited));
        let Some(ShapeBinding::Marker(marker)) = view.binding(1) else {
            panic!("expected marker");
        };
        assert!(!marker.style.visited);
    }

    #[test]
    fn test_popup_follows_visual_state() {
        let (catalog, features) = fixture();
        let mut view = MapView::build(&catalog, &features, &VisitedSet::new());
        let alpha = catalog.get(1).unwrap();

        view.open_popup(alpha, false);
        assert_eq!(view.popup().map(|p| p.action_label), Some("Mark as Visited"));
        view.update_visual_state(alpha, true);
        assert_eq!(view.popup().map(|p| p.action_label), Some("Mark as Not Visited"));

        // Another park's update leaves the popup alone
        view.update_visual_state(catalog.get(9).unwrap(), true);
        assert_eq!(view.popup().map(|p| p.park_id), Some(1));
    }

    #[test]
    fn test_hover_emphasizes_polygons_only() {
        let (catalog, features) = fixture();
        let mut view = MapView::build(&catalog, &features, &VisitedSet::new());

        view.set_hover(Some(5));
        let Some(ShapeBinding::Polygons(handles)) = view.binding(5) else {
            panic!("expected polygons");
        };
        assert!(handles.iter().all(|h| h.style.emphasized));

        view.set_hover(Some(1));
        let Some(ShapeBinding::Polygons(handles)) = view.binding(5) else {
            panic!("expected polygons");
        };
        assert!(handles.iter().all(|h| !h.style.emphasized));
        let Some(ShapeBinding::Marker(marker)) = view.binding(1) else {
            panic!("expected marker");
        };
        assert!(!marker.style.emphasized);
    }

    #[test]
    fn test_render_resolves_hits() {
        let (catalog, features) = fixture();
        let mut visited = VisitedSet::new();
        visited.insert(5);
        let view = MapView::build(&catalog, &features, &visited);

        let (cols, rows) = (80, 40);
        let mut viewport = Viewport::new(0.0, 0.0, 1.0, cols * 2, rows * 4);
        viewport.fit_bounds(&view.bounds().unwrap());
        let frame = view.render(&viewport, cols, rows);

        // Polygon centre resolves to park 5, drawn on the visited layer
        let (px, py) = viewport.project(-122.275, 37.725);
        assert_eq!(frame.hits.at(px as usize / 2, py as usize / 4), Some(5));
        let visited_layer = ShapeStyle { visited: true, emphasized: false }.layer();
        assert!(frame.layers[visited_layer].glyphs().count() > 0);
        assert_eq!(frame.layers[ShapeStyle::default().layer()].glyphs().count(), 0);

        // Markers land on their own cells
        assert_eq!(frame.markers.len(), 2);
        for marker in &frame.markers {
            assert!(frame.hits.at(marker.col as usize, marker.row as usize).is_some());
            assert!(!marker.style.visited);
        }
    }

    #[test]
    fn test_layer_index_roundtrip() {
        for layer in 0..LAYER_COUNT {
            assert_eq!(ShapeStyle::from_layer(layer).layer(), layer);
        }
    }
}
