mod geometry;
mod hit;
mod projection;
mod view;

pub use hit::HitGrid;
pub use projection::{Bounds, Viewport};
pub use view::{
    MapFrame, MapView, MarkerHandle, PlacedMarker, PolygonHandle, Popup, ShapeBinding, ShapeStyle,
    LAYER_COUNT,
};
