use crate::catalog::ParkId;
use crate::map::geometry::Plot;

/// Which park owns each character cell of the last rendered map frame.
/// Mouse events are resolved against it the way a browser resolves an
/// event target from what was painted last.
#[derive(Clone, Debug, Default)]
pub struct HitGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Option<ParkId>>,
}

impl HitGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols * rows],
        }
    }

    /// Claim a character cell for a park (later claims win)
    pub fn claim(&mut self, col: usize, row: usize, id: ParkId) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = Some(id);
        }
    }

    /// Park under a character cell
    pub fn at(&self, col: usize, row: usize) -> Option<ParkId> {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    /// Plotter that claims the cells under braille pixels for `id`
    pub fn painter(&mut self, id: ParkId) -> HitPainter<'_> {
        HitPainter { grid: self, id }
    }
}

/// Adapter so outline drawing can claim hit cells pixel by pixel
pub struct HitPainter<'a> {
    grid: &'a mut HitGrid,
    id: ParkId,
}

impl Plot for HitPainter<'_> {
    fn plot(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 {
            self.grid.claim(x as usize / 2, y as usize / 4, self.id);
        }
    }
}
