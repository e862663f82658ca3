use crate::braille::BrailleCanvas;

/// Anything that pixels can be plotted onto (braille layers, hit grids)
pub trait Plot {
    fn plot(&mut self, x: i32, y: i32);
}

impl Plot for BrailleCanvas {
    fn plot(&mut self, x: i32, y: i32) {
        self.set_pixel_signed(x, y);
    }
}

/// Draw a line using Bresenham's algorithm
pub fn draw_line<P: Plot + ?Sized>(target: &mut P, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        target.plot(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a thicker line (hover emphasis)
pub fn draw_thick_line<P: Plot + ?Sized>(target: &mut P, x0: i32, y0: i32, x1: i32, y1: i32) {
    draw_line(target, x0, y0, x1, y1);
    draw_line(target, x0 + 1, y0, x1 + 1, y1);
    draw_line(target, x0, y0 + 1, x1, y1 + 1);
}

/// Scanline-fill projected rings at character-cell resolution (even-odd rule,
/// so interior rings become holes). Samples each cell at its pixel centre;
/// `fill` receives (col, row) of every covered cell.
pub fn fill_cells<F>(rings: &[Vec<(i32, i32)>], cols: usize, rows: usize, mut fill: F)
where
    F: FnMut(usize, usize),
{
    let mut crossings: Vec<f64> = Vec::new();

    for row in 0..rows {
        let y = (row * 4) as f64 + 2.0;
        crossings.clear();

        for ring in rings {
            if ring.len() < 3 {
                continue;
            }
            for i in 0..ring.len() {
                let (x0, y0) = ring[i];
                let (x1, y1) = ring[(i + 1) % ring.len()];
                let (y0, y1, x0, x1) = (y0 as f64, y1 as f64, x0 as f64, x1 as f64);
                // Half-open on y so shared vertices count once
                if (y0 <= y && y < y1) || (y1 <= y && y < y0) {
                    crossings.push(x0 + (y - y0) * (x1 - x0) / (y1 - y0));
                }
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));

        for span in crossings.chunks_exact(2) {
            let first = ((span[0] - 1.0) / 2.0).ceil().max(0.0);
            let last = ((span[1] - 1.0) / 2.0).floor();
            if last < first {
                continue;
            }
            let last = (last as usize).min(cols.saturating_sub(1));
            for col in first as usize..=last {
                if col < cols {
                    fill(col, row);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_fill_square() {
        // Square covering pixels 0..8 x 0..8 -> cells (0..4, 0..2)
        let ring = vec![(0, 0), (8, 0), (8, 8), (0, 8)];
        let mut cells = Vec::new();
        fill_cells(&[ring], 10, 10, |c, r| cells.push((c, r)));
        assert_eq!(cells.len(), 8);
        assert!(cells.contains(&(0, 0)));
        assert!(cells.contains(&(3, 1)));
        assert!(!cells.contains(&(4, 0)));
    }

    #[test]
    fn test_fill_respects_holes() {
        let outer = vec![(0, 0), (20, 0), (20, 24), (0, 24)];
        let hole = vec![(6, 8), (14, 8), (14, 16), (6, 16)];
        let mut cells = Vec::new();
        fill_cells(&[outer, hole], 10, 6, |c, r| cells.push((c, r)));
        // Row 2 (y = 10) is inside the hole between x = 6 and 14
        assert!(cells.contains(&(1, 2)));
        assert!(!cells.contains(&(4, 2)));
        assert!(cells.contains(&(8, 2)));
    }

    #[test]
    fn test_fill_clips_offscreen() {
        let ring = vec![(-100, -100), (100, -100), (100, 100), (-100, 100)];
        let mut count = 0;
        fill_cells(&[ring], 3, 2, |_, _| count += 1);
        assert_eq!(count, 6);
    }
}
