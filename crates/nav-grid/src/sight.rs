//! Bresenham line-of-sight.

use nav_core::GridPos;

/// Cells strictly between `from` and `to` on the Bresenham line.
///
/// Endpoints are excluded: an observer standing in a doorway can still see
/// out, and a target standing behind a window is still visible.
pub fn line_between(from: GridPos, to: GridPos) -> Vec<GridPos> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut cells = Vec::new();
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    while (x, y) != (to.x, to.y) {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        if (x, y) != (to.x, to.y) {
            cells.push(GridPos::new(x, y));
        }
    }
    cells
}
