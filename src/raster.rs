// Line rasterization between two cells.
// Fast pointer motion only gives us sparse samples; this fills every cell
// in between so the stroke never shows gaps.

use crate::types::GridCoord;

/// Every cell a line from `a` to `b` passes through, in painting order.
///
/// The walk always runs left to right in x, so for non-vertical lines the
/// first cell is whichever endpoint has the smaller x. Vertical lines run
/// from `a` to `b`. Consecutive cells are always 8-connected, and steep lines
/// get one cell per y step rather than one per x step.
///
/// The slope error is tracked as an integer numerator over `dx`:
/// "error > 1/2" becomes `2 * err > dx`, so no floating point is involved.
pub fn rasterize(a: GridCoord, b: GridCoord) -> Vec<GridCoord> {
    if a.x == b.x {
        return vertical(a.x, a.y, b.y);
    }

    let (start, end) = if a.x < b.x { (a, b) } else { (b, a) };
    let (x0, y0) = (start.x as i64, start.y as i64);
    let (x1, y1) = (end.x as i64, end.y as i64);

    let dx = x1 - x0; // > 0
    let dy = (y1 - y0).abs();
    let y_sign = if y1 < y0 { -1 } else { 1 };

    let mut cells = Vec::with_capacity((dx + dy + 1) as usize);
    let mut y = y0;
    let mut err = 0i64;

    for x in x0..=x1 {
        cells.push(cell(x, y));
        err += dy;

        let mut last = (x, y);
        while 2 * err > dx && y != y1 {
            if last != (x, y) {
                cells.push(cell(x, y));
                last = (x, y);
            }
            y += y_sign;
            err -= dx;
        }
    }

    cells
}

fn vertical(x: i32, y0: i32, y1: i32) -> Vec<GridCoord> {
    let step = if y1 < y0 { -1 } else { 1 };
    let mut cells = Vec::with_capacity(y0.abs_diff(y1) as usize + 1);
    let mut y = y0;
    loop {
        cells.push(GridCoord::new(x, y));
        if y == y1 {
            break;
        }
        y += step;
    }
    cells
}

#[inline]
fn cell(x: i64, y: i64) -> GridCoord {
    // Both values lie between the two i32 endpoints.
    GridCoord::new(x as i32, y as i32)
}
