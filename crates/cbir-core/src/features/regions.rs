//! Spatial grid partitioning.

/// Rectangular cell of a grid partition, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Splits a `width` x `height` area into `rows` x `cols` equal cells, row by row.
///
/// Cell size is the integer quotient, so trailing rows and columns that do
/// not fill a whole cell are left out. Returns `None` if any dimension
/// would be zero.
#[must_use]
pub fn grid_cells(width: u32, height: u32, rows: u32, cols: u32) -> Option<Vec<Cell>> {
    if rows == 0 || cols == 0 {
        return None;
    }
    let cell_w = width / cols;
    let cell_h = height / rows;
    if cell_w == 0 || cell_h == 0 {
        return None;
    }

    let cells = (0..rows)
        .flat_map(|row| {
            (0..cols).map(move |col| Cell {
                x: col * cell_w,
                y: row * cell_h,
                width: cell_w,
                height: cell_h,
            })
        })
        .collect();
    Some(cells)
}
