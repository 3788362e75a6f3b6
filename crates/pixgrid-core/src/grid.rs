use std::collections::TryReserveError;
use std::fmt;
use std::io::{self, Write};

use crate::error::GridError;
use crate::pixel::Pixel;
use crate::raster::{self, RasterView};

/// Token used to fill a new grid when no default is supplied.
pub const DEFAULT_PIXEL: &str = "O";

/// Largest number of cells a grid may hold.
pub const MAX_PIXELS: usize = 1 << 20;

/// A rectangular field of symbolic pixels.
///
/// Cells are stored row-major: `height` rows of exactly `width` pixels each.
/// Coordinates are zero-based `(col, row)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    default_value: Pixel,
    cells: Vec<Vec<Pixel>>,
}

impl Grid {
    /// Creates a grid filled with [`DEFAULT_PIXEL`].
    pub fn new(width: i64, height: i64) -> Result<Self, GridError> {
        Self::with_default(width, height, DEFAULT_PIXEL)
    }

    /// Creates a grid filled with `default_value`.
    ///
    /// An empty default falls back to [`DEFAULT_PIXEL`]. Grids with more than
    /// [`MAX_PIXELS`] cells, or whose cells cannot be allocated, are rejected
    /// with [`GridError::TooLarge`].
    pub fn with_default(
        width: i64,
        height: i64,
        default_value: impl Into<Pixel>,
    ) -> Result<Self, GridError> {
        let (cols, rows) = match (usize::try_from(width), usize::try_from(height)) {
            (Ok(cols), Ok(rows)) if cols > 0 && rows > 0 => (cols, rows),
            _ => return Err(GridError::invalid_dimension(width, height)),
        };

        let mut default_value = default_value.into();
        if default_value.is_empty() {
            default_value = Pixel::from(DEFAULT_PIXEL);
        }

        let too_large = || GridError::TooLarge {
            width: cols,
            height: rows,
            limit: MAX_PIXELS,
        };
        match cols.checked_mul(rows) {
            Some(total) if total <= MAX_PIXELS => {}
            _ => return Err(too_large()),
        }
        let cells = filled(cols, rows, &default_value).map_err(|_| too_large())?;

        Ok(Self {
            width: cols,
            height: rows,
            cells,
            default_value,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn default_value(&self) -> &Pixel {
        &self.default_value
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid holds at least one row.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Pixel> {
        self.cells.get(row).and_then(|cells| cells.get(col))
    }

    pub fn row(&self, index: usize) -> Option<&[Pixel]> {
        self.cells.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn set_pixel(
        &mut self,
        col: usize,
        row: usize,
        value: impl Into<Pixel>,
    ) -> Result<(), GridError> {
        self.check_bounds(col, row)?;
        self.cells[row][col] = value.into();
        Ok(())
    }

    /// Sets `col` to `value` for every row in `start_row..end_row`.
    ///
    /// The end row is exclusive. An empty range is a no-op. The whole range is
    /// validated before any cell is written, so a failing call leaves the grid
    /// untouched.
    pub fn draw_vertical_segment(
        &mut self,
        col: usize,
        start_row: usize,
        end_row: usize,
        value: impl Into<Pixel>,
    ) -> Result<(), GridError> {
        if start_row >= end_row {
            return Ok(());
        }
        self.check_bounds(col, start_row)?;
        if end_row > self.height {
            return Err(self.out_of_bounds(col, self.height));
        }

        let value = value.into();
        for row in &mut self.cells[start_row..end_row] {
            row[col] = value.clone();
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        raster::render(self)
    }

    /// Writes [`Grid::render`] output verbatim to `sink`.
    pub fn save<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(self.render().as_bytes())?;
        sink.flush()
    }

    fn check_bounds(&self, col: usize, row: usize) -> Result<(), GridError> {
        if col >= self.width || row >= self.height {
            return Err(self.out_of_bounds(col, row));
        }
        Ok(())
    }

    fn out_of_bounds(&self, col: usize, row: usize) -> GridError {
        GridError::OutOfBounds {
            col: i64::try_from(col).unwrap_or(i64::MAX),
            row: i64::try_from(row).unwrap_or(i64::MAX),
            width: self.width,
            height: self.height,
        }
    }
}

fn filled(
    cols: usize,
    rows: usize,
    value: &Pixel,
) -> Result<Vec<Vec<Pixel>>, TryReserveError> {
    let mut cells = Vec::new();
    cells.try_reserve_exact(rows)?;
    for _ in 0..rows {
        let mut row = Vec::new();
        row.try_reserve_exact(cols)?;
        row.resize(cols, value.clone());
        cells.push(row);
    }
    Ok(cells)
}

impl RasterView for Grid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixel(&self, col: usize, row: usize) -> Option<&Pixel> {
        self.get(col, row)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
