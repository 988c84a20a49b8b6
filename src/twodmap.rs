// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The grids that flow between the carving stages.

use crate::cq;
use crate::errors::CarveError;
use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// Defines the basic two-dimensional map: an addressable field of
/// values, one per pixel.  The same structure carries the luminance
/// of an image, its energy, and the cumulative cost of reaching each
/// pixel from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    cells: Vec<P>,
}

/// Per-pixel visual importance; never negative.
pub type EnergyGrid = TwoDimensionalMap<f64>;

/// Minimum total energy of any path from the top row to each pixel.
pub type CumulativeGrid = TwoDimensionalMap<f64>;

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map filled with the content type's default.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            cells: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Build a map by asking for the value at every (x, y), row by row.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        TwoDimensionalMap {
            width,
            height,
            cells: iproduct!(0..height, 0..width)
                .map(|(y, x)| f(x, y))
                .collect(),
        }
    }

    /// Build a map from nested rows, top row first.  Every row must
    /// have the same, non-zero, length.
    pub fn from_rows(rows: &[Vec<P>]) -> Result<Self, CarveError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(CarveError::InvalidImage {
                width: width as u32,
                height: rows.len() as u32,
            });
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(CarveError::RaggedRows {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }
        Ok(TwoDimensionalMap {
            width: width as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// One full row of the map, left to right.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    /// Every value, row-major.
    pub fn cells(&self) -> &[P] {
        &self.cells
    }

    /// A quarter turn clockwise: the bottom-left corner becomes the
    /// top-left one.  Same convention as `image::imageops::rotate90`.
    pub fn rotate90(&self) -> Self {
        let (width, height) = (self.width, self.height);
        TwoDimensionalMap::from_fn(height, width, |x, y| self[(y, height - 1 - x)])
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}

/// The left and right neighbors of `column` in a row `width` wide,
/// clamped to the row: at the left edge the left neighbor is the
/// column itself, and likewise at the right edge.  Both the cost
/// builder and the seam finder go through here, so they always agree
/// on what lies past the border.
#[inline]
pub fn clamped_neighbors(column: u32, width: u32) -> (u32, u32) {
    (
        cq!(column == 0, column, column - 1),
        cq!(column + 1 >= width, column, column + 1),
    )
}
