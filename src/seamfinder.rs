// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cumulative cost map -> seam
//!
//! Start at the cheapest pixel on the bottom row and walk upward,
//! stepping at each row to whichever of the three pixels above is
//! cheapest.  The tie-breaking here is deliberately fussy, because
//! which of two equally cheap pixels goes away decides what the final
//! image looks like:
//!
//! * On the bottom row the leftmost minimum wins.
//! * Going up, straight up is the incumbent.  Up-left replaces it only
//!   if strictly cheaper, then up-right replaces whatever is standing
//!   only if strictly cheaper.
//! * Up-left is only considered when it lands on column 1 or later.
//!   From column 1 the walk can never step onto column 0, even though
//!   column 0 is a neighbor.  That looks like an off-by-one, and may
//!   well be one, but changing it changes which pixels get carved.

use crate::twodmap::{clamped_neighbors, CumulativeGrid};

/// The column of the cheapest cell in a row; the first one on ties.
fn cheapest_column(row: &[f64]) -> u32 {
    row.iter()
        .enumerate()
        .skip(1)
        .fold((0, row[0]), |(best, cost), (x, &c)| {
            if c < cost {
                (x, c)
            } else {
                (best, cost)
            }
        })
        .0 as u32
}

// Which of the pixels above `column` on row `y` the seam climbs to.
fn next_column(cost: &CumulativeGrid, column: u32, y: u32) -> u32 {
    let (left, right) = clamped_neighbors(column, cost.width);
    let mut best = column;
    if left >= 1 && cost[(left, y)] < cost[(best, y)] {
        best = left;
    }
    if right != column && cost[(right, y)] < cost[(best, y)] {
        best = right;
    }
    best
}

/// Given a cumulative cost map, return the list of x-coordinates that,
/// when mapped with the range (0..height), give the XY coordinates for
/// each pixel in the seam to be removed.
///
/// # Panics
///
/// If the map has no rows or no columns.  Every grid built from an
/// image through `from_rows` or the carver has at least one of each.
pub fn find_vertical_seam(cost: &CumulativeGrid) -> Vec<u32> {
    assert!(
        cost.width > 0 && cost.height > 0,
        "cannot find a seam in an empty {}x{} grid",
        cost.width,
        cost.height
    );
    let height = cost.height;
    let mut seam_col = cheapest_column(cost.row(height - 1));

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    let mut seam = (0..height - 1)
        .rev()
        .fold(vec![seam_col], |mut acc, y| {
            seam_col = next_column(cost, seam_col, y);
            acc.push(seam_col);
            acc
        });
    seam.reverse();
    debug_assert!(seam.windows(2).all(|w| (w[0] as i64 - w[1] as i64).abs() <= 1));
    seam
}
