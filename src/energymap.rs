// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Energy map -> cumulative cost map
//!
//! The top row costs what its energy says.  Every pixel below that
//! costs its own energy plus the cheapest of the three pixels above
//! it, with the neighbors clamped at the left and right edges.  Each
//! row depends only on the one above it, so the columns within a row
//! could be split up among workers; the rows cannot.

use crate::twodmap::{clamped_neighbors, CumulativeGrid, EnergyGrid};

/// Given an energy map, return the minimum cost of reaching each pixel
/// from the top edge of the image.  The energy map is left untouched.
pub fn cumulative_energy(energy: &EnergyGrid) -> CumulativeGrid {
    let (width, height) = (energy.width, energy.height);
    let mut target = energy.clone();

    for y in 1..height {
        for x in 0..width {
            let (left, right) = clamped_neighbors(x, width);
            let above = target[(left, y - 1)]
                .min(target[(x, y - 1)])
                .min(target[(right, y - 1)]);
            target[(x, y)] += above;
        }
    }
    target
}
