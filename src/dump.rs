// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render an energy map as a greyscale image, for looking at.

use crate::cq;
use crate::twodmap::EnergyGrid;
use image::{GrayImage, ImageBuffer, Luma, Pixel};

/// Scale an energy map so that its hottest pixel is white.  A map with
/// no energy anywhere comes out black.
pub fn energy_to_image(energy: &EnergyGrid) -> GrayImage {
    let factor = energy.cells().iter().cloned().fold(0.0, f64::max);
    ImageBuffer::from_fn(energy.width, energy.height, |x, y| {
        let level = cq!(factor > 0.0, energy[(x, y)] * 255.0 / factor, 0.0);
        *Luma::<u8>::from_slice(&[level.round().max(0.0).min(255.0) as u8])
    })
}
