// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing.
//!
//! Seam carving shrinks an image by repeatedly finding the connected
//! top-to-bottom path of pixels that matters least, and taking it out.
//! Each seam runs through the same pipeline:
//!
//! image -> [`calculate_energy`] -> [`cumulative_energy`] ->
//! [`find_vertical_seam`] -> [`remove_vertical_seam`] -> narrower image
//!
//! [`remove_one_column`] does all of that once; [`SeamCarver`] does it as
//! many times as asked, in either direction.

mod ternary;

pub mod dump;
pub mod energy;
pub mod energymap;
pub mod errors;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use dump::energy_to_image;
pub use energy::{calculate_energy, luminance};
pub use energymap::cumulative_energy;
pub use errors::CarveError;
pub use seamcarver::{
    image_from_rows, remove_one_column, remove_one_column_with, remove_vertical_seam, seamcarve,
    Carve, CarveObserver, SeamCarver,
};
pub use seamfinder::find_vertical_seam;
pub use twodmap::{CumulativeGrid, EnergyGrid, TwoDimensionalMap};
