// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while carving.
//!
//! Every operation in this crate is a deterministic function of its
//! input, so none of these are worth retrying: the same image will
//! fail the same way every time.

use crate::seamcarver::Carve;
use failure::Fail;

/// The failures the carving pipeline can report.
#[derive(Debug, Fail, PartialEq)]
pub enum CarveError {
    /// The image (or grid) has no pixels to work with.
    #[fail(display = "invalid image: {}x{} has no pixels", width, height)]
    InvalidImage { width: u32, height: u32 },

    /// A row-by-row source whose rows do not all have the same length.
    #[fail(
        display = "invalid image: row {} has {} columns, expected {}",
        row, actual, expected
    )]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Carving would shrink a dimension to zero.
    #[fail(
        display = "cannot remove {} seam(s) across {:?} from an image only {} pixels across",
        requested, direction, size
    )]
    ExhaustedDimension {
        direction: Carve,
        size: u32,
        requested: u32,
    },

    /// A seam pointed outside the image.  The seam finder never
    /// produces one of these; seeing it means a bug upstream.
    #[fail(
        display = "seam leaves the image at row {}: column {} of {}",
        row, column, width
    )]
    SeamOutOfRange { row: u32, column: u32, width: u32 },

    /// A seam that doesn't have exactly one entry per row.
    #[fail(display = "seam has {} entries for an image {} rows high", actual, expected)]
    SeamLength { expected: u32, actual: usize },
}

impl CarveError {
    /// True for the kinds that describe a malformed source image.
    pub fn is_invalid_image(&self) -> bool {
        match self {
            CarveError::InvalidImage { .. } | CarveError::RaggedRows { .. } => true,
            _ => false,
        }
    }
}
