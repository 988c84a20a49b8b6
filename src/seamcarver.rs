// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! Removing one column is the whole pipeline run once: energy map,
//! cumulative cost map, seam, and a new image one pixel narrower.
//! Nothing is carried over from one seam to the next.  Rows are
//! removed by turning the image a quarter turn counter-clockwise,
//! removing columns, and turning it back.

use crate::cq;
use crate::energy::calculate_energy;
use crate::energymap::cumulative_energy;
use crate::errors::CarveError;
use crate::seamfinder::find_vertical_seam;
use crate::twodmap::{EnergyGrid, TwoDimensionalMap};
use image::imageops::{rotate270, rotate90};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgb, RgbImage};
use log::{debug, info};

/// Which dimension a seam shrinks.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Carve {
    Width,
    Height,
}

// An image we can take a column out of: at least one row, at least two
// columns.
fn check_carvable<I: GenericImageView>(image: &I) -> Result<(), CarveError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidImage { width, height });
    }
    if width == 1 {
        return Err(CarveError::ExhaustedDimension {
            direction: Carve::Width,
            size: width,
            requested: 1,
        });
    }
    Ok(())
}

/// Copy an image, leaving out one pixel from every row.  `seam[y]` is
/// the column dropped from row `y`; everything to its right moves one
/// place left.
pub fn remove_vertical_seam<I, P, S>(
    image: &I,
    seam: &[u32],
) -> Result<ImageBuffer<P, Vec<S>>, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    check_carvable(image)?;
    let (width, height) = image.dimensions();
    if seam.len() != height as usize {
        return Err(CarveError::SeamLength {
            expected: height,
            actual: seam.len(),
        });
    }
    if let Some((row, &column)) = seam.iter().enumerate().find(|&(_, &x)| x >= width) {
        return Err(CarveError::SeamOutOfRange {
            row: row as u32,
            column,
            width,
        });
    }

    Ok(ImageBuffer::from_fn(width - 1, height, |x, y| {
        image.get_pixel(cq!(x < seam[y as usize], x, x + 1), y)
    }))
}

/// Remove the least important vertical seam from an image, handing
/// the energy map to `inspect` on the way through.
pub fn remove_one_column_with<I, P, S, F>(
    image: &I,
    inspect: F,
) -> Result<ImageBuffer<P, Vec<S>>, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
    F: FnOnce(&EnergyGrid),
{
    check_carvable(image)?;
    let energy = calculate_energy(image);
    inspect(&energy);
    let seam = find_vertical_seam(&cumulative_energy(&energy));
    debug!("{:?}", seam);
    remove_vertical_seam(image, &seam)
}

/// Remove the least important seam from an image, returning a copy
/// one column narrower.
pub fn remove_one_column<I, P, S>(image: &I) -> Result<ImageBuffer<P, Vec<S>>, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    remove_one_column_with(image, |_| ())
}

/// Hears about a carve as it happens.  Both methods do nothing unless
/// overridden, and `()` is the observer that wants to hear nothing.
pub trait CarveObserver {
    /// The first energy map computed during a carve, oriented the same
    /// way as the source image.  Called at most once per carve.
    fn energy_map(&mut self, _energy: &EnergyGrid) {}

    /// One more seam is gone: `done` of `total` in this direction.
    fn seam_removed(&mut self, _direction: Carve, _done: u32, _total: u32) {}
}

impl CarveObserver for () {}

// Remove `count` columns from an image already turned so that the
// seams run top to bottom.
fn carve_phase<P, S, O>(
    mut scratch: ImageBuffer<P, Vec<S>>,
    direction: Carve,
    count: u32,
    observer: &mut O,
    energy_pending: &mut bool,
) -> Result<ImageBuffer<P, Vec<S>>, CarveError>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
    O: CarveObserver + ?Sized,
{
    for done in 1..=count {
        scratch = remove_one_column_with(&scratch, |energy| {
            if *energy_pending {
                *energy_pending = false;
                if direction == Carve::Height {
                    observer.energy_map(&energy.rotate90());
                } else {
                    observer.energy_map(energy);
                }
            }
        })?;
        debug!(
            "{:?} {}/{}: {}x{}",
            direction,
            done,
            count,
            scratch.width(),
            scratch.height()
        );
        observer.seam_removed(direction, done, count);
    }
    Ok(scratch)
}

/// A struct for holding the image to be carved.
pub struct SeamCarver<'a, I> {
    image: &'a I,
}

impl<'a, I, P, S> SeamCarver<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: &'a I) -> Self {
        Self { image }
    }

    /// Carve `columns` vertical seams and then `rows` horizontal ones
    /// out of the image.  Every seam is found on a freshly computed
    /// energy map.  Asking for nothing returns an identical copy.
    pub fn carve<O>(
        &self,
        columns: u32,
        rows: u32,
        observer: &mut O,
    ) -> Result<ImageBuffer<P, Vec<S>>, CarveError>
    where
        O: CarveObserver + ?Sized,
    {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::InvalidImage { width, height });
        }
        if columns >= width {
            return Err(CarveError::ExhaustedDimension {
                direction: Carve::Width,
                size: width,
                requested: columns,
            });
        }
        if rows >= height {
            return Err(CarveError::ExhaustedDimension {
                direction: Carve::Height,
                size: height,
                requested: rows,
            });
        }

        // Initialize the scratch space.
        let mut scratch = ImageBuffer::from_fn(width, height, |x, y| self.image.get_pixel(x, y));
        let mut energy_pending = true;

        if columns > 0 {
            scratch = carve_phase(scratch, Carve::Width, columns, observer, &mut energy_pending)?;
            info!(
                "removed {} column(s): {}x{}",
                columns,
                scratch.width(),
                scratch.height()
            );
        }
        if rows > 0 {
            let turned = carve_phase(
                rotate270(&scratch),
                Carve::Height,
                rows,
                observer,
                &mut energy_pending,
            )?;
            scratch = rotate90(&turned);
            info!(
                "removed {} row(s): {}x{}",
                rows,
                scratch.width(),
                scratch.height()
            );
        }
        Ok(scratch)
    }
}

/// A convenience wrapper: carve `columns` columns and `rows` rows out
/// of an image without watching.
pub fn seamcarve<I, P, S>(
    image: &I,
    columns: u32,
    rows: u32,
) -> Result<ImageBuffer<P, Vec<S>>, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    SeamCarver::new(image).carve(columns, rows, &mut ())
}

/// Build an RGB image from rows of `[r, g, b]` pixels, top row first.
pub fn image_from_rows(rows: &[Vec<[u8; 3]>]) -> Result<RgbImage, CarveError> {
    let pixels = TwoDimensionalMap::from_rows(rows)?;
    Ok(ImageBuffer::from_fn(pixels.width, pixels.height, |x, y| {
        *Rgb::<u8>::from_slice(&pixels[(x, y)])
    }))
}
