// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given an image, calculate the energy map: the magnitude of the
//! luminance gradient at every pixel, found with a Sobel operator.
//! Everything past the border of the image counts as black, rather
//! than repeating the edge pixels or wrapping around.
//!
//! All the arithmetic is done in `f64`.  An 8-bit intermediate would
//! saturate (or worse, wrap) on any strong edge, and the seams that
//! come out of a wrapped energy map go straight through the middle of
//! whatever you were trying to keep.

use crate::cq;
use crate::twodmap::{EnergyGrid, TwoDimensionalMap};
use image::{GenericImageView, Pixel, Primitive};

// ITU-R 601-2 luma weights, the same ones `Pixel::to_luma` uses, but
// kept in floating point instead of being rounded back to a subpixel.
const LUMA_RED: f64 = 0.299;
const LUMA_GREEN: f64 = 0.587;
const LUMA_BLUE: f64 = 0.114;

// The two halves of the separable Sobel kernel.  Offsets -1, 0, +1.
const SMOOTH: [f64; 3] = [1.0, 2.0, 1.0];
const DERIVE: [f64; 3] = [-1.0, 0.0, 1.0];

#[inline]
fn channel<S: Primitive>(subpixel: S) -> f64 {
    // Scoped here: NumCast::from collides with From::from on integers.
    use num_traits::NumCast;
    // Every Primitive the image crate defines fits in an f64.
    <f64 as NumCast>::from(subpixel).unwrap_or(0.0)
}

/// The luminance of a single pixel, from its RGB conversion.
pub fn pixel_luminance<P, S>(pixel: &P) -> f64
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let rgb = pixel.to_rgb();
    let c = rgb.channels();
    LUMA_RED * channel(c[0]) + LUMA_GREEN * channel(c[1]) + LUMA_BLUE * channel(c[2])
}

/// Convert an image to a grid of luminance values.
pub fn luminance<I, P, S>(image: &I) -> TwoDimensionalMap<f64>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| {
        pixel_luminance(&image.get_pixel(x, y))
    })
}

// Correlate the 3x3 kernel `rows[dy] * columns[dx]` with the
// luminance grid at (x, y), zero outside the grid.
fn correlate(
    luma: &TwoDimensionalMap<f64>,
    x: u32,
    y: u32,
    rows: &[f64; 3],
    columns: &[f64; 3],
) -> f64 {
    let (x, y) = (<i64 as From<u32>>::from(x), <i64 as From<u32>>::from(y));
    let (width, height) = (
        <i64 as From<u32>>::from(luma.width),
        <i64 as From<u32>>::from(luma.height),
    );
    let mut sum = 0.0;
    for (ry, wy) in rows.iter().enumerate() {
        let sy = y + ry as i64 - 1;
        for (rx, wx) in columns.iter().enumerate() {
            let sx = x + rx as i64 - 1;
            let outside = sx < 0 || sy < 0 || sx >= width || sy >= height;
            sum += wy * wx * cq!(outside, 0.0, luma[(sx as u32, sy as u32)]);
        }
    }
    sum
}

/// Compute the energy of every pixel in a luminance grid: the
/// Euclidean magnitude of its horizontal and vertical Sobel
/// gradients.
pub fn luminance_to_energy(luma: &TwoDimensionalMap<f64>) -> EnergyGrid {
    TwoDimensionalMap::from_fn(luma.width, luma.height, |x, y| {
        let gx = correlate(luma, x, y, &SMOOTH, &DERIVE);
        let gy = correlate(luma, x, y, &DERIVE, &SMOOTH);
        gx.hypot(gy)
    })
}

/// Compute the energy of every pixel in an image.  This is generic on
/// the image type; color images are reduced to luminance first.
pub fn calculate_energy<I, P, S>(image: &I) -> EnergyGrid
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    luminance_to_energy(&luminance(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb, RgbImage};

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-9, "cell {}: {} != {}", i, a, e);
        }
    }

    fn grey(width: u32, height: u32, level: impl Fn(u32, u32) -> u8) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            let v = level(x, y);
            *Rgb::from_slice(&[v, v, v])
        })
    }

    #[test]
    fn luminance_weights_the_channels() {
        let buf: RgbImage =
            ImageBuffer::from_raw(3, 1, vec![255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
        let luma = luminance(&buf);
        assert_close(luma.cells(), &[0.299 * 255.0, 0.587 * 255.0, 0.114 * 255.0]);
    }

    #[test]
    fn uniform_image_has_no_energy_inside() {
        // The border is zero-extended, so only the interior is flat.
        let energy = calculate_energy(&grey(5, 5, |_, _| 0));
        assert!(energy.cells().iter().all(|e| *e == 0.0));
        let energy = calculate_energy(&grey(5, 5, |_, _| 80));
        assert!(energy[(2, 2)].abs() < 1e-9);
    }

    #[test]
    fn single_bright_pixel() {
        let buf: ImageBuffer<Luma<u8>, _> =
            ImageBuffer::from_raw(3, 3, vec![0, 0, 0, 0, 100, 0, 0, 0, 0]).unwrap();
        let energy = calculate_energy(&buf);
        let d = 100.0 * 2f64.sqrt();
        assert_close(
            energy.cells(),
            &[d, 200.0, d, 200.0, 0.0, 200.0, d, 200.0, d],
        );
    }

    #[test]
    fn strong_edges_do_not_saturate() {
        let energy = calculate_energy(&grey(3, 3, |x, y| cq!(x == 1 && y == 1, 255, 0)));
        assert!((energy[(0, 1)] - 510.0).abs() < 1e-6);
        assert!(energy[(0, 1)] > 255.0);
    }

    #[test]
    fn vertical_edge_in_the_middle() {
        // Left half black, right half white: the two columns on either
        // side of the edge carry all the interior energy.
        let energy = calculate_energy(&grey(4, 3, |x, _| cq!(x < 2, 0, 200)));
        let lum = 200.0 * (LUMA_RED + LUMA_GREEN + LUMA_BLUE);
        assert!((energy[(1, 1)] - 4.0 * lum).abs() < 1e-9);
        assert!((energy[(2, 1)] - 4.0 * lum).abs() < 1e-9);
        assert!(energy[(0, 1)].abs() < 1e-9);
    }

    #[test]
    fn kernel_reaches_past_every_border() {
        // One bright pixel in each corner of a wider-than-tall image: the
        // far corners are only found if the bounds use the full width
        // and height.
        let energy = calculate_energy(&grey(5, 3, |x, y| {
            cq!((x == 0 || x == 4) && (y == 0 || y == 2), 100, 0)
        }));
        assert!(energy[(4, 2)] > 0.0);
        assert!(energy[(3, 1)] > 0.0);
        assert!(energy[(2, 1)].abs() < 1e-9);
        assert!((energy[(4, 2)] - energy[(0, 0)]).abs() < 1e-9);
    }

    #[test]
    fn energy_is_never_negative() {
        let energy = calculate_energy(&grey(7, 5, |x, y| ((x * 37 + y * 91) % 256) as u8));
        assert!(energy.cells().iter().all(|e| *e >= 0.0));
    }
}
