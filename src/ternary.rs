// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Conditional expression: `cq!(test, when_true, when_false)`.
///
/// Rust's `if` is already an expression, but rustfmt spreads it over
/// five lines, and the border rules for the grids (clamp at the left
/// edge, clamp at the right edge, zero outside the image) read far
/// better as a column of one-liners.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
