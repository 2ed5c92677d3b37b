// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::cmp::Ordering;

use crate::geometry::vector::Vector;
use crate::numeric::scalar::Coordinate;

/// Orientation of a vector relative to another one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ccw {
    Counterclockwise,
    Collinear,
    Clockwise,
}

impl Ccw {
    #[inline]
    pub fn from_sign(sign: i8) -> Self {
        match sign.cmp(&0) {
            Ordering::Greater => Ccw::Counterclockwise,
            Ordering::Equal => Ccw::Collinear,
            Ordering::Less => Ccw::Clockwise,
        }
    }
}

/// Returns:
/// - `Counterclockwise` if `b` is obtained from `a` by turning left by less than π
/// - `Clockwise` if it is obtained by turning right by less than π
/// - `Collinear` if `a` and `b` are parallel or antiparallel
pub fn ccw<T: Coordinate>(a: &Vector<T>, b: &Vector<T>) -> Ccw {
    if let Some(sign) = a.approximation().cross(b.approximation()).sign_if_certain() {
        return Ccw::from_sign(sign);
    }
    ccw_exact(a, b)
}

/// Same as [`ccw`] without the floating point pre-filter.
pub fn ccw_exact<T: Coordinate>(a: &Vector<T>, b: &Vector<T>) -> Ccw {
    match a.cross(b).cmp(&T::zero()) {
        Ordering::Greater => Ccw::Counterclockwise,
        Ordering::Equal => Ccw::Collinear,
        Ordering::Less => Ccw::Clockwise,
    }
}

/// Sign of `a · b`, with the same two-tier evaluation as [`ccw`].
pub fn dot_sign<T: Coordinate>(a: &Vector<T>, b: &Vector<T>) -> Ordering {
    match a.approximation().dot(b.approximation()).sign_if_certain() {
        Some(sign) => sign.cmp(&0),
        None => a.dot(b).cmp(&T::zero()),
    }
}
