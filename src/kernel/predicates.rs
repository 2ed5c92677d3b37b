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
use crate::kernel::orientation::{Ccw, ccw};
use crate::numeric::scalar::Coordinate;

/// Classification of an edge of a triangulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delaunay {
    Delaunay,
    NonDelaunay,
    /// The four vertices of the surrounding quadrilateral are cocircular.
    Ambiguous,
}

/// Sign of
///
/// ```text
/// | px py px²+py² |
/// | qx qy qx²+qy² |
/// | rx ry rx²+ry² |
/// ```
///
/// i.e. negative iff `r` lies strictly inside the circle through the origin,
/// `p` and `q` (with `0, p, q` counterclockwise).
pub fn incircle<T: Coordinate>(p: &Vector<T>, q: &Vector<T>, r: &Vector<T>) -> Ordering {
    let (pa, qa, ra) = (p.approximation(), q.approximation(), r.approximation());
    let (p2, q2, r2) = (pa.dot(pa), qa.dot(qa), ra.dot(ra));
    let det = pa
        .x
        .mul(qa.y.mul(r2).sub(q2.mul(ra.y)))
        .sub(pa.y.mul(qa.x.mul(r2).sub(q2.mul(ra.x))))
        .add(p2.mul(qa.x.mul(ra.y).sub(qa.y.mul(ra.x))));
    if let Some(sign) = det.sign_if_certain() {
        return sign.cmp(&0);
    }

    lifted_incircle(p, q, r, Vector::norm_squared)
}

/// Exact [`incircle`] with the paraboloid replaced by `lift`.
fn lifted_incircle<T: Coordinate>(
    p: &Vector<T>,
    q: &Vector<T>,
    r: &Vector<T>,
    lift: impl Fn(&Vector<T>) -> T,
) -> Ordering {
    let (p2, q2, r2) = (lift(p), lift(q), lift(r));
    let det = p.x.clone() * &(q.y.clone() * &r2 - q2.clone() * &r.y)
        - p.y.clone() * &(q.x.clone() * &r2 - q2 * &r.x)
        + p2 * &q.cross(r);
    det.cmp(&T::zero())
}

/// [`incircle`] for a metric squeezed along `direction`: distances across
/// `direction` decide first and distances along it break ties.
pub fn incircle_along<T: Coordinate>(
    direction: &Vector<T>,
    p: &Vector<T>,
    q: &Vector<T>,
    r: &Vector<T>,
) -> Ordering {
    let across = lifted_incircle(p, q, r, |v| {
        let c = direction.cross(v);
        c.clone() * &c
    });
    if across != Ordering::Equal {
        return across;
    }
    lifted_incircle(p, q, r, |v| {
        let d = direction.dot(v);
        d.clone() * &d
    })
}

/// [`incircle`] with ties broken by [`incircle_along`] `direction`, so that
/// only congruent configurations compare equal.
pub fn incircle_strict<T: Coordinate>(
    direction: &Vector<T>,
    p: &Vector<T>,
    q: &Vector<T>,
    r: &Vector<T>,
) -> Ordering {
    match incircle(p, q, r) {
        Ordering::Equal => incircle_along(direction, p, q, r),
        sign => sign,
    }
}

/// Delaunay classification of an edge from the origin to `p`, where `q` is
/// the apex of the triangle to its left and `r` the apex of the triangle to
/// its right, see [`incircle`].
pub fn classify<T: Coordinate>(p: &Vector<T>, q: &Vector<T>, r: &Vector<T>) -> Delaunay {
    match incircle(p, q, r) {
        Ordering::Less => Delaunay::NonDelaunay,
        Ordering::Equal => Delaunay::Ambiguous,
        Ordering::Greater => Delaunay::Delaunay,
    }
}

/// Whether a quadrilateral is strictly convex at its two corners off a
/// diagonal, given as the side entering and the reversed side leaving each
/// corner: both corners must turn strictly counterclockwise.
pub fn strictly_convex_at<T: Coordinate>(
    into_first: &Vector<T>,
    out_of_first: &Vector<T>,
    into_second: &Vector<T>,
    out_of_second: &Vector<T>,
) -> bool {
    ccw(into_first, out_of_first) == Ccw::Counterclockwise
        && ccw(into_second, out_of_second) == Ccw::Counterclockwise
}

/// Where a point lies relative to the triangle `(0, p, p + q)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriangleLocation {
    Inside,
    OnFirstSide,
    OnSecondSide,
    OnThirdSide,
    Outside,
}

/// Location of `v` relative to the counterclockwise triangle spanned by the
/// sides `p` and `q`, taken from the corner at the origin.
pub fn locate_in_triangle<T: Coordinate>(p: &Vector<T>, q: &Vector<T>, v: &Vector<T>) -> TriangleLocation {
    let first = ccw(p, v);
    let second = ccw(q, &(v - p));
    let third = ccw(&(-&(p + q)), &(v - &(p + q)));
    let sides = [first, second, third];
    if sides.contains(&Ccw::Clockwise) {
        return TriangleLocation::Outside;
    }
    match sides {
        [Ccw::Collinear, _, _] => TriangleLocation::OnFirstSide,
        [_, Ccw::Collinear, _] => TriangleLocation::OnSecondSide,
        [_, _, Ccw::Collinear] => TriangleLocation::OnThirdSide,
        _ => TriangleLocation::Inside,
    }
}
