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

use rug::Integer;

/// Relative slack added to every non-exact radius so that the rounding of
/// the radius computation itself stays covered.
pub const PADDING: f64 = 4.0 * f64::EPSILON;

/// Largest magnitude below which every integer is an exact `f64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ball {
    pub m: f64,
    pub r: f64,
} // value ∈ [m - r, m + r]

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}
#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = f64::mul_add(a, b, -p);
    (p, err)
}

#[inline]
fn padded(m: f64, r: f64) -> Ball {
    if !m.is_finite() || !r.is_finite() {
        return Ball::unknown();
    }
    if r == 0.0 {
        Ball { m, r }
    } else {
        Ball {
            m,
            r: r * (1.0 + PADDING) + f64::MIN_POSITIVE,
        }
    }
}

impl Ball {
    #[inline]
    pub fn from_f64(x: f64) -> Self {
        Ball { m: x, r: 0.0 }
    }
    #[inline]
    pub fn zero() -> Self {
        Ball { m: 0.0, r: 0.0 }
    }
    #[inline]
    pub fn unknown() -> Self {
        Ball {
            m: 0.0,
            r: f64::INFINITY,
        }
    }

    /// Enclosure of an arbitrary precision integer.
    pub fn from_integer(x: &Integer) -> Self {
        let m = x.to_f64();
        if m.abs() < EXACT_INTEGER_LIMIT {
            Ball::from_f64(m)
        } else {
            padded(m, m.abs() * f64::EPSILON)
        }
    }

    #[inline]
    pub fn lo(self) -> f64 {
        self.m - self.r
    }
    #[inline]
    pub fn hi(self) -> f64 {
        self.m + self.r
    }
    #[inline]
    pub fn is_exact(self) -> bool {
        self.r == 0.0
    }

    #[inline]
    pub fn add(self, o: Self) -> Self {
        let (s, e) = two_sum(self.m, o.m);
        padded(s, self.r + o.r + e.abs())
    }
    #[inline]
    pub fn sub(self, o: Self) -> Self {
        self.add(o.neg())
    }
    #[inline]
    pub fn neg(self) -> Self {
        Ball {
            m: -self.m,
            r: self.r,
        }
    }

    #[inline]
    pub fn mul(self, o: Self) -> Self {
        let (p, e) = two_prod(self.m, o.m);
        padded(
            p,
            self.m.abs() * o.r + o.m.abs() * self.r + self.r * o.r + e.abs(),
        )
    }
    // Conservative division; if the denominator straddles zero the result is unknown.
    #[inline]
    pub fn div(self, o: Self) -> Self {
        if o.m.abs() <= o.r {
            return Ball::unknown();
        }
        let denom = o.m.abs() * (o.m.abs() - o.r);
        if denom <= 0.0 {
            return Ball::unknown();
        }
        let m = self.m / o.m;
        let r = (self.m.abs() * o.r + o.m.abs() * self.r) / denom + m.abs() * f64::EPSILON;
        padded(m, r)
    }

    #[inline]
    pub fn sign_if_certain(self) -> Option<i8> {
        if self.r.is_infinite() {
            return None;
        }
        if self.m > self.r {
            Some(1)
        } else if self.m < -self.r {
            Some(-1)
        } else if self.m == 0.0 && self.r == 0.0 {
            Some(0)
        } else {
            None
        }
    }

    /// `Some(self == o)` when the enclosures decide it, `None` when they overlap.
    pub fn eq_if_certain(self, o: Self) -> Option<bool> {
        if self.is_exact() && o.is_exact() {
            return Some(self.m == o.m);
        }
        match self.sub(o).sign_if_certain() {
            Some(0) => Some(true),
            Some(_) => Some(false),
            None => None,
        }
    }

    /// `Some(self < o)` when the enclosures decide it.
    pub fn lt_if_certain(self, o: Self) -> Option<bool> {
        self.sub(o).sign_if_certain().map(|sign| sign < 0)
    }

    /// Floor of the midpoint, a starting guess for integer quotients.
    pub fn floor_estimate(self) -> Option<Integer> {
        if self.r.is_infinite() || !self.m.is_finite() {
            return None;
        }
        Integer::from_f64(self.m.floor())
    }
}

/// A pair of balls, the approximation of an exact vector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BallVector {
    pub x: Ball,
    pub y: Ball,
}

impl BallVector {
    #[inline]
    pub fn cross(self, o: Self) -> Ball {
        self.x.mul(o.y).sub(self.y.mul(o.x))
    }
    #[inline]
    pub fn dot(self, o: Self) -> Ball {
        self.x.mul(o.x).add(self.y.mul(o.y))
    }
}
