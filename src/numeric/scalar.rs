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

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use num_traits::{CheckedMul, ToPrimitive};
use rug::{Integer, Rational};

use crate::numeric::ball::Ball;

/// Integer type of length quotients and scalar multiples.
pub type Quotient = Integer;

/// Integer coefficients of a length in terms of the edges of a triangulation.
pub trait Coefficient:
    Clone
    + Debug
    + Display
    + PartialEq
    + Eq
    + Neg<Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    /// `self * factor`, or `None` if the product is not representable.
    fn checked_scale(&self, factor: &Quotient) -> Option<Self>;
}

impl Coefficient for i64 {
    #[inline]
    fn zero() -> Self {
        0
    }
    #[inline]
    fn one() -> Self {
        1
    }
    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }
    fn checked_scale(&self, factor: &Quotient) -> Option<Self> {
        let factor = factor.to_i64()?;
        CheckedMul::checked_mul(self, &factor)
    }
}

impl Coefficient for Integer {
    #[inline]
    fn zero() -> Self {
        Integer::new()
    }
    #[inline]
    fn one() -> Self {
        Integer::from(1)
    }
    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }
    fn checked_scale(&self, factor: &Quotient) -> Option<Self> {
        Some(Integer::from(self * factor))
    }
}

/// An exact ordered number type the surface coordinates live in.
///
/// All decisions that affect the combinatorics are taken on these values,
/// possibly after a conclusive [`Ball`] pre-filter.
pub trait Coordinate:
    Clone
    + Debug
    + Display
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + 'static
{
    type Coefficient: Coefficient;

    fn zero() -> Self;
    fn from_i64(value: i64) -> Self;
    fn from_coefficient(value: &Self::Coefficient) -> Self;
    /// Guaranteed enclosure of the value.
    fn approximation(&self) -> Ball;
    /// `self / rhs` if the quotient exists in this type.
    fn exact_div(&self, rhs: &Self) -> Option<Self>;

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl Coordinate for i64 {
    type Coefficient = i64;

    #[inline]
    fn zero() -> Self {
        0
    }
    #[inline]
    fn from_i64(value: i64) -> Self {
        value
    }
    #[inline]
    fn from_coefficient(value: &i64) -> Self {
        *value
    }
    fn approximation(&self) -> Ball {
        let m = ToPrimitive::to_f64(self).unwrap_or(f64::NAN);
        if self.unsigned_abs() <= 1u64 << 53 {
            Ball::from_f64(m)
        } else {
            Ball {
                m,
                r: m.abs() * f64::EPSILON,
            }
        }
    }
    fn exact_div(&self, rhs: &Self) -> Option<Self> {
        match self.checked_rem(*rhs) {
            Some(0) => self.checked_div(*rhs),
            _ => None,
        }
    }
}

impl Coordinate for Rational {
    type Coefficient = Integer;

    #[inline]
    fn zero() -> Self {
        Rational::new()
    }
    #[inline]
    fn from_i64(value: i64) -> Self {
        Rational::from(value)
    }
    #[inline]
    fn from_coefficient(value: &Integer) -> Self {
        Rational::from(value.clone())
    }
    fn approximation(&self) -> Ball {
        if *self == 0 {
            return Ball::zero();
        }
        let m = self.to_f64();
        if !m.is_finite() {
            return Ball::unknown();
        }
        if *self.denom() == 1 && m.abs() < 9_007_199_254_740_992.0 {
            return Ball::from_f64(m);
        }
        Ball {
            m,
            r: m.abs() * 2.0 * f64::EPSILON + f64::MIN_POSITIVE,
        }
    }
    fn exact_div(&self, rhs: &Self) -> Option<Self> {
        if *rhs == 0 {
            None
        } else {
            Some(Rational::from(self / rhs))
        }
    }
}
