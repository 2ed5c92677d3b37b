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

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::kernel::orientation::{Ccw, ccw};
use crate::numeric::ball::BallVector;
use crate::numeric::scalar::Coordinate;

/// An exact vector in the plane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vector<T: Coordinate> {
    pub x: T,
    pub y: T,
}

impl<T: Coordinate> Vector<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn from_i64(x: i64, y: i64) -> Self {
        Self::new(T::from_i64(x), T::from_i64(y))
    }

    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub fn cross(&self, other: &Self) -> T {
        self.x.clone() * &other.y - self.y.clone() * &other.x
    }

    pub fn dot(&self, other: &Self) -> T {
        self.x.clone() * &other.x + self.y.clone() * &other.y
    }

    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }

    /// Orientation of `other` relative to `self`.
    pub fn ccw(&self, other: &Self) -> Ccw {
        ccw(self, other)
    }

    pub fn scaled(&self, k: &T) -> Self {
        Self::new(self.x.clone() * k, self.y.clone() * k)
    }

    pub fn approximation(&self) -> BallVector {
        BallVector {
            x: self.x.approximation(),
            y: self.y.approximation(),
        }
    }

    /// Twice the signed area of the polygon whose consecutive sides are `sides`.
    pub fn area(sides: &[Self]) -> T {
        let mut position = Self::zero();
        let mut area = T::zero();
        for side in sides {
            area += &position.cross(side);
            position += side;
        }
        area
    }
}

impl<T: Coordinate> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T: Coordinate> Add for Vector<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<'a, T: Coordinate> Add<&'a Vector<T>> for &'a Vector<T> {
    type Output = Vector<T>;
    fn add(self, rhs: &'a Vector<T>) -> Vector<T> {
        Vector::new(self.x.clone() + &rhs.x, self.y.clone() + &rhs.y)
    }
}

impl<T: Coordinate> AddAssign<&Vector<T>> for Vector<T> {
    fn add_assign(&mut self, rhs: &Vector<T>) {
        self.x += &rhs.x;
        self.y += &rhs.y;
    }
}

impl<T: Coordinate> Sub for Vector<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<'a, T: Coordinate> Sub<&'a Vector<T>> for &'a Vector<T> {
    type Output = Vector<T>;
    fn sub(self, rhs: &'a Vector<T>) -> Vector<T> {
        Vector::new(self.x.clone() - &rhs.x, self.y.clone() - &rhs.y)
    }
}

impl<T: Coordinate> SubAssign<&Vector<T>> for Vector<T> {
    fn sub_assign(&mut self, rhs: &Vector<T>) {
        self.x -= &rhs.x;
        self.y -= &rhs.y;
    }
}

impl<T: Coordinate> Neg for Vector<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Coordinate> Neg for &Vector<T> {
    type Output = Vector<T>;
    fn neg(self) -> Vector<T> {
        Vector::new(-self.x.clone(), -self.y.clone())
    }
}

impl<T: Coordinate> Mul<&T> for &Vector<T> {
    type Output = Vector<T>;
    fn mul(self, k: &T) -> Vector<T> {
        self.scaled(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rug::Rational;

    #[test]
    fn cross_and_dot() {
        let a = Vector::<i64>::from_i64(1, 0);
        let b = Vector::<i64>::from_i64(0, 1);
        assert_eq!(a.cross(&b), 1);
        assert_eq!(b.cross(&a), -1);
        assert_eq!(a.dot(&b), 0);
        assert_eq!((&a + &b).norm_squared(), 2);
    }

    #[test]
    fn area_of_unit_square_sides() {
        let sides: Vec<Vector<Rational>> = [(1, 0), (0, 1), (-1, 0), (0, -1)]
            .iter()
            .map(|&(x, y)| Vector::from_i64(x, y))
            .collect();
        assert_eq!(Vector::area(&sides), Rational::from(2));
        let reversed: Vec<_> = sides.iter().rev().map(|v| -v).collect();
        assert_eq!(Vector::area(&reversed), Rational::from(-2));
    }
}
