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

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub, SubAssign};
use std::rc::Rc;

use crate::error::{FlatsurfError, Result};
use crate::geometry::vector::Vector;
use crate::kernel::orientation::dot_sign;
use crate::mesh::combinatorial::FlatTriangulationCombinatorial;
use crate::mesh::half_edge::{Edge, HalfEdge};
use crate::mesh::half_edge_map::{Observers, OddHalfEdgeMap};
use crate::mesh::triangulation::{FlatTriangulation, Vectors};
use crate::numeric::ball::Ball;
use crate::numeric::scalar::{Coefficient, Coordinate, Quotient};

type Coefficients<T> = OddHalfEdgeMap<<T as Coordinate>::Coefficient>;

fn update_coefficients_after_flip<C: Coefficient>(
    coefficients: &mut OddHalfEdgeMap<C>,
    surface: &FlatTriangulationCombinatorial,
    flip: HalfEdge,
) {
    let k = coefficients.get(flip);
    if k.is_zero() {
        return;
    }
    // The old diagonal is the sum of the two sides of the quadrilateral it
    // cut, which now follow `flip` around its new source.
    coefficients.add(surface.next_in_face(surface.next_in_face(flip)), &k);
    coefficients.add(surface.next_in_face(-flip), &k);
    coefficients.set(flip, C::zero());
}

/// The non-zero state of a length.
struct Concrete<T: Coordinate> {
    vectors: Rc<RefCell<Vectors<T>>>,
    observers: Rc<Observers>,
    horizontal: Vector<T>,
    coefficients: Rc<RefCell<Coefficients<T>>>,
    approximation: Ball,
}

impl<T: Coordinate> Concrete<T> {
    fn compatible(&self, other: &Self) -> Result<()> {
        if !Rc::ptr_eq(&self.vectors, &other.vectors) {
            return Err(FlatsurfError::MismatchedParent);
        }
        if self.horizontal != other.horizontal {
            return Err(FlatsurfError::MismatchedHorizontal);
        }
        Ok(())
    }

    /// A copy following the same triangulation, or a detached one that does
    /// not see flips.
    fn duplicate(&self, coefficients: Coefficients<T>, attached: bool) -> Self {
        let coefficients = if attached {
            self.observers.track(coefficients)
        } else {
            Rc::new(RefCell::new(coefficients))
        };
        Concrete {
            vectors: Rc::clone(&self.vectors),
            observers: Rc::clone(&self.observers),
            horizontal: self.horizontal.clone(),
            coefficients,
            approximation: self.approximation,
        }
    }

    fn value(&self) -> T {
        let vectors = self.vectors.borrow();
        let mut value = T::zero();
        for (edge, k) in self.coefficients.borrow().iter() {
            if k.is_zero() {
                continue;
            }
            let projection = vectors.get(edge.positive()).dot(&self.horizontal);
            value += &(T::from_coefficient(k) * &projection);
        }
        value
    }
}

/// A non-negative length measured along a fixed horizontal direction,
/// stored as an integer combination of the edges of a triangulation.
///
/// The combination follows the triangulation through flips. Comparisons use
/// a floating point enclosure first and the exact value when it is
/// inconclusive.
pub struct LengthAlongTriangulation<T: Coordinate> {
    state: Option<Concrete<T>>,
}

impl<T: Coordinate> LengthAlongTriangulation<T> {
    /// The zero length.
    pub fn zero() -> Self {
        LengthAlongTriangulation { state: None }
    }

    /// The length of the projection of `e` to `horizontal`.
    pub fn new(surface: &FlatTriangulation<T>, horizontal: &Vector<T>, e: HalfEdge) -> Self {
        let vector = surface.from_half_edge(e);
        assert!(
            dot_sign(&vector, horizontal) != Ordering::Less,
            "lengths must not be negative but {e} points against {horizontal}"
        );
        let mut coefficients = OddHalfEdgeMap::new(surface.size(), T::Coefficient::zero());
        coefficients.set(e, T::Coefficient::one());
        let coefficients = surface
            .track(coefficients.with_update(update_coefficients_after_flip::<T::Coefficient>));
        LengthAlongTriangulation {
            state: Some(Concrete {
                vectors: Rc::clone(surface.vectors_handle()),
                observers: Rc::clone(surface.observers()),
                horizontal: horizontal.clone(),
                coefficients,
                approximation: vector.approximation().dot(horizontal.approximation()),
            }),
        }
    }

    /// The exact value, `Σ k_e · (vector(e) · horizontal)`.
    pub fn value(&self) -> T {
        match &self.state {
            None => T::zero(),
            Some(concrete) => concrete.value(),
        }
    }

    /// An enclosure of [`value`](Self::value).
    pub fn approximation(&self) -> Ball {
        match &self.state {
            None => Ball::zero(),
            Some(concrete) => concrete.approximation,
        }
    }

    pub fn horizontal(&self) -> Option<&Vector<T>> {
        self.state.as_ref().map(|concrete| &concrete.horizontal)
    }

    /// The non-zero coefficients by edge.
    pub fn coefficients(&self) -> Vec<(Edge, T::Coefficient)> {
        match &self.state {
            None => Vec::new(),
            Some(concrete) => concrete
                .coefficients
                .borrow()
                .iter()
                .filter(|(_, k)| !k.is_zero())
                .map(|(edge, k)| (edge, k.clone()))
                .collect(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match &self.state {
            None => true,
            Some(concrete) => match concrete.approximation.sign_if_certain() {
                Some(sign) => sign == 0,
                None => concrete.value().is_zero(),
            },
        }
    }

    pub fn try_add_assign(&mut self, rhs: &Self) -> Result<()> {
        let Some(summand) = &rhs.state else {
            return Ok(());
        };
        let Some(lhs) = &mut self.state else {
            *self = rhs.clone();
            return Ok(());
        };
        lhs.compatible(summand)?;
        {
            let mut coefficients = lhs.coefficients.borrow_mut();
            for (edge, k) in summand.coefficients.borrow().iter() {
                coefficients.add(edge.positive(), k);
            }
        }
        lhs.approximation = lhs.approximation.add(summand.approximation);
        Ok(())
    }

    pub fn try_sub_assign(&mut self, rhs: &Self) -> Result<()> {
        let Some(subtrahend) = &rhs.state else {
            return Ok(());
        };
        let Some(lhs) = &self.state else {
            return if rhs.is_zero() { Ok(()) } else { Err(FlatsurfError::NegativeLength) };
        };
        lhs.compatible(subtrahend)?;
        if rhs.cmp(self) == Ordering::Greater {
            return Err(FlatsurfError::NegativeLength);
        }
        {
            let mut coefficients = lhs.coefficients.borrow_mut();
            for (edge, k) in subtrahend.coefficients.borrow().iter() {
                coefficients.add(edge.positive(), &-k.clone());
            }
        }
        if let Some(lhs) = &mut self.state {
            lhs.approximation = lhs.approximation.sub(subtrahend.approximation);
        }
        Ok(())
    }

    pub fn try_mul_assign(&mut self, k: &Quotient) -> Result<()> {
        if *k < 0 {
            return Err(FlatsurfError::NegativeLength);
        }
        let Some(concrete) = &mut self.state else {
            return Ok(());
        };
        let scaled = Self::scaled_coefficients(concrete, k)?;
        {
            let mut coefficients = concrete.coefficients.borrow_mut();
            for (e, value) in scaled {
                coefficients.set(e, value);
            }
        }
        concrete.approximation = concrete.approximation.mul(Ball::from_integer(k));
        Ok(())
    }

    fn scaled_coefficients(concrete: &Concrete<T>, k: &Quotient) -> Result<Vec<(HalfEdge, T::Coefficient)>> {
        concrete
            .coefficients
            .borrow()
            .iter()
            .map(|(edge, c)| {
                c.checked_scale(k)
                    .map(|scaled| (edge.positive(), scaled))
                    .ok_or(FlatsurfError::Overflow)
            })
            .collect()
    }

    /// `k · self` on a copy that is not updated by flips.
    fn multiple(&self, k: &Quotient) -> Result<Self> {
        let Some(concrete) = &self.state else {
            return Ok(Self::zero());
        };
        let mut coefficients = OddHalfEdgeMap::new(0, T::Coefficient::zero());
        for (_, c) in Self::scaled_coefficients(concrete, k)? {
            coefficients.push(c);
        }
        let mut multiple = concrete.duplicate(coefficients, false);
        multiple.approximation = concrete.approximation.mul(Ball::from_integer(k));
        Ok(LengthAlongTriangulation { state: Some(multiple) })
    }

    /// The largest integer `q` with `q · rhs <= self`.
    pub fn try_div(&self, rhs: &Self) -> Result<Quotient> {
        if rhs.is_zero() {
            return Err(FlatsurfError::DivisionByZero);
        }
        let (Some(lhs), Some(divisor)) = (&self.state, &rhs.state) else {
            return Ok(Quotient::new());
        };
        lhs.compatible(divisor)?;

        let mut quotient = self
            .approximation()
            .div(rhs.approximation())
            .floor_estimate()
            .unwrap_or_default();
        if quotient < 0 {
            quotient = Quotient::new();
        }
        while rhs.multiple(&quotient)? < *self {
            quotient += 1;
        }
        while rhs.multiple(&quotient)? > *self {
            quotient -= 1;
        }
        Ok(quotient)
    }
}

impl<T: Coordinate> Default for LengthAlongTriangulation<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Coordinate> Clone for LengthAlongTriangulation<T> {
    fn clone(&self) -> Self {
        LengthAlongTriangulation {
            state: self
                .state
                .as_ref()
                .map(|concrete| concrete.duplicate(concrete.coefficients.borrow().clone(), true)),
        }
    }
}

impl<T: Coordinate> PartialEq for LengthAlongTriangulation<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Coordinate> Eq for LengthAlongTriangulation<T> {}

impl<T: Coordinate> PartialOrd for LengthAlongTriangulation<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Coordinate> Ord for LengthAlongTriangulation<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.approximation(), other.approximation());
        if a.eq_if_certain(b) == Some(true) {
            return Ordering::Equal;
        }
        if let Some(less) = a.lt_if_certain(b) {
            return if less { Ordering::Less } else { Ordering::Greater };
        }
        self.value().cmp(&other.value())
    }
}

impl<T: Coordinate> AddAssign<&LengthAlongTriangulation<T>> for LengthAlongTriangulation<T> {
    fn add_assign(&mut self, rhs: &Self) {
        if let Err(err) = self.try_add_assign(rhs) {
            panic!("{err}");
        }
    }
}

impl<T: Coordinate> SubAssign<&LengthAlongTriangulation<T>> for LengthAlongTriangulation<T> {
    fn sub_assign(&mut self, rhs: &Self) {
        if let Err(err) = self.try_sub_assign(rhs) {
            panic!("{err}");
        }
    }
}

impl<T: Coordinate> MulAssign<&Quotient> for LengthAlongTriangulation<T> {
    fn mul_assign(&mut self, k: &Quotient) {
        if let Err(err) = self.try_mul_assign(k) {
            panic!("{err}");
        }
    }
}

impl<T: Coordinate> Add for &LengthAlongTriangulation<T> {
    type Output = LengthAlongTriangulation<T>;
    fn add(self, rhs: Self) -> LengthAlongTriangulation<T> {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl<T: Coordinate> Sub for &LengthAlongTriangulation<T> {
    type Output = LengthAlongTriangulation<T>;
    fn sub(self, rhs: Self) -> LengthAlongTriangulation<T> {
        let mut difference = self.clone();
        difference -= rhs;
        difference
    }
}

impl<T: Coordinate> Mul<&Quotient> for &LengthAlongTriangulation<T> {
    type Output = LengthAlongTriangulation<T>;
    fn mul(self, k: &Quotient) -> LengthAlongTriangulation<T> {
        let mut product = self.clone();
        product *= k;
        product
    }
}

impl<T: Coordinate> Div for &LengthAlongTriangulation<T> {
    type Output = Quotient;
    fn div(self, rhs: Self) -> Quotient {
        match self.try_div(rhs) {
            Ok(quotient) => quotient,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Coordinate> fmt::Display for LengthAlongTriangulation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl<T: Coordinate> fmt::Debug for LengthAlongTriangulation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            None => write!(f, "LengthAlongTriangulation(0)"),
            Some(concrete) => write!(
                f,
                "LengthAlongTriangulation({} along {}, ≈{})",
                concrete.value(),
                concrete.horizontal,
                concrete.approximation.m
            ),
        }
    }
}
