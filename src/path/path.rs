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

use ahash::AHashSet;

use crate::error::{FlatsurfError, Result};
use crate::geometry::vector::Vector;
use crate::kernel::orientation::{Ccw, ccw};
use crate::numeric::scalar::Coordinate;
use crate::path::saddle_connection::SaddleConnection;

/// Whether a path may continue with `to` after arriving along `from`,
/// i.e., whether `to` leaves the end of `from` at an angle of at least π
/// measured clockwise from where `from` came in.
pub fn connected<T: Coordinate>(from: &SaddleConnection<'_, T>, to: &SaddleConnection<'_, T>) -> bool {
    assert!(
        std::ptr::eq(from.surface(), to.surface()),
        "saddle connections live on different surfaces"
    );
    let surface = from.surface();
    let arrival = -from;
    if arrival.start() != to.start() {
        return false;
    }

    if arrival.source() == to.source() {
        if ccw(arrival.vector(), to.vector()) == Ccw::Clockwise {
            return true;
        }
        return surface.angle(arrival.start()) == 1;
    }

    // Walk clockwise from the arrival, counting half turns.
    let mut turn = 0;
    let mut sector = surface.previous_at_vertex(arrival.source());
    loop {
        let orientation = ccw(arrival.vector(), &surface.from_half_edge(sector));
        if turn == 0 && orientation != Ccw::Clockwise {
            turn = 1;
        } else if turn == 1 && orientation == Ccw::Clockwise {
            turn = 2;
        }
        if sector == to.source() {
            if turn < 2 {
                return true;
            }
            return ccw(arrival.vector(), to.vector()) != Ccw::Clockwise;
        }
        if turn == 2 {
            return false;
        }
        sector = surface.previous_at_vertex(sector);
    }
}

/// A sequence of saddle connections, each leaving where the previous one
/// ended.
#[derive(Clone, PartialEq, Eq)]
pub struct Path<'a, T: Coordinate> {
    segments: Vec<SaddleConnection<'a, T>>,
}

impl<'a, T: Coordinate> Path<'a, T> {
    pub fn new() -> Self {
        Path { segments: Vec::new() }
    }

    pub fn from_segments(segments: Vec<SaddleConnection<'a, T>>) -> Self {
        for pair in segments.windows(2) {
            assert!(
                connected(&pair[0], &pair[1]),
                "{} cannot be followed by {}",
                pair[0],
                pair[1]
            );
        }
        Path { segments }
    }

    pub fn push_back(&mut self, segment: SaddleConnection<'a, T>) {
        if let Some(last) = self.segments.last() {
            assert!(connected(last, &segment), "{last} cannot be followed by {segment}");
        }
        self.segments.push(segment);
    }

    pub fn push_front(&mut self, segment: SaddleConnection<'a, T>) {
        if let Some(first) = self.segments.first() {
            assert!(connected(&segment, first), "{segment} cannot be followed by {first}");
        }
        self.segments.insert(0, segment);
    }

    /// Inserts `other` before the segment at `position`.
    pub fn splice(&mut self, position: usize, other: Path<'a, T>) {
        assert!(position <= self.segments.len(), "cannot splice at {position}");
        if other.is_empty() {
            return;
        }
        if position > 0 {
            let before = &self.segments[position - 1];
            let first = &other.segments[0];
            assert!(connected(before, first), "{before} cannot be followed by {first}");
        }
        if let (Some(after), Some(last)) = (self.segments.get(position), other.segments.last()) {
            assert!(connected(last, after), "{last} cannot be followed by {after}");
        }
        self.segments.splice(position..position, other.segments);
    }

    /// Whether the path ends where it starts, turning as a closed curve does.
    pub fn closed(&self) -> bool {
        match (self.segments.last(), self.segments.first()) {
            (Some(last), Some(first)) => connected(last, first),
            _ => false,
        }
    }

    /// Whether no segment is used twice.
    pub fn simple(&self) -> bool {
        let mut seen = AHashSet::with_capacity(self.segments.len());
        self.segments.iter().all(|segment| seen.insert(segment))
    }

    /// The path traversed backwards.
    pub fn reversed(&self) -> Self {
        Path {
            segments: self.segments.iter().rev().map(|segment| -segment).collect(),
        }
    }

    /// Twice the area enclosed by a closed path.
    pub fn area(&self) -> Result<T> {
        if !self.closed() {
            return Err(FlatsurfError::PathNotClosed {
                path: self.to_string(),
            });
        }
        let sides: Vec<Vector<T>> = self.segments.iter().map(|s| s.vector().clone()).collect();
        Ok(Vector::area(&sides))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaddleConnection<'a, T>> {
        self.segments.iter()
    }

    pub fn segments(&self) -> &[SaddleConnection<'a, T>] {
        &self.segments
    }
}

impl<T: Coordinate> Default for Path<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, 'a, T: Coordinate> IntoIterator for &'p Path<'a, T> {
    type Item = &'p SaddleConnection<'a, T>;
    type IntoIter = std::slice::Iter<'p, SaddleConnection<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Coordinate> fmt::Display for Path<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{segment}")?;
        }
        write!(f, "]")
    }
}

impl<T: Coordinate> fmt::Debug for Path<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
