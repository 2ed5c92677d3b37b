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

use thiserror::Error;

/// Errors reported by constructors and by the exact length arithmetic.
///
/// Caller misuse (flipping a boundary edge, inserting outside a face, ...)
/// is not represented here; those are contract violations and panic.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FlatsurfError {
    /// The supplied cycles do not partition the domain exactly once.
    #[error("invalid permutation: {message}")]
    InvalidPermutation { message: String },
    /// The permutations do not describe a triangulated surface.
    #[error("invalid triangulation: {message}")]
    InvalidTriangulation { message: String },
    /// The vectors around a face do not sum to zero.
    #[error("face ({a}, {b}, {c}) is not closed")]
    FaceNotClosed { a: i32, b: i32, c: i32 },
    /// A face is not strictly counterclockwise.
    #[error("face ({a}, {b}, {c}) is degenerate or clockwise")]
    DegenerateFace { a: i32, b: i32, c: i32 },
    /// The result of an operation on lengths would be negative.
    #[error("lengths must not be negative")]
    NegativeLength,
    /// Integer division by a zero length.
    #[error("division by zero length")]
    DivisionByZero,
    /// Two lengths live on different triangulations.
    #[error("lengths must be defined on the same triangulation")]
    MismatchedParent,
    /// Two lengths are measured along different horizontal directions.
    #[error("lengths must be measured along the same horizontal direction")]
    MismatchedHorizontal,
    /// A fixed-width coefficient left its representable range.
    #[error("coefficient overflow")]
    Overflow,
    /// The operation is only defined for closed paths.
    #[error("path {path} is not closed")]
    PathNotClosed { path: String },
    /// A deformation would produce an invalid surface.
    #[error("invalid deformation: {message}")]
    InvalidDeformation { message: String },
}

pub type Result<T> = std::result::Result<T, FlatsurfError>;
