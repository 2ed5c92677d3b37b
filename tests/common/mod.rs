// tests/common/mod.rs
#![allow(dead_code)]

use flatsurf::{Coordinate, FlatTriangulation, Vector};

/// The unit square torus made of two triangles.
pub fn square<T: Coordinate>() -> FlatTriangulation<T> {
    FlatTriangulation::new(
        &[vec![1, 3, 2, -1, -3, -2]],
        vec![
            Vector::from_i64(1, 0),
            Vector::from_i64(0, 1),
            Vector::from_i64(1, 1),
        ],
    )
    .unwrap()
}

/// An L made of three unit squares, a surface of genus two with a single
/// vertex of total angle 6π.
pub fn l_shape<T: Coordinate>() -> FlatTriangulation<T> {
    FlatTriangulation::new(
        &[vec![1, 2, 3, 4, 5, -3, 6, 7, 8, -6, -2, 9, -4, -5, -9, -1, -7, -8]],
        vec![
            Vector::from_i64(1, 0),
            Vector::from_i64(1, 1),
            Vector::from_i64(0, 1),
            Vector::from_i64(-1, 0),
            Vector::from_i64(-1, -1),
            Vector::from_i64(1, 0),
            Vector::from_i64(1, 1),
            Vector::from_i64(0, 1),
            Vector::from_i64(0, -1),
        ],
    )
    .unwrap()
}

pub fn scaled<T: Coordinate>(surface: FlatTriangulation<T>, k: i64) -> FlatTriangulation<T> {
    surface.scale(&T::from_i64(k))
}

/// Routes `tracing` output of the library through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
