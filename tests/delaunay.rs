// tests/delaunay.rs
mod common;

use common::{init_tracing, l_shape, square};
use flatsurf::{Delaunay, FlatTriangulation, HalfEdge, Vector};
use rug::Rational;

fn conditions<T: flatsurf::Coordinate>(surface: &FlatTriangulation<T>) -> Vec<Delaunay> {
    surface.edges().map(|e| surface.delaunay_condition(e)).collect()
}

#[test]
fn test_square_conditions() {
    let (d, a) = (Delaunay::Delaunay, Delaunay::Ambiguous);
    assert_eq!(conditions(&square::<i64>()), [d, d, a]);
}

#[test]
fn test_l_conditions() {
    let (d, a) = (Delaunay::Delaunay, Delaunay::Ambiguous);
    assert_eq!(conditions(&l_shape::<Rational>()), [d, a, d, d, a, d, a, d, d]);
}

#[test]
fn test_delaunay_triangulation_of_a_skewed_torus() {
    init_tracing();
    let mut surface = FlatTriangulation::<i64>::new(
        &[vec![1, 3, 2, -1, -3, -2]],
        vec![
            Vector::from_i64(1, 0),
            Vector::from_i64(7, 1),
            Vector::from_i64(8, 1),
        ],
    )
    .unwrap();
    assert!(!surface.is_delaunay());
    let area = surface.area();

    surface.delaunay();

    assert!(surface.is_delaunay());
    assert_eq!(surface.area(), area);
    for e in surface.edges() {
        assert_ne!(surface.delaunay_condition(e), Delaunay::NonDelaunay);
    }
}

#[test]
fn test_delaunay_is_idempotent() {
    let mut surface = l_shape::<i64>();
    let original = surface.clone();
    surface.delaunay();
    assert_eq!(surface, original);
}

#[test]
fn test_delaunay_after_flipping_each_edge_of_the_square() {
    for id in [1, -1, 2, -2, 3, -3] {
        let mut surface = square::<i64>();
        let e = HalfEdge::new(id);
        if surface.convex(e) {
            surface.flip(e);
        }
        surface.delaunay();
        assert!(surface.is_delaunay(), "after flipping {e}");
        for edge in surface.edges() {
            assert_ne!(surface.delaunay_condition(edge), Delaunay::NonDelaunay);
        }
        assert_eq!(surface.area(), square::<i64>().area());
    }
}
