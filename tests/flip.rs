// tests/flip.rs
mod common;

use common::{l_shape, scaled, square};
use flatsurf::{HalfEdge, Vector};
use proptest::prelude::*;
use rug::Rational;

#[test]
fn test_flip_square() {
    let original = square::<i64>();
    let mut surface = original.clone();
    let e = HalfEdge::new(1);

    surface.flip(e);
    assert_eq!(surface.from_half_edge(e), Vector::from_i64(1, 2));
    assert_eq!(
        surface.to_string(),
        "FlatTriangulationCombinatorial(vertices = (1, 2, -3, -1, -2, 3), faces = (1, -3, -2)(-1, 3, 2)) with vectors {1: (1, 2), 2: (0, 1), 3: (1, 1)}"
    );

    surface.flip(e);
    assert_eq!(surface.from_half_edge(e), Vector::from_i64(-1, 0));
    assert_ne!(surface, original);

    surface.flip(e);
    assert_eq!(surface.from_half_edge(e), Vector::from_i64(-1, -2));

    surface.flip(e);
    assert_eq!(surface, original);
}

#[test]
fn test_flip_preserves_validity() {
    let mut surface = l_shape::<Rational>();
    for id in 1..=9 {
        let e = HalfEdge::new(id);
        if surface.convex(e) {
            surface.flip(e);
            surface.check().unwrap();
        }
    }
    assert_eq!(surface.area(), Rational::from(6));
}

#[test]
#[should_panic(expected = "not strictly convex")]
fn test_non_convex_flip_is_rejected() {
    let surface = scaled(square::<i64>(), 3);
    let (inserted, deformation) = surface.insert_at(&mut HalfEdge::new(1), &Vector::from_i64(2, 1));
    let mut surface = deformation.into_surface();
    // Spokes of a vertex of degree three are never flippable.
    assert!(!surface.convex(inserted));
    surface.flip(inserted);
}

#[test]
fn test_angles() {
    let square = square::<i64>();
    assert_eq!(square.angle(square.vertices()[0]), 1);
    let l = l_shape::<i64>();
    assert_eq!(l.vertices().len(), 1);
    assert_eq!(l.angle(l.vertices()[0]), 3);
}

proptest! {
    #[test]
    fn test_random_flips_keep_the_surface_valid(ids in prop::collection::vec(-9i32..=9, 1..40)) {
        let mut surface = scaled(l_shape::<i64>(), 3);
        let area = surface.area();
        for id in ids.into_iter().filter(|&id| id != 0) {
            let e = HalfEdge::new(id);
            if surface.convex(e) {
                surface.flip(e);
            }
        }
        prop_assert!(surface.check().is_ok());
        prop_assert_eq!(surface.area(), area);
    }

    #[test]
    fn test_four_flips_are_the_identity(id in 1i32..=9, negative in any::<bool>()) {
        let original = l_shape::<i64>();
        let mut surface = original.clone();
        let e = HalfEdge::new(if negative { -id } else { id });
        for _ in 0..4 {
            prop_assume!(surface.convex(e));
            surface.flip(e);
        }
        prop_assert_eq!(surface, original);
    }
}

#[test]
#[should_panic(expected = "must be positive")]
fn test_scaling_by_zero_is_rejected() {
    square::<i64>().scale(&0);
}

#[test]
#[should_panic(expected = "must be positive")]
fn test_scaling_by_a_negative_factor_is_rejected() {
    scaled(square::<Rational>(), -1);
}
