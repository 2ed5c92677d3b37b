// tests/isomorphism.rs
mod common;

use common::{l_shape, scaled, square};
use flatsurf::{Coordinate, Deformation, FlatTriangulation, HalfEdge, Isomorphism};
use rug::Rational;

/// All linear parts of isomorphisms from `surface` to itself.
fn automorphisms<T: Coordinate>(surface: &FlatTriangulation<T>, criterion: Isomorphism) -> Vec<[T; 4]> {
    let mut found: Vec<[T; 4]> = Vec::new();
    loop {
        let mut accepted = None;
        let deformation = surface.isomorphism_with(surface, criterion, |a, b, c, d| {
            let map = [a.clone(), b.clone(), c.clone(), d.clone()];
            if found.contains(&map) {
                return false;
            }
            accepted = Some(map);
            true
        });
        match (deformation, accepted) {
            (Some(_), Some(map)) => found.push(map),
            _ => return found,
        }
    }
}

/// Checks that `deformation` sends every half-edge it keeps to a half-edge
/// whose vector is the image under `map`, and returns the images.
fn check_linear_part<T: Coordinate>(
    surface: &FlatTriangulation<T>,
    deformation: &Deformation<T>,
    map: &[T; 4],
) -> Vec<HalfEdge> {
    let [a, b, c, d] = map;
    let mut images = Vec::new();
    for e in surface.half_edges() {
        let Some(image) = deformation.apply(e) else {
            continue;
        };
        let v = surface.from_half_edge(e);
        let w = deformation.surface().from_half_edge(image);
        assert_eq!(a.clone() * &v.x + b.clone() * &v.y, w.x, "{e} to {image}");
        assert_eq!(c.clone() * &v.x + d.clone() * &v.y, w.y, "{e} to {image}");
        images.push(image);
    }
    images.sort_by_key(|e| e.index());
    images
}

#[test]
fn test_identity() {
    let surface = square::<i64>();
    let deformation = surface
        .isomorphism(&surface, Isomorphism::Faces)
        .expect("the identity");
    for e in surface.half_edges() {
        assert_eq!(deformation.apply(e), Some(e));
    }
}

#[test]
fn test_automorphisms_of_the_square() {
    let surface = square::<Rational>();
    assert_eq!(automorphisms(&surface, Isomorphism::Faces).len(), 6);
    assert_eq!(automorphisms(&surface, Isomorphism::DelaunayCells).len(), 4);
}

#[test]
fn test_automorphisms_of_the_l() {
    let surface = l_shape::<Rational>();
    assert_eq!(automorphisms(&surface, Isomorphism::Faces).len(), 2);
    assert_eq!(automorphisms(&surface, Isomorphism::DelaunayCells).len(), 4);
}

#[test]
fn test_scaled_surfaces() {
    for surface in [square::<Rational>(), l_shape::<Rational>()] {
        let twice = scaled(surface.clone(), 2);
        assert!(surface.isomorphism(&twice, Isomorphism::Faces).is_none());

        let mut linear = None;
        let deformation = surface.isomorphism_with(&twice, Isomorphism::Faces, |a, b, c, d| {
            linear = Some([a.clone(), b.clone(), c.clone(), d.clone()]);
            true
        });
        let two = Rational::from(2);
        let zero = Rational::new();
        assert_eq!(linear, Some([two.clone(), zero.clone(), zero.clone(), two.clone()]));

        let deformation = deformation.expect("a scaling isomorphism");
        let images = check_linear_part(&surface, &deformation, &[two.clone(), zero.clone(), zero, two]);
        assert_eq!(images, twice.half_edges().collect::<Vec<_>>());
    }
}

#[test]
fn test_isomorphisms_carry_vectors_along_their_linear_part() {
    for surface in [square::<Rational>(), l_shape::<Rational>()] {
        for criterion in [Isomorphism::Faces, Isomorphism::DelaunayCells] {
            for map in automorphisms(&surface, criterion) {
                let deformation = surface
                    .isomorphism_with(&surface, criterion, |a, b, c, d| [a, b, c, d] == [&map[0], &map[1], &map[2], &map[3]])
                    .expect("an automorphism found before");
                let images = check_linear_part(&surface, &deformation, &map);
                if criterion == Isomorphism::Faces {
                    assert_eq!(images, surface.half_edges().collect::<Vec<_>>());
                } else {
                    assert!(!images.is_empty());
                }
            }
        }
    }
}

#[test]
fn test_different_surfaces_are_not_isomorphic() {
    let square = square::<i64>();
    let l = l_shape::<i64>();
    assert!(square.isomorphism(&l, Isomorphism::Faces).is_none());
    assert!(square.isomorphism_with(&l, Isomorphism::DelaunayCells, |_, _, _, _| true).is_none());
}
