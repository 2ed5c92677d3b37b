// tests/insertion.rs
mod common;

use common::{init_tracing, l_shape, scaled, square};
use flatsurf::{FlatTriangulation, HalfEdge, Vector};
use rug::Rational;

fn check_insertion(x: i64, y: i64, expected: &str) {
    init_tracing();
    let surface = scaled(l_shape::<i64>(), 3);
    let point = Vector::from_i64(x, y);
    let mut sector = HalfEdge::new(1);
    let (inserted, deformation) = surface.insert_at(&mut sector, &point);
    let inserted_surface = deformation.surface();

    assert_eq!(inserted_surface.to_string(), expected);
    assert_eq!(inserted, HalfEdge::new(-10));
    assert_eq!(inserted_surface.next_at_vertex(sector), inserted);
    assert_eq!(inserted_surface.from_half_edge(inserted), point);
    assert_eq!(inserted_surface.area(), surface.area());
    assert_eq!(inserted_surface.vertices().len(), 2);
    for e in surface.half_edges() {
        if let Some(image) = deformation.apply(e) {
            assert_eq!(image, e);
            assert_eq!(inserted_surface.from_half_edge(image), surface.from_half_edge(e));
        }
    }
}

#[test]
fn test_insert_at_2_1() {
    check_insertion(2, 1, "FlatTriangulationCombinatorial(vertices = (1, -10, 2, 3, 4, 5, -3, 6, 7, 8, -6, -2, -12, 9, -4, -5, -9, -11, -1, -7, -8)(10, 11, 12), faces = (1, -11, 10)(-1, -8, 7)(2, -6, -3)(-2, -10, 12)(3, 5, -4)(4, 9, -5)(6, 8, -7)(-9, -12, 11)) with vectors {1: (3, 0), 2: (3, 3), 3: (0, 3), 4: (-3, 0), 5: (-3, -3), 6: (3, 0), 7: (3, 3), 8: (0, 3), 9: (0, -3), 10: (-2, -1), 11: (1, -1), 12: (1, 2)}");
}

#[test]
fn test_insert_at_1_0() {
    check_insertion(1, 0, "FlatTriangulationCombinatorial(vertices = (1, 8, -6, -2, -12, 9, -4, -5, -9, -11, -7, -8, -10, 2, 3, 4, 5, -3, 6, 7)(-1, 11, 12, 10), faces = (1, 10, -8)(-1, 7, -11)(2, -6, -3)(-2, -10, 12)(3, 5, -4)(4, 9, -5)(6, 8, -7)(-9, -12, 11)) with vectors {1: (1, 3), 2: (3, 3), 3: (0, 3), 4: (-3, 0), 5: (-3, -3), 6: (3, 0), 7: (3, 3), 8: (0, 3), 9: (0, -3), 10: (-1, 0), 11: (2, 0), 12: (2, 3)}");
}

#[test]
fn test_insert_at_4_1() {
    check_insertion(4, 1, "FlatTriangulationCombinatorial(vertices = (1, -10, 5, 9, 2, 4, -9, 6, 7, 8, -6, -5, -12, 3, -2, -4, -3, -11, -1, -7, -8)(10, 11, 12), faces = (1, -11, 10)(-1, -8, 7)(2, 3, -4)(-2, 9, 4)(-3, -12, 11)(5, -6, -9)(-5, -10, 12)(6, 8, -7)) with vectors {1: (3, 0), 2: (3, 3), 3: (-6, -3), 4: (-3, 0), 5: (9, 3), 6: (3, 0), 7: (3, 3), 8: (0, 3), 9: (6, 3), 10: (-4, -1), 11: (-1, -1), 12: (5, 2)}");
}

#[test]
fn test_insert_at_5_1() {
    check_insertion(5, 1, "FlatTriangulationCombinatorial(vertices = (1, -10, 3, 5, 9, 4, -3, -12, 2, -9, 6, 7, 8, -6, -5, -4, -2, -11, -1, -7, -8)(10, 11, 12), faces = (1, -11, 10)(-1, -8, 7)(2, -4, 9)(-2, -12, 11)(3, 4, -5)(-3, -10, 12)(5, -6, -9)(6, 8, -7)) with vectors {1: (3, 0), 2: (-9, -3), 3: (12, 3), 4: (-3, 0), 5: (9, 3), 6: (3, 0), 7: (3, 3), 8: (0, 3), 9: (6, 3), 10: (-5, -1), 11: (-2, -1), 12: (7, 2)}");
}

#[test]
fn test_insertion_over_rationals() {
    let surface = l_shape::<Rational>();
    let point = Vector::new(Rational::from((2, 3)), Rational::from((1, 3)));
    let (inserted, deformation) = surface.insert_at(&mut HalfEdge::new(1), &point);
    assert_eq!(deformation.surface().from_half_edge(inserted), point);
    assert!(deformation.surface().check().is_ok());
}

#[test]
fn test_insertion_leaves_the_original_untouched() {
    let surface = scaled(l_shape::<i64>(), 3);
    let original = surface.clone();
    let _ = surface.insert_at(&mut HalfEdge::new(1), &Vector::from_i64(5, 1));
    assert_eq!(surface, original);
}

#[test]
fn test_slit_at_inserted_vertex() {
    let surface = scaled(square::<i64>(), 3);
    let (inserted, deformation) = surface.insert_at(&mut HalfEdge::new(1), &Vector::from_i64(2, 1));
    let with_vertex = deformation.into_surface();

    let slit = with_vertex.slit(inserted);
    let slit_surface = slit.surface();
    assert_ne!(*slit_surface, with_vertex);
    assert!(slit_surface.boundary(inserted));
    assert!(!slit_surface.boundary(-inserted));
    assert!(slit_surface.has_boundary());
    assert_eq!(slit_surface.size(), with_vertex.size() + 1);
    assert_eq!(slit_surface.area(), with_vertex.area());
}

#[test]
#[should_panic(expected = "already a vertex")]
fn test_insertion_at_a_vertex_is_rejected() {
    let surface = scaled(square::<i64>(), 3);
    surface.insert_at(&mut HalfEdge::new(1), &Vector::from_i64(3, 0));
}

#[test]
fn test_repeated_insertion_into_a_large_l() {
    init_tracing();
    let mut surface = scaled(l_shape::<i64>(), 12);
    let area = surface.area();
    for (x, y) in [(7, 2), (9, 1), (20, 1)] {
        let point = Vector::from_i64(x, y);
        let mut sector = HalfEdge::new(1);
        let (inserted, deformation) = surface.insert_at(&mut sector, &point);
        surface = deformation.into_surface();

        assert!(surface.check().is_ok());
        assert_eq!(surface.from_half_edge(inserted), point);
        assert_eq!(surface.next_at_vertex(sector), inserted);
        assert_eq!(surface.area(), area);
    }
    assert_eq!(surface.vertices().len(), 4);
}

/// Whether the segment from the origin to `(x, y)` on the threefold square
/// or L runs through a vertex before reaching the point.
fn hits_a_vertex(x: i64, y: i64) -> bool {
    let g = gcd(x, y);
    let (xx, yy) = (x / g, y / g);
    (1..=g).any(|n| xx * n % 3 == 0 && yy * n % 3 == 0)
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn check_first_sector(surface: FlatTriangulation<i64>) {
    for x in 1..=31 {
        for y in 1..x {
            if hits_a_vertex(x, y) {
                continue;
            }
            let point = Vector::from_i64(x, y);
            let mut sector = HalfEdge::new(1);
            let (inserted, deformation) = surface.insert_at(&mut sector, &point);
            let with_vertex = deformation.surface();
            assert_eq!(with_vertex.next_at_vertex(sector), inserted, "at {point}");
            assert_eq!(with_vertex.from_half_edge(inserted), point);

            let slit = with_vertex.slit(with_vertex.next_at_vertex(sector));
            assert!(slit.surface().boundary(inserted), "at {point}");
        }
    }
}

#[test]
fn test_slit_at_many_places_in_the_first_sector_of_the_square() {
    check_first_sector(scaled(square::<i64>(), 3));
}

#[test]
fn test_slit_at_many_places_in_the_first_sector_of_the_l() {
    check_first_sector(scaled(l_shape::<i64>(), 3));
}
