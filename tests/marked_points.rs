// tests/marked_points.rs
mod common;

use common::{init_tracing, l_shape, square};
use flatsurf::{Coordinate, FlatTriangulation, HalfEdge, Vector};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rug::Rational;

fn marked<T: Coordinate>(surface: &FlatTriangulation<T>) -> usize {
    surface
        .vertices()
        .into_iter()
        .filter(|&vertex| surface.is_marked(vertex))
        .count()
}

/// Inserts a vertex at the centroid of the face to the left of each of the
/// given half-edges in turn.
fn with_points(surface: FlatTriangulation<Rational>, faces: &[i32]) -> FlatTriangulation<Rational> {
    faces.iter().fold(surface, |surface, &id| {
        with_centroid(surface, HalfEdge::new(id))
    })
}

fn with_centroid(surface: FlatTriangulation<Rational>, mut e: HalfEdge) -> FlatTriangulation<Rational> {
    let side = surface.from_half_edge(e);
    let diagonal = &side + &surface.from_half_edge(surface.next_in_face(e));
    let centroid = (&side + &diagonal).scaled(&Rational::from((1, 3)));
    let (_, deformation) = surface.insert_at(&mut e, &centroid);
    deformation.into_surface()
}

/// Flips up to `flips` half-edges picked by `rng`, skipping the ones that
/// cannot be flipped.
fn shuffled(mut surface: FlatTriangulation<Rational>, flips: usize, rng: &mut StdRng) -> FlatTriangulation<Rational> {
    for _ in 0..flips {
        let e = HalfEdge::from_index(rng.random_range(0..2 * surface.size()));
        if surface.convex(e) {
            surface.flip(e);
        }
    }
    surface
}

fn rational(x: i64, y: i64, d: i64) -> Vector<Rational> {
    Vector::new(Rational::from((x, d)), Rational::from((y, d)))
}

#[test]
fn test_nothing_to_eliminate() {
    let surface = l_shape::<i64>();
    let deformation = surface.eliminate_marked_points().unwrap();
    assert_eq!(*deformation.surface(), surface);
    for e in surface.half_edges() {
        assert_eq!(deformation.apply(e), Some(e));
    }
}

#[test]
fn test_eliminate_on_the_l() {
    init_tracing();
    let base = l_shape::<Rational>();
    for faces in [[1, 5, -7], [1, 1, -10]] {
        let surface = with_points(base.clone(), &faces);
        assert_eq!(surface.vertices().len(), 4);
        assert_eq!(marked(&surface), 3);

        let deformation = surface.eliminate_marked_points().unwrap();
        let result = deformation.surface();
        assert_eq!(marked(result), 0);
        assert_eq!(result.vertices().len(), 1);
        assert_eq!(result.size(), base.size());
        assert_eq!(result.area(), base.area());
        assert!(result.check().is_ok());
    }
}

#[test]
fn test_torus_keeps_one_marked_point() {
    let base = square::<Rational>();
    for faces in [&[1, -1][..], &[1, 2, 3, -4][..]] {
        let surface = with_points(base.clone(), faces);
        assert_eq!(marked(&surface), faces.len() + 1);

        let deformation = surface.eliminate_marked_points().unwrap();
        let result = deformation.surface();
        assert_eq!(result.vertices().len(), 1);
        assert_eq!(marked(result), 1);
        assert_eq!(result.size(), 3);
        assert_eq!(result.area(), base.area());
    }
}

#[test]
fn test_surviving_half_edges_keep_their_vectors() {
    let surface = with_points(l_shape::<Rational>(), &[5]);
    let deformation = surface.eliminate_marked_points().unwrap();
    let mut survivors = 0;
    for e in surface.half_edges() {
        if let Some(image) = deformation.apply(e) {
            survivors += 1;
            assert_eq!(deformation.surface().from_half_edge(image), surface.from_half_edge(e));
        }
    }
    assert!(survivors > 0);
}

#[test]
fn test_marked_points_joined_by_loops() {
    init_tracing();
    // Two marked points on the unit torus, each with a loop around it.
    let surface = FlatTriangulation::new(
        &[vec![1, -4, 5, -1, -2, -6], vec![2, 6, 3, 4, -5, -3]],
        vec![
            rational(1, 0, 1),
            rational(4, 2, 3),
            rational(-1, 0, 1),
            rational(-2, -1, 3),
            rational(-1, 1, 3),
            rational(1, 2, 3),
        ],
    )
    .unwrap();
    assert_eq!(marked(&surface), 2);

    let deformation = surface.eliminate_marked_points().unwrap();
    let result = deformation.surface();
    assert_eq!(result.vertices().len(), 1);
    assert_eq!(marked(result), 1);
    assert_eq!(result.size(), 3);
    assert_eq!(result.area(), surface.area());
}

#[test]
fn test_eliminate_after_random_flips() {
    let base = square::<Rational>();
    let mut rng = StdRng::seed_from_u64(1);
    let surface = shuffled(with_centroid(base.clone(), HalfEdge::new(1)), 30, &mut rng);

    let deformation = surface.eliminate_marked_points().unwrap();
    let result = deformation.surface();
    assert!(result.check().is_ok());
    assert_eq!(result.vertices().len(), 1);
    assert_eq!(result.area(), base.area());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_eliminate_random_marked_points(
        seed in any::<u64>(),
        on_the_l in any::<bool>(),
        points in 1usize..=3,
        flips in 0usize..40,
    ) {
        let base = if on_the_l { l_shape::<Rational>() } else { square::<Rational>() };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut surface = base.clone();
        for _ in 0..points {
            let e = HalfEdge::from_index(rng.random_range(0..2 * surface.size()));
            surface = with_centroid(surface, e);
        }
        let surface = shuffled(surface, flips, &mut rng);

        let deformation = surface.eliminate_marked_points().unwrap();
        let result = deformation.surface();
        prop_assert!(result.check().is_ok());
        prop_assert_eq!(result.area(), base.area());
        prop_assert_eq!(result.vertices().len(), 1);
        prop_assert_eq!(result.size(), base.size());
        prop_assert_eq!(marked(result), if on_the_l { 0 } else { 1 });
        for e in surface.half_edges() {
            if let Some(image) = deformation.apply(e) {
                prop_assert_eq!(result.from_half_edge(image), surface.from_half_edge(e));
            }
        }
    }
}
