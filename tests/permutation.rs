// tests/permutation.rs
use flatsurf::{HalfEdge, HalfEdgeSet, Permutation};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn half_edges(edges: usize) -> Vec<HalfEdge> {
    (0..2 * edges).map(HalfEdge::from_index).collect()
}

#[test]
fn test_cycles_start_at_their_smallest_element() {
    let p = Permutation::from_cycles(&[
        vec![HalfEdge::new(-1), HalfEdge::new(2)],
        vec![HalfEdge::new(-2), HalfEdge::new(1)],
    ])
    .unwrap();
    assert_eq!(p.apply(HalfEdge::new(-1)), HalfEdge::new(2));
    assert_eq!(p.preimage(HalfEdge::new(1)), HalfEdge::new(-2));
    assert_eq!(p.to_string(), "(1, -2)(-1, 2)");
    assert_eq!(p.cycle(HalfEdge::new(2)), vec![HalfEdge::new(2), HalfEdge::new(-1)]);
}

#[test]
fn test_invalid_cycles_are_rejected() {
    let repeated = Permutation::from_cycles(&[vec![HalfEdge::new(1), HalfEdge::new(1)]]);
    assert!(repeated.is_err());
    let gap = Permutation::from_cycles(&[vec![HalfEdge::new(1), HalfEdge::new(3), HalfEdge::new(-1)]]);
    assert!(gap.is_err());
    assert!(Permutation::<HalfEdge>::from_cycles(&[vec![]]).is_err());
}

#[test]
fn test_random_permutations_are_reproducible() {
    let domain = half_edges(8);
    let p = Permutation::random(&domain, &mut StdRng::seed_from_u64(7));
    let q = Permutation::random(&domain, &mut StdRng::seed_from_u64(7));
    assert_eq!(p, q);
    let images: HalfEdgeSet = domain.iter().map(|&e| p.apply(e)).collect();
    assert_eq!(images.len(), domain.len());
}

proptest! {
    #[test]
    fn test_cycles_round_trip(edges in 1usize..40, seed in any::<u64>()) {
        let domain = half_edges(edges);
        let p = Permutation::random(&domain, &mut StdRng::seed_from_u64(seed));
        let q = Permutation::from_cycles(&p.cycles()).unwrap();
        prop_assert_eq!(&p, &q);
        for e in domain {
            prop_assert_eq!(p.preimage(p.apply(e)), e);
        }
    }
}
