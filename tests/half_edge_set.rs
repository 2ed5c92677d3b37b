// tests/half_edge_set.rs
use flatsurf::{Edge, EdgeSet, HalfEdge, HalfEdgeSet};

#[test]
fn test_membership() {
    let mut set = HalfEdgeSet::new();
    assert!(set.is_empty());
    assert!(set.insert(HalfEdge::new(-2)));
    assert!(!set.insert(HalfEdge::new(-2)));
    assert!(set.insert(HalfEdge::new(1)));
    assert!(set.contains(HalfEdge::new(-2)));
    assert!(!set.contains(HalfEdge::new(2)));
    assert_eq!(set.len(), 2);
    assert_eq!(set.to_string(), "{1, -2}");

    assert!(set.erase(HalfEdge::new(1)));
    assert!(!set.erase(HalfEdge::new(1)));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![HalfEdge::new(-2)]);
}

#[test]
fn test_disjoint() {
    let a: EdgeSet = [Edge::new(1), Edge::new(3)].into_iter().collect();
    let b: EdgeSet = [Edge::new(2)].into_iter().collect();
    let c: EdgeSet = [Edge::new(3), Edge::new(4)].into_iter().collect();
    assert!(a.disjoint(&b));
    assert!(!a.disjoint(&c));
    assert!(EdgeSet::new().disjoint(&a));
}

#[test]
#[should_panic(expected = "reserved")]
fn test_zero_is_not_a_half_edge() {
    HalfEdge::new(0);
}
