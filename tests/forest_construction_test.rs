//! Tests for building forests from parent and children accessors

use std::collections::HashMap;

use rstest::{fixture, rstest};

use forrest::util::testing;
use forrest::{DetectShape, Forest, ForestError, TraversalMode};

fn parents_of(pairs: &[(u32, u32)]) -> HashMap<u32, u32> {
    pairs.iter().copied().collect()
}

fn children_from(pairs: &[(u32, u32)]) -> HashMap<u32, Vec<u32>> {
    let mut children: HashMap<u32, Vec<u32>> = HashMap::new();
    for &(child, parent) in pairs {
        children.entry(parent).or_default().push(child);
    }
    children
}

/// child -> parent pairs: 1 is the root, 2/3 under 1, 4/5 under 2, 6/7 under 3
fn seven_pairs() -> Vec<(u32, u32)> {
    vec![(2, 1), (3, 1), (4, 2), (5, 2), (6, 3), (7, 3)]
}

/// Two independent trees; 7 declares no parent and is the root of 8.
fn eight_pairs() -> Vec<(u32, u32)> {
    vec![(2, 1), (3, 1), (4, 2), (5, 3), (6, 3), (8, 7)]
}

#[fixture]
fn seven() -> Vec<(u32, u32)> {
    seven_pairs()
}

#[fixture]
fn eight() -> Vec<(u32, u32)> {
    eight_pairs()
}

#[rstest]
fn given_seven_values_when_built_from_parents_then_single_tree(seven: Vec<(u32, u32)>) {
    testing::init_test_setup();
    let parents = parents_of(&seven);

    let forest = Forest::from_parents(1..=7, |v| parents.get(v).copied()).unwrap();

    assert_eq!(forest.root_count(), 1);
    assert_eq!(forest.node_count(), 7);
    assert_eq!(forest.depth(), Ok(3));
    assert_eq!(forest.level_of(&6), Ok(2));
}

#[rstest]
fn given_eight_values_when_built_from_parents_then_two_roots(eight: Vec<(u32, u32)>) {
    let parents = parents_of(&eight);

    let forest = Forest::from_parents(1..=8, |v| parents.get(v).copied()).unwrap();

    assert_eq!(forest.root_count(), 2);
    assert_eq!(forest.node_count(), 8);
    assert_eq!(forest.roots().copied().collect::<Vec<_>>(), vec![1, 7]);
}

#[rstest]
#[case::single_tree(seven_pairs())]
#[case::two_trees(eight_pairs())]
fn given_same_relationships_when_built_either_way_then_metrics_match(
    #[case] pairs: Vec<(u32, u32)>,
) {
    let values: Vec<u32> = (1..=8)
        .filter(|v| pairs.iter().any(|&(c, p)| c == *v || p == *v))
        .collect();
    let parents = parents_of(&pairs);
    let children = children_from(&pairs);

    let by_parent = Forest::from_parents(values.clone(), |v| parents.get(v).copied()).unwrap();
    let by_children = Forest::from_children(values, |v| children.get(v).cloned()).unwrap();

    assert_eq!(by_parent.root_count(), by_children.root_count());
    assert_eq!(by_parent.node_count(), by_children.node_count());
    assert_eq!(by_parent.depth(), by_children.depth());

    let mut left: Vec<u32> = by_parent.flatten(TraversalMode::BreadthFirst).copied().collect();
    let mut right: Vec<u32> = by_children.flatten(TraversalMode::BreadthFirst).copied().collect();
    left.sort_unstable();
    right.sort_unstable();
    assert_eq!(left, right);
}

#[rstest]
#[case::breadth_first(TraversalMode::BreadthFirst)]
#[case::depth_first(TraversalMode::DepthFirst)]
fn given_flattened_forest_when_rebuilt_then_same_shape(
    eight: Vec<(u32, u32)>,
    #[case] mode: TraversalMode,
) {
    let parents = parents_of(&eight);
    let original = Forest::from_parents(1..=8, |v| parents.get(v).copied()).unwrap();

    let flat: Vec<u32> = original.flatten(mode).copied().collect();
    let rebuilt = Forest::from_parents(flat, |v| parents.get(v).copied()).unwrap();

    assert_eq!(rebuilt.root_count(), original.root_count());
    assert_eq!(rebuilt.node_count(), original.node_count());
    assert_eq!(rebuilt.depth(), original.depth());
    for v in 0..=10 {
        assert_eq!(rebuilt.contains(&v), original.contains(&v), "contains({v})");
    }
}

#[rstest]
fn given_built_forest_when_checking_contains_then_only_supplied_values(seven: Vec<(u32, u32)>) {
    let parents = parents_of(&seven);
    let forest = Forest::from_parents(1..=7, |v| parents.get(v).copied()).unwrap();

    assert!((1..=7).all(|v| forest.contains(&v)));
    assert!(!forest.contains(&0));
    assert!(!forest.contains(&8));
}

#[rstest]
fn given_orphan_when_building_then_becomes_root() {
    let forest =
        Forest::from_parents(vec!["a", "b"], |v: &&str| (*v == "b").then_some("ghost")).unwrap();

    assert_eq!(forest.root_count(), 2);
    assert_eq!(forest.parent_of(&"b"), Ok(None));
}

#[rstest]
fn given_duplicate_input_when_building_then_no_forest() {
    let result = Forest::from_children(vec![1, 2, 2], |_: &u32| None::<Vec<u32>>);
    assert_eq!(result.unwrap_err(), ForestError::DuplicateValue("2".to_string()));
}

/// Slash separated paths know their own parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NodePath(String);

impl DetectShape for NodePath {
    fn parent_accessor() -> Option<fn(&Self) -> Option<Self>> {
        let accessor: fn(&Self) -> Option<Self> = |path| {
            path.0
                .rsplit_once('/')
                .map(|(parent, _)| NodePath(parent.to_string()))
        };
        Some(accessor)
    }
}

#[rstest]
fn given_type_declaring_parent_when_built_from_shape_then_linked() {
    let values = ["a", "a/b", "a/b/c", "x"].map(|p| NodePath(p.to_string()));

    let forest = Forest::from_shape(values).unwrap();

    assert_eq!(forest.root_count(), 2);
    assert_eq!(forest.depth(), Ok(3));
    assert_eq!(forest.level_of(&NodePath("a/b/c".to_string())), Ok(2));
}
