//! Tests for queries and structural edits on a built forest

use std::collections::HashMap;

use rstest::{fixture, rstest};

use forrest::{Forest, ForestError, TraversalMode};

/// 1 -> {2, 3}, 2 -> {4, 5}, 3 -> {6, 7}, plus a second root 8 -> {9}
#[fixture]
fn forest() -> Forest<u32> {
    let parents: HashMap<u32, u32> = [(2, 1), (3, 1), (4, 2), (5, 2), (6, 3), (7, 3), (9, 8)]
        .into_iter()
        .collect();
    Forest::from_parents(1..=9, |v| parents.get(v).copied()).unwrap()
}

fn collect(forest: &Forest<u32>, mode: TraversalMode) -> Vec<u32> {
    forest.flatten(mode).copied().collect()
}

#[rstest]
fn given_forest_when_flattening_then_roots_processed_in_order(forest: Forest<u32>) {
    assert_eq!(
        collect(&forest, TraversalMode::BreadthFirst),
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9]
    );
    assert_eq!(
        collect(&forest, TraversalMode::DepthFirst),
        vec![1, 3, 7, 6, 2, 5, 4, 8, 9]
    );
}

#[rstest]
fn given_flatten_when_called_twice_then_reflects_current_structure(mut forest: Forest<u32>) {
    let before = collect(&forest, TraversalMode::BreadthFirst);
    assert_eq!(before, collect(&forest, TraversalMode::BreadthFirst));

    forest.add_child_of(&9, 10).unwrap();

    assert_eq!(collect(&forest, TraversalMode::BreadthFirst).last(), Some(&10));
}

#[rstest]
#[case::breadth_first(TraversalMode::BreadthFirst, vec![2, 4, 5])]
#[case::depth_first(TraversalMode::DepthFirst, vec![2, 5, 4])]
fn given_value_when_flattening_subtree_then_only_descendants(
    forest: Forest<u32>,
    #[case] mode: TraversalMode,
    #[case] expected: Vec<u32>,
) {
    let subtree: Vec<u32> = forest.flatten_from(&2, mode).unwrap().copied().collect();
    assert_eq!(subtree, expected);
}

#[rstest]
fn given_deep_node_when_traversing_to_root_then_strict_ancestors_without_root(
    mut forest: Forest<u32>,
) {
    forest.add_child_of(&4, 10).unwrap();

    let ancestors: Vec<u32> = forest.traverse_to_root(&10).unwrap().copied().collect();
    assert_eq!(ancestors, vec![4, 2]);

    assert_eq!(forest.traverse_to_root(&8).unwrap().count(), 0);
}

#[rstest]
fn given_forest_when_querying_metrics_then_per_node_values(forest: Forest<u32>) {
    assert_eq!(forest.depth_of(&2), Ok(2));
    assert_eq!(forest.size_of(&3), Ok(3));
    assert_eq!(forest.size_of(&8), Ok(2));
    assert_eq!(forest.is_child_of(&1, &6), Ok(true));
    assert_eq!(forest.is_child_of(&2, &6), Ok(false));
    assert_eq!(
        forest.leaves().into_iter().copied().collect::<Vec<_>>(),
        vec![4, 5, 6, 7, 9]
    );
}

#[rstest]
fn given_missing_value_when_querying_then_value_not_found(forest: Forest<u32>) {
    assert!(matches!(
        forest.level_of(&42),
        Err(ForestError::ValueNotFound { .. })
    ));
    assert!(forest.is_child_of(&1, &42).is_err());
    assert!(forest.is_child_of(&42, &1).is_err());
    assert!(forest.traverse_to_root(&42).is_err());
    assert!(forest.flatten_from(&42, TraversalMode::DepthFirst).is_err());
}

#[rstest]
fn given_interior_node_when_removed_with_promotion_then_children_rise_one_level(
    mut forest: Forest<u32>,
) {
    let count = forest.node_count();
    let levels: Vec<usize> = [4, 5].iter().map(|v| forest.level_of(v).unwrap()).collect();

    forest.remove(&2, false).unwrap();

    assert!(!forest.contains(&2));
    assert_eq!(forest.node_count(), count - 1);
    for (v, level) in [4, 5].iter().zip(levels) {
        assert_eq!(forest.level_of(v), Ok(level - 1));
        assert_eq!(forest.parent_of(v), Ok(Some(&1)));
    }
    assert_eq!(forest.children_of(&1), Ok(vec![&3, &4, &5]));
}

#[rstest]
fn given_root_when_removed_with_promotion_then_children_appended_as_roots(
    mut forest: Forest<u32>,
) {
    forest.remove(&1, false).unwrap();

    assert_eq!(forest.roots().copied().collect::<Vec<_>>(), vec![8, 2, 3]);
    assert_eq!(forest.node_count(), 8);
    assert_eq!(forest.depth(), Ok(2));
}

#[rstest]
fn given_subtree_when_removed_with_descendants_then_count_drops_by_size(mut forest: Forest<u32>) {
    let count = forest.node_count();
    let size = forest.size_of(&3).unwrap();

    assert_eq!(forest.remove(&3, true), Ok(3));

    assert_eq!(forest.node_count(), count - size);
    assert!([3, 6, 7].iter().all(|v| !forest.contains(v)));
}

#[rstest]
fn given_every_root_removed_when_querying_depth_then_empty_forest_error(mut forest: Forest<u32>) {
    forest.remove(&1, true).unwrap();
    forest.remove(&8, true).unwrap();

    assert!(forest.is_empty());
    assert_eq!(forest.depth(), Err(ForestError::EmptyForestDepth));
}

#[rstest]
#[case::under_leaf(6, 9)]
#[case::under_root(2, 8)]
#[case::root_under_other_tree(8, 7)]
fn given_move_when_applied_then_level_follows_new_parent(
    mut forest: Forest<u32>,
    #[case] value: u32,
    #[case] new_parent: u32,
) {
    let count = forest.node_count();

    forest.move_to(&value, &new_parent).unwrap();

    assert_eq!(
        forest.level_of(&value),
        Ok(forest.level_of(&new_parent).unwrap() + 1)
    );
    assert_eq!(forest.is_child_of(&new_parent, &value), Ok(true));
    assert_eq!(forest.node_count(), count);
}

#[rstest]
fn given_root_moved_when_counting_roots_then_root_list_shrinks(mut forest: Forest<u32>) {
    forest.move_to(&8, &1).unwrap();

    assert_eq!(forest.root_count(), 1);
    assert_eq!(forest.children_of(&1), Ok(vec![&2, &3, &8]));
}

#[rstest]
fn given_descendant_as_new_parent_when_moving_then_rejected(mut forest: Forest<u32>) {
    let before = collect(&forest, TraversalMode::BreadthFirst);

    let err = forest.move_to(&1, &7).unwrap_err();

    assert!(matches!(err, ForestError::WouldCreateCycle { .. }));
    assert_eq!(collect(&forest, TraversalMode::BreadthFirst), before);
}

#[rstest]
fn given_existing_value_when_adding_then_duplicate_rejected(mut forest: Forest<u32>) {
    assert_eq!(
        forest.add_child_of(&8, 1),
        Err(ForestError::DuplicateValue("1".to_string()))
    );
    forest.add_child_of(&8, 11).unwrap();
    assert!(forest.contains(&11));
    assert_eq!(forest.level_of(&11), Ok(1));
}
