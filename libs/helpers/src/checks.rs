use std::collections::HashMap;

use log::debug;

use kth_heap_replay::{
    base::{HeapValue, NodeId},
    HeapNode, StepAction, StepLog,
};

/// Asserts that every snapshot is a min-heap
pub fn check_heap_property(log: &StepLog<HeapValue>) {
    for (step_ix, step) in log.iter().enumerate() {
        for i in 1..step.heap.len() {
            let parent = (i - 1) / 2;
            assert!(
                step.heap[parent].value <= step.heap[i].value,
                "Step {}: {} (at {}) is above {} (at {})",
                step_ix,
                step.heap[parent].value,
                parent,
                step.heap[i].value,
                i
            );
        }
    }
}

/// Asserts that settled heaps hold `min(k, processed)` nodes
///
/// Only an `add` that overflows, i.e. the one right before a `remove`, can
/// hold `k + 1` nodes.
pub fn check_size_bound(log: &StepLog<HeapValue>) {
    let k = log.k();
    let mut processed = 0;
    let steps = log.steps();

    for (step_ix, step) in steps.iter().enumerate() {
        if let StepAction::Add { .. } = step.action {
            processed += 1;
        }

        let overflowing = matches!(step.action, StepAction::Add { .. })
            && matches!(
                steps.get(step_ix + 1).map(|s| &s.action),
                Some(StepAction::Remove { .. })
            );
        let expected = if overflowing { k + 1 } else { processed.min(k) };
        assert_eq!(
            step.heap.len(),
            expected,
            "Step {} ({}) has a heap of size {}",
            step_ix,
            step.action.name(),
            step.heap.len()
        );
    }
}

/// Replays the swaps of each step on the previous snapshot
pub fn check_swap_replay(log: &StepLog<HeapValue>) {
    let steps = log.steps();
    for step_ix in 1..steps.len() {
        let mut nodes: Vec<HeapNode<HeapValue>> = steps[step_ix - 1].heap.clone();
        let step = &steps[step_ix];

        match step.action {
            StepAction::Add {
                added,
                added_node_id,
            } => nodes.push(HeapNode {
                value: added,
                id: added_node_id,
            }),
            StepAction::Remove { .. } => {
                let last = nodes.pop().expect("remove on an empty heap");
                if !nodes.is_empty() {
                    nodes[0] = last;
                }
            }
            _ => {}
        }

        for swap in step.swaps.iter() {
            nodes.swap(swap.from, swap.to);
        }

        assert_eq!(nodes, step.heap, "Swap replay differs at step {}", step_ix);
    }
    debug!("Replayed {} steps", steps.len());
}

/// Asserts that a node id always designates the same value
pub fn check_id_stability(log: &StepLog<HeapValue>) {
    let mut values = HashMap::<NodeId, HeapValue>::new();
    for (step_ix, step) in log.iter().enumerate() {
        for node in step.heap.iter() {
            let value = *values.entry(node.id).or_insert(node.value);
            assert_eq!(
                value, node.value,
                "Node {} changed value at step {}",
                node.id, step_ix
            );
        }
    }
}

pub fn check_all(log: &StepLog<HeapValue>) {
    check_heap_property(log);
    check_size_bound(log);
    check_swap_replay(log);
    check_id_stability(log);
}
