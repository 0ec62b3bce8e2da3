//! Binary min-heap whose sift routines report the swaps they perform.
//!
//! The heap is stored as a vector, children of `i` being at `2i+1` and
//! `2i+2`. Every node gets an identifier when it is inserted; positions
//! change with each mutation, identifiers never do.

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::base::{left_child, parent, right_child, HeapIndex, NodeId};
use crate::error::{HeapError, Result};

/// A value together with its stable identity
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeapNode<T> {
    pub value: T,
    pub id: NodeId,
}

impl<T: fmt::Display> fmt::Display for HeapNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},#{})", self.value, self.id)
    }
}

/// Exchange of two positions, recorded in the order sifts perform them
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swap {
    pub from: HeapIndex,
    pub to: HeapIndex,
}

impl Swap {
    /// Replays the exchange on a copy of the heap
    #[inline]
    pub fn apply<T>(&self, nodes: &mut [HeapNode<T>]) {
        nodes.swap(self.from, self.to);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} <-> {}", self.from, self.to)
    }
}

/// Returns the first index whose parent holds a greater value
pub fn heap_property_violation<T: Ord>(nodes: &[HeapNode<T>]) -> Option<HeapIndex> {
    (1..nodes.len()).find(|&i| nodes[parent(i)].value > nodes[i].value)
}

pub fn satisfies_heap_property<T: Ord>(nodes: &[HeapNode<T>]) -> bool {
    heap_property_violation(nodes).is_none()
}

/// A min-heap tracing the swaps of its sift-up and sift-down routines
#[derive(Clone, Debug)]
pub struct TracedMinHeap<T> {
    nodes: Vec<HeapNode<T>>,
    /// Identifier given to the next inserted node
    next_id: NodeId,
}

impl<T: Ord + Copy + fmt::Debug> TracedMinHeap<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// Appends a value and sifts it up
    ///
    /// Returns the identifier of the new node and the swaps that moved it
    /// toward the root.
    pub fn insert(&mut self, value: T) -> (NodeId, Vec<Swap>) {
        let id = self.next_id;
        self.next_id += 1;

        self.nodes.push(HeapNode { value, id });
        let swaps = self.sift_up(self.nodes.len() - 1);
        trace!("Inserted {:?} as node {} ({} swaps)", value, id, swaps.len());

        (id, swaps)
    }

    /// Moves the node at `index` up while it is smaller than its parent
    pub fn sift_up(&mut self, mut index: HeapIndex) -> Vec<Swap> {
        let mut swaps = Vec::new();
        if index >= self.nodes.len() {
            return swaps;
        }

        while index > 0 {
            let parent_ix = parent(index);
            if self.nodes[parent_ix].value <= self.nodes[index].value {
                break;
            }

            trace!("sift-up: {} <-> {}", index, parent_ix);
            self.nodes.swap(index, parent_ix);
            swaps.push(Swap {
                from: index,
                to: parent_ix,
            });
            index = parent_ix;
        }

        swaps
    }

    /// Removes the minimum, moves the last node to the root and sifts it down
    pub fn evict_min(&mut self) -> Result<(HeapNode<T>, Vec<Swap>)> {
        if self.nodes.is_empty() {
            return Err(HeapError::EmptyHeap {
                operation: "evict the minimum",
            });
        }

        let evicted = self.nodes.swap_remove(0);
        let swaps = self.sift_down(0);
        trace!(
            "Evicted {:?} (node {}, {} swaps)",
            evicted.value,
            evicted.id,
            swaps.len()
        );

        Ok((evicted, swaps))
    }

    /// Moves the node at `index` down while a child is smaller
    ///
    /// On equal children, the left one is preferred.
    pub fn sift_down(&mut self, mut index: HeapIndex) -> Vec<Swap> {
        let mut swaps = Vec::new();
        let len = self.nodes.len();

        loop {
            let left = left_child(index);
            let right = right_child(index);
            let mut smallest = index;

            if left < len && self.nodes[left].value < self.nodes[smallest].value {
                smallest = left;
            }
            if right < len && self.nodes[right].value < self.nodes[smallest].value {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            trace!("sift-down: {} <-> {}", index, smallest);
            self.nodes.swap(index, smallest);
            swaps.push(Swap {
                from: index,
                to: smallest,
            });
            index = smallest;
        }

        swaps
    }

    pub fn peek_min(&self) -> Result<T> {
        self.nodes
            .first()
            .map(|node| node.value)
            .ok_or(HeapError::EmptyHeap {
                operation: "peek the minimum",
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The backing sequence, in heap order
    pub fn nodes(&self) -> &[HeapNode<T>] {
        &self.nodes
    }

    /// An independent copy of the backing sequence
    pub fn snapshot(&self) -> Vec<HeapNode<T>> {
        self.nodes.iter().copied().collect()
    }

    pub fn satisfies_heap_property(&self) -> bool {
        satisfies_heap_property(&self.nodes)
    }
}

impl<T: Ord + Copy + fmt::Debug> Default for TracedMinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(heap: &TracedMinHeap<i64>) -> Vec<i64> {
        heap.nodes().iter().map(|n| n.value).collect()
    }

    #[test]
    fn test_empty_heap() {
        let mut heap = TracedMinHeap::<i64>::new();
        assert!(heap.is_empty());
        assert!(matches!(
            heap.peek_min(),
            Err(HeapError::EmptyHeap { .. })
        ));
        assert!(matches!(
            heap.evict_min(),
            Err(HeapError::EmptyHeap { .. })
        ));
    }

    #[test]
    fn test_insert_sifts_up() {
        let mut heap = TracedMinHeap::new();
        assert_eq!(heap.insert(5), (0, vec![]));
        assert_eq!(heap.insert(7), (1, vec![]));

        // 1 lands at index 2, then goes to the root
        let (id, swaps) = heap.insert(1);
        assert_eq!(id, 2);
        assert_eq!(swaps, vec![Swap { from: 2, to: 0 }]);
        assert_eq!(values(&heap), vec![1, 7, 5]);

        // 0 lands at index 3, parent 1 then root
        let (_, swaps) = heap.insert(0);
        assert_eq!(
            swaps,
            vec![Swap { from: 3, to: 1 }, Swap { from: 1, to: 0 }]
        );
        assert_eq!(values(&heap), vec![0, 1, 5, 7]);
        assert_eq!(heap.peek_min(), Ok(0));
    }

    #[test]
    fn test_equal_value_stays_below_parent() {
        let mut heap = TracedMinHeap::new();
        heap.insert(3);
        let (_, swaps) = heap.insert(3);
        assert!(swaps.is_empty());
    }

    #[test]
    fn test_evict_min() {
        let mut heap = TracedMinHeap::new();
        for v in [1, 5, 3, 8, 2, 9, 4] {
            heap.insert(v);
        }
        assert!(heap.satisfies_heap_property());

        let (node, swaps) = heap.evict_min().unwrap();
        assert_eq!(node.value, 1);
        assert_eq!(node.id, 0);
        assert_eq!(heap.len(), 6);
        assert!(heap.satisfies_heap_property());
        assert!(swaps.iter().all(|s| s.to == left_child(s.from) || s.to == right_child(s.from)));

        let mut sorted = vec![];
        while !heap.is_empty() {
            sorted.push(heap.evict_min().unwrap().0.value);
        }
        assert_eq!(sorted, vec![2, 3, 4, 5, 8, 9]);
    }

    #[test]
    fn test_sift_down_prefers_left_on_ties() {
        let mut heap = TracedMinHeap::new();
        // [1, 4, 4, 9]: evicting 1 moves 9 to the root, both children are 4
        for v in [1, 4, 4, 9] {
            heap.insert(v);
        }
        let left_id = heap.nodes()[1].id;

        let (_, swaps) = heap.evict_min().unwrap();
        assert_eq!(swaps, vec![Swap { from: 0, to: 1 }]);
        assert_eq!(heap.nodes()[0].id, left_id);
        assert_eq!(values(&heap), vec![4, 9, 4]);
    }

    #[test]
    fn test_ids_follow_nodes() {
        let mut heap = TracedMinHeap::new();
        let mut ids = vec![];
        for v in [9, 8, 7, 6, 5] {
            ids.push((heap.insert(v).0, v));
        }
        for (id, value) in ids {
            let node = heap.nodes().iter().find(|n| n.id == id).unwrap();
            assert_eq!(node.value, value);
        }
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut heap = TracedMinHeap::new();
        heap.insert(2);
        heap.insert(1);
        let snapshot = heap.snapshot();
        heap.insert(0);
        heap.evict_min().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0], HeapNode { value: 1, id: 1 });
    }

    #[test]
    fn test_heap_property_violation() {
        let nodes = vec![
            HeapNode { value: 1, id: 0 },
            HeapNode { value: 3, id: 1 },
            HeapNode { value: 2, id: 2 },
            HeapNode { value: 0, id: 3 },
        ];
        assert_eq!(heap_property_violation(&nodes), Some(3));
        assert!(satisfies_heap_property(&nodes[..3]));
    }
}
