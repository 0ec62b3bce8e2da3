use std::fmt;

use serde::{Deserialize, Serialize};

use crate::base::{HeapIndex, NodeId};
use crate::heap::{HeapNode, Swap};

/// Which input element a step corresponds to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputPosition {
    /// Nothing processed yet
    Start,
    Element(usize),
    /// All the input has been consumed
    End,
}

/// What happened at a step
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction<T> {
    Start,
    Add { added: T, added_node_id: NodeId },
    Remove { removed: T, removed_node_id: NodeId },
    Done { kth_largest: T },
}

impl<T> StepAction<T> {
    /// Line of the k-th largest listing displayed next to the replay
    ///
    /// ```text
    ///  4 |   heap = MinHeap()
    ///  8 |     heap.push(x)
    /// 11 |       heap.pop()
    /// 15 |   return heap.top()
    /// ```
    pub fn source_line(&self) -> u32 {
        match self {
            StepAction::Start => 4,
            StepAction::Add { .. } => 8,
            StepAction::Remove { .. } => 11,
            StepAction::Done { .. } => 15,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StepAction::Start => "start",
            StepAction::Add { .. } => "add",
            StepAction::Remove { .. } => "remove",
            StepAction::Done { .. } => "done",
        }
    }
}

/// One observable moment of the algorithm
///
/// A step owns a full copy of the heap, so it can be displayed without
/// looking at any other step.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Step<T> {
    pub index: InputPosition,
    pub heap: Vec<HeapNode<T>>,
    #[serde(flatten)]
    pub action: StepAction<T>,
    /// Sift trace that led from the previous heap to this one
    pub swaps: Vec<Swap>,
    pub code_line: u32,
}

impl<T: Copy + PartialEq> Step<T> {
    pub fn new(
        index: InputPosition,
        heap: Vec<HeapNode<T>>,
        action: StepAction<T>,
        swaps: Vec<Swap>,
    ) -> Self {
        Self {
            index,
            heap,
            code_line: action.source_line(),
            action,
            swaps,
        }
    }

    pub fn heap_size(&self) -> usize {
        self.heap.len()
    }

    /// Values of the snapshot, in heap order
    pub fn values(&self) -> Vec<T> {
        self.heap.iter().map(|node| node.value).collect()
    }

    /// Current position of a node in the snapshot
    pub fn position_of(&self, id: NodeId) -> Option<HeapIndex> {
        self.heap.iter().position(|node| node.id == id)
    }

    /// Rebuilds this step's heap from the previous step's heap
    ///
    /// The structural change (append for `add`, last-to-root for `remove`)
    /// is applied first, then the swaps in order. Returns `None` when a swap
    /// points outside the heap.
    pub fn replay_from(&self, previous: &[HeapNode<T>]) -> Option<Vec<HeapNode<T>>> {
        let mut nodes = previous.to_vec();
        match self.action {
            StepAction::Start => return Some(Vec::new()),
            StepAction::Add {
                added,
                added_node_id,
            } => nodes.push(HeapNode {
                value: added,
                id: added_node_id,
            }),
            StepAction::Remove { .. } => {
                if nodes.is_empty() {
                    return None;
                }
                nodes.swap_remove(0);
            }
            StepAction::Done { .. } => {}
        }

        for swap in self.swaps.iter() {
            if swap.from >= nodes.len() || swap.to >= nodes.len() {
                return None;
            }
            swap.apply(&mut nodes);
        }
        Some(nodes)
    }
}

impl<T: fmt::Display> fmt::Display for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.action {
            StepAction::Start => write!(f, "start")?,
            StepAction::Add { added, .. } => write!(f, "add {}", added)?,
            StepAction::Remove { removed, .. } => write!(f, "remove {}", removed)?,
            StepAction::Done { kth_largest } => write!(f, "done: {}", kth_largest)?,
        }
        write!(f, " [")?;
        for (ix, node) in self.heap.iter().enumerate() {
            if ix > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, "]")
    }
}
