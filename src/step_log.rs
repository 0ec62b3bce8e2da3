//! Recording of a k-th largest run, one step per heap mutation.

use std::{collections::HashSet, fmt, io::Write};

use log::{debug, info};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::cursor::ReplayCursor;
use crate::error::{HeapError, Result, StepLogViolation};
use crate::heap::{heap_property_violation, TracedMinHeap};
use crate::options::SimulationOptions;
use crate::step::{InputPosition, Step, StepAction};

/// The recorded history of a run
///
/// A log is only built by [simulate] (or read back from JSON) and is never
/// modified afterwards, so any number of cursors can share it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "RecordedSteps<T>")]
pub struct StepLog<T> {
    k: usize,
    input: Vec<T>,
    steps: Vec<Step<T>>,
}

#[derive(Deserialize)]
struct RecordedSteps<T> {
    k: usize,
    input: Vec<T>,
    steps: Vec<Step<T>>,
}

impl<T> TryFrom<RecordedSteps<T>> for StepLog<T> {
    type Error = &'static str;

    fn try_from(recorded: RecordedSteps<T>) -> std::result::Result<Self, Self::Error> {
        if recorded.steps.is_empty() {
            return Err("a step log holds at least one step");
        }
        Ok(Self {
            k: recorded.k,
            input: recorded.input,
            steps: recorded.steps,
        })
    }
}

/// Runs the bounded min-heap over `input` and records every step
///
/// The log starts with a `start` step, holds an `add` step per element
/// (followed by a `remove` step once the heap exceeds `k` elements) and ends
/// with a `done` step giving the k-th largest element.
pub fn simulate<T>(input: &[T], k: usize, options: &SimulationOptions) -> Result<StepLog<T>>
where
    T: Ord + Copy + fmt::Debug,
{
    options.check_bounds(k, input.len())?;

    let mut heap = TracedMinHeap::with_capacity(k + 1);
    let mut steps = Vec::with_capacity(2 * input.len() + 2);
    steps.push(Step::new(
        InputPosition::Start,
        Vec::new(),
        StepAction::Start,
        Vec::new(),
    ));

    for (ix, &value) in input.iter().enumerate() {
        let (id, swaps) = heap.insert(value);
        debug!("[{}] Added {:?} as node {} ({} swaps)", ix, value, id, swaps.len());
        steps.push(Step::new(
            InputPosition::Element(ix),
            heap.snapshot(),
            StepAction::Add {
                added: value,
                added_node_id: id,
            },
            swaps,
        ));

        if heap.len() > k {
            let (evicted, swaps) = heap.evict_min()?;
            debug!(
                "[{}] Removed {:?} (node {}, {} swaps)",
                ix,
                evicted.value,
                evicted.id,
                swaps.len()
            );
            steps.push(Step::new(
                InputPosition::Element(ix),
                heap.snapshot(),
                StepAction::Remove {
                    removed: evicted.value,
                    removed_node_id: evicted.id,
                },
                swaps,
            ));
        }
    }

    if heap.len() < k {
        return Err(HeapError::InsufficientElements {
            k,
            size: heap.len(),
        });
    }

    let kth_largest = heap.peek_min()?;
    steps.push(Step::new(
        InputPosition::End,
        heap.snapshot(),
        StepAction::Done { kth_largest },
        Vec::new(),
    ));

    info!(
        "The {}-th largest of {} element(s) is {:?} ({} steps)",
        k,
        input.len(),
        kth_largest,
        steps.len()
    );

    Ok(StepLog {
        k,
        input: input.to_vec(),
        steps,
    })
}

impl<T> StepLog<T> {
    pub fn k(&self) -> usize {
        self.k
    }

    /// The sequence the run was computed on
    pub fn input(&self) -> &[T] {
        &self.input
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: a log holds at least its first step
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step<T>> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<T>> {
        self.steps.iter()
    }

    pub fn first(&self) -> Option<&Step<T>> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step<T>> {
        self.steps.last()
    }

    /// A cursor positioned on the start step
    pub fn cursor(&self) -> ReplayCursor<'_, T> {
        ReplayCursor::new(self)
    }
}

impl<T: Copy> StepLog<T> {
    /// The answer carried by the final step
    pub fn kth_largest(&self) -> Option<T> {
        match self.steps.last().map(|step| &step.action) {
            Some(StepAction::Done { kth_largest }) => Some(*kth_largest),
            _ => None,
        }
    }
}

impl<T: Ord + Copy> StepLog<T> {
    /// Checks that the log describes a well-formed run
    ///
    /// Every snapshot must be a min-heap, each step must be reproducible by
    /// replaying its swaps on the previous snapshot, and heap sizes must
    /// follow the bound `k` (an `add` may hold `k + 1` nodes until the
    /// `remove` that follows it).
    pub fn validate(&self) -> std::result::Result<(), StepLogViolation> {
        let first = self.steps.first().ok_or(StepLogViolation::Empty)?;
        if first.action != StepAction::Start
            || first.index != InputPosition::Start
            || !first.heap.is_empty()
        {
            return Err(StepLogViolation::BadStart { step: 0 });
        }

        let last_ix = self.steps.len() - 1;
        let mut seen = HashSet::new();
        let mut processed = 0;

        for (ix, step) in self.steps.iter().enumerate() {
            if step.code_line != step.action.source_line() {
                return Err(StepLogViolation::SourceLine {
                    step: ix,
                    code_line: step.code_line,
                });
            }
            if let Some(index) = heap_property_violation(&step.heap) {
                return Err(StepLogViolation::HeapProperty { step: ix, index });
            }
            if ix == 0 {
                continue;
            }

            let previous = &self.steps[ix - 1];
            match step.action {
                StepAction::Start => {
                    return Err(StepLogViolation::UnexpectedAction {
                        step: ix,
                        action: step.action.name(),
                    });
                }
                StepAction::Add {
                    added,
                    added_node_id,
                } => {
                    if step.index != InputPosition::Element(processed)
                        || self.input.get(processed) != Some(&added)
                    {
                        return Err(StepLogViolation::PositionMismatch { step: ix });
                    }
                    if !seen.insert(added_node_id) {
                        return Err(StepLogViolation::ReusedId {
                            step: ix,
                            id: added_node_id,
                        });
                    }
                    if step.position_of(added_node_id).is_none() {
                        return Err(StepLogViolation::MissingNode {
                            step: ix,
                            id: added_node_id,
                        });
                    }

                    let expected = processed.min(self.k) + 1;
                    processed += 1;
                    if step.heap.len() != expected {
                        return Err(StepLogViolation::SizeBound {
                            step: ix,
                            size: step.heap.len(),
                            expected,
                        });
                    }
                }
                StepAction::Remove {
                    removed,
                    removed_node_id,
                } => {
                    if !matches!(previous.action, StepAction::Add { .. }) {
                        return Err(StepLogViolation::UnexpectedAction {
                            step: ix,
                            action: step.action.name(),
                        });
                    }
                    if step.index != previous.index {
                        return Err(StepLogViolation::PositionMismatch { step: ix });
                    }
                    match previous.heap.first() {
                        Some(root) if root.id == removed_node_id && root.value == removed => {}
                        _ => {
                            return Err(StepLogViolation::NotTheMinimum {
                                step: ix,
                                id: removed_node_id,
                            })
                        }
                    }
                    if step.position_of(removed_node_id).is_some() {
                        return Err(StepLogViolation::RemovedNodeStillPresent {
                            step: ix,
                            id: removed_node_id,
                        });
                    }
                    if step.heap.len() != self.k {
                        return Err(StepLogViolation::SizeBound {
                            step: ix,
                            size: step.heap.len(),
                            expected: self.k,
                        });
                    }
                }
                StepAction::Done { kth_largest } => {
                    if ix != last_ix {
                        return Err(StepLogViolation::UnexpectedAction {
                            step: ix,
                            action: step.action.name(),
                        });
                    }
                    if step.index != InputPosition::End || processed != self.input.len() {
                        return Err(StepLogViolation::BadEnd { step: ix });
                    }
                    let root = step.heap.first().map(|node| node.value);
                    if step.heap.len() != self.k || root != Some(kth_largest) {
                        return Err(StepLogViolation::WrongAnswer { step: ix });
                    }
                }
            }

            if step.replay_from(&previous.heap).as_deref() != Some(step.heap.as_slice()) {
                return Err(StepLogViolation::ReplayMismatch { step: ix });
            }
        }

        match self.steps[last_ix].action {
            StepAction::Done { .. } => Ok(()),
            _ => Err(StepLogViolation::BadEnd { step: last_ix }),
        }
    }
}

impl<T: Serialize> StepLog<T> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Hands the log over to a viewer
    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }
}

impl<T: DeserializeOwned> StepLog<T> {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl<'a, T> IntoIterator for &'a StepLog<T> {
    type Item = &'a Step<T>;
    type IntoIter = std::slice::Iter<'a, Step<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
