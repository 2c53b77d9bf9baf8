use crate::shared::bounding_box::BoundingBox;

pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Strategy for collapsing overlapping detection boxes into distinct
/// face regions.
///
/// Implementations must preserve encounter order of the input: the
/// detector emits boxes in its own order and the merge tie-break
/// depends on it.
pub trait BoxDeduplicator: Send {
    fn merge(&self, boxes: &[BoundingBox]) -> Vec<BoundingBox>;
}

/// Single-pass greedy merger.
///
/// Each input box is merged into the first accumulated box whose IoU
/// with it exceeds the threshold (replaced in place by their bounding
/// union), or appended as a new region. The pass never re-scans after a
/// merge, so an enlarged box is not re-checked against later entries;
/// chains of three or more mutually overlapping boxes can therefore
/// come out as more than one region. That behavior is kept on purpose
/// (see [`FixedPointBoxMerger`] for the converging variant).
pub struct GreedyBoxMerger {
    iou_threshold: f64,
}

impl GreedyBoxMerger {
    pub fn new(iou_threshold: f64) -> Self {
        Self { iou_threshold }
    }
}

impl Default for GreedyBoxMerger {
    fn default() -> Self {
        Self::new(DEFAULT_IOU_THRESHOLD)
    }
}

impl BoxDeduplicator for GreedyBoxMerger {
    fn merge(&self, boxes: &[BoundingBox]) -> Vec<BoundingBox> {
        greedy_merge_pass(boxes, self.iou_threshold)
    }
}

/// Repeats greedy passes until a pass performs no merge.
///
/// Unlike [`GreedyBoxMerger`], any chain of transitively overlapping
/// boxes collapses into a single region regardless of input order.
pub struct FixedPointBoxMerger {
    iou_threshold: f64,
}

impl FixedPointBoxMerger {
    pub fn new(iou_threshold: f64) -> Self {
        Self { iou_threshold }
    }
}

impl Default for FixedPointBoxMerger {
    fn default() -> Self {
        Self::new(DEFAULT_IOU_THRESHOLD)
    }
}

impl BoxDeduplicator for FixedPointBoxMerger {
    fn merge(&self, boxes: &[BoundingBox]) -> Vec<BoundingBox> {
        let mut current = boxes.to_vec();
        loop {
            let merged = greedy_merge_pass(&current, self.iou_threshold);
            // A merge always shortens the list, so equal length means a
            // full pass ran without merging.
            if merged.len() == current.len() {
                return merged;
            }
            current = merged;
        }
    }
}

fn greedy_merge_pass(boxes: &[BoundingBox], iou_threshold: f64) -> Vec<BoundingBox> {
    let mut merged: Vec<BoundingBox> = Vec::with_capacity(boxes.len());
    for b in boxes {
        match merged.iter_mut().find(|m| m.iou(b) > iou_threshold) {
            Some(m) => *m = m.union_with(b),
            None => merged.push(*b),
        }
    }
    merged
}
