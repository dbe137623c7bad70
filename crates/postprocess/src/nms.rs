//! Non-maximum suppression over the aggregated candidate list.

use crate::detection::Detection;
use std::cmp::Ordering;

/// Remove lower-scoring same-class duplicates.
///
/// Candidates are sorted by descending score, then each survivor suppresses
/// every later candidate of the same class whose IoU with it exceeds the
/// threshold. A suppressed element is excluded from all further comparisons,
/// so one pass reaches the fixed point: what remains contains no same-class
/// pair above the threshold, and the highest-scoring element of every
/// overlapping cluster survives. The sort is stable, so among equal scores
/// the earlier-inserted candidate wins and exactly one of the pair is kept.
///
/// O(n^2) over the per-frame candidate count, which is tens after
/// thresholding.
pub fn non_max_suppression(mut candidates: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut suppressed = vec![false; candidates.len()];
    for i in 0..candidates.len() {
        if suppressed[i] {
            continue;
        }
        for j in (i + 1)..candidates.len() {
            if suppressed[j] || candidates[j].class_id != candidates[i].class_id {
                continue;
            }
            if candidates[i].bbox.iou(&candidates[j].bbox) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    candidates
        .into_iter()
        .zip(suppressed)
        .filter_map(|(det, dropped)| (!dropped).then_some(det))
        .collect()
}
