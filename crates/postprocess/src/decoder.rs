//! Decodes one output head into detection candidates.

use crate::activation::{argmax, sigmoid, softmax};
use crate::anchors::{AnchorSet, Scale};
use crate::config::PostProcessConfig;
use crate::detection::{BoundingBox, Detection};
use crate::error::PostProcessError;
use crate::tensor::FeatureMap;
use common::span_debug;
use ndarray::ArrayViewD;

/// Decode one scale's raw tensor into candidate detections.
///
/// Channels are laid out per anchor slot as `[x, y, w, h, objectness,
/// class_0 .. class_{C-1}]`. A slot survives only if its sigmoid objectness
/// reaches the objectness threshold (a value exactly at the threshold is
/// kept) and its objectness-weighted best class probability strictly exceeds
/// the class-confidence threshold. Boxes whose decoded size is non-positive
/// or non-finite are dropped before suppression.
pub fn decode_scale(
    tensor: &ArrayViewD<'_, f32>,
    scale: Scale,
    anchors: &AnchorSet,
    config: &PostProcessConfig,
) -> Result<Vec<Detection>, PostProcessError> {
    let _s = span_debug!("decode_scale");

    let anchors = anchors.for_scale(scale)?;
    let map = FeatureMap::validate(tensor, anchors.len(), config.num_classes)?;
    let view = map.view;

    let cell_size = config.input_size / map.grid as f32;
    let features_per_anchor = 5 + config.num_classes;

    // Reused per slot, same as the class scratch array in the model head.
    let mut class_logits = vec![0.0f32; config.num_classes];
    let mut detections = Vec::new();

    for y in 0..map.grid {
        for x in 0..map.grid {
            for (slot, anchor) in anchors.iter().enumerate() {
                let base = slot * features_per_anchor;

                let objectness = sigmoid(view[[base + 4, y, x]]);
                if objectness < config.objectness_threshold {
                    continue;
                }

                for (c, logit) in class_logits.iter_mut().enumerate() {
                    *logit = view[[base + 5 + c, y, x]];
                }
                let probs = softmax(&class_logits);
                let Some((class_id, class_prob)) = argmax(&probs) else {
                    continue;
                };

                let score = class_prob * objectness;
                if score <= config.class_confidence_threshold {
                    continue;
                }

                // Cell-relative center back to input-space pixels.
                let center_x = (sigmoid(view[[base, y, x]]) + x as f32) * cell_size;
                let center_y = (sigmoid(view[[base + 1, y, x]]) + y as f32) * cell_size;
                // Anchor size scaled by the exponentiated log-ratio.
                let width = view[[base + 2, y, x]].exp() * anchor.width;
                let height = view[[base + 3, y, x]].exp() * anchor.height;

                if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
                    tracing::trace!(%scale, x, y, slot, "Dropping degenerate box");
                    continue;
                }

                detections.push(Detection {
                    class_id,
                    score,
                    bbox: BoundingBox::new(
                        center_x - width / 2.0,
                        center_y - height / 2.0,
                        width,
                        height,
                    ),
                });
            }
        }
    }

    tracing::debug!(%scale, candidates = detections.len(), "Decoded output head");
    Ok(detections)
}
