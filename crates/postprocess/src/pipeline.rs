//! Per-frame front door: decode every output head, then suppress duplicates.

use crate::anchors::{AnchorSet, Scale};
use crate::config::PostProcessConfig;
use crate::decoder::decode_scale;
use crate::detection::Detection;
use crate::error::PostProcessError;
use crate::nms::non_max_suppression;
use common::span;
use ndarray::ArrayViewD;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// One output head handed over by the inference engine for the current
/// frame. The view borrows the engine's buffer; nothing is copied.
pub struct ScaleOutput<'a> {
    pub scale: Scale,
    pub tensor: ArrayViewD<'a, f32>,
}

/// A scale whose decode failed. The rest of the frame still counts.
#[derive(Debug)]
pub struct ScaleFailure {
    pub scale: Scale,
    pub error: PostProcessError,
}

/// Result of one frame's post-processing. `detections` is what the renderer
/// draws; `failures` lists any output heads that could not be decoded, so a
/// partially bad frame degrades to fewer boxes instead of an error.
#[derive(Debug, Default)]
pub struct FrameDetections {
    pub detections: Vec<Detection>,
    pub failures: Vec<ScaleFailure>,
}

/// Decode-score-suppress pipeline with fixed configuration and anchors.
///
/// Each call owns its inputs and returns its outputs; no state survives
/// between frames.
pub struct PostProcessor {
    config: PostProcessConfig,
    anchors: AnchorSet,
}

impl PostProcessor {
    pub fn new(config: PostProcessConfig, anchors: AnchorSet) -> Self {
        Self { config, anchors }
    }

    pub fn config(&self) -> &PostProcessConfig {
        &self.config
    }

    /// Run one frame's output heads through decode, aggregation and NMS.
    pub fn process_frame(&self, outputs: &[ScaleOutput<'_>]) -> FrameDetections {
        let _s = span!("process_frame");

        let mut candidates = Vec::new();
        let mut failures = Vec::new();
        for (scale, result) in self.decode_all(outputs) {
            match result {
                Ok(mut decoded) => candidates.append(&mut decoded),
                Err(error) => {
                    tracing::warn!(%scale, error = %error, "Skipping undecodable output head");
                    failures.push(ScaleFailure { scale, error });
                }
            }
        }

        let candidate_count = candidates.len();
        let detections = non_max_suppression(candidates, self.config.iou_threshold);

        tracing::debug!(
            candidates = candidate_count,
            survivors = detections.len(),
            failed_scales = failures.len(),
            "Frame post-processed"
        );

        FrameDetections {
            detections,
            failures,
        }
    }

    /// The per-scale decodes read disjoint inputs and produce disjoint
    /// outputs, so they fan out across the rayon pool when the feature is
    /// enabled.
    #[cfg(feature = "rayon")]
    fn decode_all(
        &self,
        outputs: &[ScaleOutput<'_>],
    ) -> Vec<(Scale, Result<Vec<Detection>, PostProcessError>)> {
        outputs
            .par_iter()
            .map(|output| {
                (
                    output.scale,
                    decode_scale(&output.tensor, output.scale, &self.anchors, &self.config),
                )
            })
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn decode_all(
        &self,
        outputs: &[ScaleOutput<'_>],
    ) -> Vec<(Scale, Result<Vec<Detection>, PostProcessError>)> {
        outputs
            .iter()
            .map(|output| {
                (
                    output.scale,
                    decode_scale(&output.tensor, output.scale, &self.anchors, &self.config),
                )
            })
            .collect()
    }
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new(PostProcessConfig::default(), AnchorSet::default())
    }
}
