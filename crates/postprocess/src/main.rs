use common::{Environment, setup_logging};
use ndarray::{Array3, ArrayD};
use postprocess::{AnchorSet, PostProcessConfig, PostProcessor, Scale, ScaleOutput};

/// Smoke-runs the pipeline on one synthetic frame. Real tensors come from
/// the inference engine; capture and model loading live outside this
/// workspace.
fn main() {
    let environment = Environment::from_env();
    setup_logging(environment.clone());

    let config = PostProcessConfig::from_env();
    tracing::info!(
        config = ?config,
        environment = environment.as_str(),
        "Loaded configuration"
    );

    let processor = PostProcessor::new(config, AnchorSet::default());
    let num_classes = processor.config().num_classes;

    // One confident slot per head, everything else silent.
    let heads = [
        (Scale::Coarse, synthetic_head(13, 6, 6, 0, num_classes)),
        (Scale::Medium, synthetic_head(26, 13, 13, 1, num_classes)),
        (Scale::Fine, synthetic_head(52, 26, 26, 2, num_classes)),
    ];
    let outputs: Vec<ScaleOutput> = heads
        .iter()
        .map(|(scale, tensor)| ScaleOutput {
            scale: *scale,
            tensor: tensor.view(),
        })
        .collect();

    let frame = processor.process_frame(&outputs);

    for failure in &frame.failures {
        tracing::warn!(scale = %failure.scale, error = %failure.error, "Scale failed to decode");
    }
    for detection in &frame.detections {
        tracing::info!(
            label = detection.label(),
            score = detection.score,
            x = detection.bbox.x,
            y = detection.bbox.y,
            width = detection.bbox.width,
            height = detection.bbox.height,
            "Detection"
        );
    }
    tracing::info!(detections = frame.detections.len(), "Smoke run complete");
}

fn synthetic_head(grid: usize, x: usize, y: usize, class: usize, num_classes: usize) -> ArrayD<f32> {
    let channels = 3 * (5 + num_classes);
    let mut head = Array3::zeros((channels, grid, grid)).into_dyn();
    head[[4, y, x]] = 3.0;
    head[[5 + class.min(num_classes.saturating_sub(1)), y, x]] = 5.0;
    head
}
