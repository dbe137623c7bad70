use std::env;

/// Side length of the square model input, in pixels.
pub const DEFAULT_INPUT_SIZE: f32 = 512.0;
pub const DEFAULT_NUM_CLASSES: usize = 4;
/// A slot whose sigmoid objectness falls below this is dropped outright.
pub const DEFAULT_OBJECTNESS_THRESHOLD: f32 = 0.8;
/// Combined objectness x class probability must exceed this to emit.
pub const DEFAULT_CLASS_CONFIDENCE_THRESHOLD: f32 = 0.7;
/// Same-class overlap above this is treated as a duplicate.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.4;

#[derive(Debug, Clone)]
pub struct PostProcessConfig {
    pub input_size: f32,
    pub num_classes: usize,
    pub objectness_threshold: f32,
    pub class_confidence_threshold: f32,
    pub iou_threshold: f32,
}

impl PostProcessConfig {
    /// Load configuration from environment variables with the production
    /// model's defaults.
    pub fn from_env() -> Self {
        let input_size = env::var("INPUT_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_INPUT_SIZE);

        let num_classes = env::var("NUM_CLASSES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_NUM_CLASSES);

        let objectness_threshold = env::var("OBJECTNESS_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_OBJECTNESS_THRESHOLD);

        let class_confidence_threshold = env::var("CLASS_CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CLASS_CONFIDENCE_THRESHOLD);

        let iou_threshold = env::var("IOU_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_IOU_THRESHOLD);

        Self {
            input_size,
            num_classes,
            objectness_threshold,
            class_confidence_threshold,
            iou_threshold,
        }
    }
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            num_classes: DEFAULT_NUM_CLASSES,
            objectness_threshold: DEFAULT_OBJECTNESS_THRESHOLD,
            class_confidence_threshold: DEFAULT_CLASS_CONFIDENCE_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }
}
