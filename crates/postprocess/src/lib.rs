pub mod activation;
pub mod anchors;
pub mod config;
pub mod decoder;
pub mod detection;
pub mod error;
pub mod nms;
pub mod pipeline;
pub mod tensor;

// Re-export commonly used types for convenience
pub use anchors::{Anchor, AnchorSet, Scale};
pub use config::PostProcessConfig;
pub use detection::{BoundingBox, Detection};
pub use error::PostProcessError;
pub use pipeline::{FrameDetections, PostProcessor, ScaleOutput};
