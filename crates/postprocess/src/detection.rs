//! Detection value types handed to the rendering side.

/// Class names of the recyclable-waste model, indexed by `class_id`.
pub const CLASS_LABELS: [&str; 4] = ["Glass", "Metal", "Paper", "Plastic"];

/// Axis-aligned box in model input space: top-left corner plus size.
///
/// Coordinates stay in the model's input frame (512x512 by default); mapping
/// to display coordinates is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Intersection over union with another box.
    ///
    /// Defined as 0 whenever either box has no area, so degenerate boxes
    /// never count as overlapping anything.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let area_a = self.area();
        let area_b = other.area();
        if area_a <= 0.0 || area_b <= 0.0 {
            return 0.0;
        }

        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        intersection / (area_a + area_b - intersection)
    }
}

/// One decoded detection, alive for a single frame.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Index into the fixed class label set.
    pub class_id: usize,
    /// Objectness times best class probability, in [0, 1].
    pub score: f32,
    /// Box in model input space.
    pub bbox: BoundingBox,
}

impl Detection {
    pub fn label(&self) -> &'static str {
        CLASS_LABELS.get(self.class_id).copied().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iou_identical_boxes_is_one() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_iou_disjoint_boxes_is_zero() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::new(5.0, 5.0, 1.0, 1.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_zero_area_partner_is_zero() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let empty = BoundingBox::new(0.5, 0.5, 0.0, 3.0);
        assert_eq!(a.iou(&empty), 0.0);
        assert_eq!(empty.iou(&a), 0.0);
    }

    #[test]
    fn test_iou_half_overlap() {
        // Two 2x2 boxes sharing a 1x2 strip: 2 / (4 + 4 - 2) = 1/3
        let a = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let b = BoundingBox::new(1.0, 0.0, 2.0, 2.0);
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);
        assert!((b.iou(&a) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_label_lookup() {
        let det = Detection {
            class_id: 2,
            score: 0.9,
            bbox: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        };
        assert_eq!(det.label(), "Paper");

        let out_of_range = Detection {
            class_id: 9,
            score: 0.9,
            bbox: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        };
        assert_eq!(out_of_range.label(), "unknown");
    }
}
