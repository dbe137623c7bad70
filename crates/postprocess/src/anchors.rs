//! Typed anchor configuration, one anchor list per output scale.

use crate::error::PostProcessError;
use std::fmt;

/// Output scale of one detection head, coarse to fine.
///
/// The model emits three heads over the 512x512 input: 13x13 (coarse),
/// 26x26 (medium) and 52x52 (fine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Coarse,
    Medium,
    Fine,
}

impl Scale {
    pub const ALL: [Scale; 3] = [Scale::Coarse, Scale::Medium, Scale::Fine];

    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Coarse => "coarse",
            Scale::Medium => "medium",
            Scale::Fine => "fine",
        }
    }

    fn index(self) -> usize {
        match self {
            Scale::Coarse => 0,
            Scale::Medium => 1,
            Scale::Fine => 2,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference box size in model input pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub width: f32,
    pub height: f32,
}

impl Anchor {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Anchor boxes for every output scale. Built once at startup and read-only
/// afterwards; the decoder checks the per-scale anchor count against the
/// tensor's channel layout before any decoding happens.
#[derive(Debug, Clone)]
pub struct AnchorSet {
    per_scale: [Vec<Anchor>; 3],
}

impl AnchorSet {
    pub fn new(coarse: Vec<Anchor>, medium: Vec<Anchor>, fine: Vec<Anchor>) -> Self {
        Self {
            per_scale: [coarse, medium, fine],
        }
    }

    /// Anchors for one scale, failing typed when the scale has none
    /// configured rather than guessing a default.
    pub fn for_scale(&self, scale: Scale) -> Result<&[Anchor], PostProcessError> {
        let anchors = &self.per_scale[scale.index()];
        if anchors.is_empty() {
            return Err(PostProcessError::MissingAnchorConfiguration(scale));
        }
        Ok(anchors)
    }
}

/// Anchor table of the recyclable-waste YOLOv3 model, in input pixels.
/// Coarser heads carry larger anchors.
impl Default for AnchorSet {
    fn default() -> Self {
        Self::new(
            vec![
                Anchor::new(228.0, 184.0),
                Anchor::new(285.0, 359.0),
                Anchor::new(341.0, 260.0),
            ],
            vec![
                Anchor::new(136.0, 129.0),
                Anchor::new(142.0, 363.0),
                Anchor::new(203.0, 290.0),
            ],
            vec![
                Anchor::new(55.0, 69.0),
                Anchor::new(75.0, 234.0),
                Anchor::new(133.0, 240.0),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_has_three_anchors_per_scale() {
        let set = AnchorSet::default();
        for scale in Scale::ALL {
            let anchors = set.for_scale(scale).unwrap();
            assert_eq!(anchors.len(), 3, "{} scale should carry 3 anchors", scale);
        }
    }

    #[test]
    fn test_missing_scale_entry_is_a_typed_failure() {
        let set = AnchorSet::new(vec![Anchor::new(10.0, 10.0)], vec![], vec![]);
        assert!(set.for_scale(Scale::Coarse).is_ok());
        match set.for_scale(Scale::Medium) {
            Err(PostProcessError::MissingAnchorConfiguration(Scale::Medium)) => {}
            other => panic!("expected MissingAnchorConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_coarse_anchors_are_largest() {
        let set = AnchorSet::default();
        let mean_area = |scale: Scale| {
            let anchors = set.for_scale(scale).unwrap();
            anchors.iter().map(|a| a.width * a.height).sum::<f32>() / anchors.len() as f32
        };
        assert!(mean_area(Scale::Coarse) > mean_area(Scale::Medium));
        assert!(mean_area(Scale::Medium) > mean_area(Scale::Fine));
    }
}
