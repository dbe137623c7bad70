//! Stride-aware access to externally produced feature maps.
//!
//! The inference engine hands over dense buffers with explicit shape and
//! stride metadata. All access goes through bounds-checked `ndarray` views
//! built from that metadata; nothing here assumes a row-major layout.

use crate::error::PostProcessError;
use ndarray::{ArrayView3, ArrayViewD, Axis, Ix3, IxDyn, ShapeBuilder};

/// Build a validated view over a raw feature-map buffer.
///
/// `shape` and `strides` are per-axis element counts as reported by the
/// inference engine. ndarray rejects stride/shape combinations that would
/// read out of bounds.
pub fn feature_view<'a>(
    data: &'a [f32],
    shape: &[usize],
    strides: &[usize],
) -> Result<ArrayViewD<'a, f32>, PostProcessError> {
    if shape.len() < 3 || strides.len() < 3 {
        return Err(PostProcessError::MissingAxes(shape.len().min(strides.len())));
    }
    let view = ArrayViewD::from_shape(IxDyn(shape).strides(IxDyn(strides)), data)?;
    Ok(view)
}

/// Feature map reduced to its three meaningful axes, with the grid size.
#[derive(Debug)]
pub struct FeatureMap<'a> {
    pub view: ArrayView3<'a, f32>,
    pub grid: usize,
}

impl<'a> FeatureMap<'a> {
    /// Validate a raw tensor against the expected channel layout.
    ///
    /// The last three axes are channel, grid-y, grid-x; leading axes (batch
    /// and the like) are indexed at 0. Checks run once here so the decode
    /// loops can index without re-validating every offset:
    /// - at least 3 axes, leading axes non-empty
    /// - channels = anchors x (5 + classes)
    /// - square spatial grid
    pub fn validate(
        tensor: &ArrayViewD<'a, f32>,
        num_anchors: usize,
        num_classes: usize,
    ) -> Result<Self, PostProcessError> {
        if tensor.ndim() < 3 {
            return Err(PostProcessError::MissingAxes(tensor.ndim()));
        }

        let mut view = tensor.clone();
        while view.ndim() > 3 {
            if view.len_of(Axis(0)) == 0 {
                return Err(PostProcessError::EmptyLeadingAxis);
            }
            view = view.index_axis_move(Axis(0), 0);
        }
        let view = view.into_dimensionality::<Ix3>()?;

        let (channels, grid_h, grid_w) = view.dim();
        let expected = num_anchors * (5 + num_classes);
        if channels != expected {
            return Err(PostProcessError::ChannelMismatch {
                expected,
                actual: channels,
                anchors: num_anchors,
                classes: num_classes,
            });
        }
        if grid_h != grid_w {
            return Err(PostProcessError::NonSquareGrid {
                height: grid_h,
                width: grid_w,
            });
        }

        Ok(Self { view, grid: grid_w })
    }
}
