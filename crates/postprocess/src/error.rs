use crate::anchors::Scale;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostProcessError {
    #[error("malformed tensor shape: expected at least 3 axes, got {0}")]
    MissingAxes(usize),

    #[error("malformed tensor shape: leading axis is empty")]
    EmptyLeadingAxis,

    #[error(
        "malformed tensor shape: expected {expected} channels ({anchors} anchors x (5 + {classes} classes)), got {actual}"
    )]
    ChannelMismatch {
        expected: usize,
        actual: usize,
        anchors: usize,
        classes: usize,
    },

    #[error("malformed tensor shape: grid must be square, got {height}x{width}")]
    NonSquareGrid { height: usize, width: usize },

    #[error("no anchors configured for {0} scale")]
    MissingAnchorConfiguration(Scale),

    #[error("tensor layout rejected: {0}")]
    InvalidLayout(#[from] ndarray::ShapeError),
}
