//! Note segmentation of pitch contours.

mod segmenter;
mod smoothing;

pub use segmenter::{total_duration, NoteBlock, NoteSegmenter, UnvoicedPolicy};
pub use smoothing::median_smooth;
