use serde::{Deserialize, Serialize};

use crate::config::SegmenterConfig;
use crate::note::{frequency_to_note, NoteLabel};
use crate::segment::median_smooth;
use crate::track::PitchSample;

/// What the segmenter does with unvoiced samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnvoicedPolicy {
    /// Unvoiced samples are ignored, so a note sounds through short dropouts.
    Skip,
    /// An unvoiced sample ends the current block. Blocks may be separated by gaps.
    Split,
}

impl Default for UnvoicedPolicy {
    fn default() -> Self {
        UnvoicedPolicy::Skip
    }
}

/// An interval over which the quantized note is constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteBlock {
    pub note: NoteLabel,
    /// Start time in seconds.
    pub start_time: f64,
    /// Duration in seconds, always positive.
    pub duration: f64,
}

impl NoteBlock {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// The end time of the last block, i.e. the total playback duration.
pub fn total_duration(blocks: &[NoteBlock]) -> f64 {
    blocks.last().map(NoteBlock::end_time).unwrap_or(0.0)
}

/// Turns a chronological pitch contour into a sequence of note blocks.
///
/// A block is closed when the quantized note changes, lasting until the
/// sample that changed it but at least `interior_floor` seconds. The last
/// block lasts until the last sample but at least `trailing_floor` seconds.
/// A block never starts before the previous one ends, so the blocks never
/// overlap even when note changes are closer than the interior floor.
///
/// ```
/// use microsing::segment::NoteSegmenter;
/// use microsing::track::PitchSample;
///
/// let samples = [
///     PitchSample::voiced(0.0, 261.6),
///     PitchSample::voiced(0.1, 261.6),
///     PitchSample::voiced(0.2, 293.7),
/// ];
/// let blocks = NoteSegmenter::default().segment(&samples);
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].note.to_string(), "C4");
/// assert_eq!(blocks[1].note.to_string(), "D4");
/// assert_eq!(blocks[1].duration, 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct NoteSegmenter {
    interior_floor: f64,
    trailing_floor: f64,
    unvoiced: UnvoicedPolicy,
    smoothing_kernel: usize,
}

impl Default for NoteSegmenter {
    fn default() -> Self {
        NoteSegmenter::from_config(&SegmenterConfig::default())
    }
}

impl NoteSegmenter {
    pub fn from_config(config: &SegmenterConfig) -> Self {
        NoteSegmenter::from_options(
            config.interior_floor,
            config.trailing_floor,
            config.unvoiced,
            config.smoothing_kernel,
        )
    }

    /// `smoothing_kernel` is the size of the median filter applied before
    /// segmentation, 0 to disable it. Panics if it is even and non-zero or
    /// if a floor is not positive.
    pub fn from_options(
        interior_floor: f64,
        trailing_floor: f64,
        unvoiced: UnvoicedPolicy,
        smoothing_kernel: usize,
    ) -> Self {
        if !(interior_floor > 0.0 && trailing_floor > 0.0) {
            panic!("Block duration floors must be positive")
        }
        if smoothing_kernel != 0 && smoothing_kernel % 2 == 0 {
            panic!("Median kernel size must be odd, got {}", smoothing_kernel)
        }
        NoteSegmenter {
            interior_floor,
            trailing_floor,
            unvoiced,
            smoothing_kernel,
        }
    }

    pub fn unvoiced_policy(&self) -> UnvoicedPolicy {
        self.unvoiced
    }

    /// Segments `samples`, which must be in chronological order.
    pub fn segment(&self, samples: &[PitchSample]) -> Vec<NoteBlock> {
        let smoothed;
        let samples = if self.smoothing_kernel > 0 {
            smoothed = median_smooth(samples, self.smoothing_kernel);
            &smoothed[..]
        } else {
            samples
        };

        let mut builder = BlockBuilder::new(self.interior_floor);
        for sample in samples {
            match sample.frequency {
                Some(frequency) => builder.push(sample.time, frequency_to_note(frequency)),
                None => {
                    if self.unvoiced == UnvoicedPolicy::Split {
                        builder.close(sample.time);
                    }
                }
            }
        }
        let blocks = builder.finish(self.trailing_floor);

        log::debug!(
            target: "microsing::segment",
            "{} samples segmented into {} blocks",
            samples.len(),
            blocks.len()
        );
        blocks
    }
}

struct OpenBlock {
    note: NoteLabel,
    start_time: f64,
    last_time: f64,
}

struct BlockBuilder {
    blocks: Vec<NoteBlock>,
    open: Option<OpenBlock>,
    interior_floor: f64,
}

impl BlockBuilder {
    fn new(interior_floor: f64) -> Self {
        BlockBuilder {
            blocks: Vec::new(),
            open: None,
            interior_floor,
        }
    }

    fn push(&mut self, time: f64, note: NoteLabel) {
        if let Some(open) = self.open.as_mut() {
            if open.note == note {
                open.last_time = time;
                return;
            }
        }
        self.close(time);
        let start_time = match self.blocks.last() {
            Some(previous) => time.max(previous.end_time()),
            None => time,
        };
        self.open = Some(OpenBlock {
            note,
            start_time,
            last_time: time,
        });
    }

    /// Closes the open block, if any, at `time`.
    fn close(&mut self, time: f64) {
        if let Some(open) = self.open.take() {
            let duration = (time - open.start_time).max(self.interior_floor);
            self.blocks.push(NoteBlock {
                note: open.note,
                start_time: open.start_time,
                duration,
            });
        }
    }

    fn finish(mut self, trailing_floor: f64) -> Vec<NoteBlock> {
        if let Some(open) = self.open.take() {
            let duration = (open.last_time - open.start_time).max(trailing_floor);
            self.blocks.push(NoteBlock {
                note: open.note,
                start_time: open.start_time,
                duration,
            });
        }
        self.blocks
    }
}
