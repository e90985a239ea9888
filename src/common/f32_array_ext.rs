//! `[f32]` extensions.

use micromath::F32Ext;

/// `[f32]` extensions.
pub trait F32ArrayExt {
    /// Returns the maximum absolute value.
    fn peak_level(&self) -> f32;
    /// Returns the maximum absolute value in dB relative to 1,
    /// i.e 0 dB corresponds to a level of 1.
    fn peak_level_db(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level.
    fn rms_level(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level in dB relative to 1, i.e 0 dB corresponds to a level of 1.
    fn rms_level_db(&self) -> f32;
    /// Returns the mean of `|x[i] - x[i + lag]|` for `i` in `0..count`.
    /// Panics if `lag + count` exceeds the length of the slice.
    fn mean_abs_difference(&self, lag: usize, count: usize) -> f32;
}

impl F32ArrayExt for [f32] {
    fn peak_level(&self) -> f32 {
        self.iter().fold(0.0, |max, sample| sample.abs().max(max))
    }

    fn peak_level_db(&self) -> f32 {
        20. * F32Ext::log10(self.peak_level())
    }

    fn rms_level(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        };
        let sum_sq: f32 = self.iter().map(|sample| sample * sample).sum();
        F32Ext::sqrt(sum_sq / (self.len() as f32))
    }

    fn rms_level_db(&self) -> f32 {
        20. * F32Ext::log10(self.rms_level())
    }

    fn mean_abs_difference(&self, lag: usize, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let sum: f32 = self[..count]
            .iter()
            .zip(self[lag..lag + count].iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        sum / (count as f32)
    }
}
