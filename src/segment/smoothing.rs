use std::borrow::Cow;

use crate::track::PitchSample;

/// Applies a median filter of `kernel_size` samples to the frequencies of a
/// pitch contour, suppressing isolated octave jumps and similar outliers.
///
/// Sample times are never changed. Unvoiced samples stay unvoiced and are
/// ignored when computing the median of their neighbours. Samples closer
/// than `kernel_size / 2` to either end of the contour are kept as they are.
/// Contours with fewer than `kernel_size` samples are returned unchanged.
///
/// Panics if `kernel_size` is even.
pub fn median_smooth(samples: &[PitchSample], kernel_size: usize) -> Cow<'_, [PitchSample]> {
    if kernel_size % 2 == 0 {
        panic!("Median kernel size must be odd, got {}", kernel_size)
    }
    if samples.len() < kernel_size || kernel_size == 1 {
        return Cow::Borrowed(samples);
    }

    let half = kernel_size / 2;
    let mut neighbourhood: Vec<f32> = Vec::with_capacity(kernel_size);
    let mut smoothed = samples.to_vec();
    for i in half..samples.len() - half {
        if !samples[i].is_voiced() {
            continue;
        }
        neighbourhood.clear();
        neighbourhood.extend(samples[i - half..=i + half].iter().filter_map(|s| s.frequency));
        smoothed[i].frequency = median(&mut neighbourhood);
    }
    Cow::Owned(smoothed)
}

fn median(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let middle = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[middle])
    } else {
        Some(0.5 * (values[middle - 1] + values[middle]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour(frequencies: &[f32]) -> Vec<PitchSample> {
        frequencies
            .iter()
            .enumerate()
            .map(|(i, f)| PitchSample::voiced(i as f64 * 0.1, *f))
            .collect()
    }

    #[test]
    fn test_short_contour_unchanged() {
        let samples = contour(&[440.0, 442.0, 438.0]);
        let smoothed = median_smooth(&samples, 5);
        assert_eq!(&smoothed[..], &samples[..]);
    }

    #[test]
    fn test_empty_contour() {
        assert!(median_smooth(&[], 5).is_empty());
    }

    #[test]
    fn test_removes_outlier() {
        let samples = contour(&[440.0, 442.0, 1000.0, 444.0, 446.0, 448.0]);
        let smoothed = median_smooth(&samples, 3);
        assert_eq!(smoothed[2].frequency, Some(444.0));
        assert_eq!(smoothed[0].frequency, Some(440.0));
        assert_eq!(smoothed[5].frequency, Some(448.0));
    }

    #[test]
    fn test_preserves_ramp_and_times() {
        let frequencies: Vec<f32> = (0..20).map(|i| 440.0 + 10.0 * i as f32).collect();
        let samples = contour(&frequencies);
        let smoothed = median_smooth(&samples, 3);
        assert_eq!(&smoothed[..], &samples[..]);
        for (a, b) in smoothed.iter().zip(samples.iter()) {
            assert_eq!(a.time, b.time);
        }
    }

    #[test]
    fn test_unvoiced_samples() {
        let mut samples = contour(&[200.0, 210.0, 0.0, 220.0, 230.0]);
        samples[2] = PitchSample::unvoiced(0.2);
        let smoothed = median_smooth(&samples, 3);
        assert_eq!(smoothed[1].frequency, Some(205.0));
        assert_eq!(smoothed[2].frequency, None);
        assert_eq!(smoothed[3].frequency, Some(225.0));
    }

    #[test]
    #[should_panic]
    fn test_even_kernel() {
        median_smooth(&contour(&[1.0, 2.0, 3.0]), 2);
    }
}
