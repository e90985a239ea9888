/// A local maximum of the similarity scores, refined to sub-sample
/// precision.
#[derive(Copy, Clone, Debug, Default)]
pub struct LagPeak {
    /// The integer lag of the maximum.
    pub lag_index: usize,
    /// `scores[lag_index]`.
    pub value_at_lag_index: f32,
    /// The vertex value of the parabola through the maximum and its neighbours.
    pub value: f32,
    /// The refined lag in samples.
    pub lag: f32,
}

impl LagPeak {
    /// Refines the maximum at `lag_index` with a parabola through
    /// `s[T0 - 1]`, `s[T0]` and `s[T0 + 1]`:
    /// `a = (s[T0-1] + s[T0+1] - 2 s[T0]) / 2`, `b = (s[T0+1] - s[T0-1]) / 2`
    /// and the vertex sits at `T0 - b / 2a`.
    pub(crate) fn set(&mut self, scores: &[f32], lag_index: usize) {
        let (left, center, right) = neighbourhood(scores, lag_index);
        let a = 0.5 * (left + right - 2.0 * center);
        let b = 0.5 * (right - left);
        let shift = if a == 0.0 { 0.0 } else { -b / (2.0 * a) };

        self.lag_index = lag_index;
        self.value_at_lag_index = center;
        self.lag = lag_index as f32 + shift;
        self.value = center + 0.5 * b * shift;
    }
}

/// Estimates the height of the score peak at `lag_index` as if the lag
/// had not been quantized.
///
/// Around a period, the score falls off linearly in both directions, so the
/// apex of a symmetric V through the three scores is `s[T] + |s[T+1] - s[T-1]| / 2`.
pub(crate) fn apex_height(scores: &[f32], lag_index: usize) -> f32 {
    let (left, center, right) = neighbourhood(scores, lag_index);
    center + 0.5 * (right - left).abs()
}

fn neighbourhood(scores: &[f32], index: usize) -> (f32, f32, f32) {
    let left = scores[index.saturating_sub(1)];
    let right = scores[(index + 1).min(scores.len() - 1)];
    (left, scores[index], right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_peak() {
        let scores: [f32; 4] = [0.0, 0.0, 3.0, 0.0];
        let mut peak = LagPeak::default();
        peak.set(&scores, 2);
        assert!((peak.lag - 2.0).abs() <= f32::EPSILON);
        assert!((peak.value - 3.0).abs() <= f32::EPSILON);
    }

    #[test]
    fn test_skewed_peak() {
        // a = -1.5, b = -0.5, vertex at 1 - 1/6
        let scores: [f32; 3] = [-1.0, 0.0, -2.0];
        let mut peak = LagPeak::default();
        peak.set(&scores, 1);
        assert!((peak.lag - 0.8333333).abs() <= 1e-6);
        assert!((peak.value - 0.0416667).abs() <= 1e-6);
        assert_eq!(peak.value_at_lag_index, 0.0);
    }

    #[test]
    fn test_flat_neighbourhood() {
        let scores: [f32; 3] = [0.5, 0.5, 0.5];
        let mut peak = LagPeak::default();
        peak.set(&scores, 1);
        assert_eq!(peak.lag, 1.0);
        assert_eq!(peak.value, 0.5);
    }

    #[test]
    fn test_apex_height() {
        // A V with slope 0.2 and its apex 0.3 to the right of lag 1
        let scores: [f32; 3] = [0.74, 0.94, 0.86];
        assert!((apex_height(&scores, 1) - 1.0).abs() < 1e-6);
        assert_eq!(apex_height(&[0.5, 1.0, 0.5], 1), 1.0);
    }
}
