/// Keeps the most recent `window_size` samples of a stream, like an
/// analyser node exposing its time domain data.
///
/// Incoming chunks of arbitrary size are written into a circular buffer.
/// [`copy_to`](LatestWindow::copy_to) unrolls the buffer so that the oldest
/// retained sample ends up first.
pub struct LatestWindow {
    buffer: Box<[f32]>,
    write_index: usize,
    has_filled_window: bool,
    sample_counter: u64,
}

impl LatestWindow {
    pub fn new(window_size: usize) -> Self {
        if window_size == 0 {
            panic!("Window size must be greater than 0")
        }
        LatestWindow {
            buffer: vec![0.0; window_size].into_boxed_slice(),
            write_index: 0,
            has_filled_window: false,
            sample_counter: 0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true once at least `window_size` samples have been pushed.
    pub fn is_filled(&self) -> bool {
        self.has_filled_window
    }

    /// The total number of samples pushed since creation or the last reset.
    pub fn sample_count(&self) -> u64 {
        self.sample_counter
    }

    pub fn reset(&mut self) {
        for value in self.buffer.iter_mut() {
            *value = 0.0;
        }
        self.write_index = 0;
        self.has_filled_window = false;
        self.sample_counter = 0;
    }

    pub fn push(&mut self, sample: f32) {
        self.buffer[self.write_index] = sample;
        self.write_index += 1;
        if self.write_index == self.buffer.len() {
            self.write_index = 0;
            self.has_filled_window = true;
        }
        self.sample_counter += 1;
    }

    /// Copies the window, oldest sample first, into `target`, which must
    /// have a length of `window_size`.
    pub fn copy_to(&self, target: &mut [f32]) {
        if target.len() != self.buffer.len() {
            panic!(
                "Got target buffer of length {}, expected {}.",
                target.len(),
                self.buffer.len()
            )
        }
        let tail_len = self.buffer.len() - self.write_index;
        target[..tail_len].copy_from_slice(&self.buffer[self.write_index..]);
        target[tail_len..].copy_from_slice(&self.buffer[..self.write_index]);
    }
}

#[cfg(test)]
mod tests {
    use super::LatestWindow;

    fn push_ramp(window: &mut LatestWindow, start: usize, count: usize) {
        for i in start..start + count {
            window.push(i as f32);
        }
    }

    #[test]
    fn test_fills_and_unrolls() {
        let mut window = LatestWindow::new(4);
        push_ramp(&mut window, 0, 3);
        assert!(!window.is_filled());

        push_ramp(&mut window, 3, 3);
        assert!(window.is_filled());
        assert_eq!(window.sample_count(), 6);

        let mut target = [0.0; 4];
        window.copy_to(&mut target);
        assert_eq!(target, [2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_keeps_latest_samples() {
        let mut window = LatestWindow::new(4);
        push_ramp(&mut window, 0, 11);
        assert_eq!(window.sample_count(), 11);

        let mut target = [0.0; 4];
        window.copy_to(&mut target);
        assert_eq!(target, [7.0, 8.0, 9.0, 10.0]);

        window.push(11.0);
        window.copy_to(&mut target);
        assert_eq!(target, [8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_reset() {
        let mut window = LatestWindow::new(2);
        push_ramp(&mut window, 1, 3);
        window.reset();
        assert!(!window.is_filled());
        assert_eq!(window.sample_count(), 0);
        let mut target = [1.0; 2];
        window.copy_to(&mut target);
        assert_eq!(target, [0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn test_zero_window_size() {
        LatestWindow::new(0);
    }
}
