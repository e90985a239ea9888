/// Receives the playback position while playing, and 0 when playback stops.
pub trait ProgressObserver {
    fn on_progress(&mut self, elapsed: f64);
}

impl<F: FnMut(f64)> ProgressObserver for F {
    fn on_progress(&mut self, elapsed: f64) {
        self(elapsed)
    }
}

/// Forwards positions to a consumer on another thread. Positions are
/// dropped while the ring buffer is full.
impl ProgressObserver for rtrb::Producer<f64> {
    fn on_progress(&mut self, elapsed: f64) {
        let _ = self.push(elapsed);
    }
}

/// Returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A set of progress observers.
#[derive(Default)]
pub struct ProgressObservers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn ProgressObserver + Send>)>,
}

impl ProgressObservers {
    pub fn new() -> Self {
        ProgressObservers::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn ProgressObserver + Send>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let count = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&mut self, elapsed: f64) {
        for (_, observer) in self.entries.iter_mut() {
            observer.on_progress(elapsed);
        }
    }
}

impl std::fmt::Debug for ProgressObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressObservers")
            .field("len", &self.entries.len())
            .finish()
    }
}
