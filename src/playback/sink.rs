/// Identifies a tone scheduled on a [`SoundSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceHandle(pub u64);

/// Something that can play timed tones, e.g. a synthesizer feeding an audio
/// output.
///
/// Scheduling is fire and forget: once scheduled, a tone plays to its end
/// unless [`silence_all`](SoundSink::silence_all) is called.
pub trait SoundSink {
    /// The sink's monotonic audio clock in seconds.
    fn current_time(&self) -> f64;

    /// Schedules a tone of `duration` seconds starting `start_offset`
    /// seconds from now. A negative offset means the tone started that long
    /// ago and only its remainder sounds.
    fn schedule_tone(&mut self, frequency: f32, duration: f64, start_offset: f64) -> VoiceHandle;

    /// Ramps every scheduled or sounding tone down to silence over a few
    /// tens of milliseconds, then drops it.
    fn silence_all(&mut self);

    /// Sets the master volume, between 0 and 1.
    fn set_volume(&mut self, volume: f32);

    /// Returns the voices that have finished since the last call.
    fn reap_finished(&mut self) -> Vec<VoiceHandle>;
}

impl<S: SoundSink + ?Sized> SoundSink for Box<S> {
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn schedule_tone(&mut self, frequency: f32, duration: f64, start_offset: f64) -> VoiceHandle {
        (**self).schedule_tone(frequency, duration, start_offset)
    }

    fn silence_all(&mut self) {
        (**self).silence_all()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn reap_finished(&mut self) -> Vec<VoiceHandle> {
        (**self).reap_finished()
    }
}
