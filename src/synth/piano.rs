use crate::config::SynthConfig;
use crate::playback::{SoundSink, VoiceHandle};
use crate::synth::envelope::Adsr;
use crate::synth::voice::Voice;

/// The first frame at or after `time`. Times within a thousandth of a frame
/// past a frame boundary snap to it, absorbing the rounding of durations
/// configured as `f32`.
fn frame_at(time: f64, sample_rate: f64) -> u64 {
    (time * sample_rate - 1e-3).ceil().max(0.0) as u64
}

/// A polyphonic software synthesizer implementing [`SoundSink`].
///
/// Audio is pulled with [`render`](PianoSynth::render), typically from the
/// audio output callback. The synth clock is the number of frames rendered
/// divided by the sample rate, so scheduled tones are sample accurate
/// regardless of when they were scheduled.
pub struct PianoSynth {
    sample_rate: f32,
    frame_count: u64,
    master_gain: f32,
    adsr: Adsr,
    fade_out: f64,
    voices: Vec<Voice>,
    finished: Vec<VoiceHandle>,
    next_handle: u64,
}

impl PianoSynth {
    pub fn new(sample_rate: f32) -> Self {
        let config = SynthConfig {
            sample_rate,
            ..SynthConfig::default()
        };
        PianoSynth::from_config(&config)
    }

    pub fn from_config(config: &SynthConfig) -> Self {
        if config.sample_rate <= 0.0 {
            panic!("Sample rate must be greater than 0")
        }
        PianoSynth {
            sample_rate: config.sample_rate,
            frame_count: 0,
            master_gain: 0.3,
            adsr: Adsr {
                attack: config.attack as f64,
                decay: config.decay as f64,
                sustain: config.sustain,
                release: config.release as f64,
            },
            fade_out: config.fade_out as f64,
            voices: Vec::new(),
            finished: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    /// The number of voices scheduled or sounding.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Overwrites `buffer` with the next `buffer.len()` mono frames and
    /// advances the clock.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for value in buffer.iter_mut() {
            *value = 0.0;
        }
        let sample_rate = self.sample_rate as f64;
        let first_frame = self.frame_count;
        let last_frame = first_frame + buffer.len() as u64;

        for voice in self.voices.iter() {
            // Only visit the frames the voice can be heard in
            let from = frame_at(voice.start, sample_rate).max(first_frame);
            let to = frame_at(voice.end_time(), sample_rate).min(last_frame);
            for frame in from..to {
                let time = frame as f64 / sample_rate;
                buffer[(frame - first_frame) as usize] += voice.sample(time, &self.adsr);
            }
        }
        for value in buffer.iter_mut() {
            *value *= self.master_gain;
        }

        self.frame_count = last_frame;
        self.retire_voices();
    }

    fn retire_voices(&mut self) {
        let sample_rate = self.sample_rate as f64;
        let frame_count = self.frame_count;
        let finished = &mut self.finished;
        self.voices.retain(|voice| {
            if frame_at(voice.end_time(), sample_rate) <= frame_count {
                finished.push(voice.handle);
                false
            } else {
                true
            }
        });
    }
}

impl SoundSink for PianoSynth {
    fn current_time(&self) -> f64 {
        self.frame_count as f64 / self.sample_rate as f64
    }

    fn schedule_tone(&mut self, frequency: f32, duration: f64, start_offset: f64) -> VoiceHandle {
        self.next_handle += 1;
        let handle = VoiceHandle(self.next_handle);
        let start = self.current_time() + start_offset;
        let voice = Voice {
            handle,
            frequency,
            start,
            duration,
            fade: None,
        };
        if duration > 0.0 && voice.end_time() > self.current_time() {
            log::trace!(
                target: "microsing::synth",
                "voice {} {:.1} Hz at {:.3} s for {:.3} s",
                handle.0,
                frequency,
                start,
                duration
            );
            self.voices.push(voice);
        } else {
            self.finished.push(handle);
        }
        handle
    }

    fn silence_all(&mut self) {
        let now = self.current_time();
        let fade_out = self.fade_out;
        let adsr = self.adsr;
        let finished = &mut self.finished;
        self.voices.retain_mut(|voice| {
            if voice.start >= now {
                // Not started yet
                finished.push(voice.handle);
                false
            } else {
                voice.fade_out(now, fade_out, &adsr);
                true
            }
        });
        log::debug!(target: "microsing::synth", "fading out {} voices", self.voices.len());
    }

    fn set_volume(&mut self, volume: f32) {
        self.master_gain = volume.max(0.0).min(1.0);
    }

    fn reap_finished(&mut self) -> Vec<VoiceHandle> {
        std::mem::take(&mut self.finished)
    }
}
