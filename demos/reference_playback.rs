//! Renders a reference pitch track through the piano synth and writes it to
//! a WAV file, then tracks the pitch of the rendered audio as if it had been
//! sung into a microphone.
//!
//! Usage: `cargo run --example reference_playback [reference.json] [out.wav] [config.toml]`
//!
//! Without a reference file, a built in melody is used.
use hound::{SampleFormat, WavSpec, WavWriter};
use microsing::acf::{PitchTracker, RingBufferSource};
use microsing::config::Config;
use microsing::playback::{PlayOutcome, Status};
use microsing::session::{PlaybackMode, Session};
use microsing::synth::PianoSynth;
use microsing::track::PitchSample;
use std::env;
use std::error::Error;
use std::fs;
use std::sync::{Arc, Mutex};

// 60 ticks per second at 44.1 kHz
const TICK_FRAMES: usize = 735;

fn builtin_reference() -> String {
    let melody = [
        261.63, 261.63, 392.0, 392.0, 440.0, 440.0, 392.0, 349.23, 349.23, 329.63, 329.63, 293.66,
        293.66, 261.63,
    ];
    // Ten samples per note, 50 ms apart
    let samples: Vec<PitchSample> = melody
        .iter()
        .flat_map(|frequency| std::iter::repeat(*frequency).take(10))
        .enumerate()
        .map(|(i, frequency)| PitchSample::voiced(i as f64 * 0.05, frequency))
        .collect();
    serde_json::json!({
        "status": "success",
        "samples": samples,
        "duration": samples.len() as f64 * 0.05,
    })
    .to_string()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let reference_json = match args.get(1) {
        Some(path) => fs::read_to_string(path)?,
        None => builtin_reference(),
    };
    let out_path = args.get(2).map(String::as_str).unwrap_or("reference_playback.wav");
    let config = match args.get(3) {
        Some(path) => Config::from_toml_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    let sample_rate = config.synth.sample_rate;
    let synth_config = config.synth.clone();
    let mut session = Session::new(config.clone(), move || Ok(PianoSynth::from_config(&synth_config)));
    session.load_reference(&reference_json)?;
    println!("Reference: {} samples", session.reference_samples().len());
    for block in session.current_note_blocks() {
        println!("  {:>4} at {:6.2} s for {:.2} s", block.note.to_string(), block.start_time, block.duration);
    }

    let positions = Arc::new(Mutex::new(Vec::new()));
    let recorded = positions.clone();
    session.subscribe(Box::new(move |elapsed: f64| {
        if let Ok(mut positions) = recorded.lock() {
            positions.push(elapsed);
        }
    }));

    if session.play()? == PlayOutcome::NothingToPlay {
        println!("Nothing to play");
        return Ok(());
    }

    // Render and feed the audio back in as a live input
    let window_size = config.estimator.window_size;
    let (mut producer, source) = RingBufferSource::with_capacity(sample_rate, window_size, 4 * TICK_FRAMES + window_size);
    let mut tracker = PitchTracker::from_config(source, &config.estimator);
    let spec = WavSpec {
        channels: 1,
        sample_rate: sample_rate as u32,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(out_path, spec)?;
    let mut chunk = vec![0.0; TICK_FRAMES];
    while session.status() == Status::Playing {
        if let Some(scheduler) = session.scheduler_mut() {
            scheduler.sink_mut().render(&mut chunk);
        }
        for sample in chunk.iter() {
            writer.write_sample((sample * i16::MAX as f32) as i16)?;
            let _ = producer.push(*sample);
        }
        session.record(&mut tracker);
        session.tick();
    }
    writer.finalize()?;

    let ticks = positions.lock().map(|p| p.len()).unwrap_or(0);
    println!("Wrote {} ({} progress updates)", out_path, ticks);

    session.set_mode(PlaybackMode::User);
    println!("Tracked {} pitch samples:", session.current_pitch_samples().len());
    for block in session.current_note_blocks() {
        println!("  {:>4} at {:6.2} s for {:.2} s", block.note.to_string(), block.start_time, block.duration);
    }
    Ok(())
}
