//! Pitch samples and tracks.
//!
//! A track is either the bounded live track fed by a
//! [`PitchTracker`](crate::acf::PitchTracker) or an unbounded reference track
//! loaded in bulk from a [`ReferencePitch`] payload.

mod reference;
mod sample;

pub use reference::ReferencePitch;
pub use sample::{PitchSample, PitchTrack};

/// The number of live samples kept by default.
pub const LIVE_TRACK_CAPACITY: usize = 1000;
