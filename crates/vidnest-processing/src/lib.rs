//! Vidnest media processing
//!
//! Metadata probing for uploaded media. Currently this is the playback
//! duration of a published video, read with `ffprobe` from the asset's URL.

pub mod duration;

pub use duration::{parse_ffprobe_duration, DurationProbe, FfprobeDurationProbe};
