use std::fmt::Write;

use super::flatten_lines;
use super::timecode::clock_seconds;
use crate::subtitle_model::Track;

/// Render a track as TMPlayer: `HH:MM:SS:text`, lines joined by `|`.
///
/// The format carries start times only.
pub fn encode(track: &Track) -> String {
    let mut output = String::new();
    for cue in track.cues() {
        let _ = writeln!(output, "{}:{}", clock_seconds(cue.start_ms()), flatten_lines(cue.lines(), "|"));
    }
    output
}
