use std::fmt::Write;

use super::flatten_lines;
use super::timecode::deciseconds;
use crate::subtitle_model::Track;

/// Render a track as MPL2: `[start][end]text` in deciseconds, lines joined by `|`
pub fn encode(track: &Track) -> String {
    let mut output = String::new();
    for cue in track.cues() {
        let _ = writeln!(
            output,
            "[{}][{}]{}",
            deciseconds(cue.start_ms()),
            deciseconds(cue.end_ms()),
            flatten_lines(cue.lines(), "|")
        );
    }
    output
}
