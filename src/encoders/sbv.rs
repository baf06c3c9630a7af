use std::fmt::Write;

use super::timecode::sbv_time;
use crate::subtitle_model::Track;

/// Render a track as YouTube SubViewer (SBV).
///
/// Each cue is `start,end`, its plain text lines and a blank line.
pub fn encode(track: &Track) -> String {
    let mut output = String::new();
    for cue in track.cues() {
        let _ = writeln!(output, "{},{}", sbv_time(cue.start_ms()), sbv_time(cue.end_ms()));
        let _ = writeln!(output, "{}", cue.plain_lines().join("\n"));
        output.push('\n');
    }
    output
}
