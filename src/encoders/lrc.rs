use std::fmt::Write;

use super::flatten_lines;
use super::timecode::lrc_tag;
use crate::subtitle_model::Track;

/// Render a track as LRC lyrics: `[mm:ss.xx]text`.
///
/// Lines are joined with a space and trimmed. Cues left without text are
/// omitted, since an LRC line has no end time to blank the display with.
pub fn encode(track: &Track) -> String {
    let mut output = String::new();
    for cue in track.cues() {
        let joined = flatten_lines(cue.lines(), " ");
        let text = joined.trim();
        if text.is_empty() {
            continue;
        }
        let _ = writeln!(output, "{}{}", lrc_tag(cue.start_ms()), text);
    }
    output
}
