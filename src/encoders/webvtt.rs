use std::fmt::Write;

use super::timecode::clock_millis;
use super::{render_markup_line, wrap_html_tags};
use crate::subtitle_model::Track;

const HEADER: &str = "WEBVTT";

/// Render a track as WebVTT.
///
/// Blank cue lines are left out because an empty line ends a cue payload.
pub fn encode(track: &Track) -> String {
    let mut output = String::from(HEADER);
    output.push('\n');

    for cue in track.cues() {
        output.push('\n');
        let _ = writeln!(output, "{} --> {}", clock_millis(cue.start_ms()), clock_millis(cue.end_ms()));
        for line in cue.lines().iter().filter(|line| !line.is_blank()) {
            let rendered = render_markup_line(line, |text, style, out| wrap_html_tags(text, style, false, out));
            output.push_str(&rendered);
            output.push('\n');
        }
    }

    output
}
