use std::fmt::Write;

use quick_xml::escape::partial_escape;

use super::{render_markup_line, wrap_html_tags};
use crate::language_utils;
use crate::subtitle_model::Track;

const BLANK: &str = "&nbsp;";

/// Render a track as a SAMI document.
///
/// Each cue opens a `<SYNC>` at its start. A blanking sync is added at the
/// cue's end unless the following cue takes over at that moment or earlier.
pub fn encode(track: &Track, language: &str) -> String {
    let class = language_utils::sami_class_name(language);
    let name = language_utils::get_language_name(language).unwrap_or_else(|_| language.to_string());

    let mut output = String::new();
    output.push_str("<SAMI>\n");
    output.push_str("<HEAD>\n");
    output.push_str("<STYLE TYPE=\"text/css\">\n");
    output.push_str("<!--\n");
    output.push_str("P { margin-left: 1pt; margin-right: 1pt; margin-bottom: 2pt; margin-top: 2pt;\n");
    output.push_str("    text-align: center; font-size: 10pt; font-family: Arial; font-weight: normal; color: white; }\n");
    let _ = writeln!(
        output,
        ".{} {{ Name: {}; lang: {}; SAMIType: CC; }}",
        class,
        partial_escape(&name),
        partial_escape(language)
    );
    output.push_str("-->\n");
    output.push_str("</STYLE>\n");
    output.push_str("</HEAD>\n");
    output.push_str("<BODY>\n");

    let cues = track.cues();
    for (index, cue) in cues.iter().enumerate() {
        let body = cue
            .lines()
            .iter()
            .map(|line| render_markup_line(line, |text, style, out| wrap_html_tags(text, style, true, out)))
            .collect::<Vec<_>>()
            .join("<br>");
        let body = if body.trim().is_empty() { BLANK.to_string() } else { body };
        let _ = writeln!(output, "<SYNC Start={}><P Class={}>{}", cue.start_ms(), class, body);

        let next_start = cues.get(index + 1).map(|next| next.start_ms());
        if next_start.is_none_or(|start| start > cue.end_ms()) {
            let _ = writeln!(output, "<SYNC Start={}><P Class={}>{}", cue.end_ms(), class, BLANK);
        }
    }

    output.push_str("</BODY>\n");
    output.push_str("</SAMI>\n");
    output
}
