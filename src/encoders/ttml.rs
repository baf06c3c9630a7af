use std::io::{self, Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use super::timecode::clock_millis;
use crate::errors::EncodingError;
use crate::subtitle_model::{Cue, StyleFlags, Track};

const FORMAT: &str = "DFXP";
const TTML_NAMESPACE: &str = "http://www.w3.org/ns/ttml";
const STYLING_NAMESPACE: &str = "http://www.w3.org/ns/ttml#styling";
const STYLE_ID: &str = "default";
const REGION_ID: &str = "bottom";

/// Render a track as a DFXP/TTML document.
///
/// The document is indented by two spaces per level. Each `<p>` sits on its
/// own line with its content inline, lines separated with `<br/>` and styled
/// runs wrapped in `<span>`s with the matching `tts:` attributes.
pub fn encode(track: &Track, language: &str) -> Result<String, EncodingError> {
    let mut buffer = Vec::new();
    write_document(Cursor::new(&mut buffer), track, language)?;

    let mut output = String::from_utf8(buffer)
        .map_err(|e| EncodingError::new(FORMAT, format!("document is not valid UTF-8: {}", e)))?;
    output.push('\n');
    Ok(output)
}

/// Write the document into any sink, without the trailing newline
fn write_document<W: Write>(sink: W, track: &Track, language: &str) -> Result<(), EncodingError> {
    let mut writer = Writer::new_with_indent(sink, b' ', 2);
    write_tt(&mut writer, track, language).map_err(|e| EncodingError::new(FORMAT, format!("XML write failed: {}", e)))
}

fn write_tt<W: Write>(writer: &mut Writer<W>, track: &Track, language: &str) -> io::Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("tt").with_attributes([
        ("xml:lang", language),
        ("xmlns", TTML_NAMESPACE),
        ("xmlns:tts", STYLING_NAMESPACE),
    ])))?;

    writer.write_event(Event::Start(BytesStart::new("head")))?;
    writer.write_event(Event::Start(BytesStart::new("styling")))?;
    writer.write_event(Event::Empty(BytesStart::new("style").with_attributes([
        ("xml:id", STYLE_ID),
        ("tts:color", "white"),
        ("tts:fontFamily", "monospace"),
        ("tts:fontSize", "1c"),
    ])))?;
    writer.write_event(Event::End(BytesEnd::new("styling")))?;
    writer.write_event(Event::Start(BytesStart::new("layout")))?;
    writer.write_event(Event::Empty(BytesStart::new("region").with_attributes([
        ("xml:id", REGION_ID),
        ("tts:displayAlign", "after"),
        ("tts:textAlign", "center"),
    ])))?;
    writer.write_event(Event::End(BytesEnd::new("layout")))?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    writer.write_event(Event::Start(
        BytesStart::new("div").with_attributes([("region", REGION_ID), ("xml:lang", language)]),
    ))?;
    for cue in track.cues() {
        // Mixed content: the indenting writer would break lines inside <p>
        writer.write_indent()?;
        write_paragraph(&mut Writer::new(writer.get_mut()), cue)?;
    }
    writer.write_event(Event::End(BytesEnd::new("div")))?;
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("tt")))
}

fn write_paragraph<W: Write>(writer: &mut Writer<W>, cue: &Cue) -> io::Result<()> {
    let begin = clock_millis(cue.start_ms());
    let end = clock_millis(cue.end_ms());
    writer.write_event(Event::Start(BytesStart::new("p").with_attributes([
        ("begin", begin.as_str()),
        ("end", end.as_str()),
        ("region", REGION_ID),
        ("style", STYLE_ID),
    ])))?;

    for (index, line) in cue.lines().iter().enumerate() {
        if index > 0 {
            writer.write_event(Event::Empty(BytesStart::new("br")))?;
        }
        for run in line.runs() {
            if run.style.is_plain() {
                writer.write_event(Event::Text(BytesText::new(&run.text)))?;
            } else {
                writer.write_event(Event::Start(span_start(run.style)))?;
                writer.write_event(Event::Text(BytesText::new(&run.text)))?;
                writer.write_event(Event::End(BytesEnd::new("span")))?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new("p")))
}

fn span_start(style: StyleFlags) -> BytesStart<'static> {
    let mut span = BytesStart::new("span");
    if style.bold {
        span.push_attribute(("tts:fontWeight", "bold"));
    }
    if style.italic {
        span.push_attribute(("tts:fontStyle", "italic"));
    }
    if style.underline {
        span.push_attribute(("tts:textDecoration", "underline"));
    }
    span
}
