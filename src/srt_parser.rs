use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use log::{debug, warn};

use crate::errors::SubtitleError;
use crate::subtitle_model::{Cue, CueLine, StyleFlags, TextRun, Track};

// @module: SubRip reading and writing

// @const: SRT timing line, trailing position coordinates are tolerated
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+:[0-9]{2}:[0-9]{2}[,.][0-9]{3})\s*-->\s*([0-9]+:[0-9]{2}:[0-9]{2}[,.][0-9]{3})(?:\s.*)?$")
        .expect("timestamp regex is valid")
});

// @const: Inline markup understood inside cue text
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?\s*(b|i|u|font)(?:\s[^>]*)?\s*>|\{\\[^}]*\}").expect("markup regex is valid")
});

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse SRT text into a track.
///
/// Blocks are separated by blank lines. Each block is an optional index
/// line, a timing line and at least one text line. Any block that does not
/// fit this shape fails the whole parse, since a partially read subtitle
/// file is not usable.
pub fn parse_srt(content: &str) -> Result<Track, SubtitleError> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut cues = Vec::new();
    for (index, block) in split_blocks(&normalized).into_iter().enumerate() {
        cues.push(parse_block(index + 1, &block)?);
    }

    let track = Track::new(cues);
    if track.is_empty() {
        warn!("No subtitle entries found in content");
    } else {
        debug!("Parsed {} subtitle entries", track.len());
    }

    let overlap_count = track
        .cues()
        .windows(2)
        .filter(|pair| pair[0].end_ms() > pair[1].start_ms())
        .count();
    if overlap_count > 0 {
        debug!("Found {} overlapping subtitle entries", overlap_count);
    }

    Ok(track)
}

/// Render a track back into SRT text, numbering blocks from 1
pub fn to_srt_string(track: &Track) -> String {
    let mut output = String::new();
    for (index, cue) in track.cues().iter().enumerate() {
        let _ = writeln!(output, "{}", index + 1);
        let _ = writeln!(
            output,
            "{} --> {}",
            format_timestamp(cue.start_ms()),
            format_timestamp(cue.end_ms())
        );
        for line in cue.lines() {
            let _ = writeln!(output, "{}", render_line_markup(line));
        }
        output.push('\n');
    }
    output
}

/// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds.
///
/// Returns `None` for malformed fields, minutes or seconds of 60 and above,
/// and hour values too large to represent.
pub fn parse_timestamp(timestamp: &str) -> Option<u64> {
    let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();
    if parts.len() != 4 || parts[3].len() != 3 {
        return None;
    }
    if parts.iter().any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    let hours: u64 = parts[0].parse().ok()?;
    let minutes: u64 = parts[1].parse().ok()?;
    let seconds: u64 = parts[2].parse().ok()?;
    let millis: u64 = parts[3].parse().ok()?;

    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    hours
        .checked_mul(3_600_000)?
        .checked_add(minutes * 60_000 + seconds * 1_000 + millis)
}

/// Format milliseconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(block: usize, lines: &[&str]) -> Result<Cue, SubtitleError> {
    // The index line is optional and its content is never checked
    let (timing_pos, (start_ms, end_ms)) = match parse_timing_line(lines[0], block)? {
        Some(times) => (0, times),
        None => match lines.get(1) {
            Some(line) => match parse_timing_line(line, block)? {
                Some(times) => (1, times),
                None => {
                    return Err(malformed(block, format!("expected a timing line, found '{}'", line.trim())));
                }
            },
            None => return Err(malformed(block, "missing timing line")),
        },
    };

    let text_lines = &lines[timing_pos + 1..];
    if text_lines.is_empty() {
        return Err(malformed(block, "missing subtitle text"));
    }

    let mut style = StyleFlags::PLAIN;
    let cue_lines = text_lines
        .iter()
        .map(|line| parse_markup(line.trim(), &mut style))
        .collect();

    Cue::new(start_ms, end_ms, cue_lines).map_err(|source| SubtitleError::InvalidCue { block, source })
}

fn parse_timing_line(line: &str, block: usize) -> Result<Option<(u64, u64)>, SubtitleError> {
    let trimmed = line.trim();
    if !trimmed.contains("-->") {
        return Ok(None);
    }

    let caps = TIMESTAMP_REGEX
        .captures(trimmed)
        .ok_or_else(|| malformed(block, format!("invalid timing line '{}'", trimmed)))?;

    let start = parse_timestamp(&caps[1]);
    let end = parse_timestamp(&caps[2]);
    match (start, end) {
        (Some(start_ms), Some(end_ms)) => Ok(Some((start_ms, end_ms))),
        _ => Err(malformed(block, format!("timestamp out of range in '{}'", trimmed))),
    }
}

/// Convert one line of SRT text into styled runs.
///
/// `style` carries open tags over to the next line of the same cue.
fn parse_markup(line: &str, style: &mut StyleFlags) -> CueLine {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in MARKUP_REGEX.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        runs.push(TextRun::new(&line[last..whole.start()], *style));
        last = whole.end();

        // ASS override blocks and font tags carry no style we keep
        let Some(tag) = caps.get(1) else { continue };
        let closing = whole.as_str()[1..].trim_start().starts_with('/');
        match tag.as_str().to_ascii_lowercase().as_str() {
            "b" => style.bold = !closing,
            "i" => style.italic = !closing,
            "u" => style.underline = !closing,
            _ => {}
        }
    }
    runs.push(TextRun::new(&line[last..], *style));

    CueLine::from_runs(runs)
}

fn render_line_markup(line: &CueLine) -> String {
    let mut output = String::new();
    for run in line.runs() {
        let style = run.style;
        if style.bold {
            output.push_str("<b>");
        }
        if style.italic {
            output.push_str("<i>");
        }
        if style.underline {
            output.push_str("<u>");
        }
        output.push_str(&run.text);
        if style.underline {
            output.push_str("</u>");
        }
        if style.italic {
            output.push_str("</i>");
        }
        if style.bold {
            output.push_str("</b>");
        }
    }
    output
}

fn malformed(block: usize, reason: impl Into<String>) -> SubtitleError {
    SubtitleError::MalformedBlock {
        block,
        reason: reason.into(),
    }
}
