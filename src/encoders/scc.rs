/*!
 * Scenarist SCC encoder.
 *
 * SCC files carry CEA-608 byte pairs for caption channel 1 as hex words.
 * Every byte has odd parity. Captions are sent in pop-on mode: the text is
 * loaded into the off-screen buffer ahead of time and flipped on screen at
 * the cue's start, then erased at its end.
 */

use std::fmt::Write;

use log::debug;

use super::timecode::scc_timecode;
use crate::subtitle_model::{Cue, Track};

const HEADER: &str = "Scenarist_SCC V1.0";

/// Resume caption loading, sent twice, then erase the off-screen memory
const CAPTION_PREAMBLE: &str = "94ae 94ae 9420 9420 ";

/// Erase displayed memory then end of caption (flip buffers), sent twice
const CAPTION_POSTAMBLE: &str = "942c 942c 942f 942f";

const ERASE_DISPLAYED: &str = "942c 942c";

/// Columns available on a caption row
const ROW_WIDTH: usize = 32;

/// Rows available on screen
const MAX_ROWS: usize = 15;

/// Time to transmit one byte pair at 29.97 frames per second
const MICROSECONDS_PER_CODEWORD: f64 = 1_000_000.0 * 1001.0 / 30_000.0;

/// Code pair written when a character has no CEA-608 equivalent (£)
const UNKNOWN_CHARACTER: &str = "91b6";

/// Preamble address codes placing the cursor at column 0 of rows 1-15
const PAC_HIGH_BYTE_BY_ROW: [&str; MAX_ROWS] = [
    "91", "91", "92", "92", "15", "15", "16", "16", "97", "97", "10", "13", "13", "94", "94",
];
const PAC_LOW_BYTE_BY_ROW: [&str; MAX_ROWS] = [
    "d0", "70", "d0", "70", "d0", "70", "d0", "70", "d0", "70", "d0", "d0", "70", "d0", "70",
];

/// Special North American characters, second byte 0x30-0x3f after 0x11.
/// 0x39 is the transparent space and never produced from text.
const SPECIAL_CHARACTERS: [char; 16] = [
    '®', '°', '½', '¿', '™', '¢', '£', '♪', 'à', '\0', 'è', 'â', 'ê', 'î', 'ô', 'û',
];

/// Extended Western European characters, second byte 0x20-0x3f after 0x12
const EXTENDED_CHARACTERS_12: [char; 32] = [
    'Á', 'É', 'Ó', 'Ú', 'Ü', 'ü', '‘', '¡', '*', '\'', '—', '©', '℠', '•', '“', '”', 'À', 'Â', 'Ç', 'È',
    'Ê', 'Ë', 'ë', 'Î', 'Ï', 'ï', 'Ô', 'Ù', 'ù', 'Û', '«', '»',
];

/// Extended Western European characters, second byte 0x20-0x3f after 0x13
const EXTENDED_CHARACTERS_13: [char; 32] = [
    'Ã', 'ã', 'Í', 'Ì', 'ì', 'Ò', 'ò', 'Õ', 'õ', '{', '}', '\\', '^', '_', '|', '~', 'Ä', 'ä', 'Ö', 'ö',
    'ß', '¥', '¤', '¦', 'Å', 'å', 'Ø', 'ø', '┌', '┐', '└', '┘',
];

/// One caption on its way to the output, times in microseconds
struct PendingCaption {
    code: String,
    start: f64,
    end: Option<f64>,
}

/// Render a track as a Scenarist SCC document
pub fn encode(track: &Track) -> String {
    let mut output = String::from(HEADER);
    output.push_str("\n\n");
    if track.is_empty() {
        return output;
    }

    let mut captions: Vec<PendingCaption> = track
        .cues()
        .iter()
        .map(|cue| PendingCaption {
            code: text_to_code(&layout_rows(cue)),
            start: cue.start_ms() as f64 * 1000.0,
            end: Some(cue.end_ms() as f64 * 1000.0),
        })
        .collect();

    // Every caption after the first is sent early enough to be fully loaded
    // at its start time; a clear that would collide with it is dropped.
    for index in 1..captions.len() {
        let code_words = captions[index].code.len() as f64 / 5.0 + 8.0;
        let code_start = captions[index].start - code_words * MICROSECONDS_PER_CODEWORD;

        if let Some(previous_end) = captions[index - 1].end {
            if previous_end + 3.0 * MICROSECONDS_PER_CODEWORD >= code_start {
                captions[index - 1].end = None;
            }
        }
        captions[index].start = code_start.max(0.0);
    }

    for caption in &captions {
        let _ = write!(output, "{}\t", scc_timecode(caption.start));
        output.push_str(CAPTION_PREAMBLE);
        output.push_str(&caption.code);
        output.push_str(CAPTION_POSTAMBLE);
        output.push_str("\n\n");

        if let Some(end) = caption.end {
            let _ = write!(output, "{}\t{}\n\n", scc_timecode(end), ERASE_DISPLAYED);
        }
    }

    output
}

/// Word-wrap every cue line to the row width, keeping at most the rows
/// that fit on screen
fn layout_rows(cue: &Cue) -> Vec<String> {
    let mut rows: Vec<String> = cue
        .plain_lines()
        .iter()
        .flat_map(|line| wrap_line(line, ROW_WIDTH))
        .collect();

    if rows.is_empty() {
        rows.push(String::new());
    }
    if rows.len() > MAX_ROWS {
        debug!(
            "Caption at {} ms needs {} rows, keeping the first {}",
            cue.start_ms(),
            rows.len(),
            MAX_ROWS
        );
        rows.truncate(MAX_ROWS);
    }

    rows
}

/// Greedy word wrap. Words longer than a row are split across rows.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        if current_len > 0 && current_len + 1 + word.len() <= width {
            current.push(' ');
            current.extend(word.iter());
            current_len += 1 + word.len();
            continue;
        }
        if current_len > 0 {
            rows.push(std::mem::take(&mut current));
        }
        while word.len() > width {
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        current_len = word.len();
        current = word.into_iter().collect();
    }

    if current_len > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Encode laid-out rows at the bottom of the screen
fn text_to_code(rows: &[String]) -> String {
    let mut code = String::new();
    let first_row = MAX_ROWS + 1 - rows.len();

    for (offset, row) in rows.iter().enumerate() {
        let row_index = first_row + offset - 1;
        for _ in 0..2 {
            code.push_str(PAC_HIGH_BYTE_BY_ROW[row_index]);
            code.push_str(PAC_LOW_BYTE_BY_ROW[row_index]);
            code.push(' ');
        }

        for character in row.chars() {
            print_character(&mut code, character);
            maybe_space(&mut code);
        }
        maybe_align(&mut code);
    }

    code
}

fn print_character(code: &mut String, character: char) {
    if let Some(byte) = basic_character_code(character) {
        let _ = write!(code, "{:02x}", odd_parity(byte));
        return;
    }

    let pair = two_byte_character_code(character);
    maybe_align(code);
    match pair {
        Some((first, second)) => {
            let _ = write!(code, "{:02x}{:02x}", odd_parity(first), odd_parity(second));
        }
        None => code.push_str(UNKNOWN_CHARACTER),
    }
}

/// Finish a half-filled word with a null filler byte
fn maybe_align(code: &mut String) {
    if code.len() % 5 == 2 {
        code.push_str("80 ");
    }
}

/// Close a completed word
fn maybe_space(code: &mut String) {
    if code.len() % 5 == 4 {
        code.push(' ');
    }
}

/// Standard character set byte for `character`, if it has one.
///
/// CEA-608 replaces several ASCII positions with accented letters.
fn basic_character_code(character: char) -> Option<u8> {
    match character {
        'á' => Some(0x2a),
        'é' => Some(0x5c),
        'í' => Some(0x5e),
        'ó' => Some(0x5f),
        'ú' => Some(0x60),
        'ç' => Some(0x7b),
        '÷' => Some(0x7c),
        'Ñ' => Some(0x7d),
        'ñ' => Some(0x7e),
        '█' => Some(0x7f),
        '*' | '\\' | '^' | '_' | '`' | '{' | '|' | '}' | '~' => None,
        ' '..='~' => Some(character as u8),
        _ => None,
    }
}

fn two_byte_character_code(character: char) -> Option<(u8, u8)> {
    let find = |table: &[char], base: u8| {
        table
            .iter()
            .position(|candidate| *candidate == character)
            .map(|index| base + index as u8)
    };

    if character == '\0' {
        return None;
    }
    if let Some(second) = find(&SPECIAL_CHARACTERS, 0x30) {
        return Some((0x11, second));
    }
    if let Some(second) = find(&EXTENDED_CHARACTERS_12, 0x20) {
        return Some((0x12, second));
    }
    find(&EXTENDED_CHARACTERS_13, 0x20).map(|second| (0x13, second))
}

/// Set the high bit when needed so the byte has an odd number of ones
fn odd_parity(byte: u8) -> u8 {
    let low = byte & 0x7f;
    if low.count_ones() % 2 == 0 { low | 0x80 } else { low }
}
