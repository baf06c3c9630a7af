/*!
 * Canonical subtitle model shared by the SRT parser and every encoder.
 *
 * A `Track` is an ordered list of `Cue`s. Each cue holds one or more
 * `CueLine`s, and each line is a sequence of styled `TextRun`s rather
 * than raw markup, so encoders decide for themselves how (or whether)
 * to render bold, italic and underline.
 */

use crate::errors::CueError;

/// Inline style flags carried by a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyleFlags {
    /// Unstyled text
    pub const PLAIN: StyleFlags = StyleFlags {
        bold: false,
        italic: false,
        underline: false,
    };

    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline)
    }
}

/// A stretch of text sharing one set of style flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: StyleFlags,
}

impl TextRun {
    pub fn new(text: impl Into<String>, style: StyleFlags) -> Self {
        TextRun {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleFlags::PLAIN)
    }
}

/// One displayed line of a cue
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CueLine {
    runs: Vec<TextRun>,
}

impl CueLine {
    /// Build a line from runs, dropping empty runs and merging neighbours
    /// that share the same style.
    pub fn from_runs<I>(runs: I) -> Self
    where
        I: IntoIterator<Item = TextRun>,
    {
        let mut merged: Vec<TextRun> = Vec::new();
        for run in runs {
            if run.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.style == run.style => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        CueLine { runs: merged }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::from_runs([TextRun::plain(text)])
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Line text with styling removed
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// True when the line has no visible characters
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }
}

/// A single timed subtitle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    start_ms: u64,
    end_ms: u64,
    lines: Vec<CueLine>,
}

impl Cue {
    /// Creates a cue, rejecting a time range that ends before it starts
    pub fn new(start_ms: u64, end_ms: u64, lines: Vec<CueLine>) -> Result<Self, CueError> {
        if end_ms < start_ms {
            return Err(CueError::EndBeforeStart {
                start_ms,
                end_ms,
            });
        }

        Ok(Cue {
            start_ms,
            end_ms,
            lines,
        })
    }

    /// Creates an unstyled cue from plain text lines
    pub fn plain(start_ms: u64, end_ms: u64, lines: &[&str]) -> Result<Self, CueError> {
        Self::new(
            start_ms,
            end_ms,
            lines.iter().map(|line| CueLine::plain(*line)).collect(),
        )
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn lines(&self) -> &[CueLine] {
        &self.lines
    }

    /// Text of each line with styling removed
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(CueLine::plain_text).collect()
    }
}

/// The full, immutable set of cues read from one subtitle file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track {
    cues: Vec<Cue>,
}

impl Track {
    /// Builds a track ordered by start time. Cues that start together keep
    /// their input order.
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|cue| cue.start_ms);
        Track { cues }
    }

    pub fn empty() -> Self {
        Track::default()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}
