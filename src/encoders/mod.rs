/*!
 * Output format encoders.
 *
 * Every encoder is a pure function of a `Track`. They are grouped into two
 * families that fail independently of each other:
 *
 * - `MarkupEncoderSet`: WebVTT, DFXP/TTML, SCC and SAMI/SMI
 * - `PlainTextEncoderSet`: SBV, MPL2, TMPlayer and LRC
 *
 * TTML and SMI are aliases: the default trait methods return the DFXP and
 * SAMI documents, so the alias files are byte-identical to their sources.
 */

use std::fmt;

use quick_xml::escape::partial_escape;

use crate::errors::EncodingError;
use crate::subtitle_model::{CueLine, StyleFlags, Track};

pub mod lrc;
pub mod mpl2;
pub mod sami;
pub mod sbv;
pub mod scc;
pub mod timecode;
pub mod tmplayer;
pub mod ttml;
pub mod webvtt;

/// The ten files produced for every input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputFormat {
    Vtt,
    Sbv,
    Ttml,
    Dfxp,
    Scc,
    Smi,
    Sami,
    Mpl,
    Tmp,
    Lrc,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 10] = [
        OutputFormat::Vtt,
        OutputFormat::Sbv,
        OutputFormat::Ttml,
        OutputFormat::Dfxp,
        OutputFormat::Scc,
        OutputFormat::Smi,
        OutputFormat::Sami,
        OutputFormat::Mpl,
        OutputFormat::Tmp,
        OutputFormat::Lrc,
    ];

    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Vtt => "vtt",
            Self::Sbv => "sbv",
            Self::Ttml => "ttml",
            Self::Dfxp => "dfxp",
            Self::Scc => "scc",
            Self::Smi => "smi",
            Self::Sami => "sami",
            Self::Mpl => "mpl",
            Self::Tmp => "tmp",
            Self::Lrc => "lrc",
        }
    }

    /// Uppercase tag shown to the user
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Vtt => "VTT",
            Self::Sbv => "SBV",
            Self::Ttml => "TTML",
            Self::Dfxp => "DFXP",
            Self::Scc => "SCC",
            Self::Smi => "SMI",
            Self::Sami => "SAMI",
            Self::Mpl => "MPL",
            Self::Tmp => "TMP",
            Self::Lrc => "LRC",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Vtt => "WebVTT",
            Self::Sbv => "SubViewer (SBV)",
            Self::Ttml => "TTML",
            Self::Dfxp => "DFXP",
            Self::Scc => "Scenarist SCC",
            Self::Smi => "SMI",
            Self::Sami => "SAMI",
            Self::Mpl => "MPL2",
            Self::Tmp => "TMPlayer",
            Self::Lrc => "LRC",
        }
    }

    pub fn family(&self) -> EncoderFamily {
        match self {
            Self::Vtt | Self::Ttml | Self::Dfxp | Self::Scc | Self::Smi | Self::Sami => EncoderFamily::Markup,
            Self::Sbv | Self::Mpl | Self::Tmp | Self::Lrc => EncoderFamily::PlainText,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Group of encoders sharing one implementation and one failure domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncoderFamily {
    Markup,
    PlainText,
}

impl EncoderFamily {
    pub const ALL: [EncoderFamily; 2] = [EncoderFamily::Markup, EncoderFamily::PlainText];

    pub fn formats(&self) -> Vec<OutputFormat> {
        OutputFormat::ALL
            .into_iter()
            .filter(|format| format.family() == *self)
            .collect()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Markup => "markup formats",
            Self::PlainText => "plain-text formats",
        }
    }
}

impl fmt::Display for EncoderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Encoders for markup-based caption formats
pub trait MarkupEncoderSet {
    fn webvtt(&self, track: &Track) -> Result<String, EncodingError>;

    fn dfxp(&self, track: &Track) -> Result<String, EncodingError>;

    /// TTML is written from the DFXP document
    fn ttml(&self, track: &Track) -> Result<String, EncodingError> {
        self.dfxp(track)
    }

    fn scc(&self, track: &Track) -> Result<String, EncodingError>;

    fn sami(&self, track: &Track) -> Result<String, EncodingError>;

    /// SMI is written from the SAMI document
    fn smi(&self, track: &Track) -> Result<String, EncodingError> {
        self.sami(track)
    }
}

/// Encoders for line-oriented text formats
pub trait PlainTextEncoderSet {
    fn sbv(&self, track: &Track) -> Result<String, EncodingError>;

    fn mpl2(&self, track: &Track) -> Result<String, EncodingError>;

    fn tmplayer(&self, track: &Track) -> Result<String, EncodingError>;

    fn lrc(&self, track: &Track) -> Result<String, EncodingError>;
}

/// Built-in markup encoders
#[derive(Debug, Clone)]
pub struct StandardMarkupEncoders {
    language: String,
}

impl StandardMarkupEncoders {
    /// `language` is written into the TTML and SAMI language declarations
    pub fn new(language: impl Into<String>) -> Self {
        StandardMarkupEncoders {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for StandardMarkupEncoders {
    fn default() -> Self {
        Self::new(crate::app_config::DEFAULT_LANGUAGE)
    }
}

impl MarkupEncoderSet for StandardMarkupEncoders {
    fn webvtt(&self, track: &Track) -> Result<String, EncodingError> {
        Ok(webvtt::encode(track))
    }

    fn dfxp(&self, track: &Track) -> Result<String, EncodingError> {
        ttml::encode(track, &self.language)
    }

    fn scc(&self, track: &Track) -> Result<String, EncodingError> {
        Ok(scc::encode(track))
    }

    fn sami(&self, track: &Track) -> Result<String, EncodingError> {
        Ok(sami::encode(track, &self.language))
    }
}

/// Built-in plain-text encoders
#[derive(Debug, Clone, Default)]
pub struct StandardPlainTextEncoders;

impl PlainTextEncoderSet for StandardPlainTextEncoders {
    fn sbv(&self, track: &Track) -> Result<String, EncodingError> {
        Ok(sbv::encode(track))
    }

    fn mpl2(&self, track: &Track) -> Result<String, EncodingError> {
        Ok(mpl2::encode(track))
    }

    fn tmplayer(&self, track: &Track) -> Result<String, EncodingError> {
        Ok(tmplayer::encode(track))
    }

    fn lrc(&self, track: &Track) -> Result<String, EncodingError> {
        Ok(lrc::encode(track))
    }
}

/// Encode a track into one output format using the set that owns it
pub fn encode_format(
    markup: &dyn MarkupEncoderSet,
    plain: &dyn PlainTextEncoderSet,
    format: OutputFormat,
    track: &Track,
) -> Result<String, EncodingError> {
    match format {
        OutputFormat::Vtt => markup.webvtt(track),
        OutputFormat::Dfxp => markup.dfxp(track),
        OutputFormat::Ttml => markup.ttml(track),
        OutputFormat::Scc => markup.scc(track),
        OutputFormat::Sami => markup.sami(track),
        OutputFormat::Smi => markup.smi(track),
        OutputFormat::Sbv => plain.sbv(track),
        OutputFormat::Mpl => plain.mpl2(track),
        OutputFormat::Tmp => plain.tmplayer(track),
        OutputFormat::Lrc => plain.lrc(track),
    }
}

/// Render a line for a markup format: text is escaped and each run is
/// passed to `wrap` to add the format's style markup.
pub(crate) fn render_markup_line<F>(line: &CueLine, mut wrap: F) -> String
where
    F: FnMut(&str, StyleFlags, &mut String),
{
    let mut output = String::new();
    for run in line.runs() {
        let escaped = partial_escape(&run.text);
        if run.style.is_plain() {
            output.push_str(&escaped);
        } else {
            wrap(&escaped, run.style, &mut output);
        }
    }
    output
}

/// Wrap escaped text in HTML-like b/i/u tags
pub(crate) fn wrap_html_tags(text: &str, style: StyleFlags, uppercase: bool, output: &mut String) {
    let tags: [(bool, &str); 3] = [(style.bold, "b"), (style.italic, "i"), (style.underline, "u")];
    let name = |tag: &str| if uppercase { tag.to_ascii_uppercase() } else { tag.to_string() };

    for (enabled, tag) in tags {
        if enabled {
            output.push('<');
            output.push_str(&name(tag));
            output.push('>');
        }
    }
    output.push_str(text);
    for (enabled, tag) in tags.into_iter().rev() {
        if enabled {
            output.push_str("</");
            output.push_str(&name(tag));
            output.push('>');
        }
    }
}

/// Join the plain text of a cue's lines with `separator`
pub(crate) fn flatten_lines(lines: &[CueLine], separator: &str) -> String {
    lines
        .iter()
        .map(CueLine::plain_text)
        .collect::<Vec<_>>()
        .join(separator)
}
