/*!
 * # srtconv - SubRip subtitle converter
 *
 * A Rust library that reads a SubRip (SRT) subtitle file and renders it
 * into the caption formats used by common players and platforms.
 *
 * ## Features
 *
 * - Strict SRT reading with styled text runs (bold, italic, underline)
 * - Ten outputs: WebVTT, SBV, TTML, DFXP, SCC, SAMI, SMI, MPL2, TMPlayer, LRC
 * - Per-format failure reporting: one broken encoder never blocks the others
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_model`: Cues and tracks shared by every component
 * - `srt_parser`: SRT reading and writing
 * - `encoders`: Output format encoders, grouped in two encoder sets:
 *   - `encoders::MarkupEncoderSet`: WebVTT, DFXP/TTML, SCC, SAMI/SMI
 *   - `encoders::PlainTextEncoderSet`: SBV, MPL2, TMPlayer, LRC
 * - `app_controller`: Conversion driver
 * - `app_config`: Configuration management
 * - `language_utils`: Caption language tag utilities
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod encoders;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod srt_parser;
pub mod subtitle_model;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{ConversionReport, Controller};
pub use encoders::{EncoderFamily, MarkupEncoderSet, OutputFormat, PlainTextEncoderSet};
pub use errors::{AppError, CueError, EncodingError, SubtitleError, WriteError};
pub use srt_parser::{parse_srt, to_srt_string};
pub use subtitle_model::{Cue, CueLine, StyleFlags, TextRun, Track};
