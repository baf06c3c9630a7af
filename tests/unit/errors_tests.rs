/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use std::io;
use std::path::PathBuf;

use anyhow::anyhow;
use srtconv::errors::{AppError, CueError, EncodingError, FormatError, SubtitleError, WriteError};

/// Test that a missing input names the file in the message
#[test]
fn test_appError_inputNotFound_shouldQuotePath() {
    let error = AppError::InputNotFound(PathBuf::from("missing.srt"));

    assert_eq!(error.to_string(), "Input file 'missing.srt' not found");
}

/// Test that parse errors convert into AppError with the read prefix
#[test]
fn test_appError_fromSubtitleError_shouldPrefixMessage() {
    let error: AppError = SubtitleError::MalformedBlock {
        block: 3,
        reason: "missing timing line".to_string(),
    }
    .into();

    assert_eq!(
        error.to_string(),
        "Error reading SRT file: malformed subtitle block 3: missing timing line"
    );
}

/// Test that the invalid cue error exposes its cause
#[test]
fn test_subtitleError_invalidCue_shouldChainSource() {
    let error = SubtitleError::InvalidCue {
        block: 1,
        source: CueError::EndBeforeStart {
            start_ms: 10,
            end_ms: 5,
        },
    };

    let source = error.source().map(|source| source.to_string());

    assert_eq!(source.as_deref(), Some("cue ends at 5 ms before it starts at 10 ms"));
}

/// Test that format errors stay transparent over their causes
#[test]
fn test_formatError_shouldDisplayInnerError() {
    let encoding: FormatError = EncodingError::new("SCC", "too many rows").into();
    let write: FormatError = WriteError {
        path: PathBuf::from("out/movie.vtt"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    }
    .into();

    assert_eq!(encoding.to_string(), "failed to encode SCC: too many rows");
    assert_eq!(write.to_string(), "failed to write out/movie.vtt: denied");
}

/// Test conversions from glue error types
#[test]
fn test_appError_fromAnyhowAndIo_shouldConvert() {
    let from_anyhow: AppError = anyhow!("boom").context("while converting").into();
    let from_io: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();

    assert!(matches!(from_anyhow, AppError::Unknown(ref message) if message == "while converting: boom"));
    assert!(matches!(from_io, AppError::File(_)));
}
