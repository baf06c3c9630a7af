/*!
 * Integration tests for the conversion workflow
 */

use anyhow::Result;
use std::fs;

use srtconv::app_config::Config;
use srtconv::app_controller::Controller;
use srtconv::encoders::{EncoderFamily, OutputFormat};
use srtconv::errors::{AppError, FormatError};
use srtconv::srt_parser::parse_srt;

use crate::common;
use crate::common::mock_encoders::{
    BrokenSccEncoders, FailingMarkupEncoders, FailingPlainTextEncoders, standard_markup, standard_plain,
};

const ALL_FILES: [&str; 10] = [
    "movie.dfxp",
    "movie.lrc",
    "movie.mpl",
    "movie.sami",
    "movie.sbv",
    "movie.scc",
    "movie.smi",
    "movie.tmp",
    "movie.ttml",
    "movie.vtt",
];

/// Test that one SRT file turns into ten files named after it
#[test]
fn test_run_withTwoCueFile_shouldWriteTenFiles() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let outdir = temp_dir.path().join("out");

    let report = Controller::with_config(Config::default()).run(&input, &outdir)?;

    assert!(report.is_complete());
    assert!(report.is_success());
    assert_eq!(common::list_file_names(&outdir)?, ALL_FILES);

    let tags: Vec<&str> = report.outputs().iter().map(|output| output.format.tag()).collect();
    assert_eq!(tags, vec!["DFXP", "LRC", "MPL", "SAMI", "SBV", "SCC", "SMI", "TMP", "TTML", "VTT"]);
    for output in report.outputs() {
        assert_eq!(output.path, outdir.join(format!("movie.{}", output.format.extension())));
    }
    Ok(())
}

/// Test that alias outputs are byte-identical on disk
#[test]
fn test_run_aliasFiles_shouldMatchTheirSources() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let outdir = temp_dir.path().join("out");

    Controller::with_config(Config::default()).run(&input, &outdir)?;

    assert_eq!(fs::read(outdir.join("movie.ttml"))?, fs::read(outdir.join("movie.dfxp"))?);
    assert_eq!(fs::read(outdir.join("movie.smi"))?, fs::read(outdir.join("movie.sami"))?);
    assert_eq!(
        fs::read_to_string(outdir.join("movie.mpl"))?,
        "[10][25]Hello|World\n[30][40]Goodbye\n"
    );
    Ok(())
}

/// Test that the WebVTT output reads back into the same cues
#[test]
fn test_run_webvttOutput_shouldKeepCueTimes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    Controller::with_config(Config::default()).run(&input, temp_dir.path())?;

    let vtt = fs::read_to_string(temp_dir.path().join("movie.vtt"))?;
    assert_eq!(
        vtt,
        "WEBVTT\n\n00:00:01.000 --> 00:00:02.500\nHello\nWorld\n\n00:00:03.000 --> 00:00:04.000\n<i>Goodbye</i>\n"
    );
    Ok(())
}

/// Test that a malformed file fails before anything is written
#[test]
fn test_run_withMalformedInput_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "broken.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nFine\n\n2\nthis block has no timing\n",
    )?;
    let outdir = temp_dir.path().join("out");

    let result = Controller::with_config(Config::default()).run(&input, &outdir);

    match result {
        Err(AppError::Subtitle(error)) => assert_eq!(error.block(), 2),
        other => panic!("expected a subtitle error, got {:?}", other.map(|_| ())),
    }
    assert!(!outdir.exists());
    Ok(())
}

/// Test that a missing input file is reported as such
#[test]
fn test_run_withMissingInput_shouldReportInputNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("nope.srt");

    let result = Controller::with_config(Config::default()).run(&input, temp_dir.path());

    assert!(matches!(result, Err(AppError::InputNotFound(ref path)) if *path == input));
    assert!(common::list_file_names(temp_dir.path())?.is_empty());
    Ok(())
}

/// Test that an empty input still produces ten empty-body documents
#[test]
fn test_run_withEmptyInput_shouldWriteTenFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "movie.srt", "")?;
    let outdir = temp_dir.path().join("out");

    let report = Controller::with_config(Config::default()).run(&input, &outdir)?;

    assert_eq!(report.outputs().len(), 10);
    assert_eq!(fs::read_to_string(outdir.join("movie.vtt"))?, "WEBVTT\n");
    assert_eq!(fs::read_to_string(outdir.join("movie.lrc"))?, "");
    Ok(())
}

/// Test that a failing markup family does not stop the plain-text family
#[test]
fn test_run_withFailingMarkupFamily_shouldStillWritePlainFormats() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let outdir = temp_dir.path().join("out");
    let controller = Controller::with_encoders(Config::default(), Box::new(FailingMarkupEncoders), standard_plain());

    let report = controller.run(&input, &outdir)?;

    assert_eq!(report.failed_families(), vec![EncoderFamily::Markup]);
    assert!(!report.is_success());
    assert_eq!(report.failures().len(), 6);
    assert_eq!(
        common::list_file_names(&outdir)?,
        vec!["movie.lrc", "movie.mpl", "movie.sbv", "movie.tmp"]
    );
    Ok(())
}

/// Test that a failing plain-text family does not stop the markup family
#[test]
fn test_run_withFailingPlainFamily_shouldStillWriteMarkupFormats() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let controller =
        Controller::with_encoders(Config::default(), standard_markup(), Box::new(FailingPlainTextEncoders));

    let report = controller.run(&input, temp_dir.path())?;

    assert_eq!(report.failed_families(), vec![EncoderFamily::PlainText]);
    assert_eq!(report.outputs().len(), 6);
    assert!(report.failures().iter().all(|failure| failure.family() == EncoderFamily::PlainText));
    Ok(())
}

/// Test that a single broken encoder only loses its own file
#[test]
fn test_run_withOneBrokenEncoder_shouldSucceedWithoutIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let outdir = temp_dir.path().join("out");
    let controller =
        Controller::with_encoders(Config::default(), Box::new(BrokenSccEncoders::default()), standard_plain());

    let report = controller.run(&input, &outdir)?;

    assert!(report.is_success());
    assert!(!report.is_complete());
    assert_eq!(report.failures().len(), 1);
    assert_eq!(report.failures()[0].format, OutputFormat::Scc);
    assert!(!outdir.join("movie.scc").exists());
    assert_eq!(report.outputs().len(), 9);
    Ok(())
}

/// Test that a write failure is reported only for the affected format
#[test]
fn test_convertTrack_withDirectoryAtOutputPath_shouldFailOnlyThatFormat() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("movie.srt");
    fs::create_dir(temp_dir.path().join("movie.vtt"))?;
    let track = parse_srt(common::TWO_CUE_SRT)?;

    let report = Controller::with_config(Config::default()).convert_track(&track, &input, temp_dir.path())?;

    assert_eq!(report.failures().len(), 1);
    let failure = &report.failures()[0];
    assert_eq!(failure.format, OutputFormat::Vtt);
    assert!(matches!(failure.error, FormatError::Write(ref error) if error.path.ends_with("movie.vtt")));
    assert!(report.is_success());
    Ok(())
}

/// Test that an output directory blocked by a file is fatal
#[test]
fn test_run_withFileAsOutputDir_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let blocker = common::create_test_file(temp_dir.path(), "blocker", "")?;

    let result = Controller::with_config(Config::default()).run(&input, &blocker.join("out"));

    assert!(matches!(result, Err(AppError::File(_))));
    Ok(())
}

/// Test that the configured language ends up in the TTML file
#[test]
fn test_run_withConfiguredLanguage_shouldTagDocuments() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let config = Config {
        language: "es".to_string(),
        ..Config::default()
    };

    Controller::with_config(config).run(&input, temp_dir.path())?;

    let ttml = fs::read_to_string(temp_dir.path().join("movie.ttml"))?;
    assert!(ttml.contains("<tt xml:lang=\"es\""));
    let sami = fs::read_to_string(temp_dir.path().join("movie.sami"))?;
    assert!(sami.contains(".ESCC { Name: Spanish; lang: es; SAMIType: CC; }"));
    Ok(())
}
