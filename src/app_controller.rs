use log::{debug, error, info};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::encoders::{
    self, EncoderFamily, MarkupEncoderSet, OutputFormat, PlainTextEncoderSet, StandardMarkupEncoders,
    StandardPlainTextEncoders,
};
use crate::errors::{AppError, EncodingError, FormatError, WriteError};
use crate::file_utils::FileManager;
use crate::srt_parser;
use crate::subtitle_model::Track;

// @module: Conversion driver

/// Stages of a conversion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    ReadInput,
    Parse,
    EncodeAll,
    WriteAll,
    Done,
    Failed,
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReadInput => "read input",
            Self::Parse => "parse",
            Self::EncodeAll => "encode",
            Self::WriteAll => "write",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// A file written by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedOutput {
    pub format: OutputFormat,
    pub path: PathBuf,
}

/// A format that could not be produced
#[derive(Debug)]
pub struct FormatFailure {
    pub format: OutputFormat,
    pub error: FormatError,
}

impl FormatFailure {
    pub fn family(&self) -> EncoderFamily {
        self.format.family()
    }
}

/// Outcome of the encode and write stages
#[derive(Debug, Default)]
pub struct ConversionReport {
    outputs: Vec<ConvertedOutput>,
    failures: Vec<FormatFailure>,
}

impl ConversionReport {
    /// Written files, ordered by format tag
    pub fn outputs(&self) -> &[ConvertedOutput] {
        &self.outputs
    }

    pub fn failures(&self) -> &[FormatFailure] {
        &self.failures
    }

    /// Families in which no format could be produced
    pub fn failed_families(&self) -> Vec<EncoderFamily> {
        EncoderFamily::ALL
            .into_iter()
            .filter(|family| {
                family
                    .formats()
                    .iter()
                    .all(|format| self.failures.iter().any(|failure| failure.format == *format))
            })
            .collect()
    }

    /// A run succeeds unless a whole family failed
    pub fn is_success(&self) -> bool {
        self.failed_families().is_empty()
    }

    /// True when every format was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main application controller: reads one SRT file and writes every format
pub struct Controller {
    // @field: App configuration
    config: Config,
    markup: Box<dyn MarkupEncoderSet>,
    plain: Box<dyn PlainTextEncoderSet>,
}

impl Controller {
    // @method: Create a controller with the built-in encoders
    pub fn with_config(config: Config) -> Self {
        let markup = StandardMarkupEncoders::new(config.language.clone());
        Self::with_encoders(config, Box::new(markup), Box::new(StandardPlainTextEncoders))
    }

    // @method: Create a controller with custom encoder sets
    pub fn with_encoders(
        config: Config,
        markup: Box<dyn MarkupEncoderSet>,
        plain: Box<dyn PlainTextEncoderSet>,
    ) -> Self {
        Self { config, markup, plain }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert `input_file` into every output format inside `output_dir`.
    ///
    /// Reading and parsing failures abort the run before anything is
    /// written. Encoding and writing failures are collected per format in
    /// the returned report.
    pub fn run(&self, input_file: &Path, output_dir: &Path) -> Result<ConversionReport, AppError> {
        let start_time = Instant::now();

        Self::enter(ConversionStage::ReadInput);
        if !FileManager::file_exists(input_file) {
            Self::enter(ConversionStage::Failed);
            return Err(AppError::InputNotFound(input_file.to_path_buf()));
        }
        let content = FileManager::read_to_string(input_file).map_err(|e| {
            Self::enter(ConversionStage::Failed);
            AppError::File(format!("{:#}", e))
        })?;

        Self::enter(ConversionStage::Parse);
        let track = srt_parser::parse_srt(&content).map_err(|e| {
            Self::enter(ConversionStage::Failed);
            AppError::from(e)
        })?;
        info!("Read {} subtitle entries from {}", track.len(), input_file.display());

        let report = self.convert_track(&track, input_file, output_dir)?;

        Self::enter(if report.is_success() { ConversionStage::Done } else { ConversionStage::Failed });
        debug!("Conversion finished in {:.2?}", start_time.elapsed());

        Ok(report)
    }

    /// Encode a parsed track and write every format next to the others.
    ///
    /// The output directory is created once up front; failing to create it
    /// is fatal since no format could be written.
    pub fn convert_track(
        &self,
        track: &Track,
        input_file: &Path,
        output_dir: &Path,
    ) -> Result<ConversionReport, AppError> {
        Self::enter(ConversionStage::EncodeAll);
        let encoded: Vec<(OutputFormat, Result<String, EncodingError>)> = EncoderFamily::ALL
            .iter()
            .flat_map(|family| family.formats())
            .map(|format| (format, self.encode(format, track)))
            .collect();

        Self::enter(ConversionStage::WriteAll);
        FileManager::ensure_dir(output_dir).map_err(|e| AppError::File(format!("{:#}", e)))?;

        let mut report = ConversionReport::default();
        for (format, result) in encoded {
            let path = FileManager::generate_output_path(input_file, output_dir, format.extension());
            let outcome = result.map_err(FormatError::from).and_then(|content| {
                FileManager::write_to_file(&path, &content)
                    .map_err(|source| FormatError::from(WriteError { path: path.clone(), source }))
            });

            match outcome {
                Ok(()) => {
                    debug!("Wrote {} to {}", format.display_name(), path.display());
                    report.outputs.push(ConvertedOutput { format, path });
                }
                Err(error) => {
                    error!("{} ({}): {}", format.tag(), format.family(), error);
                    report.failures.push(FormatFailure { format, error });
                }
            }
        }

        report.outputs.sort_by(|a, b| a.format.tag().cmp(b.format.tag()));
        for family in report.failed_families() {
            error!("Every one of the {} failed", family);
        }

        Ok(report)
    }

    fn encode(&self, format: OutputFormat, track: &Track) -> Result<String, EncodingError> {
        encoders::encode_format(self.markup.as_ref(), self.plain.as_ref(), format, track)
    }

    fn enter(stage: ConversionStage) {
        debug!("Conversion stage: {}", stage);
    }
}
