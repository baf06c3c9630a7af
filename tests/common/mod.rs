/*!
 * Common test utilities for the srtconv test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;


/// Two cues, the first one on two lines
pub const TWO_CUE_SRT: &str = "1
00:00:01,000 --> 00:00:02,500
Hello
World

2
00:00:03,000 --> 00:00:04,000
<i>Goodbye</i>
";

/// Routes library logs through env_logger, once per test binary
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the two-cue sample subtitle file
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, TWO_CUE_SRT)
}

/// File names in a directory, sorted
pub fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}
