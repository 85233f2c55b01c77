//! Shared test fixtures.

use crate::tracker::OutputFile;

/// An output file staged under `staging-bucket/outputs/` with a matching
/// download URL.
pub fn output_file(filename: &str) -> OutputFile {
    OutputFile {
        filename: filename.to_string(),
        url: format!("https://staging.example.com/outputs/{}", filename),
        bucket: "staging-bucket".to_string(),
        key: format!("outputs/{}", filename),
    }
}
