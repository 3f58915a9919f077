//! Store failures.

use std::path::PathBuf;

/// Errors raised while writing or reloading a stored floorplan.
///
/// A missing or corrupt result is never read as "no floorplan": directive
/// emission downstream depends on it, so every problem is reported.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested result variant has not been written.
    #[error("no stored floorplan at {path}")]
    Missing {
        /// Where the variant was expected.
        path: PathBuf,
    },

    /// Reading, writing, or renaming a result file failed.
    #[error("result store I/O error at {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying cause.
        source: std::io::Error,
    },

    /// The length prefix or header could not be decoded, or carries the wrong magic.
    #[error("invalid result header in {path}: {reason}")]
    InvalidHeader {
        /// The result file.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// The payload was truncated or altered after it was written.
    #[error("checksum mismatch in {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The result file.
        path: PathBuf,
        /// Checksum recorded in the header.
        expected: String,
        /// Checksum of the payload on disk.
        actual: String,
    },

    /// The file was written by an incompatible format revision.
    #[error("version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The result file.
        path: PathBuf,
        /// Revision this build reads.
        expected: u32,
        /// Revision found in the header.
        actual: u32,
    },

    /// bincode could not encode or decode a floorplan.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Encoder or decoder message.
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn serialization(err: impl std::fmt::Display) -> Self {
        StoreError::Serialization {
            reason: err.to_string(),
        }
    }

    /// Returns `true` if the variant simply has not been written yet.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_names_the_variant_file() {
        let err = StoreError::Missing {
            path: PathBuf::from("build/areagroups.nopaths.bin"),
        };
        assert!(err.is_missing());
        assert_eq!(
            err.to_string(),
            "no stored floorplan at build/areagroups.nopaths.bin"
        );
    }

    #[test]
    fn checksum_mismatch_shows_both_sums() {
        let err = StoreError::ChecksumMismatch {
            path: PathBuf::from("areagroups.bin"),
            expected: "aabb".to_string(),
            actual: "ccdd".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected aabb, got ccdd"));
        assert!(!err.is_missing());
    }

    #[test]
    fn serialization_wraps_message() {
        let err = StoreError::serialization("unexpected end of input");
        assert_eq!(err.to_string(), "serialization error: unexpected end of input");
    }
}
