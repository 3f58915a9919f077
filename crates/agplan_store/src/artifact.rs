//! Versioned, checksummed result files with atomic replacement.
//!
//! Layout: 4-byte little-endian header length, bincode header, bincode payload.
//! Writes go to a sibling `*.tmp` file which is then renamed over the target,
//! so the target is either the previous complete file or the new complete file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use agplan_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Magic bytes identifying a stored floorplan.
pub const ARTIFACT_MAGIC: [u8; 4] = *b"AGRP";

/// Current file format version. Increment on breaking changes to
/// the header or payload format.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Header prepended to every result file for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHeader {
    /// Magic bytes: must be `b"AGRP"`.
    pub magic: [u8; 4],

    /// File format version.
    pub format_version: u32,

    /// Version of the tool that produced this file.
    pub producer_version: String,

    /// Content hash of the payload data.
    pub checksum: ContentHash,
}

/// Writes `payload` behind a fresh header, atomically replacing `path`.
pub fn write_artifact(path: &Path, payload: &[u8], producer_version: &str) -> Result<(), StoreError> {
    let header = ArtifactHeader {
        magic: ARTIFACT_MAGIC,
        format_version: ARTIFACT_FORMAT_VERSION,
        producer_version: producer_version.to_string(),
        checksum: ContentHash::from_bytes(payload),
    };
    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(StoreError::serialization)?;

    let header_len = header_bytes.len() as u32;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(payload);

    let tmp = tmp_path(path);
    stage(&tmp, |file| file.write_all(&output))?;

    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Creates `tmp`, fills it with `fill`, and syncs it. On any failure the
/// partial file is removed.
fn stage(tmp: &Path, fill: impl FnOnce(&mut File) -> std::io::Result<()>) -> Result<(), StoreError> {
    let written = File::create(tmp).and_then(|mut file| {
        fill(&mut file)?;
        file.sync_all()
    });
    written.map_err(|source| {
        let _ = std::fs::remove_file(tmp);
        StoreError::Io {
            path: tmp.to_path_buf(),
            source,
        }
    })
}

/// Reads the payload of a result file, validating magic, version, and checksum.
pub fn read_artifact(path: &Path) -> Result<Vec<u8>, StoreError> {
    let raw = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let invalid = |reason: &str| StoreError::InvalidHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if raw.len() < 4 {
        return Err(invalid("file shorter than header length prefix"));
    }
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&raw[..4]);
    let header_len = u32::from_le_bytes(len_bytes) as usize;
    if raw.len() < 4 + header_len {
        return Err(invalid("truncated header"));
    }

    let (header, _): (ArtifactHeader, usize) =
        bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
            .map_err(|_| invalid("undecodable header"))?;

    if header.magic != ARTIFACT_MAGIC {
        return Err(invalid("bad magic bytes"));
    }
    if header.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(StoreError::VersionMismatch {
            path: path.to_path_buf(),
            expected: ARTIFACT_FORMAT_VERSION,
            actual: header.format_version,
        });
    }

    let payload = &raw[4 + header_len..];
    header
        .checksum
        .verify(payload)
        .map_err(|actual| StoreError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: header.checksum.to_string(),
            actual: actual.to_string(),
        })?;

    Ok(payload.to_vec())
}

/// Returns the sibling temporary path used while writing `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
