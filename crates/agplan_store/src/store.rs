//! The per-build result store.
//!
//! A store is rooted at one build invocation's compile directory and holds at
//! most one file per [`ResultVariant`]. The floorplanner writes the
//! incomplete variant; a later stage, once instance paths are final, derives
//! the complete variant from it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::artifact::{read_artifact, write_artifact};
use crate::error::StoreError;
use crate::record::FloorplanResult;

/// Which stage of the build a stored floorplan belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ResultVariant {
    /// Written right after solving; source paths may still change.
    Incomplete,
    /// Paths finalized; consumed by directive emission.
    Complete,
}

impl ResultVariant {
    /// File name of this variant inside the build directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ResultVariant::Incomplete => "areagroups.nopaths.bin",
            ResultVariant::Complete => "areagroups.bin",
        }
    }
}

/// Reads and writes solved floorplans for a single build directory.
pub struct ResultStore {
    build_dir: PathBuf,
    producer_version: String,
}

impl ResultStore {
    /// Creates a store rooted at `build_dir`.
    pub fn new(build_dir: &Path, producer_version: &str) -> Self {
        Self {
            build_dir: build_dir.to_path_buf(),
            producer_version: producer_version.to_string(),
        }
    }

    /// Returns the file path of a variant.
    pub fn path(&self, variant: ResultVariant) -> PathBuf {
        self.build_dir.join(variant.file_name())
    }

    /// Returns `true` if a file for the variant exists.
    pub fn exists(&self, variant: ResultVariant) -> bool {
        self.path(variant).is_file()
    }

    /// Persists `result` as `variant`, atomically replacing any previous file.
    ///
    /// Creates the build directory if it doesn't exist.
    pub fn write(&self, variant: ResultVariant, result: &FloorplanResult) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.build_dir).map_err(|source| StoreError::Io {
            path: self.build_dir.clone(),
            source,
        })?;
        let payload = bincode::serde::encode_to_vec(result, bincode::config::standard())
            .map_err(StoreError::serialization)?;
        let path = self.path(variant);
        write_artifact(&path, &payload, &self.producer_version)?;
        info!(
            "stored {} partitions to {}",
            result.partitions.len(),
            path.display()
        );
        Ok(path)
    }

    /// Loads a variant, validating its header and checksum.
    pub fn read(&self, variant: ResultVariant) -> Result<FloorplanResult, StoreError> {
        let payload = match read_artifact(&self.path(variant)) {
            Err(StoreError::Io { path, source }) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::Missing { path });
            }
            other => other?,
        };
        let (result, _): (FloorplanResult, usize) =
            bincode::serde::decode_from_slice(&payload, bincode::config::standard())
                .map_err(StoreError::serialization)?;
        Ok(result)
    }

    /// Removes a variant so that no stale result outlives a failed build.
    ///
    /// Returns `true` if a file was removed.
    pub fn invalidate(&self, variant: ResultVariant) -> Result<bool, StoreError> {
        let path = self.path(variant);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("invalidated {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Derives the complete variant from the incomplete one.
    ///
    /// Each entry of `final_paths` replaces the source path of the partition
    /// with that name; partitions not listed keep the path they were solved
    /// with. Returns the completed floorplan after writing it.
    pub fn complete(
        &self,
        final_paths: &BTreeMap<String, String>,
    ) -> Result<FloorplanResult, StoreError> {
        let mut result = self.read(ResultVariant::Incomplete)?;
        for (name, path) in final_paths {
            if let Some(partition) = result.partitions.get_mut(name) {
                partition.source_path = Some(path.clone());
            }
        }
        self.write(ResultVariant::Complete, &result)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StoredPartition;
    use agplan_common::{Dimensions, Point};

    fn make_store() -> (tempfile::TempDir, ResultStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path(), "0.1.0");
        (dir, store)
    }

    fn sample() -> FloorplanResult {
        let mut result = FloorplanResult {
            chip: Dimensions::new(100.0, 100.0),
            partitions: BTreeMap::new(),
        };
        result.partitions.insert(
            "dram".into(),
            StoredPartition {
                name: "dram".into(),
                source_path: None,
                area: 400.0 / 3.0,
                center: Point::new(10.000000000000002, 1.0 / 3.0 + 40.0),
                shape: Dimensions::new(20.0, 20.0),
                attributes: BTreeMap::from([("EMPTYBOX".to_string(), "1".to_string())]),
                parent: Some("top".into()),
                children: vec![],
            },
        );
        result
    }

    #[test]
    fn write_then_read_is_bit_exact() {
        let (_dir, store) = make_store();
        let original = sample();
        store.write(ResultVariant::Incomplete, &original).unwrap();
        let back = store.read(ResultVariant::Incomplete).unwrap();
        assert_eq!(back, original);
        let (a, b) = (&original.partitions["dram"], &back.partitions["dram"]);
        assert_eq!(a.center.x.to_bits(), b.center.x.to_bits());
        assert_eq!(a.center.y.to_bits(), b.center.y.to_bits());
        assert_eq!(a.area.to_bits(), b.area.to_bits());
    }

    #[test]
    fn variants_use_distinct_files() {
        let (_dir, store) = make_store();
        store.write(ResultVariant::Incomplete, &sample()).unwrap();
        assert!(store.exists(ResultVariant::Incomplete));
        assert!(!store.exists(ResultVariant::Complete));
        assert!(store.path(ResultVariant::Complete).ends_with("areagroups.bin"));
    }

    #[test]
    fn invalidate_removes_and_reports() {
        let (_dir, store) = make_store();
        assert!(!store.invalidate(ResultVariant::Incomplete).unwrap());
        store.write(ResultVariant::Incomplete, &sample()).unwrap();
        assert!(store.invalidate(ResultVariant::Incomplete).unwrap());
        assert!(!store.exists(ResultVariant::Incomplete));
    }

    #[test]
    fn complete_fills_in_paths() {
        let (_dir, store) = make_store();
        store.write(ResultVariant::Incomplete, &sample()).unwrap();
        let paths = BTreeMap::from([
            ("dram".to_string(), "top/dram_inst".to_string()),
            ("absent".to_string(), "top/nowhere".to_string()),
        ]);
        let completed = store.complete(&paths).unwrap();
        assert_eq!(
            completed.partitions["dram"].source_path.as_deref(),
            Some("top/dram_inst")
        );
        assert_eq!(store.read(ResultVariant::Complete).unwrap(), completed);
    }

    #[test]
    fn complete_without_incomplete_fails() {
        let (_dir, store) = make_store();
        assert!(matches!(
            store.complete(&BTreeMap::new()),
            Err(StoreError::Missing { .. })
        ));
    }

    #[test]
    fn write_creates_build_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(&dir.path().join("nested/build"), "0.1.0");
        store.write(ResultVariant::Incomplete, &sample()).unwrap();
        assert!(store.exists(ResultVariant::Incomplete));
    }
}
