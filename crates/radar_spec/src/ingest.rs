//! Directory traversal that turns a radar root into a populated [`Radar`].

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{RadarError, RadarResult};
use crate::models::{QuadrantOrder, Radar};
use crate::reader::{is_blip_file, SpecReader};

/// Outcome of a successful ingestion run.
#[derive(Debug)]
pub struct Ingestion {
    pub radar: Radar,
    pub root: PathBuf,
    /// Number of blip files processed.
    pub processed: usize,
}

/// Loads a radar from `<root>/<quadrant.id>/<ring.id>/*.{yaml,yml}`.
pub struct Ingester {
    root: PathBuf,
}

impl Ingester {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the spec, then every blip file.
    ///
    /// The first error aborts the run; no partial radar is returned.
    pub fn ingest(&self) -> RadarResult<Ingestion> {
        let mut radar = SpecReader::read_spec(&self.root)?;

        let rings: Vec<_> = radar.rings_outward().into_iter().cloned().collect();
        let quadrants: Vec<_> = radar
            .quadrants(QuadrantOrder::CLOCKWISE)
            .into_iter()
            .cloned()
            .collect();

        let mut processed = 0;
        for ring in &rings {
            for quadrant in &quadrants {
                let blips_dir = self.root.join(&quadrant.id).join(&ring.id);
                for path in Self::blip_files(&blips_dir)? {
                    let blip = SpecReader::read_blip(quadrant, ring, &path)?;
                    debug!("Processed {}", blip);
                    radar.add_blip(blip);
                    processed += 1;
                }
            }
        }

        info!("Processed {} blips from {:?}", processed, self.root);

        Ok(Ingestion {
            radar,
            root: self.root.clone(),
            processed,
        })
    }

    /// Blip files directly inside `dir`, in directory enumeration order.
    ///
    /// A missing directory yields nothing.
    fn blip_files(dir: &Path) -> RadarResult<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(RadarError::NotADirectory(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.path().is_file() && is_blip_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_directory_yields_nothing() {
        let temp = tempdir().unwrap();
        let files = Ingester::blip_files(&temp.path().join("absent")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_file_in_place_of_directory_fails() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("adopt");
        fs::write(&path, "not a dir").unwrap();

        let err = Ingester::blip_files(&path).unwrap_err();
        assert!(matches!(err, RadarError::NotADirectory(p) if p == path));
    }

    #[test]
    fn test_only_yaml_files_are_listed() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.yaml"), "").unwrap();
        fs::write(temp.path().join("b.yml"), "").unwrap();
        fs::write(temp.path().join("notes.md"), "").unwrap();
        fs::create_dir(temp.path().join("nested.yaml")).unwrap();

        let mut names: Vec<_> = Ingester::blip_files(temp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }
}
