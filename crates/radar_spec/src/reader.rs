//! Spec and blip file reading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{RadarError, RadarResult};
use crate::models::{Blip, Quadrant, QuadrantOrder, QuadrantPosition, Radar, Ring, RingPosition};

/// Accepted spec file names, in lookup order.
pub const SPEC_FILE_NAMES: [&str; 2] = ["specs.yml", "specs.yaml"];

/// Extensions of blip documents.
pub const BLIP_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

#[derive(Debug, Deserialize)]
struct SpecDocument {
    rings: serde_yaml::Value,
    quadrants: serde_yaml::Value,
}

/// Rings and quadrants are either keyed by position or listed in position
/// order (rings innermost first, quadrants clockwise from top left).
#[derive(Debug)]
enum Declared<P, T> {
    Keyed(BTreeMap<P, T>),
    Listed(Vec<T>),
}

impl<P, T> Declared<P, T>
where
    P: DeserializeOwned + Ord,
    T: DeserializeOwned,
{
    /// Pick the form from the YAML node itself so that errors point at the
    /// offending key or entry rather than at both forms at once.
    fn parse(value: serde_yaml::Value, key: &str, path: &Path) -> RadarResult<Self> {
        let invalid = |e: serde_yaml::Error| RadarError::invalid_format(path, format!("{key}: {e}"));
        match value {
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)
                .map(Declared::Keyed)
                .map_err(invalid),
            serde_yaml::Value::Sequence(_) => serde_yaml::from_value(value)
                .map(Declared::Listed)
                .map_err(invalid),
            _ => Err(RadarError::invalid_format(
                path,
                format!("{key}: expected a mapping of positions or a list"),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BlipDocument {
    blip: Option<BlipFields>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlipFields {
    name: Option<String>,
    is_new: Option<bool>,
    description: Option<TextField>,
    references: Option<TextField>,
    tags: Option<TextField>,
}

/// A field that may be written as a single string or a list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextField {
    One(String),
    Many(Vec<String>),
}

impl TextField {
    fn normalize(field: Option<TextField>) -> Vec<String> {
        match field {
            None => Vec::new(),
            Some(TextField::One(s)) if s.is_empty() => Vec::new(),
            Some(TextField::One(s)) => vec![s],
            Some(TextField::Many(items)) => items,
        }
    }
}

/// Reader for radar spec and blip files.
pub struct SpecReader;

impl SpecReader {
    /// Locate the spec file under `root`.
    ///
    /// `specs.yml` wins when both variants exist.
    pub fn find_spec_file(root: impl AsRef<Path>) -> RadarResult<PathBuf> {
        let root = root.as_ref();
        let found: Vec<PathBuf> = SPEC_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .filter(|path| path.is_file())
            .collect();

        if found.len() > 1 {
            warn!(
                "Both {} and {} exist in {:?}, using {}",
                SPEC_FILE_NAMES[0], SPEC_FILE_NAMES[1], root, SPEC_FILE_NAMES[0]
            );
        }

        found
            .into_iter()
            .next()
            .ok_or_else(|| RadarError::SpecNotFound(root.to_path_buf()))
    }

    /// Read the spec under `root` and build an empty radar from it.
    pub fn read_spec(root: impl AsRef<Path>) -> RadarResult<Radar> {
        let path = Self::find_spec_file(root)?;
        debug!("Reading radar spec from {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| RadarError::io(&path, e))?;
        Self::parse_spec(&content, &path)
    }

    /// Parse spec content. `path` is only used for diagnostics.
    pub fn parse_spec(content: &str, path: &Path) -> RadarResult<Radar> {
        let document: SpecDocument =
            serde_yaml::from_str(content).map_err(|e| RadarError::invalid_format(path, e))?;

        let rings = match Declared::<RingPosition, Ring>::parse(document.rings, "rings", path)? {
            Declared::Keyed(rings) => rings,
            Declared::Listed(rings) => match RingPosition::for_count(rings.len()) {
                Some(positions) => positions.iter().copied().zip(rings).collect(),
                None => return Err(RadarError::InvalidRings(rings)),
            },
        };

        let quadrants =
            match Declared::<QuadrantPosition, Quadrant>::parse(document.quadrants, "quadrants", path)? {
                Declared::Keyed(quadrants) => quadrants,
                Declared::Listed(quadrants) if quadrants.len() == Radar::QUADRANTS => {
                    QuadrantOrder::CLOCKWISE
                        .positions()
                        .iter()
                        .copied()
                        .zip(quadrants)
                        .collect()
                }
                Declared::Listed(quadrants) => return Err(RadarError::InvalidQuadrants(quadrants)),
            };

        Radar::new(rings, quadrants)
    }

    /// Read a single blip file placed in `quadrant` / `ring`.
    pub fn read_blip(quadrant: &Quadrant, ring: &Ring, path: impl AsRef<Path>) -> RadarResult<Blip> {
        let path = path.as_ref();
        debug!("Reading blip from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| RadarError::io(path, e))?;
        Self::parse_blip(quadrant, ring, &content, path)
    }

    /// Parse blip content. `path` is only used for diagnostics.
    pub fn parse_blip(
        quadrant: &Quadrant,
        ring: &Ring,
        content: &str,
        path: &Path,
    ) -> RadarResult<Blip> {
        let document: BlipDocument =
            serde_yaml::from_str(content).map_err(|e| RadarError::invalid_format(path, e))?;

        let missing = |field: &str| RadarError::MissingField {
            path: path.to_path_buf(),
            field: field.to_string(),
        };

        let fields = document.blip.ok_or_else(|| missing("blip"))?;
        let name = fields.name.ok_or_else(|| missing("name"))?;

        Ok(Blip::new(name, &ring.name, &quadrant.name)
            .with_previous_ring(previous_ring(ring, fields.is_new))
            .with_description(TextField::normalize(fields.description))
            .with_references(TextField::normalize(fields.references))
            .with_tags(TextField::normalize(fields.tags)))
    }
}

/// Derive `previous_ring` from the optional `is_new` flag.
///
/// Only an explicit `is_new: true` marks a blip as new. A missing flag means
/// "unchanged", exactly like `is_new: false`, so a brand-new item that lacks
/// the flag is reported as not new.
pub fn previous_ring(ring: &Ring, is_new: Option<bool>) -> Option<String> {
    match is_new {
        Some(true) => None,
        Some(false) | None => Some(ring.name.clone()),
    }
}

/// True if `path` carries one of the blip document extensions.
pub fn is_blip_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| BLIP_EXTENSIONS.contains(&ext))
}
