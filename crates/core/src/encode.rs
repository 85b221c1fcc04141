//! Vector path geometry encoding.

use crate::error::EncodeError;
use crate::flatten::is_valid_file_stem;
use ora_types::{GeometryRow, PathEntry, VectorPath, TRIPLET_LEN};
use std::collections::HashSet;

/// Directory, relative to the export root, that holds the geometry tables.
pub const PATHS_DIR: &str = "paths";

/// A path's manifest entry together with the rows of its geometry table.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPath {
    pub entry: PathEntry,
    pub rows: Vec<GeometryRow>,
}

/// Encodes one path into geometry rows.
///
/// Each stroke contributes one row per point triplet, in order, tagged with
/// its 1-based stroke index. A closed stroke repeats its first triplet as a
/// final row so the loop ends back at the first anchor. Coordinates are
/// copied unchanged.
pub fn encode(path: &VectorPath, paths_dir: &str) -> Result<EncodedPath, EncodeError> {
    if !is_valid_file_stem(&path.name) {
        return Err(EncodeError::InvalidName(path.name.clone()));
    }

    let mut rows = Vec::new();
    for (index, stroke) in path.strokes.iter().enumerate() {
        let stroke_index = index + 1;
        if stroke.points.len() % TRIPLET_LEN != 0 {
            return Err(EncodeError::IncompleteTriplet {
                path: path.name.clone(),
                stroke: stroke_index,
                len: stroke.points.len(),
            });
        }

        let row = |triplet: &[f64]| {
            let mut points = [0.0; TRIPLET_LEN];
            points.copy_from_slice(triplet);
            GeometryRow {
                path: path.name.clone(),
                stroke: stroke_index,
                points,
            }
        };

        rows.extend(stroke.triplets().map(&row));
        if stroke.closed
            && let Some(first) = stroke.triplets().next()
        {
            rows.push(row(first));
        }
    }

    let src = if paths_dir.is_empty() {
        format!("{}.csv", path.name)
    } else {
        format!("{}/{}.csv", paths_dir, path.name)
    };

    Ok(EncodedPath {
        entry: PathEntry::new(path.name.clone(), src),
        rows,
    })
}

/// Encodes every path in host order, rejecting two paths that would share a
/// geometry table.
pub fn encode_all(paths: &[VectorPath], paths_dir: &str) -> Result<Vec<EncodedPath>, EncodeError> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let encoded = encode(path, paths_dir)?;
            if !seen.insert(encoded.entry.src.clone()) {
                return Err(EncodeError::DuplicatePath(encoded.entry.src));
            }
            Ok(encoded)
        })
        .collect()
}
