//! Layer tree flattening.
//!
//! Walks the host layer tree and produces, in stacking order, one manifest
//! entry and one file task per exported image. Groups are either expanded
//! into a directory of their own (one image per descendant leaf) or, when
//! merging, exported as a single image like any leaf.

use crate::error::FlattenError;
use log::{debug, warn};
use ora_types::{LayerNode, ManifestEntry};
use std::collections::HashSet;

/// Directory, relative to the export root, that holds the layer images.
pub const LAYER_DATA_DIR: &str = "data";

/// A layer image to render: where it goes and which node supplies the pixels.
#[derive(Debug, Clone, Copy)]
pub struct FileTask<'a> {
    /// Slash-separated path relative to the export root.
    pub src: &'a str,
    pub node: &'a LayerNode,
}

/// The result of flattening one or more layer trees.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Flattened<'a> {
    pub entries: Vec<ManifestEntry>,
    /// `(src, node)` pairs in the same order as `entries`.
    pub tasks: Vec<(String, &'a LayerNode)>,
    /// Group directories relative to the export root, parents before children.
    pub directories: Vec<String>,
}

impl<'a> Flattened<'a> {
    pub fn file_tasks(&self) -> impl Iterator<Item = FileTask<'_>> {
        self.tasks
            .iter()
            .map(|(src, node)| FileTask {
                src: src.as_str(),
                node: *node,
            })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flattens a single node under `prefix`.
pub fn flatten<'a>(
    node: &'a LayerNode,
    prefix: &str,
    merge_groups: bool,
) -> Result<Flattened<'a>, FlattenError> {
    flatten_all(std::slice::from_ref(node), prefix, merge_groups)
}

/// Flattens a list of sibling nodes under `prefix`, keeping their order.
///
/// Fails on the first name that cannot be a file name and on the first
/// output path produced twice (sibling layers or groups sharing a name).
pub fn flatten_all<'a>(
    nodes: &'a [LayerNode],
    prefix: &str,
    merge_groups: bool,
) -> Result<Flattened<'a>, FlattenError> {
    let mut flattener = Flattener {
        merge_groups,
        seen: HashSet::new(),
        out: Flattened::default(),
    };
    for node in nodes {
        flattener.visit(node, prefix)?;
    }
    Ok(flattener.out)
}

struct Flattener<'a> {
    merge_groups: bool,
    seen: HashSet<String>,
    out: Flattened<'a>,
}

impl<'a> Flattener<'a> {
    fn visit(&mut self, node: &'a LayerNode, prefix: &str) -> Result<(), FlattenError> {
        if !is_valid_file_stem(node.name()) {
            return Err(FlattenError::InvalidName(node.name().to_string()));
        }

        match node {
            LayerNode::Group(group) if !self.merge_groups => {
                let dir = join(prefix, &group.name);
                self.claim(&dir)?;
                debug!("Descending into group '{}' as {}/", group.name, dir);
                if group.children.is_empty() {
                    warn!(
                        "Layer group '{}' has no children; exporting an empty directory.",
                        group.name
                    );
                }
                self.out.directories.push(dir.clone());
                for child in &group.children {
                    self.visit(child, &dir)?;
                }
            }
            _ => {
                let src = join(prefix, &format!("{}.png", node.name()));
                self.claim(&src)?;
                self.out
                    .entries
                    .push(ManifestEntry::new(node.name(), src.clone(), node.offset()));
                self.out.tasks.push((src, node));
            }
        }
        Ok(())
    }

    fn claim(&mut self, path: &str) -> Result<(), FlattenError> {
        if self.seen.insert(path.to_string()) {
            Ok(())
        } else {
            Err(FlattenError::DuplicatePath(path.to_string()))
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), name)
    }
}

/// False for names that would escape or split the directory they are written to.
pub(crate) fn is_valid_file_stem(name: &str) -> bool {
    !(name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']))
}
