//! `stack.xml` serialization.
//!
//! ```text
//! <image w=".." h="..">
//!   <stack>
//!     <layer name src x y composite-op opacity visibility/>
//!   </stack>
//!   <paths>
//!     <path name src/>
//!   </paths>
//! </image>
//! ```
//!
//! The `<paths>` element is only written when the manifest has paths.

use crate::error::ManifestError;
use ora_types::{ExportManifest, ManifestEntry, PathEntry};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use roxmltree::Node;
use std::io::Write;
use std::str::FromStr;

/// File name of the manifest inside the export root.
pub const STACK_XML: &str = "stack.xml";

const IMAGE: &str = "image";
const STACK: &str = "stack";
const LAYER: &str = "layer";
const PATHS: &str = "paths";
const PATH: &str = "path";

pub fn write_stack_xml<W: Write>(manifest: &ExportManifest, writer: W) -> Result<(), ManifestError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut image = BytesStart::new(IMAGE);
    image.push_attribute(("w", manifest.width.to_string().as_str()));
    image.push_attribute(("h", manifest.height.to_string().as_str()));
    writer.write_event(Event::Start(image))?;

    writer.write_event(Event::Start(BytesStart::new(STACK)))?;
    for entry in &manifest.stack {
        writer.write_event(Event::Empty(layer_element(entry)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(STACK)))?;

    if manifest.has_paths() {
        writer.write_event(Event::Start(BytesStart::new(PATHS)))?;
        for path in &manifest.paths {
            let mut element = BytesStart::new(PATH);
            element.push_attribute(("name", path.name.as_str()));
            element.push_attribute(("src", path.src.as_str()));
            writer.write_event(Event::Empty(element))?;
        }
        writer.write_event(Event::End(BytesEnd::new(PATHS)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(IMAGE)))?;
    writer.into_inner().flush()?;
    Ok(())
}

pub fn to_stack_xml(manifest: &ExportManifest) -> Result<String, ManifestError> {
    let mut buffer = Vec::new();
    write_stack_xml(manifest, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ManifestError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn layer_element(entry: &ManifestEntry) -> BytesStart<'static> {
    let mut element = BytesStart::new(LAYER);
    element.push_attribute(("name", entry.name.as_str()));
    element.push_attribute(("src", entry.src.as_str()));
    element.push_attribute(("x", entry.x.to_string().as_str()));
    element.push_attribute(("y", entry.y.to_string().as_str()));
    element.push_attribute(("composite-op", entry.composite_op.as_str()));
    // Debug keeps the fractional part, so 1.0 is written as "1.0" rather than "1".
    element.push_attribute(("opacity", format!("{:?}", entry.opacity).as_str()));
    element.push_attribute(("visibility", entry.visibility.as_str()));
    element
}

/// Reads a manifest back from `stack.xml` text.
///
/// Unknown elements are skipped so files written by other OpenRaster tools
/// still load; missing or malformed attributes on known elements are errors.
pub fn parse_stack_xml(text: &str) -> Result<ExportManifest, ManifestError> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != IMAGE {
        return Err(ManifestError::UnexpectedRoot {
            expected: IMAGE,
            found: root.tag_name().name().to_string(),
        });
    }

    let mut manifest = ExportManifest {
        width: parse_attr(root, IMAGE, "w")?,
        height: parse_attr(root, IMAGE, "h")?,
        ..Default::default()
    };

    for section in root.children().filter(Node::is_element) {
        match section.tag_name().name() {
            STACK => {
                for layer in elements_named(section, LAYER) {
                    manifest.stack.push(ManifestEntry {
                        name: required_attr(layer, LAYER, "name")?,
                        src: required_attr(layer, LAYER, "src")?,
                        x: parse_attr(layer, LAYER, "x")?,
                        y: parse_attr(layer, LAYER, "y")?,
                        composite_op: required_attr(layer, LAYER, "composite-op")?,
                        opacity: parse_attr(layer, LAYER, "opacity")?,
                        visibility: required_attr(layer, LAYER, "visibility")?,
                    });
                }
            }
            PATHS => {
                for path in elements_named(section, PATH) {
                    manifest.paths.push(PathEntry {
                        name: required_attr(path, PATH, "name")?,
                        src: required_attr(path, PATH, "src")?,
                    });
                }
            }
            other => log::debug!("Skipping unknown <{}> in {}", other, STACK_XML),
        }
    }

    Ok(manifest)
}

fn elements_named<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    parent
        .children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn required_attr(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, ManifestError> {
    node.attribute(attribute)
        .map(str::to_string)
        .ok_or(ManifestError::MissingAttribute { element, attribute })
}

fn parse_attr<T: FromStr>(
    node: Node<'_, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<T, ManifestError> {
    let value = required_attr(node, element, attribute)?;
    value.parse().map_err(|_| ManifestError::InvalidAttribute {
        element,
        attribute,
        value,
    })
}
