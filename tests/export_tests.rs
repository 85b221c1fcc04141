mod common;

use common::fixtures::*;
use common::{TestResult, export, init_logging, list_files};
use ora_love::core::{parse_stack_xml, read_geometry_table};
use ora_love::traits::{LayerRenderer, PngOptions, RenderError};
use ora_love::types::{Document, Layer, LayerNode, Size, Stroke, VectorPath};
use ora_love::{ExportConfig, ExportError, OraExporter, RasterHost};
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_two_layer_merge_export_layout() -> TestResult {
    let dir = tempdir()?;
    let (doc, host) = two_layer_scene();

    let report = export(&doc, &host, dir.path(), true, false)?;
    let root = dir.path().join("scene");
    assert_eq!(report.root, root);
    assert_eq!(report.layer_images, 2);
    assert!(report.archive.is_none());

    assert_eq!(
        list_files(&root),
        vec![
            "Thumbnails/thumbnail.png",
            "data/bg.png",
            "data/fg.png",
            "mimetype",
            "stack.xml",
        ]
    );
    assert_eq!(fs::read_to_string(root.join("mimetype"))?, "image/openraster");
    assert!(!root.join("paths").exists());

    let thumbnail = image::open(root.join("Thumbnails").join("thumbnail.png"))?;
    assert_eq!((thumbnail.width(), thumbnail.height()), (255, 149));

    let fg = image::open(root.join("data").join("fg.png"))?;
    assert_eq!((fg.width(), fg.height()), (20, 10));
    Ok(())
}

#[test]
fn test_stack_xml_lists_layers_in_order() -> TestResult {
    let dir = tempdir()?;
    let (doc, host) = two_layer_scene();
    let report = export(&doc, &host, dir.path(), true, false)?;

    let text = fs::read_to_string(report.root.join("stack.xml"))?;
    let manifest = parse_stack_xml(&text)?;
    assert_eq!(manifest, report.manifest);
    assert_eq!((manifest.width, manifest.height), (512, 300));

    let names: Vec<&str> = manifest.stack.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["bg", "fg"]);
    let fg = &manifest.stack[1];
    assert_eq!(fg.src, "data/fg.png");
    assert_eq!((fg.x, fg.y), (10, 5));
    assert_eq!(fg.composite_op, "svg:src-over");
    assert_eq!(fg.opacity, 1.0);
    assert_eq!(fg.visibility, "visible");
    assert!(manifest.paths.is_empty());
    Ok(())
}

#[test]
fn test_group_expanded_into_directory() -> TestResult {
    let dir = tempdir()?;
    let (doc, host) = single_group_scene();
    let report = export(&doc, &host, dir.path(), false, false)?;

    assert!(report.root.join("data").join("group1").join("inner.png").is_file());
    assert!(!report.root.join("data").join("group1.png").exists());
    assert_eq!(report.manifest.stack[0].src, "data/group1/inner.png");
    Ok(())
}

#[test]
fn test_group_merged_into_single_image() -> TestResult {
    let dir = tempdir()?;
    let (doc, host) = single_group_scene();
    let report = export(&doc, &host, dir.path(), true, false)?;

    let merged = report.root.join("data").join("group1.png");
    assert!(merged.is_file());
    assert!(!report.root.join("data").join("group1").exists());

    let image = image::open(&merged)?.into_rgba8();
    assert_eq!(image.dimensions(), (8, 6));
    assert_eq!(*image.get_pixel(0, 0), RED);
    assert_eq!((report.manifest.stack[0].x, report.manifest.stack[0].y), (4, 4));
    Ok(())
}

#[test]
fn test_nested_groups_mirror_directory_chain() -> TestResult {
    let dir = tempdir()?;
    let (doc, host) = nested_scene();
    let report = export(&doc, &host, dir.path(), false, false)?;

    let data: Vec<String> = list_files(&report.root)
        .into_iter()
        .filter(|f| f.starts_with("data/"))
        .collect();
    assert_eq!(
        data,
        vec![
            "data/characters/enemies/bat.png",
            "data/characters/enemies/slime.png",
            "data/characters/hero.png",
            "data/hud.png",
        ]
    );

    let srcs: Vec<&str> = report.manifest.stack.iter().map(|e| e.src.as_str()).collect();
    assert_eq!(
        srcs,
        vec![
            "data/hud.png",
            "data/characters/hero.png",
            "data/characters/enemies/slime.png",
            "data/characters/enemies/bat.png",
        ]
    );
    Ok(())
}

#[test]
fn test_merge_emits_one_entry_per_top_level_node() -> TestResult {
    let dir = tempdir()?;
    let (doc, host) = nested_scene();
    let report = export(&doc, &host, dir.path(), true, false)?;

    let srcs: Vec<&str> = report.manifest.stack.iter().map(|e| e.src.as_str()).collect();
    assert_eq!(srcs, vec!["data/hud.png", "data/characters.png"]);
    assert!(srcs.iter().all(|s| s.matches('/').count() == 1));

    // Spans hero (10..16, 10..13) through bat (25..28, 22..25), from the group offset.
    let merged = image::open(report.root.join("data").join("characters.png"))?;
    assert_eq!((merged.width(), merged.height()), (18, 15));
    Ok(())
}

#[test]
fn test_open_path_geometry_table() -> TestResult {
    let dir = tempdir()?;
    let (mut doc, host) = two_layer_scene();
    doc.paths = vec![outline_path()];
    let report = export(&doc, &host, dir.path(), true, false)?;

    assert_eq!(report.geometry_tables, 1);
    let table = report.root.join("paths").join("outline.csv");
    let rows = read_geometry_table(fs::File::open(&table)?)?;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.path == "outline" && r.stroke == 1));
    assert_eq!(rows[1].points, [10.5, 10.5, 11.0, 12.0, 13.0, 14.0]);

    let text = fs::read_to_string(&table)?;
    assert!(text.lines().all(|line| line.starts_with("outline,1,")));

    let manifest = parse_stack_xml(&fs::read_to_string(report.root.join("stack.xml"))?)?;
    assert_eq!(manifest.paths.len(), 1);
    assert_eq!(manifest.paths[0].name, "outline");
    assert_eq!(manifest.paths[0].src, "paths/outline.csv");
    Ok(())
}

#[test]
fn test_closed_path_repeats_first_triplet() -> TestResult {
    let dir = tempdir()?;
    let (mut doc, host) = two_layer_scene();
    doc.paths = vec![outline_path(), closed_path()];
    let report = export(&doc, &host, dir.path(), true, false)?;

    let rows = read_geometry_table(fs::File::open(
        report.root.join("paths").join("spawn area.csv"),
    )?)?;
    let strokes: Vec<usize> = rows.iter().map(|r| r.stroke).collect();
    assert_eq!(strokes, vec![1, 1, 2]);
    assert_eq!(rows[0], rows[1]);

    let names: Vec<&str> = report.manifest.paths.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["outline", "spawn area"]);
    Ok(())
}

#[test]
fn test_zip_archive_mirrors_export_root() -> TestResult {
    let dir = tempdir()?;
    let (mut doc, host) = nested_scene();
    doc.paths = vec![outline_path()];
    let report = export(&doc, &host, dir.path(), false, true)?;

    let archive_path = report.archive.clone().expect("archive requested");
    assert_eq!(archive_path, dir.path().join("nested.ora"));

    let mut archive = zip::ZipArchive::new(fs::File::open(&archive_path)?)?;
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).map(|f| f.name().to_string()))
        .collect::<Result<_, _>>()?;
    assert_eq!(names[0], "mimetype");
    assert!(names.iter().all(|n| !n.starts_with("./") && !n.starts_with('/')));

    names.sort();
    assert_eq!(names, list_files(&report.root));

    let mut stack = String::new();
    archive.by_name("stack.xml")?.read_to_string(&mut stack)?;
    assert_eq!(parse_stack_xml(&stack)?, report.manifest);
    Ok(())
}

#[test]
fn test_previous_export_is_replaced() -> TestResult {
    let dir = tempdir()?;
    let stale = dir.path().join("scene").join("data").join("old.png");
    fs::create_dir_all(stale.parent().unwrap())?;
    fs::write(&stale, b"stale")?;

    let (doc, host) = two_layer_scene();
    export(&doc, &host, dir.path(), true, false)?;
    assert!(!stale.exists());
    assert!(dir.path().join("scene").join("data").join("bg.png").is_file());
    Ok(())
}

#[test]
fn test_duplicate_names_fail_before_touching_disk() -> TestResult {
    let dir = tempdir()?;
    let previous = dir.path().join("dupes").join("stack.xml");
    fs::create_dir_all(previous.parent().unwrap())?;
    fs::write(&previous, b"<image w=\"1\" h=\"1\"><stack/></image>")?;

    let mut host = RasterHost::new();
    host.insert(1, solid(1, 1, RED));
    host.insert(2, solid(1, 1, RED));
    let doc = document(
        "dupes.xcf",
        4,
        4,
        vec![
            Layer::new(1, "same", (0, 0)).into(),
            Layer::new(2, "same", (1, 1)).into(),
        ],
    );

    let err = export(&doc, &host, dir.path(), true, false).unwrap_err();
    assert!(matches!(err, ExportError::Flatten(_)));
    assert!(previous.is_file());
    Ok(())
}

#[test]
fn test_incomplete_stroke_is_rejected() -> TestResult {
    let dir = tempdir()?;
    let (mut doc, host) = two_layer_scene();
    doc.paths = vec![VectorPath::new("bad", vec![Stroke::open(vec![1.0, 2.0, 3.0])])];

    let err = export(&doc, &host, dir.path(), true, false).unwrap_err();
    assert!(matches!(err, ExportError::Encode(_)));
    assert!(!dir.path().join("scene").exists());
    Ok(())
}

#[test]
fn test_missing_output_dir_is_config_error() {
    let dir = tempdir().unwrap();
    let (doc, host) = two_layer_scene();
    let err = export(&doc, &host, &dir.path().join("nope"), true, false).unwrap_err();
    assert!(matches!(err, ExportError::Config(_)));
}

#[test]
fn test_untitled_empty_document() -> TestResult {
    let dir = tempdir()?;
    let host = RasterHost::new();
    let report = export(&Document::new(16, 16), &host, dir.path(), true, false)?;

    assert_eq!(report.root, dir.path().join("untitled"));
    assert!(report.root.join("data").is_dir());
    assert!(report.manifest.stack.is_empty());
    let thumbnail = image::open(report.root.join("Thumbnails").join("thumbnail.png"))?;
    assert_eq!((thumbnail.width(), thumbnail.height()), (16, 16));

    // An empty stack still gets the full container skeleton.
    assert_eq!(fs::read_to_string(report.root.join("mimetype"))?, "image/openraster");
    let manifest = parse_stack_xml(&fs::read_to_string(report.root.join("stack.xml"))?)?;
    assert!(manifest.stack.is_empty());
    assert!(!report.root.join("paths").exists());
    Ok(())
}

/// A renderer that fails on a named layer, to check that host errors abort.
#[derive(Debug)]
struct FailingRenderer {
    inner: RasterHost,
    fail_on: &'static str,
}

impl LayerRenderer for FailingRenderer {
    fn render_layer(
        &self,
        node: &LayerNode,
        target: &Path,
        options: &PngOptions,
    ) -> Result<(), RenderError> {
        if node.name() == self.fail_on {
            return Err(RenderError::Other(format!("cannot render {}", node.name())));
        }
        self.inner.render_layer(node, target, options)
    }

    fn render_thumbnail(
        &self,
        document: &Document,
        size: Size,
        target: &Path,
        options: &PngOptions,
    ) -> Result<(), RenderError> {
        self.inner.render_thumbnail(document, size, target, options)
    }

    fn name(&self) -> &'static str {
        "FailingRenderer"
    }
}

#[test]
fn test_render_error_aborts_export() {
    init_logging();
    let dir = tempdir().unwrap();
    let (doc, host) = two_layer_scene();
    let renderer = FailingRenderer {
        inner: host,
        fail_on: "fg",
    };

    let err = OraExporter::new(&renderer, ExportConfig::new(dir.path()))
        .export(&doc)
        .unwrap_err();
    assert!(matches!(err, ExportError::Render(RenderError::Other(_))));

    let root = dir.path().join("scene");
    assert!(root.join("data").join("bg.png").is_file());
    assert!(!root.join("stack.xml").exists());
}
