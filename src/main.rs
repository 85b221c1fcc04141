use clap::Parser;
use ora_love::{ExportConfig, ExportError, OraExporter, load_scene};
use std::path::PathBuf;

/// Exports a layered scene to OpenRaster with offsets and path geometry
/// for game asset loaders.
#[derive(Parser, Debug)]
#[command(name = "ora-love", version)]
struct Cli {
    /// JSON scene describing the layer tree and vector paths.
    scene: PathBuf,

    /// Existing directory to export into.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// PNG compression level.
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=9))]
    compression: u8,

    /// Export each group's layers separately instead of one merged image.
    #[arg(long)]
    no_merge: bool,

    /// Also package the export as <name>.ora.
    #[arg(long)]
    zip: bool,

    /// Print the resulting manifest as JSON.
    #[arg(long)]
    print_manifest: bool,
}

fn main() -> Result<(), ExportError> {
    env_logger::init();
    let cli = Cli::parse();

    let (document, host) = load_scene(&cli.scene)?;
    let config = ExportConfig::new(cli.output)
        .with_compression(cli.compression)?
        .with_merge_groups(!cli.no_merge)
        .with_zip(cli.zip);

    let report = OraExporter::new(&host, config).export(&document)?;

    println!(
        "Exported {} layer images and {} geometry tables to {}",
        report.layer_images,
        report.geometry_tables,
        report.root.display()
    );
    if let Some(archive) = &report.archive {
        println!("Packaged {}", archive.display());
    }
    if cli.print_manifest {
        println!("{}", serde_json::to_string_pretty(&report.manifest)?);
    }
    Ok(())
}
