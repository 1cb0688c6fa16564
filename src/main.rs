use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use visit_report::{
    Density, ExportError, ExportFormat, ExporterBuilder, FilesystemPhotoRepository, Visit,
};

/// Render a site visit report from a JSON visit record.
#[derive(Parser, Debug)]
#[command(name = "visit-report", version, about)]
struct Cli {
    /// Path to the visit record (camelCase JSON).
    visit: PathBuf,

    /// Output format: pdf or docx.
    #[arg(short, long, default_value = "pdf")]
    format: ExportFormat,

    /// Photos per page: 2 or 6.
    #[arg(short, long, default_value = "6")]
    density: Density,

    /// Directory holding `<photo id>.<ext>` files. Defaults to the visit file's directory.
    #[arg(long)]
    photos: Option<PathBuf>,

    /// Report configuration file (camelCase JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where the document is written.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn read_visit(path: &Path) -> Result<Visit, ExportError> {
    let source = fs::read_to_string(path).map_err(|e| {
        ExportError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read visit from '{}': {}", path.display(), e),
        ))
    })?;
    Ok(serde_json::from_str(&source)?)
}

#[tokio::main]
async fn main() -> Result<(), ExportError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let visit = read_visit(&cli.visit)?;

    let photo_dir = match cli.photos {
        Some(dir) => dir,
        None => cli
            .visit
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    log::debug!("Loading photos from {}", photo_dir.display());

    let mut builder = ExporterBuilder::new().with_repository(FilesystemPhotoRepository::new(photo_dir));
    if let Some(config) = &cli.config {
        builder = builder.with_config_file(config)?;
    }
    let exporter = builder.build()?;

    let document = exporter.export_async(visit, cli.format, cli.density).await?;
    let path = document.write_to_dir(&cli.out_dir)?;

    println!("{}", path.display());
    Ok(())
}
