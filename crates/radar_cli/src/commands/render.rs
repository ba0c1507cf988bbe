//! Render command - Ingest a radar and publish it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use radar_publish::{PublishConfig, Publication, PreviewPlan, PublisherRegistry, DEFAULT_PUBLISHER};
use radar_spec::{Ingester, QuadrantOrder};

use super::{RadarInput, Report};

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub radar: RadarInput,

    /// Publisher for the radar data
    #[arg(short = 'P', long, default_value = DEFAULT_PUBLISHER)]
    pub publisher: String,

    /// Output path for the radar data
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Publisher settings (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stage a preview and print how to serve it
    #[arg(short, long)]
    pub run: bool,

    /// Directory the preview is staged under
    #[arg(long, default_value = ".")]
    pub staging_dir: PathBuf,

    /// Keep the staged preview files instead of removing them on exit
    #[arg(long, requires = "run")]
    pub keep_staging: bool,
}

pub fn execute(args: RenderArgs, quiet: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => PublishConfig::load(path)
            .with_context(|| format!("Failed to load publish config {:?}", path))?,
        None => PublishConfig::default(),
    };

    let registry = PublisherRegistry::standard(&config);
    let publisher = registry.get_required(&args.publisher)?;

    let ingestion = Ingester::new(&args.radar.input)
        .ingest()
        .with_context(|| format!("Failed to load radar from {:?}", args.radar.input))?;
    let radar = &ingestion.radar;

    let report = Report::new(quiet);
    let root = ingestion
        .root
        .canonicalize()
        .unwrap_or_else(|_| ingestion.root.clone());
    report.line("Radar Path", root.display());
    report.line("Rings", join(radar.rings_outward().iter().map(|r| &r.name)));
    report.line(
        "Quadrants",
        join(radar.quadrants(QuadrantOrder::CLOCKWISE).iter().map(|q| &q.name)),
    );
    report.line("Processed", format!("{:2} blips", ingestion.processed));

    let mut publication = Publication::new(radar, publisher);

    if let Some(output) = &args.output {
        publication
            .write(output)
            .with_context(|| format!("Failed to write {:?}", output))?;
        report.line("Output", output.display());
    }

    if args.run {
        let staged = publication
            .preview(&args.staging_dir)
            .context("Failed to stage preview")?;
        report.line("Radar URL", &staged.plan().url);
        print_plan(&report, staged.plan());

        if args.keep_staging {
            if let Some(path) = publication.keep_preview() {
                info!("Keeping staged preview in {:?}", path);
                report.line("Staged", path.display());
            }
        } else {
            publication.cleanup()?;
            info!("Removed staged preview files");
        }
    }

    Ok(())
}

fn print_plan(report: &Report, plan: &PreviewPlan) {
    report.line("Image", plan.full_image());
    if let Some(repo) = &plan.clone_repo {
        report.line("Clone", repo);
    }
    for port in &plan.ports {
        report.line("Port", format!("{} -> {}", port.host, port.container));
    }
    for mount in &plan.mounts {
        report.line("Mount", format!("{} -> {}", mount.source.display(), mount.target));
    }
    if let Some(workdir) = &plan.workdir {
        report.line("Workdir", workdir);
    }
    if !plan.command.is_empty() {
        report.line("Command", plan.command.join(" "));
    }
    for (key, value) in &plan.env {
        report.line("Env", format!("{}={}", key, value));
    }
    if let Some(marker) = &plan.ready_marker {
        report.line("Ready when", marker);
    }
}

fn join<'a>(names: impl Iterator<Item = &'a String>) -> String {
    names.map(String::as_str).collect::<Vec<_>>().join(", ")
}
