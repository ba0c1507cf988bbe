//! Inspect command - Show what a radar directory contains.

use anyhow::{Context, Result};
use clap::Args;

use radar_spec::{Ingester, QuadrantOrder};

use super::{RadarInput, Report};

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub radar: RadarInput,
}

pub fn execute(args: InspectArgs, quiet: bool) -> Result<()> {
    let ingestion = Ingester::new(&args.radar.input)
        .ingest()
        .with_context(|| format!("Failed to load radar from {:?}", args.radar.input))?;
    let radar = &ingestion.radar;

    let report = Report::new(quiet);
    for ring in radar.rings_outward() {
        report.line("Ring", format!("{} ({})", ring.name, ring.id));
    }
    for quadrant in radar.quadrants(QuadrantOrder::CLOCKWISE) {
        report.line("Quadrant", format!("{} ({})", quadrant.name, quadrant.id));
    }
    report.line("Processed", format!("{:2} blips", ingestion.processed));

    for blip in radar.blips() {
        report.line("Blip", blip);
    }

    Ok(())
}
