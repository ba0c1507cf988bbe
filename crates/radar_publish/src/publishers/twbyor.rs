//! Thoughtworks "build your own radar" publisher.

use std::fs;
use std::path::Path;

use serde::Serialize;

use radar_spec::{QuadrantOrder, Radar};

use crate::config::TwByorConfig;
use crate::error::{PublishError, PublishResult};
use crate::preview::{MountConfig, PreviewPlan};
use crate::publisher::Publisher;

const IMAGE: &str = "wwwthoughtworks/build-your-own-radar";
const OUTPUT_FILE: &str = "run-radar-run.json";
const FILES_MOUNT: &str = "/opt/build-your-own-radar/files";
const READY_MARKER: &str = "Starting nginx server...";

/// One row of the visualizer's JSON input.
#[derive(Debug, Serialize)]
struct Entry<'a> {
    name: &'a str,
    ring: &'a str,
    quadrant: &'a str,
    #[serde(rename = "isNew")]
    is_new: &'static str,
    description: &'a [String],
}

/// Emits the JSON list consumed by build-your-own-radar.
#[derive(Debug, Clone, Default)]
pub struct TwByorPublisher {
    config: TwByorConfig,
}

impl TwByorPublisher {
    pub fn new(config: TwByorConfig) -> Self {
        Self { config }
    }
}

impl Publisher for TwByorPublisher {
    fn id(&self) -> &'static str {
        "twbyor"
    }

    fn description(&self) -> &'static str {
        "Thoughtworks build-your-own-radar JSON"
    }

    fn make_output(&self, radar: &Radar) -> PublishResult<String> {
        let entries: Vec<_> = radar
            .blips()
            .iter()
            .map(|blip| Entry {
                name: &blip.name,
                ring: &blip.ring,
                quadrant: &blip.quadrant,
                is_new: if blip.is_new() { "TRUE" } else { "FALSE" },
                description: &blip.description,
            })
            .collect();

        Ok(serde_json::to_string(&entries)?)
    }

    fn url(&self) -> Option<String> {
        let port = self.config.port;
        Some(format!(
            "http://localhost:{port}/?documentId=http%3A%2F%2Flocalhost%3A{port}%2Ffiles%2F{OUTPUT_FILE}"
        ))
    }

    fn stage_preview(
        &self,
        radar: &Radar,
        output: &str,
        staging: &Path,
    ) -> PublishResult<Option<PreviewPlan>> {
        let path = staging.join(OUTPUT_FILE);
        fs::write(&path, output).map_err(|e| PublishError::io(&path, e))?;

        // The visualizer lays quadrants out column by column.
        let quadrants: Vec<_> = radar
            .quadrants(QuadrantOrder::TL_BL_TR_BR)
            .iter()
            .map(|q| q.name.as_str())
            .collect();
        let rings: Vec<_> = radar
            .rings_outward()
            .iter()
            .map(|r| r.name.as_str())
            .collect();

        let plan = PreviewPlan::new(IMAGE, self.url().unwrap_or_default())
            .port(self.config.port, 80)
            .env("SERVER_NAMES", "localhost 127.0.0.1")
            .env("QUADRANTS", serde_json::to_string(&quadrants)?)
            .env("RINGS", serde_json::to_string(&rings)?)
            .mount(MountConfig::new(staging, FILES_MOUNT))
            .ready_marker(READY_MARKER);

        Ok(Some(plan))
    }
}
