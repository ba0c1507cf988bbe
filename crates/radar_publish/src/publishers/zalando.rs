//! Zalando tech radar publisher.

use std::fs;
use std::path::Path;

use serde::Serialize;

use radar_spec::{QuadrantOrder, Radar};

use crate::config::ZalandoConfig;
use crate::error::{PublishError, PublishResult};
use crate::preview::{MountConfig, PreviewPlan};
use crate::publisher::Publisher;

const IMAGE: &str = "gcriocloudbuilders/yarn";
const GIT_URL: &str = "https://github.com/zalando/tech-radar.git";
const READY_MARKER: &str = "Watching files...";

/// Ring colors, innermost first.
pub const RING_COLORS: [&str; 4] = ["#5ba300", "#009eb0", "#c7ba00", "#e09b96"];

/// Quadrant 0 of the visualizer is bottom right, then it goes clockwise.
pub const QUADRANT_ORDER: QuadrantOrder = QuadrantOrder::BR_BL_TL_TR;

#[derive(Debug, Serialize)]
struct Document<'a> {
    repo_url: &'a str,
    title: &'a str,
    date: &'a str,
    quadrants: Vec<QuadrantEntry<'a>>,
    rings: Vec<RingEntry>,
    entries: Vec<Entry<'a>>,
}

#[derive(Debug, Serialize)]
struct QuadrantEntry<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct RingEntry {
    name: String,
    color: &'static str,
}

#[derive(Debug, Serialize)]
struct Entry<'a> {
    quadrant: usize,
    ring: usize,
    label: &'a str,
    active: bool,
    moved: bool,
}

/// Emits the `config.json` consumed by Zalando's `radar_visualization`.
///
/// The radar date is fixed when the publisher is built, so every output of
/// one publisher carries the same date.
#[derive(Debug, Clone)]
pub struct ZalandoPublisher {
    config: ZalandoConfig,
    date: String,
}

impl Default for ZalandoPublisher {
    fn default() -> Self {
        Self::new(ZalandoConfig::default())
    }
}

impl ZalandoPublisher {
    pub fn new(config: ZalandoConfig) -> Self {
        let date = config.resolved_date();
        Self { config, date }
    }

    /// Date written into every output.
    pub fn date(&self) -> &str {
        &self.date
    }

    fn index_html(&self) -> String {
        INDEX_HTML.replace("{{title}}", &self.config.title)
    }
}

impl Publisher for ZalandoPublisher {
    fn id(&self) -> &'static str {
        "zalando"
    }

    fn description(&self) -> &'static str {
        "Zalando tech-radar config.json"
    }

    fn make_output(&self, radar: &Radar) -> PublishResult<String> {
        let entries = radar
            .blips()
            .iter()
            .map(|blip| {
                let quadrant = radar
                    .quadrant_index(&blip.quadrant, QUADRANT_ORDER)
                    .ok_or_else(|| PublishError::UnknownQuadrant {
                        blip: blip.name.clone(),
                        quadrant: blip.quadrant.clone(),
                    })?;
                let ring = radar
                    .ring_index(&blip.ring)
                    .ok_or_else(|| PublishError::UnknownRing {
                        blip: blip.name.clone(),
                        ring: blip.ring.clone(),
                    })?;
                Ok(Entry {
                    quadrant,
                    ring,
                    label: &blip.name,
                    active: true,
                    moved: blip.is_moved(),
                })
            })
            .collect::<PublishResult<Vec<_>>>()?;

        let document = Document {
            repo_url: &self.config.repo_url,
            title: &self.config.title,
            date: &self.date,
            quadrants: radar
                .quadrants(QUADRANT_ORDER)
                .iter()
                .map(|q| QuadrantEntry { name: &q.name })
                .collect(),
            rings: radar
                .rings_outward()
                .iter()
                .zip(RING_COLORS)
                .map(|(r, color)| RingEntry {
                    name: r.name.to_uppercase(),
                    color,
                })
                .collect(),
            entries,
        };

        Ok(serde_json::to_string(&document)?)
    }

    fn url(&self) -> Option<String> {
        Some(format!("http://localhost:{}/", self.config.port))
    }

    fn stage_preview(
        &self,
        _radar: &Radar,
        output: &str,
        staging: &Path,
    ) -> PublishResult<Option<PreviewPlan>> {
        let docs = staging.join("docs");
        fs::create_dir_all(&docs).map_err(|e| PublishError::io(&docs, e))?;

        let config = docs.join("config.json");
        fs::write(&config, output).map_err(|e| PublishError::io(&config, e))?;
        let index = docs.join("index.html");
        fs::write(&index, self.index_html()).map_err(|e| PublishError::io(&index, e))?;

        // The staged docs overlay a shallow clone of the upstream repo,
        // which is served by `yarn start` after a plain `yarn` install.
        let plan = PreviewPlan::new(IMAGE, self.url().unwrap_or_default())
            .clone_repo(GIT_URL)
            .workdir("/app")
            .mount(MountConfig::new(staging, "/app"))
            .port(self.config.port, 3000)
            .cmd("start")
            .cmd("--no-open")
            .ready_marker(READY_MARKER);

        Ok(Some(plan))
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">

<head>
<meta http-equiv="Content-type" content="text/html; charset=utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{{title}}</title>
<link rel="shortcut icon" href="https://www.zalando.de/favicon.ico">

<script src="https://d3js.org/d3.v4.min.js"></script>
<script src="radar.js"></script>

<link rel="stylesheet" href="radar.css">
</head>

<body>

<svg id="radar"></svg>

<script>
fetch('./config.json').then(function(response) {
  return response.json();
}).then(function(data) {
  radar_visualization(data);
}).catch(function(err) {
  console.log('Error loading config.json', err);
});
</script>

</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use radar_spec::{Blip, Quadrant, QuadrantPosition, Ring, RingPosition};
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn radar() -> Radar {
        let rings: BTreeMap<_, _> = [
            (RingPosition::Inner, Ring::new("adopt", "Adopt")),
            (RingPosition::MidInner, Ring::new("trial", "Trial")),
            (RingPosition::MidOuter, Ring::new("assess", "Assess")),
            (RingPosition::Outer, Ring::new("hold", "Hold")),
        ]
        .into_iter()
        .collect();
        let quadrants: BTreeMap<_, _> = [
            (QuadrantPosition::TopLeft, Quadrant::new("techniques", "Techniques")),
            (QuadrantPosition::TopRight, Quadrant::new("tools", "Tools")),
            (QuadrantPosition::BottomLeft, Quadrant::new("platforms", "Platforms")),
            (QuadrantPosition::BottomRight, Quadrant::new("languages", "Languages")),
        ]
        .into_iter()
        .collect();

        let mut radar = Radar::new(rings, quadrants).unwrap();
        radar.add_blip(
            Blip::new("Rust", "Trial", "Languages").with_previous_ring(Some("Trial".to_string())),
        );
        radar.add_blip(
            Blip::new("Jenkins", "Hold", "Tools").with_previous_ring(Some("Assess".to_string())),
        );
        radar.add_blip(Blip::new("Kubernetes", "Adopt", "Platforms"));
        radar
    }

    fn publisher() -> ZalandoPublisher {
        ZalandoPublisher::new(ZalandoConfig {
            date: Some("2025.01".to_string()),
            ..ZalandoConfig::default()
        })
    }

    #[test]
    fn test_output_document() {
        let output = publisher().make_output(&radar()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["title"], "Zalando Tech Radar");
        assert_eq!(value["date"], "2025.01");
        assert_eq!(
            value["quadrants"],
            json!([
                {"name": "Languages"},
                {"name": "Platforms"},
                {"name": "Techniques"},
                {"name": "Tools"}
            ])
        );
        assert_eq!(
            value["rings"],
            json!([
                {"name": "ADOPT", "color": "#5ba300"},
                {"name": "TRIAL", "color": "#009eb0"},
                {"name": "ASSESS", "color": "#c7ba00"},
                {"name": "HOLD", "color": "#e09b96"}
            ])
        );
        assert_eq!(
            value["entries"],
            json!([
                {"quadrant": 0, "ring": 1, "label": "Rust", "active": true, "moved": false},
                {"quadrant": 3, "ring": 3, "label": "Jenkins", "active": true, "moved": true},
                {"quadrant": 1, "ring": 0, "label": "Kubernetes", "active": true, "moved": true}
            ])
        );
    }

    #[test]
    fn test_default_date_is_fixed_per_publisher() {
        let publisher = ZalandoPublisher::default();
        let radar = radar();

        let first = publisher.make_output(&radar).unwrap();
        let second = publisher.make_output(&radar).unwrap();
        assert_eq!(first, second);

        let value: Value = serde_json::from_str(&first).unwrap();
        assert_eq!(value["date"], publisher.date());

        let cloned = publisher.clone();
        assert_eq!(cloned.make_output(&radar).unwrap(), first);
    }

    #[test]
    fn test_key_order_is_stable() {
        let output = publisher().make_output(&radar()).unwrap();
        assert!(output.starts_with(
            r#"{"repo_url":"https://github.com/zalando/tech-radar","title":"Zalando Tech Radar","date":"2025.01","quadrants":"#
        ));
    }

    #[test]
    fn test_unknown_ring_fails() {
        let mut radar = radar();
        radar.add_blip(Blip::new("Ghost", "Nowhere", "Tools"));

        let err = publisher().make_output(&radar).unwrap_err();
        assert!(matches!(err, PublishError::UnknownRing { ref ring, .. } if ring == "Nowhere"));
    }

    #[test]
    fn test_stage_preview_writes_docs() {
        let radar = radar();
        let publisher = publisher();
        let output = publisher.make_output(&radar).unwrap();
        let temp = tempdir().unwrap();

        let plan = publisher
            .stage_preview(&radar, &output, temp.path())
            .unwrap()
            .unwrap();

        let docs = temp.path().join("docs");
        assert_eq!(fs::read_to_string(docs.join("config.json")).unwrap(), output);
        let html = fs::read_to_string(docs.join("index.html")).unwrap();
        assert!(html.contains("<title>Zalando Tech Radar</title>"));

        assert_eq!(plan.command, vec!["start", "--no-open"]);
        assert_eq!(plan.clone_repo.as_deref(), Some(GIT_URL));
        assert_eq!(plan.ports[0].container, 3000);
        assert_eq!(plan.url, "http://localhost:8080/");
    }
}
