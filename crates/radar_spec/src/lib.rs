//! # radar_spec
//!
//! Loading and validation of directory-encoded technology radars.
//!
//! A radar root contains a spec file (`specs.yml` or `specs.yaml`) declaring
//! three or four rings and exactly four quadrants, plus one YAML file per
//! blip under `<quadrant.id>/<ring.id>/`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use radar_spec::{Ingester, QuadrantOrder};
//!
//! let ingestion = Ingester::new("./radar").ingest().unwrap();
//! let radar = &ingestion.radar;
//!
//! for ring in radar.rings_outward() {
//!     println!("ring: {}", ring.name);
//! }
//! for quadrant in radar.quadrants(QuadrantOrder::CLOCKWISE) {
//!     println!("quadrant: {}", quadrant.name);
//! }
//! println!("{} blips", ingestion.processed);
//! ```

pub mod error;
pub mod ingest;
pub mod models;
pub mod reader;

pub use error::{ErrorKind, RadarError, RadarResult};
pub use ingest::{Ingester, Ingestion};
pub use models::*;
pub use reader::SpecReader;
