//! # radar_publish
//!
//! Publishers turn a loaded [`radar_spec::Radar`] into the input format of an
//! external radar visualizer.
//!
//! - **twbyor**: Thoughtworks "build your own radar" JSON
//! - **zalando**: Zalando tech-radar `config.json`
//!
//! ## Example
//!
//! ```rust,no_run
//! use radar_publish::{PublishConfig, Publication, PublisherRegistry};
//! use radar_spec::Ingester;
//!
//! let ingestion = Ingester::new("./radar").ingest().unwrap();
//! let registry = PublisherRegistry::standard(&PublishConfig::default());
//! let publisher = registry.get_required("zalando").unwrap();
//!
//! let publication = Publication::new(&ingestion.radar, publisher);
//! publication.write("config.json").unwrap();
//! ```

pub mod config;
pub mod error;
pub mod preview;
pub mod publisher;
pub mod publishers;
pub mod registry;

pub use config::{PublishConfig, TwByorConfig, ZalandoConfig};
pub use error::{PublishError, PublishResult};
pub use preview::{MountConfig, PortBinding, PreviewPlan};
pub use publisher::{Publication, Publisher, StagedPreview};
pub use publishers::{TwByorPublisher, ZalandoPublisher};
pub use registry::{PublisherRegistry, DEFAULT_PUBLISHER};
