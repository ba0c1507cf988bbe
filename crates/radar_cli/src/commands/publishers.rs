//! Publishers command - List registered publishers.

use anyhow::Result;

use radar_publish::{PublishConfig, PublisherRegistry, DEFAULT_PUBLISHER};

pub fn execute() -> Result<()> {
    let registry = PublisherRegistry::standard(&PublishConfig::default());

    for publisher in registry.list() {
        let marker = if publisher.id() == DEFAULT_PUBLISHER {
            " (default)"
        } else {
            ""
        };
        println!("{:<10} {}{}", publisher.id(), publisher.description(), marker);
    }

    Ok(())
}
