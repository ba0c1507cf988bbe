//! Preview plans.
//!
//! A preview plan describes the container a visualizer preview would run:
//! image, ports, environment and mounts of the staged output. Nothing here
//! starts a container; the plan is handed to whatever orchestrates previews.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host directory mounted into the preview container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountConfig {
    /// Host path to mount
    pub source: PathBuf,
    /// Container path to mount to
    pub target: String,
}

impl MountConfig {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Host to container port mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBinding {
    pub host: u16,
    pub container: u16,
}

/// Everything needed to serve a staged radar in a visualizer container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewPlan {
    pub image: String,
    pub tag: String,
    pub command: Vec<String>,
    pub workdir: Option<String>,
    pub env: BTreeMap<String, String>,
    pub mounts: Vec<MountConfig>,
    pub ports: Vec<PortBinding>,
    /// Git repository to clone before the staged files are overlaid.
    pub clone_repo: Option<String>,
    /// Log line signalling that the preview is ready to browse.
    pub ready_marker: Option<String>,
    pub url: String,
}

impl PreviewPlan {
    pub fn new(image: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            tag: "latest".to_string(),
            command: Vec::new(),
            workdir: None,
            env: BTreeMap::new(),
            mounts: Vec::new(),
            ports: Vec::new(),
            clone_repo: None,
            ready_marker: None,
            url: url.into(),
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn cmd(mut self, cmd: impl Into<String>) -> Self {
        self.command.push(cmd.into());
        self
    }

    pub fn workdir(mut self, dir: impl Into<String>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn mount(mut self, mount: MountConfig) -> Self {
        self.mounts.push(mount);
        self
    }

    pub fn port(mut self, host: u16, container: u16) -> Self {
        self.ports.push(PortBinding { host, container });
        self
    }

    pub fn clone_repo(mut self, url: impl Into<String>) -> Self {
        self.clone_repo = Some(url.into());
        self
    }

    pub fn ready_marker(mut self, marker: impl Into<String>) -> Self {
        self.ready_marker = Some(marker.into());
        self
    }

    /// Get the full image name with tag.
    pub fn full_image(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }
}
