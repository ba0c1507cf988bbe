//! The publisher contract and memoized publications.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tracing::{debug, info};

use radar_spec::Radar;

use crate::error::{PublishError, PublishResult};
use crate::preview::PreviewPlan;

/// An output format for a radar.
///
/// Implementations map radar entities onto an external visualizer's input
/// schema. They must read rings and quadrants through the ordered views
/// (`rings_outward`, `quadrants(order)`) so indices match the visualizer's
/// conventions.
#[cfg_attr(test, mockall::automock)]
pub trait Publisher: Send + Sync {
    /// Stable identifier used to select the publisher.
    fn id(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Serialize the radar. Must be a pure function of `radar`.
    fn make_output(&self, radar: &Radar) -> PublishResult<String>;

    /// URL a running preview is served on, if the publisher supports previews.
    fn url(&self) -> Option<String> {
        None
    }

    /// Write the files a preview needs into `staging` and describe the
    /// container that would serve them. `None` means previews are unsupported.
    fn stage_preview(
        &self,
        _radar: &Radar,
        _output: &str,
        _staging: &Path,
    ) -> PublishResult<Option<PreviewPlan>> {
        Ok(None)
    }
}

/// Staged preview files and their plan. The directory is removed on drop.
#[derive(Debug)]
pub struct StagedPreview {
    dir: TempDir,
    plan: PreviewPlan,
}

impl StagedPreview {
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn plan(&self) -> &PreviewPlan {
        &self.plan
    }
}

/// A radar bound to one publisher.
///
/// The publisher's output is computed at most once per publication, no
/// matter how often it is requested or written.
pub struct Publication<'r> {
    radar: &'r Radar,
    publisher: Arc<dyn Publisher>,
    output: OnceCell<String>,
    staged: Option<StagedPreview>,
}

impl<'r> Publication<'r> {
    pub fn new(radar: &'r Radar, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            radar,
            publisher,
            output: OnceCell::new(),
            staged: None,
        }
    }

    pub fn id(&self) -> &'static str {
        self.publisher.id()
    }

    pub fn url(&self) -> Option<String> {
        self.publisher.url()
    }

    /// The memoized output.
    pub fn output(&self) -> PublishResult<&str> {
        if let Some(output) = self.output.get() {
            return Ok(output);
        }

        let output = self.publisher.make_output(self.radar)?;
        debug!(
            "Publisher {} produced {} bytes",
            self.publisher.id(),
            output.len()
        );
        Ok(self.output.get_or_init(|| output))
    }

    /// Write the output to `destination`.
    pub fn write(&self, destination: impl AsRef<Path>) -> PublishResult<()> {
        let destination = destination.as_ref();
        let output = self.output()?;
        fs::write(destination, output).map_err(|e| PublishError::io(destination, e))?;
        info!("Wrote {} output to {:?}", self.publisher.id(), destination);
        Ok(())
    }

    /// Stage a preview in a fresh directory under `base`.
    ///
    /// Staging happens once; later calls return the same plan until
    /// [`Publication::cleanup`] is called.
    pub fn preview(&mut self, base: impl AsRef<Path>) -> PublishResult<&StagedPreview> {
        if self.staged.is_none() {
            let staged = self.stage(base.as_ref())?;
            self.staged = Some(staged);
        }
        self.staged
            .as_ref()
            .ok_or_else(|| PublishError::PreviewUnsupported(self.publisher.id().to_string()))
    }

    fn stage(&self, base: &Path) -> PublishResult<StagedPreview> {
        let dir = tempfile::Builder::new()
            .prefix(".runradar-")
            .tempdir_in(base)
            .map_err(|e| PublishError::io(base, e))?;
        open_permissions(dir.path())?;

        let output = self.output()?;
        let plan = self
            .publisher
            .stage_preview(self.radar, output, dir.path())?
            .ok_or_else(|| PublishError::PreviewUnsupported(self.publisher.id().to_string()))?;

        info!(
            "Staged {} preview in {:?} ({})",
            self.publisher.id(),
            dir.path(),
            plan.full_image()
        );
        Ok(StagedPreview { dir, plan })
    }

    /// Detach the staged preview so its files outlive the publication.
    pub fn keep_preview(&mut self) -> Option<PathBuf> {
        self.staged.take().map(|staged| staged.dir.into_path())
    }

    /// Remove staged preview files, if any.
    pub fn cleanup(&mut self) -> PublishResult<()> {
        if let Some(staged) = self.staged.take() {
            let path = staged.dir.path().to_path_buf();
            debug!("Removing staged preview {:?}", path);
            staged.dir.close().map_err(|e| PublishError::io(path, e))?;
        }
        Ok(())
    }
}

/// Containers usually run as another user, so the staging directory must be
/// world-readable.
#[cfg(unix)]
fn open_permissions(path: &Path) -> PublishResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| PublishError::io(path, e))
}

#[cfg(not(unix))]
fn open_permissions(_path: &Path) -> PublishResult<()> {
    Ok(())
}
