//! Per-step mesh snapshots.

use std::path::PathBuf;

use mesh_io::{MeshFormat, save_mesh};
use mesh_types::PlanarMesh;
use tracing::{debug, warn};

use crate::error::RelaxResult;

/// Receives the mesh before the first step (index 0) and after every step.
pub trait SnapshotHook {
    /// Record the mesh at `step`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be stored; the run aborts.
    fn record(&mut self, step: u32, mesh: &PlanarMesh) -> RelaxResult<()>;
}

impl<F> SnapshotHook for F
where
    F: FnMut(u32, &PlanarMesh) -> RelaxResult<()>,
{
    fn record(&mut self, step: u32, mesh: &PlanarMesh) -> RelaxResult<()> {
        self(step, mesh)
    }
}

/// Writes every snapshot to a file named from a template.
///
/// Each `{}` in the template is replaced by the step index; the extension
/// selects the format (`.obj` or `.ply`).
///
/// # Example
///
/// ```
/// use mesh_relax::FileSnapshots;
///
/// let snapshots = FileSnapshots::new("out/step_{}.ply");
/// assert_eq!(snapshots.path_for(3).to_str(), Some("out/step_3.ply"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshots {
    template: String,
}

impl FileSnapshots {
    /// Create a writer for `template`.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        if !template.contains("{}") {
            warn!(
                %template,
                "snapshot template has no {{}} placeholder, every step overwrites one file"
            );
        }
        if MeshFormat::from_path(&template).is_none() {
            warn!(%template, "snapshot template has no .obj or .ply extension");
        }
        Self { template }
    }

    /// File path for `step`.
    #[must_use]
    pub fn path_for(&self, step: u32) -> PathBuf {
        PathBuf::from(self.template.replace("{}", &step.to_string()))
    }
}

impl SnapshotHook for FileSnapshots {
    fn record(&mut self, step: u32, mesh: &PlanarMesh) -> RelaxResult<()> {
        let path = self.path_for(step);
        save_mesh(mesh, &path)?;
        debug!(step, path = %path.display(), "wrote snapshot");
        Ok(())
    }
}
