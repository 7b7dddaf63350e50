use tracing::{debug, warn};

use crate::error::{Result, SelectionError};
use crate::host::{Host, Mode, ObjectKind};
use crate::math::Point3;

use super::Scope;

/// World-space positions of the selected vertices of one object.
#[derive(Debug, Clone)]
pub struct SelectionGroup<Id> {
    pub object: Id,
    pub points: Vec<Point3>,
}

/// Gathers selected vertices, in world space, from the objects in scope.
///
/// Each object's mesh is synced with its edit session before it is read,
/// so selection changes that have not been committed yet are included.
/// Objects without any selected vertex produce no group.
pub struct CollectSelection {
    scope: Scope,
}

impl CollectSelection {
    /// Creates a new `CollectSelection` operation.
    #[must_use]
    pub fn new(scope: Scope) -> Self {
        Self { scope }
    }

    /// Executes the collection.
    ///
    /// With [`Scope::SelectedEditable`] objects that are not meshes in edit
    /// mode are skipped. With [`Scope::ActiveObject`] such an object is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NotApplicable`] if the active object cannot
    /// be edited, or any host error raised while syncing or reading a mesh.
    pub fn execute<H: Host>(&self, host: &mut H) -> Result<Vec<SelectionGroup<H::ObjectId>>> {
        let mut groups = Vec::new();

        for id in host.candidate_objects(self.scope) {
            if !is_editable_mesh(host, id)? {
                match self.scope {
                    Scope::SelectedEditable => {
                        debug!(object = ?id, "skipping non-editable object");
                        continue;
                    }
                    Scope::ActiveObject => {
                        return Err(SelectionError::NotApplicable(format!(
                            "object '{}' is not a mesh in edit mode",
                            host.object_name(id)
                        ))
                        .into());
                    }
                }
            }

            if let Err(err) = host.sync_edit_mesh(id) {
                if let Err(restore) = host.set_mode(id, Mode::Edit) {
                    warn!(object = ?id, %restore, "failed to restore edit mode");
                }
                return Err(err);
            }
            let snapshot = host.mesh_snapshot(id)?;
            let points: Vec<Point3> = snapshot.selected_world_points().collect();
            debug!(object = ?id, selected = points.len(), "collected selection");

            if !points.is_empty() {
                groups.push(SelectionGroup { object: id, points });
            }
        }

        Ok(groups)
    }
}

fn is_editable_mesh<H: Host>(host: &H, id: H::ObjectId) -> Result<bool> {
    Ok(host.object_kind(id)? == ObjectKind::Mesh && host.mode(id)? == Mode::Edit)
}
