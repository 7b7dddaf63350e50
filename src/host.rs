use std::fmt;

use crate::error::Result;
use crate::math::{transform_point, Matrix4, Point3};
use crate::operations::Scope;

/// Interaction mode of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Whole-object manipulation.
    Object,
    /// Per-vertex selection and editing.
    Edit,
}

impl Mode {
    /// Human-readable mode name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Mode::Object => "object",
            Mode::Edit => "edit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of data an object carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Mesh,
    Empty,
}

/// Severity of a user-visible report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Error,
}

/// A vertex as seen in a mesh snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotVertex {
    /// Position in the object's local space.
    pub point: Point3,
    /// Whether the vertex is part of the current selection.
    pub selected: bool,
}

/// Read-only copy of an object's mesh at a point in time.
#[derive(Debug, Clone)]
pub struct MeshSnapshot {
    /// Vertices in local space.
    pub vertices: Vec<SnapshotVertex>,
    /// Local-to-world transform of the owning object.
    pub local_to_world: Matrix4,
}

impl MeshSnapshot {
    /// Iterates over the world-space positions of the selected vertices.
    pub fn selected_world_points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.vertices
            .iter()
            .filter(|v| v.selected)
            .map(|v| transform_point(&self.local_to_world, &v.point))
    }
}

/// The editor application that owns objects, meshes, and the 3D cursor.
///
/// The origin-relocation operations only talk to the editor through this
/// trait. [`crate::Scene`] is an in-memory implementation.
pub trait Host {
    /// Handle identifying an object inside the host.
    type ObjectId: Copy + Eq + fmt::Debug;

    /// Returns the objects a command should consider for `scope`.
    ///
    /// For [`Scope::SelectedEditable`] this is every selected mesh object
    /// currently in edit mode; for [`Scope::ActiveObject`] it is the active
    /// object, if any.
    fn candidate_objects(&self, scope: Scope) -> Vec<Self::ObjectId>;

    /// Returns the active object, if any.
    fn active_object(&self) -> Option<Self::ObjectId>;

    /// Returns the kind of the object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist.
    fn object_kind(&self, id: Self::ObjectId) -> Result<ObjectKind>;

    /// Returns a display name for the object, used in messages.
    fn object_name(&self, id: Self::ObjectId) -> String;

    /// Returns the current mode of the object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist.
    fn mode(&self, id: Self::ObjectId) -> Result<Mode>;

    /// Switches the object into `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or cannot enter `mode`.
    fn set_mode(&mut self, id: Self::ObjectId, mode: Mode) -> Result<()>;

    /// Brings the committed mesh up to date with the live edit session.
    ///
    /// The default toggles the object out of edit mode and back, which
    /// flushes pending edits in hosts that commit on mode exit.
    ///
    /// # Errors
    ///
    /// Returns an error if either mode switch fails.
    fn sync_edit_mesh(&mut self, id: Self::ObjectId) -> Result<()> {
        self.set_mode(id, Mode::Object)?;
        self.set_mode(id, Mode::Edit)
    }

    /// Reads the committed mesh of the object.
    ///
    /// Only reflects edits made up to the last [`Host::sync_edit_mesh`].
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or is not a mesh.
    fn mesh_snapshot(&self, id: Self::ObjectId) -> Result<MeshSnapshot>;

    /// Returns the 3D cursor location.
    fn cursor(&self) -> Point3;

    /// Moves the 3D cursor.
    fn set_cursor(&mut self, location: Point3);

    /// Moves the object's origin to the 3D cursor without moving its geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is missing, locked, not in object mode,
    /// has no geometry, or its transform cannot be inverted.
    fn set_origin_to_cursor(&mut self, id: Self::ObjectId) -> Result<()>;

    /// Surfaces a message to the user without aborting.
    fn report(&mut self, level: ReportLevel, message: &str);
}
