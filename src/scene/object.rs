use crate::host::{Mode, ObjectKind};
use crate::math::{Matrix4, Point3};

slotmap::new_key_type! {
    /// Unique identifier for an object in the scene.
    pub struct ObjectId;
}

/// A mesh vertex in the owning object's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexData {
    /// The local position of the vertex.
    pub point: Point3,
    /// Whether the vertex is selected.
    pub selected: bool,
}

impl VertexData {
    /// Creates an unselected vertex at the given point.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            selected: false,
        }
    }

    /// Creates a selected vertex at the given point.
    #[must_use]
    pub fn selected(point: Point3) -> Self {
        Self {
            point,
            selected: true,
        }
    }
}

/// Vertex storage of a mesh object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<VertexData>,
}

impl MeshData {
    /// Creates a mesh from vertices.
    #[must_use]
    pub fn new(vertices: Vec<VertexData>) -> Self {
        Self { vertices }
    }

    /// Selects or deselects every vertex.
    pub fn select_all(&mut self, selected: bool) {
        for v in &mut self.vertices {
            v.selected = selected;
        }
    }
}

/// Data associated with a scene object.
///
/// Mesh edits made while the object is in edit mode land in a separate
/// edit buffer and are only committed to [`ObjectData::mesh`] when the
/// object leaves edit mode.
#[derive(Debug, Clone)]
pub struct ObjectData {
    /// Display name.
    pub name: String,
    /// What the object carries.
    pub kind: ObjectKind,
    /// Whether the object is part of the object selection.
    pub selected: bool,
    /// Locked objects refuse origin changes.
    pub locked: bool,
    /// Local-to-world transform. Its translation is the origin.
    pub transform: Matrix4,
    /// Committed mesh data.
    pub mesh: Option<MeshData>,
    pub(crate) mode: Mode,
    pub(crate) edit_mesh: Option<MeshData>,
}

impl ObjectData {
    /// Creates a mesh object in object mode.
    #[must_use]
    pub fn mesh(name: impl Into<String>, transform: Matrix4, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            selected: false,
            locked: false,
            transform,
            mesh: Some(mesh),
            mode: Mode::Object,
            edit_mesh: None,
        }
    }

    /// Creates an object without geometry.
    #[must_use]
    pub fn empty(name: impl Into<String>, transform: Matrix4) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Empty,
            selected: false,
            locked: false,
            transform,
            mesh: None,
            mode: Mode::Object,
            edit_mesh: None,
        }
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The mesh as currently seen by the user: the edit buffer while
    /// editing, otherwise the committed mesh.
    #[must_use]
    pub fn live_mesh(&self) -> Option<&MeshData> {
        self.edit_mesh.as_ref().or(self.mesh.as_ref())
    }
}
