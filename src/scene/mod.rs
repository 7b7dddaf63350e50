pub mod object;

pub use object::{MeshData, ObjectData, ObjectId, VertexData};

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{RelocationError, SceneError};
use crate::host::{Host, MeshSnapshot, Mode, ObjectKind, ReportLevel, SnapshotVertex};
use crate::math::{transform_point, translation_of, Matrix4, Point3};
use crate::operations::Scope;

/// A message surfaced to the user through [`Host::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: ReportLevel,
    pub message: String,
}

/// In-memory editor scene.
///
/// Owns objects in an arena keyed by [`ObjectId`], plus the 3D cursor,
/// the active object, and the log of user reports.
#[derive(Debug)]
pub struct Scene {
    objects: SlotMap<ObjectId, ObjectData>,
    active: Option<ObjectId>,
    cursor: Point3,
    reports: Vec<Report>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: SlotMap::with_key(),
            active: None,
            cursor: Point3::origin(),
            reports: Vec::new(),
        }
    }
}

impl Scene {
    /// Creates a new, empty scene with the cursor at the world origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object and returns its ID.
    pub fn add_object(&mut self, data: ObjectData) -> ObjectId {
        self.objects.insert(data)
    }

    /// Returns a reference to the object data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn object(&self, id: ObjectId) -> Result<&ObjectData, SceneError> {
        self.objects
            .get(id)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the object data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut ObjectData, SceneError> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{id:?}")))
    }

    /// Makes `id` the active object and adds it to the object selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn set_active(&mut self, id: ObjectId) -> Result<(), SceneError> {
        self.object_mut(id)?.selected = true;
        self.active = Some(id);
        Ok(())
    }

    /// Adds or removes an object from the object selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn select(&mut self, id: ObjectId, selected: bool) -> Result<(), SceneError> {
        self.object_mut(id)?.selected = selected;
        Ok(())
    }

    /// Returns the edit buffer of an object in edit mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is missing or not being edited.
    pub fn edit_mesh_mut(&mut self, id: ObjectId) -> Result<&mut MeshData, SceneError> {
        let object = self.object_mut(id)?;
        let name = object.name.clone();
        object
            .edit_mesh
            .as_mut()
            .ok_or(SceneError::NotEditable(name))
    }

    /// Returns the object's origin in world space.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn origin(&self, id: ObjectId) -> Result<Point3, SceneError> {
        Ok(translation_of(&self.object(id)?.transform))
    }

    /// Returns the world-space positions of every vertex of the live mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn world_vertices(&self, id: ObjectId) -> Result<Vec<Point3>, SceneError> {
        let object = self.object(id)?;
        Ok(object
            .live_mesh()
            .map(|mesh| {
                mesh.vertices
                    .iter()
                    .map(|v| transform_point(&object.transform, &v.point))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Returns every report issued so far, oldest first.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    fn is_editable_selection(object: &ObjectData) -> bool {
        object.selected && object.kind == ObjectKind::Mesh && object.mode == Mode::Edit
    }
}

impl Host for Scene {
    type ObjectId = ObjectId;

    fn candidate_objects(&self, scope: Scope) -> Vec<ObjectId> {
        match scope {
            Scope::ActiveObject => self.active.into_iter().collect(),
            Scope::SelectedEditable => self
                .objects
                .iter()
                .filter(|(_, object)| Self::is_editable_selection(object))
                .map(|(id, _)| id)
                .collect(),
        }
    }

    fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    fn object_kind(&self, id: ObjectId) -> crate::Result<ObjectKind> {
        Ok(self.object(id)?.kind)
    }

    fn object_name(&self, id: ObjectId) -> String {
        self.objects
            .get(id)
            .map_or_else(|| format!("{id:?}"), |object| object.name.clone())
    }

    fn mode(&self, id: ObjectId) -> crate::Result<Mode> {
        Ok(self.object(id)?.mode)
    }

    fn set_mode(&mut self, id: ObjectId, mode: Mode) -> crate::Result<()> {
        let object = self.object_mut(id)?;
        if object.mode == mode {
            return Ok(());
        }
        match mode {
            Mode::Edit => {
                if object.kind != ObjectKind::Mesh {
                    return Err(SceneError::NotEditable(object.name.clone()).into());
                }
                object.edit_mesh = object.mesh.clone();
            }
            Mode::Object => {
                if let Some(edited) = object.edit_mesh.take() {
                    object.mesh = Some(edited);
                }
            }
        }
        debug!(object = %object.name, from = %object.mode, to = %mode, "mode change");
        object.mode = mode;
        Ok(())
    }

    fn mesh_snapshot(&self, id: ObjectId) -> crate::Result<MeshSnapshot> {
        let object = self.object(id)?;
        if object.kind != ObjectKind::Mesh {
            return Err(SceneError::NotAMesh(object.name.clone()).into());
        }
        let vertices = object
            .mesh
            .iter()
            .flat_map(|mesh| mesh.vertices.iter())
            .map(|v| SnapshotVertex {
                point: v.point,
                selected: v.selected,
            })
            .collect();
        Ok(MeshSnapshot {
            vertices,
            local_to_world: object.transform,
        })
    }

    fn cursor(&self) -> Point3 {
        self.cursor
    }

    fn set_cursor(&mut self, location: Point3) {
        self.cursor = location;
    }

    fn set_origin_to_cursor(&mut self, id: ObjectId) -> crate::Result<()> {
        let cursor = self.cursor;
        let object = self.object_mut(id)?;
        if object.locked {
            return Err(RelocationError::Locked(object.name.clone()).into());
        }
        if object.mode != Mode::Object {
            return Err(RelocationError::WrongMode {
                object: object.name.clone(),
                required: Mode::Object.name(),
            }
            .into());
        }
        let Some(inverse) = object.transform.try_inverse() else {
            return Err(RelocationError::SingularTransform(object.name.clone()).into());
        };
        let Some(mesh) = object.mesh.as_mut().filter(|m| !m.vertices.is_empty()) else {
            return Err(RelocationError::NoGeometry(object.name.clone()).into());
        };

        // Shift local coordinates by the new origin and compensate in the
        // transform so world positions stay put.
        let offset = transform_point(&inverse, &cursor).coords;
        for v in &mut mesh.vertices {
            v.point -= offset;
        }
        object.transform *= Matrix4::new_translation(&offset);
        debug!(object = %object.name, origin = ?cursor, "origin moved");
        Ok(())
    }

    fn report(&mut self, level: ReportLevel, message: &str) {
        self.reports.push(Report {
            level,
            message: message.to_owned(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ReoriginError;
    use crate::math::Vector3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn triangle(scene: &mut Scene, transform: Matrix4) -> ObjectId {
        let mesh = MeshData::new(vec![
            VertexData::new(p(0.0, 0.0, 0.0)),
            VertexData::new(p(1.0, 0.0, 0.0)),
            VertexData::new(p(0.0, 1.0, 0.0)),
        ]);
        scene.add_object(ObjectData::mesh("Triangle", transform, mesh))
    }

    #[test]
    fn edits_are_invisible_until_committed() {
        let mut scene = Scene::new();
        let id = triangle(&mut scene, Matrix4::identity());
        scene.set_mode(id, Mode::Edit).unwrap();
        scene.edit_mesh_mut(id).unwrap().vertices[1].selected = true;

        let stale = scene.mesh_snapshot(id).unwrap();
        assert_eq!(stale.selected_world_points().count(), 0);

        scene.sync_edit_mesh(id).unwrap();
        let fresh = scene.mesh_snapshot(id).unwrap();
        assert_eq!(fresh.selected_world_points().count(), 1);
        assert_eq!(scene.mode(id).unwrap(), Mode::Edit);
    }

    #[test]
    fn origin_change_keeps_world_geometry() {
        let mut scene = Scene::new();
        let transform = Matrix4::new_translation(&Vector3::new(3.0, -1.0, 2.0))
            * Matrix4::new_rotation(Vector3::new(0.0, 0.0, 0.7))
            * Matrix4::new_scaling(1.5);
        let id = triangle(&mut scene, transform);
        let before = scene.world_vertices(id).unwrap();

        scene.set_cursor(p(10.0, 4.0, -2.0));
        scene.set_origin_to_cursor(id).unwrap();

        let origin = scene.origin(id).unwrap();
        assert_relative_eq!(origin, p(10.0, 4.0, -2.0), epsilon = 1e-9);
        let after = scene.world_vertices(id).unwrap();
        for (a, b) in before.iter().zip(&after) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn origin_change_rejects_locked_and_editing_objects() {
        let mut scene = Scene::new();
        let id = triangle(&mut scene, Matrix4::identity());

        scene.set_mode(id, Mode::Edit).unwrap();
        assert!(matches!(
            scene.set_origin_to_cursor(id),
            Err(ReoriginError::Relocation(RelocationError::WrongMode { .. }))
        ));

        scene.set_mode(id, Mode::Object).unwrap();
        scene.object_mut(id).unwrap().locked = true;
        assert!(matches!(
            scene.set_origin_to_cursor(id),
            Err(ReoriginError::Relocation(RelocationError::Locked(_)))
        ));
    }

    #[test]
    fn origin_change_rejects_empty_geometry() {
        let mut scene = Scene::new();
        let id = scene.add_object(ObjectData::mesh(
            "Hollow",
            Matrix4::identity(),
            MeshData::default(),
        ));
        assert!(matches!(
            scene.set_origin_to_cursor(id),
            Err(ReoriginError::Relocation(RelocationError::NoGeometry(_)))
        ));
    }

    #[test]
    fn empties_cannot_be_edited() {
        let mut scene = Scene::new();
        let id = scene.add_object(ObjectData::empty("Empty", Matrix4::identity()));
        assert!(scene.set_mode(id, Mode::Edit).is_err());
        assert!(matches!(
            scene.mesh_snapshot(id),
            Err(ReoriginError::Scene(SceneError::NotAMesh(_)))
        ));
    }

    #[test]
    fn selected_editable_candidates() {
        let mut scene = Scene::new();
        let a = triangle(&mut scene, Matrix4::identity());
        let b = triangle(&mut scene, Matrix4::identity());
        let c = triangle(&mut scene, Matrix4::identity());
        scene.select(a, true).unwrap();
        scene.select(b, true).unwrap();
        scene.set_mode(a, Mode::Edit).unwrap();
        scene.set_mode(c, Mode::Edit).unwrap();

        assert_eq!(scene.candidate_objects(Scope::SelectedEditable), vec![a]);
        assert!(scene.candidate_objects(Scope::ActiveObject).is_empty());
        scene.set_active(b).unwrap();
        assert_eq!(scene.candidate_objects(Scope::ActiveObject), vec![b]);
    }
}
