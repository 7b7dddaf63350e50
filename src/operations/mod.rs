mod centroid;
mod collect;
mod move_origin;
mod relocate;

pub use centroid::Centroid;
pub use collect::{CollectSelection, SelectionGroup};
pub use move_origin::{CommandStatus, MoveOriginToSelection, OriginMove, Relocated};
pub use relocate::{HostStateGuard, RelocateOrigin};

/// Which objects a command gathers selected vertices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Only the active object.
    ActiveObject,
    /// Every selected mesh object currently in edit mode.
    #[default]
    SelectedEditable,
}

/// How selected vertices of several objects are reduced to origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// One centroid over every selected vertex of every object; all
    /// contributing objects share it.
    ///
    /// Only objects with at least one selected vertex move. Other objects
    /// in scope keep their origin.
    #[default]
    Pooled,
    /// One centroid per object, from that object's own selection.
    PerObject,
}

/// Parameters controlling [`MoveOriginToSelection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOriginParams {
    pub scope: Scope,
    pub aggregation: Aggregation,
}
