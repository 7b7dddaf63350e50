use tracing::{debug, info};

use crate::error::{Result, SelectionError};
use crate::host::{Host, Mode, ObjectKind, ReportLevel};
use crate::math::Point3;

use super::{Aggregation, Centroid, CollectSelection, MoveOriginParams, RelocateOrigin, Scope};

/// Outcome of an invoked command, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The origins were moved.
    Finished,
    /// Nothing changed; an error was reported.
    Cancelled,
}

/// The new origin given to one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginMove<Id> {
    pub object: Id,
    pub origin: Point3,
}

/// Result of a successful [`MoveOriginToSelection`] run.
#[derive(Debug, Clone)]
pub struct Relocated<Id> {
    pub moves: Vec<OriginMove<Id>>,
}

/// Moves the origin of edited mesh objects to the centroid of their
/// selected vertices.
///
/// Geometry stays where it is in world space, and the 3D cursor and every
/// object's mode are left as they were found.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOriginToSelection {
    params: MoveOriginParams,
}

impl MoveOriginToSelection {
    /// Command identifier.
    pub const ID: &'static str = "object.move_origin_to_selection";

    /// Command label shown in menus.
    pub const LABEL: &'static str = "Move Origin to Selection";

    /// Creates the command with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all parameters.
    #[must_use]
    pub fn with_params(mut self, params: MoveOriginParams) -> Self {
        self.params = params;
        self
    }

    /// Sets which objects are considered.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.params.scope = scope;
        self
    }

    /// Sets how selections of several objects are combined.
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.params.aggregation = aggregation;
        self
    }

    /// Current parameters.
    #[must_use]
    pub fn params(&self) -> MoveOriginParams {
        self.params
    }

    /// Whether the command can run: the active object must be a mesh in
    /// edit mode.
    pub fn poll<H: Host>(host: &H) -> bool {
        host.active_object().is_some_and(|id| {
            matches!(host.object_kind(id), Ok(ObjectKind::Mesh))
                && matches!(host.mode(id), Ok(Mode::Edit))
        })
    }

    /// Runs the command, reporting any failure to the host.
    pub fn invoke<H: Host>(&self, host: &mut H) -> CommandStatus {
        match self.execute(host) {
            Ok(relocated) => {
                let message = format!("Moved origin of {} object(s)", relocated.moves.len());
                host.report(ReportLevel::Info, &message);
                CommandStatus::Finished
            }
            Err(err) => {
                host.report(ReportLevel::Error, &err.to_string());
                CommandStatus::Cancelled
            }
        }
    }

    /// Runs the command and returns the new origins.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NotApplicable`] if [`Self::poll`] fails,
    /// [`SelectionError::NothingSelected`] if no vertex is selected, and any
    /// host error raised while relocating.
    pub fn execute<H: Host>(&self, host: &mut H) -> Result<Relocated<H::ObjectId>> {
        if !Self::poll(host) {
            return Err(SelectionError::NotApplicable(
                "Active object must be a mesh in edit mode".into(),
            )
            .into());
        }

        let groups = CollectSelection::new(self.params.scope).execute(host)?;
        if groups.is_empty() {
            return Err(SelectionError::NothingSelected.into());
        }

        let moves = match self.params.aggregation {
            Aggregation::Pooled => {
                let points: Vec<Point3> = groups
                    .iter()
                    .flat_map(|g| g.points.iter().copied())
                    .collect();
                let origin = Centroid::new(&points).execute()?;
                debug!(points = points.len(), ?origin, "pooled centroid");
                groups
                    .iter()
                    .map(|g| OriginMove {
                        object: g.object,
                        origin,
                    })
                    .collect::<Vec<_>>()
            }
            Aggregation::PerObject => groups
                .iter()
                .map(|g| {
                    Ok(OriginMove {
                        object: g.object,
                        origin: Centroid::new(&g.points).execute()?,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        };

        RelocateOrigin::new(moves.iter().map(|m| (m.object, m.origin)).collect()).execute(host)?;
        info!(objects = moves.len(), "moved origin to selection");

        Ok(Relocated { moves })
    }
}
