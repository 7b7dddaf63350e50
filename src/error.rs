use thiserror::Error;

/// Top-level error type for origin relocation.
#[derive(Debug, Error)]
pub enum ReoriginError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Relocation(#[from] RelocationError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors raised while gathering the vertex selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("No vertex, edge or face selected")]
    NothingSelected,

    #[error("{0}")]
    NotApplicable(String),
}

/// Errors raised by the set-origin primitive.
#[derive(Debug, Error)]
pub enum RelocationError {
    #[error("object '{0}' is locked")]
    Locked(String),

    #[error("object '{0}' has no geometry")]
    NoGeometry(String),

    #[error("object '{object}' must be in {required} mode")]
    WrongMode {
        object: String,
        required: &'static str,
    },

    #[error("object '{0}' has a singular transform")]
    SingularTransform(String),
}

/// Errors related to host object lookup.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("object '{0}' is not a mesh")]
    NotAMesh(String),

    #[error("object '{0}' cannot enter edit mode")]
    NotEditable(String),
}

/// Convenience type alias for results using [`ReoriginError`].
pub type Result<T> = std::result::Result<T, ReoriginError>;
