use thiserror::Error;

/// Recoverable conditions reported by the overlay controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    /// An entity with this id is still registered (possibly fading out).
    #[error("id {0} is already registered")]
    DuplicateId(String),
    /// Nothing is registered under this id.
    #[error("no entity registered under id {0}")]
    NotFound(String),
    #[error("coordinate out of range: lat={latitude}, lon={longitude}")]
    InvalidCoordinate { latitude: f32, longitude: f32 },
}
