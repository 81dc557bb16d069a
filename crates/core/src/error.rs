use thiserror::Error;

use crate::types::EntityKind;

/// Describes why a floor could not be generated.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The catalog has no entry for a requested entity kind.
    #[error("no catalog entry for entity kind {0:?}")]
    UnknownEntity(EntityKind),
    /// External catalog or configuration data could not be parsed.
    #[error("malformed catalog or config data: {0}")]
    MalformedData(#[from] serde_json::Error),
    /// External catalog data lists the same kind more than once.
    #[error("catalog lists entity kind {0:?} more than once")]
    DuplicateEntry(EntityKind),
    #[error("floor dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: usize, height: usize },
    /// A layer asked for entities but could not place a single one.
    #[error("layer `{layer}` could not place any of its {requested} entities")]
    LayerUnplaceable { layer: String, requested: usize },
}
