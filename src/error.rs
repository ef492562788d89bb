use std::{error::Error, fmt};

/// Errors produced by the pure viewport, color and query helpers.
///
/// Every variant is recoverable: the host is expected to skip the current
/// redraw cycle (e.g. "no viewport yet") rather than abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsmViewError {
    /// A required field is missing, non-numeric or otherwise out of range.
    InvalidInput(String),
}

impl OsmViewError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl fmt::Display for OsmViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for OsmViewError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = OsmViewError::invalid("palette is empty");
        assert_eq!(err.to_string(), "invalid input: palette is empty");
    }

    #[test]
    fn converts_into_anyhow() {
        let err: anyhow::Error = OsmViewError::invalid("x").into();
        assert!(err.downcast_ref::<OsmViewError>().is_some());
    }
}
