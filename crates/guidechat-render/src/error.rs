//! Errors for blocks that cannot be rendered.

/// Why a single block was degraded to a placeholder.
///
/// A render pass never aborts; the offending block is replaced by
/// [`ViewNode::Placeholder`](crate::ViewNode::Placeholder) and the pass goes on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("summary has no content")]
    EmptySummary,
    #[error("malformed {kind} block: {reason}")]
    MalformedBlock { kind: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(RenderError::EmptySummary.to_string(), "summary has no content");

        let err = RenderError::MalformedBlock {
            kind: "table".to_string(),
            reason: "missing field `rows`".to_string(),
        };
        assert_eq!(err.to_string(), "malformed table block: missing field `rows`");
    }
}
