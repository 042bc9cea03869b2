//! Helpers for rendering errors together with their whole chain of sources.
//!
//! Serialization errors are frequently wrapped in context (e.g. which component descriptor
//! failed), and `Display` only ever shows the outermost layer.

/// Format an error, including its chain of sources.
///
/// Always use this when logging an error.
pub fn format(error: impl AsRef<dyn std::error::Error>) -> String {
    format_ref(error.as_ref())
}

/// Format an error, including its chain of sources.
///
/// Layers are separated by `": "`, which is what `anyhow` does for `{:#}`.
pub fn format_ref(error: &dyn std::error::Error) -> String {
    std::iter::successors(Some(error), |error| error.source())
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    enum Outer {
        #[error("failed to serialize {descriptor}")]
        Context {
            descriptor: String,
            #[source]
            source: Inner,
        },
    }

    #[derive(Debug, thiserror::Error)]
    #[error("sum of lengths was {actual}, expected {expected}")]
    struct Inner {
        expected: usize,
        actual: usize,
    }

    #[test]
    fn format_anyhow_chain() {
        let err = anyhow::format_err!("root_cause")
            .context("inner_context")
            .context("outer_context");

        assert_eq!(err.to_string(), "outer_context"); // Oh no, we don't see the root cause!
        assert_eq!(format(&err), "outer_context: inner_context: root_cause");
    }

    #[test]
    fn format_typed_chain() {
        let err = Outer::Context {
            descriptor: "Points2D:positions".to_owned(),
            source: Inner {
                expected: 3,
                actual: 2,
            },
        };

        assert_eq!(
            format_ref(&err),
            "failed to serialize Points2D:positions: sum of lengths was 2, expected 3"
        );
    }

    #[test]
    fn format_single_layer() {
        let err = Inner {
            expected: 1,
            actual: 0,
        };
        assert_eq!(format_ref(&err), "sum of lengths was 0, expected 1");
    }
}
