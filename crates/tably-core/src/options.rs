use std::time::Duration;

/// Default per-statement options applied to every generated artifact.
///
/// Options are captured at artifact-build time; replacing the registry-wide
/// defaults afterwards does not rewrite artifacts already cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementOptions {
    /// Suggested execution timeout, recorded on the artifact for the
    /// executing layer to apply. Not interpreted by the registry.
    pub command_timeout: Option<Duration>,

    /// Caps generated SELECT statements with a `LIMIT` clause.
    pub max_rows: Option<u64>,
}
