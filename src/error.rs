use thiserror::Error;

/// Errors raised while constructing a tab view session.
///
/// Runtime inputs never error: unknown jump keys, stale indices, and
/// host scroll failures are recovered locally (worst case is a visual
/// glitch, never a crash).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabViewError {
    /// A session needs at least one route.
    #[error("route list is empty")]
    EmptyRouteList,

    /// Route keys identify scenes and must be unique.
    #[error("duplicate route key `{0}`")]
    DuplicateRouteKey(String),
}
