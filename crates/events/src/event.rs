//! Routable event contract.

/// A routable event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **routed by kind**: the bus delivers each event to at most one
///   subscriber, chosen by `kind()`
/// - consumed exactly once by the subscriber their kind routes to, then
///   discarded; no event outlives its dispatch
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Routing key: a closed set of kinds the bus dispatches on.
    type Kind: Copy + Eq + core::hash::Hash + core::fmt::Debug + Send + Sync + 'static;

    /// The routing key of this event.
    fn kind(&self) -> Self::Kind;

    /// Stable event name/type identifier (e.g. "machine.sold").
    fn event_type(&self) -> &'static str;
}
