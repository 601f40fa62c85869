// ABOUTME: Sealed trait pattern for the engine client trait.
// ABOUTME: Prevents external implementations, allowing non-breaking evolution.

/// Sealed trait to prevent external implementations.
///
/// This pattern allows us to add new methods to `EngineClient` without
/// breaking semver. Only our internal engine types can implement it.
pub trait Sealed {}
