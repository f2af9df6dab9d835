//! Entity trait: things the catalog keys by identity.

/// Anything stored in a keyed collection under its own identifier.
///
/// The collection relies on `id()` staying the same for the lifetime of the
/// value; implementors must not expose a way to change it.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Human-readable label used in listings and log lines.
    fn label(&self) -> &str;
}
