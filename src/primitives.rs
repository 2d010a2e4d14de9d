//! Primitive asset definitions
//!
//! Built-in parametric shapes (cube, sphere, cylinder, ...) are not backed
//! by files; templates based on them are resolved against this oracle
//! instead of the filesystem.

use std::collections::HashSet;

/// Oracle over the built-in parametric primitive definitions.
pub trait PrimitiveSource {
    /// Check whether a primitive definition exists for `handle`
    fn exists(&self, handle: &str) -> bool;

    /// Handles of the built-in primitives, in definition order
    ///
    /// These seed the protected (undeletable) template set.
    fn builtin_handles(&self) -> Vec<String>;
}

/// An ordered, deduplicating collection of primitive handles
///
/// The standard `PrimitiveSource` implementation. Order of insertion is
/// preserved because protected-template seeding is order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveSet {
    handles: Vec<String>,
    index: HashSet<String>,
}

impl PrimitiveSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from a list of handles
    pub fn with_handles<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for handle in handles {
            set.add(handle);
        }
        set
    }

    /// Create a set containing the engine's built-in parametric shapes
    pub fn with_defaults() -> Self {
        Self::with_handles([
            "capsule3DSolid",
            "capsule3DWireframe",
            "coneSolid",
            "coneWireframe",
            "cubeSolid",
            "cubeWireframe",
            "cylinderSolid",
            "cylinderWireframe",
            "icosphereSolid",
            "icosphereWireframe",
            "uvSphereSolid",
            "uvSphereWireframe",
        ])
    }

    /// Add a primitive handle, preserving first-insertion order
    ///
    /// Duplicates are ignored.
    pub fn add(&mut self, handle: impl Into<String>) {
        let handle = handle.into();
        if self.index.insert(handle.clone()) {
            self.handles.push(handle);
        }
    }

    /// Number of primitives in the set
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterate over handles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.handles.iter().map(|s| s.as_str())
    }
}

impl PrimitiveSource for PrimitiveSet {
    fn exists(&self, handle: &str) -> bool {
        self.index.contains(handle)
    }

    fn builtin_handles(&self) -> Vec<String> {
        self.handles.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists() {
        let prims = PrimitiveSet::with_handles(["cubeSolid", "coneSolid"]);
        assert!(prims.exists("cubeSolid"));
        assert!(prims.exists("coneSolid"));
        assert!(!prims.exists("chair"));
        assert!(!prims.exists("CubeSolid"));
    }

    #[test]
    fn test_order_preserved_and_deduplicated() {
        let mut prims = PrimitiveSet::new();
        prims.add("b");
        prims.add("a");
        prims.add("b");
        prims.add("c");

        assert_eq!(prims.len(), 3);
        assert_eq!(prims.builtin_handles(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_defaults_are_self_consistent() {
        let prims = PrimitiveSet::with_defaults();
        assert!(!prims.is_empty());
        for handle in prims.builtin_handles() {
            assert!(prims.exists(&handle));
        }
    }
}
