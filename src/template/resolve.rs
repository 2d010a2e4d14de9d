//! Handle classification
//!
//! A handle can name a built-in primitive, an existing file, or nothing
//! at all. Everything downstream (template construction, registration,
//! origin partitioning) branches on this classification, so it lives
//! here as one pure query.

use crate::fs::FsProbe;
use crate::primitives::PrimitiveSource;

/// Canonical extension for physics config documents
pub const CONFIG_SUFFIX: &str = ".phys_properties.json";

/// What a handle resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// A built-in primitive definition exists for this exact handle
    Primitive,
    /// The handle (or its canonical config variant) names an existing file
    File,
    /// Neither
    Unknown,
}

/// Classify a handle against the primitive and filesystem oracles
///
/// Primitive definitions take precedence over files of the same name.
/// Pure query: neither oracle is mutated.
pub fn classify<P, F>(prims: &P, fs: &F, handle: &str) -> HandleKind
where
    P: PrimitiveSource,
    F: FsProbe,
{
    if prims.exists(handle) {
        return HandleKind::Primitive;
    }
    if fs.is_file(handle) {
        return HandleKind::File;
    }
    let canonical = canonical_config_path(handle);
    if canonical != handle && fs.is_file(&canonical) {
        return HandleKind::File;
    }
    HandleKind::Unknown
}

/// Compute the canonical config filename for a handle
///
/// Appends [`CONFIG_SUFFIX`] unless the handle already carries it
/// (compared case-insensitively).
pub fn canonical_config_path(handle: &str) -> String {
    if handle.to_lowercase().ends_with(CONFIG_SUFFIX) {
        handle.to_string()
    } else {
        format!("{}{}", handle, CONFIG_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;
    use crate::primitives::PrimitiveSet;
    use tempfile::TempDir;

    #[test]
    fn test_canonical_config_path() {
        assert_eq!(
            canonical_config_path("chair"),
            "chair.phys_properties.json"
        );
        assert_eq!(
            canonical_config_path("chair.phys_properties.json"),
            "chair.phys_properties.json"
        );
        // suffix check is case-insensitive
        assert_eq!(
            canonical_config_path("chair.PHYS_PROPERTIES.JSON"),
            "chair.PHYS_PROPERTIES.JSON"
        );
    }

    #[test]
    fn test_classify_primitive_wins_over_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("cubeSolid"), "").unwrap();

        let prims = PrimitiveSet::with_handles(["cubeSolid"]);
        let fs = LocalFs::with_base_dir(dir.path());

        assert_eq!(classify(&prims, &fs, "cubeSolid"), HandleKind::Primitive);
    }

    #[test]
    fn test_classify_exact_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("chair.glb"), "").unwrap();

        let prims = PrimitiveSet::new();
        let fs = LocalFs::with_base_dir(dir.path());

        assert_eq!(classify(&prims, &fs, "chair.glb"), HandleKind::File);
    }

    #[test]
    fn test_classify_suffixed_variant() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("chair.phys_properties.json"), "{}").unwrap();

        let prims = PrimitiveSet::new();
        let fs = LocalFs::with_base_dir(dir.path());

        // bare handle resolves through its canonical config file
        assert_eq!(classify(&prims, &fs, "chair"), HandleKind::File);
    }

    #[test]
    fn test_classify_unknown() {
        let dir = TempDir::new().unwrap();
        let prims = PrimitiveSet::with_handles(["cubeSolid"]);
        let fs = LocalFs::with_base_dir(dir.path());

        assert_eq!(classify(&prims, &fs, "no_such_thing"), HandleKind::Unknown);
    }
}
