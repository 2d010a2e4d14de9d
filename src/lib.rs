//! phys-templates
//!
//! Attribute template management for physics simulation assets. Turns a
//! textual handle into a registered object template by deciding whether
//! the handle names a built-in parametric primitive, a persisted JSON
//! config document, or neither (synthetic default), then normalizing the
//! result and committing it under a stable ID.
//!
//! The crate is synchronous and single-threaded; a [`TemplateManager`]
//! owns all registry state and callers serialize access themselves.
//!
//! ```no_run
//! use phys_templates::{LocalFs, PrimitiveSet, TemplateManager};
//!
//! let mut manager = TemplateManager::new(PrimitiveSet::with_defaults(), LocalFs::new());
//! manager.seed_protected_primitives();
//! let ids = manager.load_configs("data/objects", false);
//! println!("registered {} object configs", ids.iter().flatten().count());
//! ```

pub mod fs;
pub mod primitives;
pub mod template;

pub use fs::{FsProbe, LocalFs};
pub use primitives::{PrimitiveSet, PrimitiveSource};
pub use template::{
    AssetOrigin, HandleKind, ObjectTemplate, TemplateError, TemplateId, TemplateLibrary,
    TemplateManager, Vec3, CONFIG_SUFFIX,
};
