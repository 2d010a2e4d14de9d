//! Object Attribute Template System
//!
//! Resolves textual handles into fully-specified object attribute
//! templates and registers them under stable numeric IDs:
//! - A handle matching a built-in primitive builds a primitive-backed
//!   template (small scale, zero margin, no mesh collision)
//! - A handle whose canonical `*.phys_properties.json` config exists
//!   builds a file-backed template populated from the document
//! - Anything else builds a synthetic default named by the handle
//!
//! ## Registration pipeline
//!
//! ```text
//! handle
//!   │  classify (primitive / file / unknown)
//!   ▼
//! ObjectTemplate (transient, dirty)
//!   │  register: resolve render + collision assets,
//!   │            clear dirty, assign stable ID
//!   ▼
//! TemplateLibrary (id → template)
//!   ├── synth index (primitive-rendered ids)
//!   └── file index  (file-rendered ids)
//! ```
//!
//! The render asset must resolve or registration fails; an unresolved
//! collision asset silently falls back to the render asset. Templates
//! seeded from built-in primitives (and batch loads requesting it) are
//! protected and cannot be removed.

mod attributes;
mod config;
mod library;
mod manager;
mod resolve;

pub use attributes::{AssetOrigin, ObjectTemplate, TemplateError, TemplateId, Vec3};
pub use config::{apply_generic_fields, apply_object_fields, load_document};
pub use library::TemplateLibrary;
pub use manager::TemplateManager;
pub use resolve::{canonical_config_path, classify, HandleKind, CONFIG_SUFFIX};
