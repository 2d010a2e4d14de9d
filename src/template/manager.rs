//! Template manager
//!
//! The owning facade over template construction and registration. Decides
//! how a handle becomes a template (primitive definition, JSON config
//! file, or synthetic default), normalizes asset references at
//! registration, and maintains the registry state: the primary library,
//! the two origin-partitioned ID indexes, and the protected-handle set.
//!
//! All state is owned by the manager instance; callers needing shared
//! access must serialize it themselves (e.g. one mutex around the whole
//! manager).

use std::collections::{BTreeMap, HashSet};

use crate::fs::FsProbe;
use crate::primitives::PrimitiveSource;

use super::attributes::{AssetOrigin, ObjectTemplate, TemplateError, TemplateId};
use super::config;
use super::library::TemplateLibrary;
use super::resolve::{self, canonical_config_path, HandleKind, CONFIG_SUFFIX};

/// Manager for physical object attribute templates
///
/// Generic over the two oracles template resolution consults: the
/// primitive definitions and the filesystem.
#[derive(Debug)]
pub struct TemplateManager<P: PrimitiveSource, F: FsProbe> {
    prims: P,
    fs: F,
    /// Primary map, owns ID assignment
    library: TemplateLibrary,
    /// IDs of templates whose render asset is a primitive
    synth_ids: BTreeMap<TemplateId, String>,
    /// IDs of templates whose render asset is file-backed
    file_ids: BTreeMap<TemplateId, String>,
    /// Handles exempt from removal
    protected: HashSet<String>,
}

impl<P: PrimitiveSource, F: FsProbe> TemplateManager<P, F> {
    /// Create a manager over the given oracles
    pub fn new(prims: P, fs: F) -> Self {
        Self {
            prims,
            fs,
            library: TemplateLibrary::new(),
            synth_ids: BTreeMap::new(),
            file_ids: BTreeMap::new(),
            protected: HashSet::new(),
        }
    }

    /// Classify a handle against both oracles
    pub fn classify(&self, handle: &str) -> HandleKind {
        resolve::classify(&self.prims, &self.fs, handle)
    }

    // ---- construction -----------------------------------------------

    /// Build a template for `handle`, optionally registering it
    ///
    /// Precedence: an existing primitive definition wins; otherwise the
    /// canonical config file (`handle` + `.phys_properties.json`) is
    /// parsed if present; otherwise a default template is synthesized,
    /// whether or not the raw handle names a file.
    pub fn create_object(
        &mut self,
        handle: &str,
        register: bool,
    ) -> Result<ObjectTemplate, TemplateError> {
        let registered = if register { " and registered" } else { "" };

        if self.prims.exists(handle) {
            let tpl = self.create_primitive_template(handle, register)?;
            log::info!(
                "primitive asset ({}) based object template created{}",
                handle,
                registered
            );
            return Ok(tpl);
        }

        let config_path = canonical_config_path(handle);
        if self.fs.is_file(&config_path) {
            let tpl = self.create_from_file(&config_path, register)?;
            log::info!(
                "JSON file ({}) based object template created{}",
                config_path,
                registered
            );
            return Ok(tpl);
        }

        let file_exists = self.fs.is_file(handle);
        let tpl = self.create_default(handle, register)?;
        if file_exists {
            log::info!("file ({}) based object template created{}", handle, registered);
        } else {
            log::info!("new default ({}) object template created{}", handle, registered);
        }
        Ok(tpl)
    }

    /// Build a template backed by a primitive definition
    ///
    /// Fails with `UnknownPrimitive` when no primitive exists for
    /// `handle`.
    pub fn create_primitive_template(
        &mut self,
        handle: &str,
        register: bool,
    ) -> Result<ObjectTemplate, TemplateError> {
        if !self.prims.exists(handle) {
            log::error!(
                "no primitive with handle '{}' exists, cannot build object template",
                handle
            );
            return Err(TemplateError::UnknownPrimitive(handle.to_string()));
        }

        let mut tpl = self.init_template(handle);
        tpl.margin = 0.0;
        // prims are approximately a meter in size
        tpl.scale = [0.1, 0.1, 0.1];
        tpl.render_origin = AssetOrigin::Primitive;
        tpl.collision_origin = AssetOrigin::Primitive;
        // mesh collision for primitives needs a configured collision
        // primitive mesh, which is not supported yet
        tpl.use_mesh_collision = false;

        self.post_create_register(tpl, register)
    }

    /// Build a template from a JSON config document
    ///
    /// The template is named by the config filename; generic asset
    /// fields are applied before the object-specific physics fields.
    pub fn create_from_file(
        &mut self,
        path: &str,
        register: bool,
    ) -> Result<ObjectTemplate, TemplateError> {
        let doc = config::load_document(&self.fs, path)?;

        let mut tpl = self.init_template(path);
        config::apply_generic_fields(&mut tpl, &doc);
        config::apply_object_fields(&mut tpl, &doc);

        self.post_create_register(tpl, register)
    }

    /// Build a default template named by `handle`
    pub fn create_default(
        &mut self,
        handle: &str,
        register: bool,
    ) -> Result<ObjectTemplate, TemplateError> {
        let tpl = self.init_template(handle);
        self.post_create_register(tpl, register)
    }

    /// Initialize a transient template with handle-derived defaults
    ///
    /// Both asset handles default to the template handle and are typed
    /// Primitive or Unknown; the canonical frame is fixed alongside the
    /// render asset.
    fn init_template(&self, handle: &str) -> ObjectTemplate {
        let mut tpl = ObjectTemplate::new(handle);

        tpl.render_asset_handle = handle.to_string();
        tpl.collision_asset_handle = handle.to_string();

        tpl.render_origin = self.default_origin(&tpl.render_asset_handle);
        tpl.orient_up = [0.0, 1.0, 0.0];
        tpl.orient_front = [0.0, 0.0, -1.0];

        tpl.collision_origin = self.default_origin(&tpl.collision_asset_handle);

        tpl
    }

    /// Asset typing for handle-derived defaults: primitive or unknown
    fn default_origin(&self, asset_handle: &str) -> AssetOrigin {
        if self.prims.exists(asset_handle) {
            AssetOrigin::Primitive
        } else {
            AssetOrigin::Unknown
        }
    }

    /// Register the template if requested, returning the stored copy
    fn post_create_register(
        &mut self,
        template: ObjectTemplate,
        register: bool,
    ) -> Result<ObjectTemplate, TemplateError> {
        if !register {
            return Ok(template);
        }
        let handle = template.handle.clone();
        let id = self.register(template, &handle)?;
        self.library
            .get(id)
            .cloned()
            .ok_or(TemplateError::NotFound(handle))
    }

    // ---- registration -----------------------------------------------

    /// Normalize and commit a template under `handle`
    ///
    /// The render asset must resolve to a primitive or an existing file,
    /// or registration fails and nothing is committed. An unresolved
    /// collision asset is not fatal: it falls back to the render asset.
    pub fn register(
        &mut self,
        mut template: ObjectTemplate,
        handle: &str,
    ) -> Result<TemplateId, TemplateError> {
        let render_asset = template.render_asset_handle.clone();
        if render_asset.is_empty() {
            log::error!(
                "template '{}' has no render asset handle, aborting registration",
                handle
            );
            return Err(TemplateError::UnresolvedRenderAsset {
                handle: handle.to_string(),
                render_asset,
            });
        }

        let render_origin = match self.classify(&render_asset) {
            HandleKind::Primitive => AssetOrigin::Primitive,
            HandleKind::File => AssetOrigin::File,
            HandleKind::Unknown => {
                log::error!(
                    "render asset '{}' of template '{}' matches no existing file or \
                     primitive, aborting registration",
                    render_asset,
                    handle
                );
                return Err(TemplateError::UnresolvedRenderAsset {
                    handle: handle.to_string(),
                    render_asset,
                });
            }
        };
        template.render_origin = render_origin;

        let collision_asset = template.collision_asset_handle.clone();
        match self.classify(&collision_asset) {
            HandleKind::Primitive => template.collision_origin = AssetOrigin::Primitive,
            HandleKind::File => template.collision_origin = AssetOrigin::File,
            HandleKind::Unknown => {
                log::info!(
                    "collision asset '{}' of template '{}' matches no existing file or \
                     primitive, overriding with render asset '{}'",
                    collision_asset,
                    handle,
                    render_asset
                );
                template.collision_asset_handle = render_asset;
                template.collision_origin = render_origin;
            }
        }

        template.is_dirty = false;

        let id = self.library.add(template, handle);

        // re-registration may flip the render origin; keep the id in
        // exactly one partition
        self.synth_ids.remove(&id);
        self.file_ids.remove(&id);
        match render_origin {
            AssetOrigin::Primitive => self.synth_ids.insert(id, handle.to_string()),
            _ => self.file_ids.insert(id, handle.to_string()),
        };

        Ok(id)
    }

    /// Build, register and protect a template per built-in primitive
    ///
    /// Clears the protected set first; later entries overwrite earlier
    /// ones on handle collision.
    pub fn seed_protected_primitives(&mut self) {
        self.protected.clear();
        for handle in self.prims.builtin_handles() {
            match self.create_primitive_template(&handle, true) {
                Ok(tpl) => {
                    self.protected.insert(tpl.handle);
                }
                Err(e) => {
                    log::error!("failed to seed primitive template '{}': {}", handle, e);
                }
            }
        }
    }

    /// Remove a registered template
    ///
    /// Protected handles are refused.
    pub fn remove_template(&mut self, handle: &str) -> Result<ObjectTemplate, TemplateError> {
        if self.protected.contains(handle) {
            log::warn!("template '{}' is protected, refusing removal", handle);
            return Err(TemplateError::ProtectedHandle(handle.to_string()));
        }
        let tpl = self
            .library
            .remove(handle)
            .ok_or_else(|| TemplateError::NotFound(handle.to_string()))?;
        if let Some(id) = tpl.id {
            self.synth_ids.remove(&id);
            self.file_ids.remove(&id);
        }
        Ok(tpl)
    }

    // ---- batch loading ----------------------------------------------

    /// Load and register every config document reachable from `path`
    ///
    /// `path` may be a directory (all suffix-matching entries, ascending
    /// by name) or a handle whose canonical config file exists; when both
    /// apply the candidate file is loaded in addition to the listing, and
    /// no deduplication is performed. Returns one slot per discovered
    /// file, `None` where that file failed to build.
    pub fn load_configs(
        &mut self,
        path: &str,
        save_as_defaults: bool,
    ) -> Vec<Option<TemplateId>> {
        let candidate = canonical_config_path(path);
        let dir_exists = self.fs.is_dir(path);
        let file_exists = self.fs.is_file(&candidate);

        if !dir_exists && !file_exists {
            log::warn!(
                "cannot find '{}' or '{}', skipping config load",
                path,
                candidate
            );
            return Vec::new();
        }

        let mut paths = Vec::new();
        if file_exists {
            paths.push(candidate);
        }
        if dir_exists {
            log::info!("parsing object config directory: {}", path);
            for entry in self.fs.list_sorted(path) {
                if entry.ends_with(CONFIG_SUFFIX) {
                    paths.push(entry);
                }
            }
        }

        self.load_all_file_based(&paths, save_as_defaults)
    }

    /// Register a file-based template per path, in order
    ///
    /// A failed file occupies its slot with `None` and does not abort
    /// the remaining batch.
    pub fn load_all_file_based(
        &mut self,
        paths: &[String],
        save_as_defaults: bool,
    ) -> Vec<Option<TemplateId>> {
        let mut ids = Vec::with_capacity(paths.len());
        for path in paths {
            log::info!("loading file-based object template: {}", path);
            match self.create_from_file(path, true) {
                Ok(tpl) => {
                    if save_as_defaults {
                        self.protected.insert(tpl.handle.clone());
                    }
                    ids.push(tpl.id);
                }
                Err(e) => {
                    log::error!("failed to load object template '{}': {}", path, e);
                    ids.push(None);
                }
            }
        }
        log::info!(
            "loaded file-based object templates: {} total",
            self.file_ids.len()
        );
        ids
    }

    // ---- queries ------------------------------------------------------

    /// Get a registered template by handle
    pub fn get(&self, handle: &str) -> Option<&ObjectTemplate> {
        self.library.get_by_handle(handle)
    }

    /// Get a registered template by ID
    pub fn get_by_id(&self, id: TemplateId) -> Option<&ObjectTemplate> {
        self.library.get(id)
    }

    /// Check whether a handle is registered
    pub fn contains(&self, handle: &str) -> bool {
        self.library.contains(handle)
    }

    /// Check whether a handle is protected from removal
    pub fn is_protected(&self, handle: &str) -> bool {
        self.protected.contains(handle)
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.library.len()
    }

    /// Check if no templates are registered
    pub fn is_empty(&self) -> bool {
        self.library.is_empty()
    }

    /// Handles of primitive-rendered templates, ascending by ID
    pub fn synth_template_handles(&self) -> Vec<&str> {
        self.synth_ids.values().map(|s| s.as_str()).collect()
    }

    /// Handles of file-rendered templates, ascending by ID
    pub fn file_template_handles(&self) -> Vec<&str> {
        self.file_ids.values().map(|s| s.as_str()).collect()
    }
}
