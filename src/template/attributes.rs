//! Object attribute template
//!
//! The value object the rest of the subsystem builds, normalizes and
//! registers. Construction leaves it transient and dirty; registration
//! stamps its stable ID and clears the dirty flag.

use serde::Serialize;

/// Stable template identifier, assigned once at registration
pub type TemplateId = u32;

/// Three-component vector (inertia diagonal, COM, scale, orientation)
pub type Vec3 = [f64; 3];

/// Where a render or collision asset comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AssetOrigin {
    /// Built-in parametric primitive
    Primitive,
    /// Asset materialized from a file on disk
    File,
    /// Not yet resolved to either
    #[default]
    Unknown,
}

/// Error type for template operations
#[derive(Debug)]
pub enum TemplateError {
    /// Primitive-based construction requested for a handle with no
    /// matching primitive definition
    UnknownPrimitive(String),
    /// Registration aborted: the render asset handle is empty or names
    /// neither a primitive nor an existing file
    UnresolvedRenderAsset { handle: String, render_asset: String },
    /// Config document could not be read
    Io(String),
    /// Config document could not be parsed
    Parse(String),
    /// No registered template with this handle
    NotFound(String),
    /// Removal refused: the handle is protected
    ProtectedHandle(String),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::UnknownPrimitive(handle) => {
                write!(f, "no primitive with handle '{}' exists", handle)
            }
            TemplateError::UnresolvedRenderAsset { handle, render_asset } => write!(
                f,
                "render asset '{}' of template '{}' is neither a primitive nor an existing file",
                render_asset, handle
            ),
            TemplateError::Io(msg) => write!(f, "I/O error: {}", msg),
            TemplateError::Parse(msg) => write!(f, "parse error: {}", msg),
            TemplateError::NotFound(handle) => {
                write!(f, "no template registered under '{}'", handle)
            }
            TemplateError::ProtectedHandle(handle) => {
                write!(f, "template '{}' is protected and cannot be removed", handle)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<std::io::Error> for TemplateError {
    fn from(e: std::io::Error) -> Self {
        TemplateError::Io(e.to_string())
    }
}

/// A physical object attribute template
///
/// Bundles the render/collision asset references and the physical
/// parameters the simulation needs to instantiate an object. Templates
/// are plain data; all resolution and normalization logic lives in the
/// manager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectTemplate {
    /// Handle this template is (or will be) registered under
    pub handle: String,

    /// Stable ID, `None` until registration
    pub id: Option<TemplateId>,

    /// Handle of the asset used for rendering
    pub render_asset_handle: String,
    /// Handle of the asset used for collision
    pub collision_asset_handle: String,
    /// Origin of the render asset, resolved at registration
    pub render_origin: AssetOrigin,
    /// Origin of the collision asset, resolved at registration
    pub collision_origin: AssetOrigin,

    /// Object mass in kilograms
    pub mass: f64,
    /// Center of mass in the object's local frame
    pub com: Vec3,
    /// Whether COM should be derived from the collision shape
    ///
    /// Set false when a config document supplies an explicit `COM`.
    pub compute_com_from_shape: bool,
    /// Inertia matrix diagonal
    pub inertia: Vec3,
    /// Collision margin
    pub margin: f64,
    /// Per-axis scale applied to the asset
    pub scale: Vec3,
    /// Friction coefficient
    pub friction_coefficient: f64,
    /// Restitution coefficient
    pub restitution_coefficient: f64,
    /// Scale factor from asset units to meters
    pub units_to_meters: f64,

    /// Collide against the axis-aligned bounding box instead of the shape
    pub bounding_box_collisions: bool,
    /// Merge all collision meshes into one shape
    pub join_collision_meshes: bool,
    /// Use the asset's mesh for collision (as opposed to a proxy shape)
    pub use_mesh_collision: bool,
    /// Whether the render asset expects scene lighting
    pub requires_lighting: bool,

    /// Up direction of the render asset's canonical frame
    pub orient_up: Vec3,
    /// Front direction of the render asset's canonical frame
    pub orient_front: Vec3,

    /// True until the template has been normalized and committed
    pub is_dirty: bool,
}

impl ObjectTemplate {
    /// Create a new transient template with engine defaults
    ///
    /// Asset handles start empty; the manager fills them in during
    /// initialization.
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            id: None,
            render_asset_handle: String::new(),
            collision_asset_handle: String::new(),
            render_origin: AssetOrigin::Unknown,
            collision_origin: AssetOrigin::Unknown,
            mass: 1.0,
            com: [0.0, 0.0, 0.0],
            compute_com_from_shape: true,
            inertia: [0.0, 0.0, 0.0],
            margin: 0.04,
            scale: [1.0, 1.0, 1.0],
            friction_coefficient: 0.5,
            restitution_coefficient: 0.1,
            units_to_meters: 1.0,
            bounding_box_collisions: false,
            join_collision_meshes: true,
            use_mesh_collision: true,
            requires_lighting: true,
            orient_up: [0.0, 1.0, 0.0],
            orient_front: [0.0, 0.0, -1.0],
            is_dirty: true,
        }
    }
}
