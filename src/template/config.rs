//! Physics config documents
//!
//! File-based templates are described by small JSON documents
//! (`*.phys_properties.json`). Every field is optional; absent fields
//! keep the template's current value. Population is two passes of the
//! same fill-if-present routine: generic asset fields first, then the
//! object-specific physics fields.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::fs::FsProbe;

use super::attributes::{ObjectTemplate, TemplateError, Vec3};

/// Read and parse a config document through the filesystem probe
///
/// Read and parse failures are hard errors for this one file; batch
/// loading treats them as a failed slot and moves on.
pub fn load_document<F: FsProbe>(fs: &F, path: &str) -> Result<Value, TemplateError> {
    let text = fs
        .read_to_string(path)
        .map_err(|e| TemplateError::Io(format!("{}: {}", path, e)))?;
    serde_json::from_str(&text).map_err(|e| TemplateError::Parse(format!("{}: {}", path, e)))
}

/// Apply a setter if `key` is present in the document, reporting presence
///
/// A field that is present but of the wrong shape is logged and treated
/// as absent, so the template keeps its prior value.
fn set_if_present<T, S>(doc: &Value, key: &str, set: S) -> bool
where
    T: DeserializeOwned,
    S: FnOnce(T),
{
    let Some(value) = doc.get(key) else {
        return false;
    };
    match serde_json::from_value::<T>(value.clone()) {
        Ok(v) => {
            set(v);
            true
        }
        Err(e) => {
            log::warn!("config field '{}' has unexpected type, ignoring: {}", key, e);
            false
        }
    }
}

/// Populate fields shared by every attribute template kind
pub fn apply_generic_fields(tpl: &mut ObjectTemplate, doc: &Value) {
    set_if_present::<Vec3, _>(doc, "scale", |v| tpl.scale = v);
    set_if_present::<f64, _>(doc, "margin", |v| tpl.margin = v);
    set_if_present::<f64, _>(doc, "friction coefficient", |v| tpl.friction_coefficient = v);
    set_if_present::<f64, _>(doc, "restitution coefficient", |v| {
        tpl.restitution_coefficient = v
    });
    set_if_present::<f64, _>(doc, "units to meters", |v| tpl.units_to_meters = v);
    set_if_present::<bool, _>(doc, "requires lighting", |v| tpl.requires_lighting = v);
    set_if_present::<Vec3, _>(doc, "up", |v| tpl.orient_up = v);
    set_if_present::<Vec3, _>(doc, "front", |v| tpl.orient_front = v);
    set_if_present::<String, _>(doc, "render mesh", |v| tpl.render_asset_handle = v);
    set_if_present::<String, _>(doc, "collision mesh", |v| tpl.collision_asset_handle = v);
}

/// Populate object-specific physics fields
///
/// `COM` is special: its presence in the document, not its value,
/// decides whether COM is computed from the collision shape.
pub fn apply_object_fields(tpl: &mut ObjectTemplate, doc: &Value) {
    set_if_present::<f64, _>(doc, "mass", |v| tpl.mass = v);
    set_if_present::<bool, _>(doc, "use bounding box for collision", |v| {
        tpl.bounding_box_collisions = v
    });
    set_if_present::<bool, _>(doc, "join collision meshes", |v| {
        tpl.join_collision_meshes = v
    });
    set_if_present::<Vec3, _>(doc, "inertia", |v| tpl.inertia = v);

    let com_present = set_if_present::<Vec3, _>(doc, "COM", |v| tpl.com = v);
    tpl.compute_com_from_shape = !com_present;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mass_and_com() {
        let doc = json!({"mass": 2.5, "COM": [0.0, 0.0, 0.0]});
        let mut tpl = ObjectTemplate::new("test");

        apply_object_fields(&mut tpl, &doc);

        assert_eq!(tpl.mass, 2.5);
        assert_eq!(tpl.com, [0.0, 0.0, 0.0]);
        assert!(!tpl.compute_com_from_shape);
    }

    #[test]
    fn test_absent_com_keeps_default_and_computes_from_shape() {
        let doc = json!({"mass": 2.5});
        let mut tpl = ObjectTemplate::new("test");
        tpl.com = [1.0, 2.0, 3.0];

        apply_object_fields(&mut tpl, &doc);

        assert_eq!(tpl.com, [1.0, 2.0, 3.0]);
        assert!(tpl.compute_com_from_shape);
    }

    #[test]
    fn test_object_fields() {
        let doc = json!({
            "use bounding box for collision": true,
            "join collision meshes": false,
            "inertia": [0.1, 0.2, 0.3]
        });
        let mut tpl = ObjectTemplate::new("test");

        apply_object_fields(&mut tpl, &doc);

        assert!(tpl.bounding_box_collisions);
        assert!(!tpl.join_collision_meshes);
        assert_eq!(tpl.inertia, [0.1, 0.2, 0.3]);
        // mass untouched
        assert_eq!(tpl.mass, 1.0);
    }

    #[test]
    fn test_mistyped_field_is_ignored() {
        let doc = json!({"mass": "heavy", "COM": true});
        let mut tpl = ObjectTemplate::new("test");

        apply_object_fields(&mut tpl, &doc);

        assert_eq!(tpl.mass, 1.0);
        // unparseable COM counts as absent
        assert!(tpl.compute_com_from_shape);
    }

    #[test]
    fn test_generic_fields() {
        let doc = json!({
            "scale": [2.0, 2.0, 2.0],
            "margin": 0.01,
            "friction coefficient": 0.8,
            "render mesh": "chair.glb",
            "collision mesh": "chair_collider.glb"
        });
        let mut tpl = ObjectTemplate::new("test");
        tpl.render_asset_handle = "test".to_string();
        tpl.collision_asset_handle = "test".to_string();

        apply_generic_fields(&mut tpl, &doc);

        assert_eq!(tpl.scale, [2.0, 2.0, 2.0]);
        assert_eq!(tpl.margin, 0.01);
        assert_eq!(tpl.friction_coefficient, 0.8);
        assert_eq!(tpl.render_asset_handle, "chair.glb");
        assert_eq!(tpl.collision_asset_handle, "chair_collider.glb");
        // untouched generic fields keep defaults
        assert_eq!(tpl.units_to_meters, 1.0);
        assert!(tpl.requires_lighting);
    }

    #[test]
    fn test_load_document_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let fs = crate::fs::LocalFs::with_base_dir(dir.path());

        let result = load_document(&fs, "no_such_file.phys_properties.json");
        assert!(matches!(result, Err(TemplateError::Io(_))));
    }

    #[test]
    fn test_load_document_invalid_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let fs = crate::fs::LocalFs::with_base_dir(dir.path());
        std::fs::write(dir.path().join("bad.phys_properties.json"), "not json").unwrap();

        let result = load_document(&fs, "bad.phys_properties.json");
        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }
}
