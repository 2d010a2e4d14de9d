//! Template library - the primary id/handle store
//!
//! Owns ID assignment and the duplicate-handle policy: re-adding under an
//! existing handle reuses that handle's ID and overwrites the stored
//! template, so IDs stay stable across re-registration.

use std::collections::HashMap;

use super::attributes::{ObjectTemplate, TemplateId};

/// Primary map of registered templates, keyed by stable ID
#[derive(Debug, Default)]
pub struct TemplateLibrary {
    templates: HashMap<TemplateId, ObjectTemplate>,
    ids_by_handle: HashMap<String, TemplateId>,
    next_id: TemplateId,
}

impl TemplateLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template under `handle`, returning its stable ID
    ///
    /// A new handle consumes the next sequential ID; an existing handle
    /// keeps its ID and has its template replaced. The stored template
    /// is stamped with the handle and the assigned ID.
    pub fn add(&mut self, mut template: ObjectTemplate, handle: &str) -> TemplateId {
        let id = match self.ids_by_handle.get(handle) {
            Some(&existing) => existing,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        };

        template.handle = handle.to_string();
        template.id = Some(id);

        self.ids_by_handle.insert(handle.to_string(), id);
        self.templates.insert(id, template);
        id
    }

    /// Get a template by ID
    pub fn get(&self, id: TemplateId) -> Option<&ObjectTemplate> {
        self.templates.get(&id)
    }

    /// Get a template by handle
    pub fn get_by_handle(&self, handle: &str) -> Option<&ObjectTemplate> {
        self.ids_by_handle.get(handle).and_then(|id| self.templates.get(id))
    }

    /// Get the ID registered for a handle
    pub fn id_for(&self, handle: &str) -> Option<TemplateId> {
        self.ids_by_handle.get(handle).copied()
    }

    /// Check whether a handle is registered
    pub fn contains(&self, handle: &str) -> bool {
        self.ids_by_handle.contains_key(handle)
    }

    /// Remove a template by handle
    pub fn remove(&mut self, handle: &str) -> Option<ObjectTemplate> {
        let id = self.ids_by_handle.remove(handle)?;
        self.templates.remove(&id)
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over registered handles (unordered)
    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.ids_by_handle.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut lib = TemplateLibrary::new();

        let a = lib.add(ObjectTemplate::new("a"), "a");
        let b = lib.add(ObjectTemplate::new("b"), "b");

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(lib.get(a).unwrap().handle, "a");
        assert_eq!(lib.get(a).unwrap().id, Some(a));
    }

    #[test]
    fn test_duplicate_handle_reuses_id() {
        let mut lib = TemplateLibrary::new();

        let first = lib.add(ObjectTemplate::new("a"), "a");
        let mut replacement = ObjectTemplate::new("a");
        replacement.mass = 9.0;
        let second = lib.add(replacement, "a");

        assert_eq!(first, second);
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get(first).unwrap().mass, 9.0);

        // next fresh handle still gets a fresh id
        let c = lib.add(ObjectTemplate::new("c"), "c");
        assert_eq!(c, 1);
    }

    #[test]
    fn test_remove() {
        let mut lib = TemplateLibrary::new();
        lib.add(ObjectTemplate::new("a"), "a");

        let removed = lib.remove("a");
        assert!(removed.is_some());
        assert!(lib.is_empty());
        assert!(!lib.contains("a"));
        assert!(lib.remove("a").is_none());
    }

    #[test]
    fn test_registration_stamps_handle() {
        let mut lib = TemplateLibrary::new();

        // registered under a different handle than it was built with
        let id = lib.add(ObjectTemplate::new("built_as"), "registered_as");
        assert_eq!(lib.get(id).unwrap().handle, "registered_as");
        assert!(lib.contains("registered_as"));
        assert!(!lib.contains("built_as"));
    }
}
