//! Registry of named repository instances
//!
//! The registry is an explicitly constructed object created once at
//! application start and passed by handle to whoever needs it; there is no
//! process-wide singleton. Repositories of any concrete type can be
//! registered under a name and retrieved with a typed lookup.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Named registry of heterogeneous repository instances.
#[derive(Default)]
pub struct RepositoryRegistry {
    repositories: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl RepositoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `repository` under `name`, replacing any prior registration
    pub fn register<R>(&self, name: impl Into<String>, repository: Arc<R>)
    where
        R: Send + Sync + 'static,
    {
        let name = name.into();
        info!("registering repository: {}", name);
        self.write_lock().insert(name, repository);
    }

    /// Look up the repository registered under `name`.
    ///
    /// Returns `None` when the name is unknown or the registered instance
    /// is not an `R`.
    pub fn get<R>(&self, name: &str) -> Option<Arc<R>>
    where
        R: Send + Sync + 'static,
    {
        self.read_lock()
            .get(name)
            .cloned()
            .and_then(|entry| entry.downcast::<R>().ok())
    }

    /// Remove the registration under `name`; returns whether one existed
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.write_lock().remove(name).is_some();
        if removed {
            info!("removed repository: {}", name);
        }
        removed
    }

    /// Whether a repository is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.read_lock().contains_key(name)
    }

    /// Names of all registered repositories
    pub fn names(&self) -> Vec<String> {
        self.read_lock().keys().cloned().collect()
    }

    /// Number of registered repositories
    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    /// Remove every registration
    pub fn clear(&self) {
        let mut map = self.write_lock();
        let count = map.len();
        map.clear();
        info!("cleared {} repositories from registry", count);
    }

    fn read_lock(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<dyn Any + Send + Sync>>> {
        self.repositories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<dyn Any + Send + Sync>>> {
        self.repositories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RequestsRepo {
        label: &'static str,
    }

    struct TilesRepo;

    #[test]
    fn test_register_and_typed_get() {
        let registry = RepositoryRegistry::new();
        registry.register("requests", Arc::new(RequestsRepo { label: "rti" }));

        let repo = registry.get::<RequestsRepo>("requests").unwrap();
        assert_eq!(repo.label, "rti");
        assert!(registry.contains("requests"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_with_wrong_type_is_none() {
        let registry = RepositoryRegistry::new();
        registry.register("requests", Arc::new(RequestsRepo { label: "rti" }));

        assert!(registry.get::<TilesRepo>("requests").is_none());
    }

    #[test]
    fn test_unknown_name_is_none() {
        let registry = RepositoryRegistry::new();
        assert!(registry.get::<RequestsRepo>("missing").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let registry = RepositoryRegistry::new();
        registry.register("r", Arc::new(RequestsRepo { label: "old" }));
        registry.register("r", Arc::new(RequestsRepo { label: "new" }));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get::<RequestsRepo>("r").unwrap().label, "new");
    }

    #[test]
    fn test_remove_and_clear() {
        let registry = RepositoryRegistry::new();
        registry.register("a", Arc::new(RequestsRepo { label: "a" }));
        registry.register("b", Arc::new(TilesRepo));

        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_names() {
        let registry = RepositoryRegistry::new();
        registry.register("a", Arc::new(TilesRepo));
        registry.register("b", Arc::new(TilesRepo));

        let mut names = registry.names();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
