//! # Shape Modules
//!
//! Resolution of shape module names to creation functions. A
//! [`ModuleLoader`] knows how to find a module; a [`ModuleCache`] makes sure
//! each name is loaded at most once per worker thread.

use std::collections::HashMap;

use log::debug;
use shape_geometry::{CreateGeometryFn, GeometryError, ShapeKind};

/// Finds the creation function registered under a module name.
pub trait ModuleLoader {
    fn load(&self, module_name: &str) -> shape_geometry::Result<CreateGeometryFn>;
}

/// Loader over the table of every built-in shape kind.
#[derive(Debug, Clone)]
pub struct StaticModuleLoader {
    registry: HashMap<&'static str, CreateGeometryFn>,
}

impl StaticModuleLoader {
    pub fn new() -> Self {
        let registry = ShapeKind::ALL
            .into_iter()
            .map(|kind| (kind.module_name(), kind.create_fn()))
            .collect();
        Self { registry }
    }

    /// Registered module names, sorted.
    pub fn module_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.registry.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for StaticModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load(&self, module_name: &str) -> shape_geometry::Result<CreateGeometryFn> {
        self.registry
            .get(module_name)
            .copied()
            .ok_or_else(|| GeometryError::UnknownModule(module_name.to_string()))
    }
}

/// Resolved modules of one worker thread. Entries are never evicted.
///
/// Failed loads are not cached, so a later batch retries them.
#[derive(Debug)]
pub struct ModuleCache<L = StaticModuleLoader> {
    loader: L,
    modules: HashMap<String, CreateGeometryFn>,
}

impl<L: ModuleLoader> ModuleCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            modules: HashMap::new(),
        }
    }

    /// Returns the creation function for `module_name`, loading it on first use.
    pub fn resolve(&mut self, module_name: &str) -> shape_geometry::Result<CreateGeometryFn> {
        if let Some(create) = self.modules.get(module_name) {
            return Ok(*create);
        }
        let create = self.loader.load(module_name)?;
        debug!("Loaded shape module `{module_name}`");
        self.modules.insert(module_name.to_string(), create);
        Ok(create)
    }

    /// True if `module_name` is already resident.
    pub fn contains(&self, module_name: &str) -> bool {
        self.modules.contains_key(module_name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl Default for ModuleCache<StaticModuleLoader> {
    fn default() -> Self {
        Self::new(StaticModuleLoader::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingLoader {
        inner: StaticModuleLoader,
        loads: Cell<usize>,
    }

    impl ModuleLoader for CountingLoader {
        fn load(&self, module_name: &str) -> shape_geometry::Result<CreateGeometryFn> {
            self.loads.set(self.loads.get() + 1);
            self.inner.load(module_name)
        }
    }

    fn counting_cache() -> ModuleCache<CountingLoader> {
        ModuleCache::new(CountingLoader {
            inner: StaticModuleLoader::new(),
            loads: Cell::new(0),
        })
    }

    #[test]
    fn test_resolve_loads_once() {
        let mut cache = counting_cache();
        cache.resolve("sphere").unwrap();
        cache.resolve("sphere").unwrap();
        assert_eq!(cache.loader().loads.get(), 1);
        assert!(cache.contains("sphere"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_resolve_distinct_modules() {
        let mut cache = counting_cache();
        for name in ["circle", "ellipse", "circle", "ellipse_outline", "ellipse"] {
            cache.resolve(name).unwrap();
        }
        assert_eq!(cache.loader().loads.get(), 3);
    }

    #[test]
    fn test_unknown_module_not_cached() {
        let mut cache = counting_cache();
        assert!(cache.resolve("torus").is_err());
        assert!(cache.resolve("torus").is_err());
        assert_eq!(cache.loader().loads.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_static_loader_registers_every_kind() {
        let loader = StaticModuleLoader::new();
        assert_eq!(loader.module_names().len(), ShapeKind::ALL.len());
        for kind in ShapeKind::ALL {
            assert!(loader.load(kind.module_name()).is_ok());
        }
    }
}
