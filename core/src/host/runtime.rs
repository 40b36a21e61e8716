use std::sync::{Arc, RwLock};

use super::HostModule;

/// The set of modules currently loaded in the host process.
///
/// Modules can be loaded and unloaded at any time. Lookups see the set as it
/// is at the moment of the call; nothing here caches.
#[derive(Debug, Default)]
pub struct HostRuntime {
    modules: RwLock<Vec<Arc<HostModule>>>,
}

impl HostRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module. Load order is preserved for enumeration.
    pub fn load(&self, module: HostModule) -> Arc<HostModule> {
        let module = Arc::new(module);
        if let Ok(mut modules) = self.modules.write() {
            modules.push(Arc::clone(&module));
        }
        module
    }

    /// Remove every module with this exact name. Returns how many were removed.
    pub fn unload(&self, name: &str) -> usize {
        let Ok(mut modules) = self.modules.write() else {
            return 0;
        };
        let before = modules.len();
        modules.retain(|m| m.name != name);
        before - modules.len()
    }

    /// Snapshot of loaded modules in load order
    pub fn modules(&self) -> Vec<Arc<HostModule>> {
        self.modules
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// First loaded module with exactly this name
    pub fn find_module(&self, name: &str) -> Option<Arc<HostModule>> {
        self.modules
            .read()
            .ok()?
            .iter()
            .find(|m| m.name == name)
            .cloned()
    }

    /// First loaded module whose name matches ignoring ASCII case
    pub fn find_module_ignore_case(&self, name: &str) -> Option<Arc<HostModule>> {
        self.modules
            .read()
            .ok()?
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_lookup() {
        let runtime = HostRuntime::new();
        runtime.load(HostModule::new("Assembly-CSharp"));
        runtime.load(HostModule::new("RueI"));

        assert!(runtime.find_module("Assembly-CSharp").is_some());
        assert!(runtime.find_module("assembly-csharp").is_none());
        assert_eq!(
            runtime.find_module_ignore_case("ruei").map(|m| m.name.clone()),
            Some("RueI".to_string())
        );
    }

    #[test]
    fn test_unload_removes_module() {
        let runtime = HostRuntime::new();
        runtime.load(HostModule::new("RueI"));
        assert_eq!(runtime.unload("RueI"), 1);
        assert!(runtime.find_module("RueI").is_none());
        assert!(runtime.modules().is_empty());
    }

    #[test]
    fn test_unreadable_module_has_no_types() {
        let module = HostModule::unreadable("Broken", "missing dependency");
        assert!(module.types().is_err());
        assert!(module.find_type("Anything").is_none());
    }
}
