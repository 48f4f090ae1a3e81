//! The plugin registration facade.
//!
//! A program accepts a named set of extension objects exactly once; from
//! then on the set is frozen and read-only. Plugins are looked up by name
//! and downcast by the caller to their concrete type.

use log::warn;
use std::any::Any;
use std::fmt;

/// An extension object attached to a program.
pub trait Plugin: Any {
    /// The name the plugin is registered and looked up under.
    fn name(&self) -> &str;

    /// Upcast for caller-side downcasting to the concrete plugin type.
    fn as_any(&self) -> &dyn Any;
}

/// A frozen name-to-plugin mapping.
///
/// Built once from an iterator of plugins; immutable thereafter. Iteration
/// follows insertion order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// Build a registry from `plugins`.
    ///
    /// If two plugins carry the same name, the first registration wins and
    /// the duplicate is dropped.
    pub fn new(plugins: impl IntoIterator<Item = Box<dyn Plugin>>) -> Self {
        let mut registry = PluginRegistry { plugins: vec![] };
        for plugin in plugins {
            if registry.get(plugin.name()).is_some() {
                warn!("ignoring duplicate plugin registration `{}`", plugin.name());
                continue;
            }
            registry.plugins.push(plugin);
        }
        registry
    }

    /// Look a plugin up by its registered name.
    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.name() == name)
            .map(|plugin| &**plugin)
    }

    /// The registered plugin names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|plugin| plugin.name())
    }

    /// The registered plugins, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|plugin| &**plugin)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct CounterPlugin {
        name: String,
        count: u32,
    }

    impl Plugin for CounterPlugin {
        fn name(&self) -> &str {
            &self.name
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn counter(name: &str, count: u32) -> Box<dyn Plugin> {
        Box::new(CounterPlugin {
            name: name.to_owned(),
            count,
        })
    }

    #[test]
    fn lookup_by_name() {
        let registry = PluginRegistry::new(vec![counter("lines", 3), counter("stats", 8)]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("lines").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn downcast_to_concrete_type() {
        let registry = PluginRegistry::new(vec![counter("stats", 8)]);
        let plugin = registry.get("stats").unwrap();
        let concrete = plugin.as_any().downcast_ref::<CounterPlugin>().unwrap();
        assert_eq!(concrete.count, 8);
    }

    #[test]
    fn first_registration_wins() {
        let registry = PluginRegistry::new(vec![counter("stats", 1), counter("stats", 2)]);
        assert_eq!(registry.len(), 1);
        let concrete = registry
            .get("stats")
            .unwrap()
            .as_any()
            .downcast_ref::<CounterPlugin>()
            .unwrap();
        assert_eq!(concrete.count, 1);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let registry = PluginRegistry::new(vec![counter("b", 0), counter("a", 0)]);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
