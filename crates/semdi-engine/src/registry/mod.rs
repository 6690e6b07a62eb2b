//! Component registry
//!
//! Holds registered component definitions and module metadata. The registry
//! is mutable between registration and finalization; `finalize` runs
//! parameter and constructor-argument inheritance across all components and
//! freezes the component map. Every registration call after that fails with
//! `RegistryFrozen`.

mod inheritance;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result};

#[derive(Default)]
struct RegistryState {
    components: HashMap<String, ResourceId>,
    modules: Vec<ResourceId>,
    frozen: bool,
}

/// Mutable-then-frozen component state
///
/// Owned by the manager; the preprocessor chain and the pool receive it
/// only after finalization and treat it as read-only.
pub struct ComponentRegistry {
    graph: Arc<ResourceGraph>,
    state: RwLock<RegistryState>,
}

impl ComponentRegistry {
    /// Create an empty registry over a resource graph
    pub fn new(graph: Arc<ResourceGraph>) -> Self {
        Self {
            graph,
            state: RwLock::new(RegistryState::default()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register one module resource
    ///
    /// Each contained component gets its `module` back-reference set and is
    /// inserted under its IRI.
    ///
    /// # Errors
    /// - `RegistryFrozen` after finalization
    /// - `InvalidComponent` when a contained component is not typed
    ///   `AbstractClass`, `Class` or `ComponentInstance`; the component map
    ///   is left untouched in that case
    pub fn register_module(&self, module: ResourceId) -> Result<()> {
        let mut state = self.write();
        if state.frozen {
            return Err(Error::registry_frozen("register_module"));
        }

        let components = self.graph.property_values(module, vocab::COMPONENTS);
        for &component in &components {
            if !self.is_component_type(component) {
                let types = self
                    .graph
                    .property_values(component, vocab::rdf::TYPE)
                    .into_iter()
                    .map(|t| self.graph.value(t))
                    .collect();
                return Err(Error::invalid_component(self.graph.value(component), types));
            }
        }

        for &component in &components {
            self.graph
                .set_property(component, vocab::MODULE_PROP, vec![module]);
            state
                .components
                .insert(self.graph.value(component), component);
        }
        state.modules.push(module);

        info!(
            module = %self.graph.value(module),
            components = components.len(),
            "registered module"
        );
        Ok(())
    }

    /// Register every resource typed `Module` in the graph
    ///
    /// # Returns
    /// The number of modules registered
    pub fn register_modules_from_graph(&self) -> Result<usize> {
        let modules = self.graph.resources_of_type(vocab::MODULE);
        for &module in &modules {
            self.register_module(module)?;
        }
        Ok(modules.len())
    }

    /// Run inheritance across all components and freeze the registry
    ///
    /// # Errors
    /// - `RegistryFrozen` when already finalized; use
    ///   [`ensure_finalized`](Self::ensure_finalized) for idempotent callers
    /// - inheritance errors (`InvalidConstructorArguments`,
    ///   `MalformedObjectMapping`) from malformed declarations
    pub fn finalize(&self) -> Result<()> {
        let mut state = self.write();
        if state.frozen {
            return Err(Error::registry_frozen("finalize"));
        }
        inheritance::apply(&self.graph, &state.components)?;
        state.frozen = true;
        debug!(components = state.components.len(), "registry finalized");
        Ok(())
    }

    /// Finalize unless already frozen
    pub fn ensure_finalized(&self) -> Result<()> {
        if self.is_frozen() {
            return Ok(());
        }
        self.finalize()
    }

    /// Whether the registry has been finalized
    pub fn is_frozen(&self) -> bool {
        self.read().frozen
    }

    /// Look up a registered component by IRI
    pub fn component(&self, iri: &str) -> Option<ResourceId> {
        self.read().components.get(iri).copied()
    }

    /// Whether an IRI names a registered component
    pub fn is_registered(&self, iri: &str) -> bool {
        self.read().components.contains_key(iri)
    }

    /// Number of registered components
    pub fn component_count(&self) -> usize {
        self.read().components.len()
    }

    /// Number of registered modules
    pub fn module_count(&self) -> usize {
        self.read().modules.len()
    }

    /// The graph this registry reads from
    pub fn graph(&self) -> &Arc<ResourceGraph> {
        &self.graph
    }

    fn is_component_type(&self, component: ResourceId) -> bool {
        self.graph.is_a(component, vocab::ABSTRACT_CLASS)
            || self.graph.is_a(component, vocab::CLASS)
            || self.graph.is_a(component, vocab::COMPONENT_INSTANCE)
    }
}
