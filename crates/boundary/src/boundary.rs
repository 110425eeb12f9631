//! Boundary entry point.

use crate::callable::Args;
use crate::config::{Configuration, Settings};
use crate::facade::{self, Facade, FacadeDsl};
use crate::namespace::{Namespace, SEPARATOR, Symbol, SymbolKind};
use crate::privatizer::Privatizer;
use crate::registry::Registry;
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// Owns the configuration and the loaded namespaces, and keeps every
/// bounded namespace privatized behind its facade.
///
/// The loader defines namespaces with [`Boundary::define`] and declares
/// their facades with [`Boundary::declare_facade`]. The host calls
/// [`Boundary::initialize`] once during startup.
#[derive(Debug, Default)]
pub struct Boundary {
    configuration: Configuration,
    registry: Registry,
}

impl Boundary {
    /// Create a boundary with default, unfrozen settings and no namespaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure once, freeze, then enforce every configured namespace that is
    /// already loaded.
    ///
    /// A second call fails with [`Error::FrozenConfiguration`].
    pub fn initialize(&mut self, mutator: impl FnOnce(&mut Settings)) -> Result<()> {
        self.configuration.configure(mutator)?;
        self.enforce_configured()
    }

    /// Like [`Boundary::initialize`], installing `settings` as a whole
    /// (e.g. from [`Settings::load`]).
    pub fn initialize_with(&mut self, settings: Settings) -> Result<()> {
        self.configuration.configure_with(settings)?;
        self.enforce_configured()
    }

    /// The active settings.
    pub fn settings(&self) -> Arc<Settings> {
        self.configuration.current()
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Define or replace a namespace's symbol set.
    ///
    /// The new definition is taken as-is: a fresh namespace has no facade
    /// until the loader declares it again, and a modified copy of a bounded
    /// namespace needs a [`Boundary::reload`] to hide what it added.
    pub fn define(&mut self, namespace: Namespace) {
        tracing::debug!(namespace = namespace.path(), "namespace defined");
        self.registry.define(namespace);
    }

    /// Add one symbol to a loaded namespace.
    ///
    /// The symbol stays public until the namespace is privatized again with
    /// [`Boundary::reload`].
    pub fn define_symbol(
        &mut self,
        namespace: &str,
        name: impl Into<String>,
        kind: SymbolKind,
    ) -> Result<()> {
        let namespace = self.registry.get_mut(namespace)?;
        let name = name.into();
        if let Some(facade) = namespace.inner(&name).ok().and_then(Symbol::as_facade) {
            return Err(facade.frozen());
        }
        namespace.define(name, kind);
        Ok(())
    }

    /// Remove one symbol from a loaded namespace. The facade cannot be removed.
    pub fn undefine_symbol(&mut self, namespace: &str, name: &str) -> Result<()> {
        let namespace = self.registry.get_mut(namespace)?;
        if let Some(facade) = namespace.inner(name).ok().and_then(Symbol::as_facade) {
            return Err(facade.frozen());
        }
        namespace
            .undefine(name)
            .map(|_| ())
            .ok_or_else(|| Error::UndefinedSymbol {
                namespace: namespace.path().to_string(),
                name: name.to_string(),
            })
    }

    /// Unload a namespace entirely.
    pub fn undefine(&mut self, namespace: &str) -> Option<Namespace> {
        tracing::debug!(namespace, "namespace undefined");
        self.registry.undefine(namespace)
    }

    /// Declare `name` as the facade of `namespace`.
    ///
    /// `body` receives the registration DSL. The facade is validated before
    /// the body runs; on success the namespace is privatized and the facade
    /// sealed. Declaring over an existing facade fails with
    /// [`Error::FrozenFacade`].
    pub fn declare_facade<F>(&mut self, namespace: &str, name: &str, body: F) -> Result<()>
    where
        F: FnOnce(&mut FacadeDsl<'_>) -> Result<()>,
    {
        let settings = self.configuration.current();
        let privatizer = Privatizer::new(&settings, self.configuration.is_frozen());
        let namespace = self.registry.get_mut(namespace)?;

        if let Ok(existing) = namespace.inner(name) {
            if let Some(existing) = existing.as_facade() {
                return Err(existing.frozen());
            }
        }
        privatizer.validate(namespace, name)?;

        let facade = facade::build(namespace, name, &settings, body)?;
        let operations = facade.operations().count();
        namespace.define(name, SymbolKind::Facade(facade));
        privatizer.apply(namespace, name)?;

        tracing::debug!(
            facade = %namespace.qualify(name),
            operations,
            "facade declared"
        );
        Ok(())
    }

    /// Re-run privatization after the loader redefined symbols of `namespace`.
    ///
    /// Without a declared facade there is nothing to enforce yet.
    pub fn reload(&mut self, namespace: &str) -> Result<()> {
        let settings = self.configuration.current();
        let privatizer = Privatizer::new(&settings, self.configuration.is_frozen());
        let namespace = self.registry.get_mut(namespace)?;

        match facade_name(namespace) {
            Some(name) => privatizer.apply(namespace, &name),
            None => {
                tracing::debug!(
                    namespace = namespace.path(),
                    "no facade declared, nothing to enforce"
                );
                Ok(())
            }
        }
    }

    /// Resolve a qualified reference from outside.
    pub fn resolve(&self, path: &str) -> Result<&Symbol> {
        self.registry.resolve(path)
    }

    /// The facade at the qualified `path`.
    pub fn facade(&self, path: &str) -> Result<&Facade> {
        self.registry.facade(path)
    }

    /// Call `operation` on the facade at `path`.
    pub fn call(&self, path: &str, operation: &str, args: Args) -> Result<Value> {
        self.facade(path)?.call(operation, args)
    }

    fn enforce_configured(&mut self) -> Result<()> {
        let settings = self.configuration.current();
        tracing::info!(
            namespaces = settings.defined_namespaces.len(),
            guarded = settings.const_get_receive_only_public_constants,
            "boundary initialized"
        );

        let privatizer = Privatizer::new(&settings, true);
        for entry in &settings.defined_namespaces {
            let Some((path, name)) = self.locate(entry) else {
                tracing::warn!(
                    %entry,
                    "configured namespace is not loaded, enforcing at facade declaration"
                );
                continue;
            };
            let namespace = self.registry.get_mut(&path)?;
            privatizer.apply(namespace, &name)?;
        }
        Ok(())
    }

    /// Find the namespace path and facade name a whitelist entry refers to.
    ///
    /// Entries name either the namespace or the facade.
    fn locate(&self, entry: &str) -> Option<(String, String)> {
        if let Some(namespace) = self.registry.get(entry) {
            return facade_name(namespace).map(|name| (entry.to_string(), name));
        }

        let (path, name) = entry.rsplit_once(SEPARATOR)?;
        let namespace = self.registry.get(path)?;
        namespace.inner(name).ok()?.as_facade()?;
        Some((path.to_string(), name.to_string()))
    }
}

fn facade_name(namespace: &Namespace) -> Option<String> {
    namespace.declared().find_map(|name| {
        let symbol = namespace.inner(name).ok()?;
        symbol.as_facade().map(|_| name.to_string())
    })
}
