//! Boundary configuration and its freeze lifecycle.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Settings controlling enforcement, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Namespaces (or their facades' qualified paths) permitted to install enforcement.
    pub defined_namespaces: BTreeSet<String>,

    /// Restrict generic by-name lookup to the facade, not just enumeration.
    pub const_get_receive_only_public_constants: bool,

    /// Acceptable simple names for a facade.
    pub allowed_class_names_for_facade: Vec<String>,

    /// Registration methods available inside a facade declaration.
    pub callable_dsl_methods: Vec<String>,

    /// Reserved.
    pub classable_dsl_methods: Vec<String>,

    /// Reserved.
    pub forbid_monkey_patching: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            defined_namespaces: BTreeSet::new(),
            const_get_receive_only_public_constants: true,
            allowed_class_names_for_facade: vec!["Facade".to_string()],
            callable_dsl_methods: vec!["has_use_case".to_string()],
            classable_dsl_methods: vec!["has_contract".to_string()],
            forbid_monkey_patching: true,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse settings from TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Whether `name` is an acceptable simple name for a facade.
    pub fn allows_facade_name(&self, name: &str) -> bool {
        self.allowed_class_names_for_facade.iter().any(|n| n == name)
    }

    /// Whether a facade at `facade_path` inside `namespace` is whitelisted.
    ///
    /// Entries may name either the namespace or the facade itself.
    pub fn permits(&self, namespace: &str, facade_path: &str) -> bool {
        self.defined_namespaces.contains(namespace)
            || self.defined_namespaces.contains(facade_path)
    }

    /// Whether `method` is one of the registration methods of the use-case DSL.
    pub fn is_callable_dsl_method(&self, method: &str) -> bool {
        self.callable_dsl_methods.iter().any(|m| m == method)
    }
}

/// Write-once holder of the active [`Settings`].
///
/// Starts with defaults and unfrozen. [`Configuration::configure`] applies one
/// mutation and freezes; every later attempt fails with
/// [`Error::FrozenConfiguration`]. Readers get a shared immutable snapshot.
#[derive(Debug, Default)]
pub struct Configuration {
    settings: Arc<Settings>,
    frozen: bool,
}

impl Configuration {
    /// Create an unfrozen configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `mutator` to a copy of the settings, install it and freeze.
    pub fn configure(&mut self, mutator: impl FnOnce(&mut Settings)) -> Result<()> {
        if self.frozen {
            return Err(Error::FrozenConfiguration);
        }
        let mut settings = Settings::clone(&self.settings);
        mutator(&mut settings);
        self.install(settings);
        Ok(())
    }

    /// Install a complete settings value (e.g. loaded from a file) and freeze.
    pub fn configure_with(&mut self, settings: Settings) -> Result<()> {
        self.configure(|current| *current = settings)
    }

    /// The active settings snapshot.
    pub fn current(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn install(&mut self, settings: Settings) {
        self.settings = Arc::new(settings);
        self.frozen = true;
    }
}
