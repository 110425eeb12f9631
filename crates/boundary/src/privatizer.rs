//! Privatization of a namespace behind its facade.

use crate::config::Settings;
use crate::namespace::{Namespace, SymbolKind, Visibility};
use crate::{Error, Result};

/// Hides everything in a namespace except its facade.
///
/// Applying is idempotent: the visible set is recomputed from the symbols
/// currently declared, so running it again after a reload also hides
/// symbols added since the last pass.
#[derive(Debug, Clone, Copy)]
pub struct Privatizer<'a> {
    settings: &'a Settings,
    enforce_whitelist: bool,
}

impl<'a> Privatizer<'a> {
    /// `enforce_whitelist` should be true once the configuration is frozen.
    pub fn new(settings: &'a Settings, enforce_whitelist: bool) -> Self {
        Self {
            settings,
            enforce_whitelist,
        }
    }

    /// Check that `facade` may bound `namespace`, without touching it.
    pub fn validate(&self, namespace: &Namespace, facade: &str) -> Result<()> {
        if !self.settings.allows_facade_name(facade) {
            return Err(Error::WrongFacadeClassName {
                name: facade.to_string(),
                allowed: self.settings.allowed_class_names_for_facade.clone(),
            });
        }

        let facade_path = namespace.qualify(facade);
        if self.enforce_whitelist && !self.settings.permits(namespace.path(), &facade_path) {
            return Err(Error::WrongNamespace {
                namespace: namespace.path().to_string(),
            });
        }

        Ok(())
    }

    /// Make every symbol of `namespace` except `facade` unreachable from outside.
    pub fn apply(&self, namespace: &mut Namespace, facade: &str) -> Result<()> {
        self.validate(namespace, facade)?;

        let mut hidden = 0usize;
        for (name, symbol) in namespace.symbols_mut() {
            if name.eq_ignore_ascii_case(facade) {
                symbol.set_visibility(Visibility::Public);
                if let SymbolKind::Facade(f) = symbol.kind_mut() {
                    f.privatize_constructor();
                }
            } else {
                symbol.set_visibility(Visibility::Private);
                hidden += 1;
            }
        }

        let guarded = self.settings.const_get_receive_only_public_constants;
        namespace.set_guarded(guarded);

        tracing::debug!(
            namespace = namespace.path(),
            facade,
            hidden,
            guarded,
            "privatized namespace"
        );
        Ok(())
    }
}
