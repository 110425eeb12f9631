//! Registry of loaded namespaces.

use crate::facade::Facade;
use crate::namespace::{Namespace, SEPARATOR, Symbol};
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Every namespace the loader has defined, keyed by qualified path.
#[derive(Debug, Default)]
pub struct Registry {
    namespaces: BTreeMap<String, Namespace>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a namespace, returning the previous definition.
    pub fn define(&mut self, namespace: Namespace) -> Option<Namespace> {
        self.namespaces.insert(namespace.path().to_string(), namespace)
    }

    /// Remove a namespace.
    pub fn undefine(&mut self, path: &str) -> Option<Namespace> {
        self.namespaces.remove(path)
    }

    /// A registered namespace, viewed from inside.
    pub fn get(&self, path: &str) -> Option<&Namespace> {
        self.namespaces.get(path)
    }

    pub(crate) fn get_mut(&mut self, path: &str) -> Result<&mut Namespace> {
        self.namespaces
            .get_mut(path)
            .ok_or_else(|| Error::UndefinedNamespace {
                path: path.to_string(),
            })
    }

    /// Paths of all registered namespaces.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Resolve a qualified reference such as `Payments::Actions::DoSomething`
    /// from outside, segment by segment.
    ///
    /// The longest registered prefix is the starting namespace; each further
    /// segment is a direct reference, so a hidden segment fails with
    /// [`Error::SymbolNotFound`] naming that segment. Registered ancestors of
    /// the starting namespace are checked first, outermost to innermost.
    pub fn resolve(&self, path: &str) -> Result<&Symbol> {
        let (namespace, rest) = self.split(path)?;
        self.check_ancestors(namespace.path())?;

        let mut segments = rest.split(SEPARATOR);
        let first = segments.next().unwrap_or_default();
        let mut symbol = namespace.reference(first)?;
        let mut qualified = namespace.qualify(first);

        for segment in segments {
            let nested = symbol.as_namespace().ok_or_else(|| Error::UndefinedSymbol {
                namespace: qualified.clone(),
                name: segment.to_string(),
            })?;
            symbol = nested.reference(segment)?;
            qualified = nested.qualify(segment);
        }

        Ok(symbol)
    }

    /// Resolve a qualified reference that must name a facade.
    pub fn facade(&self, path: &str) -> Result<&Facade> {
        self.resolve(path)?
            .as_facade()
            .ok_or_else(|| Error::NotAFacade {
                path: path.to_string(),
            })
    }

    /// A namespace registered under its own path is still declared inside
    /// every registered ancestor. Each ancestor must expose the next segment:
    /// a hidden symbol is rejected, and so is a segment a bounded ancestor
    /// does not declare at all.
    fn check_ancestors(&self, path: &str) -> Result<()> {
        for (idx, _) in path.match_indices(SEPARATOR) {
            let Some(ancestor) = self.namespaces.get(&path[..idx]) else {
                continue;
            };
            let rest = &path[idx + SEPARATOR.len()..];
            let segment = rest.split(SEPARATOR).next().unwrap_or(rest);

            let exposed = match ancestor.inner(segment) {
                Ok(symbol) => symbol.is_public(),
                Err(_) => !ancestor.is_bounded(),
            };
            if !exposed {
                return Err(ancestor.rejected(segment));
            }
        }
        Ok(())
    }

    /// Split `path` into its longest registered namespace prefix and the remainder.
    fn split<'p>(&self, path: &'p str) -> Result<(&Namespace, &'p str)> {
        let mut end = path.len();
        while let Some(idx) = path[..end].rfind(SEPARATOR) {
            if let Some(namespace) = self.namespaces.get(&path[..idx]) {
                return Ok((namespace, &path[idx + SEPARATOR.len()..]));
            }
            end = idx;
        }

        Err(Error::UndefinedNamespace {
            path: path.split(SEPARATOR).next().unwrap_or(path).to_string(),
        })
    }
}
