//! Namespaces: named symbol tables with per-symbol visibility.
//!
//! A namespace is filled by whatever loads code into the process. The
//! boundary only rewrites the [`Visibility`] of symbols it did not create,
//! and answers the three ways outside code can reach them:
//!
//! - [`Namespace::constants`]: enumeration of externally visible names.
//! - [`Namespace::reference`]: a direct qualified reference (`Ns::Name`).
//! - [`Namespace::const_get`]: a generic by-name lookup.
//!
//! Code living inside the namespace uses [`Namespace::inner`], which ignores
//! visibility.

use crate::callable::{ActionType, Callable};
use crate::facade::Facade;
use crate::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Separator between segments of a qualified name.
pub const SEPARATOR: &str = "::";

/// Whether a symbol can be reached from outside its namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// What a symbol refers to.
#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// A callable action type.
    Action(ActionType),
    /// A plain value, e.g. a version string.
    Constant(Value),
    /// A nested namespace.
    Namespace(Namespace),
    /// The namespace's facade.
    Facade(Facade),
}

/// A named entry in a namespace.
#[derive(Debug, Clone)]
pub struct Symbol {
    kind: SymbolKind,
    visibility: Visibility,
}

impl Symbol {
    fn new(kind: SymbolKind) -> Self {
        Self {
            kind,
            visibility: Visibility::Public,
        }
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn as_action(&self) -> Option<ActionType> {
        match &self.kind {
            SymbolKind::Action(action) => Some(*action),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match &self.kind {
            SymbolKind::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&Namespace> {
        match &self.kind {
            SymbolKind::Namespace(namespace) => Some(namespace),
            _ => None,
        }
    }

    pub fn as_facade(&self) -> Option<&Facade> {
        match &self.kind {
            SymbolKind::Facade(facade) => Some(facade),
            _ => None,
        }
    }

    pub(crate) fn kind_mut(&mut self) -> &mut SymbolKind {
        &mut self.kind
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
}

/// A named container of symbols.
#[derive(Debug, Clone)]
pub struct Namespace {
    path: String,
    symbols: BTreeMap<String, Symbol>,
    guarded: bool,
}

impl Namespace {
    /// Create an empty namespace at the qualified `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            symbols: BTreeMap::new(),
            guarded: false,
        }
    }

    /// Qualified name, e.g. `Payments::Actions`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Qualified name of a symbol declared here.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}{SEPARATOR}{name}", self.path)
    }

    /// Declare `name`, replacing any previous symbol of that name.
    ///
    /// New symbols are public until the namespace is privatized again.
    pub fn define(&mut self, name: impl Into<String>, kind: SymbolKind) -> Option<Symbol> {
        self.symbols.insert(name.into(), Symbol::new(kind))
    }

    /// Remove `name`, returning its symbol.
    pub fn undefine(&mut self, name: &str) -> Option<Symbol> {
        self.symbols.remove(name)
    }

    /// Declare the callable type `T` under `name`.
    pub fn with_action<T: Callable>(mut self, name: impl Into<String>) -> Self {
        self.define(name, SymbolKind::Action(ActionType::of::<T>()));
        self
    }

    /// Declare a constant value under `name`.
    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.define(name, SymbolKind::Constant(value.into()));
        self
    }

    /// Declare a nested namespace under `name`, filled in by `build`.
    pub fn with_namespace(
        mut self,
        name: impl Into<String>,
        build: impl FnOnce(Namespace) -> Namespace,
    ) -> Self {
        let name = name.into();
        let nested = build(Namespace::new(self.qualify(&name)));
        self.define(name, SymbolKind::Namespace(nested));
        self
    }

    /// Externally visible names, in sorted order.
    pub fn constants(&self) -> Vec<&str> {
        self.symbols
            .iter()
            .filter(|(_, symbol)| symbol.is_public())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Resolve a direct qualified reference from outside the namespace.
    pub fn reference(&self, name: &str) -> Result<&Symbol> {
        let symbol = self.symbols.get(name).ok_or_else(|| self.undefined(name))?;
        if symbol.is_public() {
            Ok(symbol)
        } else {
            Err(self.rejected(name))
        }
    }

    /// Generic by-name lookup from outside the namespace.
    ///
    /// Once guarded, only names returned by [`Namespace::constants`] resolve.
    /// Unguarded, hidden symbols still resolve here. `name` may itself be
    /// qualified (`Actions::DoSomething`); each segment is looked up the same
    /// way on the namespace it lands in.
    pub fn const_get(&self, name: &str) -> Result<&Symbol> {
        let (head, rest) = match name.split_once(SEPARATOR) {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };

        let visible = self.symbols.get(head).is_some_and(Symbol::is_public);
        if self.guarded && !visible {
            return Err(self.rejected(head));
        }
        let symbol = self.symbols.get(head).ok_or_else(|| self.undefined(head))?;

        match rest {
            None => Ok(symbol),
            Some(rest) => match symbol.as_namespace() {
                Some(nested) => nested.const_get(rest),
                None => Err(Error::UndefinedSymbol {
                    namespace: self.qualify(head),
                    name: rest.to_string(),
                }),
            },
        }
    }

    /// Lookup from code inside the namespace; visibility does not apply.
    pub fn inner(&self, name: &str) -> Result<&Symbol> {
        self.symbols.get(name).ok_or_else(|| self.undefined(name))
    }

    /// Whether by-name lookup is restricted to visible symbols.
    pub fn is_guarded(&self) -> bool {
        self.guarded
    }

    /// Whether a facade has been declared here.
    pub fn is_bounded(&self) -> bool {
        self.symbols.values().any(|symbol| symbol.as_facade().is_some())
    }

    /// Names of every declared symbol, hidden or not.
    pub fn declared(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub(crate) fn symbols_mut(&mut self) -> impl Iterator<Item = (&String, &mut Symbol)> {
        self.symbols.iter_mut()
    }

    #[cfg(test)]
    pub(crate) fn symbol_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.get_mut(name)
    }

    pub(crate) fn set_guarded(&mut self, guarded: bool) {
        self.guarded = guarded;
    }

    fn undefined(&self, name: &str) -> Error {
        Error::UndefinedSymbol {
            namespace: self.path.clone(),
            name: name.to_string(),
        }
    }

    pub(crate) fn rejected(&self, name: &str) -> Error {
        tracing::trace!(namespace = %self.path, symbol = name, "rejected lookup across boundary");
        Error::SymbolNotFound {
            namespace: self.path.clone(),
            name: name.to_string(),
        }
    }
}
