//! Facades: the single public entry point of a bounded namespace.
//!
//! A facade is declared once, through [`FacadeDsl`]. Each registration
//! method named in [`Settings::callable_dsl_methods`] publishes an operation
//! that forwards to an internal [`Callable`](crate::Callable) action. When the
//! declaration returns, the operation table is sealed.

use crate::callable::{ActionType, Args};
use crate::config::Settings;
use crate::namespace::{Namespace, Symbol};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Name of the facade's constructor.
pub const CONSTRUCTOR: &str = "new";

/// A namespace's public entry point.
#[derive(Debug, Clone)]
pub struct Facade {
    path: String,
    name: String,
    operations: BTreeMap<String, ActionType>,
    private_operations: BTreeSet<String>,
    sealed: bool,
}

impl Facade {
    pub(crate) fn new(namespace: &Namespace, name: &str) -> Self {
        Self {
            path: namespace.qualify(name),
            name: name.to_string(),
            operations: BTreeMap::new(),
            private_operations: BTreeSet::new(),
            sealed: false,
        }
    }

    /// Qualified name, e.g. `MyNamespace::Facade`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Simple name, e.g. `Facade`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Public operation names.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Whether `operation` can be called from outside.
    pub fn responds_to(&self, operation: &str) -> bool {
        !self.private_operations.contains(operation) && self.operations.contains_key(operation)
    }

    /// Whether the constructor is closed to outside callers.
    pub fn is_constructor_private(&self) -> bool {
        self.private_operations.contains(CONSTRUCTOR)
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Call a public operation; the registered action's result is returned unchanged.
    pub fn call(&self, operation: &str, args: Args) -> Result<Value> {
        if self.private_operations.contains(operation) {
            return Err(Error::PrivateOperation {
                facade: self.path.clone(),
                operation: operation.to_string(),
            });
        }
        let action = self
            .operations
            .get(operation)
            .ok_or_else(|| Error::UndefinedOperation {
                facade: self.path.clone(),
                operation: operation.to_string(),
            })?;
        action.invoke(args)
    }

    /// Add or replace an operation. Fails once the facade is sealed.
    pub fn define_operation(
        &mut self,
        operation: impl Into<String>,
        action: ActionType,
    ) -> Result<()> {
        if self.sealed {
            return Err(self.frozen());
        }
        let operation = operation.into();
        if self.private_operations.contains(&operation) {
            return Err(Error::ReservedOperation {
                facade: self.path.clone(),
                operation,
            });
        }
        self.operations.insert(operation, action);
        Ok(())
    }

    pub(crate) fn privatize_constructor(&mut self) {
        self.private_operations.insert(CONSTRUCTOR.to_string());
    }

    pub(crate) fn privatize_operation(&mut self, operation: &str) {
        self.private_operations.insert(operation.to_string());
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    pub(crate) fn frozen(&self) -> Error {
        Error::FrozenFacade {
            facade: self.path.clone(),
        }
    }
}

/// Registration DSL available while a facade is being declared.
pub struct FacadeDsl<'a> {
    facade: String,
    namespace: &'a Namespace,
    settings: &'a Settings,
    operations: BTreeMap<String, ActionType>,
}

impl<'a> FacadeDsl<'a> {
    pub(crate) fn new(facade: String, namespace: &'a Namespace, settings: &'a Settings) -> Self {
        Self {
            facade,
            namespace,
            settings,
            operations: BTreeMap::new(),
        }
    }

    /// Publish `operation`, forwarding to `action`, via the registration method `method`.
    ///
    /// `method` must be one of the configured `callable_dsl_methods`.
    pub fn register(
        &mut self,
        method: &str,
        operation: impl Into<String>,
        action: ActionType,
    ) -> Result<&mut Self> {
        if !self.settings.is_callable_dsl_method(method) {
            return Err(Error::UndefinedOperation {
                facade: self.facade.clone(),
                operation: method.to_string(),
            });
        }
        let operation = operation.into();
        if operation == CONSTRUCTOR || self.settings.is_callable_dsl_method(&operation) {
            return Err(Error::ReservedOperation {
                facade: self.facade.clone(),
                operation,
            });
        }
        tracing::trace!(
            facade = %self.facade,
            %operation,
            action = action.name(),
            "registered use case"
        );
        self.operations.insert(operation, action);
        Ok(self)
    }

    /// Publish `operation`, forwarding to `action`.
    pub fn has_use_case(
        &mut self,
        operation: impl Into<String>,
        action: ActionType,
    ) -> Result<&mut Self> {
        self.register("has_use_case", operation, action)
    }

    /// Look up a symbol of the enclosing namespace, hidden or not.
    pub fn inner(&self, name: &str) -> Result<&'a Symbol> {
        self.namespace.inner(name)
    }

    /// The action type declared under `name` in the enclosing namespace.
    pub fn action(&self, name: &str) -> Result<ActionType> {
        self.inner(name)?.as_action().ok_or_else(|| {
            Error::InvalidArguments(format!(
                "{} is not a callable action",
                self.namespace.qualify(name)
            ))
        })
    }

    pub(crate) fn into_operations(self) -> BTreeMap<String, ActionType> {
        self.operations
    }
}

/// Build a sealed facade from a declaration body.
///
/// The body only sees the namespace read-only; installing the facade and
/// privatizing the namespace happen afterwards.
pub(crate) fn build<F>(
    namespace: &Namespace,
    name: &str,
    settings: &Settings,
    body: F,
) -> Result<Facade>
where
    F: FnOnce(&mut FacadeDsl<'_>) -> Result<()>,
{
    let mut facade = Facade::new(namespace, name);

    let mut dsl = FacadeDsl::new(facade.path.clone(), namespace, settings);
    body(&mut dsl)?;

    for (operation, action) in dsl.into_operations() {
        facade.define_operation(operation, action)?;
    }
    for method in &settings.callable_dsl_methods {
        facade.privatize_operation(method);
    }
    facade.seal();
    Ok(facade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::{Callable, argument};
    use serde_json::json;

    struct Echo(Value);

    impl Callable for Echo {
        fn new(args: Args) -> Result<Self> {
            Ok(Self(argument(&args, 0)?))
        }

        fn call(&self) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    fn namespace() -> Namespace {
        Namespace::new("Tools").with_action::<Echo>("Echo")
    }

    #[test]
    fn test_build_registers_use_cases() {
        let ns = namespace();
        let settings = Settings::default();
        let facade = build(&ns, "Facade", &settings, |dsl| {
            let echo = dsl.action("Echo")?;
            dsl.has_use_case("echo", echo)?;
            Ok(())
        })
        .unwrap();

        assert_eq!(facade.path(), "Tools::Facade");
        assert!(facade.is_sealed());
        assert!(facade.responds_to("echo"));
        assert_eq!(facade.call("echo", vec![json!([1, 2])]).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_dsl_methods_become_private() {
        let ns = namespace();
        let settings = Settings::default();
        let facade = build(&ns, "Facade", &settings, |_| Ok(())).unwrap();

        let err = facade.call("has_use_case", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::PrivateOperation { .. }));
        assert!(!facade.responds_to("has_use_case"));
    }

    #[test]
    fn test_unknown_operation() {
        let ns = namespace();
        let facade = build(&ns, "Facade", &Settings::default(), |_| Ok(())).unwrap();

        let err = facade.call("missing", Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "undefined operation `missing` for Tools::Facade");
    }

    #[test]
    fn test_sealed_facade_rejects_new_operations() {
        let ns = namespace();
        let mut facade = build(&ns, "Facade", &Settings::default(), |_| Ok(())).unwrap();

        let err = facade
            .define_operation("echo", ActionType::of::<Echo>())
            .unwrap_err();
        assert_eq!(err.to_string(), "can't modify frozen facade: Tools::Facade");
        assert!(!facade.responds_to("echo"));
    }

    #[test]
    fn test_configured_registration_method() {
        let ns = namespace();
        let settings = Settings {
            callable_dsl_methods: vec!["exposes".to_string()],
            ..Settings::default()
        };

        let err = build(&ns, "Facade", &settings, |dsl| {
            dsl.has_use_case("echo", ActionType::of::<Echo>())?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, Error::UndefinedOperation { .. }));

        let facade = build(&ns, "Facade", &settings, |dsl| {
            dsl.register("exposes", "echo", ActionType::of::<Echo>())?;
            Ok(())
        })
        .unwrap();
        assert!(facade.responds_to("echo"));
        assert!(matches!(
            facade.call("exposes", Vec::new()).unwrap_err(),
            Error::PrivateOperation { .. }
        ));
    }

    #[test]
    fn test_reserved_operation_names() {
        let ns = namespace();
        let err = build(&ns, "Facade", &Settings::default(), |dsl| {
            dsl.has_use_case(CONSTRUCTOR, ActionType::of::<Echo>())?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, Error::ReservedOperation { .. }));
    }

    #[test]
    fn test_action_lookup_rejects_constants() {
        let ns = namespace().with_constant("VERSION", "1");
        let err = build(&ns, "Facade", &Settings::default(), |dsl| {
            dsl.action("VERSION")?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }
}
