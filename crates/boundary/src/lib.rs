//! Facade-only boundaries for namespaces.
//!
//! Core principle: **a bounded namespace is reachable only through its facade.**
//!
//! A namespace may declare one facade. Every other symbol it declares becomes
//! unreachable from outside, both through direct qualified references and
//! through generic by-name lookup, while code inside the namespace keeps
//! using it freely. The facade publishes internal actions as operations
//! without exposing the types that implement them.
//!
//! # Overview
//!
//! - [`Boundary`] is the entry point. It owns the [`Configuration`] and the
//!   [`Registry`] of loaded namespaces.
//! - [`Settings`] are configured once through [`Boundary::initialize`] and
//!   frozen for the rest of the process.
//! - [`Privatizer`] hides every non-facade symbol of a namespace.
//! - [`FacadeDsl`] registers use cases while a facade is declared.
//! - [`Callable`] is the shape of every action a facade forwards to.
//!
//! # Example
//!
//! ```
//! use boundary::{ActionType, Args, Boundary, Callable, Namespace, Result, argument};
//! use serde_json::{Value, json};
//!
//! struct DoSomething {
//!     input: String,
//! }
//!
//! impl Callable for DoSomething {
//!     fn new(args: Args) -> Result<Self> {
//!         Ok(Self { input: argument(&args, 0)? })
//!     }
//!
//!     fn call(&self) -> Result<Value> {
//!         Ok(json!(format!("{} & subaction", self.input)))
//!     }
//! }
//!
//! let mut boundary = Boundary::new();
//! boundary.define(Namespace::new("MyNamespace").with_action::<DoSomething>("DoSomething"));
//! boundary.declare_facade("MyNamespace", "Facade", |dsl| {
//!     dsl.has_use_case("do_something", ActionType::of::<DoSomething>())?;
//!     Ok(())
//! })?;
//! boundary.initialize(|config| {
//!     config.defined_namespaces.insert("MyNamespace::Facade".into());
//! })?;
//!
//! let result = boundary.call("MyNamespace::Facade", "do_something", vec![json!("action")])?;
//! assert_eq!(result, json!("action & subaction"));
//!
//! let err = boundary.resolve("MyNamespace::DoSomething").unwrap_err();
//! assert_eq!(err.to_string(), "private constant MyNamespace::DoSomething referenced");
//! # Ok::<(), boundary::Error>(())
//! ```

mod boundary;
mod callable;
mod config;
mod error;
mod facade;
mod namespace;
mod privatizer;
mod registry;

pub use boundary::Boundary;
pub use callable::{ActionType, Args, Callable, argument};
pub use config::{Configuration, Settings};
pub use error::{Error, Result};
pub use facade::{CONSTRUCTOR, Facade, FacadeDsl};
pub use namespace::{Namespace, SEPARATOR, Symbol, SymbolKind, Visibility};
pub use privatizer::Privatizer;
pub use registry::Registry;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
