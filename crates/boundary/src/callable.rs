//! Callable actions: single-operation types invoked through a facade.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Positional arguments passed through a facade operation.
pub type Args = Vec<Value>;

/// A unit of behavior with one operation.
///
/// Implementors construct themselves from arguments in [`Callable::new`] and
/// do their work in [`Callable::call`]. Facades only ever go through
/// [`Callable::invoke`], which does both.
pub trait Callable: Sized {
    /// Build an instance from the operation's arguments.
    fn new(args: Args) -> Result<Self>;

    /// Run the action.
    ///
    /// The default fails: every action must provide its own body.
    fn call(&self) -> Result<Value> {
        Err(Error::NotImplemented {
            type_name: short_type_name::<Self>().to_string(),
        })
    }

    /// Construct with `args` and immediately call.
    fn invoke(args: Args) -> Result<Value> {
        Self::new(args)?.call()
    }
}

/// Decode the positional argument at `index`.
pub fn argument<T: DeserializeOwned>(args: &[Value], index: usize) -> Result<T> {
    let value = args
        .get(index)
        .cloned()
        .ok_or_else(|| Error::InvalidArguments(format!("missing argument at position {index}")))?;
    Ok(serde_json::from_value(value)?)
}

/// Type-erased handle to a [`Callable`] type, stored in symbol tables and
/// facade operation tables.
#[derive(Clone, Copy)]
pub struct ActionType {
    name: &'static str,
    invoke: fn(Args) -> Result<Value>,
}

impl ActionType {
    /// Handle for the callable type `T`.
    pub fn of<T: Callable>() -> Self {
        Self {
            name: short_type_name::<T>(),
            invoke: T::invoke,
        }
    }

    /// Simple name of the implementing type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Construct the action with `args` and call it.
    pub fn invoke(&self, args: Args) -> Result<Value> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionType").field(&self.name).finish()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    // Strip the module path but leave generic parameters alone.
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
