//! Handler invocation for matched routes.
//!
//! The router resolves *which* handler a request maps to; the dispatcher
//! resolves *how* to run it. Opaque callables are invoked directly.
//! Structured `"Type::method"` references go through a factory registry:
//! user code registers one factory per controller type name, the factory
//! constructs a fresh controller from the construction arguments, and the
//! referenced method is called with the (re-ordered) captured parameters.

use crate::error::RouterError;
use crate::route::Handler;
use crate::router::RouteMatch;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A user controller type reachable through `"Type::method"` handler
/// references.
///
/// `call` dispatches on the method name from the reference; captured
/// parameters arrive as strings, in the order the reference asked for.
/// Whatever `call` returns (or panics with) propagates to the caller
/// untouched.
pub trait Controller: Send + Sync {
    fn call(&self, method_name: &str, params: &[String]) -> Value;
}

/// Constructs one controller instance per invocation from the construction
/// arguments passed to [`Dispatcher::run`].
pub type ControllerFactory = dyn Fn(&[Value]) -> Box<dyn Controller> + Send + Sync;

/// Registry of controller factories keyed by type name.
#[derive(Default)]
pub struct Dispatcher {
    factories: HashMap<String, Arc<ControllerFactory>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Bind a controller factory to `type_name`. Registering the same name
    /// again replaces the factory.
    pub fn register<F>(&mut self, type_name: &str, factory: F)
    where
        F: Fn(&[Value]) -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.factories.insert(type_name.to_string(), Arc::new(factory));
    }

    /// Invoke the matched route's handler.
    ///
    /// For a closure handler, calls it with the captured parameters and
    /// `construct_args`. For a `"Type::method"` reference, looks up the
    /// factory (`UnknownController` if the type was never registered),
    /// constructs a controller from `construct_args`, and calls the
    /// referenced method with the captured parameters.
    pub fn run(&self, matched: &RouteMatch, construct_args: &[Value]) -> Result<Value, RouterError> {
        match matched.route.handler() {
            Handler::Func(func) => Ok(func(&matched.params, construct_args)),
            Handler::Method(reference) => {
                let factory = self.factories.get(&reference.type_name).ok_or_else(|| {
                    RouterError::UnknownController {
                        type_name: reference.type_name.clone(),
                    }
                })?;
                debug!(
                    type_name = %reference.type_name,
                    method_name = %reference.method_name,
                    "dispatching controller method"
                );
                let controller = factory(construct_args);
                Ok(controller.call(&reference.method_name, &matched.params))
            }
        }
    }
}
