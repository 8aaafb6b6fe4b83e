//! Route storage and handler references.

use crate::error::RouterError;
use crate::placeholders::Placeholders;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Opaque handler callable: receives the captured parameters (already
/// re-ordered when the route's reference asks for it) and the construction
/// arguments the caller passed to [`crate::Dispatcher::run`].
pub type HandlerFn = dyn Fn(&[String], &[Value]) -> Value + Send + Sync;

/// What a route invokes when it matches.
///
/// Either an opaque callable or a structured controller-method reference.
/// String references are parsed and validated once, at registration time,
/// never per match.
#[derive(Clone)]
pub enum Handler {
    /// Closure invoked directly with the captured parameters.
    Func(Arc<HandlerFn>),
    /// Controller method resolved through the dispatcher's factory registry.
    Method(MethodRef),
}

impl Handler {
    /// Wrap a closure as a handler.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&[String], &[Value]) -> Value + Send + Sync + 'static,
    {
        Handler::Func(Arc::new(f))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Func(_) => f.write_str("Handler::Func(..)"),
            Handler::Method(reference) => write!(f, "Handler::Method({:?})", reference),
        }
    }
}

/// Parsed controller-method reference.
///
/// The wire format is `"Type::method"`, optionally suffixed with
/// `"/i/j/k"` — a 0-based re-ordering applied to the captured parameters
/// before the call. Duplicate indices are allowed and duplicate the value;
/// an index past the capture count is reported when captures are bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    pub type_name: String,
    pub method_name: String,
    pub param_order: Option<Vec<usize>>,
}

impl MethodRef {
    /// Parse a `"Type::method/i/j"` reference string.
    pub fn parse(reference: &str) -> Result<Self, RouterError> {
        let malformed = |reason: &str| RouterError::InvalidHandler {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };
        let (type_name, rest) = reference
            .split_once("::")
            .ok_or_else(|| malformed("missing `::` separator"))?;
        if type_name.is_empty() {
            return Err(malformed("empty type name"));
        }
        let (method_name, order) = match rest.split_once('/') {
            Some((method_name, order)) => (method_name, Some(order)),
            None => (rest, None),
        };
        if method_name.is_empty() {
            return Err(malformed("empty method name"));
        }
        let param_order = match order {
            Some(order) => {
                let mut indices = Vec::new();
                for part in order.split('/') {
                    let index = part
                        .parse::<usize>()
                        .map_err(|_| malformed("parameter order segments must be 0-based integers"))?;
                    indices.push(index);
                }
                Some(indices)
            }
            None => None,
        };
        Ok(Self {
            type_name: type_name.to_string(),
            method_name: method_name.to_string(),
            param_order,
        })
    }
}

/// Fallible conversion into a [`Handler`], so registration validates handler
/// references up front instead of parsing them per match.
pub trait IntoHandler {
    fn into_handler(self) -> Result<Handler, RouterError>;
}

impl IntoHandler for Handler {
    fn into_handler(self) -> Result<Handler, RouterError> {
        Ok(self)
    }
}

impl IntoHandler for MethodRef {
    fn into_handler(self) -> Result<Handler, RouterError> {
        Ok(Handler::Method(self))
    }
}

impl IntoHandler for &str {
    fn into_handler(self) -> Result<Handler, RouterError> {
        Ok(Handler::Method(MethodRef::parse(self)?))
    }
}

impl IntoHandler for String {
    fn into_handler(self) -> Result<Handler, RouterError> {
        self.as_str().into_handler()
    }
}

/// One templated path bound to a handler.
///
/// Immutable once its collection has been sealed into the router; captured
/// parameters live on the per-match [`crate::RouteMatch`] value, never here.
pub struct Route {
    path: String,
    handler: Handler,
    name: Option<String>,
    placeholders: Arc<Placeholders>,
}

impl Route {
    pub(crate) fn new(path: &str, handler: Handler, placeholders: Arc<Placeholders>) -> Self {
        Self {
            path: normalize_path(path),
            handler,
            name: None,
            placeholders,
        }
    }

    /// The raw path template, tokens unresolved.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    pub(crate) fn set_path(&mut self, path: String) {
        self.path = path;
    }

    /// Generate a concrete path from the template by filling its tokens with
    /// `values`, validated against the shared placeholder registry.
    pub fn fill_path(&self, values: &[&dyn fmt::Display]) -> Result<String, RouterError> {
        self.placeholders.fill(&self.path, values)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Normalize to exactly one leading `/` and no trailing `/`; the empty path
/// collapses to the root `/`.
pub(crate) fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}
