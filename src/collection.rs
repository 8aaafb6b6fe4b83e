//! Registration-time route collection builder.

use crate::error::RouterError;
use crate::placeholders::Placeholders;
use crate::route::{normalize_path, IntoHandler, Route};
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;

/// Handle to a route inside its collection's arena.
///
/// Ids stay valid for the lifetime of the collection, including across
/// [`RouteCollection::group`] calls, so nested groups can keep re-prefixing
/// the same routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(pub(crate) usize);

/// A set of routes scoped to one base-URL template, organized by HTTP
/// method.
///
/// Collections only exist during registration: [`crate::Router::serve`]
/// passes one by mutable reference into the configure closure, then seals it.
/// Routes are appended in call order, and that order is the match-priority
/// order within each method bucket.
pub struct RouteCollection {
    base_template: String,
    routes: Vec<Route>,
    by_method: HashMap<Method, Vec<RouteId>>,
    placeholders: Arc<Placeholders>,
}

impl RouteCollection {
    pub(crate) fn new(base_template: &str, placeholders: Arc<Placeholders>) -> Self {
        Self {
            base_template: base_template.to_string(),
            routes: Vec::new(),
            by_method: HashMap::new(),
            placeholders,
        }
    }

    /// The scheme/host/port template this collection is scoped to.
    pub fn base_template(&self) -> &str {
        &self.base_template
    }

    /// Register a route for `method`.
    ///
    /// The path is normalized to a single leading `/` with no trailing `/`
    /// (the empty path becomes the root `/`). The handler is converted — and
    /// string references parsed and validated — before anything is stored.
    pub fn register<H: IntoHandler>(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteId, RouterError> {
        let handler = handler.into_handler()?;
        let mut route = Route::new(path, handler, Arc::clone(&self.placeholders));
        if let Some(name) = name {
            route.set_name(name);
        }
        let id = RouteId(self.routes.len());
        self.routes.push(route);
        self.by_method.entry(method).or_default().push(id);
        Ok(id)
    }

    pub fn get<H: IntoHandler>(
        &mut self,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteId, RouterError> {
        self.register(Method::GET, path, handler, name)
    }

    pub fn post<H: IntoHandler>(
        &mut self,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteId, RouterError> {
        self.register(Method::POST, path, handler, name)
    }

    pub fn put<H: IntoHandler>(
        &mut self,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteId, RouterError> {
        self.register(Method::PUT, path, handler, name)
    }

    pub fn patch<H: IntoHandler>(
        &mut self,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteId, RouterError> {
        self.register(Method::PATCH, path, handler, name)
    }

    pub fn delete<H: IntoHandler>(
        &mut self,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteId, RouterError> {
        self.register(Method::DELETE, path, handler, name)
    }

    pub fn head<H: IntoHandler>(
        &mut self,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteId, RouterError> {
        self.register(Method::HEAD, path, handler, name)
    }

    pub fn options<H: IntoHandler>(
        &mut self,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteId, RouterError> {
        self.register(Method::OPTIONS, path, handler, name)
    }

    /// Name a registered route. The router folds names into its flat index
    /// when the collection is sealed.
    pub fn set_name(&mut self, id: RouteId, name: &str) {
        if let Some(route) = self.routes.get_mut(id.0) {
            route.set_name(name);
        }
    }

    /// Prepend `prefix` to every listed route's path template, in place.
    ///
    /// Returns the ids it was given so nested compositions read naturally:
    /// an inner `group` call runs first chronologically, and its result can
    /// be spliced into an outer group's list, accumulating prefixes
    /// innermost-first. Route names are untouched.
    pub fn group(&mut self, prefix: &str, ids: &[RouteId]) -> Vec<RouteId> {
        for id in ids {
            if let Some(route) = self.routes.get_mut(id.0) {
                let prefixed = join_prefix(prefix, route.path());
                route.set_path(prefixed);
            }
        }
        ids.to_vec()
    }

    /// Borrow a registered route, e.g. to inspect its path mid-registration.
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id.0)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Route>, HashMap<Method, Vec<RouteId>>) {
        (self.base_template, self.routes, self.by_method)
    }
}

fn join_prefix(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let path = path.trim_matches('/');
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => normalize_path(path),
        (false, true) => format!("/{}", prefix),
        (false, false) => format!("/{}/{}", prefix, path),
    }
}
