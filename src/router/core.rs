//! Router core — registration of services and the request-time match path.

use crate::collection::{RouteCollection, RouteId};
use crate::error::RouterError;
use crate::placeholders::Placeholders;
use crate::route::{Handler, MethodRef, Route};
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of captured parameters before heap allocation.
/// Route templates rarely carry more than a handful of placeholders.
pub const MAX_INLINE_CAPTURES: usize = 8;

/// Stack-allocated capture storage for the match path.
pub type CaptureVec = SmallVec<[String; MAX_INLINE_CAPTURES]>;

/// HTTP verbs accepted by [`Router::match_route`]. The check is an exact,
/// case-sensitive membership test.
const SUPPORTED_METHODS: [Method; 7] = [
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::PATCH,
    Method::POST,
    Method::PUT,
];

/// Result of successfully matching a request URL to a route.
///
/// Matching never mutates the matched [`Route`]; each match returns one of
/// these owned values instead, so a fully-registered router can serve
/// concurrent requests safely.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route.
    pub route: Arc<Route>,
    /// Path captures in template order, re-ordered when the route's handler
    /// reference carries an explicit parameter order.
    pub params: CaptureVec,
    /// Captures extracted from the authority (scheme/host/port) match, in
    /// capture order.
    pub base_params: CaptureVec,
}

/// One sealed `(base template, routes)` registration.
struct Service {
    base_template: String,
    routes: Vec<Arc<Route>>,
    by_method: HashMap<Method, Vec<RouteId>>,
}

/// Ordered registry of services plus the shared placeholder registry and the
/// flat name index.
///
/// Registration (`serve` and everything inside its configure closure) is
/// single-threaded and must complete before the first `match_route` call.
/// After that the router is read-only and can be shared across threads.
pub struct Router {
    services: Vec<Service>,
    placeholders: Arc<Placeholders>,
    named: HashMap<String, Arc<Route>>,
}

impl Router {
    /// Create a router with the default placeholder table installed.
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
            placeholders: Arc::new(Placeholders::new()),
            named: HashMap::new(),
        }
    }

    /// Register one service: a collection of routes scoped to
    /// `base_template` (a `scheme://host:port` pattern, placeholders
    /// allowed).
    ///
    /// The configure closure receives the collection builder and registers
    /// routes and groups into it. Services are matched strictly in
    /// registration order.
    pub fn serve<F>(&mut self, base_template: &str, configure: F) -> Result<(), RouterError>
    where
        F: FnOnce(&mut RouteCollection) -> Result<(), RouterError>,
    {
        self.serve_with(base_template, &[], configure)
    }

    /// Like [`Router::serve`], but merges `placeholders` into the shared
    /// registry first, so the collection's route templates can rely on them.
    pub fn serve_with<F>(
        &mut self,
        base_template: &str,
        placeholders: &[(&str, &str)],
        configure: F,
    ) -> Result<(), RouterError>
    where
        F: FnOnce(&mut RouteCollection) -> Result<(), RouterError>,
    {
        if !placeholders.is_empty() {
            self.placeholders.add_all(placeholders)?;
        }
        let mut collection = RouteCollection::new(base_template, Arc::clone(&self.placeholders));
        configure(&mut collection)?;

        let (base_template, routes, by_method) = collection.into_parts();
        let routes: Vec<Arc<Route>> = routes.into_iter().map(Arc::new).collect();
        for route in &routes {
            if let Some(name) = route.name() {
                let previous = self.named.insert(name.to_string(), Arc::clone(route));
                if previous.is_some() {
                    warn!(
                        route_name = %name,
                        path = %route.path(),
                        "duplicate route name overwrites earlier registration"
                    );
                }
            }
        }
        info!(
            base_template = %base_template,
            routes_count = routes.len(),
            "service registered"
        );
        self.services.push(Service {
            base_template,
            routes,
            by_method,
        });
        Ok(())
    }

    /// Register one placeholder on the shared registry.
    pub fn add_placeholder(&self, name: &str, fragment: &str) -> Result<(), RouterError> {
        self.placeholders.add(name, fragment)
    }

    /// Bulk-register placeholders on the shared registry.
    pub fn add_placeholders(&self, entries: &[(&str, &str)]) -> Result<(), RouterError> {
        self.placeholders.add_all(entries)
    }

    /// Ordered `{name}` → fragment view of the shared registry.
    pub fn placeholders(&self) -> Vec<(String, String)> {
        self.placeholders.all()
    }

    /// Substitute placeholder tokens in `template`; see
    /// [`Placeholders::substitute`].
    pub fn replace_placeholders(&self, template: &str, reverse: bool) -> String {
        self.placeholders.substitute(template, reverse)
    }

    /// Fill placeholder tokens in `template` with validated values; see
    /// [`Placeholders::fill`].
    pub fn fill_placeholders(
        &self,
        template: &str,
        values: &[&dyn fmt::Display],
    ) -> Result<String, RouterError> {
        self.placeholders.fill(template, values)
    }

    /// Look up a route by name. Returns `None` on a miss — an unknown name
    /// is not an error.
    pub fn named_route(&self, name: &str) -> Option<Arc<Route>> {
        self.named.get(name).cloned()
    }

    /// Every registered route as `(method, base template, path template)`,
    /// for debugging and route listings.
    pub fn routes(&self) -> Vec<(Method, String, String)> {
        let mut listing = Vec::new();
        for service in &self.services {
            for method in &SUPPORTED_METHODS {
                if let Some(ids) = service.by_method.get(method) {
                    for id in ids {
                        if let Some(route) = service.routes.get(id.0) {
                            listing.push((
                                method.clone(),
                                service.base_template.clone(),
                                route.path().to_string(),
                            ));
                        }
                    }
                }
            }
        }
        listing
    }

    /// Match an HTTP method + absolute URL against every registered service,
    /// in registration order.
    ///
    /// Returns `Ok(Some(..))` for the first service whose base template
    /// matches the URL's authority *and* which holds a route whose template
    /// matches the path — first declared wins, no specificity scoring.
    /// `Ok(None)` means nothing matched; the transport layer decides what a
    /// miss becomes (typically a 404).
    ///
    /// # Errors
    ///
    /// `InvalidMethod` for a verb outside the allow-list, `InvalidUrl` for a
    /// URL without a usable `scheme://` prefix, and `InvalidHandler` when the
    /// matched route's parameter order indexes past the captured values.
    pub fn match_route(&self, method: &str, url: &str) -> Result<Option<RouteMatch>, RouterError> {
        let method = validate_method(method)?;
        let (authority, path) = split_url(url)?;
        debug!(method = %method, authority, path, "route match attempt");

        for service in &self.services {
            let base_pattern = self.placeholders.substitute(&service.base_template, false);
            let Some(base_re) = compile_anchored(&base_pattern, &service.base_template) else {
                continue;
            };
            let Some(base_caps) = base_re.captures(authority) else {
                continue;
            };
            let Some(ids) = service.by_method.get(&method) else {
                continue;
            };
            for id in ids {
                let Some(route) = service.routes.get(id.0) else {
                    continue;
                };
                let pattern = self.placeholders.substitute(route.path(), false);
                let Some(re) = compile_anchored(&pattern, route.path()) else {
                    continue;
                };
                let Some(caps) = re.captures(path) else {
                    continue;
                };
                let captures = collect_groups(&caps);
                let params = bind_captures(route.handler(), captures)?;
                info!(
                    method = %method,
                    path,
                    route_path = %route.path(),
                    params = ?params,
                    "route matched"
                );
                return Ok(Some(RouteMatch {
                    route: Arc::clone(route),
                    params,
                    base_params: collect_groups(&base_caps),
                }));
            }
        }

        warn!(method = %method, url, "no route matched");
        Ok(None)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured groups in order, skipping the whole-match group. A group that
/// did not participate keeps its position as an empty string.
fn collect_groups(caps: &regex::Captures<'_>) -> CaptureVec {
    caps.iter()
        .skip(1)
        .map(|group| group.map_or(String::new(), |m| m.as_str().to_string()))
        .collect()
}

/// Apply the handler's explicit parameter order to the raw captures.
///
/// Indices may repeat (the value is duplicated); an index past the capture
/// count is a registration mistake surfaced here, at bind time, because the
/// capture count is only fixed once grouping has finished rewriting the
/// route's template.
fn bind_captures(handler: &Handler, captures: CaptureVec) -> Result<CaptureVec, RouterError> {
    let (reference, order) = match handler {
        Handler::Method(reference) => match &reference.param_order {
            Some(order) => (reference, order),
            None => return Ok(captures),
        },
        Handler::Func(_) => return Ok(captures),
    };
    let mut params = CaptureVec::new();
    for &index in order {
        let value = captures
            .get(index)
            .ok_or_else(|| out_of_range(reference, index, captures.len()))?;
        params.push(value.clone());
    }
    Ok(params)
}

fn out_of_range(reference: &MethodRef, index: usize, captured: usize) -> RouterError {
    RouterError::InvalidHandler {
        reference: format!("{}::{}", reference.type_name, reference.method_name),
        reason: format!(
            "parameter index {} out of range for {} captured value(s)",
            index, captured
        ),
    }
}

pub(crate) fn validate_method(method: &str) -> Result<Method, RouterError> {
    let parsed = method
        .parse::<Method>()
        .map_err(|_| RouterError::InvalidMethod {
            method: method.to_string(),
        })?;
    if !SUPPORTED_METHODS.contains(&parsed) {
        return Err(RouterError::InvalidMethod {
            method: method.to_string(),
        });
    }
    Ok(parsed)
}

/// Split an absolute URL into its authority (`scheme://host:port`) and path.
/// The path defaults to `/` when absent.
pub(crate) fn split_url(url: &str) -> Result<(&str, &str), RouterError> {
    let sep = url
        .find("://")
        .filter(|&i| i > 0)
        .ok_or_else(|| RouterError::InvalidUrl {
            url: url.to_string(),
        })?;
    let rest = &url[sep + 3..];
    match rest.find('/') {
        Some(slash) => Ok((&url[..sep + 3 + slash], &rest[slash..])),
        None => Ok((url, "/")),
    }
}

/// Compile a substituted template as a full-match pattern. Templates are raw
/// regex text by design, so a broken fragment is the registrant's mistake; it
/// is logged and skipped rather than failing the whole scan.
fn compile_anchored(pattern: &str, template: &str) -> Option<Regex> {
    match Regex::new(&format!("^{}$", pattern)) {
        Ok(re) => Some(re),
        Err(_) => {
            warn!(
                template,
                pattern, "template compiled to an invalid pattern, skipping"
            );
            None
        }
    }
}
