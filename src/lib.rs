//! # hostroute
//!
//! **hostroute** is a placeholder-driven URL routing engine for Rust: it maps
//! an HTTP method + absolute URL to a registered handler, capturing
//! positional parameters from both the URL's authority (scheme, host, port)
//! and its path, and it generates concrete paths back from route templates.
//!
//! ## Overview
//!
//! Routes are plain regex templates with symbolic `{name}` placeholders
//! (`/users/{num}`, `{scheme}://api.domain.tld:{port}`). A shared registry
//! maps tokens to regex fragments in both directions, custom entries
//! shadowing the built-ins. Registration groups routes into *services*, each
//! scoped to one base-URL template; matching scans services in registration
//! order and returns the first route whose anchored pattern matches —
//! first declared wins, never most-specific.
//!
//! ## Architecture
//!
//! - **[`placeholders`]** — token ↔ fragment registry, substitution in both
//!   directions, validated positional fill
//! - **[`route`]** — route templates and handler references
//!   (closures or `"Type::method/1/0/2"` controller references)
//! - **[`collection`]** — the per-service registration builder: verb
//!   helpers, hierarchical path grouping, route naming
//! - **[`router`]** — ordered service registry, method/URL validation, the
//!   two-stage authority-then-path match, the flat name index
//! - **[`dispatcher`]** — controller factories and handler invocation
//! - **[`error`]** — the crate's error taxonomy
//!
//! ## Quick Start
//!
//! ```
//! use hostroute::{Handler, Router};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), hostroute::RouterError> {
//! let mut router = Router::new();
//! router.serve("{scheme}://localhost:{port}", |c| {
//!     c.get(
//!         "/pets/{num}",
//!         Handler::func(|params, _| json!({ "pet": &params[0] })),
//!         Some("pets.show"),
//!     )?;
//!     Ok(())
//! })?;
//!
//! let matched = router
//!     .match_route("GET", "http://localhost:8080/pets/42")?
//!     .expect("route matches");
//! assert_eq!(matched.params[0], "42");
//!
//! // Reverse generation through the named-route index.
//! let route = router.named_route("pets.show").expect("registered above");
//! assert_eq!(route.fill_path(&[&7])?, "/pets/7");
//! # Ok(())
//! # }
//! ```
//!
//! ## Registration vs. serving
//!
//! All registration happens single-threaded, up front; after that the router
//! is read-only. A match never mutates shared state — captures are returned
//! in an owned [`RouteMatch`] — so a fully-registered `Router` can be shared
//! across worker threads.

pub mod collection;
pub mod dispatcher;
pub mod error;
pub mod placeholders;
pub mod route;
pub mod router;

pub use collection::{RouteCollection, RouteId};
pub use dispatcher::{Controller, ControllerFactory, Dispatcher};
pub use error::RouterError;
pub use placeholders::Placeholders;
pub use route::{Handler, HandlerFn, IntoHandler, MethodRef, Route};
pub use router::{CaptureVec, RouteMatch, Router, MAX_INLINE_CAPTURES};
