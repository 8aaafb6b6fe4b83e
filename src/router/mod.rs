//! # Router Module
//!
//! Path matching and route resolution. Registration builds an ordered list of
//! services — each a base-URL template scoped [`crate::RouteCollection`] —
//! and request time runs the two-stage match: the URL's authority against the
//! service's base template, then the path against each route template in that
//! service's method bucket.
//!
//! ## Matching
//!
//! Templates are resolved through the shared placeholder registry and
//! compiled into anchored patterns per match. Scanning is strictly
//! first-declared-wins — by service registration order, then route
//! registration order inside the matched service's method bucket. There is no
//! specificity scoring: a literal base template only beats a placeholder one
//! if it was registered first.
//!
//! ## Example
//!
//! ```rust,ignore
//! let matched = router.match_route("GET", "https://domain.tld:8080/users/25")?;
//! if let Some(m) = matched {
//!     println!("route: {}", m.route.path());
//!     println!("params: {:?}", m.params);
//! }
//! ```

mod core;

pub use core::{CaptureVec, RouteMatch, Router, MAX_INLINE_CAPTURES};
