use hostroute::{Placeholders, Router, RouterError};

const PLACEHOLDERS: &str = "{alpha}/{alphanum}/{any}/{unknown}/{num}/{segment}";
const PATTERNS: &str = "([a-zA-Z]+)/([a-zA-Z0-9]+)/(.*)/{unknown}/([0-9]+)/([^/]+)";
const MERGED: &str = "([a-zA-Z]+)/{alphanum}/(.*)/{unknown}/([0-9]+)/([^/]+)";

#[test]
fn test_forward_substitution_leaves_unknown_tokens() {
    let router = Router::new();
    assert_eq!(router.replace_placeholders(PLACEHOLDERS, false), PATTERNS);
}

#[test]
fn test_reverse_substitution_restores_tokens() {
    let router = Router::new();
    assert_eq!(router.replace_placeholders(PATTERNS, true), PLACEHOLDERS);
}

#[test]
fn test_substitution_of_mixed_templates() {
    let router = Router::new();
    assert_eq!(router.replace_placeholders(MERGED, false), PATTERNS);
    assert_eq!(router.replace_placeholders(MERGED, true), PLACEHOLDERS);
}

#[test]
fn test_substitution_after_registering_the_unknown_token() {
    let router = Router::new();
    router.add_placeholder("unknown", "([1-5])").expect("valid fragment");
    assert_eq!(
        router.replace_placeholders(PLACEHOLDERS, false),
        "([a-zA-Z]+)/([a-zA-Z0-9]+)/(.*)/([1-5])/([0-9]+)/([^/]+)"
    );
    // The literal "{unknown}" in PATTERNS is a token, not a fragment, so the
    // reverse direction still leaves it alone.
    assert_eq!(router.replace_placeholders(PATTERNS, true), PLACEHOLDERS);
}

#[test]
fn test_double_substitution_is_idempotent() {
    let router = Router::new();
    let once = router.replace_placeholders(PLACEHOLDERS, false);
    let twice = router.replace_placeholders(&once, false);
    assert_eq!(once, twice);
}

#[test]
fn test_custom_placeholders_are_listed_ahead_of_defaults() {
    let registry = Placeholders::new();
    registry
        .add_all(&[("a-b", "([a-b]+)"), ("c-e", "([c-e]+)")])
        .expect("valid fragments");
    registry.add("f-h", "([f-h]+)").expect("valid fragment");

    let all = registry.all();
    // Newest entries first, then the older batch, then the defaults.
    assert_eq!(all[0], ("{f-h}".to_string(), "([f-h]+)".to_string()));
    assert_eq!(all[1], ("{a-b}".to_string(), "([a-b]+)".to_string()));
    assert_eq!(all[2], ("{c-e}".to_string(), "([c-e]+)".to_string()));
    assert!(all.len() > 3);
    assert!(all
        .iter()
        .any(|(token, fragment)| token == "{num}" && fragment == "([0-9]+)"));
}

#[test]
fn test_custom_placeholder_shadows_builtin() {
    let registry = Placeholders::new();
    registry.add("num", "([0-5]+)").expect("valid fragment");
    assert_eq!(registry.substitute("{num}", false), "([0-5]+)");
    assert_eq!(registry.substitute("([0-5]+)", true), "{num}");

    let all = registry.all();
    let nums: Vec<&str> = all
        .iter()
        .filter(|(token, _)| token == "{num}")
        .map(|(_, fragment)| fragment.as_str())
        .collect();
    // The shadowed default is gone from the view entirely.
    assert_eq!(nums, ["([0-5]+)"]);

    assert_eq!(registry.fill("{num}", &[&25]).expect("fill"), "25");
    assert!(matches!(
        registry.fill("{num}", &[&9]),
        Err(RouterError::PlaceholderValidation { .. })
    ));
}

#[test]
fn test_fill_replaces_tokens_positionally() {
    let router = Router::new();
    assert_eq!(
        router
            .fill_placeholders("http://s{num}.domain.tld/users/{num}", &[&1, &25])
            .expect("fill"),
        "http://s1.domain.tld/users/25"
    );
    assert_eq!(
        router
            .fill_placeholders(
                "http://domain.tld/{segment}/{alphanum}",
                &[&"a-pretty-title", &"abc123"]
            )
            .expect("fill"),
        "http://domain.tld/a-pretty-title/abc123"
    );
}

#[test]
fn test_fill_count_mismatch() {
    let router = Router::new();
    assert!(matches!(
        router.fill_placeholders("http://s{num}.domain-{alpha}.tld", &[&25]),
        Err(RouterError::PlaceholderCountMismatch {
            expected: 2,
            found: 1
        })
    ));
    assert!(matches!(
        router.fill_placeholders("/users/{num}", &[&1, &2]),
        Err(RouterError::PlaceholderCountMismatch {
            expected: 1,
            found: 2
        })
    ));
}

#[test]
fn test_fill_rejects_values_that_do_not_match() {
    let router = Router::new();
    let err = router
        .fill_placeholders("http://s{num}.domain.tld", &[&"abc"])
        .expect_err("abc is not numeric");
    match err {
        RouterError::PlaceholderValidation { token, value } => {
            assert_eq!(token, "{num}");
            assert_eq!(value.as_deref(), Some("abc"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_fill_rejects_unregistered_tokens() {
    let router = Router::new();
    let err = router
        .fill_placeholders("/pets/{species}", &[&"cat"])
        .expect_err("species has no fragment");
    match err {
        RouterError::PlaceholderValidation { token, value } => {
            assert_eq!(token, "{species}");
            assert!(value.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_fragments_are_rejected() {
    let registry = Placeholders::new();
    // Not a valid regex.
    assert!(matches!(
        registry.add("broken", "([0-9]+"),
        Err(RouterError::InvalidPlaceholder { .. })
    ));
    // No capturing group.
    assert!(matches!(
        registry.add("flat", "[0-9]+"),
        Err(RouterError::InvalidPlaceholder { .. })
    ));
    // Two capturing groups.
    assert!(matches!(
        registry.add("double", "(a)(b)"),
        Err(RouterError::InvalidPlaceholder { .. })
    ));
    // A failed batch must not be partially applied.
    assert!(registry
        .add_all(&[("ok", "([a-z]+)"), ("bad", "(")])
        .is_err());
    assert!(registry.substitute("{ok}", false) == "{ok}");
}

#[test]
fn test_fill_then_extract_round_trips() {
    let router = Router::new();
    let template = "/users/{num}/files/{segment}";
    let filled = router
        .fill_placeholders(template, &[&10, &"report-a"])
        .expect("fill");
    assert_eq!(filled, "/users/10/files/report-a");

    let pattern = format!("^{}$", router.replace_placeholders(template, false));
    let re = regex::Regex::new(&pattern).expect("compiled template");
    let caps = re.captures(&filled).expect("filled path matches");
    assert_eq!(&caps[1], "10");
    assert_eq!(&caps[2], "report-a");
}
