use hostroute::Router;

/// Nested group composition from the reference scenario: every route keeps
/// its name, inner groups apply their prefix first, outer groups keep
/// prepending.
fn grouped_router() -> Router {
    let mut router = Router::new();
    router
        .serve("{scheme}://domain.tld:{num}", |c| {
            let animals = [
                c.get("", "Animals::index", Some("animals"))?,
                c.get("cat", "Animals::cat", Some("animals.cat"))?,
                c.get("dog", "Animals::dog", Some("animals.dog"))?,
            ];
            c.group("animals", &animals);

            let mut users = vec![
                c.get("", "Users::index", Some("users"))?,
                c.post("", "Users::index", Some("users.create"))?,
                c.get("{num}", "Users::show/0", Some("users.show"))?,
            ];
            let mut panel = vec![c.get("", "Panel::index", Some("panel"))?];
            let config = [c.get("update", "Panel::config", Some("panel.update"))?];
            panel.extend(c.group("config", &config));
            users.extend(c.group("{num}/panel", &panel));
            c.group("users", &users);
            Ok(())
        })
        .expect("service registration");
    router
}

fn named_path(router: &Router, name: &str) -> String {
    router
        .named_route(name)
        .unwrap_or_else(|| panic!("route '{}' should be registered", name))
        .path()
        .to_string()
}

#[test]
fn test_flat_group_prefixes_every_route() {
    let router = grouped_router();
    assert_eq!(named_path(&router, "animals"), "/animals");
    assert_eq!(named_path(&router, "animals.cat"), "/animals/cat");
    assert_eq!(named_path(&router, "animals.dog"), "/animals/dog");
}

#[test]
fn test_nested_groups_accumulate_prefixes() {
    let router = grouped_router();
    assert_eq!(named_path(&router, "users"), "/users");
    assert_eq!(named_path(&router, "users.create"), "/users");
    assert_eq!(named_path(&router, "users.show"), "/users/{num}");
    assert_eq!(named_path(&router, "panel"), "/users/{num}/panel");
    assert_eq!(
        named_path(&router, "panel.update"),
        "/users/{num}/panel/config/update"
    );
}

#[test]
fn test_grouped_routes_still_match_and_fill() {
    let router = grouped_router();
    assert_eq!(
        router
            .named_route("users.show")
            .expect("registered")
            .fill_path(&[&25])
            .expect("fill"),
        "/users/25"
    );
    let matched = router
        .match_route("GET", "https://domain.tld:8080/users/7/panel/config/update")
        .expect("valid method and url")
        .expect("route matches");
    assert_eq!(matched.route.name(), Some("panel.update"));
    assert_eq!(matched.params.as_slice(), ["7"]);

    // The POST twin of /users lands in its own method bucket.
    let created = router
        .match_route("POST", "https://domain.tld:8080/users")
        .expect("valid method and url")
        .expect("route matches");
    assert_eq!(created.route.name(), Some("users.create"));
}

#[test]
fn test_group_does_not_touch_names() {
    let router = grouped_router();
    for name in ["animals", "users", "panel", "panel.update"] {
        assert!(router.named_route(name).is_some());
    }
}
