use super::*;

#[test]
fn login_is_the_only_public_route() {
    let public: Vec<Route> = Route::ALL.into_iter().filter(|r| !r.requires_auth()).collect();
    assert_eq!(public, vec![Route::Login]);
}

#[test]
fn paths_round_trip_through_from_path() {
    for route in Route::ALL {
        assert_eq!(Route::from_path(route.path()), Some(route));
    }
}

#[test]
fn unknown_path_has_no_route() {
    assert_eq!(Route::from_path("/admin"), None);
}

#[test]
fn products_is_the_root_path() {
    assert_eq!(Route::Products.path(), "/");
}

#[test]
fn tracing_navigator_starts_without_route() {
    assert_eq!(TracingNavigator::new().current(), None);
}

#[test]
fn tracing_navigator_remembers_last_route() {
    let nav = TracingNavigator::new();
    nav.navigate(Route::Products);
    nav.navigate(Route::Login);
    assert_eq!(nav.current(), Some(Route::Login));
}
