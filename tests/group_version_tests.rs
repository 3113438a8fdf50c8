use crossway::{Request, Response, Router};
use http::Method;

mod common;

use common::{entries, log, recording_handler, RecordingMiddleware};
use tracing_util::TestTracing;

#[test]
fn test_group_nesting_is_associative() {
    let _tracing = TestTracing::init();
    let log = log();

    let mut nested = Router::new();
    nested
        .group("/a", &[], |r| {
            r.group("/b", &[], |r| {
                r.get("/c", recording_handler(&log, "nested"), &[])?;
                Ok(())
            })
        })
        .unwrap();

    let mut flat = Router::new();
    flat.group("/a/b", &[], |r| {
        r.get("/c", recording_handler(&log, "flat"), &[])?;
        Ok(())
    })
    .unwrap();

    assert_eq!(nested.routes()[0].pattern.raw(), "/a/b/c");
    assert_eq!(flat.routes()[0].pattern.raw(), "/a/b/c");

    for router in [&nested, &flat] {
        let mut res = Response::new();
        router
            .run(&Request::new(Method::GET, "/a/b/c"), &mut res)
            .unwrap();
        assert_eq!(res.status(), 200);
    }
}

#[test]
fn test_group_context_restored_after_body() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router
        .group("/admin", &[], |r| {
            r.get("/users", recording_handler(&log, "admin"), &[])?;
            Ok(())
        })
        .unwrap();
    router
        .get("/top", recording_handler(&log, "top"), &[])
        .unwrap();

    assert_eq!(router.routes()[0].pattern.raw(), "/admin/users");
    assert_eq!(router.routes()[1].pattern.raw(), "/top");
}

#[test]
fn test_group_context_restored_when_body_fails() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();

    let result = router.group("/admin", &[], |r| {
        r.get("/users", recording_handler(&log, "admin"), &[])?;
        anyhow::bail!("setup aborted")
    });
    assert!(result.is_err());

    // Sibling registrations see the pre-group context.
    router
        .get("/top", recording_handler(&log, "top"), &[])
        .unwrap();
    assert_eq!(router.routes()[0].pattern.raw(), "/admin/users");
    assert_eq!(router.routes()[1].pattern.raw(), "/top");
}

#[test]
fn test_empty_group_is_a_noop() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router.group("/unused", &[], |_r| Ok(())).unwrap();
    assert!(router.routes().is_empty());

    router
        .get("/x", recording_handler(&log, "x"), &[])
        .unwrap();
    assert_eq!(router.routes()[0].pattern.raw(), "/x");
}

#[test]
fn test_repeated_identical_prefixes_nest() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router
        .group("/a", &[], |r| {
            r.group("/a", &[], |r| {
                r.get("/x", recording_handler(&log, "deep"), &[])?;
                Ok(())
            })
        })
        .unwrap();
    assert_eq!(router.routes()[0].pattern.raw(), "/a/a/x");
}

#[test]
fn test_group_middleware_runs_before_route_middleware() {
    let _tracing = TestTracing::init();
    let log = log();
    let group_mw = RecordingMiddleware::passing(&log, "group_mw");
    let route_mw = RecordingMiddleware::passing(&log, "route_mw");

    let mut router = Router::new();
    router
        .group("/api", std::slice::from_ref(&group_mw), |r| {
            r.get(
                "/x",
                recording_handler(&log, "handler"),
                std::slice::from_ref(&route_mw),
            )?;
            Ok(())
        })
        .unwrap();

    let mut res = Response::new();
    router
        .run(&Request::new(Method::GET, "/api/x"), &mut res)
        .unwrap();
    assert_eq!(entries(&log), vec!["group_mw", "route_mw", "handler"]);
}

#[test]
fn test_version_with_explicit_tag() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router
        .version(None, Some("2"), &[], |r| {
            r.get("/users", recording_handler(&log, "v2_users"), &[])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(router.routes()[0].pattern.raw(), "/api/v2/users");

    let mut res = Response::new();
    router
        .run(&Request::new(Method::GET, "/api/v2/users"), &mut res)
        .unwrap();
    assert_eq!(entries(&log), vec!["v2_users"]);
}

#[test]
fn test_version_explicit_prefix_wins_over_tag() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router.set_version("1");
    router
        .version(Some("/beta"), Some("9"), &[], |r| {
            r.get("/users", recording_handler(&log, "beta"), &[])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(router.routes()[0].pattern.raw(), "/beta/users");
}

#[test]
fn test_version_falls_back_to_router_default() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router.set_version("1");
    router
        .version(None, None, &[], |r| {
            r.get("/users", recording_handler(&log, "v1"), &[])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(router.routes()[0].pattern.raw(), "/api/v1/users");
}

#[test]
fn test_version_with_no_tag_anywhere() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router
        .version(None, None, &[], |r| {
            r.get("/users", recording_handler(&log, "bare"), &[])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(router.routes()[0].pattern.raw(), "/api/v/users");
}

#[test]
fn test_version_replaces_enclosing_group_prefix() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router
        .group("/admin", &[], |r| {
            r.version(None, Some("3"), &[], |r| {
                r.get("/x", recording_handler(&log, "versioned"), &[])?;
                Ok(())
            })
        })
        .unwrap();

    // The version prefix is absolute, not appended under /admin.
    assert_eq!(router.routes()[0].pattern.raw(), "/api/v3/x");
}

#[test]
fn test_version_context_restored_after_body() {
    let _tracing = TestTracing::init();
    let log = log();
    let mut router = Router::new();
    router
        .version(None, Some("2"), &[], |r| {
            r.get("/a", recording_handler(&log, "a"), &[])?;
            Ok(())
        })
        .unwrap();
    router
        .get("/plain", recording_handler(&log, "plain"), &[])
        .unwrap();

    assert_eq!(router.routes()[1].pattern.raw(), "/plain");
}

#[test]
fn test_version_inherits_group_middleware() {
    let _tracing = TestTracing::init();
    let log = log();
    let outer = RecordingMiddleware::passing(&log, "outer");
    let inner = RecordingMiddleware::passing(&log, "inner");

    let mut router = Router::new();
    router
        .group("/ignored", std::slice::from_ref(&outer), |r| {
            r.version(None, Some("1"), std::slice::from_ref(&inner), |r| {
                r.get("/x", recording_handler(&log, "handler"), &[])?;
                Ok(())
            })
        })
        .unwrap();

    let mut res = Response::new();
    router
        .run(&Request::new(Method::GET, "/api/v1/x"), &mut res)
        .unwrap();
    assert_eq!(entries(&log), vec!["outer", "inner", "handler"]);
}
