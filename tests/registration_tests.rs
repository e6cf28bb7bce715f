//! Structural validation performed when the registry compiles.

use std::sync::Arc;

use endpoint_registry::{
    CompileError, Describe, HandlerRequest, Registration, Server, Service, ServiceBase,
};

mod common;

#[derive(Default)]
struct BasicService {
    base: ServiceBase,
}

impl Service for BasicService {
    fn describe(&self, d: &mut Describe<Self>) {
        d.embed(|s| &s.base);
    }
}

#[derive(Default)]
struct IsNotComposedOfServiceBase;

impl Service for IsNotComposedOfServiceBase {
    fn describe(&self, _d: &mut Describe<Self>) {}
}

#[derive(Default)]
struct IsComposedOfNamedServiceBase {
    #[allow(dead_code)]
    field: ServiceBase,
}

impl Service for IsComposedOfNamedServiceBase {
    fn describe(&self, d: &mut Describe<Self>) {
        d.named_base("field");
    }
}

#[derive(Default)]
struct TwiceEmbedded {
    first: ServiceBase,
    second: ServiceBase,
}

impl Service for TwiceEmbedded {
    fn describe(&self, d: &mut Describe<Self>) {
        d.embed(|s| &s.first);
        d.embed(|s| &s.second);
    }
}

/// Both endpoints answer GET on the same url.
#[derive(Default)]
struct AnyService {
    base: ServiceBase,
}

impl AnyService {
    fn honour_get(&self, _req: &HandlerRequest) -> &'static str {
        ""
    }

    fn honour_post(&self, _req: &HandlerRequest) -> &'static str {
        ""
    }
}

impl Service for AnyService {
    fn describe(&self, d: &mut Describe<Self>) {
        d.embed(|s| &s.base);
        d.get("honourGet").url("a-url");
        d.get("honourPost").url("a-url");
        d.handler("honour_get", Self::honour_get);
        d.handler("honour_post", Self::honour_post);
    }
}

/// Same url, different methods.
#[derive(Default)]
struct AnyServiceA {
    base: ServiceBase,
}

impl Service for AnyServiceA {
    fn describe(&self, d: &mut Describe<Self>) {
        d.embed(|s| &s.base);
        d.get("honourGet").url("a-url");
        d.post("honourPost").url("a-url");
        d.handler("honour_get", Self::honour_get);
        d.handler("honour_post", Self::honour_post);
    }
}

impl AnyServiceA {
    fn honour_get(&self, _req: &HandlerRequest) -> &'static str {
        "get"
    }

    fn honour_post(&self, _req: &HandlerRequest) -> &'static str {
        "post"
    }
}

#[derive(Default)]
struct HandlerlessService {
    base: ServiceBase,
}

impl Service for HandlerlessService {
    fn describe(&self, d: &mut Describe<Self>) {
        d.embed(|s| &s.base);
        d.get("getUser");
    }
}

#[test]
fn test_register_does_not_validate() {
    let mut s = common::server_with_version("");
    s.register(Registration::owned(BasicService::default()))
        .register(Arc::new(IsNotComposedOfServiceBase))
        .register(Arc::new(IsComposedOfNamedServiceBase::default()));
    assert_eq!(s.pending(), 3);
}

#[test]
fn test_by_value_registration_fails_at_compile() {
    let mut s = common::server_with_version("");
    s.register(Registration::owned(BasicService::default()));

    let err = s.compile().unwrap_err();
    assert_eq!(
        err,
        CompileError::NotShared {
            service: "BasicService".into()
        }
    );
}

#[test]
fn test_shared_registration_is_accepted() {
    let mut s = common::server_with_version("");
    s.register(Arc::new(BasicService::default()));
    let compiled = s.compile().unwrap();
    assert!(compiled.registry().is_empty());
}

#[test]
fn test_missing_base_fails() {
    let mut s = common::server_with_version("");
    s.register(Arc::new(IsNotComposedOfServiceBase));

    let err = s.compile().unwrap_err();
    assert!(matches!(err, CompileError::MissingBase { ref service } if service == "IsNotComposedOfServiceBase"));
}

#[test]
fn test_named_base_fails() {
    let mut s = common::server_with_version("");
    s.register(Arc::new(IsComposedOfNamedServiceBase::default()));

    let err = s.compile().unwrap_err();
    assert_eq!(
        err,
        CompileError::NamedBase {
            service: "IsComposedOfNamedServiceBase".into(),
            field: "field".into(),
        }
    );
    assert!(err.to_string().contains("named field `field`"));
}

#[test]
fn test_double_embedding_fails() {
    let mut s = common::server_with_version("");
    s.register(Arc::new(TwiceEmbedded::default()));

    let err = s.compile().unwrap_err();
    assert!(matches!(err, CompileError::DuplicateBase { count: 2, .. }));
}

#[test]
fn test_same_url_same_method_fails() {
    let mut s = common::server_with_version("");
    s.register(Arc::new(AnyService::default()));

    let err = s.compile().unwrap_err();
    assert_eq!(
        err,
        CompileError::DuplicateEndpoint {
            key: "GET:/any/a-url".into(),
            first: "AnyService.honourGet".into(),
            second: "AnyService.honourPost".into(),
        }
    );
}

#[test]
fn test_same_url_different_methods_compiles() {
    let mut s = common::server_with_version("");
    s.register(Arc::new(AnyServiceA::default()));

    let compiled = s.compile().unwrap();
    assert_eq!(compiled.registry().len(), 2);
    assert!(compiled.registry().contains_key("GET:/any-service-a/a-url"));
    assert!(compiled.registry().contains_key("POST:/any-service-a/a-url"));
}

#[test]
fn test_missing_handler_fails() {
    let mut s = common::server_with_version("");
    s.register(Arc::new(HandlerlessService::default()));

    let err = s.compile().unwrap_err();
    assert_eq!(
        err,
        CompileError::MissingHandler {
            service: "HandlerlessService".into(),
            field: "getUser".into(),
            handler: "get_user".into(),
        }
    );
}

#[test]
fn test_first_error_aborts_compile() {
    let mut s = common::server_with_version("");
    s.register(Arc::new(BasicService::default()))
        .register(Registration::owned(BasicService::default()))
        .register(Arc::new(IsNotComposedOfServiceBase));

    assert!(matches!(s.compile().unwrap_err(), CompileError::NotShared { .. }));
}

#[test]
fn test_builtin_ping_collides_with_user_endpoint() {
    #[derive(Default)]
    struct Status {
        base: ServiceBase,
    }

    impl Service for Status {
        fn describe(&self, d: &mut Describe<Self>) {
            d.embed(|s| &s.base).root("status");
            d.get("ping").stub("ping.txt");
        }
    }

    let mut s = Server::default();
    s.register(Arc::new(Status::default()));
    let err = s.compile().unwrap_err();
    assert!(matches!(err, CompileError::DuplicateEndpoint { ref key, .. } if key == "GET:/status/ping"));
}
