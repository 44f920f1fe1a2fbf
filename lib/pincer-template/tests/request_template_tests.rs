//! Integration tests for building and resolving request templates.

use assert2::{check, let_assert};
use pincer_template::{
    Body, Charset, CollectionFormat, Method, RequestTemplate, Target, TemplateConfig, Variables,
};
use serde::Serialize;

fn user_prototype() -> RequestTemplate {
    let mut template = RequestTemplate::new();
    template
        .method(Method::Get)
        .target("https://api.example.com/v1/")
        .expect("target")
        .uri("/users/{id}")
        .expect("uri")
        .query("fields", ["{fields}"])
        .expect("query")
        .header("Accept", ["application/json"])
        .expect("header")
        .header("X-Request-Id", ["{request_id}"])
        .expect("header");
    template
}

#[test]
fn test_query_values_accumulate() {
    let mut template = RequestTemplate::new();
    template.query("tag", ["a"]).expect("query");
    template.query("tag", ["b", "c"]).expect("query");

    let queries = template.queries();
    assert_eq!(queries.get("tag"), Some(&vec!["a".to_string(), "b".to_string(), "c".to_string()]));
    assert_eq!(template.query_line(), "?tag=a&tag=b&tag=c");
}

#[test]
fn test_content_type_is_replaced() {
    let mut template = RequestTemplate::new();
    template.header("Content-Type", ["text/plain"]).expect("header");
    template.header("Content-Type", ["application/json"]).expect("header");
    template.header("Accept", ["text/plain"]).expect("header");
    template.header("Accept", ["application/json"]).expect("header");

    let headers = template.headers();
    assert_eq!(headers.first("content-type"), Some("application/json"));
    assert_eq!(headers.get("content-type").map(<[String]>::len), Some(1));
    assert_eq!(headers.get("accept").map(<[String]>::len), Some(2));
}

#[test]
fn test_empty_values_remove() {
    let mut template = RequestTemplate::new();
    template.query("q", ["x"]).expect("query");
    template.header("X-Custom", ["y"]).expect("header");

    template.query("q", Vec::<String>::new()).expect("query");
    template.header("x-custom", Vec::<String>::new()).expect("header");

    assert!(template.queries().is_empty());
    assert!(!template.headers().contains("X-Custom"));
    assert_eq!(template.url(), "/");
}

#[test]
fn test_target_and_uri_make_the_path() {
    let mut template = RequestTemplate::new();
    template.target("http://api.com/").expect("target");
    template.uri("/users").expect("uri");

    assert_eq!(template.path(), "http://api.com/users");
}

#[test]
fn test_target_query_is_not_duplicated() {
    let mut template = RequestTemplate::new();
    template.target("http://api.com/search?active=true").expect("target");

    let first = template.resolve(&Variables::new()).expect("resolve");
    let second = template.resolve(&Variables::new()).expect("resolve");
    let again = first.resolve(&Variables::new()).expect("resolve");

    assert_eq!(first.url(), "http://api.com/search?active=true");
    assert_eq!(second.url(), first.url());
    assert_eq!(again.url(), first.url());
    assert_eq!(first.url().matches("active=true").count(), 1);
}

#[test]
fn test_target_query_is_appended_to_existing_queries() {
    let mut template = RequestTemplate::new();
    template.query("a", ["1"]).expect("query");
    template.target("http://x.com?a=2&b=3").expect("target");

    let queries = template.queries();
    assert_eq!(queries.get("a"), Some(&vec!["1".to_string(), "2".to_string()]));
    assert_eq!(queries.get("b"), Some(&vec!["3".to_string()]));
    assert_eq!(template.url(), "http://x.com?a=1&a=2&b=3");
}

#[test]
fn test_malformed_target_is_rejected() {
    let mut template = RequestTemplate::new();

    let_assert!(Err(err) = template.target("http://api.com/a b"));
    check!(err.is_invalid_uri());
    check!(template.url() == "/");

    let_assert!(Err(err) = Target::new("api", "http://api.com/<id>"));
    check!(err.is_invalid_uri());
}

#[test]
fn test_resolve_leaves_prototype_untouched() {
    let mut template = RequestTemplate::new();
    template.uri("/users/{id}").expect("uri");

    let resolved = template
        .resolve(&Variables::new().with("id", "42"))
        .expect("resolve");

    assert!(resolved.url().ends_with("/users/42"));
    assert!(resolved.variables().is_empty());
    assert_eq!(template.variables(), vec!["id"]);
    assert_eq!(template.url(), "/users/{id}");
    assert!(!template.is_resolved());
}

#[test]
fn test_request_lifecycle() {
    let template = user_prototype();
    let_assert!(Err(err) = template.request());
    check!(err.is_illegal_state());

    let variables = Variables::new()
        .with("id", 7)
        .with("fields", vec!["name", "email"])
        .with("request_id", "abc-123");
    let request = template
        .resolve(&variables)
        .expect("resolve")
        .request()
        .expect("request");

    check!(request.method() == Method::Get);
    check!(request.url() == "https://api.example.com/v1/users/7?fields=name&fields=email");
    check!(request.header("x-request-id") == Some("abc-123"));
    check!(request.body().is_empty());
}

#[test]
fn test_resolve_is_idempotent() {
    let template = user_prototype();
    let variables = Variables::new().with("id", 1).with("fields", "name");

    let first = template.resolve(&variables).expect("resolve").request().expect("request");
    let second = template.resolve(&variables).expect("resolve").request().expect("request");

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_blank_expansions_leave_no_artifacts() {
    let mut template = RequestTemplate::new();
    template.uri("/search").expect("uri");
    template.query("q", ["{term}"]).expect("query");
    template.query("page", ["{page}"]).expect("query");
    template.header("X-Trace", ["{trace}"]).expect("header");

    let resolved = template.resolve(&Variables::new()).expect("resolve");

    assert_eq!(resolved.url(), "/search");
    assert!(resolved.queries().is_empty());
    assert!(!resolved.headers().contains("X-Trace"));

    let partial = template
        .resolve(&Variables::new().with("page", 2))
        .expect("resolve");
    assert_eq!(partial.url(), "/search?page=2");
}

#[test]
fn test_invalid_uri_and_target() {
    let mut template = RequestTemplate::new();

    let_assert!(Err(err) = template.uri("http://evil.com"));
    check!(err.is_invalid_argument());

    let_assert!(Err(err) = template.target("relative/path"));
    check!(err.is_invalid_argument());

    let_assert!(Err(err) = template.target("http://"));
    check!(err.is_invalid_uri());

    let_assert!(Err(err) = template.header(" ", ["x"]));
    check!(err.is_invalid_argument());

    check!(template.url() == "/");
}

#[test]
fn test_values_are_encoded_once() {
    let mut template = RequestTemplate::new();
    template.uri("/files/{name}").expect("uri");
    template.query("q", ["{q}"]).expect("query");

    let variables = Variables::new().with("name", "a b.txt").with("q", "x&y=z");
    let resolved = template.resolve(&variables).expect("resolve");
    assert_eq!(resolved.url(), "/files/a%20b.txt?q=x%26y%3Dz");

    let twice = resolved.resolve(&Variables::new()).expect("resolve");
    assert_eq!(twice.url(), resolved.url());
}

#[test]
fn test_header_values_are_not_reexpanded() {
    let mut template = RequestTemplate::new();
    template.header("Authorization", ["Bearer {token}"]).expect("header");

    let resolved = template
        .resolve(&Variables::new().with("token", "{token}"))
        .expect("resolve");
    let twice = resolved
        .resolve(&Variables::new().with("token", "other"))
        .expect("resolve");

    assert_eq!(twice.headers().first("authorization"), Some("Bearer {token}"));
}

#[test]
fn test_variables_from_serialize() {
    #[derive(Serialize)]
    struct Search<'a> {
        term: &'a str,
        tags: Vec<&'a str>,
        page: Option<u32>,
    }

    let mut template = RequestTemplate::with_config(
        &TemplateConfig::builder()
            .collection_format(CollectionFormat::Csv)
            .build(),
    );
    template.uri("/search").expect("uri");
    template.query("q", ["{term}"]).expect("query");
    template.query("tags", ["{tags}"]).expect("query");
    template.query("page", ["{page}"]).expect("query");

    let variables = Variables::from_serialize(&Search {
        term: "rust",
        tags: vec!["async", "http"],
        page: None,
    })
    .expect("variables");
    let resolved = template.resolve(&variables).expect("resolve");

    assert_eq!(resolved.url(), "/search?q=rust&tags=async,http");
}

#[test]
fn test_query_format_survives_resolution() {
    let mut template = RequestTemplate::with_config(
        &TemplateConfig::builder()
            .collection_format(CollectionFormat::Csv)
            .build(),
    );
    template.uri("/items").expect("uri");
    template
        .query_with_format("tags", ["{tags}"], CollectionFormat::Exploded)
        .expect("query");
    template.query("ids", ["{ids}"]).expect("query");

    let variables = Variables::new()
        .with("tags", vec!["a", "b"])
        .with("ids", vec!["1", "2"]);
    let resolved = template.resolve(&variables).expect("resolve");

    assert_eq!(resolved.url(), "/items?tags=a&tags=b&ids=1,2");
    assert_eq!(
        resolved.resolve(&Variables::new()).expect("resolve").url(),
        resolved.url()
    );
}

#[test]
fn test_body_template_is_encoded_with_its_charset() {
    let mut template = RequestTemplate::new();
    template
        .method(Method::Post)
        .uri("/notes")
        .expect("uri")
        .body_template_with_charset("note: {text}", Charset::Iso8859_1);

    let request = template
        .resolve(&Variables::new().with("text", "café"))
        .expect("resolve")
        .request()
        .expect("request");

    assert_eq!(request.body().as_bytes(), b"note: caf\xe9");
    assert_eq!(request.charset(), Some(Charset::Iso8859_1));
    assert_eq!(request.header("content-length"), Some("10"));
}

#[test]
fn test_literal_body_wins_over_template() {
    let mut template = RequestTemplate::new();
    template.body_template("{ignored}");
    template.body(Body::from_text("literal", Charset::Utf8));

    assert_eq!(template.unresolved_body_template(), None);

    let resolved = template.resolve(&Variables::new()).expect("resolve");
    assert_eq!(resolved.body_data(), b"literal");
}

#[test]
fn test_serde_round_trip() {
    let mut template = user_prototype();
    template.body_template(r#"%7B"id": {id}%7D"#);

    let json = serde_json::to_string(&template).expect("serialize");
    let restored: RequestTemplate = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, template);

    let variables = Variables::new().with("id", 3).with("fields", "name");
    assert_eq!(
        restored.resolve(&variables).expect("resolve").request().expect("request"),
        template.resolve(&variables).expect("resolve").request().expect("request"),
    );
}

#[test]
fn test_concurrent_resolution_of_a_shared_prototype() {
    let template = user_prototype();

    let urls = std::thread::scope(|scope| {
        let handles = (0..8)
            .map(|id| {
                let template = &template;
                scope.spawn(move || {
                    template
                        .resolve(&Variables::new().with("id", id))
                        .expect("resolve")
                        .url()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread"))
            .collect::<Vec<_>>()
    });

    for (id, url) in urls.iter().enumerate() {
        assert_eq!(url, &format!("https://api.example.com/v1/users/{id}"));
    }
    assert_eq!(template.url(), "https://api.example.com/v1/users/{id}?fields={fields}");
}

#[test]
fn test_target_apply() {
    let target = Target::new("users", "https://users.example.com").expect("target");
    let mut template = RequestTemplate::new();
    template.uri("/users/{id}").expect("uri");
    template.set_target_ref(target.clone());

    let mut resolved = template
        .resolve(&Variables::new().with("id", 9))
        .expect("resolve");
    let request = target.apply(&mut resolved).expect("request");

    assert_eq!(request.url(), "https://users.example.com/users/9");
    assert_eq!(resolved.target_ref(), Some(&target));
}

#[test]
fn test_to_http() {
    let mut template = RequestTemplate::new();
    template
        .method(Method::Put)
        .target("https://api.example.com")
        .expect("target")
        .uri("/users/{id}")
        .expect("uri")
        .body_text("payload");

    let request = template
        .resolve(&Variables::new().with("id", 5))
        .expect("resolve")
        .request()
        .expect("request")
        .to_http()
        .expect("http request");

    assert_eq!(request.method(), http::Method::PUT);
    assert_eq!(request.uri(), "https://api.example.com/users/5");
    assert_eq!(request.headers()["content-length"], "7");
    assert_eq!(request.body().as_ref(), b"payload");
}

#[test]
fn test_resolved_request_display() {
    let template = user_prototype();
    let resolved = template
        .resolve(&Variables::new().with("id", 1).with("request_id", "r-1"))
        .expect("resolve");

    insta::assert_snapshot!(resolved.to_string(), @r"
    GET https://api.example.com/v1/users/1 HTTP/1.1
    Accept: application/json
    X-Request-Id: r-1
    ");
}
