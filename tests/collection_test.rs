// Collection+JSON producer and consumer tests through the public API
use hyperdoc::collection::{
    new_collection, new_item, new_query, new_template, Datum, Element, ErrorObject, Link,
};
use hyperdoc::{parse_collection, BuildError, Document, HyperError, ParseError, Target};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn query(rel: &str, name: &str) -> Element {
    let href = url(&format!("http://example.org/{rel}"));
    Element::from(new_query(href, rel, name, "", []).unwrap())
}

#[test]
fn test_insertion_order_is_preserved() {
    let mut elements = Vec::new();
    for i in 0..5 {
        elements.push(Element::from(Link::new(
            url(&format!("http://example.org/l{i}")),
            format!("rel{i}"),
            "",
            "",
            "",
        )));
        elements.push(Element::from(
            new_item(Some(url(&format!("http://example.org/i{i}"))), []).unwrap(),
        ));
        elements.push(query(&format!("q{i}"), ""));
    }
    let c = new_collection(elements).unwrap();
    let value = serde_json::to_value(&c).unwrap();
    let body = &value["collection"];

    for i in 0..5 {
        assert_eq!(body["links"][i]["rel"], format!("rel{i}"));
        assert_eq!(body["items"][i]["href"], format!("http://example.org/i{i}"));
        assert_eq!(body["queries"][i]["rel"], format!("q{i}"));
    }
    assert!(body.get("template").is_none());
    assert!(body.get("error").is_none());
    assert!(body.get("href").is_none());
}

#[test]
fn test_absent_optional_fields_are_omitted() {
    let item = new_item(None, [Element::from(Datum::new("n", "", ""))]).unwrap();
    let c = new_collection([Element::from(item)]).unwrap();
    assert_eq!(
        c.to_json().unwrap(),
        r#"{"collection":{"version":"1.0","items":[{"data":[{"name":"n"}]}]}}"#
    );
}

#[test]
fn test_unsupported_targets_never_no_op() {
    let datum = Element::from(Datum::new("a", "b", "c"));
    let error = Element::from(ErrorObject::new("t", "c", "m"));
    let link = Element::from(Link::new(url("http://example.org"), "self", "", "", ""));

    let cases: Vec<(Result<(), BuildError>, &str, Target)> = vec![
        (new_collection([datum.clone()]).map(|_| ()), "datum", Target::Collection),
        (new_template([error.clone()]).map(|_| ()), "error", Target::Template),
        (new_template([link.clone()]).map(|_| ()), "link", Target::Template),
        (new_item(None, [error.clone()]).map(|_| ()), "error", Target::Item),
        (
            new_query(url("http://example.org"), "", "", "", [link]).map(|_| ()),
            "link",
            Target::Query,
        ),
    ];
    for (result, element, target) in cases {
        assert_eq!(
            result.unwrap_err(),
            BuildError::UnsupportedTarget { element, target }
        );
    }
}

#[test]
fn test_round_trip_through_consumer() {
    let template = new_template([Element::from(Datum::new("email", "", "Email"))]).unwrap();
    let c = new_collection([
        Element::Href(url("http://example.org/friends/")),
        query("search", "by-name"),
        query("foo-bar", "unrelated"),
        Element::from(template),
        Element::from(ErrorObject::new("Oops", "500", "")),
    ])
    .unwrap();

    let parsed = parse_collection(c.to_json().unwrap().as_bytes()).unwrap();
    assert_eq!(parsed.href(), "http://example.org/friends/");
    assert_eq!(parsed.queries().len(), 2);
    assert_eq!(parsed.queries()[1].rel, "foo-bar");
    assert_eq!(parsed.template().unwrap().data[0].prompt, "Email");
    assert_eq!(parsed.error().unwrap().code, "500");
}

#[test]
fn test_query_resolution_scenarios() {
    let c = new_collection([
        query("foo-bar", "unrelated"),
        query("other", "x"),
        query("feed", "foo"),
    ])
    .unwrap();
    let parsed = parse_collection(c.to_json().unwrap().as_bytes()).unwrap();

    // zero filters: everything reachable, each once
    assert_eq!(parsed.query(&[]).len(), 3);

    let rels: Vec<&str> = parsed.query(&["foo"]).iter().map(|q| q.rel.as_str()).collect();
    assert_eq!(rels, vec!["foo-bar", "feed"]);

    assert!(parsed.query(&["unrelated-nope"]).is_empty());
}

// Multiple filters are pinned to the behavior inherited from the earlier
// implementation: a key must contain every filter, so filters narrow the set of
// keys, and positions are then unioned across the keys that remain.
#[test]
fn test_multiple_filters_pinned_behavior() {
    let c = new_collection([query("foo-bar", "unrelated"), query("bar", "foo")]).unwrap();
    let parsed = parse_collection(c.to_json().unwrap().as_bytes()).unwrap();

    let found = parsed.query(&["foo", "bar"]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rel, "foo-bar");

    assert!(parsed.query(&["unrelated", "bar"]).is_empty());
}

#[test]
fn test_consumer_requires_wrapper_key() {
    let err = parse_collection(br#"{"version":"1.0","href":"http://example.com"}"#).unwrap_err();
    match err {
        HyperError::Parse(ParseError::MalformedDocument { reason, .. }) => {
            assert!(reason.contains("collection"));
        }
        other => panic!("Expected malformed document, got {other:?}"),
    }
}

#[test]
fn test_consumer_accepts_null_sequences() {
    let parsed = parse_collection(
        br#"{"collection":{"version":"1.0","links":null,"items":null,"queries":null}}"#,
    )
    .unwrap();
    assert!(parsed.links().is_empty());
    assert!(parsed.items().is_empty());
    assert!(parsed.query(&[]).is_empty());
}

#[test]
fn test_consumer_accepts_null_template_data() {
    let parsed = parse_collection(br#"{"collection":{"version":"1.0","template":{"data":null}}}"#)
        .unwrap();
    assert!(parsed.template().unwrap().data.is_empty());
}
