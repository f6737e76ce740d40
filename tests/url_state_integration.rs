use explore_sync::domain::{Query, RawTimeRange, ViewState};
use explore_sync::get_url_diff;
use explore_sync::infra::url_state::{parse_url_state, serialize_url_state};

#[test]
fn compact_and_object_forms_describe_the_same_view() {
    let compact = parse_url_state(r#"["now-1h","now","Loki",{"refId":"A","expr":"{job=\"api\"}"}]"#);
    let object = parse_url_state(
        r#"{"datasource":"Loki","queries":[{"refId":"A","expr":"{job=\"api\"}"}],"range":{"from":"now-1h","to":"now"}}"#,
    );
    assert_eq!(compact, object);
    assert!(get_url_diff(Some(&compact), Some(&object)).is_empty());
}

#[test]
fn unspecified_range_matches_default_range() {
    let without = parse_url_state(r#"{"datasource":"Loki"}"#);
    let with_default = ViewState {
        range: Some(RawTimeRange::default()),
        ..without.clone()
    };
    assert!(!get_url_diff(Some(&without), Some(&with_default)).range);
}

#[test]
fn serialized_state_parses_back() {
    let state = ViewState {
        datasource: Some("Prometheus".into()),
        queries: Some(vec![
            Query::new("A").with_field("expr", "up"),
            Query::new("B").with_field("expr", "rate(http_requests_total[5m])"),
        ]),
        range: Some(RawTimeRange::new("now-24h", "now")),
        origin_panel_id: Some(2),
    };
    assert_eq!(parse_url_state(&serialize_url_state(&state, false)), state);
}
