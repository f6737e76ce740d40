//! URL view-state codec.
//!
//! Two encodings are accepted: the object form
//! `{"datasource":"Loki","queries":[...],"range":{"from":"now-1h","to":"now"}}`
//! and the compact array form `["now-1h","now","Loki",{"refId":"A",...}]`.

use serde_json::Value;

use crate::domain::{Query, RawTimeRange, ViewState};

/// Parses a pane's URL state. Never fails: fragments that cannot be read are
/// left unspecified, and unreadable input yields an empty `ViewState`.
pub fn parse_url_state(input: &str) -> ViewState {
    let input = input.trim();
    if input.is_empty() {
        return ViewState::default();
    }
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Array(items)) => parse_compact(&items),
        Ok(Value::Object(map)) => parse_object(&map),
        Ok(_) => ViewState::default(),
        Err(err) => {
            log::debug!("Unreadable URL state, using defaults: {err}");
            ViewState::default()
        }
    }
}

/// Encodes `state` in the object form, or the compact form when `compact` is set.
pub fn serialize_url_state(state: &ViewState, compact: bool) -> String {
    if !compact {
        return serde_json::to_string(state).unwrap_or_else(|_| "{}".to_string());
    }

    let range = state.range.clone().unwrap_or_default();
    let mut items = vec![
        Value::String(range.from),
        Value::String(range.to),
        state
            .datasource
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null),
    ];
    items.extend(
        state
            .queries
            .iter()
            .flatten()
            .filter_map(|q| serde_json::to_value(q).ok()),
    );
    Value::Array(items).to_string()
}

fn parse_compact(items: &[Value]) -> ViewState {
    let range = match (
        items.first().and_then(Value::as_str),
        items.get(1).and_then(Value::as_str),
    ) {
        (Some(from), Some(to)) => Some(RawTimeRange::new(from, to)),
        _ => None,
    };
    let datasource = items.get(2).and_then(datasource_name);
    let queries: Vec<Query> = items
        .iter()
        .skip(3)
        .filter(|v| v.is_object())
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect();

    ViewState {
        datasource,
        queries: (items.len() > 3).then_some(queries),
        range,
        origin_panel_id: None,
    }
}

fn parse_object(map: &serde_json::Map<String, Value>) -> ViewState {
    let range = map.get("range").and_then(|range| {
        let from = range.get("from")?.as_str()?;
        let to = range.get("to")?.as_str()?;
        Some(RawTimeRange::new(from, to))
    });
    let queries = map.get("queries").and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(|v| serde_json::from_value::<Query>(v.clone()).ok())
            .collect()
    });

    ViewState {
        datasource: map.get("datasource").and_then(datasource_name),
        queries,
        range,
        origin_panel_id: map.get("originPanelId").and_then(Value::as_i64),
    }
}

// Datasources are referenced by name, or by a `{uid}`/`{name}` object.
fn datasource_name(value: &Value) -> Option<String> {
    match value {
        Value::String(name) if !name.is_empty() => Some(name.clone()),
        Value::Object(map) => map
            .get("name")
            .or_else(|| map.get("uid"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
