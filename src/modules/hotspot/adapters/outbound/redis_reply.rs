//! Decoding of RediSearch replies (RESP2 shapes).
//!
//! `FT.SEARCH` answers `[total, key1, [field, value, ...], key2, [...], ...]`,
//! or `[total, key1, key2, ...]` with `NOCONTENT`. `FT.AGGREGATE` answers
//! `[count, [field, value, ...], ...]`.

use redis::Value;
use std::collections::HashMap;

use crate::modules::hotspot::core::ports::StoreError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchHit {
    pub key: String,
    pub fields: HashMap<String, String>,
}

impl SearchHit {
    pub fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchReply {
    pub total: u64,
    pub hits: Vec<SearchHit>,
}

pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::BulkString(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Value::SimpleString(text) => Some(text.clone()),
        Value::Int(number) => Some(number.to_string()),
        Value::Double(number) => Some(number.to_string()),
        Value::Okay => Some("OK".to_string()),
        _ => None,
    }
}

fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Int(number) => u64::try_from(*number).ok(),
        other => value_to_string(other)?.parse().ok(),
    }
}

fn field_pairs(values: &[Value]) -> HashMap<String, String> {
    values
        .chunks_exact(2)
        .filter_map(|pair| Some((value_to_string(&pair[0])?, value_to_string(&pair[1])?)))
        .collect()
}

pub fn parse_search_reply(reply: &Value) -> Result<SearchReply, StoreError> {
    let Value::Array(items) = reply else {
        return Err(StoreError::Backend(format!(
            "unexpected FT.SEARCH reply: {reply:?}"
        )));
    };
    let Some((first, rest)) = items.split_first() else {
        return Ok(SearchReply::default());
    };
    let total = value_to_u64(first).ok_or_else(|| {
        StoreError::Backend(format!("unexpected FT.SEARCH total: {first:?}"))
    })?;

    let mut hits: Vec<SearchHit> = Vec::new();
    for item in rest {
        match item {
            Value::Array(fields) => {
                if let Some(hit) = hits.last_mut() {
                    hit.fields = field_pairs(fields);
                }
            }
            other => {
                if let Some(key) = value_to_string(other) {
                    hits.push(SearchHit {
                        key,
                        fields: HashMap::new(),
                    });
                }
            }
        }
    }
    Ok(SearchReply { total, hits })
}

pub fn parse_aggregate_reply(reply: &Value) -> Result<Vec<HashMap<String, String>>, StoreError> {
    let Value::Array(items) = reply else {
        return Err(StoreError::Backend(format!(
            "unexpected FT.AGGREGATE reply: {reply:?}"
        )));
    };
    Ok(items
        .iter()
        .skip(1)
        .filter_map(|row| match row {
            Value::Array(fields) => Some(field_pairs(fields)),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod redis_reply_tests {
    use super::*;
    use rstest::rstest;

    fn bulk(text: &str) -> Value {
        Value::BulkString(text.as_bytes().to_vec())
    }

    #[rstest]
    fn it_should_parse_hits_with_fields() {
        let reply = Value::Array(vec![
            Value::Int(2),
            bulk("acme:q-1"),
            Value::Array(vec![
                bulk("question"),
                bulk("Reset password?"),
                bulk("vector_score"),
                bulk("0.1"),
            ]),
            bulk("acme:q-2"),
            Value::Array(vec![bulk("question"), bulk("Opening hours?")]),
        ]);

        let parsed = parse_search_reply(&reply).unwrap();
        assert_eq!(parsed.total, 2);
        assert_eq!(parsed.hits.len(), 2);
        assert_eq!(parsed.hits[0].key, "acme:q-1");
        assert_eq!(parsed.hits[0].field("question"), "Reset password?");
        assert_eq!(parsed.hits[0].field("vector_score"), "0.1");
        assert_eq!(parsed.hits[1].field("category"), "");
    }

    #[rstest]
    fn it_should_parse_nocontent_replies() {
        let reply = Value::Array(vec![Value::Int(2), bulk("acme:q-1"), bulk("acme:q-2")]);
        let parsed = parse_search_reply(&reply).unwrap();
        let keys: Vec<&str> = parsed.hits.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["acme:q-1", "acme:q-2"]);
    }

    #[rstest]
    fn it_should_parse_a_count_only_reply() {
        let parsed = parse_search_reply(&Value::Array(vec![Value::Int(7)])).unwrap();
        assert_eq!(parsed.total, 7);
        assert!(parsed.hits.is_empty());
    }

    #[rstest]
    fn it_should_reject_a_non_array_reply() {
        assert!(parse_search_reply(&Value::Nil).is_err());
    }

    #[rstest]
    fn it_should_parse_aggregate_rows() {
        let reply = Value::Array(vec![
            Value::Int(2),
            Value::Array(vec![bulk("category"), bulk("billing"), bulk("count"), bulk("3")]),
            Value::Array(vec![bulk("category"), bulk("shipping"), bulk("count"), bulk("1")]),
        ]);
        let rows = parse_aggregate_reply(&reply).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["category"], "billing");
        assert_eq!(rows[1]["count"], "1");
    }
}
