//! Pagination envelope shared by every paginated list endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Error;

/// The `pagination` sub-object of a list response.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_records: u64,
}

/// One page of items together with the server's pagination metadata.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decodes `{ <collection_key>: [...], pagination: {...} }`.
    ///
    /// The items key differs per resource; when `collection_key` is absent
    /// the first array-valued field is taken instead.
    pub fn from_envelope(body: Value, collection_key: &str) -> Result<Self, Error> {
        let Value::Object(mut obj) = body else {
            return Err(Error::InvalidResponse(
                "expected an object with a pagination field".to_string(),
            ));
        };
        let pagination = obj
            .remove("pagination")
            .ok_or_else(|| Error::InvalidResponse("missing pagination".to_string()))?;
        let pagination: Pagination = serde_json::from_value(pagination)
            .map_err(|e| Error::InvalidResponse(format!("bad pagination: {}", e)))?;
        let items = take_items(&mut obj, collection_key)?;
        Ok(Self { items, pagination })
    }
}

/// Decodes an unpaginated list body: either a bare array or an object
/// carrying the array under `collection_key`.
pub(crate) fn items_from_body<T: DeserializeOwned>(
    body: Value,
    collection_key: &str,
) -> Result<Vec<T>, Error> {
    match body {
        Value::Array(_) => decode_items(body),
        Value::Object(mut obj) => take_items(&mut obj, collection_key),
        _ => Err(Error::InvalidResponse(
            "expected an array or an object".to_string(),
        )),
    }
}

fn take_items<T: DeserializeOwned>(
    obj: &mut Map<String, Value>,
    collection_key: &str,
) -> Result<Vec<T>, Error> {
    if let Some(items) = obj.remove(collection_key) {
        return decode_items(items);
    }
    let fallback = obj
        .iter()
        .find(|(_, v)| v.is_array())
        .map(|(k, _)| k.clone());
    match fallback {
        Some(key) => {
            tracing::debug!(
                "Envelope has no '{}' field, using '{}' instead",
                collection_key,
                key
            );
            decode_items(obj.remove(&key).unwrap_or(Value::Null))
        }
        None => Err(Error::InvalidResponse(format!(
            "no '{}' array in response",
            collection_key
        ))),
    }
}

fn decode_items<T: DeserializeOwned>(items: Value) -> Result<Vec<T>, Error> {
    serde_json::from_value(items).map_err(|e| Error::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Record;

    #[test]
    fn envelope_uses_collection_key() {
        let body = json!({
            "flights": [{"id": 1}, {"id": 2}],
            "pagination": {"page": 1, "limit": 10, "totalPages": 3, "totalRecords": 25}
        });
        let page: Page<Record> = Page::from_envelope(body, "flights").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.total_records, 25);
    }

    #[test]
    fn envelope_falls_back_to_first_array() {
        let body = json!({
            "data": [{"id": 7}],
            "pagination": {"page": 2, "limit": 1, "totalPages": 2, "totalRecords": 2}
        });
        let page: Page<Record> = Page::from_envelope(body, "packages").unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.page, 2);
    }

    #[test]
    fn envelope_without_pagination_is_rejected() {
        let body = json!({"flights": []});
        assert!(Page::<Record>::from_envelope(body, "flights").is_err());
    }

    #[test]
    fn bare_array_list() {
        let items: Vec<Record> = items_from_body(json!([{"id": 1}]), "maps").unwrap();
        assert_eq!(items.len(), 1);

        let items: Vec<Record> = items_from_body(json!({"maps": []}), "maps").unwrap();
        assert!(items.is_empty());

        assert!(items_from_body::<Record>(json!("nope"), "maps").is_err());
    }
}
