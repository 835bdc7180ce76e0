//! Task document entity

use serde_json::{Map, Value};

use crate::{errors::DomainError, value_objects::TaskId};

/// A task as a weakly-typed attribute mapping.
///
/// Clients define the shape; the gateway only ever inspects the `task`
/// field on create and otherwise passes the mapping through to the store
/// untouched. No schema beyond that is assumed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDocument {
    fields: Map<String, Value>,
}

impl TaskDocument {
    /// Wrap an attribute mapping
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Borrow the attribute mapping
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Unwrap into the attribute mapping
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// True when the document carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a create payload: the `task` field must be present and
    /// truthy.
    pub fn validate_for_create(&self) -> Result<(), DomainError> {
        match self.fields.get("task") {
            Some(value) if is_truthy(value) => Ok(()),
            _ => Err(DomainError::MissingTaskContent),
        }
    }

    /// Validate an update payload: at least one field must be supplied.
    pub fn validate_for_update(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyUpdate);
        }
        Ok(())
    }

    /// Render the document as a JSON object with the store identifier
    /// injected under key `id`. A client-supplied `id` field is shadowed by
    /// the store's identifier.
    pub fn into_json_with_id(self, id: &TaskId) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(id.to_string()));
        Value::Object(fields)
    }
}

impl From<Map<String, Value>> for TaskDocument {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Truthiness of a JSON value: null, false, zero, and empty strings or
/// containers all count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> TaskDocument {
        let Value::Object(fields) = value else {
            unreachable!("test payloads are objects");
        };
        TaskDocument::new(fields)
    }

    #[test]
    fn create_accepts_nonempty_task() {
        assert!(doc(json!({"task": "buy milk"})).validate_for_create().is_ok());
        assert!(doc(json!({"task": "x", "done": false}))
            .validate_for_create()
            .is_ok());
    }

    #[test]
    fn create_rejects_missing_task() {
        let err = doc(json!({"note": "no task here"}))
            .validate_for_create()
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingTaskContent));
    }

    #[test]
    fn create_rejects_falsy_task_values() {
        for value in [
            json!({"task": null}),
            json!({"task": ""}),
            json!({"task": 0}),
            json!({"task": 0.0}),
            json!({"task": false}),
            json!({"task": []}),
            json!({"task": {}}),
        ] {
            assert!(
                doc(value.clone()).validate_for_create().is_err(),
                "expected rejection for {value}"
            );
        }
    }

    #[test]
    fn create_accepts_truthy_nonstring_task() {
        // The gateway enforces presence, not type.
        assert!(doc(json!({"task": 7})).validate_for_create().is_ok());
        assert!(doc(json!({"task": true})).validate_for_create().is_ok());
        assert!(doc(json!({"task": ["a"]})).validate_for_create().is_ok());
    }

    #[test]
    fn update_rejects_empty_payload() {
        let err = doc(json!({})).validate_for_update().unwrap_err();
        assert!(matches!(err, DomainError::EmptyUpdate));
    }

    #[test]
    fn update_accepts_any_field() {
        assert!(doc(json!({"done": true})).validate_for_update().is_ok());
    }

    #[test]
    fn id_injection_adds_id_key() {
        let id = TaskId::parse("abc123").unwrap();
        let rendered = doc(json!({"task": "buy milk"})).into_json_with_id(&id);
        assert_eq!(rendered, json!({"task": "buy milk", "id": "abc123"}));
    }

    #[test]
    fn id_injection_shadows_client_supplied_id() {
        let id = TaskId::parse("store-id").unwrap();
        let rendered = doc(json!({"task": "t", "id": "client-id"})).into_json_with_id(&id);
        assert_eq!(rendered["id"], json!("store-id"));
    }
}
