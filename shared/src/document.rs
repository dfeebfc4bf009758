//! Document envelope
//!
//! Every store speaks in schemaless documents: an id assigned by the store
//! plus a JSON object body. Typed models are decoded from the body with the
//! id injected, and encoded back without it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// JSON object body of a document
pub type DocumentData = Map<String, Value>;

/// Document decoding / encoding error
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Body does not match the expected model
    #[error("document {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Model did not serialize into a JSON object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A stored document: store-assigned id plus body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub data: DocumentData,
}

impl Document {
    pub fn new(id: impl Into<String>, data: DocumentData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Encode a model as a document body under the given id
    pub fn from_model<T: Serialize>(id: impl Into<String>, model: &T) -> Result<Self, DocumentError> {
        Ok(Self::new(id, to_data(model)?))
    }

    /// Decode the body into a model; the document id is written into the
    /// `id` field so models never carry a stale copy of it.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DocumentError> {
        let mut body = self.data.clone();
        body.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(body)).map_err(|source| DocumentError::Decode {
            id: self.id.clone(),
            source,
        })
    }

    /// Read a top-level field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Whether every filter matches this document
    pub fn matches(&self, filters: &[FieldFilter]) -> bool {
        filters.iter().all(|f| f.matches(self))
    }
}

/// Serialize a model into a document body, dropping any `id` field
pub fn to_data<T: Serialize>(model: &T) -> Result<DocumentData, DocumentError> {
    match serde_json::to_value(model)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(DocumentError::NotAnObject(other.to_string())),
    }
}

/// Equality filter on a top-level field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        doc.field(&self.field) == Some(&self.value)
    }
}
