//! Response normalization.
//!
//! Every operation yields a status code and a body. The body is JSON when
//! the service sends JSON and the raw text otherwise; several of the
//! service's error pages are HTML or plain text, so a parse failure is a
//! value, not an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{AuthKey, Pet, PetList};

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Structured(Value),
    Raw(String),
}

impl ResponseBody {
    /// Parse `text` as JSON, keeping the text itself when that fails.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Structured(value),
            Err(_) => ResponseBody::Raw(text),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ResponseBody::Structured(_))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Structured(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ResponseBody::Structured(_) => None,
            ResponseBody::Raw(text) => Some(text),
        }
    }

    /// Top-level field of a structured object body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_json()?.as_object()?.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name)?.as_str()
    }

    /// Membership test that works for either shape: key lookup on a
    /// structured object, substring search on raw text.
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            ResponseBody::Structured(Value::Object(map)) => map.contains_key(needle),
            ResponseBody::Structured(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some(needle)),
            ResponseBody::Structured(Value::String(s)) => s.contains(needle),
            ResponseBody::Structured(_) => false,
            ResponseBody::Raw(text) => text.contains(needle),
        }
    }

    /// Deserialize a structured body into `T`. Raw bodies and shape
    /// mismatches both yield `None`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.as_json()?.clone()).ok()
    }
}

/// Status code plus normalized body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn into_parts(self) -> (u16, ResponseBody) {
        (self.status, self.body)
    }

    /// The token from a successful `api/key` response.
    pub fn auth_key(&self) -> Option<AuthKey> {
        self.body.deserialize()
    }

    /// The listing from a successful `api/pets` response.
    pub fn pets(&self) -> Option<PetList> {
        self.body.deserialize()
    }

    /// The record echoed by create, update and set_photo.
    pub fn pet(&self) -> Option<Pet> {
        self.body.deserialize()
    }
}
