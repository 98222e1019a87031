//! Domain DTOs for the PetFriends API.
//!
//! # Design
//! The service owns the pet schema. These types are conveniences for
//! callers who want typed access to a successful response; the client never
//! validates payloads against them, and request fields are plain strings
//! passed straight through to the form encoders.

use serde::{Deserialize, Deserializer, Serialize};

/// Login pair sent as the `email` and `password` headers of `api/key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The token mapping returned by `api/key`.
///
/// Callers pass the whole value to authorized operations; only `key` is
/// sent, as the `auth_key` header. The field is public so tests can tamper
/// with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthKey {
    pub key: String,
}

impl AuthKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Value of the `filter` query parameter on `api/pets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PetFilter {
    #[default]
    All,
    MyPets,
}

impl PetFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
        }
    }
}

/// Form fields for creating or updating a pet.
///
/// A `None` field is left out of the request entirely, which is how the
/// "missing required field" cases are expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFields {
    pub name: Option<String>,
    pub animal_type: Option<String>,
    pub age: Option<String>,
}

impl PetFields {
    pub fn new(name: &str, animal_type: &str, age: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            animal_type: Some(animal_type.to_string()),
            age: Some(age.to_string()),
        }
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn without_animal_type(mut self) -> Self {
        self.animal_type = None;
        self
    }

    /// Present fields as `(name, value)` pairs in the service's field order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        [
            ("name", &self.name),
            ("animal_type", &self.animal_type),
            ("age", &self.age),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
        .collect()
    }
}

/// A pet record as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub age: String,
    #[serde(default)]
    pub pet_photo: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body of a successful `api/pets` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

impl PetList {
    pub fn ids(&self) -> Vec<&str> {
        self.pets.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.pets.iter().any(|p| p.id == id)
    }
}

/// The service reports `age` as a string, but older records carry a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Age {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Age::deserialize(deserializer)? {
        Age::Text(s) => s,
        Age::Number(n) => n.to_string(),
    })
}
