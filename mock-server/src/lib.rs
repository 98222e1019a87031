//! In-process stand-in for the PetFriends service.
//!
//! Mirrors the live service's observable contract: JSON on success, HTML or
//! plain-text pages on most failures, 403 for bad credentials or keys, 400
//! for missing fields, 500 for uploads that are not images. Deleting an
//! unknown pet answers 200, as the live service does.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{multipart::Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const FORBIDDEN_PAGE: &str = "<!doctype html>\n<html lang=en>\n<title>403 Forbidden</title>\n<h1>Forbidden</h1>\n<p>This user wasn&#x27;t found in database</p>\n";
const SERVER_ERROR_PAGE: &str = "<!doctype html>\n<html lang=en>\n<title>500 Internal Server Error</title>\n<h1>Internal Server Error</h1>\n<p>The server encountered an internal error and was unable to complete your request.</p>\n";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub created_at: String,
    pub user_id: String,
}

/// A login the mock accepts.
#[derive(Clone, Debug)]
pub struct Account {
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

struct User {
    id: String,
    password: String,
    key: Option<String>,
}

#[derive(Default)]
struct Store {
    users: HashMap<String, User>,
    /// auth key -> email
    keys: HashMap<String, String>,
    /// Insertion order, newest first, as the service lists them.
    pets: Vec<Pet>,
}

impl Store {
    fn owner_of(&self, headers: &HeaderMap) -> Option<(String, String)> {
        let key = headers.get("auth_key")?.to_str().ok()?;
        let email = self.keys.get(key)?;
        let user = self.users.get(email)?;
        Some((email.clone(), user.id.clone()))
    }

    fn own_pet_mut(&mut self, id: &str, user_id: &str) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|p| p.id == id && p.user_id == user_id)
    }
}

type Db = Arc<RwLock<Store>>;

pub fn app(accounts: Vec<Account>) -> Router {
    let users = accounts
        .into_iter()
        .map(|a| {
            let user = User {
                id: Uuid::new_v4().simple().to_string(),
                password: a.password,
                key: None,
            };
            (a.email, user)
        })
        .collect();
    let db: Db = Arc::new(RwLock::new(Store {
        users,
        ..Store::default()
    }));
    Router::new()
        .route("/api/key", get(get_api_key))
        .route("/api/pets", get(list_pets).post(create_pet))
        .route("/api/pets/{id}", put(update_pet).delete(delete_pet))
        .route("/api/create_pet_simple", post(create_pet_simple))
        .route("/api/pets/set_photo/{id}", post(set_photo))
        .with_state(db)
}

pub async fn run(listener: TcpListener, accounts: Vec<Account>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(accounts)).await
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, Html(FORBIDDEN_PAGE)).into_response()
}

fn bad_request(reason: &str) -> Response {
    (StatusCode::BAD_REQUEST, reason.to_string()).into_response()
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
}

/// Key for `email`: issued on first login and reused afterwards.
async fn get_api_key(State(db): State<Db>, headers: HeaderMap) -> Response {
    let email = headers.get("email").and_then(|v| v.to_str().ok()).unwrap_or_default();
    let password = headers.get("password").and_then(|v| v.to_str().ok()).unwrap_or_default();

    let mut store = db.write().await;
    let Some(user) = store.users.get_mut(email).filter(|u| u.password == password) else {
        tracing::info!(email, "rejected login");
        return forbidden();
    };
    let key = user
        .key
        .get_or_insert_with(|| format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()))
        .clone();
    store.keys.insert(key.clone(), email.to_string());
    Json(json!({ "key": key })).into_response()
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    filter: String,
}

async fn list_pets(State(db): State<Db>, headers: HeaderMap, Query(query): Query<ListQuery>) -> Response {
    let store = db.read().await;
    let Some((_, user_id)) = store.owner_of(&headers) else {
        return forbidden();
    };
    let pets: Vec<&Pet> = match query.filter.as_str() {
        "" => store.pets.iter().collect(),
        "my_pets" => store.pets.iter().filter(|p| p.user_id == user_id).collect(),
        other => {
            tracing::warn!(filter = other, "unknown filter");
            return bad_request("Filter value is incorrect");
        }
    };
    Json(json!({ "pets": pets })).into_response()
}

#[derive(Deserialize)]
struct PetForm {
    name: Option<String>,
    animal_type: Option<String>,
    age: Option<String>,
}

/// Fields the service requires on creation; absent or empty is a 400.
fn required(field: Option<String>, name: &str) -> Result<String, Response> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(bad_request(&format!("The field {name} is required"))),
    }
}

fn new_pet(form: PetForm, user_id: String, pet_photo: String) -> Result<Pet, Response> {
    Ok(Pet {
        id: Uuid::new_v4().to_string(),
        name: required(form.name, "name")?,
        animal_type: required(form.animal_type, "animal_type")?,
        age: required(form.age, "age")?,
        pet_photo,
        created_at: now(),
        user_id,
    })
}

async fn create_pet_simple(State(db): State<Db>, headers: HeaderMap, Form(form): Form<PetForm>) -> Response {
    let mut store = db.write().await;
    let Some((_, user_id)) = store.owner_of(&headers) else {
        return forbidden();
    };
    match new_pet(form, user_id, String::new()) {
        Ok(pet) => {
            store.pets.insert(0, pet.clone());
            Json(pet).into_response()
        }
        Err(rejection) => rejection,
    }
}

struct Upload {
    fields: PetForm,
    photo: Option<Vec<u8>>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Response> {
    let mut upload = Upload {
        fields: PetForm {
            name: None,
            animal_type: None,
            age: None,
        },
        photo: None,
    };
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| bad_request(&e.body_text()))?;
        let text = || String::from_utf8_lossy(&bytes).into_owned();
        match name.as_str() {
            "name" => upload.fields.name = Some(text()),
            "animal_type" => upload.fields.animal_type = Some(text()),
            "age" => upload.fields.age = Some(text()),
            "pet_photo" => upload.photo = Some(bytes.to_vec()),
            _ => {}
        }
    }
    Ok(upload)
}

/// Photos are stored as data URLs. Anything that is not a JPEG or PNG makes
/// the service fail with a 500, whatever content type the client claimed.
fn photo_data_url(bytes: &[u8]) -> Option<String> {
    let mime = if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        "image/jpeg"
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]) {
        "image/png"
    } else {
        return None;
    };
    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

async fn create_pet(State(db): State<Db>, headers: HeaderMap, multipart: Multipart) -> Response {
    let Some((_, user_id)) = db.read().await.owner_of(&headers) else {
        return forbidden();
    };
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(rejection) => return rejection,
    };
    let Some(bytes) = upload.photo else {
        return bad_request("The field pet_photo is required");
    };
    let pet = match new_pet(upload.fields, user_id, String::new()) {
        Ok(pet) => pet,
        Err(rejection) => return rejection,
    };
    let Some(pet_photo) = photo_data_url(&bytes) else {
        tracing::warn!("rejected non-image upload");
        return server_error();
    };
    let pet = Pet { pet_photo, ..pet };
    db.write().await.pets.insert(0, pet.clone());
    Json(pet).into_response()
}

async fn update_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<PetForm>,
) -> Response {
    let mut store = db.write().await;
    let Some((_, user_id)) = store.owner_of(&headers) else {
        return forbidden();
    };
    let Some(pet) = store.own_pet_mut(&id, &user_id) else {
        return bad_request("Pet with this id wasn't found!");
    };
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    if let Some(name) = non_empty(form.name) {
        pet.name = name;
    }
    if let Some(animal_type) = non_empty(form.animal_type) {
        pet.animal_type = animal_type;
    }
    if let Some(age) = non_empty(form.age) {
        pet.age = age;
    }
    Json(pet.clone()).into_response()
}

/// Answers 200 with an empty body even when `id` matches nothing.
async fn delete_pet(State(db): State<Db>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let mut store = db.write().await;
    let Some((_, user_id)) = store.owner_of(&headers) else {
        return forbidden();
    };
    let before = store.pets.len();
    store.pets.retain(|p| !(p.id == id && p.user_id == user_id));
    if store.pets.len() == before {
        tracing::info!(id = %id, "delete matched no pet");
    }
    StatusCode::OK.into_response()
}

async fn set_photo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let Some((_, user_id)) = db.read().await.owner_of(&headers) else {
        return forbidden();
    };
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(rejection) => return rejection,
    };
    let Some(bytes) = upload.photo else {
        return bad_request("The field pet_photo is required");
    };
    let Some(pet_photo) = photo_data_url(&bytes) else {
        tracing::warn!(id = %id, "rejected non-image upload");
        return server_error();
    };
    let mut store = db.write().await;
    let Some(pet) = store.own_pet_mut(&id, &user_id) else {
        return bad_request("Pet with this id wasn't found!");
    };
    pet.pet_photo = pet_photo;
    Json(pet.clone()).into_response()
}

fn now() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    format!("{secs:.6}")
}
