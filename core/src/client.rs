//! Stateless HTTP request builder and response normalizer for PetFriends.
//!
//! # Design
//! `PetFriendsClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint has a `build_*` method that produces an
//! `HttpRequest`; every response goes through the single `parse_response`
//! normalizer, since the service's contract is uniform: a status code and a
//! body that may or may not be JSON. The caller (or `PetFriends`) executes
//! the actual HTTP round-trip.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::multipart::MultipartForm;
use crate::response::{ApiResponse, ResponseBody};
use crate::types::{AuthKey, PetFields, PetFilter};

/// Content type sent for every uploaded photo, whatever the file holds.
/// The service sniffs the bytes itself.
pub const PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// Synchronous, stateless client for the PetFriends API.
///
/// Builds `HttpRequest` values and normalizes `HttpResponse` values without
/// touching the network, apart from reading upload files.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: String,
}

impl PetFriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET api/key` with the login pair in custom `email` / `password`
    /// headers.
    pub fn build_get_api_key(&self, email: &str, password: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url("api/key"),
            headers: vec![
                ("email".to_string(), email.to_string()),
                ("password".to_string(), password.to_string()),
            ],
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn build_list_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url("api/pets"),
            headers: auth_header(auth_key),
            query: vec![("filter".to_string(), filter.as_str().to_string())],
            body: RequestBody::Empty,
        }
    }

    /// `POST api/pets` as multipart, with the photo under `pet_photo`.
    ///
    /// The photo is read before the request exists, so an unreadable file
    /// fails here and nothing is sent.
    pub fn build_add_new_pet(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
        pet_photo: &Path,
    ) -> Result<HttpRequest, ApiError> {
        let (filename, data) = read_upload(pet_photo)?;
        let form = fields
            .pairs()
            .iter()
            .fold(MultipartForm::new(), |form, (k, v)| form.text(k, v))
            .file("pet_photo", &filename, PHOTO_CONTENT_TYPE, data);
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url("api/pets"),
            headers: auth_header(auth_key),
            query: Vec::new(),
            body: RequestBody::Multipart(form),
        })
    }

    pub fn build_delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.url(&format!("api/pets/{pet_id}")),
            headers: auth_header(auth_key),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn build_update_pet(&self, auth_key: &AuthKey, pet_id: &str, fields: &PetFields) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Put,
            url: self.url(&format!("api/pets/{pet_id}")),
            headers: auth_header(auth_key),
            query: Vec::new(),
            body: RequestBody::Form(fields.pairs()),
        }
    }

    pub fn build_add_new_pet_simple(&self, auth_key: &AuthKey, fields: &PetFields) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url("api/create_pet_simple"),
            headers: auth_header(auth_key),
            query: Vec::new(),
            body: RequestBody::Form(fields.pairs()),
        }
    }

    pub fn build_set_pet_photo(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        pet_photo: &Path,
    ) -> Result<HttpRequest, ApiError> {
        let (filename, data) = read_upload(pet_photo)?;
        let form = MultipartForm::new().file("pet_photo", &filename, PHOTO_CONTENT_TYPE, data);
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(&format!("api/pets/set_photo/{pet_id}")),
            headers: auth_header(auth_key),
            query: Vec::new(),
            body: RequestBody::Multipart(form),
        })
    }

    /// Normalize a response into `(status, body)`. Never fails: a body that
    /// is not JSON is kept as raw text.
    pub fn parse_response(&self, response: HttpResponse) -> ApiResponse {
        let body = ResponseBody::parse(response.body);
        if response.status == 200 && !body.is_structured() {
            tracing::warn!(status = response.status, "success response without a JSON body");
        }
        tracing::debug!(status = response.status, structured = body.is_structured(), "response normalized");
        ApiResponse::new(response.status, body)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

fn auth_header(auth_key: &AuthKey) -> Vec<(String, String)> {
    vec![("auth_key".to_string(), auth_key.key.clone())]
}

/// Read an upload file in one scoped call; the handle is closed before this
/// returns, on success and on error alike.
fn read_upload(path: &Path) -> Result<(String, Vec<u8>), ApiError> {
    let data = std::fs::read(path).map_err(|source| ApiError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pet_photo".to_string());
    Ok((filename, data))
}
