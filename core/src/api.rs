//! One call per endpoint: build, send, normalize.

use std::path::Path;

use crate::client::PetFriendsClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::response::ApiResponse;
use crate::transport::{Transport, UreqTransport};
use crate::types::{AuthKey, PetFields, PetFilter};

/// Blocking PetFriends client bound to a transport.
///
/// Every method returns the normalized `(status, body)` pair as an
/// `ApiResponse`. `Err` means no response was obtained at all.
#[derive(Clone)]
pub struct PetFriends<T = UreqTransport> {
    client: PetFriendsClient,
    transport: T,
}

impl PetFriends<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> PetFriends<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: PetFriendsClient::from_config(config),
            transport,
        }
    }

    pub fn client(&self) -> &PetFriendsClient {
        &self.client
    }

    pub fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_get_api_key(email, password))
    }

    pub fn list_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_list_pets(auth_key, filter))
    }

    pub fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
        pet_photo: &Path,
    ) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_add_new_pet(auth_key, fields, pet_photo)?)
    }

    pub fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_delete_pet(auth_key, pet_id))
    }

    pub fn update_pet(&self, auth_key: &AuthKey, pet_id: &str, fields: &PetFields) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_update_pet(auth_key, pet_id, fields))
    }

    pub fn add_new_pet_simple(&self, auth_key: &AuthKey, fields: &PetFields) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_add_new_pet_simple(auth_key, fields))
    }

    pub fn set_pet_photo(&self, auth_key: &AuthKey, pet_id: &str, pet_photo: &Path) -> Result<ApiResponse, ApiError> {
        self.send(self.client.build_set_pet_photo(auth_key, pet_id, pet_photo)?)
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request)?;
        Ok(self.client.parse_response(response))
    }
}
