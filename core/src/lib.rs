//! Synchronous client for the PetFriends pet-management API.
//!
//! # Overview
//! Seven endpoint operations (API key, list, create with and without a
//! photo, update, delete, set photo), each normalized to a status code plus
//! a body that is JSON when the service sends JSON and raw text otherwise.
//!
//! # Design
//! - `PetFriendsClient` is stateless: it holds only `base_url`, builds
//!   `HttpRequest` values and normalizes `HttpResponse` values.
//! - `Transport` executes requests; `UreqTransport` is the blocking default.
//! - `PetFriends` ties the two together for one-call-per-operation use.
//! - Statuses are never errors. `ApiError` is reserved for unreadable upload
//!   files and transport failures.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod response;
pub mod transport;
pub mod types;

pub use api::PetFriends;
pub use client::PetFriendsClient;
pub use config::{ClientConfig, Settings};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use multipart::MultipartForm;
pub use response::{ApiResponse, ResponseBody};
pub use transport::{Transport, UreqTransport};
pub use types::{AuthKey, Credentials, Pet, PetFields, PetFilter, PetList};
