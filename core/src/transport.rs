//! Executing `HttpRequest` values over the network.
//!
//! `Transport` is the seam between the pure request/response data and the
//! blocking I/O. `UreqTransport` is the real implementation; tests can swap
//! in anything that returns canned `HttpResponse` values.

use std::time::Instant;

use ureq::typestate::WithBody;
use ureq::unversioned::multipart::{Form, Part};
use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::multipart::MultipartForm;

/// Largest response body read into memory. ureq's own default is 10 MiB,
/// which a full `api/pets` listing with embedded base64 photos can exceed.
pub const MAX_RESPONSE_BYTES: u64 = 512 * 1024 * 1024;

pub trait Transport {
    /// Send `request` and return whatever the server answered. Non-2xx
    /// statuses are responses, not errors.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a ureq `Agent`.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data. No timeout is set.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder().http_status_as_error(false).build().new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            url,
            headers,
            query,
            body,
        } = request;
        tracing::debug!(method = method.as_str(), url = %url, "sending request");
        let started = Instant::now();

        let result = match method {
            HttpMethod::Get => with_parts(self.agent.get(&url), &headers, &query).call(),
            HttpMethod::Delete => with_parts(self.agent.delete(&url), &headers, &query).call(),
            HttpMethod::Post => send_body(with_parts(self.agent.post(&url), &headers, &query), body),
            HttpMethod::Put => send_body(with_parts(self.agent.put(&url), &headers, &query), body),
        };
        let mut response = result.map_err(|err| {
            tracing::warn!(method = method.as_str(), url = %url, error = %err, "request failed");
            ApiError::from(err)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_string()?;
        tracing::debug!(
            method = method.as_str(),
            status,
            bytes = body.len(),
            elapsed = ?started.elapsed(),
            "response received"
        );

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_parts<B>(
    builder: RequestBuilder<B>,
    headers: &[(String, String)],
    query: &[(String, String)],
) -> RequestBuilder<B> {
    let builder = headers
        .iter()
        .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()));
    query.iter().fold(builder, |b, (name, value)| b.query(name, value))
}

fn send_body(builder: RequestBuilder<WithBody>, body: RequestBody) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        RequestBody::Empty => builder.send_empty(),
        RequestBody::Form(fields) => builder.send_form(fields),
        RequestBody::Multipart(form) => builder.send(wire_form(&form)?),
    }
}

/// Borrow the parts of `form` into a ureq multipart form. Content-Type and
/// boundary are set by ureq when the form is sent.
fn wire_form(form: &MultipartForm) -> Result<Form<'_>, ureq::Error> {
    let mut wire = Form::new();
    for part in form.parts() {
        let mut data = Part::bytes(&part.data);
        if let Some(filename) = &part.filename {
            data = data.file_name(filename);
        }
        if let Some(content_type) = &part.content_type {
            data = data.mime_str(content_type)?;
        }
        wire = wire.part(&part.name, data);
    }
    Ok(wire)
}
