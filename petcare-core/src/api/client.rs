//! HTTP client for the petcare REST API.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::ScheduleApi;
use crate::config::PetcareConfig;
use crate::date::DisplayZone;
use crate::error::{PetcareError, PetcareResult};
use crate::models::{
    AuthResponse, Comment, LikeRequest, LoginRequest, NewComment, Pet, PetDraft, RawScheduleItem,
    RegisterRequest, SchedulePayload, User,
};
use crate::session::Session;

/// Body of a non-2xx reply.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    timeout_secs: u64,
    zone: DisplayZone,
}

impl ApiClient {
    /// Build a client for the configured server, authenticated as the
    /// session's user if there is one.
    pub fn new(config: &PetcareConfig, session: &Session) -> PetcareResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PetcareError::Network(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url: config.base_url()?,
            token: session.token().map(str::to_string),
            timeout_secs: config.timeout_secs,
            zone: config.zone()?,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> PetcareResult<Url> {
        endpoint(&self.base_url, segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn dispatch(&self, req: RequestBuilder, fallback: &str) -> PetcareResult<reqwest::Response> {
        let resp = req.send().await.map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            let err = api_error(status, &body, fallback);
            log::warn!("{}", err);
            return Err(err);
        }

        Ok(resp)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, fallback: &str) -> PetcareResult<T> {
        let resp = self.dispatch(req, fallback).await?;
        resp.json::<T>()
            .await
            .map_err(|e| PetcareError::Serialization(format!("{fallback}: {e}")))
    }

    async fn send_empty(&self, req: RequestBuilder, fallback: &str) -> PetcareResult<()> {
        self.dispatch(req, fallback).await?;
        Ok(())
    }

    fn transport_error(&self, e: reqwest::Error) -> PetcareError {
        if e.is_timeout() {
            PetcareError::Timeout(self.timeout_secs)
        } else {
            PetcareError::Network(e.to_string())
        }
    }

    // AUTH:

    /// POST /auth/register
    pub async fn register(&self, req: &RegisterRequest) -> PetcareResult<User> {
        req.validate()?;
        let url = self.endpoint(&["auth", "register"])?;
        self.send(self.request(Method::POST, url).json(req), "Registration failed")
            .await
    }

    /// POST /auth/login
    pub async fn login(&self, req: &LoginRequest) -> PetcareResult<AuthResponse> {
        req.validate()?;
        let url = self.endpoint(&["auth", "login"])?;
        self.send(self.request(Method::POST, url).json(req), "Login failed")
            .await
    }

    // PETS:

    /// GET /api/pets
    pub async fn list_pets(&self) -> PetcareResult<Vec<Pet>> {
        let url = self.endpoint(&["api", "pets"])?;
        self.send(self.request(Method::GET, url), "Failed to fetch pets")
            .await
    }

    /// GET /api/pets/owner/:ownerId
    pub async fn list_pets_by_owner(&self, owner_id: &str) -> PetcareResult<Vec<Pet>> {
        let url = self.endpoint(&["api", "pets", "owner", owner_id])?;
        self.send(self.request(Method::GET, url), "Failed to fetch pets")
            .await
    }

    /// GET /api/pets/:id
    pub async fn get_pet(&self, id: &str) -> PetcareResult<Pet> {
        let url = self.endpoint(&["api", "pets", id])?;
        self.send(self.request(Method::GET, url), "Failed to fetch pet")
            .await
    }

    /// POST /api/pets
    pub async fn create_pet(&self, draft: PetDraft) -> PetcareResult<Pet> {
        let draft = draft.validated(self.zone)?;
        let url = self.endpoint(&["api", "pets"])?;
        self.send(self.request(Method::POST, url).json(&draft), "Failed to add pet")
            .await
    }

    /// PUT /api/pets/:id
    pub async fn update_pet(&self, id: &str, draft: PetDraft) -> PetcareResult<Pet> {
        let draft = draft.validated(self.zone)?;
        let url = self.endpoint(&["api", "pets", id])?;
        self.send(self.request(Method::PUT, url).json(&draft), "Failed to edit pet")
            .await
    }

    /// DELETE /api/pets/:id
    pub async fn delete_pet(&self, id: &str) -> PetcareResult<()> {
        let url = self.endpoint(&["api", "pets", id])?;
        self.send_empty(self.request(Method::DELETE, url), "Failed to delete pet")
            .await
    }

    // COMMENTS:

    /// GET /api/comments/:petId
    pub async fn list_comments(&self, pet_id: &str) -> PetcareResult<Vec<Comment>> {
        let url = self.endpoint(&["api", "comments", pet_id])?;
        self.send(self.request(Method::GET, url), "Failed to fetch comments")
            .await
    }

    /// POST /api/comments/comment
    pub async fn create_comment(&self, comment: &NewComment) -> PetcareResult<Comment> {
        comment.validate()?;
        let url = self.endpoint(&["api", "comments", "comment"])?;
        self.send(
            self.request(Method::POST, url).json(comment),
            "Failed to create comment",
        )
        .await
    }

    /// POST /api/comments/like/:commentId
    pub async fn like_comment(&self, comment_id: &str, like: &LikeRequest) -> PetcareResult<Comment> {
        let url = self.endpoint(&["api", "comments", "like", comment_id])?;
        self.send(self.request(Method::POST, url).json(like), "Failed to like comment")
            .await
    }
}

#[async_trait]
impl ScheduleApi for ApiClient {
    async fn list_schedules(&self) -> PetcareResult<Vec<RawScheduleItem>> {
        let url = self.endpoint(&["api", "schedules"])?;
        self.send(self.request(Method::GET, url), "Failed to fetch schedules")
            .await
    }

    async fn list_schedules_for_pet(&self, pet_id: &str) -> PetcareResult<Vec<RawScheduleItem>> {
        let url = self.endpoint(&["api", "schedules", "pets", pet_id])?;
        self.send(self.request(Method::GET, url), "Failed to fetch schedules")
            .await
    }

    async fn get_schedule(&self, id: &str) -> PetcareResult<RawScheduleItem> {
        let url = self.endpoint(&["api", "schedules", id])?;
        self.send(self.request(Method::GET, url), "Failed to fetch schedule")
            .await
    }

    async fn create_schedule(&self, payload: &SchedulePayload) -> PetcareResult<RawScheduleItem> {
        let url = self.endpoint(&["api", "schedules"])?;
        self.send(
            self.request(Method::POST, url).json(payload),
            "Failed to add schedule",
        )
        .await
    }

    async fn update_schedule(
        &self,
        id: &str,
        payload: &SchedulePayload,
    ) -> PetcareResult<RawScheduleItem> {
        let url = self.endpoint(&["api", "schedules", id])?;
        self.send(
            self.request(Method::PUT, url).json(payload),
            "Failed to update schedule",
        )
        .await
    }

    async fn delete_schedule(&self, id: &str) -> PetcareResult<()> {
        let url = self.endpoint(&["api", "schedules", id])?;
        self.send_empty(self.request(Method::DELETE, url), "Failed to delete schedule")
            .await
    }
}

/// Append path segments to the base URL, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> PetcareResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| PetcareError::Config(format!("'{}' cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turn a non-2xx reply into an error, preferring the server's message.
fn api_error(status: StatusCode, body: &[u8], fallback: &str) -> PetcareError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    PetcareError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let base = Url::parse("http://localhost:5000").unwrap();
        assert_eq!(
            endpoint(&base, &["api", "schedules", "pets", "p1"]).unwrap().as_str(),
            "http://localhost:5000/api/schedules/pets/p1"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("https://example.com/petcare/").unwrap();
        assert_eq!(
            endpoint(&base, &["api", "pets"]).unwrap().as_str(),
            "https://example.com/petcare/api/pets"
        );
    }

    #[test]
    fn endpoint_encodes_ids() {
        let base = Url::parse("http://localhost:5000").unwrap();
        assert_eq!(
            endpoint(&base, &["api", "pets", "a/b c"]).unwrap().as_str(),
            "http://localhost:5000/api/pets/a%2Fb%20c"
        );
    }

    #[test]
    fn api_error_prefers_server_message() {
        let err = api_error(
            StatusCode::CONFLICT,
            br#"{"message": "Email already registered"}"#,
            "Registration failed",
        );
        assert_eq!(err.to_string(), "Email already registered (HTTP 409)");
    }

    #[test]
    fn api_error_falls_back() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>", "Failed to fetch pets");
        assert!(matches!(
            err,
            PetcareError::Api { status: 500, ref message } if message == "Failed to fetch pets"
        ));

        let err = api_error(StatusCode::BAD_REQUEST, br#"{"message": ""}"#, "Failed to add pet");
        assert!(err.to_string().starts_with("Failed to add pet"));
    }
}
