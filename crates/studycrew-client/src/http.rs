//! HTTP implementation of the studycrew backend API.

use std::sync::RwLock;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use studycrew_core::error::{error_message, ApiError};
use studycrew_core::model::{
    AcademicYear, AssignedCourse, Assistant, AuthSession, BulkUpdateRequest, Course,
    RegisterData, Semester, User,
};
use studycrew_core::traits::{ApiResult, StudyCrewApi};

use crate::config::StudyCrewConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the studycrew REST backend.
pub struct HttpApi {
    base_url: Url,
    client: reqwest::Client,
    timeout_secs: u64,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .field("token", &self.token().map(|_| "***"))
            .finish()
    }
}

/// A decoded 2xx response.
struct Reply {
    headers: HeaderMap,
    body: Option<Value>,
}

#[derive(Serialize)]
struct SignInBody<'a> {
    user: SignInUser<'a>,
}

#[derive(Serialize)]
struct SignInUser<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    user: &'a RegisterData,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url.trim()
        };
        let base_url =
            Url::parse(base).with_context(|| format!("invalid base URL: {base}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("invalid base URL: {base}");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url,
            client,
            timeout_secs: timeout.as_secs(),
            token: RwLock::new(None),
        })
    }

    pub fn from_config(config: &StudyCrewConfig) -> anyhow::Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// The bearer token currently installed, if any.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Build the URL of an endpoint from path segments, percent-encoding each.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Validation(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and turn non-2xx responses into errors.
    async fn send(&self, builder: reqwest::RequestBuilder) -> ApiResult<Reply> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Network(format!("request timed out after {}s", self.timeout_secs))
            } else {
                let message = e.to_string();
                if message.is_empty() {
                    ApiError::Network("Network error".into())
                } else {
                    ApiError::Network(message)
                }
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = serde_json::from_str::<Value>(&text).ok();

        if !status.is_success() {
            let code = status.as_u16();
            let message = error_message(code, body.as_ref());
            tracing::debug!(status = code, %message, "request failed");
            return Err(ApiError::from_status(code, message));
        }

        Ok(Reply { headers, body })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let reply = self.send(self.request(Method::GET, url)).await?;
        decode(reply.body.unwrap_or(Value::Null))
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull the user and token out of a sign-in or registration response.
///
/// The user is either the body itself or nested under `user`; the token is a
/// `token` field or the `Authorization` response header.
fn auth_session(reply: Reply) -> ApiResult<AuthSession> {
    let body = reply
        .body
        .ok_or_else(|| ApiError::Decode("empty response body".into()))?;

    let token = body
        .get("token")
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .or_else(|| {
            reply
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim().to_string())
        })
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Decode("response carried no token".into()))?;

    let user_value = if body.get("user").is_some_and(|u| u.is_object()) {
        body["user"].clone()
    } else {
        body
    };
    let user: User = decode(user_value)?;

    Ok(AuthSession { token, user })
}

#[async_trait]
impl StudyCrewApi for HttpApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        let url = self.endpoint(&["users", "sign_in"])?;
        let body = SignInBody {
            user: SignInUser { email, password },
        };
        let reply = self.send(self.request(Method::POST, url).json(&body)).await?;
        auth_session(reply)
    }

    #[instrument(skip(self, data), fields(email = %data.email))]
    async fn register(&self, data: &RegisterData) -> ApiResult<AuthSession> {
        let url = self.endpoint(&["users"])?;
        let body = RegisterBody { user: data };
        let reply = self.send(self.request(Method::POST, url).json(&body)).await?;
        auth_session(reply)
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> ApiResult<()> {
        let url = self.endpoint(&["users", "sign_out"])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn courses(
        &self,
        year: Option<AcademicYear>,
        semester: Option<Semester>,
    ) -> ApiResult<Vec<Course>> {
        let mut url = self.endpoint(&["courses"])?;
        if year.is_some() || semester.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(year) = year {
                query.append_pair("year", &year.number().to_string());
            }
            if let Some(semester) = semester {
                query.append_pair("semester", semester.label());
            }
        }
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn assistants_for_course(&self, course_code: &str) -> ApiResult<Vec<Assistant>> {
        let url = self.endpoint(&["courses", course_code, "assistants"])?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn assigned_courses(&self, assistant_id: u64) -> ApiResult<Vec<AssignedCourse>> {
        let id = assistant_id.to_string();
        let url = self.endpoint(&["assistant_courses", "by_assistant", &id])?;
        self.get_json(url).await
    }

    #[instrument(skip(self, request), fields(assistant_id = request.assistant_id, courses = request.course_ids.len()))]
    async fn bulk_update(&self, request: &BulkUpdateRequest) -> ApiResult<()> {
        let url = self.endpoint(&["assistant_courses", "bulk_update_with_availability"])?;
        self.send(self.request(Method::POST, url).json(request))
            .await?;
        Ok(())
    }
}
