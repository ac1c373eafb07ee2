//! HTTP client helpers (REST).
//!
//! # Design
//! - One client per app boot; the session token is swapped via interior mutability.
//! - Non-2xx responses become [`ApiError::Rejected`] with the decoded error body, if any.
//! - An unauthorized response to an authenticated request drops the stored token.

use std::cell::RefCell;

use async_trait::async_trait;
use gloo::console;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::app::preferences::{clear_token, persist_token};
use crate::core::api::{ApiError, AuthApi, ProductApi};
use crate::models::{ErrorBody, LoginRequest, LoginResponse, Product, UserIdentity};

#[derive(Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    token: RefCell<Option<String>>,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: RefCell::new(token),
        }
    }

    pub(crate) fn has_token(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub(crate) fn set_token(&self, token: Option<String>) {
        match &token {
            Some(value) => persist_token(value),
            None => clear_token(),
        }
        self.token.replace(token);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, req: Request) -> Request {
        match self.token.borrow().as_deref() {
            Some(token) => req.header("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }

    async fn send_authorized(&self, req: Request) -> Result<Response, ApiError> {
        let response = self
            .authorize(req)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        if response.status() == crate::core::api::STATUS_UNAUTHORIZED && self.has_token() {
            console::warn!("session token rejected; clearing stored token");
            self.set_token(None);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send_authorized(Request::get(&self.url(path))).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.json::<ErrorBody>().await.ok();
        return Err(ApiError::Rejected { status, body });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let req = Request::post(&self.url("/api/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let response = req
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        decode(response).await
    }

    fn adopt_token(&self, token: String) {
        self.set_token(Some(token));
    }

    async fn current_user(&self) -> Result<Option<UserIdentity>, ApiError> {
        if !self.has_token() {
            return Ok(None);
        }
        match self.get_json::<UserIdentity>("/api/auth/me").await {
            Ok(user) => Ok(Some(user)),
            Err(err) if err.is_unauthorized() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait(?Send)]
impl ProductApi for ApiClient {
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/api/products").await
    }
}
