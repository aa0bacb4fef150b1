//! 認証関連の Supabase クライアント（GoTrue）

use async_trait::async_trait;
use livros_domain::user::{Credentials, UserId};
use reqwest::{Method, RequestBuilder, header::AUTHORIZATION};
use serde::Deserialize;
use uuid::Uuid;

use super::{
    client_impl::{API_KEY_HEADER, SupabaseClientImpl},
    error::SupabaseError,
    response::{handle_empty_response, handle_response},
};
use crate::{context::BearerToken, middleware::request_id::inject_request_id};

/// `GET /auth/v1/user` のレスポンスのうち、ゲートウェイが使う部分
#[derive(Debug, Deserialize)]
struct CurrentUserResponse {
    id: Uuid,
}

/// 認証関連の Supabase クライアントトレイト
#[async_trait]
pub trait SupabaseAuthClient: Send + Sync {
    /// アカウントを登録する
    ///
    /// `POST /auth/v1/signup` を呼び出し、バックエンドのペイロードをそのまま返す。
    async fn signup(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<serde_json::Value>, SupabaseError>;

    /// パスワードでセッションを発行する
    ///
    /// `POST /auth/v1/token?grant_type=password` を呼び出し、
    /// トークンを含むペイロードをそのまま返す。
    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<serde_json::Value>, SupabaseError>;

    /// 呼び出し元のセッションを失効させる
    ///
    /// `POST /auth/v1/logout` を呼び出す。
    async fn logout(&self, token: &BearerToken) -> Result<(), SupabaseError>;

    /// トークンの持ち主のユーザー ID を解決する
    ///
    /// `GET /auth/v1/user` を呼び出す。
    async fn current_user(&self, token: &BearerToken) -> Result<UserId, SupabaseError>;

    /// AUTH サービスの疎通を確認する
    ///
    /// `GET /auth/v1/health` を呼び出す。
    async fn health(&self) -> Result<(), SupabaseError>;
}

impl SupabaseClientImpl {
    fn signup_request(&self, credentials: &Credentials) -> RequestBuilder {
        self.anonymous_auth_request(Method::POST, "signup")
            .json(credentials)
    }

    fn login_request(&self, credentials: &Credentials) -> RequestBuilder {
        self.anonymous_auth_request(Method::POST, "token")
            .query(&[("grant_type", "password")])
            .json(credentials)
    }

    fn logout_request(&self, token: &BearerToken) -> RequestBuilder {
        self.data_request(Method::POST, &self.auth_endpoint("logout"), token)
    }

    /// ユーザー解決は `apikey` と `Authorization` のみを付与する
    fn current_user_request(&self, token: &BearerToken) -> RequestBuilder {
        inject_request_id(self.client.get(self.auth_endpoint("user")))
            .header(API_KEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, token.as_header_value())
    }

    /// 疎通確認は `apikey` のみを付与する
    fn health_request(&self) -> RequestBuilder {
        inject_request_id(self.client.get(self.auth_endpoint("health")))
            .header(API_KEY_HEADER, &self.api_key)
    }
}

#[async_trait]
impl SupabaseAuthClient for SupabaseClientImpl {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn signup(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<serde_json::Value>, SupabaseError> {
        let response = self.signup_request(credentials).send().await?;
        handle_response(response).await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<serde_json::Value>, SupabaseError> {
        let response = self.login_request(credentials).send().await?;
        handle_response(response).await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn logout(&self, token: &BearerToken) -> Result<(), SupabaseError> {
        let response = self.logout_request(token).send().await?;
        handle_empty_response(response).await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn current_user(&self, token: &BearerToken) -> Result<UserId, SupabaseError> {
        let response = self.current_user_request(token).send().await?;
        let user: Option<CurrentUserResponse> = handle_response(response).await?;

        user.map(|u| UserId::from_uuid(u.id)).ok_or_else(|| {
            SupabaseError::MalformedResponse("ユーザー情報の本文が空です".to_string())
        })
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn health(&self) -> Result<(), SupabaseError> {
        let response = self.health_request().send().await?;
        handle_empty_response(response).await
    }
}
