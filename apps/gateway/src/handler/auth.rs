//! # 認証 API ハンドラ
//!
//! サインアップ・ログイン・ログアウトを Supabase AUTH に中継する。
//!
//! ## エンドポイント
//!
//! - `POST /auth/registrar` - アカウント登録（201、バックエンドのペイロードを中継）
//! - `POST /auth/login` - ログイン（200、トークンを含むペイロードを中継）
//! - `POST /auth/logout` - ログアウト（200、固定メッセージ）
//!
//! ゲートウェイはセッションを保持しない。トークンの発行・失効はすべてバックエンドが行う。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use livros_domain::user::Credentials;
use livros_shared::{ErrorResponse, event_log::event, log_business_event};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    client::{SupabaseAuthClient, SupabaseError},
    error::{authenticate, json_rejection_response, log_and_convert_supabase_error},
};

/// ログアウト成功時のメッセージ
pub const LOGOUT_MESSAGE: &str = "Logout realizado com sucesso";

/// 認証 API の共有状態
pub struct AuthState {
    pub supabase_client: Arc<dyn SupabaseAuthClient>,
}

/// ログアウトレスポンス
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub mensagem: String,
}

/// POST /auth/registrar
///
/// アカウントを登録する。形式チェックはバックエンドに委ねる。
#[utoipa::path(
    post,
    path = "/auth/registrar",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "登録成功（バックエンドのペイロードをそのまま返す）"),
        (status = 422, description = "必須フィールドの欠落", body = ErrorResponse),
        (status = 502, description = "バックエンド通信失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<Arc<AuthState>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(credentials) = body.map_err(json_rejection_response)?;

    let payload = state
        .supabase_client
        .signup(&credentials)
        .await
        .map_err(|e| log_and_convert_supabase_error("サインアップ", e))?;

    log_business_event!(
        event.category = event::category::AUTH,
        event.action = event::action::SIGNUP,
        event.entity_type = event::entity_type::USER,
        event.result = event::result::SUCCESS,
        "サインアップ成功"
    );

    Ok((
        StatusCode::CREATED,
        Json(payload.unwrap_or(serde_json::Value::Null)),
    )
        .into_response())
}

/// POST /auth/login
///
/// メールアドレスとパスワードでログインする。
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "ログイン成功（トークンを含むペイロードをそのまま返す）"),
        (status = 400, description = "認証情報の誤り（バックエンドの判断を中継）", body = ErrorResponse),
        (status = 422, description = "必須フィールドの欠落", body = ErrorResponse),
        (status = 502, description = "バックエンド通信失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, Response> {
    let Json(credentials) = body.map_err(json_rejection_response)?;

    match state.supabase_client.login(&credentials).await {
        Ok(payload) => {
            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_SUCCESS,
                event.entity_type = event::entity_type::SESSION,
                event.result = event::result::SUCCESS,
                "ログイン成功"
            );
            Ok(Json(payload.unwrap_or(serde_json::Value::Null)).into_response())
        }
        Err(e @ SupabaseError::Rejected { .. }) => {
            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_FAILURE,
                event.entity_type = event::entity_type::SESSION,
                event.result = event::result::FAILURE,
                "ログイン失敗"
            );
            Err(log_and_convert_supabase_error("ログイン", e))
        }
        Err(e) => Err(log_and_convert_supabase_error("ログイン", e)),
    }
}

/// POST /auth/logout
///
/// 呼び出し元のセッションをバックエンドで失効させる。
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "ログアウト成功", body = LogoutResponse),
        (status = 401, description = "トークン欠落・不正", body = ErrorResponse),
        (status = 502, description = "バックエンド通信失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    let ctx = authenticate(&headers)?;

    state
        .supabase_client
        .logout(ctx.token())
        .await
        .map_err(|e| log_and_convert_supabase_error("ログアウト", e))?;

    log_business_event!(
        event.category = event::category::AUTH,
        event.action = event::action::LOGOUT,
        event.entity_type = event::entity_type::SESSION,
        event.result = event::result::SUCCESS,
        "ログアウト"
    );

    Ok(Json(LogoutResponse {
        mensagem: LOGOUT_MESSAGE.to_string(),
    })
    .into_response())
}
