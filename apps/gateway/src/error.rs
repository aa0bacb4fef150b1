//! # ゲートウェイ エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! すべての非 2xx レスポンスは `{ "status", "message" }` のエラーエンベロープで返す。
//!
//! | 発生源 | HTTP ステータス |
//! |--------|----------------|
//! | トークン欠落・不正 | 401 |
//! | 入力値の違反（`DomainError::Validation`、パス・クエリの型不一致） | 422 |
//! | 更新対象フィールドなし（`DomainError::EmptyUpdate`） | 400 |
//! | JSON 本文の不正 | 抽出器が決めたステータス（400 / 415 / 422） |
//! | バックエンドのエラー応答 | バックエンドのステータスそのまま |
//! | 通信失敗・タイムアウト・不正な成功応答 | 502 |

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use livros_domain::DomainError;
use livros_shared::{
    ErrorResponse,
    event_log::error::{category, kind},
};

use crate::{
    client::SupabaseError,
    context::{BearerToken, INVALID_TOKEN_MESSAGE, RequestContext, TokenError},
};

// --- 共通ヘルパー関数 ---

/// Bearer トークンを検査し、リクエストコンテキストを作る
///
/// 保護されたハンドラの先頭で呼び、失敗時はバックエンドを呼ばずに 401 を返す。
pub fn authenticate(headers: &HeaderMap) -> Result<RequestContext, Response> {
    BearerToken::from_headers(headers)
        .map(RequestContext::new)
        .map_err(IntoResponse::into_response)
}

/// エラーエンベロープをレスポンスにする
///
/// `status` と HTTP ステータスは常に一致させる。
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse::new(status.as_u16(), message)),
    )
        .into_response()
}

// --- IntoResponse ---

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized(INVALID_TOKEN_MESSAGE)),
        )
            .into_response()
    }
}

impl IntoResponse for SupabaseError {
    fn into_response(self) -> Response {
        match self {
            SupabaseError::Rejected { status, message } => {
                match StatusCode::from_u16(status) {
                    Ok(status) => error_response(status, message),
                    Err(_) => upstream_failure_response(),
                }
            }
            SupabaseError::Timeout(_)
            | SupabaseError::Transport(_)
            | SupabaseError::MalformedResponse(_) => upstream_failure_response(),
        }
    }
}

/// ドメインエラーをレスポンスに変換する
pub fn domain_error_response(err: DomainError) -> Response {
    let status = match err {
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::EmptyUpdate => StatusCode::BAD_REQUEST,
    };
    error_response(status, err.to_string())
}

/// Supabase エラーをログ付きでレスポンスに変換する
///
/// 通信失敗系はコンテキスト付きで `tracing::error!` を出力する。
/// バックエンドが返したエラーは判断の中継なので debug に留める。
pub fn log_and_convert_supabase_error(context: &str, err: SupabaseError) -> Response {
    match &err {
        SupabaseError::Rejected { status, message } => {
            tracing::debug!(
                upstream.status = status,
                "{}でバックエンドがエラーを返しました: {}",
                context,
                message
            );
        }
        SupabaseError::MalformedResponse(_) => {
            tracing::error!(
                error.category = category::EXTERNAL_SERVICE,
                error.kind = kind::MALFORMED_RESPONSE,
                "{}で内部エラー: {}",
                context,
                err
            );
        }
        SupabaseError::Timeout(_) | SupabaseError::Transport(_) => {
            tracing::error!(
                error.category = category::EXTERNAL_SERVICE,
                error.kind = kind::SERVICE_COMMUNICATION,
                "{}で内部エラー: {}",
                context,
                err
            );
        }
    }
    err.into_response()
}

// --- 抽出器の拒否 ---

/// JSON 本文の抽出失敗をエラーエンベロープに変換する
///
/// ステータスは抽出器の判断（構文エラー 400、Content-Type 不一致 415、
/// 必須フィールド欠落・型不一致 422）を採用する。
pub fn json_rejection_response(rejection: JsonRejection) -> Response {
    error_response(rejection.status(), rejection.body_text())
}

/// パスパラメータの抽出失敗をエラーエンベロープに変換する
pub fn path_rejection_response(rejection: PathRejection) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
}

/// クエリパラメータの抽出失敗をエラーエンベロープに変換する
pub fn query_rejection_response(rejection: QueryRejection) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
}

// --- ルーティングのフォールバック ---

/// 未定義パスのメッセージ
pub const NOT_FOUND_MESSAGE: &str = "Recurso não encontrado";

/// 未対応メソッドのメッセージ
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Método não permitido";

/// どのルートにも一致しないリクエスト（404）
pub async fn route_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

/// パスは一致するがメソッドが未対応のリクエスト（405）
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

// --- レスポンスヘルパー ---

/// 上流通信失敗レスポンス
pub fn upstream_failure_response() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse::upstream_failure()),
    )
        .into_response()
}
