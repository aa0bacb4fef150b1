//! # ヘルスチェックハンドラ
//!
//! ゲートウェイの稼働状態を確認するためのエンドポイント。
//!
//! - `/health` - Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` - Readiness Check（Supabase AUTH への疎通を確認）
//!
//! レスポンス型は [`livros_shared::HealthResponse`] / [`livros_shared::ReadinessResponse`] を参照。

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use livros_shared::{CheckStatus, HealthResponse, ReadinessResponse};

use crate::client::SupabaseAuthClient;

/// 疎通確認のタイムアウト
const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// ゲートウェイのヘルスチェックエンドポイント
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "サーバー稼働中", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub supabase_client: Arc<dyn SupabaseAuthClient>,
}

/// ゲートウェイの Readiness Check エンドポイント
///
/// Supabase AUTH の `/health` を呼ぶ。成功 → 200、失敗・タイムアウト → 503。
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "バックエンド稼働中", body = ReadinessResponse),
        (status = 503, description = "バックエンドが利用不可", body = ReadinessResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let backend = check_backend(state.supabase_client.as_ref()).await;

    let response =
        ReadinessResponse::from_checks(BTreeMap::from([("backend".to_string(), backend)]));
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

/// Supabase AUTH への疎通を確認する（タイムアウト: 5 秒）
async fn check_backend(client: &dyn SupabaseAuthClient) -> CheckStatus {
    match tokio::time::timeout(READINESS_TIMEOUT, client.health()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: supabase health failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: supabase check timed out");
            CheckStatus::Error
        }
    }
}
