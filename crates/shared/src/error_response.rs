//! # エラーレスポンス（エラーエンベロープ）
//!
//! ゲートウェイが返すすべての非 2xx レスポンスの共通形式 `{ "status", "message" }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はゲートウェイ側の責務（shared に axum 依存を入れない）
//! - `message` はバックエンドの構造化メッセージ、または生のレスポンステキスト

use serde::{Deserialize, Serialize};

/// 上流通信失敗時の固定メッセージ
///
/// バックエンドからメッセージを得られないため、内部情報を含めない固定値とする。
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Falha ao comunicar com o serviço de backend";

/// エラーレスポンス
///
/// `status` は HTTP ステータスコードと常に一致させる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub status:  u16,
    pub message: String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// バックエンドが返したステータスとメッセージをそのまま中継する場合に使用する。
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    /// 422 Unprocessable Entity
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(422, message)
    }

    /// 502 Bad Gateway
    ///
    /// message は固定値（上流の内部情報を漏らさないため）。
    pub fn upstream_failure() -> Self {
        Self::new(502, UPSTREAM_FAILURE_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_で全フィールドが正しく設定される() {
        let error = ErrorResponse::new(418, "sou um bule");

        assert_eq!(error.status, 418);
        assert_eq!(error.message, "sou um bule");
    }

    #[test]
    fn test_upstream_failure_が502と固定messageを返す() {
        let error = ErrorResponse::upstream_failure();

        assert_eq!(error.status, 502);
        assert_eq!(error.message, UPSTREAM_FAILURE_MESSAGE);
    }

    #[test]
    fn test_jsonシリアライズでstatusとmessageのみを出力する() {
        let error = ErrorResponse::bad_request("invalid");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": 400,
                "message": "invalid"
            })
        );
    }

    #[test]
    fn test_全便利コンストラクタのstatusが正しい() {
        assert_eq!(ErrorResponse::bad_request("").status, 400);
        assert_eq!(ErrorResponse::unauthorized("").status, 401);
        assert_eq!(ErrorResponse::unprocessable_entity("").status, 422);
        assert_eq!(ErrorResponse::upstream_failure().status, 502);
    }

    #[test]
    fn test_jsonデシリアライズが正しく動作する() {
        let json = r#"{"status": 404, "message": "não encontrado"}"#;
        let error: ErrorResponse = serde_json::from_str(json).unwrap();

        assert_eq!(error, ErrorResponse::new(404, "não encontrado"));
    }
}
