//! Supabase クライアントのエラー型

use thiserror::Error;

/// Supabase クライアントエラー
///
/// `Rejected` はバックエンドの判断（4xx/5xx）をそのまま中継する。
/// それ以外はバックエンドから意味のある応答を得られなかったことを表し、
/// 呼び出し元には汎用の上流通信失敗として返す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupabaseError {
    /// バックエンドがエラーステータスを返した
    #[error("バックエンドがエラーを返しました（{status}）: {message}")]
    Rejected { status: u16, message: String },

    /// タイムアウト
    #[error("タイムアウト: {0}")]
    Timeout(String),

    /// 接続失敗などの通信エラー
    #[error("通信エラー: {0}")]
    Transport(String),

    /// 成功レスポンスの本文を解釈できない
    #[error("不正なレスポンス: {0}")]
    MalformedResponse(String),
}

impl SupabaseError {
    /// バックエンドの判断ではなく、通信そのものが失敗したか
    pub fn is_upstream_failure(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }
}

impl From<reqwest::Error> for SupabaseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SupabaseError::Timeout(err.to_string())
        } else if err.is_decode() {
            SupabaseError::MalformedResponse(err.to_string())
        } else {
            SupabaseError::Transport(err.to_string())
        }
    }
}
