//! # ゲートウェイ設定
//!
//! 環境変数からゲートウェイの設定を読み込む。
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|-----------|------|
//! | `SUPABASE_URL` | **Yes** | - | Supabase プロジェクトのベース URL |
//! | `SUPABASE_ANON_KEY` | **Yes** | - | 全バックエンド呼び出しに付与する API キー |
//! | `TABLE_LIVROS` | No | `livros` | 書籍テーブル名 |
//! | `GATEWAY_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `GATEWAY_PORT` | No | `8000` | ポート番号 |
//! | `BACKEND_TIMEOUT_SECS` | No | `10` | バックエンド呼び出しのタイムアウト（秒） |

use std::{env, fmt, time::Duration};

use thiserror::Error;

const DEFAULT_TABLE: &str = "livros";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定（または空文字列）
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値を解釈できない
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// ゲートウェイの設定
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// バインドアドレス
    pub host:     String,
    /// ポート番号
    pub port:     u16,
    pub supabase: SupabaseConfig,
}

/// Supabase 接続設定
///
/// 起動時に一度だけ読み込み、以後は読み取り専用で共有する。
#[derive(Clone)]
pub struct SupabaseConfig {
    /// プロジェクトのベース URL（末尾の `/` は除去済み）
    pub url:     String,
    pub api_key: String,
    /// 書籍テーブル名
    pub table:   String,
    /// バックエンド呼び出し 1 回あたりのタイムアウト
    pub timeout: Duration,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// テストではプロセスの環境変数を書き換えずに検証するために使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &'static str| optional(name).ok_or(ConfigError::Missing(name));

        let url = required("SUPABASE_URL")?.trim_end_matches('/').to_string();
        let api_key = required("SUPABASE_ANON_KEY")?;

        let port = match optional("GATEWAY_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "GATEWAY_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match optional("BACKEND_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "BACKEND_TIMEOUT_SECS",
                        value,
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: optional("GATEWAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            supabase: SupabaseConfig {
                url,
                api_key,
                table: optional("TABLE_LIVROS").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
