//! # ユーザー
//!
//! ユーザーはバックエンド（Supabase Auth）が管理する。ゲートウェイが扱うのは
//! バックエンドが払い出した ID と、サインアップ・ログイン時に中継する認証情報だけ。

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// バックエンドが払い出したユーザー ID
///
/// 書籍作成時に `owner_id` として行に刻印する。
/// ゲートウェイ側で生成することはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// サインアップ・ログインの認証情報
///
/// 1 回の認証呼び出しの中でのみ使われ、保持しない。
/// 形式チェックはバックエンドに委ねる（両フィールドが存在することだけを要求する）。
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Credentials {
    pub email:    String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
