//! # Supabase クライアント
//!
//! ゲートウェイから Supabase への通信を担当する。
//!
//! ## エンドポイント
//!
//! REST（PostgREST）: `{SUPABASE_URL}/rest/v1/{table}`
//!
//! - `GET ?select=*&limit&offset&order=created_at.desc[&title=ilike.*{q}*]` - 書籍一覧
//! - `GET ?select=*&id=eq.{id}` - 書籍取得
//! - `POST` - 書籍作成
//! - `PATCH ?id=eq.{id}` - 書籍更新
//! - `DELETE ?id=eq.{id}` - 書籍削除
//!
//! AUTH（GoTrue）: `{SUPABASE_URL}/auth/v1`
//!
//! - `POST /signup` - サインアップ
//! - `POST /token?grant_type=password` - ログイン
//! - `POST /logout` - ログアウト
//! - `GET /user` - トークンからユーザーを解決
//! - `GET /health` - 疎通確認
//!
//! ## ヘッダー
//!
//! データ呼び出し（REST とトークン付き AUTH 呼び出し）は `apikey`、呼び出し元の
//! `Authorization`（受信値そのまま）、`Content-Type` / `Accept: application/json`、
//! `Prefer: return=representation` を付与する。
//! サインアップ・ログインは `apikey` と `Content-Type` のみ。
//!
//! ## 行の可視性
//!
//! 行レベルの所有者フィルタはバックエンドの行セキュリティに委ねる。
//! ゲートウェイは所有者条件を付けずに問い合わせる。

mod auth_client;
mod book_client;
mod client_impl;
mod error;
mod response;

pub use auth_client::SupabaseAuthClient;
pub use book_client::SupabaseBookClient;
pub use client_impl::{SupabaseClient, SupabaseClientImpl};
pub use error::SupabaseError;
