//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、判断はバックエンド（Supabase）に委譲
//! - 保護されたハンドラは本文・パス・クエリの検証より先にトークンを検査する
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `auth`: 認証関連（サインアップ、ログイン、ログアウト）
//! - `book`: 書籍カタログ（一覧、取得、作成、更新、削除）

pub mod auth;
pub mod book;
pub mod health;

pub use auth::{AuthState, login, logout, register};
pub use book::{BookState, create_book, delete_book, get_book, list_books, update_book};
pub use health::{ReadinessState, health_check, readiness_check};
