//! # ミドルウェア
//!
//! - `cache_control`: 動的レスポンスのキャッシュ抑止
//! - `request_id`: Request ID のバックエンド呼び出しへの伝播

pub mod cache_control;
pub mod request_id;

pub use cache_control::no_cache;
