//! # 書籍カタログゲートウェイ ライブラリ
//!
//! 書籍カタログと認証の HTTP API を公開し、処理をすべて Supabase
//! （PostgREST / GoTrue）に委譲するゲートウェイのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の組み立てとルーター構築
//! - `client`: Supabase クライアント（認証・書籍テーブル）
//! - `config`: 環境変数からの設定読み込み
//! - `context`: Bearer トークンの検証とリクエストコンテキスト
//! - `error`: エラーの HTTP レスポンス変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（Request ID 伝播、キャッシュ制御）
//! - `openapi`: OpenAPI 仕様定義

pub mod app_builder;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod openapi;
