//! # 書籍カタログゲートウェイ サーバー
//!
//! 書籍カタログ CRUD と認証の公開 API を提供し、処理を Supabase に中継する。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────────┐
//! │    Client    │────▶│   Gateway    │────▶│ Supabase REST / AUTH │
//! │              │     │  port: 8000  │     │ (PostgREST / GoTrue) │
//! └──────────────┘     └──────────────┘     └──────────────────────┘
//! ```
//!
//! ゲートウェイは状態を持たない。呼び出し元の Bearer トークンをそのまま転送し、
//! 認可判断（行の可視性を含む）はバックエンドに委ねる。
//!
//! 環境変数は [`config`](livros_gateway::config) を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p livros-gateway
//!
//! # 本番環境（環境変数を直接指定）
//! SUPABASE_URL=https://... SUPABASE_ANON_KEY=... LOG_FORMAT=json \
//!     cargo run -p livros-gateway --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use livros_gateway::{app_builder::build_app, client::SupabaseClientImpl, config::GatewayConfig};
use livros_shared::{
    event_log::error::category,
    observability::{TracingConfig, init_tracing},
};
use tokio::net::TcpListener;

/// ゲートウェイのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. クライアントとルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("gateway"));
    let _tracing_guard = tracing::info_span!("app", service = "gateway").entered();

    let config = GatewayConfig::from_env().inspect_err(|e| {
        tracing::error!(
            error.category = category::CONFIGURATION,
            "設定の読み込みに失敗しました: {}",
            e
        );
    })?;

    tracing::info!(
        "ゲートウェイを起動します: {}:{}（backend: {}, table: {}）",
        config.host,
        config.port,
        config.supabase.url,
        config.supabase.table
    );

    let supabase_client = Arc::new(SupabaseClientImpl::new(&config.supabase)?);
    let app = build_app(supabase_client);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("ゲートウェイが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Ctrl+C を受けたらグレースフルシャットダウンを開始する
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("シグナルハンドラの登録に失敗しました: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("シャットダウンを開始します");
}
