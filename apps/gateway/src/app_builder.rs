//! # ゲートウェイ アプリケーション構築
//!
//! State の組み立てとルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use livros_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    client::{SupabaseAuthClient, SupabaseBookClient, SupabaseClient},
    error::{method_not_allowed, route_not_found},
    handler::{
        AuthState,
        BookState,
        ReadinessState,
        create_book,
        delete_book,
        get_book,
        health_check,
        list_books,
        login,
        logout,
        readiness_check,
        register,
        update_book,
    },
    middleware::{no_cache, request_id::store_request_id},
    openapi::openapi_json,
};

/// State の構築とルーター定義を行う
///
/// クライアントは具象型で受け取り、各 State 注入時に必要なトレイトオブジェクトへ
/// coerce する。テストではスタブクライアントを渡す。
pub fn build_app<C>(supabase_client: Arc<C>) -> Router
where
    C: SupabaseClient + 'static,
{
    let auth_client: Arc<dyn SupabaseAuthClient> = supabase_client.clone();
    let book_client: Arc<dyn SupabaseBookClient> = supabase_client;

    let readiness_state = Arc::new(ReadinessState {
        supabase_client: auth_client.clone(),
    });

    let auth_state = Arc::new(AuthState {
        supabase_client: auth_client.clone(),
    });

    // 作成時の所有者解決に AUTH クライアントも必要
    let book_state = Arc::new(BookState {
        book_client,
        auth_client,
    });

    Router::new()
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/auth/registrar", post(register))
                .route("/auth/login", post(login))
                .route("/auth/logout", post(logout))
                .with_state(auth_state),
        )
        .merge(
            Router::new()
                .route("/livros", get(list_books).post(create_book))
                .route(
                    "/livros/{id}",
                    get(get_book).put(update_book).delete(delete_book),
                )
                .with_state(book_state),
        )
        // 未定義パス・未対応メソッドもエラーエンベロープで返す
        // （メソッドのフォールバックは登録済みルートにだけ適用されるため、merge の後に置く）
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(from_fn(no_cache))
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 3. CanonicalLogLineLayer: リクエスト完了時に 1 行サマリログを出力（スパン内）
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        // 5. store_request_id: task-local に保存し、Supabase 呼び出しのヘッダーに伝播
        .layer(from_fn(store_request_id))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
