//! # OpenAPI 仕様定義
//!
//! utoipa を使用してゲートウェイの OpenAPI 仕様を Rust の型から自動生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得でき、`/openapi.json` でも配信する。

use axum::Json;
use utoipa::{
    Modify,
    OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::handler::{auth, book, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Livros Gateway API",
        version = "0.1.0",
        description = "書籍カタログと認証を Supabase に中継するゲートウェイ API"
    ),
    paths(
        // health
        health::health_check,
        health::readiness_check,
        // auth
        auth::register,
        auth::login,
        auth::logout,
        // livros
        book::list_books,
        book::get_book,
        book::create_book,
        book::update_book,
        book::delete_book,
    ),
    components(schemas(
        livros_shared::ErrorResponse,
        livros_domain::book::Book,
    )),
    tags(
        (name = "health", description = "ヘルスチェック"),
        (name = "auth", description = "認証"),
        (name = "livros", description = "書籍カタログ"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// セキュリティスキーム定義
///
/// 保護されたエンドポイントは `Authorization: Bearer <token>` を要求する。
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
