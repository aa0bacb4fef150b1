//! # 書籍カタログ API ハンドラ
//!
//! 書籍テーブルの CRUD を Supabase REST に中継する。
//!
//! ## エンドポイント
//!
//! - `GET /livros` - 書籍一覧（新しい順、`limit` / `offset` / `search`）
//! - `GET /livros/{id}` - 書籍取得（0 件または 1 件の配列）
//! - `POST /livros` - 書籍作成（呼び出し元を所有者として刻印）
//! - `PUT /livros/{id}` - 書籍の部分更新
//! - `DELETE /livros/{id}` - 書籍削除（204）
//!
//! 行の可視性・編集可否はバックエンドの行セキュリティが決める。
//! 対象が見えない場合、取得・更新は空配列、削除は 204 になる。

use std::{num::IntErrorKind, sync::Arc};

use axum::{
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use livros_domain::{
    book::{Book, BookDraft, BookPatch},
    listing::BookListQuery,
};
use livros_shared::{ErrorResponse, event_log::event, log_business_event};
use serde::{Deserialize, Deserializer, de};
use utoipa::{IntoParams, ToSchema};

use crate::{
    client::{SupabaseAuthClient, SupabaseBookClient},
    error::{
        authenticate,
        domain_error_response,
        json_rejection_response,
        log_and_convert_supabase_error,
        path_rejection_response,
        query_rejection_response,
    },
};

/// 書籍 API の共有状態
///
/// 作成時の所有者解決のため、AUTH クライアントも保持する。
pub struct BookState {
    pub book_client: Arc<dyn SupabaseBookClient>,
    pub auth_client: Arc<dyn SupabaseAuthClient>,
}

// --- リクエスト型 ---

/// 一覧取得のクエリパラメータ
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBooksParams {
    /// 取得件数（既定 50、上限 100）
    #[serde(default, deserialize_with = "saturating_i64")]
    pub limit:  Option<i64>,
    /// 読み飛ばす件数（既定 0、負値は 0）
    #[serde(default, deserialize_with = "saturating_i64")]
    pub offset: Option<i64>,
    /// タイトルの部分一致（大文字小文字を区別しない）
    pub search: Option<String>,
}

/// 整数のクエリ値を読み取る
///
/// `i64` に収まらない値は `i64::MAX` / `i64::MIN` に飽和させ、後段の切り詰めに委ねる。
/// 整数として読めない値は抽出失敗（422）にする。
fn saturating_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match raw.parse::<i64>() {
        Ok(value) => Ok(Some(value)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(Some(i64::MAX)),
            IntErrorKind::NegOverflow => Ok(Some(i64::MIN)),
            _ => Err(de::Error::custom(format!("`{raw}` は整数ではありません: {e}"))),
        },
    }
}

/// 書籍作成リクエスト
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    /// 1〜255 文字
    pub title:  String,
    /// 1〜255 文字
    pub author: String,
}

/// 書籍更新リクエスト
///
/// 少なくとも 1 フィールドが必要。`null` は未指定として扱う。
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookRequest {
    pub title:  Option<String>,
    pub author: Option<String>,
}

// --- ハンドラ ---

/// GET /livros
///
/// 書籍一覧を新しい順で取得する。
#[utoipa::path(
    get,
    path = "/livros",
    tag = "livros",
    security(("bearer_auth" = [])),
    params(ListBooksParams),
    responses(
        (status = 200, description = "書籍一覧", body = Vec<Book>),
        (status = 401, description = "トークン欠落・不正", body = ErrorResponse),
        (status = 422, description = "クエリパラメータの型不一致", body = ErrorResponse),
        (status = 502, description = "バックエンド通信失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(
    State(state): State<Arc<BookState>>,
    headers: HeaderMap,
    params: Result<Query<ListBooksParams>, QueryRejection>,
) -> Result<Response, Response> {
    let ctx = authenticate(&headers)?;
    let Query(params) = params.map_err(query_rejection_response)?;

    let query = BookListQuery::new(params.limit, params.offset, params.search);

    let books = state
        .book_client
        .list_books(ctx.token(), &query)
        .await
        .map_err(|e| log_and_convert_supabase_error("書籍一覧取得", e))?;

    Ok(Json(books).into_response())
}

/// GET /livros/{id}
///
/// ID で書籍を取得する。見つからない場合は空配列を返す。
#[utoipa::path(
    get,
    path = "/livros/{id}",
    tag = "livros",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "書籍 ID")),
    responses(
        (status = 200, description = "0 件または 1 件の書籍", body = Vec<Book>),
        (status = 401, description = "トークン欠落・不正", body = ErrorResponse),
        (status = 422, description = "ID が整数でない", body = ErrorResponse),
        (status = 502, description = "バックエンド通信失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_book(
    State(state): State<Arc<BookState>>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, Response> {
    let ctx = authenticate(&headers)?;
    let Path(id) = id.map_err(path_rejection_response)?;

    let books = state
        .book_client
        .get_book(ctx.token(), id)
        .await
        .map_err(|e| log_and_convert_supabase_error("書籍取得", e))?;

    Ok(Json(books).into_response())
}

/// POST /livros
///
/// 書籍を作成する。所有者は呼び出し元のトークンから解決する。
#[utoipa::path(
    post,
    path = "/livros",
    tag = "livros",
    security(("bearer_auth" = [])),
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "作成された書籍", body = Vec<Book>),
        (status = 401, description = "トークン欠落・不正", body = ErrorResponse),
        (status = 422, description = "タイトル・著者の違反", body = ErrorResponse),
        (status = 502, description = "バックエンド通信失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_book(
    State(state): State<Arc<BookState>>,
    headers: HeaderMap,
    body: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let ctx = authenticate(&headers)?;
    let Json(req) = body.map_err(json_rejection_response)?;

    let draft = BookDraft::new(req.title, req.author).map_err(domain_error_response)?;

    let owner_id = ctx
        .identity(state.auth_client.as_ref())
        .await
        .map_err(|e| log_and_convert_supabase_error("所有者の解決", e))?;

    let books = state
        .book_client
        .create_book(ctx.token(), &draft.owned_by(owner_id))
        .await
        .map_err(|e| log_and_convert_supabase_error("書籍作成", e))?;

    for book in &books {
        log_business_event!(
            event.category = event::category::BOOK,
            event.action = event::action::BOOK_CREATED,
            event.entity_type = event::entity_type::BOOK,
            event.entity_id = book.id,
            event.actor_id = %owner_id,
            event.result = event::result::SUCCESS,
            "書籍作成"
        );
    }

    Ok((StatusCode::CREATED, Json(books)).into_response())
}

/// PUT /livros/{id}
///
/// 指定されたフィールドだけを更新する。
#[utoipa::path(
    put,
    path = "/livros/{id}",
    tag = "livros",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "書籍 ID")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "更新された書籍", body = Vec<Book>),
        (status = 400, description = "更新対象フィールドなし", body = ErrorResponse),
        (status = 401, description = "トークン欠落・不正", body = ErrorResponse),
        (status = 422, description = "タイトル・著者の違反", body = ErrorResponse),
        (status = 502, description = "バックエンド通信失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_book(
    State(state): State<Arc<BookState>>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<Response, Response> {
    let ctx = authenticate(&headers)?;
    let Path(id) = id.map_err(path_rejection_response)?;
    let Json(req) = body.map_err(json_rejection_response)?;

    let patch = BookPatch::from_raw(req.title, req.author).map_err(domain_error_response)?;

    let books = state
        .book_client
        .update_book(ctx.token(), id, &patch)
        .await
        .map_err(|e| log_and_convert_supabase_error("書籍更新", e))?;

    if !books.is_empty() {
        log_business_event!(
            event.category = event::category::BOOK,
            event.action = event::action::BOOK_UPDATED,
            event.entity_type = event::entity_type::BOOK,
            event.entity_id = id,
            event.result = event::result::SUCCESS,
            "書籍更新"
        );
    }

    Ok(Json(books).into_response())
}

/// DELETE /livros/{id}
///
/// 書籍を削除する。
#[utoipa::path(
    delete,
    path = "/livros/{id}",
    tag = "livros",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "書籍 ID")),
    responses(
        (status = 204, description = "削除成功（対象が見えない場合も 204）"),
        (status = 401, description = "トークン欠落・不正", body = ErrorResponse),
        (status = 422, description = "ID が整数でない", body = ErrorResponse),
        (status = 502, description = "バックエンド通信失敗", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_book(
    State(state): State<Arc<BookState>>,
    headers: HeaderMap,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, Response> {
    let ctx = authenticate(&headers)?;
    let Path(id) = id.map_err(path_rejection_response)?;

    state
        .book_client
        .delete_book(ctx.token(), id)
        .await
        .map_err(|e| log_and_convert_supabase_error("書籍削除", e))?;

    log_business_event!(
        event.category = event::category::BOOK,
        event.action = event::action::BOOK_DELETED,
        event.entity_type = event::entity_type::BOOK,
        event.entity_id = id,
        event.result = event::result::SUCCESS,
        "書籍削除"
    );

    Ok(StatusCode::NO_CONTENT.into_response())
}
