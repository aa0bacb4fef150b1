//! 書籍テーブルの Supabase クライアント（PostgREST）

use async_trait::async_trait;
use livros_domain::{
    book::{Book, BookPatch, NewBook},
    listing::BookListQuery,
};
use reqwest::{Method, RequestBuilder};

use super::{
    client_impl::SupabaseClientImpl,
    error::SupabaseError,
    response::{handle_empty_response, handle_response},
};
use crate::context::BearerToken;

/// 一覧の並び順（新しい順）
const LIST_ORDER: &str = "created_at.desc";

/// 書籍テーブルの Supabase クライアントトレイト
///
/// 取得・作成・更新はバックエンドが返した行の配列をそのまま返す。
/// 対象の行が見えない場合は空配列になる（404 には変換しない）。
#[async_trait]
pub trait SupabaseBookClient: Send + Sync {
    /// 書籍一覧を取得する
    async fn list_books(
        &self,
        token: &BearerToken,
        query: &BookListQuery,
    ) -> Result<Vec<Book>, SupabaseError>;

    /// ID で書籍を取得する
    async fn get_book(&self, token: &BearerToken, id: i64) -> Result<Vec<Book>, SupabaseError>;

    /// 書籍を作成する
    async fn create_book(
        &self,
        token: &BearerToken,
        book: &NewBook,
    ) -> Result<Vec<Book>, SupabaseError>;

    /// 書籍を部分更新する
    async fn update_book(
        &self,
        token: &BearerToken,
        id: i64,
        patch: &BookPatch,
    ) -> Result<Vec<Book>, SupabaseError>;

    /// 書籍を削除する
    ///
    /// 対象が存在しない（見えない）場合もバックエンドは成功を返す。
    async fn delete_book(&self, token: &BearerToken, id: i64) -> Result<(), SupabaseError>;
}

/// `id=eq.{id}` フィルタ
fn id_filter(id: i64) -> [(&'static str, String); 1] {
    [("id", format!("eq.{id}"))]
}

impl SupabaseClientImpl {
    fn list_books_request(&self, token: &BearerToken, query: &BookListQuery) -> RequestBuilder {
        let mut params = vec![
            ("select", "*".to_string()),
            ("limit", query.limit().to_string()),
            ("offset", query.offset().to_string()),
            ("order", LIST_ORDER.to_string()),
        ];
        if let Some(search) = query.title_contains() {
            params.push(("title", format!("ilike.*{search}*")));
        }

        self.data_request(Method::GET, &self.table_url(), token)
            .query(&params)
    }

    fn get_book_request(&self, token: &BearerToken, id: i64) -> RequestBuilder {
        self.data_request(Method::GET, &self.table_url(), token)
            .query(&[("select", "*")])
            .query(&id_filter(id))
    }

    fn create_book_request(&self, token: &BearerToken, book: &NewBook) -> RequestBuilder {
        self.data_request(Method::POST, &self.table_url(), token)
            .json(book)
    }

    fn update_book_request(&self, token: &BearerToken, id: i64, patch: &BookPatch) -> RequestBuilder {
        self.data_request(Method::PATCH, &self.table_url(), token)
            .query(&id_filter(id))
            .json(patch)
    }

    fn delete_book_request(&self, token: &BearerToken, id: i64) -> RequestBuilder {
        self.data_request(Method::DELETE, &self.table_url(), token)
            .query(&id_filter(id))
    }
}

#[async_trait]
impl SupabaseBookClient for SupabaseClientImpl {
    #[tracing::instrument(skip_all, level = "debug", fields(limit = query.limit(), offset = query.offset()))]
    async fn list_books(
        &self,
        token: &BearerToken,
        query: &BookListQuery,
    ) -> Result<Vec<Book>, SupabaseError> {
        let response = self.list_books_request(token, query).send().await?;
        Ok(handle_response(response).await?.unwrap_or_default())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn get_book(&self, token: &BearerToken, id: i64) -> Result<Vec<Book>, SupabaseError> {
        let response = self.get_book_request(token, id).send().await?;
        Ok(handle_response(response).await?.unwrap_or_default())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn create_book(
        &self,
        token: &BearerToken,
        book: &NewBook,
    ) -> Result<Vec<Book>, SupabaseError> {
        let response = self.create_book_request(token, book).send().await?;
        Ok(handle_response(response).await?.unwrap_or_default())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_book(
        &self,
        token: &BearerToken,
        id: i64,
        patch: &BookPatch,
    ) -> Result<Vec<Book>, SupabaseError> {
        let response = self.update_book_request(token, id, patch).send().await?;
        Ok(handle_response(response).await?.unwrap_or_default())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete_book(&self, token: &BearerToken, id: i64) -> Result<(), SupabaseError> {
        let response = self.delete_book_request(token, id).send().await?;
        handle_empty_response(response).await
    }
}
