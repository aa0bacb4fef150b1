//! 統合テスト共通のスタブとヘルパー
//!
//! スタブは受けた呼び出しを記録し、設定された結果を返す。
//! 「バックエンドを呼ばなかった」ことを `calls()` が空であることで検証する。

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use livros_domain::{
    book::{Book, BookPatch, NewBook},
    listing::BookListQuery,
    user::{Credentials, UserId},
};
use livros_gateway::{
    app_builder::build_app,
    client::{SupabaseAuthClient, SupabaseBookClient, SupabaseError},
    context::BearerToken,
    middleware::request_id::current_request_id,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const VALID_TOKEN: &str = "Bearer header.payload.signature";

pub const OWNER_ID: &str = "4c1e9d2a-6b3f-4a8e-9f10-2b7c5d8e1a34";

/// スタブが受けた呼び出し
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Signup { email: String },
    Login { email: String },
    Logout { token: String },
    CurrentUser { token: String },
    ListBooks {
        limit:  i64,
        offset: i64,
        search: Option<String>,
    },
    GetBook { id: i64 },
    CreateBook { body: Value },
    UpdateBook { id: i64, body: Value },
    DeleteBook { id: i64 },
    Health,
}

/// 呼び出しを記録する Supabase スタブ
#[derive(Default)]
pub struct StubSupabase {
    calls:        Mutex<Vec<Call>>,
    request_ids:  Mutex<Vec<Option<String>>>,
    books:        Vec<Book>,
    auth_payload: Option<Value>,
    failure:      Option<SupabaseError>,
}

impl StubSupabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書籍系の呼び出しが返す行
    pub fn with_books(mut self, books: Vec<Book>) -> Self {
        self.books = books;
        self
    }

    /// サインアップ・ログインが返すペイロード
    pub fn with_auth_payload(mut self, payload: Value) -> Self {
        self.auth_payload = Some(payload);
        self
    }

    /// すべての呼び出しを指定エラーで失敗させる
    pub fn failing(mut self, err: SupabaseError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// 各呼び出し時点の Request ID
    pub fn request_ids(&self) -> Vec<Option<String>> {
        self.request_ids.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), SupabaseError> {
        self.calls.lock().unwrap().push(call);
        self.request_ids.lock().unwrap().push(current_request_id());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SupabaseAuthClient for StubSupabase {
    async fn signup(&self, credentials: &Credentials) -> Result<Option<Value>, SupabaseError> {
        self.record(Call::Signup {
            email: credentials.email.clone(),
        })?;
        Ok(self.auth_payload.clone())
    }

    async fn login(&self, credentials: &Credentials) -> Result<Option<Value>, SupabaseError> {
        self.record(Call::Login {
            email: credentials.email.clone(),
        })?;
        Ok(self.auth_payload.clone())
    }

    async fn logout(&self, token: &BearerToken) -> Result<(), SupabaseError> {
        self.record(Call::Logout {
            token: token.as_header_value().to_string(),
        })
    }

    async fn current_user(&self, token: &BearerToken) -> Result<UserId, SupabaseError> {
        self.record(Call::CurrentUser {
            token: token.as_header_value().to_string(),
        })?;
        Ok(UserId::from_uuid(Uuid::parse_str(OWNER_ID).unwrap()))
    }

    async fn health(&self) -> Result<(), SupabaseError> {
        self.record(Call::Health)
    }
}

#[async_trait]
impl SupabaseBookClient for StubSupabase {
    async fn list_books(
        &self,
        _token: &BearerToken,
        query: &BookListQuery,
    ) -> Result<Vec<Book>, SupabaseError> {
        self.record(Call::ListBooks {
            limit:  query.limit(),
            offset: query.offset(),
            search: query.title_contains().map(str::to_string),
        })?;
        Ok(self.books.clone())
    }

    async fn get_book(&self, _token: &BearerToken, id: i64) -> Result<Vec<Book>, SupabaseError> {
        self.record(Call::GetBook { id })?;
        Ok(self.books.clone())
    }

    async fn create_book(
        &self,
        _token: &BearerToken,
        book: &NewBook,
    ) -> Result<Vec<Book>, SupabaseError> {
        self.record(Call::CreateBook {
            body: serde_json::to_value(book).unwrap(),
        })?;
        Ok(self.books.clone())
    }

    async fn update_book(
        &self,
        _token: &BearerToken,
        id: i64,
        patch: &BookPatch,
    ) -> Result<Vec<Book>, SupabaseError> {
        self.record(Call::UpdateBook {
            id,
            body: serde_json::to_value(patch).unwrap(),
        })?;
        Ok(self.books.clone())
    }

    async fn delete_book(&self, _token: &BearerToken, id: i64) -> Result<(), SupabaseError> {
        self.record(Call::DeleteBook { id })
    }
}

/// スタブを差し込んだアプリケーションを構築する
pub fn app_with(stub: &Arc<StubSupabase>) -> Router {
    build_app(stub.clone())
}

/// テスト用の書籍行
pub fn book(id: i64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: "Machado de Assis".to_string(),
        owner_id: Uuid::parse_str(OWNER_ID).unwrap(),
        created_at: "2026-03-01T12:00:00+00:00".to_string(),
        updated_at: "2026-03-01T12:00:00+00:00".to_string(),
    }
}

/// リクエストを組み立てる
///
/// `body` を渡した場合は `Content-Type: application/json` を付与する。
pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// レスポンス
pub struct TestResponse {
    pub status:  StatusCode,
    pub headers: HeaderMap,
    pub body:    Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// アプリケーションにリクエストを 1 件送る
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
