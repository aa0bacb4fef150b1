//! SupabaseClient スーパートレイトとクライアント実装の構造体

use reqwest::{
    Method,
    RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};

use super::{auth_client::SupabaseAuthClient, book_client::SupabaseBookClient};
use crate::{
    config::SupabaseConfig,
    context::BearerToken,
    middleware::request_id::inject_request_id,
};

/// API キーヘッダー名
pub(super) const API_KEY_HEADER: &str = "apikey";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Supabase クライアントトレイト（スーパートレイト）
///
/// Auth / Book の各サブトレイトを束ねるスーパートレイト。
/// テスト時にはサブトレイト単位でスタブを使用できる。
pub trait SupabaseClient: SupabaseAuthClient + SupabaseBookClient {}

/// ブランケット impl: 両サブトレイトを実装する型は
/// 自動的に `SupabaseClient` を実装する。
impl<T> SupabaseClient for T where T: SupabaseAuthClient + SupabaseBookClient {}

/// Supabase クライアント実装
///
/// 接続プールを持つ `reqwest::Client` を 1 つだけ保持し、全呼び出しで共有する。
#[derive(Clone)]
pub struct SupabaseClientImpl {
    pub(super) rest_url: String,
    pub(super) auth_url: String,
    pub(super) table:    String,
    pub(super) api_key:  String,
    pub(super) client:   reqwest::Client,
}

impl SupabaseClientImpl {
    /// 新しい SupabaseClient を作成する
    ///
    /// タイムアウトは接続から本文受信までを含む 1 呼び出し全体に適用される。
    pub fn new(config: &SupabaseConfig) -> Result<Self, reqwest::Error> {
        let base_url = config.url.trim_end_matches('/');
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            rest_url: format!("{base_url}/rest/v1"),
            auth_url: format!("{base_url}/auth/v1"),
            table: config.table.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    /// 書籍テーブルの URL
    pub(super) fn table_url(&self) -> String {
        format!("{}/{}", self.rest_url, self.table)
    }

    /// AUTH エンドポイントの URL
    pub(super) fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.auth_url, path)
    }

    /// データ呼び出し用のリクエストビルダー
    ///
    /// 呼び出し元のトークンを受信した値のまま転送する。
    pub(super) fn data_request(
        &self,
        method: Method,
        url: &str,
        token: &BearerToken,
    ) -> RequestBuilder {
        inject_request_id(self.client.request(method, url))
            .header(API_KEY_HEADER, &self.api_key)
            .header(AUTHORIZATION, token.as_header_value())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header("Prefer", "return=representation")
    }

    /// トークンを伴わない AUTH 呼び出し用のリクエストビルダー
    pub(super) fn anonymous_auth_request(&self, method: Method, path: &str) -> RequestBuilder {
        inject_request_id(self.client.request(method, self.auth_endpoint(path)))
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
    }
}

#[cfg(test)]
pub(super) mod test_support {
    use std::time::Duration;

    use axum::http::{HeaderMap, HeaderValue};

    use super::*;

    pub(in crate::client::supabase) fn test_client() -> SupabaseClientImpl {
        SupabaseClientImpl::new(&SupabaseConfig {
            url:     "https://project.supabase.co/".to_string(),
            api_key: "anon-key".to_string(),
            table:   "livros".to_string(),
            timeout: Duration::from_secs(10),
        })
        .unwrap()
    }

    pub(in crate::client::supabase) fn test_token() -> BearerToken {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_static("bearer caller-jwt"),
        );
        BearerToken::from_headers(&headers).unwrap()
    }

    /// ヘッダー値を文字列で取り出す
    pub(in crate::client::supabase) fn header<'a>(
        request: &'a reqwest::Request,
        name: &str,
    ) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{test_support::*, *};

    #[test]
    fn test_ベースurlからrestとauthのurlを組み立てる() {
        let client = test_client();

        assert_eq!(client.table_url(), "https://project.supabase.co/rest/v1/livros");
        assert_eq!(
            client.auth_endpoint("signup"),
            "https://project.supabase.co/auth/v1/signup"
        );
    }

    #[test]
    fn test_データ呼び出しは5つのヘッダーを付与する() {
        let client = test_client();

        let request = client
            .data_request(Method::GET, &client.table_url(), &test_token())
            .build()
            .unwrap();

        assert_eq!(header(&request, "apikey"), Some("anon-key"));
        assert_eq!(header(&request, "authorization"), Some("bearer caller-jwt"));
        assert_eq!(header(&request, "content-type"), Some("application/json"));
        assert_eq!(header(&request, "accept"), Some("application/json"));
        assert_eq!(header(&request, "prefer"), Some("return=representation"));
    }

    #[test]
    fn test_匿名auth呼び出しはapikeyとcontent_typeのみ付与する() {
        let client = test_client();

        let request = client
            .anonymous_auth_request(Method::POST, "signup")
            .build()
            .unwrap();

        assert_eq!(header(&request, "apikey"), Some("anon-key"));
        assert_eq!(header(&request, "content-type"), Some("application/json"));
        assert_eq!(header(&request, "authorization"), None);
        assert_eq!(header(&request, "prefer"), None);
    }
}
