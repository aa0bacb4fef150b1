//! # リクエストコンテキスト
//!
//! 保護されたエンドポイントの入口で `Authorization` ヘッダーを検査し、
//! 呼び出し元のトークンと、遅延解決するユーザー ID を 1 リクエスト分だけ保持する。
//!
//! トークンの署名・有効期限はゲートウェイでは検証しない。形式（`Bearer ` 接頭辞）を
//! 確認したうえでヘッダー値をそのままバックエンドに転送し、判断はバックエンドに委ねる。

use std::fmt;

use axum::http::{HeaderMap, header::AUTHORIZATION};
use livros_domain::user::UserId;
use tokio::sync::OnceCell;

use crate::client::{SupabaseAuthClient, SupabaseError};

/// 認証スキームの接頭辞（大文字小文字を区別しない）
const BEARER_PREFIX: &str = "bearer ";

/// トークン不正時のメッセージ
pub const INVALID_TOKEN_MESSAGE: &str = "Token não fornecido ou inválido";

/// トークン抽出エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// ヘッダーが存在しない
    Missing,
    /// `Bearer ` で始まらない、または ASCII として読めない
    Malformed,
}

/// 呼び出し元の Bearer トークン
///
/// 受信した `Authorization` ヘッダーの値全体（スキーム込み）を保持し、
/// バックエンドへはそのまま転送する。
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// `Authorization` ヘッダーからトークンを取り出す
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, TokenError> {
        let value = headers.get(AUTHORIZATION).ok_or(TokenError::Missing)?;
        let raw = value.to_str().map_err(|_| TokenError::Malformed)?;

        let has_scheme = raw
            .get(..BEARER_PREFIX.len())
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX));
        if !has_scheme {
            return Err(TokenError::Malformed);
        }

        Ok(Self(raw.to_string()))
    }

    /// 転送用のヘッダー値（スキーム込み）
    pub fn as_header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// 1 リクエスト分の認証コンテキスト
///
/// ユーザー ID は必要になった時点で 1 回だけバックエンドに問い合わせ、
/// 同じリクエスト内では結果を再利用する。
#[derive(Debug)]
pub struct RequestContext {
    token:    BearerToken,
    identity: OnceCell<UserId>,
}

impl RequestContext {
    pub fn new(token: BearerToken) -> Self {
        Self {
            token,
            identity: OnceCell::new(),
        }
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// 呼び出し元のユーザー ID を解決する
    ///
    /// 失敗した場合はキャッシュせず、エラーをそのまま返す。
    pub async fn identity(&self, client: &dyn SupabaseAuthClient) -> Result<UserId, SupabaseError> {
        self.identity
            .get_or_try_init(|| client.current_user(&self.token))
            .await
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use livros_domain::user::Credentials;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[rstest]
    #[case("Bearer abc.def.ghi")]
    #[case("bearer abc")]
    #[case("BEARER abc")]
    #[case("Bearer ")]
    fn test_bearer接頭辞は大文字小文字を区別しない(#[case] value: &str) {
        let token = BearerToken::from_headers(&headers_with(value)).unwrap();

        assert_eq!(token.as_header_value(), value);
    }

    #[rstest]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("Bearer")]
    #[case("Bearerabc")]
    #[case("token abc")]
    #[case("")]
    fn test_bearer以外のスキームは拒否される(#[case] value: &str) {
        assert_eq!(
            BearerToken::from_headers(&headers_with(value)),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_ヘッダーがなければmissingになる() {
        assert_eq!(
            BearerToken::from_headers(&HeaderMap::new()),
            Err(TokenError::Missing)
        );
    }

    #[test]
    fn test_debug出力でトークンがマスクされる() {
        let token = BearerToken::from_headers(&headers_with("Bearer secret-jwt")).unwrap();

        assert!(!format!("{:?}", token).contains("secret-jwt"));
    }

    // ===== identity の遅延解決 =====

    struct CountingAuthClient {
        calls:  AtomicUsize,
        result: Result<Uuid, SupabaseError>,
    }

    #[async_trait]
    impl SupabaseAuthClient for CountingAuthClient {
        async fn signup(
            &self,
            _credentials: &Credentials,
        ) -> Result<Option<serde_json::Value>, SupabaseError> {
            unimplemented!()
        }

        async fn login(
            &self,
            _credentials: &Credentials,
        ) -> Result<Option<serde_json::Value>, SupabaseError> {
            unimplemented!()
        }

        async fn logout(&self, _token: &BearerToken) -> Result<(), SupabaseError> {
            unimplemented!()
        }

        async fn current_user(&self, _token: &BearerToken) -> Result<UserId, SupabaseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().map(UserId::from_uuid)
        }

        async fn health(&self) -> Result<(), SupabaseError> {
            unimplemented!()
        }
    }

    fn context() -> RequestContext {
        RequestContext::new(BearerToken::from_headers(&headers_with("Bearer t")).unwrap())
    }

    #[tokio::test]
    async fn test_identityは1リクエスト内で1回だけ解決される() {
        let uuid = Uuid::now_v7();
        let client = Arc::new(CountingAuthClient {
            calls:  AtomicUsize::new(0),
            result: Ok(uuid),
        });
        let ctx = context();

        let first = ctx.identity(client.as_ref()).await.unwrap();
        let second = ctx.identity(client.as_ref()).await.unwrap();

        assert_eq!(first, UserId::from_uuid(uuid));
        assert_eq!(first, second);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_identityの失敗はキャッシュされない() {
        let client = CountingAuthClient {
            calls:  AtomicUsize::new(0),
            result: Err(SupabaseError::Rejected {
                status:  401,
                message: "invalid JWT".to_string(),
            }),
        };
        let ctx = context();

        assert!(ctx.identity(&client).await.is_err());
        assert!(ctx.identity(&client).await.is_err());
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }
}
