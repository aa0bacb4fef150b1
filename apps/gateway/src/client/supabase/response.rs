//! Supabase レスポンスの共通ハンドリング
//!
//! すべてのバックエンド呼び出しの結果をここで正規化する。
//!
//! - ステータス 400 以上: 本文 JSON の `msg` → `message` → `error_description` の
//!   順に最初に見つかった文字列、なければ本文テキストそのものを `Rejected` にする
//! - ステータス 400 未満で本文が空: `None`
//! - ステータス 400 未満で本文あり: JSON としてデコードする

use serde::{Deserialize, de::DeserializeOwned};

use super::error::SupabaseError;

/// エラー本文のうち、メッセージとして採用するフィールド
#[derive(Deserialize)]
struct ErrorBody {
    msg:               Option<String>,
    message:           Option<String>,
    error_description: Option<String>,
}

/// Supabase レスポンスの共通ハンドリング
pub(super) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>, SupabaseError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_client_error() || status.is_server_error() {
        return Err(SupabaseError::Rejected {
            status:  status.as_u16(),
            message: extract_error_message(body),
        });
    }

    if body.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| SupabaseError::MalformedResponse(e.to_string()))
}

/// 本文を使わない呼び出し（削除・ログアウト等）のハンドリング
///
/// エラー時の扱いは [`handle_response`] と同じ。成功時は本文を読み捨てる。
pub(super) async fn handle_empty_response(
    response: reqwest::Response,
) -> Result<(), SupabaseError> {
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await?;
        return Err(SupabaseError::Rejected {
            status:  status.as_u16(),
            message: extract_error_message(body),
        });
    }

    Ok(())
}

fn extract_error_message(body: String) -> String {
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|e| e.msg.or(e.message).or(e.error_description))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestData {
        value: String,
    }

    /// テスト用の HTTP レスポンスを構築する
    fn make_response(status: u16, body: &str) -> reqwest::Response {
        let http_resp = http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body.to_string())
            .unwrap();
        reqwest::Response::from(http_resp)
    }

    #[tokio::test]
    async fn test_成功レスポンスをデシリアライズする() {
        let response = make_response(200, r#"{"value": "hello"}"#);

        let result: Result<Option<TestData>, _> = handle_response(response).await;

        assert_eq!(
            result,
            Ok(Some(TestData {
                value: "hello".to_string(),
            }))
        );
    }

    #[tokio::test]
    async fn test_成功レスポンスの本文が空ならnoneを返す() {
        let response = make_response(204, "");

        let result: Result<Option<TestData>, _> = handle_response(response).await;

        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_成功レスポンスがjsonでなければmalformed_responseを返す() {
        let response = make_response(200, "<html>oops</html>");

        let result: Result<Option<TestData>, _> = handle_response(response).await;

        assert!(matches!(result, Err(SupabaseError::MalformedResponse(_))));
    }

    #[rstest]
    #[case::msgを優先(r#"{"msg": "a", "message": "b", "error_description": "c"}"#, "a")]
    #[case::次にmessage(r#"{"message": "b", "error_description": "c"}"#, "b")]
    #[case::最後にerror_description(r#"{"error_description": "c"}"#, "c")]
    #[case::該当フィールドなし(r#"{"code": "PGRST116"}"#, r#"{"code": "PGRST116"}"#)]
    #[case::jsonでない("upstream exploded", "upstream exploded")]
    #[case::配列("[1, 2]", "[1, 2]")]
    #[case::空("", "")]
    #[tokio::test]
    async fn test_エラーメッセージを抽出する(#[case] body: &str, #[case] expected: &str) {
        let response = make_response(400, body);

        let result: Result<Option<TestData>, _> = handle_response(response).await;

        assert_eq!(
            result,
            Err(SupabaseError::Rejected {
                status:  400,
                message: expected.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_ステータスコードはそのまま保持される() {
        let response = make_response(503, r#"{"message": "unavailable"}"#);

        let result: Result<Option<TestData>, _> = handle_response(response).await;

        assert!(matches!(
            result,
            Err(SupabaseError::Rejected { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_本文を使わない呼び出しは成功時に本文を無視する() {
        let response = make_response(200, "not json at all");

        assert_eq!(handle_empty_response(response).await, Ok(()));
    }

    #[tokio::test]
    async fn test_本文を使わない呼び出しもエラーメッセージを抽出する() {
        let response = make_response(401, r#"{"msg": "invalid JWT"}"#);

        assert_eq!(
            handle_empty_response(response).await,
            Err(SupabaseError::Rejected {
                status:  401,
                message: "invalid JWT".to_string(),
            })
        );
    }
}
