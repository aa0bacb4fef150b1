//! # 書籍一覧のページング方針
//!
//! - `limit`: 既定 50、上限 100 に切り詰める（下限は設けずバックエンドに委ねる）
//! - `offset`: 既定 0、負値は 0 に切り上げる
//! - `search`: タイトルの部分一致（空文字は未指定扱い）

/// `limit` 未指定時の既定値
pub const DEFAULT_LIMIT: i64 = 50;

/// `limit` の上限
pub const MAX_LIMIT: i64 = 100;

/// 正規化済みの一覧取得条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListQuery {
    limit:          i64,
    offset:         i64,
    title_contains: Option<String>,
}

impl BookListQuery {
    pub fn new(limit: Option<i64>, offset: Option<i64>, search: Option<String>) -> Self {
        Self {
            limit:          limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
            offset:         offset.unwrap_or(0).max(0),
            title_contains: search.filter(|s| !s.is_empty()),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// タイトル部分一致の検索語
    ///
    /// 呼び出し元の入力をそのまま返す。パターン用のメタ文字はエスケープしない。
    pub fn title_contains(&self) -> Option<&str> {
        self.title_contains.as_deref()
    }
}

impl Default for BookListQuery {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_未指定なら既定値になる() {
        let query = BookListQuery::default();

        assert_eq!(query.limit(), 50);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.title_contains(), None);
    }

    #[rstest]
    #[case(Some(10), 10)]
    #[case(Some(100), 100)]
    #[case(Some(101), 100)]
    #[case(Some(i64::MAX), 100)]
    #[case(Some(0), 0)]
    #[case(Some(-5), -5)]
    fn test_limitは上限100に切り詰められる(#[case] requested: Option<i64>, #[case] expected: i64) {
        assert_eq!(BookListQuery::new(requested, None, None).limit(), expected);
    }

    #[rstest]
    #[case(Some(0), 0)]
    #[case(Some(30), 30)]
    #[case(Some(-1), 0)]
    #[case(Some(i64::MIN), 0)]
    fn test_offsetは0未満が0になる(#[case] requested: Option<i64>, #[case] expected: i64) {
        assert_eq!(BookListQuery::new(None, requested, None).offset(), expected);
    }

    #[test]
    fn test_空のsearchは未指定扱いになる() {
        let query = BookListQuery::new(None, None, Some(String::new()));

        assert_eq!(query.title_contains(), None);
    }

    #[test]
    fn test_searchのメタ文字はそのまま保持される() {
        let query = BookListQuery::new(None, None, Some("50%_off*".to_string()));

        assert_eq!(query.title_contains(), Some("50%_off*"));
    }
}
