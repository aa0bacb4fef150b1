//! # ドメイン層エラー定義
//!
//! バックエンドに送る前に検出できる入力エラーを表現する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 422 Unprocessable Entity | 必須項目・文字数の違反 |
//! | `EmptyUpdate` | 400 Bad Request | 更新対象フィールドが 1 つもない |
//!
//! ```rust
//! use livros_domain::{DomainError, book::BookPatch};
//!
//! let err = BookPatch::new(None, None).unwrap_err();
//! assert!(matches!(err, DomainError::EmptyUpdate));
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// メッセージはそのまま外部向けエラーエンベロープの `message` になる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 入力値が必須項目・文字数制限に違反している
    #[error("{0}")]
    Validation(String),

    /// 更新リクエストに更新対象のフィールドが含まれていない
    #[error("Nenhum campo para atualizar")]
    EmptyUpdate,
}
