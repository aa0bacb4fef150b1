//! # 書籍
//!
//! 書籍カタログの作成・更新ペイロードと、バックエンドから返る行を定義する。
//!
//! 行のライフサイクル（採番・タイムスタンプ）はすべてバックエンドが持つ。
//! ゲートウェイは入力を検証してから送り、返ってきた行をそのまま中継する。
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use livros_domain::book::{BookAuthor, BookPatch, BookTitle};
//!
//! // 指定されたフィールドだけが送信ペイロードに含まれる
//! let patch = BookPatch::new(None, Some(BookAuthor::new("Clarice Lispector")?))?;
//! let body = serde_json::to_string(&patch)?;
//! assert_eq!(body, r#"{"author":"Clarice Lispector"}"#);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, user::UserId};

define_bounded_text! {
    /// 書籍タイトル（1〜255 文字）
    pub struct BookTitle {
        field: "title",
        max_length: 255,
    }
}

define_bounded_text! {
    /// 著者名（1〜255 文字）
    pub struct BookAuthor {
        field: "author",
        max_length: 255,
    }
}

/// バックエンドの書籍行
///
/// バックエンドが定義・採番する。ゲートウェイは変更せずに中継する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Book {
    pub id:         i64,
    pub title:      String,
    pub author:     String,
    pub owner_id:   Uuid,
    pub created_at: String,
    pub updated_at: String,
}

/// 検証済みの作成入力（所有者未確定）
///
/// 入力検証は所有者の解決（バックエンド呼び出し）より先に行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    title:  BookTitle,
    author: BookAuthor,
}

impl BookDraft {
    /// タイトルから順に検証し、最初の違反を返す。
    pub fn new(title: String, author: String) -> Result<Self, DomainError> {
        Ok(Self {
            title:  BookTitle::new(title)?,
            author: BookAuthor::new(author)?,
        })
    }

    /// 所有者を刻印して作成ペイロードにする
    pub fn owned_by(self, owner_id: UserId) -> NewBook {
        NewBook {
            title: self.title,
            author: self.author,
            owner_id,
        }
    }
}

/// 書籍作成ペイロード（バックエンド送信用）
///
/// `owner_id` は呼び出し元のトークンから解決した ID。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub title:    BookTitle,
    pub author:   BookAuthor,
    pub owner_id: UserId,
}

/// 書籍の部分更新ペイロード
///
/// フィールドごとに存在フラグ（`Option`）を持ち、存在するものだけを
/// `title` → `author` の固定順でシリアライズする。
///
/// # 不変条件
///
/// - 少なくとも 1 フィールドが存在する
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    title:  Option<BookTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<BookAuthor>,
}

impl BookPatch {
    pub fn new(title: Option<BookTitle>, author: Option<BookAuthor>) -> Result<Self, DomainError> {
        if title.is_none() && author.is_none() {
            return Err(DomainError::EmptyUpdate);
        }
        Ok(Self { title, author })
    }

    /// 未検証の入力から部分更新ペイロードを組み立てる
    ///
    /// 存在するフィールドの検証を先に行い、その後で空更新を判定する。
    pub fn from_raw(title: Option<String>, author: Option<String>) -> Result<Self, DomainError> {
        let title = title.map(BookTitle::new).transpose()?;
        let author = author.map(BookAuthor::new).transpose()?;
        Self::new(title, author)
    }

    pub fn title(&self) -> Option<&BookTitle> {
        self.title.as_ref()
    }

    pub fn author(&self) -> Option<&BookAuthor> {
        self.author.as_ref()
    }
}
