//! # Livros ドメイン層
//!
//! 書籍カタログと認証の入出力を表す値オブジェクトを定義する。
//!
//! ゲートウェイ自身はデータを保持しないため、ここにあるのは
//! 「バックエンドに送ってよい形か」を判定する検証ロジックと、
//! バックエンドから受け取る行の形だけである。
//!
//! ## モジュール構成
//!
//! - [`book`] - 書籍の作成・更新ペイロードとレスポンス行
//! - [`listing`] - 一覧取得のページング方針（limit / offset / search）
//! - [`user`] - ユーザー ID と認証情報
//! - [`error`] - ドメインエラー
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use livros_domain::book::{BookAuthor, BookTitle};
//!
//! let title = BookTitle::new("Dom Casmurro")?;
//! let author = BookAuthor::new("Machado de Assis")?;
//! assert_eq!(title.as_str(), "Dom Casmurro");
//! assert_eq!(author.as_str(), "Machado de Assis");
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod book;
pub mod error;
pub mod listing;
pub mod user;

pub use error::DomainError;
