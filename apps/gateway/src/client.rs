//! # 外部 API クライアント
//!
//! バックエンド（Supabase）との通信を担当する。

pub mod supabase;

pub use supabase::{
    SupabaseAuthClient,
    SupabaseBookClient,
    SupabaseClient,
    SupabaseClientImpl,
    SupabaseError,
};
