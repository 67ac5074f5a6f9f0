//! # ページネーションレスポンス
//!
//! カーソルページネーションの結果を境界（API ハンドラなど）へ返すための形。
//! [`CursorPage`] が持つ並び順キーをここで不透明トークンに符号化し、
//! ドメインのキー型を外へ漏らさない。

use serde::Serialize;

use crate::{
    cursor::{CursorError, CursorKeyed, CursorPage},
    cursor_token::encode_cursor,
};

/// ページネーション付きレスポンス
///
/// `next_cursor` は次ページ取得にそのまま使う不透明トークン。
/// 最終ページでは `None`（JSON では null）になる。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_next: bool,
}

impl<T> PaginatedResponse<T> {
    /// 組み立て済みページからレスポンスを作成し、キーをトークンに符号化する
    pub fn from_page(page: CursorPage<T>) -> Result<Self, CursorError>
    where
        T: CursorKeyed,
        T::Key: Serialize,
    {
        let has_next = page.has_next();
        let next_cursor = match page.next_cursor() {
            Some(key) => Some(encode_cursor(key)?),
            None => None,
        };
        Ok(Self {
            data: page.into_items(),
            next_cursor,
            has_next,
        })
    }
}
