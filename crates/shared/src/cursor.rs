//! # カーソルページネーションの中核規則
//!
//! オフセット方式ではなく、並び順キーの排他的な境界（カーソル）を基点に
//! 次の一片を切り出す方式。ページの組み立て規則は [`CursorPage`] に一元化し、
//! データ取得側は「並び順どおりに最大 size + 1 件の候補を渡す」ことだけを守る。
//!
//! ## 次ページ判定
//!
//! | 候補件数     | items        | has_next | next_cursor        |
//! |--------------|--------------|----------|--------------------|
//! | size + 1 件  | 先頭 size 件 | true     | 返却末尾要素のキー |
//! | size 件以下  | 全件         | false    | なし               |
//!
//! 余分の 1 件は次ページの存在判定にのみ使い、返却しない。
//! 空ページは「終端に到達した」ことを表す正常な結果であり、エラーではない。

use thiserror::Error;

/// カーソルページネーションのエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CursorError {
    /// ページサイズが正の整数でない
    #[error("ページサイズは 1 以上である必要があります: {given}")]
    InvalidPageSize { given: i64 },

    /// カーソルトークンを復号できない
    #[error("カーソルの形式が不正です: {reason}")]
    MalformedCursor { reason: String },

    /// カーソルトークンを生成できない
    #[error("カーソルの生成に失敗しました: {reason}")]
    TokenEncode { reason: String },
}

/// 1 ページあたりの返却件数（正の整数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageSize(i64);

impl PageSize {
    /// ページサイズを作成する。0 以下は [`CursorError::InvalidPageSize`]。
    pub fn new(value: i64) -> Result<Self, CursorError> {
        if value <= 0 {
            return Err(CursorError::InvalidPageSize { given: value });
        }
        Ok(Self(value))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// 次ページ有無の判定に必要な取得件数（size + 1）
    pub fn fetch_limit(&self) -> i64 {
        self.0.saturating_add(1)
    }

    /// 上限を超える場合は上限に丸める
    pub fn clamp_to(self, max: PageSize) -> PageSize {
        if self.0 > max.0 { max } else { self }
    }
}

/// ページサイズの既定値と上限
///
/// 呼び出し側の指定を検証し、未指定なら既定値、上限超過なら上限に丸めて
/// [`PageSize`] に解決する。0 以下の指定だけはエラーとして突き返す。
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    default: PageSize,
    max: PageSize,
}

impl PageLimits {
    /// 既定値と上限の組を作成する。既定値が上限を超える場合は上限に丸める。
    pub fn new(default: PageSize, max: PageSize) -> Self {
        Self {
            default: default.clamp_to(max),
            max,
        }
    }

    /// 指定されたページサイズを解決する
    pub fn resolve(&self, requested: Option<i64>) -> Result<PageSize, CursorError> {
        match requested {
            None => Ok(self.default),
            Some(value) => Ok(PageSize::new(value)?.clamp_to(self.max)),
        }
    }

    pub fn default_size(&self) -> PageSize {
        self.default
    }

    pub fn max_size(&self) -> PageSize {
        self.max
    }
}

/// 1 ページ分の取得要求（開始カーソルとページサイズ）
///
/// `cursor` が `None` なら先頭ページ、`Some` ならそのキーより先
/// （並び順で次）の要素から取得する。カーソルは排他的な境界であり、
/// キー自身は結果に含まれない。
#[derive(Debug, Clone)]
pub struct CursorPageable<K> {
    cursor: Option<K>,
    size: PageSize,
}

impl<K> CursorPageable<K> {
    pub fn new(cursor: Option<K>, size: PageSize) -> Self {
        Self { cursor, size }
    }

    /// 先頭ページの取得要求
    pub fn first(size: PageSize) -> Self {
        Self { cursor: None, size }
    }

    /// 指定キーの続きからの取得要求
    pub fn after(cursor: K, size: PageSize) -> Self {
        Self {
            cursor: Some(cursor),
            size,
        }
    }

    pub fn cursor(&self) -> Option<&K> {
        self.cursor.as_ref()
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    /// 次ページ有無の判定に必要な取得件数（size + 1）
    pub fn fetch_limit(&self) -> i64 {
        self.size.fetch_limit()
    }
}

/// ページ末尾からカーソルを導出できる要素
///
/// キーはソートに使う並び順キーと一致させること。並び順キーと異なる値を
/// 返すと、続きのページで要素の重複や欠落が起きる。
pub trait CursorKeyed {
    type Key: Clone + PartialEq + std::fmt::Debug;

    fn cursor_key(&self) -> Self::Key;
}

/// 組み立て済みの 1 ページ
///
/// [`CursorPage::from_candidates`] でのみ作成する。候補の並び替えや
/// 境界の適用はデータ取得側の責務で、ここでは件数の切り詰めと
/// 次カーソルの導出だけを行う。
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T: CursorKeyed> {
    items: Vec<T>,
    next_cursor: Option<T::Key>,
    has_next: bool,
}

impl<T: CursorKeyed> CursorPage<T> {
    /// 並び順どおりの候補列（最大 size + 1 件）からページを組み立てる。
    ///
    /// 候補が size 件を超える場合、先頭 size 件を返却分とし、
    /// 返却分の末尾要素のキーを次カーソルとする。判定用の余分な候補の
    /// キーをカーソルにすると、その要素が次ページから漏れてしまう。
    pub fn from_candidates(mut candidates: Vec<T>, size: PageSize) -> Self {
        let has_next = candidates.len() as i64 > size.as_i64();
        if has_next {
            candidates.truncate(size.as_i64() as usize);
        }
        let next_cursor = if has_next {
            candidates.last().map(CursorKeyed::cursor_key)
        } else {
            None
        };
        Self {
            items: candidates,
            next_cursor,
            has_next,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn next_cursor(&self) -> Option<&T::Key> {
        self.next_cursor.as_ref()
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
