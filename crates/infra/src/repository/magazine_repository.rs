//! # MagazineRepository
//!
//! ブランドマガジンの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **カーソルフェッチ契約**: ページ取得は `(created_at, id)` の降順で、
//!   境界キーより厳密に後ろの行を最大 `limit` 件返す
//! - **複合キー**: `created_at` は秒単位で衝突しうるため、`id`
//!   をタイブレークに含めた [`MagazineCursor`] で全順序を保証する

use std::{cmp::Reverse, sync::Arc};

use async_trait::async_trait;
use itertools::Itertools as _;
use scentlog_domain::{
    brand::BrandId,
    magazine::{Magazine, MagazineCursor, MagazineId},
};
use scentlog_shared::CursorKeyed as _;

use crate::{
    error::StoreError,
    repository::take_count,
    store::{MemoryStore, TxContext},
};

/// マガジンリポジトリトレイト
///
/// マガジンの永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait MagazineRepository: Send + Sync {
    /// ID でマガジンを検索する
    async fn find_by_id(&self, id: MagazineId) -> Result<Option<Magazine>, StoreError>;

    /// 全体フィードの 1 ページ分を取得する
    ///
    /// # 引数
    ///
    /// - `bound`: 前ページ最終行のカーソルキー。`None` は先頭ページ
    /// - `limit`: 最大取得件数（呼び出し側がページサイズ + 1 を渡す）
    ///
    /// # 戻り値
    ///
    /// `(created_at, id)` の降順で、`bound` より厳密に後ろの行を
    /// 最大 `limit` 件返す。
    async fn find_page(
        &self,
        bound: Option<MagazineCursor>,
        limit: i64,
    ) -> Result<Vec<Magazine>, StoreError>;

    /// ブランド別フィードの 1 ページ分を取得する
    ///
    /// ソート順と境界の扱いは [`find_page`](Self::find_page) と同じ。
    async fn find_page_by_brand(
        &self,
        brand_id: BrandId,
        bound: Option<MagazineCursor>,
        limit: i64,
    ) -> Result<Vec<Magazine>, StoreError>;

    /// マガジンを保存する
    async fn insert(&self, tx: &mut TxContext, magazine: &Magazine) -> Result<(), StoreError>;
}

/// インメモリ実装の MagazineRepository
#[derive(Clone)]
pub struct MemoryMagazineRepository {
    store: Arc<MemoryStore>,
}

impl MemoryMagazineRepository {
    /// 新しいリポジトリインスタンスを作成する
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MagazineRepository for MemoryMagazineRepository {
    async fn find_by_id(&self, id: MagazineId) -> Result<Option<Magazine>, StoreError> {
        self.store
            .with_data(|data| data.magazines.iter().find(|m| m.id() == id).cloned())
    }

    async fn find_page(
        &self,
        bound: Option<MagazineCursor>,
        limit: i64,
    ) -> Result<Vec<Magazine>, StoreError> {
        self.store.with_data(|data| {
            data.magazines
                .iter()
                .filter(|m| bound.is_none_or(|b| m.cursor_key() < b))
                .sorted_by_key(|m| Reverse(m.cursor_key()))
                .take(take_count(limit))
                .cloned()
                .collect()
        })
    }

    async fn find_page_by_brand(
        &self,
        brand_id: BrandId,
        bound: Option<MagazineCursor>,
        limit: i64,
    ) -> Result<Vec<Magazine>, StoreError> {
        self.store.with_data(|data| {
            data.magazines
                .iter()
                .filter(|m| m.brand_id() == brand_id)
                .filter(|m| bound.is_none_or(|b| m.cursor_key() < b))
                .sorted_by_key(|m| Reverse(m.cursor_key()))
                .take(take_count(limit))
                .cloned()
                .collect()
        })
    }

    async fn insert(&self, tx: &mut TxContext, magazine: &Magazine) -> Result<(), StoreError> {
        tx.data_mut().magazines.push(magazine.clone());
        Ok(())
    }
}
