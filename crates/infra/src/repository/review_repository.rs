//! # ReviewRepository
//!
//! 香水レビューの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **カーソルフェッチ契約**: ページ取得は `id` の降順で、境界キーより
//!   厳密に後ろの行を最大 `limit` 件返す
//! - **物理削除**: レビューの削除は復元しないため、行ごと取り除く

use std::{cmp::Reverse, sync::Arc};

use async_trait::async_trait;
use itertools::Itertools as _;
use scentlog_domain::{
    perfume::PerfumeId,
    review::{Review, ReviewId},
};
use scentlog_shared::CursorKeyed as _;

use crate::{
    error::StoreError,
    repository::take_count,
    store::{MemoryStore, TxContext},
};

/// レビューリポジトリトレイト
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// ID でレビューを検索する
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, StoreError>;

    /// 香水別レビュー一覧の 1 ページ分を取得する
    ///
    /// # 引数
    ///
    /// - `bound`: 前ページ最終行のレビュー ID。`None` は先頭ページ
    /// - `limit`: 最大取得件数（呼び出し側がページサイズ + 1 を渡す）
    ///
    /// # 戻り値
    ///
    /// `id` の降順で、`bound` より厳密に小さい ID の行を最大 `limit` 件返す。
    async fn find_page_by_perfume(
        &self,
        perfume_id: PerfumeId,
        bound: Option<ReviewId>,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError>;

    /// レビューを保存する
    async fn insert(&self, tx: &mut TxContext, review: &Review) -> Result<(), StoreError>;

    /// レビューを物理削除する
    ///
    /// 存在しない ID は無視する（冪等）。
    async fn delete(&self, tx: &mut TxContext, id: ReviewId) -> Result<(), StoreError>;
}

/// インメモリ実装の ReviewRepository
#[derive(Clone)]
pub struct MemoryReviewRepository {
    store: Arc<MemoryStore>,
}

impl MemoryReviewRepository {
    /// 新しいリポジトリインスタンスを作成する
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, StoreError> {
        self.store
            .with_data(|data| data.reviews.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_page_by_perfume(
        &self,
        perfume_id: PerfumeId,
        bound: Option<ReviewId>,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError> {
        self.store.with_data(|data| {
            data.reviews
                .iter()
                .filter(|r| r.perfume_id() == perfume_id)
                .filter(|r| bound.is_none_or(|b| r.cursor_key() < b))
                .sorted_by_key(|r| Reverse(r.cursor_key()))
                .take(take_count(limit))
                .cloned()
                .collect()
        })
    }

    async fn insert(&self, tx: &mut TxContext, review: &Review) -> Result<(), StoreError> {
        tx.data_mut().reviews.push(review.clone());
        Ok(())
    }

    async fn delete(&self, tx: &mut TxContext, id: ReviewId) -> Result<(), StoreError> {
        tx.data_mut().reviews.retain(|r| r.id() != id);
        Ok(())
    }
}
