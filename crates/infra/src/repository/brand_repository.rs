//! # BrandRepository
//!
//! ブランド情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **論理削除の隠蔽**: `deleted_at` が設定された行は読み取り系メソッドから
//!   見えない。呼び出し側は削除済みブランドの存在を意識しない

use std::sync::Arc;

use async_trait::async_trait;
use scentlog_domain::brand::{Brand, BrandId};

use crate::{
    error::StoreError,
    store::{MemoryStore, TxContext},
};

/// ブランドリポジトリトレイト
///
/// ブランド情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// ID でブランドを検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(brand))`: ブランドが見つかった場合
    /// - `Ok(None)`: ブランドが存在しない、または論理削除済みの場合
    /// - `Err(_)`: ストアエラー
    async fn find_by_id(&self, id: BrandId) -> Result<Option<Brand>, StoreError>;

    /// ブランドを保存する
    async fn insert(&self, tx: &mut TxContext, brand: &Brand) -> Result<(), StoreError>;
}

/// インメモリ実装の BrandRepository
#[derive(Clone)]
pub struct MemoryBrandRepository {
    store: Arc<MemoryStore>,
}

impl MemoryBrandRepository {
    /// 新しいリポジトリインスタンスを作成する
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BrandRepository for MemoryBrandRepository {
    async fn find_by_id(&self, id: BrandId) -> Result<Option<Brand>, StoreError> {
        self.store.with_data(|data| {
            data.brands
                .iter()
                .find(|b| b.id() == id && !b.is_deleted())
                .cloned()
        })
    }

    async fn insert(&self, tx: &mut TxContext, brand: &Brand) -> Result<(), StoreError> {
        tx.data_mut().brands.push(brand.clone());
        Ok(())
    }
}
