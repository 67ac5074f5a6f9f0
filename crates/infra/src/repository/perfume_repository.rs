//! # PerfumeRepository
//!
//! 香水情報の永続化を担当するリポジトリ。

use std::sync::Arc;

use async_trait::async_trait;
use scentlog_domain::perfume::{Perfume, PerfumeId};

use crate::{
    error::StoreError,
    store::{MemoryStore, TxContext},
};

/// 香水リポジトリトレイト
#[async_trait]
pub trait PerfumeRepository: Send + Sync {
    /// ID で香水を検索する
    async fn find_by_id(&self, id: PerfumeId) -> Result<Option<Perfume>, StoreError>;

    /// 香水を保存する
    async fn insert(&self, tx: &mut TxContext, perfume: &Perfume) -> Result<(), StoreError>;
}

/// インメモリ実装の PerfumeRepository
#[derive(Clone)]
pub struct MemoryPerfumeRepository {
    store: Arc<MemoryStore>,
}

impl MemoryPerfumeRepository {
    /// 新しいリポジトリインスタンスを作成する
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PerfumeRepository for MemoryPerfumeRepository {
    async fn find_by_id(&self, id: PerfumeId) -> Result<Option<Perfume>, StoreError> {
        self.store
            .with_data(|data| data.perfumes.iter().find(|p| p.id() == id).cloned())
    }

    async fn insert(&self, tx: &mut TxContext, perfume: &Perfume) -> Result<(), StoreError> {
        tx.data_mut().perfumes.push(perfume.clone());
        Ok(())
    }
}
