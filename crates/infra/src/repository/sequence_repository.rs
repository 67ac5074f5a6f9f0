//! # IdSequenceRepository
//!
//! エンティティ ID の採番を管理するリポジトリ。
//!
//! ## 設計方針
//!
//! - **トランザクション非依存**: 採番はトランザクションの外側で行う。
//!   ロールバックされた採番は欠番になるが、再利用しない
//!   （データベースのシーケンスと同じ挙動）
//! - **エンティティ種別ごとに独立**: [`SequenceKind`] ごとに独立した連番を管理

use std::sync::Arc;

use async_trait::async_trait;
use scentlog_domain::value_objects::SequenceKind;

use crate::{error::StoreError, store::MemoryStore};

/// ID 採番リポジトリトレイト
///
/// エンティティ種別ごとの採番を管理する。
#[async_trait]
pub trait IdSequenceRepository: Send + Sync {
    /// 次の ID を採番する
    ///
    /// # 引数
    ///
    /// - `kind`: 対象エンティティ種別
    ///
    /// # 戻り値
    ///
    /// - `Ok(i64)`: 採番された ID（1 始まりの連番）
    /// - `Err(StoreError)`: ストアエラー
    async fn next_id(&self, kind: SequenceKind) -> Result<i64, StoreError>;
}

/// インメモリ実装の ID 採番リポジトリ
///
/// ストアが保持するアトミックカウンターを使用して採番を行う。
#[derive(Clone)]
pub struct MemoryIdSequenceRepository {
    store: Arc<MemoryStore>,
}

impl MemoryIdSequenceRepository {
    /// 新しいリポジトリインスタンスを作成する
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdSequenceRepository for MemoryIdSequenceRepository {
    async fn next_id(&self, kind: SequenceKind) -> Result<i64, StoreError> {
        Ok(self.store.next_in_sequence(kind))
    }
}
