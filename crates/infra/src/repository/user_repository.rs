//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ユーザー名の一意性**: `insert`
//!   はトランザクションのスナップショットに対して重複チェックを行う。
//!   ユースケース層の事前チェックとあわせた二段構えで、並行登録の競合を検出する

use std::sync::Arc;

use async_trait::async_trait;
use scentlog_domain::{
    user::{User, UserId},
    value_objects::UserName,
};

use crate::{
    error::StoreError,
    store::{MemoryStore, TxContext},
};

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ID でユーザーを検索する
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// ユーザー名でユーザーを検索する
    ///
    /// ログイン認証で使用する。退会済みユーザーも返す
    /// （ログイン可否の判定はドメイン層の責務）。
    async fn find_by_username(&self, username: &UserName) -> Result<Option<User>, StoreError>;

    /// ユーザー名が既に使用されているかを返す
    async fn exists_username(&self, username: &UserName) -> Result<bool, StoreError>;

    /// ユーザーを保存する
    ///
    /// # エラー
    ///
    /// 同名ユーザーがスナップショット内に存在する場合は
    /// 一意性制約違反（`UniqueViolation`）を返す。
    async fn insert(&self, tx: &mut TxContext, user: &User) -> Result<(), StoreError>;
}

/// インメモリ実装の UserRepository
#[derive(Clone)]
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    /// 新しいリポジトリインスタンスを作成する
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.store
            .with_data(|data| data.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(&self, username: &UserName) -> Result<Option<User>, StoreError> {
        self.store.with_data(|data| {
            data.users
                .iter()
                .find(|u| u.username() == username)
                .cloned()
        })
    }

    async fn exists_username(&self, username: &UserName) -> Result<bool, StoreError> {
        self.store
            .with_data(|data| data.users.iter().any(|u| u.username() == username))
    }

    async fn insert(&self, tx: &mut TxContext, user: &User) -> Result<(), StoreError> {
        let data = tx.data_mut();
        if data.users.iter().any(|u| u.username() == user.username()) {
            return Err(StoreError::unique_violation(
                "users",
                user.username().as_str(),
            ));
        }
        data.users.push(user.clone());
        Ok(())
    }
}
