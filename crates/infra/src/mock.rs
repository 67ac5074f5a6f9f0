//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! scentlog-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! [`crate::store::MemoryStore`] と異なり、書き込みは即座に反映される
//! （トランザクションのコミット・ロールバックは再現しない）。
//! トランザクション挙動を検証するテストはストア実装を直接使用すること。

use std::{
    cmp::Reverse,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use itertools::Itertools as _;
use scentlog_domain::{
    brand::{Brand, BrandId},
    magazine::{Magazine, MagazineCursor, MagazineId},
    perfume::{Perfume, PerfumeId},
    review::{Review, ReviewId},
    user::{User, UserId},
    value_objects::{SequenceKind, UserName},
};
use scentlog_shared::CursorKeyed as _;

use crate::{
    error::StoreError,
    repository::{
        BrandRepository,
        IdSequenceRepository,
        MagazineRepository,
        PerfumeRepository,
        ReviewRepository,
        UserRepository,
        take_count,
    },
    store::{TransactionManager, TxContext},
};

// ===== MockBrandRepository =====

#[derive(Clone, Default)]
pub struct MockBrandRepository {
    brands: Arc<Mutex<Vec<Brand>>>,
}

impl MockBrandRepository {
    pub fn new() -> Self {
        Self {
            brands: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_brand(&self, brand: Brand) {
        self.brands.lock().unwrap().push(brand);
    }
}

#[async_trait]
impl BrandRepository for MockBrandRepository {
    async fn find_by_id(&self, id: BrandId) -> Result<Option<Brand>, StoreError> {
        Ok(self
            .brands
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id() == id && !b.is_deleted())
            .cloned())
    }

    async fn insert(&self, _tx: &mut TxContext, brand: &Brand) -> Result<(), StoreError> {
        self.brands.lock().unwrap().push(brand.clone());
        Ok(())
    }
}

// ===== MockMagazineRepository =====

#[derive(Clone, Default)]
pub struct MockMagazineRepository {
    magazines: Arc<Mutex<Vec<Magazine>>>,
}

impl MockMagazineRepository {
    pub fn new() -> Self {
        Self {
            magazines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_magazine(&self, magazine: Magazine) {
        self.magazines.lock().unwrap().push(magazine);
    }
}

#[async_trait]
impl MagazineRepository for MockMagazineRepository {
    async fn find_by_id(&self, id: MagazineId) -> Result<Option<Magazine>, StoreError> {
        Ok(self
            .magazines
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id() == id)
            .cloned())
    }

    async fn find_page(
        &self,
        bound: Option<MagazineCursor>,
        limit: i64,
    ) -> Result<Vec<Magazine>, StoreError> {
        Ok(self
            .magazines
            .lock()
            .unwrap()
            .iter()
            .filter(|m| bound.is_none_or(|b| m.cursor_key() < b))
            .sorted_by_key(|m| Reverse(m.cursor_key()))
            .take(take_count(limit))
            .cloned()
            .collect())
    }

    async fn find_page_by_brand(
        &self,
        brand_id: BrandId,
        bound: Option<MagazineCursor>,
        limit: i64,
    ) -> Result<Vec<Magazine>, StoreError> {
        Ok(self
            .magazines
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.brand_id() == brand_id)
            .filter(|m| bound.is_none_or(|b| m.cursor_key() < b))
            .sorted_by_key(|m| Reverse(m.cursor_key()))
            .take(take_count(limit))
            .cloned()
            .collect())
    }

    async fn insert(&self, _tx: &mut TxContext, magazine: &Magazine) -> Result<(), StoreError> {
        self.magazines.lock().unwrap().push(magazine.clone());
        Ok(())
    }
}

// ===== MockPerfumeRepository =====

#[derive(Clone, Default)]
pub struct MockPerfumeRepository {
    perfumes: Arc<Mutex<Vec<Perfume>>>,
}

impl MockPerfumeRepository {
    pub fn new() -> Self {
        Self {
            perfumes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_perfume(&self, perfume: Perfume) {
        self.perfumes.lock().unwrap().push(perfume);
    }
}

#[async_trait]
impl PerfumeRepository for MockPerfumeRepository {
    async fn find_by_id(&self, id: PerfumeId) -> Result<Option<Perfume>, StoreError> {
        Ok(self
            .perfumes
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned())
    }

    async fn insert(&self, _tx: &mut TxContext, perfume: &Perfume) -> Result<(), StoreError> {
        self.perfumes.lock().unwrap().push(perfume.clone());
        Ok(())
    }
}

// ===== MockReviewRepository =====

#[derive(Clone, Default)]
pub struct MockReviewRepository {
    reviews: Arc<Mutex<Vec<Review>>>,
}

impl MockReviewRepository {
    pub fn new() -> Self {
        Self {
            reviews: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_review(&self, review: Review) {
        self.reviews.lock().unwrap().push(review);
    }
}

#[async_trait]
impl ReviewRepository for MockReviewRepository {
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, StoreError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn find_page_by_perfume(
        &self,
        perfume_id: PerfumeId,
        bound: Option<ReviewId>,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.perfume_id() == perfume_id)
            .filter(|r| bound.is_none_or(|b| r.cursor_key() < b))
            .sorted_by_key(|r| Reverse(r.cursor_key()))
            .take(take_count(limit))
            .cloned()
            .collect())
    }

    async fn insert(&self, _tx: &mut TxContext, review: &Review) -> Result<(), StoreError> {
        self.reviews.lock().unwrap().push(review.clone());
        Ok(())
    }

    async fn delete(&self, _tx: &mut TxContext, id: ReviewId) -> Result<(), StoreError> {
        self.reviews.lock().unwrap().retain(|r| r.id() != id);
        Ok(())
    }
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &UserName) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn exists_username(&self, username: &UserName) -> Result<bool, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username() == username))
    }

    async fn insert(&self, _tx: &mut TxContext, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username() == user.username()) {
            return Err(StoreError::unique_violation(
                "users",
                user.username().as_str(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }
}

// ===== MockIdSequenceRepository =====

/// テスト用のモック IdSequenceRepository
///
/// 呼び出しごとにカウンターをインクリメントして返す。
/// エンティティ種別は区別しない（テストでは衝突しなければ十分）。
#[derive(Clone, Default)]
pub struct MockIdSequenceRepository {
    counter: Arc<Mutex<i64>>,
}

impl MockIdSequenceRepository {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(Mutex::new(0)),
        }
    }
}

#[async_trait]
impl IdSequenceRepository for MockIdSequenceRepository {
    async fn next_id(&self, _kind: SequenceKind) -> Result<i64, StoreError> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        Ok(*counter)
    }
}

// ===== MockTransactionManager =====

/// テスト用のモック TransactionManager
///
/// [`TxContext::mock`] を返すだけの実装。コミット・ロールバックは何もしない。
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, StoreError> {
        Ok(TxContext::mock())
    }
}
