//! # ScentLog インフラ層
//!
//! エンティティの永続化と外部アルゴリズムへの接続を担当する
//! インフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその具体的な実装を提供する。
//! 永続化の詳細をカプセル化し、ユースケース層をストアの変更から保護する。
//!
//! ## 責務
//!
//! - **ストア管理**: インメモリストアとスナップショットトランザクション
//! - **リポジトリ実装**: エンティティごとの永続化操作
//! - **パスワードハッシュ**: Argon2id によるハッシュ化と検証
//!
//! ## 依存関係
//!
//! ```text
//! app → infra → domain → shared
//!          ↘      ↓
//!            shared
//! ```
//!
//! インフラ層は `domain` と `shared` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`store`] - インメモリストアとトランザクション管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`password`] - パスワードハッシュ
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use scentlog_infra::{
//!     repository::MemoryBrandRepository,
//!     store::{MemoryStore, MemoryTransactionManager},
//! };
//!
//! let store = Arc::new(MemoryStore::new());
//! let tx_manager = MemoryTransactionManager::new(Arc::clone(&store));
//! let brand_repo = MemoryBrandRepository::new(Arc::clone(&store));
//! ```

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;
pub mod store;

pub use error::{StoreError, StoreErrorKind};
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use store::{MemoryStore, MemoryTransactionManager, TransactionManager, TxContext};
