//! # インメモリストア管理
//!
//! エンティティの永続化先となるインメモリストアの作成と管理を行う。
//!
//! ## 設計方針
//!
//! - **単一の committed 状態**: 全エンティティを 1 つの [`StoreData`] に集約し、
//!   `RwLock` で保護する
//! - **スナップショット分離**: トランザクションは開始時点の committed 状態の
//!   コピーに対して書き込み、コミット時に一括で反映する
//! - **楽観的並行性制御**: コミット時にバージョン番号を照合し、
//!   他のトランザクションが先にコミットしていれば競合エラーを返す
//!
//! ## スナップショット分離とは
//!
//! トランザクションの各書き込みを committed 状態へ直接反映すると、
//! 途中で失敗した場合に中途半端な状態が残る。スナップショット方式は
//! 以下のように動作する:
//!
//! 1. `begin()` で committed 状態のコピー（スナップショット）を作成
//! 2. 書き込みはすべてスナップショットに対して行う
//! 3. `commit()` でバージョンを照合し、一致すればスナップショットを committed に反映
//! 4. コミットせずドロップした場合、スナップショットは破棄される（ロールバック）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use scentlog_infra::store::{MemoryStore, MemoryTransactionManager, TransactionManager};
//!
//! async fn example() -> Result<(), scentlog_infra::error::StoreError> {
//!     let store = Arc::new(MemoryStore::new());
//!     let tx_manager = MemoryTransactionManager::new(Arc::clone(&store));
//!
//!     let mut tx = tx_manager.begin().await?;
//!     // リポジトリの書き込みメソッドに &mut tx を渡す
//!     tx.commit().await?;
//!
//!     Ok(())
//! }
//! ```

use std::sync::{
    Arc,
    RwLock,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use scentlog_domain::{
    brand::Brand,
    magazine::Magazine,
    perfume::Perfume,
    review::Review,
    user::User,
    value_objects::SequenceKind,
};

use crate::error::StoreError;

// =============================================================================
// StoreData / MemoryStore
// =============================================================================

/// ストアが保持する全エンティティ
///
/// トランザクション開始時にこの構造体ごとクローンされるため、
/// 全フィールドが `Clone` であること。
#[derive(Debug, Clone, Default)]
pub struct StoreData {
    pub(crate) brands:    Vec<Brand>,
    pub(crate) magazines: Vec<Magazine>,
    pub(crate) perfumes:  Vec<Perfume>,
    pub(crate) reviews:   Vec<Review>,
    pub(crate) users:     Vec<User>,
}

/// committed 状態とそのバージョン
///
/// `version` はコミットのたびに 1 増える。トランザクションは開始時の
/// バージョンを記憶し、コミット時の照合に使用する。
struct Committed {
    version: u64,
    data:    StoreData,
}

/// エンティティ別の ID 採番カウンター
///
/// ロールバックされたトランザクションが採番した ID は欠番になるが、
/// 再利用しない（データベースのシーケンスと同じ挙動）。
struct Sequences {
    brand:    AtomicI64,
    magazine: AtomicI64,
    perfume:  AtomicI64,
    review:   AtomicI64,
    user:     AtomicI64,
}

impl Sequences {
    fn new() -> Self {
        Self {
            brand:    AtomicI64::new(1),
            magazine: AtomicI64::new(1),
            perfume:  AtomicI64::new(1),
            review:   AtomicI64::new(1),
            user:     AtomicI64::new(1),
        }
    }

    fn next(&self, kind: SequenceKind) -> i64 {
        let counter = match kind {
            SequenceKind::Brand => &self.brand,
            SequenceKind::Magazine => &self.magazine,
            SequenceKind::Perfume => &self.perfume,
            SequenceKind::Review => &self.review,
            SequenceKind::User => &self.user,
        };
        counter.fetch_add(1, Ordering::Relaxed)
    }
}

/// インメモリストア
///
/// アプリケーション起動時に一度だけ作成し、`Arc` で全リポジトリが共有する。
///
/// # 例
///
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use scentlog_infra::store::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new());
/// ```
pub struct MemoryStore {
    committed: RwLock<Committed>,
    sequences: Sequences,
}

impl MemoryStore {
    /// 空のストアを作成する
    pub fn new() -> Self {
        Self {
            committed: RwLock::new(Committed {
                version: 0,
                data:    StoreData::default(),
            }),
            sequences: Sequences::new(),
        }
    }

    /// committed 状態への読み取りアクセス
    ///
    /// 読み取り系リポジトリメソッドが使用する。クロージャーに渡されるのは
    /// コミット済みの状態のみで、進行中のトランザクションの書き込みは見えない。
    pub(crate) fn with_data<T>(&self, f: impl FnOnce(&StoreData) -> T) -> Result<T, StoreError> {
        let committed = self
            .committed
            .read()
            .map_err(|_| StoreError::unexpected("ストアのロックが汚染されています"))?;
        Ok(f(&committed.data))
    }

    /// 次の ID を採番する
    ///
    /// 採番はトランザクションの外側で行われ、ロールバックしても戻らない。
    pub(crate) fn next_in_sequence(&self, kind: SequenceKind) -> i64 {
        self.sequences.next(kind)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TxContext
// =============================================================================

/// トランザクションコンテキスト
///
/// 書き込みリポジトリメソッドの必須引数。
/// トランザクションなしの書き込みをコンパイルエラーにする（構造的強制）。
///
/// # 構造的強制とは
///
/// 従来は「書き込みにはトランザクションを使うべき」というルールだったが、
/// ルールの存在だけでは守られなかった。`TxContext` を必須引数にすることで、
/// トランザクションなしの書き込みはコンパイルエラーになる。
///
/// # ライフサイクル
///
/// 1. `TransactionManager::begin()` で作成
/// 2. 書き込みメソッドに `&mut TxContext` として渡す
/// 3. `commit()` でコミット、またはドロップでロールバック
pub struct TxContext(TxContextInner);

enum TxContextInner {
    Memory(MemoryTx),
    #[cfg(any(test, feature = "test-utils"))]
    Mock,
}

/// インメモリトランザクションの実体
///
/// 開始時点の committed 状態のコピーと、そのバージョンを保持する。
struct MemoryTx {
    store:        Arc<MemoryStore>,
    data:         StoreData,
    base_version: u64,
}

impl TxContext {
    /// インメモリトランザクションを開始する
    ///
    /// `MemoryTransactionManager` のみが使用する。
    /// ユースケース層は `TransactionManager` trait 経由で TxContext を取得する。
    pub(crate) fn begin_memory(store: &Arc<MemoryStore>) -> Result<Self, StoreError> {
        let committed = store
            .committed
            .read()
            .map_err(|_| StoreError::unexpected("ストアのロックが汚染されています"))?;
        Ok(Self(TxContextInner::Memory(MemoryTx {
            store:        Arc::clone(store),
            data:         committed.data.clone(),
            base_version: committed.version,
        })))
    }

    /// テスト用のモック TxContext を作成する
    ///
    /// Mock リポジトリはそれ自体がインメモリ実装のため、実際のトランザクションは
    /// 不要。`data_mut()` を呼ぶと panic するが、Mock リポジトリは
    /// `data_mut()` を使用しない。
    #[cfg(any(test, feature = "test-utils"))]
    pub fn mock() -> Self {
        Self(TxContextInner::Mock)
    }

    /// トランザクションをコミットする
    ///
    /// 開始以降に他のトランザクションがコミットしていた場合は
    /// `TxConflict` を返し、スナップショットは反映されない。
    /// 呼ばずにドロップすると、スナップショットが破棄されロールバックとなる。
    pub async fn commit(self) -> Result<(), StoreError> {
        match self.0 {
            TxContextInner::Memory(tx) => {
                let mut committed = tx
                    .store
                    .committed
                    .write()
                    .map_err(|_| StoreError::unexpected("ストアのロックが汚染されています"))?;
                if committed.version != tx.base_version {
                    return Err(StoreError::tx_conflict(format!(
                        "バージョン {} で開始したが、現在は {}",
                        tx.base_version, committed.version
                    )));
                }
                committed.data = tx.data;
                committed.version += 1;
                Ok(())
            }
            #[cfg(any(test, feature = "test-utils"))]
            TxContextInner::Mock => Ok(()),
        }
    }

    /// トランザクション内のスナップショットを取得する
    ///
    /// インメモリリポジトリの書き込み実装が使用する。読み取りもこの
    /// スナップショット越しに行うことで、同一トランザクション内の
    /// 未コミットの書き込みが見える（例: ユーザー名の重複チェック）。
    pub(crate) fn data_mut(&mut self) -> &mut StoreData {
        match &mut self.0 {
            TxContextInner::Memory(tx) => &mut tx.data,
            #[cfg(any(test, feature = "test-utils"))]
            TxContextInner::Mock => {
                panic!(
                    "BUG: data_mut() called on Mock TxContext. Mock repos should not call \
                     data_mut()."
                )
            }
        }
    }
}

// =============================================================================
// TransactionManager
// =============================================================================

/// トランザクション管理 trait
///
/// ユースケース層が TxContext を作成するための抽象化。
/// ユースケース層は MemoryStore に直接依存せず、この trait 経由で
/// トランザクションを開始する。
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// トランザクションを開始し、TxContext を返す
    async fn begin(&self) -> Result<TxContext, StoreError>;
}

/// インメモリストア用 TransactionManager 実装
pub struct MemoryTransactionManager {
    store: Arc<MemoryStore>,
}

impl MemoryTransactionManager {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TransactionManager for MemoryTransactionManager {
    async fn begin(&self) -> Result<TxContext, StoreError> {
        TxContext::begin_memory(&self.store)
    }
}
