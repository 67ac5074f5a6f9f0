//! # リポジトリ実装
//!
//! エンティティの永続化操作を trait として定義し、インメモリストアによる
//! 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層は trait にのみ依存し、実装はインフラ層が提供
//! - **読み書き分離**: 読み取りは committed 状態を参照し、
//!   書き込みは [`crate::store::TxContext`] のスナップショットに対して行う
//! - **カーソルフェッチ契約**: ページ取得メソッドは境界キーより厳密に後ろの行を
//!   ソート順どおりに最大 `limit` 件返す
//! - **テスタビリティ**: trait 経由でモック可能な設計

pub mod brand_repository;
pub mod magazine_repository;
pub mod perfume_repository;
pub mod review_repository;
pub mod sequence_repository;
pub mod user_repository;

pub use brand_repository::{BrandRepository, MemoryBrandRepository};
pub use magazine_repository::{MagazineRepository, MemoryMagazineRepository};
pub use perfume_repository::{MemoryPerfumeRepository, PerfumeRepository};
pub use review_repository::{MemoryReviewRepository, ReviewRepository};
pub use sequence_repository::{IdSequenceRepository, MemoryIdSequenceRepository};
pub use user_repository::{MemoryUserRepository, UserRepository};

/// フェッチ件数を `usize` に変換する
///
/// 負数はフェッチ契約の範囲外なので 0 件として扱う。
pub(crate) fn take_count(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}
