//! # ユースケース層
//!
//! ScentLog のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・時計・トランザクション管理を
//!   `Arc<dyn Trait>` で外部から注入
//! - **書き込みは 1 ユースケース 1 トランザクション**: 各書き込みメソッドが
//!   自分でトランザクションを開始し、成功時のみコミットする
//! - **一覧は size + 1 取得**: ページネーション付き一覧は排他的境界から
//!   `size + 1` 件を取得し、余分の 1 件で次ページ有無を判定する
//!
//! ## モジュール構成
//!
//! - `magazine`: マガジン記事の一覧・取得・作成
//! - `perfume`: 香水の取得・作成
//! - `review`: レビューの一覧・作成・削除
//! - `user`: 会員登録・認証

pub(crate) mod helpers;

pub mod magazine;
pub mod perfume;
pub mod review;
pub mod user;

pub use magazine::{CreateMagazineInput, MagazineUseCaseImpl};
pub use perfume::{CreatePerfumeInput, PerfumeUseCaseImpl};
pub use review::{CreateReviewInput, ReviewUseCaseImpl};
pub use user::{RegisterGeneralUserInput, UserUseCaseImpl};
