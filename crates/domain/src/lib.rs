//! # ScentLog ドメイン層
//!
//! 香水コミュニティのビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Brand, Magazine,
//!   Perfume, Review, User）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: BrandId,
//!   UserName, Season）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! app → infra → domain → shared
//! ```
//!
//! ドメイン層は `shared` のみに依存し、インフラ層（ストア、外部サービス）には
//! 一切依存しない。これにより、ビジネスロジックの純粋性が保たれる。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`brand`] - 香水ブランド
//! - [`magazine`] - ブランド発のマガジン記事
//! - [`perfume`] - 香水
//! - [`review`] - 香水レビュー
//! - [`user`] - ユーザー
//!
//! ## 使用例
//!
//! ```rust
//! use scentlog_domain::{DomainError, brand::BrandId};
//!
//! // ブランド ID の生成
//! let brand_id = BrandId::new(42)?;
//!
//! // ドメインエラーの生成
//! let error = DomainError::NotFound {
//!     entity_type: "Brand",
//!     id:          "99".to_string(),
//! };
//! # Ok::<(), DomainError>(())
//! ```

#[macro_use]
mod macros;

pub mod brand;
pub mod clock;
pub mod error;
pub mod magazine;
pub mod password;
pub mod perfume;
pub mod review;
pub mod user;
pub mod value_objects;

pub use error::DomainError;
