//! # ScentLog 共有ユーティリティ
//!
//! このクレートは、ScentLog
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, app）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える
//!
//! 中心となるのはカーソルページネーションの部品群である。
//! [`cursor`] がページ構築の規則を、[`cursor_token`] が不透明トークンの
//! 符号化を、[`paginated_response`] が境界へ返すレスポンス形を担う。

pub mod cursor;
pub mod cursor_token;
pub mod event_log;
pub mod observability;
pub mod paginated_response;

pub use cursor::{CursorError, CursorKeyed, CursorPage, CursorPageable, PageLimits, PageSize};
pub use cursor_token::{decode_cursor, encode_cursor};
pub use paginated_response::PaginatedResponse;
