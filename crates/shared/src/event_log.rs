//! # ビジネスイベントログの構造化ヘルパー
//!
//! 運用調査で `jq` により効率的に絞り込めるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"`
//! マーカーが自動付与され、`jq 'select(.["event.kind"] == "business_event")'`
//! でフィルタできる。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`event.action`）を使用。tracing の
//! `$($field:ident).+` パターンでサポートされ、JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID
/// - `event.actor_id`: 操作者 ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const ACCOUNT: &str = "account";
        pub const CATALOG: &str = "catalog";
        pub const COMMUNITY: &str = "community";
    }

    /// イベントアクション
    pub mod action {
        // アカウント
        pub const USER_REGISTERED: &str = "user.registered";
        pub const USER_AUTHENTICATED: &str = "user.authenticated";

        // カタログ
        pub const MAGAZINE_CREATED: &str = "magazine.created";
        pub const PERFUME_CREATED: &str = "perfume.created";

        // コミュニティ
        pub const REVIEW_CREATED: &str = "review.created";
        pub const REVIEW_DELETED: &str = "review.deleted";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const USER: &str = "user";
        pub const MAGAZINE: &str = "magazine";
        pub const PERFUME: &str = "perfume";
        pub const REVIEW: &str = "review";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}
