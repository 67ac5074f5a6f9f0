//! # ブランド
//!
//! 香水ブランドのエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Brand`] | ブランド | 香水・マガジン記事の発信元。論理削除される |
//! | [`ImageId`] | 画像 ID | サムネイル画像への参照 |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: BrandId は i64 をラップし、型安全性を確保
//! - **論理削除**: `deleted_at` を立てるだけで物理削除しない。
//!   検索側は削除済みブランドを結果から除外する

use chrono::{DateTime, Utc};

use crate::value_objects::BrandName;

define_entity_id! {
    /// ブランド ID（一意識別子）
    ///
    /// ストアの採番系列から払い出される正整数。
    pub struct BrandId {
        label: "ブランド ID",
    }
}

define_entity_id! {
    /// 画像 ID（一意識別子）
    ///
    /// ブランドのサムネイルなど、画像ストレージ上のファイルを指す。
    pub struct ImageId {
        label: "画像 ID",
    }
}

/// ブランドエンティティ
///
/// 香水とマガジン記事の発信元となるブランドを表現する。
///
/// # 不変条件
///
/// - `deleted_at` が Some の場合、検索結果に含めない（論理削除）
/// - `story` は空でもよい（未執筆のブランド紹介）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    id: BrandId,
    name: BrandName,
    story: String,
    thumbnail_id: Option<ImageId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Brand {
    /// 新しいブランドを作成する
    ///
    /// # 引数
    ///
    /// - `id`: ブランド ID（採番済み）
    /// - `name`: ブランド名
    /// - `story`: ブランド紹介文
    /// - `thumbnail_id`: サムネイル画像 ID
    /// - `now`: 現在日時（呼び出し元から注入）
    pub fn new(
        id: BrandId,
        name: BrandName,
        story: String,
        thumbnail_id: Option<ImageId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            story,
            thumbnail_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// 既存のデータからブランドを復元する（ストアから取得時）
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: BrandId,
        name: BrandName,
        story: String,
        thumbnail_id: Option<ImageId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            story,
            thumbnail_id,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> BrandId {
        self.id
    }

    pub fn name(&self) -> &BrandName {
        &self.name
    }

    pub fn story(&self) -> &str {
        &self.story
    }

    pub fn thumbnail_id(&self) -> Option<ImageId> {
        self.thumbnail_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    // ビジネスロジックメソッド

    /// 論理削除済みか判定する
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// ブランド紹介文を変更した新しいインスタンスを返す
    pub fn with_story(self, story: String, now: DateTime<Utc>) -> Self {
        Self {
            story,
            updated_at: now,
            ..self
        }
    }

    /// サムネイルを変更した新しいインスタンスを返す
    pub fn with_thumbnail(self, thumbnail_id: Option<ImageId>, now: DateTime<Utc>) -> Self {
        Self {
            thumbnail_id,
            updated_at: now,
            ..self
        }
    }

    /// 論理削除した新しいインスタンスを返す
    pub fn deleted(self, now: DateTime<Utc>) -> Self {
        Self {
            deleted_at: Some(now),
            updated_at: now,
            ..self
        }
    }
}
