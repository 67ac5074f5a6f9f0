//! # マガジン
//!
//! ブランドが発信するマガジン記事のエンティティを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Magazine`] | マガジン記事 | ブランドのストーリーや新作紹介の読み物 |
//! | [`MagazineCursor`] | フィードカーソル | ブランド別フィードの並び順キー |
//!
//! ## フィードの並び順
//!
//! ブランド別フィードは「新しい記事が先頭」、すなわち
//! `(created_at DESC, id DESC)`。同時刻に複数記事が入った場合も
//! ID で順序が一意に定まり、カーソルの排他的境界が安定する。

use chrono::{DateTime, Utc};
use scentlog_shared::cursor::CursorKeyed;
use serde::{Deserialize, Serialize};

use crate::{brand::BrandId, value_objects::MagazineTitle};

define_entity_id! {
    /// マガジン記事 ID（一意識別子）
    pub struct MagazineId {
        label: "マガジン ID",
    }
}

/// ブランド別マガジンフィードの並び順キー
///
/// `(created_at, id)` の辞書式順序。フィードはこのキーの降順で並び、
/// カーソルは「このキーより古い側」を指す排他的境界として使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MagazineCursor {
    pub created_at: DateTime<Utc>,
    pub id: MagazineId,
}

/// マガジン記事エンティティ
///
/// ブランドが読者に届ける記事を表現する。
///
/// # 不変条件
///
/// - `brand_id` は存在するブランドを指す（アプリケーション層で検証）
/// - `contents` は空でもよい（タイトル先行の下書き公開）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magazine {
    id: MagazineId,
    brand_id: BrandId,
    title: MagazineTitle,
    contents: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Magazine {
    /// 新しいマガジン記事を作成する
    ///
    /// # 引数
    ///
    /// - `id`: マガジン ID（採番済み）
    /// - `brand_id`: 発信元ブランド ID
    /// - `title`: 記事タイトル
    /// - `contents`: 本文
    /// - `now`: 現在日時（呼び出し元から注入）
    pub fn new(
        id: MagazineId,
        brand_id: BrandId,
        title: MagazineTitle,
        contents: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            brand_id,
            title,
            contents,
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータからマガジン記事を復元する（ストアから取得時）
    pub fn from_db(
        id: MagazineId,
        brand_id: BrandId,
        title: MagazineTitle,
        contents: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            brand_id,
            title,
            contents,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> MagazineId {
        self.id
    }

    pub fn brand_id(&self) -> BrandId {
        self.brand_id
    }

    pub fn title(&self) -> &MagazineTitle {
        &self.title
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ビジネスロジックメソッド

    /// タイトルと本文を変更した新しいインスタンスを返す
    pub fn with_contents(
        self,
        title: MagazineTitle,
        contents: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            title,
            contents,
            updated_at: now,
            ..self
        }
    }
}

impl CursorKeyed for Magazine {
    type Key = MagazineCursor;

    fn cursor_key(&self) -> MagazineCursor {
        MagazineCursor {
            created_at: self.created_at,
            id: self.id,
        }
    }
}
