//! # 香水
//!
//! カタログに登録される香水エンティティを定義する。

use chrono::{DateTime, Utc};

use crate::{brand::BrandId, value_objects::PerfumeName};

define_entity_id! {
    /// 香水 ID（一意識別子）
    pub struct PerfumeId {
        label: "香水 ID",
    }
}

/// 香水エンティティ
///
/// ブランドに属する香水ひとつを表現する。レビューの対象となる。
///
/// # 不変条件
///
/// - `brand_id` は存在するブランドを指す（アプリケーション層で検証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perfume {
    id: PerfumeId,
    brand_id: BrandId,
    name: PerfumeName,
    story: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Perfume {
    /// 新しい香水を作成する
    pub fn new(
        id: PerfumeId,
        brand_id: BrandId,
        name: PerfumeName,
        story: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            brand_id,
            name,
            story,
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータから香水を復元する（ストアから取得時）
    pub fn from_db(
        id: PerfumeId,
        brand_id: BrandId,
        name: PerfumeName,
        story: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            brand_id,
            name,
            story,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> PerfumeId {
        self.id
    }

    pub fn brand_id(&self) -> BrandId {
        self.brand_id
    }

    pub fn name(&self) -> &PerfumeName {
        &self.name
    }

    pub fn story(&self) -> &str {
        &self.story
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ビジネスロジックメソッド

    /// 紹介文を変更した新しいインスタンスを返す
    pub fn with_story(self, story: String, now: DateTime<Utc>) -> Self {
        Self {
            story,
            updated_at: now,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[fixture]
    fn perfume(now: DateTime<Utc>) -> Perfume {
        Perfume::new(
            PerfumeId::new(5).unwrap(),
            BrandId::new(1).unwrap(),
            PerfumeName::new("Wood Sage & Sea Salt").unwrap(),
            "海辺の自由な空気".to_string(),
            now,
        )
    }

    #[rstest]
    fn test_新規香水のタイムスタンプは注入された値と一致する(
        now: DateTime<Utc>,
        perfume: Perfume,
    ) {
        assert_eq!(perfume.created_at(), now);
        assert_eq!(perfume.updated_at(), now);
    }

    #[rstest]
    fn test_紹介文変更後の状態(now: DateTime<Utc>, perfume: Perfume) {
        let transition_time = DateTime::from_timestamp(1_700_001_000, 0).unwrap();
        let original = perfume.clone();
        let sut = perfume.with_story("改稿した紹介文".to_string(), transition_time);

        let expected = Perfume::from_db(
            original.id(),
            original.brand_id(),
            original.name().clone(),
            "改稿した紹介文".to_string(),
            now,
            transition_time,
        );
        assert_eq!(sut, expected);
    }
}
