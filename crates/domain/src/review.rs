//! # レビュー
//!
//! 香水レビューのエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Review`] | レビュー | ユーザーが香水に残す感想 |
//! | [`Strength`] | 香りの強さ | 拡散力の 3 段階評価 |
//! | [`Season`] | 推奨シーズン | 香水が合う季節（通年含む） |
//! | [`ReviewDuration`] | 持続時間 | 香りが残る長さ（分単位） |
//! | [`TagId`] | タグ ID | レビューに付けるタグへの参照 |
//!
//! ## フィードの並び順
//!
//! 香水別レビューフィードは投稿の新しい順、すなわち `id DESC`。
//! ID は採番順で単調増加するため、ID 単独で投稿順と一致する。

use chrono::{DateTime, Utc};
use scentlog_shared::cursor::CursorKeyed;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{DomainError, perfume::PerfumeId, user::UserId};

define_entity_id! {
    /// レビュー ID（一意識別子）
    pub struct ReviewId {
        label: "レビュー ID",
    }
}

define_entity_id! {
    /// タグ ID（一意識別子）
    ///
    /// レビューに付与するタグを指す。タグ本体の管理は対象外で、
    /// レビューは ID の列だけを保持する。
    pub struct TagId {
        label: "タグ ID",
    }
}

/// 香りの強さ（拡散力）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strength {
    /// 控えめ
    Light,
    /// 標準的
    Moderate,
    /// 強い
    Heavy,
}

impl std::str::FromStr for Strength {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "heavy" => Ok(Self::Heavy),
            _ => Err(DomainError::Validation(format!(
                "不正な香りの強さ: {}",
                s
            ))),
        }
    }
}

/// 推奨シーズン
///
/// 香水が合う季節の評価。季節を問わない場合は `Daily`。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Season {
    /// 春
    Spring,
    /// 夏
    Summer,
    /// 秋
    Autumn,
    /// 冬
    Winter,
    /// 通年
    Daily,
}

impl std::str::FromStr for Season {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "autumn" => Ok(Self::Autumn),
            "winter" => Ok(Self::Winter),
            "daily" => Ok(Self::Daily),
            _ => Err(DomainError::Validation(format!(
                "不正な推奨シーズン: {}",
                s
            ))),
        }
    }
}

/// 香りの持続時間（分単位、値オブジェクト)
///
/// # 不変条件
///
/// - 1 以上
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewDuration(i64);

impl ReviewDuration {
    /// 持続時間を作成する
    ///
    /// # エラー
    ///
    /// 0 以下の場合は `DomainError::Validation` を返す。
    pub fn new(minutes: i64) -> Result<Self, DomainError> {
        if minutes <= 0 {
            return Err(DomainError::Validation(format!(
                "持続時間は 1 以上である必要があります: {}",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    /// 内部の i64 値（分）を取得する
    pub fn as_minutes(&self) -> i64 {
        self.0
    }
}

/// 新規レビュー作成の入力
///
/// フィールドが多いため、位置引数ではなく構造体で受け取る。
#[derive(Debug)]
pub struct NewReview {
    pub id: ReviewId,
    pub perfume_id: PerfumeId,
    pub user_id: UserId,
    pub feeling: String,
    pub situation: String,
    pub strength: Strength,
    pub duration: ReviewDuration,
    pub season: Season,
    pub tags: Vec<TagId>,
    pub now: DateTime<Utc>,
}

/// レビューエンティティ
///
/// ユーザーが香水に残した感想を表現する。
///
/// # 不変条件
///
/// - `feeling` と `situation` は空文字列でもよい（評価軸だけのレビュー）
/// - 削除できるのは投稿者本人のみ（アプリケーション層で検証）
/// - 削除は物理削除（復元しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    id: ReviewId,
    perfume_id: PerfumeId,
    user_id: UserId,
    feeling: String,
    situation: String,
    strength: Strength,
    duration: ReviewDuration,
    season: Season,
    tags: Vec<TagId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Review {
    /// 新しいレビューを作成する
    pub fn new(new: NewReview) -> Self {
        Self {
            id: new.id,
            perfume_id: new.perfume_id,
            user_id: new.user_id,
            feeling: new.feeling,
            situation: new.situation,
            strength: new.strength,
            duration: new.duration,
            season: new.season,
            tags: new.tags,
            created_at: new.now,
            updated_at: new.now,
        }
    }

    /// 既存のデータからレビューを復元する（ストアから取得時）
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: ReviewId,
        perfume_id: PerfumeId,
        user_id: UserId,
        feeling: String,
        situation: String,
        strength: Strength,
        duration: ReviewDuration,
        season: Season,
        tags: Vec<TagId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            perfume_id,
            user_id,
            feeling,
            situation,
            strength,
            duration,
            season,
            tags,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> ReviewId {
        self.id
    }

    pub fn perfume_id(&self) -> PerfumeId {
        self.perfume_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn feeling(&self) -> &str {
        &self.feeling
    }

    pub fn situation(&self) -> &str {
        &self.situation
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn duration(&self) -> ReviewDuration {
        self.duration
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ビジネスロジックメソッド

    /// 指定ユーザーが投稿者本人か判定する
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

impl CursorKeyed for Review {
    type Key = ReviewId;

    fn cursor_key(&self) -> ReviewId {
        self.id
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
    fn review(now: DateTime<Utc>) -> Review {
        Review::new(NewReview {
            id: ReviewId::new(100).unwrap(),
            perfume_id: PerfumeId::new(1).unwrap(),
            user_id: UserId::new(1).unwrap(),
            feeling: "石鹸のような清潔感".to_string(),
            situation: "雨上がりの朝に".to_string(),
            strength: Strength::Light,
            duration: ReviewDuration::new(120).unwrap(),
            season: Season::Daily,
            tags: vec![TagId::new(1).unwrap(), TagId::new(2).unwrap()],
            now,
        })
    }

    #[rstest]
    #[case::ゼロ(0)]
    #[case::負数(-30)]
    fn test_持続時間は0以下を拒否する(#[case] minutes: i64) {
        assert!(ReviewDuration::new(minutes).is_err());
    }

    #[test]
    fn test_持続時間は正の値を受け入れる() {
        assert_eq!(ReviewDuration::new(90).unwrap().as_minutes(), 90);
    }

    #[rstest]
    fn test_感想と状況は空文字列でもよい(now: DateTime<Utc>) {
        let review = Review::new(NewReview {
            id: ReviewId::new(1).unwrap(),
            perfume_id: PerfumeId::new(1).unwrap(),
            user_id: UserId::new(1).unwrap(),
            feeling: String::new(),
            situation: String::new(),
            strength: Strength::Moderate,
            duration: ReviewDuration::new(60).unwrap(),
            season: Season::Summer,
            tags: Vec::new(),
            now,
        });

        assert_eq!(review.feeling(), "");
        assert_eq!(review.situation(), "");
    }

    #[rstest]
    fn test_投稿者本人を判定できる(review: Review) {
        assert!(review.is_authored_by(UserId::new(1).unwrap()));
        assert!(!review.is_authored_by(UserId::new(2).unwrap()));
    }

    #[rstest]
    fn test_カーソルキーはレビューid(review: Review) {
        assert_eq!(review.cursor_key(), ReviewId::new(100).unwrap());
    }

    #[rstest]
    fn test_新規レビューのタイムスタンプは注入された値と一致する(
        now: DateTime<Utc>,
        review: Review,
    ) {
        assert_eq!(review.created_at(), now);
        assert_eq!(review.updated_at(), now);
    }

    #[test]
    fn test_香りの強さの文字列表現() {
        assert_eq!(Strength::Light.to_string(), "light");
        assert_eq!("heavy".parse::<Strength>().unwrap(), Strength::Heavy);
        assert!("blast".parse::<Strength>().is_err());
    }

    #[test]
    fn test_推奨シーズンの文字列表現() {
        assert_eq!(Season::Daily.to_string(), "daily");
        assert_eq!("winter".parse::<Season>().unwrap(), Season::Winter);
        assert!("rainy".parse::<Season>().is_err());
    }
}
