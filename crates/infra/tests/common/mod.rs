//! テスト共通フィクスチャ
//!
//! ストアを使用する統合テストで共通利用するエンティティ生成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use scentlog_domain::{
    brand::{Brand, BrandId},
    magazine::{Magazine, MagazineId},
    password::PasswordHash,
    perfume::{Perfume, PerfumeId},
    review::{NewReview, Review, ReviewDuration, ReviewId, Season, Strength, TagId},
    user::{Email, NewGeneralUser, User, UserId},
    value_objects::{BrandName, MagazineTitle, PerfumeName, PersonName, UserName},
};

// =============================================================================
// シードデータ定数
// =============================================================================

/// テスト用の基準時刻
pub fn test_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// 基準時刻から `minutes` 分後の時刻
pub fn minutes_after(minutes: i64) -> DateTime<Utc> {
    test_now() + Duration::minutes(minutes)
}

// =============================================================================
// エンティティ生成ヘルパー
// =============================================================================

/// テスト用ブランドを作成する
pub fn create_test_brand(id: i64) -> Brand {
    Brand::new(
        BrandId::from_db(id),
        BrandName::new(format!("ブランド{}", id)).unwrap(),
        "ロンドン発のフレグランスメゾン".to_string(),
        None,
        test_now(),
    )
}

/// テスト用マガジンを作成する
///
/// `posted_at` が作成日時になる。カーソルの順序検証で時刻を制御したい
/// テストは [`minutes_after`] と組み合わせて使用する。
pub fn create_test_magazine(id: i64, brand_id: i64, posted_at: DateTime<Utc>) -> Magazine {
    Magazine::new(
        MagazineId::from_db(id),
        BrandId::from_db(brand_id),
        MagazineTitle::new(format!("新作コレクション Vol.{}", id)).unwrap(),
        "今季の注目ノートを紹介します。".to_string(),
        posted_at,
    )
}

/// テスト用香水を作成する
pub fn create_test_perfume(id: i64, brand_id: i64) -> Perfume {
    Perfume::new(
        PerfumeId::from_db(id),
        BrandId::from_db(brand_id),
        PerfumeName::new(format!("オードパルファム No.{}", id)).unwrap(),
        "柑橘のトップノートが特徴。".to_string(),
        test_now(),
    )
}

/// テスト用レビューを作成する
pub fn create_test_review(id: i64, perfume_id: i64, user_id: i64) -> Review {
    Review::new(NewReview {
        id: ReviewId::from_db(id),
        perfume_id: PerfumeId::from_db(perfume_id),
        user_id: UserId::from_db(user_id),
        feeling: "石鹸のような清潔感".to_string(),
        situation: "出勤前に一吹き".to_string(),
        strength: Strength::Moderate,
        duration: ReviewDuration::new(180).unwrap(),
        season: Season::Spring,
        tags: vec![TagId::from_db(1), TagId::from_db(2)],
        now: test_now(),
    })
}

/// テスト用ユーザーを作成する
pub fn create_test_user(id: i64, username: &str) -> User {
    User::join_general(NewGeneralUser {
        id: UserId::from_db(id),
        username: UserName::new(username).unwrap(),
        email: Email::new(format!("{}@example.com", username)).unwrap(),
        password_hash: PasswordHash::new("$argon2id$v=19$m=65536,t=1,p=1$dummy$dummy"),
        name: PersonName::new("山田 花子").unwrap(),
        marketing_consent: true,
        promotion_consent: false,
        now: test_now(),
    })
}
