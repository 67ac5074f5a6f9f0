//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`User`] | ユーザー | 一般会員。レビューの投稿者 |
//! | [`UserStatus`] | ユーザー状態 | 退会（論理削除）の表現 |
//! | [`Email`] | メールアドレス | 連絡先。形式を検証して保持 |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は i64 をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは基本的に不変、変更はメソッド経由
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use scentlog_domain::{
//!     password::PasswordHash,
//!     user::{Email, NewGeneralUser, User, UserId},
//!     value_objects::{PersonName, UserName},
//! };
//!
//! // 一般会員の新規登録
//! let user = User::join_general(NewGeneralUser {
//!     id: UserId::new(1)?,
//!     username: UserName::new("perfume_lover")?,
//!     email: Email::new("user@example.com")?,
//!     password_hash: PasswordHash::new("$argon2id$v=19$..."),
//!     name: PersonName::new("山田太郎")?,
//!     marketing_consent: true,
//!     promotion_consent: false,
//!     now: chrono::Utc::now(),
//! });
//!
//! // ステータス確認
//! assert!(user.is_active());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
    DomainError,
    password::PasswordHash,
    value_objects::{PersonName, UserName},
};

define_entity_id! {
    /// ユーザー ID（一意識別子）
    pub struct UserId {
        label: "ユーザー ID",
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式である
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        // 基本的な構造検証: local@domain の形式であること
        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーステータス
///
/// ユーザーの状態を表現する列挙型。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserStatus {
    /// アクティブ（ログイン可能）
    Active,
    /// 退会済み（論理削除）
    Deleted,
}

impl std::str::FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "deleted" => Ok(Self::Deleted),
            _ => Err(DomainError::Validation(format!(
                "不正なユーザーステータス: {}",
                s
            ))),
        }
    }
}

/// 一般会員登録の入力
///
/// フィールドが多いため、位置引数ではなく構造体で受け取る。
#[derive(Debug)]
pub struct NewGeneralUser {
    pub id: UserId,
    pub username: UserName,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub name: PersonName,
    pub marketing_consent: bool,
    pub promotion_consent: bool,
    pub now: DateTime<Utc>,
}

/// ユーザーエンティティ
///
/// コミュニティの一般会員を表現する。ユーザー名とパスワードで認証する。
///
/// # 不変条件
///
/// - `username` はシステム全体で一意
/// - `status` が `Deleted` の場合、ログイン不可
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: UserName,
    email: Email,
    password_hash: PasswordHash,
    name: PersonName,
    marketing_consent: bool,
    promotion_consent: bool,
    status: UserStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// 一般会員として新規登録する
    ///
    /// # 不変条件
    ///
    /// - 作成時のステータスは `Active`
    /// - パスワードはハッシュ化済みの値だけを受け取る
    pub fn join_general(new: NewGeneralUser) -> Self {
        Self {
            id: new.id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            name: new.name,
            marketing_consent: new.marketing_consent,
            promotion_consent: new.promotion_consent,
            status: UserStatus::Active,
            created_at: new.now,
            updated_at: new.now,
        }
    }

    /// 既存のデータからユーザーを復元する（ストアから取得時）
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: UserId,
        username: UserName,
        email: Email,
        password_hash: PasswordHash,
        name: PersonName,
        marketing_consent: bool,
        promotion_consent: bool,
        status: UserStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            name,
            marketing_consent,
            promotion_consent,
            status,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn marketing_consent(&self) -> bool {
        self.marketing_consent
    }

    pub fn promotion_consent(&self) -> bool {
        self.promotion_consent
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ビジネスロジックメソッド

    /// ユーザーがアクティブか判定する
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// ユーザーがログイン可能か判定する
    pub fn can_login(&self) -> bool {
        self.is_active()
    }

    /// 同意設定を変更した新しいインスタンスを返す
    pub fn with_consents(
        self,
        marketing_consent: bool,
        promotion_consent: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            marketing_consent,
            promotion_consent,
            updated_at: now,
            ..self
        }
    }

    /// 退会（論理削除）した新しいインスタンスを返す
    pub fn deleted(self, now: DateTime<Utc>) -> Self {
        Self {
            status: UserStatus::Deleted,
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

    /// テスト用の固定タイムスタンプ
    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[fixture]
    fn active_user(now: DateTime<Utc>) -> User {
        User::join_general(NewGeneralUser {
            id: UserId::new(1).unwrap(),
            username: UserName::new("perfume_lover").unwrap(),
            email: Email::new("user@example.com").unwrap(),
            password_hash: PasswordHash::new("$argon2id$v=19$..."),
            name: PersonName::new("山田太郎").unwrap(),
            marketing_consent: true,
            promotion_consent: false,
            now,
        })
    }

    // Email のテスト

    #[test]
    fn test_メールアドレスは正常な形式を受け入れる() {
        assert!(Email::new("user@example.com").is_ok());
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("no-at-sign", "@記号なし")]
    #[case("@", "@のみ")]
    #[case("@example.com", "ローカル部分が空")]
    #[case("user@", "ドメイン部分が空")]
    #[case(&format!("{}@example.com", "a".repeat(256)), "255文字超過")]
    fn test_メールアドレスは不正な形式を拒否する(
        #[case] input: &str,
        #[case] _reason: &str,
    ) {
        assert!(Email::new(input).is_err());
    }

    // User のテスト

    #[rstest]
    fn test_新規登録ユーザーはアクティブ状態(active_user: User) {
        assert!(active_user.is_active());
        assert!(active_user.can_login());
    }

    #[rstest]
    fn test_新規登録ユーザーのタイムスタンプは注入された値と一致する(
        now: DateTime<Utc>,
        active_user: User,
    ) {
        assert_eq!(active_user.created_at(), now);
        assert_eq!(active_user.updated_at(), now);
    }

    #[rstest]
    fn test_同意設定変更後の状態(active_user: User) {
        let transition_time = DateTime::from_timestamp(1_700_001_000, 0).unwrap();
        let original = active_user.clone();
        let sut = active_user.with_consents(false, true, transition_time);

        let expected = User::from_db(
            original.id(),
            original.username().clone(),
            original.email().clone(),
            original.password_hash().clone(),
            original.name().clone(),
            false,
            true,
            original.status(),
            original.created_at(),
            transition_time,
        );
        assert_eq!(sut, expected);
    }

    #[rstest]
    fn test_退会後の状態(active_user: User) {
        let transition_time = DateTime::from_timestamp(1_700_001_000, 0).unwrap();
        let original = active_user.clone();
        let sut = active_user.deleted(transition_time);

        let expected = User::from_db(
            original.id(),
            original.username().clone(),
            original.email().clone(),
            original.password_hash().clone(),
            original.name().clone(),
            original.marketing_consent(),
            original.promotion_consent(),
            UserStatus::Deleted,
            original.created_at(),
            transition_time,
        );
        assert_eq!(sut, expected);
    }

    #[rstest]
    fn test_退会したユーザーはログインできない(active_user: User) {
        let transition_time = DateTime::from_timestamp(1_700_001_000, 0).unwrap();
        let deleted = active_user.deleted(transition_time);

        assert!(!deleted.can_login());
    }

    #[test]
    fn test_ユーザーステータスの文字列表現() {
        assert_eq!(UserStatus::Active.to_string(), "active");
        assert_eq!("deleted".parse::<UserStatus>().unwrap(), UserStatus::Deleted);
        assert!("suspended".parse::<UserStatus>().is_err());
    }
}
