//! ユーザー管理ユースケース
//!
//! 会員登録とユーザー名・パスワードによる認証を担う。
//! 認証失敗の応答は失敗箇所（ユーザー名の有無・パスワード不一致・退会済み）を
//! 区別しない。ユーザー名の存在を外部から推測されないためのルール。

use std::sync::Arc;

use scentlog_domain::{
    clock::Clock,
    password::PlainPassword,
    user::{Email, NewGeneralUser, User, UserId},
    value_objects::{PersonName, SequenceKind, UserName},
};
use scentlog_infra::{
    PasswordHasher, TransactionManager,
    repository::{IdSequenceRepository, UserRepository},
};
use scentlog_shared::{event_log::event, log_business_event};

use crate::{error::AppError, usecase::helpers::map_commit_error};

/// 認証失敗時の共通メッセージ
const AUTH_FAILED_MESSAGE: &str = "ユーザー名またはパスワードが正しくありません";

/// 会員登録の入力
pub struct RegisterGeneralUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub marketing_consent: bool,
    pub promotion_consent: bool,
}

/// ユーザー管理ユースケース
pub struct UserUseCaseImpl {
    user_repo: Arc<dyn UserRepository>,
    id_sequences: Arc<dyn IdSequenceRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    tx_manager: Arc<dyn TransactionManager>,
}

impl UserUseCaseImpl {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        id_sequences: Arc<dyn IdSequenceRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            user_repo,
            id_sequences,
            password_hasher,
            clock,
            tx_manager,
        }
    }

    /// 一般ユーザーとして会員登録する
    ///
    /// ## 処理フロー
    ///
    /// 1. 入力値の検証（ユーザー名・メール・パスワード・氏名）
    /// 2. ユーザー名の重複チェック
    /// 3. パスワードのハッシュ化
    /// 4. ID 採番
    /// 5. User ドメインオブジェクト作成
    /// 6. トランザクション内で保存
    ///
    /// 重複チェックをすり抜けた同時登録は、保存時の一意性検査が
    /// 拾って同じ `Conflict` になる。
    pub async fn register_general_user(
        &self,
        input: RegisterGeneralUserInput,
    ) -> Result<User, AppError> {
        // 1. 入力値の検証
        let username = UserName::new(input.username)?;
        let email = Email::new(input.email)?;
        let password = PlainPassword::new(input.password)?;
        let name = PersonName::new(input.name)?;

        // 2. ユーザー名の重複チェック
        if self.user_repo.exists_username(&username).await? {
            return Err(AppError::Conflict(
                "このユーザー名は既に使用されています".to_string(),
            ));
        }

        // 3. パスワードのハッシュ化
        let password_hash = self
            .password_hasher
            .hash(&password)
            .map_err(|e| AppError::Internal(format!("パスワードのハッシュ化に失敗: {}", e)))?;

        // 4. ID 採番
        let id = self
            .id_sequences
            .next_id(SequenceKind::User)
            .await
            .map_err(|e| AppError::Internal(format!("採番に失敗: {}", e)))?;

        // 5. User ドメインオブジェクト作成
        let now = self.clock.now();
        let user = User::join_general(NewGeneralUser {
            id: UserId::from_db(id),
            username,
            email,
            password_hash,
            name,
            marketing_consent: input.marketing_consent,
            promotion_consent: input.promotion_consent,
            now,
        });

        // 6. トランザクション内で保存
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("トランザクション開始に失敗: {}", e)))?;
        self.user_repo.insert(&mut tx, &user).await.map_err(|e| {
            if e.as_unique_violation().is_some() {
                AppError::Conflict("このユーザー名は既に使用されています".to_string())
            } else {
                AppError::Internal(format!("ユーザーの保存に失敗: {}", e))
            }
        })?;
        tx.commit().await.map_err(map_commit_error)?;

        log_business_event!(
            event.category = event::category::ACCOUNT,
            event.action = event::action::USER_REGISTERED,
            event.entity_type = event::entity_type::USER,
            event.entity_id = %user.id(),
            event.result = event::result::SUCCESS,
            "会員登録"
        );

        Ok(user)
    }

    /// ユーザー名とパスワードで認証する
    ///
    /// ## 処理フロー
    ///
    /// 1. 入力の形式検証（形式違反も認証失敗として扱う）
    /// 2. ユーザーの取得
    /// 3. ログイン可否の確認（退会済みは不可）
    /// 4. パスワードの照合
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        // 1. 入力の形式検証
        let Ok(username) = UserName::new(username) else {
            return Err(authentication_failed());
        };
        let Ok(password) = PlainPassword::new(password) else {
            return Err(authentication_failed());
        };

        // 2. ユーザーの取得（ストア障害は認証失敗と区別して伝播させる）
        let Some(user) = self.user_repo.find_by_username(&username).await? else {
            return Err(authentication_failed());
        };

        // 3. ログイン可否の確認
        if !user.can_login() {
            return Err(authentication_failed());
        }

        // 4. パスワードの照合
        let verified = self
            .password_hasher
            .verify(&password, user.password_hash())
            .map_err(|e| AppError::Internal(format!("パスワードの照合に失敗: {}", e)))?;
        if verified.is_mismatch() {
            return Err(authentication_failed());
        }

        log_business_event!(
            event.category = event::category::ACCOUNT,
            event.action = event::action::USER_AUTHENTICATED,
            event.entity_type = event::entity_type::USER,
            event.entity_id = %user.id(),
            event.result = event::result::SUCCESS,
            "ログイン"
        );

        Ok(user)
    }
}

/// 認証失敗を記録し、失敗箇所を特定できない共通エラーを返す
fn authentication_failed() -> AppError {
    log_business_event!(
        event.category = event::category::ACCOUNT,
        event.action = event::action::USER_AUTHENTICATED,
        event.result = event::result::FAILURE,
        "ログイン失敗"
    );
    AppError::Unauthorized(AUTH_FAILED_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use scentlog_domain::clock::FixedClock;
    use scentlog_infra::{
        Argon2PasswordHasher,
        mock::{MockIdSequenceRepository, MockTransactionManager, MockUserRepository},
        repository::UserRepository,
    };

    use super::*;

    fn test_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn build_sut(user_repo: MockUserRepository) -> UserUseCaseImpl {
        UserUseCaseImpl::new(
            Arc::new(user_repo),
            Arc::new(MockIdSequenceRepository::new()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(FixedClock::new(test_now())),
            Arc::new(MockTransactionManager),
        )
    }

    fn valid_input(username: &str) -> RegisterGeneralUserInput {
        RegisterGeneralUserInput {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "password123".to_string(),
            name: "山田 花子".to_string(),
            marketing_consent: true,
            promotion_consent: false,
        }
    }

    #[tokio::test]
    async fn test_register_general_user_正常系() {
        // Arrange
        let user_repo = MockUserRepository::new();
        let sut = build_sut(user_repo.clone());

        // Act
        let result = sut.register_general_user(valid_input("hanako")).await.unwrap();

        // Assert: 採番された ID とハッシュで期待値を組み立てる
        let expected = User::join_general(NewGeneralUser {
            id: result.id(),
            username: UserName::new("hanako").unwrap(),
            email: Email::new("hanako@example.com").unwrap(),
            password_hash: result.password_hash().clone(),
            name: PersonName::new("山田 花子").unwrap(),
            marketing_consent: true,
            promotion_consent: false,
            now: test_now(),
        });
        assert_eq!(result, expected);

        // 保存済みハッシュが平文パスワードと照合できることを確認
        let hasher = Argon2PasswordHasher::new();
        let verified = hasher
            .verify(
                &PlainPassword::new("password123").unwrap(),
                result.password_hash(),
            )
            .unwrap();
        assert!(verified.is_match());

        // リポジトリに保存されていることを確認
        let saved = user_repo
            .find_by_username(&UserName::new("hanako").unwrap())
            .await
            .unwrap();
        assert_eq!(saved, Some(expected));
    }

    #[tokio::test]
    async fn test_register_general_user_ユーザー名が使用済みならconflict() {
        // Arrange: 先に同名ユーザーを登録しておく
        let user_repo = MockUserRepository::new();
        let sut = build_sut(user_repo);
        sut.register_general_user(valid_input("hanako")).await.unwrap();

        // Act
        let err = sut
            .register_general_user(valid_input("hanako"))
            .await
            .unwrap_err();

        // Assert
        match err {
            AppError::Conflict(msg) => {
                assert_eq!(msg, "このユーザー名は既に使用されています");
            }
            other => panic!("Conflict を期待したが {:?} を受信", other),
        }
    }

    #[tokio::test]
    async fn test_register_general_user_短いパスワードはbad_request() {
        let sut = build_sut(MockUserRepository::new());

        let input = RegisterGeneralUserInput {
            password: "short".to_string(),
            ..valid_input("hanako")
        };

        let err = sut.register_general_user(input).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_register_general_user_不正なメールはbad_request() {
        let sut = build_sut(MockUserRepository::new());

        let input = RegisterGeneralUserInput {
            email: "not-an-email".to_string(),
            ..valid_input("hanako")
        };

        let err = sut.register_general_user(input).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_authenticate_正常系() {
        // Arrange
        let sut = build_sut(MockUserRepository::new());
        let registered = sut.register_general_user(valid_input("hanako")).await.unwrap();

        // Act
        let result = sut.authenticate("hanako", "password123").await.unwrap();

        // Assert
        assert_eq!(result, registered);
    }

    #[tokio::test]
    async fn test_authenticate_パスワード不一致と未知のユーザーは同じ応答() {
        // Arrange
        let sut = build_sut(MockUserRepository::new());
        sut.register_general_user(valid_input("hanako")).await.unwrap();

        // Act
        let err_mismatch = sut
            .authenticate("hanako", "wrong-password")
            .await
            .unwrap_err();
        let err_unknown = sut
            .authenticate("ghost", "password123")
            .await
            .unwrap_err();

        // Assert: どちらも同一メッセージの Unauthorized
        assert!(matches!(err_mismatch, AppError::Unauthorized(_)));
        assert!(matches!(err_unknown, AppError::Unauthorized(_)));
        assert_eq!(err_mismatch.to_string(), err_unknown.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_退会済みユーザーはログインできない() {
        // Arrange: 登録後に退会したユーザー
        let user_repo = MockUserRepository::new();
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher
            .hash(&PlainPassword::new("password123").unwrap())
            .unwrap();
        let user = User::join_general(NewGeneralUser {
            id: UserId::from_db(1),
            username: UserName::new("taro").unwrap(),
            email: Email::new("taro@example.com").unwrap(),
            password_hash: hash,
            name: PersonName::new("山田 太郎").unwrap(),
            marketing_consent: false,
            promotion_consent: false,
            now: test_now(),
        });
        user_repo.add_user(user.deleted(test_now()));
        let sut = build_sut(user_repo);

        // Act
        let err = sut.authenticate("taro", "password123").await.unwrap_err();

        // Assert
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
