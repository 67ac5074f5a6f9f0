//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。

use argon2::{
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    password_hash::{PasswordHash as Argon2PasswordHash, SaltString, rand_core::OsRng},
};
use scentlog_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::StoreError;

/// パスワードのハッシュ化と検証を担当するトレイト
///
/// 登録時に `hash`、ログイン時に `verify` を使用する。
pub trait PasswordHasher: Send + Sync {
    /// 平文パスワードをハッシュ化する
    ///
    /// # Errors
    ///
    /// - ハッシュ化処理が失敗した場合
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, StoreError>;

    /// パスワードを検証する
    ///
    /// # Errors
    ///
    /// - 不正なハッシュ形式の場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, StoreError>;
}

/// Argon2id によるパスワードハッシュの実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        let params = Params::new(
            65536, // memory (KB) = 64 MB
            1,     // iterations
            1,     // parallelism
            None,  // output length (default: 32)
        )
        .expect("Argon2 パラメータが不正です");

        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, StoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = self
            .argon2
            .hash_password(password.as_str().as_bytes(), &salt)
            .map_err(|e| {
                StoreError::unexpected(format!("パスワードのハッシュ化に失敗しました: {e}"))
            })?;

        Ok(PasswordHash::new(hashed.to_string()))
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, StoreError> {
        let parsed = Argon2PasswordHash::new(hash.as_str())
            .map_err(|e| StoreError::unexpected(format!("不正なハッシュ形式: {e}")))?;

        let matched = self
            .argon2
            .verify_password(password.as_str().as_bytes(), &parsed)
            .is_ok();

        Ok(PasswordVerifyResult::from(matched))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    // password123 を m=65536, t=1, p=1 でハッシュ化した既知の値
    const KNOWN_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M";

    #[rstest]
    fn test_ハッシュ化したパスワードを検証できる() {
        let hasher = Argon2PasswordHasher::new();
        let password = PlainPassword::new("correct-horse-battery").unwrap();

        let hash = hasher.hash(&password).unwrap();
        let result = hasher.verify(&password, &hash).unwrap();

        assert!(result.is_match());
    }

    #[rstest]
    fn test_ハッシュ化のたびにソルトが変わる() {
        let hasher = Argon2PasswordHasher::new();
        let password = PlainPassword::new("correct-horse-battery").unwrap();

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn test_既存のハッシュに対して正しいパスワードを検証できる() {
        let hasher = Argon2PasswordHasher::new();
        let password = PlainPassword::new("password123").unwrap();
        let hash = PasswordHash::new(KNOWN_HASH);

        let result = hasher.verify(&password, &hash).unwrap();

        assert!(result.is_match());
    }

    #[rstest]
    fn test_誤ったパスワードは不一致になる() {
        let hasher = Argon2PasswordHasher::new();
        let password = PlainPassword::new("wrongpassword").unwrap();
        let hash = PasswordHash::new(KNOWN_HASH);

        let result = hasher.verify(&password, &hash).unwrap();

        assert!(result.is_mismatch());
    }

    #[rstest]
    fn test_不正なハッシュ形式はエラー() {
        let hasher = Argon2PasswordHasher::new();
        let password = PlainPassword::new("password123").unwrap();
        let invalid_hash = PasswordHash::new("not-a-valid-hash");

        let result = hasher.verify(&password, &invalid_hash);

        assert!(result.is_err());
    }
}
