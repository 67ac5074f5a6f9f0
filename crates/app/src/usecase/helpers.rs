//! ユースケース層の共通ヘルパー
//!
//! リポジトリ呼び出し結果の変換など、
//! 複数のユースケースで繰り返されるパターンを共通化する。

use scentlog_infra::StoreError;
use scentlog_shared::{CursorPageable, PageLimits, decode_cursor};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// リポジトリの `Result<Option<T>, StoreError>` を `Result<T, AppError>` に変換する
///
/// `find_by_id` 等の `Option` を返すリポジトリメソッドの結果を、
/// `AppError::NotFound` または `AppError::Internal` に変換する。
///
/// ```ignore
/// // Before
/// let brand = self.brand_repo.find_by_id(brand_id).await
///     .map_err(|e| AppError::Internal(format!("ブランドの取得に失敗: {}", e)))?
///     .ok_or_else(|| AppError::NotFound("ブランドが見つかりません".to_string()))?;
///
/// // After
/// let brand = self.brand_repo.find_by_id(brand_id).await
///     .or_not_found("ブランド")?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `AppError::NotFound`、`StoreError` の場合は `AppError::Internal` を返す
    fn or_not_found(self, entity_name: &str) -> Result<T, AppError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, StoreError> {
    fn or_not_found(self, entity_name: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Internal(format!("{}の取得に失敗: {}", entity_name, e)))?
            .ok_or_else(|| AppError::NotFound(format!("{}が見つかりません", entity_name)))
    }
}

/// コミット失敗を分類する
///
/// スナップショット競合はリトライ可能な `Conflict`、それ以外は `Internal`。
pub(crate) fn map_commit_error(e: StoreError) -> AppError {
    if e.is_tx_conflict() {
        AppError::Conflict("他の操作と競合しました。もう一度お試しください".to_string())
    } else {
        AppError::Internal(format!("トランザクションコミットに失敗: {}", e))
    }
}

/// 一覧リクエストの共通入口
///
/// ページサイズを既定値・上限で解決し、カーソルトークンがあれば
/// 並び順キーに復号して 1 ページ分の取得要求にまとめる。
/// サイズ 0 以下と復号できないトークンはどちらも `BadRequest` になる。
pub(crate) fn page_request<K: DeserializeOwned>(
    limits: &PageLimits,
    cursor_token: Option<&str>,
    size: Option<i64>,
) -> Result<CursorPageable<K>, AppError> {
    let size = limits.resolve(size)?;
    let cursor = match cursor_token {
        Some(token) => Some(decode_cursor(token)?),
        None => None,
    };
    Ok(CursorPageable::new(cursor, size))
}
