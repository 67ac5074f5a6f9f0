//! # アプリケーション層エラー定義
//!
//! ユースケースで発生するエラーと、下位層エラーからの変換を定義する。
//! 境界（CLI や将来の API ハンドラ）はこの型だけを見てステータスを決める。

use scentlog_domain::DomainError;
use scentlog_infra::StoreError;
use scentlog_shared::CursorError;
use thiserror::Error;

/// アプリケーション層で発生するエラー
#[derive(Debug, Error)]
pub enum AppError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 権限不足
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// 競合（一意性制約・楽観的ロック失敗）
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// 認証失敗
    #[error("認証に失敗しました: {0}")]
    Unauthorized(String),

    /// ストアエラー
    #[error("ストアエラー: {0}")]
    Store(#[from] StoreError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

/// ドメインエラーはバリアントごとに対応するアプリケーションエラーへ写像する
impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        let msg = e.to_string();
        match e {
            DomainError::Validation(_) => AppError::BadRequest(msg),
            DomainError::NotFound { .. } => AppError::NotFound(msg),
            DomainError::Conflict(_) => AppError::Conflict(msg),
            DomainError::Forbidden(_) => AppError::Forbidden(msg),
        }
    }
}

/// カーソルエラーは呼び出し側の入力起因（`BadRequest`）と
/// サーバ側の符号化失敗（`Internal`）に分かれる
impl From<CursorError> for AppError {
    fn from(e: CursorError) -> Self {
        match e {
            CursorError::InvalidPageSize { .. } | CursorError::MalformedCursor { .. } => {
                AppError::BadRequest(e.to_string())
            }
            CursorError::TokenEncode { .. } => AppError::Internal(e.to_string()),
        }
    }
}
