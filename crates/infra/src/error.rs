//! # インフラ層エラー定義
//!
//! ストアの読み書きやパスワードハッシュ化で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **ドメインエラーとの分離**: インフラ固有のエラーを明示
//! - **ログ可能性**: Debug によりログ出力時に詳細情報を表示
//! - **SpanTrace 自動捕捉**: convenience constructor でエラー生成時の
//!   呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`StoreError`]: エラー種別（[`StoreErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`StoreErrorKind`]: エラーの具体的な種別（TxConflict, UniqueViolation 等）

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`StoreErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// convenience constructor でエラーを生成すると、その時点のスパン情報が
/// 自動的にキャプチャされる。
///
/// ## パターンマッチ
///
/// エラー種別に応じた処理には [`kind()`](StoreError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     StoreErrorKind::UniqueViolation { entity, key } => { /* 重複処理 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct StoreError {
    kind:       StoreErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
///
/// ストアのコミットや制約検査などで発生するエラーの具体的な種別。
/// アプリケーション層でこのエラー種別に応じて適切なレスポンスに変換する。
#[derive(Debug, Error)]
pub enum StoreErrorKind {
    /// トランザクション競合（スナップショット版数の不一致）
    ///
    /// コミット時に、開始時点から別のトランザクションが先にコミット
    /// していた場合。呼び出し側は再取得してからやり直す必要がある。
    #[error("トランザクションが競合しました: {0}")]
    TxConflict(String),

    /// 一意性制約違反
    ///
    /// 挿入しようとした値が既存データと重複した場合。
    /// ユースケース層で適切なエラーメッセージに変換して返す。
    #[error("一意性制約違反: {entity}({key})")]
    UniqueViolation {
        /// エンティティ名（例: "User"）
        entity: String,
        /// 重複したキーの内容（例: "username=perfume_lover"）
        key:    String,
    },

    /// クライアント入力エラー
    ///
    /// クライアントからの入力が不正な場合に使用する。
    /// インフラ層で検出されるが、原因はクライアント入力にある。
    #[error("入力エラー: {0}")]
    InvalidInput(String),

    /// 予期しないエラー
    ///
    /// ロックの汚染など、上記に分類できない予期しないエラー。
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== StoreError のメソッド =====

impl StoreError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &StoreErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// UniqueViolation バリアントの場合、entity と key を返す
    ///
    /// パターンマッチで所有権の競合を避けるためのヘルパー。
    /// `kind()` で borrow → 別 arm で `self` を move のパターンに対応する。
    pub fn as_unique_violation(&self) -> Option<(&str, &str)> {
        match &self.kind {
            StoreErrorKind::UniqueViolation { entity, key } => Some((entity, key)),
            _ => None,
        }
    }

    /// TxConflict バリアントかどうかを返す
    pub fn is_tx_conflict(&self) -> bool {
        matches!(&self.kind, StoreErrorKind::TxConflict(_))
    }

    // ===== Convenience constructors =====

    /// トランザクション競合エラーを生成する
    pub fn tx_conflict(msg: impl Into<String>) -> Self {
        Self {
            kind:       StoreErrorKind::TxConflict(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 一意性制約違反エラーを生成する
    pub fn unique_violation(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind:       StoreErrorKind::UniqueViolation {
                entity: entity.into(),
                key:    key.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// クライアント入力エラーを生成する
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self {
            kind:       StoreErrorKind::InvalidInput(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       StoreErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}
