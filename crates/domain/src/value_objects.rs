//! # 共通値オブジェクト
//!
//! 複数のエンティティで共有される値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: プリミティブ型をラップし、型安全性を確保
//! - **バリデーション**: 生成時に検証し、不正な値の存在を型レベルで排除
//! - **不変性**: 一度作成したら変更不可
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`UserName`] | `String` | ログイン用ユーザー名 |
//! | [`PersonName`] | `String` | 氏名（PII のため Debug マスク） |
//! | [`BrandName`] | `String` | ブランド名 |
//! | [`MagazineTitle`] | `String` | マガジン記事タイトル |
//! | [`PerfumeName`] | `String` | 香水名 |
//! | [`SequenceKind`] | enum | ID 採番の対象エンティティ種別 |

use strum::IntoStaticStr;

// =========================================================================
// バリデーション付き文字列
// =========================================================================

define_validated_string! {
    /// ログイン用ユーザー名（値オブジェクト）
    ///
    /// アカウントを一意に識別するハンドル。システム全体で一意であることは
    /// ストア側の制約で保証し、ここでは形式だけを検証する。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 30 文字
    pub struct UserName {
        label: "ユーザー名",
        max_length: 30,
    }
}

define_validated_string! {
    /// 氏名（値オブジェクト）
    ///
    /// ユーザーの実名を表現する。
    /// PII（個人識別情報）のため、Debug 出力はマスクされる。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct PersonName {
        label: "氏名",
        max_length: 100,
        pii: true,
    }
}

define_validated_string! {
    /// ブランド名（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct BrandName {
        label: "ブランド名",
        max_length: 100,
    }
}

define_validated_string! {
    /// マガジン記事タイトル（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 200 文字
    pub struct MagazineTitle {
        label: "タイトル",
        max_length: 200,
    }
}

define_validated_string! {
    /// 香水名（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 200 文字
    pub struct PerfumeName {
        label: "香水名",
        max_length: 200,
    }
}

// =========================================================================
// SequenceKind（採番対象エンティティ種別）
// =========================================================================

/// ID 採番の対象エンティティ種別
///
/// 採番リポジトリにどのエンティティの連番を進めるかを指示する。
/// エンティティごとに独立した系列を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SequenceKind {
    /// ブランド
    Brand,
    /// マガジン記事
    Magazine,
    /// 香水
    Perfume,
    /// レビュー
    Review,
    /// ユーザー
    User,
}

// =========================================================================
// テスト
// =========================================================================
