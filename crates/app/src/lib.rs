//! # ScentLog アプリケーション層
//!
//! ユースケース（アプリケーションサービス）を公開する。
//! ドメインの規則とインフラの入出力をここで束ね、境界（CLI や
//! 将来の API ハンドラ）へはこのクレートの型だけを見せる。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・時計・トランザクション管理を
//!   `Arc<dyn Trait>` で外部から注入する
//! - **ユースケース単位の公開**: 呼び出し側はエンティティごとの
//!   `XxxUseCaseImpl` と入力構造体だけを使う
//! - **エラーの集約**: ドメイン・カーソル・ストアの各エラーを
//!   [`AppError`] に写像し、境界での分類（4xx/5xx 相当）を一箇所に集める
//!
//! ## モジュール構成
//!
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - アプリケーション層エラーと各層エラーからの変換
//! - [`usecase`] - ユースケース実装

pub mod config;
pub mod error;
pub mod usecase;

pub use config::AppConfig;
pub use error::AppError;
