//! # アプリケーション設定
//!
//! 環境変数からページネーションの既定値を読み込む。

use std::env;

use scentlog_shared::{PageLimits, PageSize};

/// アプリケーション層の設定
///
/// すべての項目に既定値があり、環境変数が未設定でも起動できる。
///
/// | 変数名 | 既定値 | 説明 |
/// |--------|--------|------|
/// | `SCENTLOG_DEFAULT_PAGE_SIZE` | `20` | サイズ未指定時の 1 ページ件数 |
/// | `SCENTLOG_MAX_PAGE_SIZE` | `100` | 1 ページ件数の上限（超過分は丸める） |
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// ページサイズの既定値と上限
    pub page_limits: PageLimits,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        let default_size: i64 = env::var("SCENTLOG_DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .expect("SCENTLOG_DEFAULT_PAGE_SIZE は整数である必要があります");
        let max_size: i64 = env::var("SCENTLOG_MAX_PAGE_SIZE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .expect("SCENTLOG_MAX_PAGE_SIZE は整数である必要があります");

        Self {
            page_limits: PageLimits::new(
                PageSize::new(default_size)
                    .expect("SCENTLOG_DEFAULT_PAGE_SIZE は 1 以上である必要があります"),
                PageSize::new(max_size)
                    .expect("SCENTLOG_MAX_PAGE_SIZE は 1 以上である必要があります"),
            ),
        }
    }
}
