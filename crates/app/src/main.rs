//! # ScentLog コアランナー
//!
//! インメモリストアでコア一式を組み立て、代表的な業務フローを
//! 一通り実行するエントリーポイント。API 層を持たない段階での
//! 動作確認と、ログ出力の目視確認に使う。
//!
//! ## 実行内容
//!
//! 1. ブランドを 1 件シード
//! 2. 会員登録とログイン
//! 3. 香水の登録とレビュー投稿
//! 4. マガジン記事を複数作成し、カーソルでフィードを最後まで辿る
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,scentlog=debug`） |
//! | `SCENTLOG_DEFAULT_PAGE_SIZE` | No | サイズ未指定時の 1 ページ件数（デフォルト: 20） |
//! | `SCENTLOG_MAX_PAGE_SIZE` | No | 1 ページ件数の上限（デフォルト: 100） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p scentlog-app
//!
//! # JSON ログで業務イベントを確認する場合
//! LOG_FORMAT=json cargo run -p scentlog-app | jq 'select(.["event.kind"] == "business_event")'
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use scentlog_app::{
    AppConfig,
    usecase::{
        CreateMagazineInput, CreatePerfumeInput, CreateReviewInput, MagazineUseCaseImpl,
        PerfumeUseCaseImpl, RegisterGeneralUserInput, ReviewUseCaseImpl, UserUseCaseImpl,
    },
};
use scentlog_domain::{
    brand::{Brand, BrandId},
    clock::{Clock, SystemClock},
    magazine::Magazine,
    review::{Season, Strength},
    value_objects::{BrandName, SequenceKind},
};
use scentlog_infra::{
    Argon2PasswordHasher, MemoryStore, MemoryTransactionManager, TransactionManager,
    repository::{
        BrandRepository, IdSequenceRepository, MagazineRepository, MemoryBrandRepository,
        MemoryIdSequenceRepository, MemoryMagazineRepository, MemoryPerfumeRepository,
        MemoryReviewRepository, MemoryUserRepository, PerfumeRepository, ReviewRepository,
        UserRepository,
    },
};
use scentlog_shared::{
    PaginatedResponse,
    observability::{TracingConfig, init_tracing},
};
use serde::Serialize;

/// フィード出力用の表示形
///
/// ドメインの型を JSON にそのまま晒さず、境界で必要な項目だけ写す。
#[derive(Serialize)]
struct MagazineSummary {
    id: i64,
    brand_id: i64,
    title: String,
    created_at: DateTime<Utc>,
}

impl From<Magazine> for MagazineSummary {
    fn from(m: Magazine) -> Self {
        Self {
            id: m.id().as_i64(),
            brand_id: m.brand_id().as_i64(),
            title: m.title().as_str().to_string(),
            created_at: m.created_at(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("scentlog-app"));

    // 設定読み込み
    let config = AppConfig::from_env();
    tracing::info!("ScentLog コアを起動します");

    // 依存コンポーネントを初期化
    let store = Arc::new(MemoryStore::new());
    let brand_repo: Arc<dyn BrandRepository> =
        Arc::new(MemoryBrandRepository::new(Arc::clone(&store)));
    let magazine_repo: Arc<dyn MagazineRepository> =
        Arc::new(MemoryMagazineRepository::new(Arc::clone(&store)));
    let perfume_repo: Arc<dyn PerfumeRepository> =
        Arc::new(MemoryPerfumeRepository::new(Arc::clone(&store)));
    let review_repo: Arc<dyn ReviewRepository> =
        Arc::new(MemoryReviewRepository::new(Arc::clone(&store)));
    let user_repo: Arc<dyn UserRepository> =
        Arc::new(MemoryUserRepository::new(Arc::clone(&store)));
    let id_sequences: Arc<dyn IdSequenceRepository> =
        Arc::new(MemoryIdSequenceRepository::new(Arc::clone(&store)));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tx_manager: Arc<dyn TransactionManager> =
        Arc::new(MemoryTransactionManager::new(Arc::clone(&store)));
    tracing::info!("インメモリストアを初期化しました");

    let magazine_usecase = MagazineUseCaseImpl::new(
        Arc::clone(&magazine_repo),
        Arc::clone(&brand_repo),
        Arc::clone(&id_sequences),
        Arc::clone(&clock),
        Arc::clone(&tx_manager),
        config.page_limits,
    );
    let perfume_usecase = PerfumeUseCaseImpl::new(
        Arc::clone(&perfume_repo),
        Arc::clone(&brand_repo),
        Arc::clone(&id_sequences),
        Arc::clone(&clock),
        Arc::clone(&tx_manager),
    );
    let review_usecase = ReviewUseCaseImpl::new(
        Arc::clone(&review_repo),
        Arc::clone(&perfume_repo),
        Arc::clone(&id_sequences),
        Arc::clone(&clock),
        Arc::clone(&tx_manager),
        config.page_limits,
    );
    let user_usecase = UserUseCaseImpl::new(
        Arc::clone(&user_repo),
        Arc::clone(&id_sequences),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::clone(&clock),
        Arc::clone(&tx_manager),
    );

    // ブランドをシード（ブランド管理は当面この経路のみ）
    let brand_id = BrandId::from_db(id_sequences.next_id(SequenceKind::Brand).await?);
    let brand = Brand::new(
        brand_id,
        BrandName::new("メゾン ルミエール")?,
        "パリ 6 区の小さな工房から始まったメゾン。".to_string(),
        None,
        clock.now(),
    );
    let mut tx = tx_manager.begin().await?;
    brand_repo.insert(&mut tx, &brand).await?;
    tx.commit().await?;
    tracing::info!(brand_id = %brand.id(), "ブランドをシードしました");

    // 会員登録とログイン
    let user = user_usecase
        .register_general_user(RegisterGeneralUserInput {
            username: "hanako".to_string(),
            email: "hanako@example.com".to_string(),
            password: "jasmine-and-rain".to_string(),
            name: "山田 花子".to_string(),
            marketing_consent: true,
            promotion_consent: false,
        })
        .await?;
    let user = user_usecase
        .authenticate(user.username().as_str(), "jasmine-and-rain")
        .await?;
    tracing::info!(user_id = %user.id(), "ログインしました");

    // 香水の登録とレビュー投稿
    let perfume = perfume_usecase
        .create_perfume(CreatePerfumeInput {
            brand_id: brand.id(),
            name: "オードパルファム リュミエール".to_string(),
            story: "朝焼けの光をイメージしたシトラスフローラル。".to_string(),
        })
        .await?;
    review_usecase
        .create_review(CreateReviewInput {
            perfume_id: perfume.id(),
            user_id: user.id(),
            feeling: "石鹸のような清潔感".to_string(),
            situation: "出勤前に一吹き".to_string(),
            strength: Strength::Moderate,
            duration_minutes: 240,
            season: Season::Spring,
            tags: vec![1, 2],
        })
        .await?;

    // マガジン記事を作成
    for vol in 1..=8 {
        magazine_usecase
            .create_magazine(CreateMagazineInput {
                brand_id: brand.id(),
                title: format!("香りの手帖 Vol.{}", vol),
                contents: format!("第 {} 号。調香師の仕事場から。", vol),
            })
            .await?;
    }

    // フィードをカーソルで最後まで辿る
    let mut cursor: Option<String> = None;
    let mut page_no = 1;
    loop {
        let page = magazine_usecase
            .list_magazines(cursor.clone(), Some(3))
            .await?;
        let has_next = page.has_next;
        cursor = page.next_cursor.clone();

        let rendered = PaginatedResponse {
            data: page
                .data
                .into_iter()
                .map(MagazineSummary::from)
                .collect::<Vec<_>>(),
            next_cursor: page.next_cursor,
            has_next: page.has_next,
        };
        println!("--- フィード {} ページ目 ---", page_no);
        println!("{}", serde_json::to_string_pretty(&rendered)?);

        if !has_next {
            break;
        }
        page_no += 1;
    }

    let reviews = review_usecase
        .list_perfume_reviews(perfume.id(), None, None)
        .await?;
    tracing::info!(
        count = reviews.data.len(),
        has_next = reviews.has_next,
        "レビュー一覧を取得しました"
    );

    tracing::info!("全フローが完了しました");
    Ok(())
}
