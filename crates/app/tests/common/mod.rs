//! 結合テスト用の共通ヘルパー
//!
//! 実際の `MemoryStore` を使った本番同等の配線を組み立てる。
//! ユースケース単体のモックテストと違い、トランザクション境界と
//! スナップショット分離を含めた振る舞いを確認できる。

// 各テストファイルが使うヘルパーのサブセットが異なるため
#![allow(dead_code)]

use std::sync::Arc;

use scentlog_app::usecase::{
    MagazineUseCaseImpl, PerfumeUseCaseImpl, ReviewUseCaseImpl, UserUseCaseImpl,
};
use scentlog_domain::{
    brand::{Brand, BrandId},
    clock::{Clock, SystemClock},
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
use scentlog_shared::{PageLimits, PageSize};

/// 本番同等に配線したアプリケーション一式
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub brand_repo: Arc<MemoryBrandRepository>,
    pub id_sequences: Arc<MemoryIdSequenceRepository>,
    pub tx_manager: Arc<MemoryTransactionManager>,
    pub magazines: MagazineUseCaseImpl,
    pub perfumes: PerfumeUseCaseImpl,
    pub reviews: ReviewUseCaseImpl,
    pub users: UserUseCaseImpl,
}

/// 既定のページ制限（既定 20 件、上限 100 件）で配線する
pub fn build_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let brand_repo = Arc::new(MemoryBrandRepository::new(Arc::clone(&store)));
    let magazine_repo: Arc<dyn MagazineRepository> =
        Arc::new(MemoryMagazineRepository::new(Arc::clone(&store)));
    let perfume_repo: Arc<dyn PerfumeRepository> =
        Arc::new(MemoryPerfumeRepository::new(Arc::clone(&store)));
    let review_repo: Arc<dyn ReviewRepository> =
        Arc::new(MemoryReviewRepository::new(Arc::clone(&store)));
    let user_repo: Arc<dyn UserRepository> =
        Arc::new(MemoryUserRepository::new(Arc::clone(&store)));
    let id_sequences = Arc::new(MemoryIdSequenceRepository::new(Arc::clone(&store)));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tx_manager = Arc::new(MemoryTransactionManager::new(Arc::clone(&store)));
    let brand_repo_dyn: Arc<dyn BrandRepository> = brand_repo.clone();
    let id_sequences_dyn: Arc<dyn IdSequenceRepository> = id_sequences.clone();
    let tx_manager_dyn: Arc<dyn TransactionManager> = tx_manager.clone();
    let page_limits = PageLimits::new(PageSize::new(20).unwrap(), PageSize::new(100).unwrap());

    let magazines = MagazineUseCaseImpl::new(
        Arc::clone(&magazine_repo),
        Arc::clone(&brand_repo_dyn),
        Arc::clone(&id_sequences_dyn),
        Arc::clone(&clock),
        Arc::clone(&tx_manager_dyn),
        page_limits,
    );
    let perfumes = PerfumeUseCaseImpl::new(
        Arc::clone(&perfume_repo),
        Arc::clone(&brand_repo_dyn),
        Arc::clone(&id_sequences_dyn),
        Arc::clone(&clock),
        Arc::clone(&tx_manager_dyn),
    );
    let reviews = ReviewUseCaseImpl::new(
        Arc::clone(&review_repo),
        Arc::clone(&perfume_repo),
        Arc::clone(&id_sequences_dyn),
        Arc::clone(&clock),
        Arc::clone(&tx_manager_dyn),
        page_limits,
    );
    let users = UserUseCaseImpl::new(
        Arc::clone(&user_repo),
        Arc::clone(&id_sequences_dyn),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::clone(&clock),
        Arc::clone(&tx_manager_dyn),
    );

    TestApp {
        store,
        brand_repo,
        id_sequences,
        tx_manager,
        magazines,
        perfumes,
        reviews,
        users,
    }
}

/// ブランドを 1 件シードする（ブランド作成ユースケースは持たないため直接挿入）
pub async fn seed_brand(app: &TestApp, name: &str) -> Brand {
    let id = app
        .id_sequences
        .next_id(SequenceKind::Brand)
        .await
        .unwrap();
    let brand = Brand::new(
        BrandId::from_db(id),
        BrandName::new(name).unwrap(),
        "ロンドン発のフレグランスメゾン".to_string(),
        None,
        SystemClock.now(),
    );

    let mut tx = app.tx_manager.begin().await.unwrap();
    app.brand_repo.insert(&mut tx, &brand).await.unwrap();
    tx.commit().await.unwrap();

    brand
}
