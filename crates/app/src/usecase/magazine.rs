//! マガジン記事ユースケース
//!
//! ブランド発のマガジン記事の一覧・取得・作成を担う。
//! 一覧は `(created_at DESC, id DESC)` のカーソルページネーションで、
//! 同時刻の記事が連続しても境界の前後で重複・欠落が起きない。

use std::sync::Arc;

use scentlog_domain::{
    brand::BrandId,
    clock::Clock,
    magazine::{Magazine, MagazineCursor, MagazineId},
    value_objects::{MagazineTitle, SequenceKind},
};
use scentlog_infra::{
    TransactionManager,
    repository::{BrandRepository, IdSequenceRepository, MagazineRepository},
};
use scentlog_shared::{
    CursorPage, PageLimits, PaginatedResponse, event_log::event, log_business_event,
};

use crate::{
    error::AppError,
    usecase::helpers::{FindResultExt, map_commit_error, page_request},
};

/// マガジン記事作成の入力
pub struct CreateMagazineInput {
    pub brand_id: BrandId,
    pub title: String,
    pub contents: String,
}

/// マガジン記事ユースケース
pub struct MagazineUseCaseImpl {
    magazine_repo: Arc<dyn MagazineRepository>,
    brand_repo: Arc<dyn BrandRepository>,
    id_sequences: Arc<dyn IdSequenceRepository>,
    clock: Arc<dyn Clock>,
    tx_manager: Arc<dyn TransactionManager>,
    page_limits: PageLimits,
}

impl MagazineUseCaseImpl {
    pub fn new(
        magazine_repo: Arc<dyn MagazineRepository>,
        brand_repo: Arc<dyn BrandRepository>,
        id_sequences: Arc<dyn IdSequenceRepository>,
        clock: Arc<dyn Clock>,
        tx_manager: Arc<dyn TransactionManager>,
        page_limits: PageLimits,
    ) -> Self {
        Self {
            magazine_repo,
            brand_repo,
            id_sequences,
            clock,
            tx_manager,
            page_limits,
        }
    }

    /// 全ブランド横断の最新記事フィードを 1 ページ取得する
    ///
    /// `cursor_token` が `None` なら先頭ページ。返却された
    /// `next_cursor` をそのまま渡すと続きのページになる。
    pub async fn list_magazines(
        &self,
        cursor_token: Option<String>,
        size: Option<i64>,
    ) -> Result<PaginatedResponse<Magazine>, AppError> {
        // 1. ページ取得要求を解決（サイズ既定値・カーソル復号）
        let pageable =
            page_request::<MagazineCursor>(&self.page_limits, cursor_token.as_deref(), size)?;

        // 2. 並び順どおりに size + 1 件まで取得
        let candidates = self
            .magazine_repo
            .find_page(pageable.cursor().copied(), pageable.fetch_limit())
            .await?;

        // 3. ページを組み立て、次カーソルをトークン化
        let page = CursorPage::from_candidates(candidates, pageable.size());
        Ok(PaginatedResponse::from_page(page)?)
    }

    /// 指定ブランドの記事フィードを 1 ページ取得する
    ///
    /// 存在しない（または論理削除済みの）ブランドは `NotFound`。
    pub async fn list_brand_magazines(
        &self,
        brand_id: BrandId,
        cursor_token: Option<String>,
        size: Option<i64>,
    ) -> Result<PaginatedResponse<Magazine>, AppError> {
        // 1. ブランドの存在確認
        self.brand_repo
            .find_by_id(brand_id)
            .await
            .or_not_found("ブランド")?;

        // 2. ページ取得要求を解決
        let pageable =
            page_request::<MagazineCursor>(&self.page_limits, cursor_token.as_deref(), size)?;

        // 3. 並び順どおりに size + 1 件まで取得
        let candidates = self
            .magazine_repo
            .find_page_by_brand(brand_id, pageable.cursor().copied(), pageable.fetch_limit())
            .await?;

        // 4. ページを組み立て、次カーソルをトークン化
        let page = CursorPage::from_candidates(candidates, pageable.size());
        Ok(PaginatedResponse::from_page(page)?)
    }

    /// マガジン記事を 1 件取得する
    pub async fn get_magazine(&self, id: MagazineId) -> Result<Magazine, AppError> {
        self.magazine_repo
            .find_by_id(id)
            .await
            .or_not_found("マガジン記事")
    }

    /// マガジン記事を作成する
    ///
    /// ## 処理フロー
    ///
    /// 1. 発信元ブランドの存在確認
    /// 2. タイトルの検証
    /// 3. ID 採番
    /// 4. Magazine ドメインオブジェクト作成
    /// 5. トランザクション内で保存
    pub async fn create_magazine(&self, input: CreateMagazineInput) -> Result<Magazine, AppError> {
        // 1. 発信元ブランドの存在確認
        let brand = self
            .brand_repo
            .find_by_id(input.brand_id)
            .await
            .or_not_found("ブランド")?;

        // 2. タイトルの検証
        let title = MagazineTitle::new(input.title)?;

        // 3. ID 採番
        let id = self
            .id_sequences
            .next_id(SequenceKind::Magazine)
            .await
            .map_err(|e| AppError::Internal(format!("採番に失敗: {}", e)))?;

        // 4. Magazine ドメインオブジェクト作成
        let now = self.clock.now();
        let magazine = Magazine::new(
            MagazineId::from_db(id),
            brand.id(),
            title,
            input.contents,
            now,
        );

        // 5. トランザクション内で保存
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("トランザクション開始に失敗: {}", e)))?;
        self.magazine_repo
            .insert(&mut tx, &magazine)
            .await
            .map_err(|e| AppError::Internal(format!("マガジン記事の保存に失敗: {}", e)))?;
        tx.commit().await.map_err(map_commit_error)?;

        log_business_event!(
            event.category = event::category::CATALOG,
            event.action = event::action::MAGAZINE_CREATED,
            event.entity_type = event::entity_type::MAGAZINE,
            event.entity_id = %magazine.id(),
            event.result = event::result::SUCCESS,
            "マガジン記事作成"
        );

        Ok(magazine)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use scentlog_domain::{
        brand::{Brand, BrandId},
        clock::FixedClock,
        magazine::{Magazine, MagazineCursor, MagazineId},
        value_objects::{BrandName, MagazineTitle},
    };
    use scentlog_infra::{
        mock::{
            MockBrandRepository, MockIdSequenceRepository, MockMagazineRepository,
            MockTransactionManager,
        },
        repository::MagazineRepository,
    };
    use scentlog_shared::{PageLimits, PageSize, decode_cursor};

    use super::*;

    fn test_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn test_limits() -> PageLimits {
        PageLimits::new(PageSize::new(20).unwrap(), PageSize::new(100).unwrap())
    }

    fn create_test_brand(id: i64) -> Brand {
        Brand::new(
            BrandId::from_db(id),
            BrandName::new(format!("ブランド{}", id)).unwrap(),
            "ロンドン発のフレグランスメゾン".to_string(),
            None,
            test_now(),
        )
    }

    fn create_test_magazine(id: i64, brand_id: i64, minutes: i64) -> Magazine {
        Magazine::new(
            MagazineId::from_db(id),
            BrandId::from_db(brand_id),
            MagazineTitle::new(format!("新作コレクション Vol.{}", id)).unwrap(),
            "今季の新作を紹介します。".to_string(),
            test_now() + Duration::minutes(minutes),
        )
    }

    fn build_sut(
        magazine_repo: MockMagazineRepository,
        brand_repo: MockBrandRepository,
    ) -> MagazineUseCaseImpl {
        MagazineUseCaseImpl::new(
            Arc::new(magazine_repo),
            Arc::new(brand_repo),
            Arc::new(MockIdSequenceRepository::new()),
            Arc::new(FixedClock::new(test_now())),
            Arc::new(MockTransactionManager),
            test_limits(),
        )
    }

    #[tokio::test]
    async fn test_create_magazine_正常系() {
        // Arrange
        let magazine_repo = MockMagazineRepository::new();
        let brand_repo = MockBrandRepository::new();
        brand_repo.add_brand(create_test_brand(1));
        let sut = build_sut(magazine_repo.clone(), brand_repo);

        let input = CreateMagazineInput {
            brand_id: BrandId::from_db(1),
            title: "春の新作コレクション".to_string(),
            contents: "フローラルノートを中心に紹介します。".to_string(),
        };

        // Act
        let result = sut.create_magazine(input).await.unwrap();

        // Assert: 採番された ID で期待値を組み立てる
        let expected = Magazine::new(
            result.id(),
            BrandId::from_db(1),
            MagazineTitle::new("春の新作コレクション").unwrap(),
            "フローラルノートを中心に紹介します。".to_string(),
            test_now(),
        );
        assert_eq!(result, expected);

        // リポジトリに保存されていることを確認
        let saved = magazine_repo.find_by_id(result.id()).await.unwrap();
        assert_eq!(saved, Some(expected));
    }

    #[tokio::test]
    async fn test_create_magazine_ブランドが見つからない() {
        let sut = build_sut(MockMagazineRepository::new(), MockBrandRepository::new());

        let input = CreateMagazineInput {
            brand_id: BrandId::from_db(99),
            title: "春の新作コレクション".to_string(),
            contents: String::new(),
        };

        let err = sut.create_magazine(input).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_magazine_論理削除済みブランドは対象外() {
        let brand_repo = MockBrandRepository::new();
        brand_repo.add_brand(create_test_brand(1).deleted(test_now()));
        let sut = build_sut(MockMagazineRepository::new(), brand_repo);

        let input = CreateMagazineInput {
            brand_id: BrandId::from_db(1),
            title: "春の新作コレクション".to_string(),
            contents: String::new(),
        };

        let err = sut.create_magazine(input).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_magazine_空のタイトルはbad_request() {
        let brand_repo = MockBrandRepository::new();
        brand_repo.add_brand(create_test_brand(1));
        let sut = build_sut(MockMagazineRepository::new(), brand_repo);

        let input = CreateMagazineInput {
            brand_id: BrandId::from_db(1),
            title: "   ".to_string(),
            contents: String::new(),
        };

        let err = sut.create_magazine(input).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_list_magazines_先頭ページは最新順で次カーソル付き() {
        // Arrange: 作成時刻をずらした 3 件（新しい順 = 3, 2, 1）
        let magazine_repo = MockMagazineRepository::new();
        for id in 1..=3 {
            magazine_repo.add_magazine(create_test_magazine(id, 1, id * 10));
        }
        let sut = build_sut(magazine_repo, MockBrandRepository::new());

        // Act
        let response = sut.list_magazines(None, Some(2)).await.unwrap();

        // Assert: 先頭 2 件と、返却末尾（id=2）を指すトークン
        let ids: Vec<i64> = response.data.iter().map(|m| m.id().as_i64()).collect();
        assert_eq!(ids, vec![3, 2]);
        assert!(response.has_next);
        let bound: MagazineCursor =
            decode_cursor(response.next_cursor.as_deref().unwrap()).unwrap();
        assert_eq!(bound.id, MagazineId::from_db(2));
    }

    #[tokio::test]
    async fn test_list_magazines_カーソルの続きから最終ページまで辿れる() {
        let magazine_repo = MockMagazineRepository::new();
        for id in 1..=3 {
            magazine_repo.add_magazine(create_test_magazine(id, 1, id * 10));
        }
        let sut = build_sut(magazine_repo, MockBrandRepository::new());

        let first = sut.list_magazines(None, Some(2)).await.unwrap();
        let second = sut.list_magazines(first.next_cursor, Some(2)).await.unwrap();

        let ids: Vec<i64> = second.data.iter().map(|m| m.id().as_i64()).collect();
        assert_eq!(ids, vec![1]);
        assert!(!second.has_next);
        assert_eq!(second.next_cursor, None);
    }

    #[tokio::test]
    async fn test_list_magazines_不正なカーソルはbad_request() {
        let sut = build_sut(MockMagazineRepository::new(), MockBrandRepository::new());

        let err = sut
            .list_magazines(Some("!!!not-a-cursor!!!".to_string()), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_list_magazines_サイズ0はbad_request() {
        let sut = build_sut(MockMagazineRepository::new(), MockBrandRepository::new());

        let err = sut.list_magazines(None, Some(0)).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_list_brand_magazines_他ブランドの記事は含まれない() {
        // Arrange: ブランド 1 に 2 件、ブランド 2 に 1 件
        let magazine_repo = MockMagazineRepository::new();
        magazine_repo.add_magazine(create_test_magazine(1, 1, 10));
        magazine_repo.add_magazine(create_test_magazine(2, 2, 20));
        magazine_repo.add_magazine(create_test_magazine(3, 1, 30));
        let brand_repo = MockBrandRepository::new();
        brand_repo.add_brand(create_test_brand(1));
        let sut = build_sut(magazine_repo, brand_repo);

        // Act
        let response = sut
            .list_brand_magazines(BrandId::from_db(1), None, None)
            .await
            .unwrap();

        // Assert
        let ids: Vec<i64> = response.data.iter().map(|m| m.id().as_i64()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(!response.has_next);
    }

    #[tokio::test]
    async fn test_list_brand_magazines_ブランドが見つからない() {
        let sut = build_sut(MockMagazineRepository::new(), MockBrandRepository::new());

        let err = sut
            .list_brand_magazines(BrandId::from_db(99), None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_magazine_正常系() {
        let magazine_repo = MockMagazineRepository::new();
        let magazine = create_test_magazine(1, 1, 0);
        magazine_repo.add_magazine(magazine.clone());
        let sut = build_sut(magazine_repo, MockBrandRepository::new());

        let result = sut.get_magazine(MagazineId::from_db(1)).await.unwrap();

        assert_eq!(result, magazine);
    }

    #[tokio::test]
    async fn test_get_magazine_見つからない() {
        let sut = build_sut(MockMagazineRepository::new(), MockBrandRepository::new());

        let err = sut.get_magazine(MagazineId::from_db(99)).await.unwrap_err();

        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "マガジン記事が見つかりません"),
            other => panic!("NotFound を期待したが {:?} を受信", other),
        }
    }
}
