//! レビューユースケース
//!
//! 香水レビューの一覧・作成・削除を担う。
//! 一覧は `id DESC`（投稿の新しい順）のカーソルページネーション。
//! 削除は投稿者本人だけが実行でき、行ごと取り除く。

use std::sync::Arc;

use scentlog_domain::{
    clock::Clock,
    perfume::PerfumeId,
    review::{NewReview, Review, ReviewDuration, ReviewId, Season, Strength, TagId},
    user::UserId,
    value_objects::SequenceKind,
};
use scentlog_infra::{
    TransactionManager,
    repository::{IdSequenceRepository, PerfumeRepository, ReviewRepository},
};
use scentlog_shared::{
    CursorPage, PageLimits, PaginatedResponse, event_log::event, log_business_event,
};

use crate::{
    error::AppError,
    usecase::helpers::{FindResultExt, map_commit_error, page_request},
};

/// レビュー作成の入力
pub struct CreateReviewInput {
    pub perfume_id: PerfumeId,
    pub user_id: UserId,
    /// 香りの印象（空文字列でもよい）
    pub feeling: String,
    /// 使うシチュエーション（空文字列でもよい）
    pub situation: String,
    pub strength: Strength,
    /// 持続時間（分）
    pub duration_minutes: i64,
    pub season: Season,
    pub tags: Vec<i64>,
}

/// レビューユースケース
pub struct ReviewUseCaseImpl {
    review_repo: Arc<dyn ReviewRepository>,
    perfume_repo: Arc<dyn PerfumeRepository>,
    id_sequences: Arc<dyn IdSequenceRepository>,
    clock: Arc<dyn Clock>,
    tx_manager: Arc<dyn TransactionManager>,
    page_limits: PageLimits,
}

impl ReviewUseCaseImpl {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        perfume_repo: Arc<dyn PerfumeRepository>,
        id_sequences: Arc<dyn IdSequenceRepository>,
        clock: Arc<dyn Clock>,
        tx_manager: Arc<dyn TransactionManager>,
        page_limits: PageLimits,
    ) -> Self {
        Self {
            review_repo,
            perfume_repo,
            id_sequences,
            clock,
            tx_manager,
            page_limits,
        }
    }

    /// 指定香水のレビューを投稿の新しい順に 1 ページ取得する
    pub async fn list_perfume_reviews(
        &self,
        perfume_id: PerfumeId,
        cursor_token: Option<String>,
        size: Option<i64>,
    ) -> Result<PaginatedResponse<Review>, AppError> {
        // 1. 香水の存在確認
        self.perfume_repo
            .find_by_id(perfume_id)
            .await
            .or_not_found("香水")?;

        // 2. ページ取得要求を解決
        let pageable = page_request::<ReviewId>(&self.page_limits, cursor_token.as_deref(), size)?;

        // 3. 並び順どおりに size + 1 件まで取得
        let candidates = self
            .review_repo
            .find_page_by_perfume(perfume_id, pageable.cursor().copied(), pageable.fetch_limit())
            .await?;

        // 4. ページを組み立て、次カーソルをトークン化
        let page = CursorPage::from_candidates(candidates, pageable.size());
        Ok(PaginatedResponse::from_page(page)?)
    }

    /// レビューを投稿する
    ///
    /// ## 処理フロー
    ///
    /// 1. 対象香水の存在確認
    /// 2. 評価値の検証（持続時間・タグ ID）
    /// 3. ID 採番
    /// 4. Review ドメインオブジェクト作成
    /// 5. トランザクション内で保存
    pub async fn create_review(&self, input: CreateReviewInput) -> Result<Review, AppError> {
        // 1. 対象香水の存在確認
        let perfume = self
            .perfume_repo
            .find_by_id(input.perfume_id)
            .await
            .or_not_found("香水")?;

        // 2. 評価値の検証
        let duration = ReviewDuration::new(input.duration_minutes)?;
        let tags = input
            .tags
            .into_iter()
            .map(TagId::new)
            .collect::<Result<Vec<_>, _>>()?;

        // 3. ID 採番
        let id = self
            .id_sequences
            .next_id(SequenceKind::Review)
            .await
            .map_err(|e| AppError::Internal(format!("採番に失敗: {}", e)))?;

        // 4. Review ドメインオブジェクト作成
        let now = self.clock.now();
        let review = Review::new(NewReview {
            id: ReviewId::from_db(id),
            perfume_id: perfume.id(),
            user_id: input.user_id,
            feeling: input.feeling,
            situation: input.situation,
            strength: input.strength,
            duration,
            season: input.season,
            tags,
            now,
        });

        // 5. トランザクション内で保存
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("トランザクション開始に失敗: {}", e)))?;
        self.review_repo
            .insert(&mut tx, &review)
            .await
            .map_err(|e| AppError::Internal(format!("レビューの保存に失敗: {}", e)))?;
        tx.commit().await.map_err(map_commit_error)?;

        log_business_event!(
            event.category = event::category::COMMUNITY,
            event.action = event::action::REVIEW_CREATED,
            event.entity_type = event::entity_type::REVIEW,
            event.entity_id = %review.id(),
            event.actor_id = %review.user_id(),
            event.result = event::result::SUCCESS,
            "レビュー投稿"
        );

        Ok(review)
    }

    /// レビューを削除する
    ///
    /// 投稿者本人以外の削除要求は `Forbidden`。
    ///
    /// ## 処理フロー
    ///
    /// 1. レビューの存在確認
    /// 2. 投稿者本人かの確認
    /// 3. トランザクション内で削除
    pub async fn delete_review(
        &self,
        review_id: ReviewId,
        requester: UserId,
    ) -> Result<(), AppError> {
        // 1. レビューの存在確認
        let review = self
            .review_repo
            .find_by_id(review_id)
            .await
            .or_not_found("レビュー")?;

        // 2. 投稿者本人かの確認
        if !review.is_authored_by(requester) {
            return Err(AppError::Forbidden(
                "このレビューを削除する権限がありません".to_string(),
            ));
        }

        // 3. トランザクション内で削除
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("トランザクション開始に失敗: {}", e)))?;
        self.review_repo
            .delete(&mut tx, review_id)
            .await
            .map_err(|e| AppError::Internal(format!("レビューの削除に失敗: {}", e)))?;
        tx.commit().await.map_err(map_commit_error)?;

        log_business_event!(
            event.category = event::category::COMMUNITY,
            event.action = event::action::REVIEW_DELETED,
            event.entity_type = event::entity_type::REVIEW,
            event.entity_id = %review_id,
            event.actor_id = %requester,
            event.result = event::result::SUCCESS,
            "レビュー削除"
        );

        Ok(())
    }
}
