//! 香水ユースケース

use std::sync::Arc;

use scentlog_domain::{
    brand::BrandId,
    clock::Clock,
    perfume::{Perfume, PerfumeId},
    value_objects::{PerfumeName, SequenceKind},
};
use scentlog_infra::{
    TransactionManager,
    repository::{BrandRepository, IdSequenceRepository, PerfumeRepository},
};
use scentlog_shared::{event_log::event, log_business_event};

use crate::{
    error::AppError,
    usecase::helpers::{FindResultExt, map_commit_error},
};

/// 香水登録の入力
pub struct CreatePerfumeInput {
    pub brand_id: BrandId,
    pub name: String,
    pub story: String,
}

/// 香水ユースケース
pub struct PerfumeUseCaseImpl {
    perfume_repo: Arc<dyn PerfumeRepository>,
    brand_repo: Arc<dyn BrandRepository>,
    id_sequences: Arc<dyn IdSequenceRepository>,
    clock: Arc<dyn Clock>,
    tx_manager: Arc<dyn TransactionManager>,
}

impl PerfumeUseCaseImpl {
    pub fn new(
        perfume_repo: Arc<dyn PerfumeRepository>,
        brand_repo: Arc<dyn BrandRepository>,
        id_sequences: Arc<dyn IdSequenceRepository>,
        clock: Arc<dyn Clock>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            perfume_repo,
            brand_repo,
            id_sequences,
            clock,
            tx_manager,
        }
    }

    /// 香水を 1 件取得する
    pub async fn get_perfume(&self, id: PerfumeId) -> Result<Perfume, AppError> {
        self.perfume_repo.find_by_id(id).await.or_not_found("香水")
    }

    /// 香水を登録する
    ///
    /// ## 処理フロー
    ///
    /// 1. 所属ブランドの存在確認
    /// 2. 香水名の検証
    /// 3. ID 採番
    /// 4. Perfume ドメインオブジェクト作成
    /// 5. トランザクション内で保存
    pub async fn create_perfume(&self, input: CreatePerfumeInput) -> Result<Perfume, AppError> {
        // 1. 所属ブランドの存在確認
        let brand = self
            .brand_repo
            .find_by_id(input.brand_id)
            .await
            .or_not_found("ブランド")?;

        // 2. 香水名の検証
        let name = PerfumeName::new(input.name)?;

        // 3. ID 採番
        let id = self
            .id_sequences
            .next_id(SequenceKind::Perfume)
            .await
            .map_err(|e| AppError::Internal(format!("採番に失敗: {}", e)))?;

        // 4. Perfume ドメインオブジェクト作成
        let now = self.clock.now();
        let perfume = Perfume::new(PerfumeId::from_db(id), brand.id(), name, input.story, now);

        // 5. トランザクション内で保存
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("トランザクション開始に失敗: {}", e)))?;
        self.perfume_repo
            .insert(&mut tx, &perfume)
            .await
            .map_err(|e| AppError::Internal(format!("香水の保存に失敗: {}", e)))?;
        tx.commit().await.map_err(map_commit_error)?;

        log_business_event!(
            event.category = event::category::CATALOG,
            event.action = event::action::PERFUME_CREATED,
            event.entity_type = event::entity_type::PERFUME,
            event.entity_id = %perfume.id(),
            event.result = event::result::SUCCESS,
            "香水登録"
        );

        Ok(perfume)
    }
}
