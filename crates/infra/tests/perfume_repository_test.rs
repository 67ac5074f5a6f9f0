//! PerfumeRepository 統合テスト

mod common;

use std::sync::Arc;

use common::create_test_perfume;
use scentlog_domain::perfume::PerfumeId;
use scentlog_infra::{
    repository::{MemoryPerfumeRepository, PerfumeRepository},
    store::{MemoryStore, MemoryTransactionManager, TransactionManager},
};

#[tokio::test]
async fn test_insert_とfind_by_id_で香水を保存取得できる() {
    let store = Arc::new(MemoryStore::new());
    let sut = MemoryPerfumeRepository::new(Arc::clone(&store));
    let tx_manager = MemoryTransactionManager::new(Arc::clone(&store));

    let perfume = create_test_perfume(1, 1);

    let mut tx = tx_manager.begin().await.unwrap();
    sut.insert(&mut tx, &perfume).await.unwrap();
    tx.commit().await.unwrap();

    let found = sut.find_by_id(PerfumeId::from_db(1)).await.unwrap();

    assert_eq!(found, Some(perfume));
}

#[tokio::test]
async fn test_find_by_id_存在しない場合はnoneを返す() {
    let store = Arc::new(MemoryStore::new());
    let sut = MemoryPerfumeRepository::new(Arc::clone(&store));

    let found = sut.find_by_id(PerfumeId::from_db(999)).await.unwrap();

    assert_eq!(found, None);
}
