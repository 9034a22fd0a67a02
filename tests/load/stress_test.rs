use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

use feeder_sizing::controller::SizingController;
use feeder_sizing::domain::{CircuitInput, PhaseValues, PhaseVoltage};
use feeder_sizing::repo::{InMemoryRecordStore, JsonFileRecordStore, RecordStore};
use feeder_sizing::{SizingEngine, SizingError};

fn input(name: String, load_w: f64) -> CircuitInput {
    CircuitInput::new(
        name,
        0.92,
        0.8,
        40.0,
        PhaseValues::new(load_w, load_w, load_w),
        PhaseVoltage::V220,
    )
}

async fn add_concurrently(controller: Arc<SizingController>, clients: usize) {
    let mut tasks = JoinSet::new();
    for i in 0..clients {
        let controller = controller.clone();
        tasks.spawn(async move {
            controller
                .add_circuit(&input(format!("QD {}", i), 1000.0 + i as f64 * 250.0))
                .await
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_get_unique_sequences() {
    let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
    let controller = Arc::new(SizingController::new(SizingEngine::standard(), store));

    add_concurrently(controller.clone(), 64).await;

    let records = controller.list().await.unwrap();
    assert_eq!(records.len(), 64);
    let sequences: HashSet<u32> = records.iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (1..=64).collect());
    for (position, record) in records.iter().enumerate() {
        assert_eq!(record.sequence as usize, position + 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_store_one_record() {
    let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
    let controller = Arc::new(SizingController::new(SizingEngine::standard(), store));

    let mut tasks = JoinSet::new();
    for i in 0..32 {
        let controller = controller.clone();
        let name = if i % 2 == 0 { "QD Bloco A" } else { "qd bloco a " };
        tasks.spawn(async move { controller.add_circuit(&input(name.to_string(), 5000.0)).await });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => created += 1,
            Err(e) => {
                assert!(matches!(
                    e.downcast_ref::<SizingError>(),
                    Some(SizingError::DuplicateName(_))
                ));
                conflicts += 1;
            }
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 31);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_persist_to_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("circuits.json");

    let store: Arc<dyn RecordStore> = Arc::new(JsonFileRecordStore::open(&path).await.unwrap());
    let controller = Arc::new(SizingController::new(SizingEngine::standard(), store));
    add_concurrently(controller, 16).await;

    let reopened = JsonFileRecordStore::open(&path).await.unwrap();
    let records = reopened.list().await.unwrap();
    assert_eq!(records.len(), 16);
    assert_eq!(records.last().unwrap().sequence, 16);
}
