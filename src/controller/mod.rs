use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;
use crate::domain::{CircuitInput, CircuitRecord, Finding, SystemAnalysis};
use crate::repo::{RecordStore, Repositories, StoreError};
use crate::sizing::{simulate_scenarios, ScenarioOutcome, ScenarioVariation, SizingEngine, SizingError};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub controller: Arc<SizingController>,
    pub repos: Arc<Repositories>,
}

impl AppState {
    pub async fn new(cfg: Config) -> Result<Self> {
        let repos = Repositories::new(&cfg.store).await?;
        Self::with_repositories(cfg, repos)
    }

    pub fn with_repositories(cfg: Config, repos: Repositories) -> Result<Self> {
        let engine = SizingEngine::with_limits(cfg.sizing.clone())?;
        let controller = Arc::new(SizingController::new(engine, repos.circuits.clone()));
        Ok(Self {
            cfg,
            controller,
            repos: Arc::new(repos),
        })
    }
}

/// Sizes circuits and keeps the record sequence
///
/// Mutations are serialized so the duplicate-name check, the count that
/// feeds the sequence number and the append happen as one step.
pub struct SizingController {
    engine: SizingEngine,
    store: Arc<dyn RecordStore>,
    write_lock: Mutex<()>,
}

impl SizingController {
    pub fn new(engine: SizingEngine, store: Arc<dyn RecordStore>) -> Self {
        Self {
            engine,
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &SizingEngine {
        &self.engine
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Size a circuit and append it to the store
    pub async fn add_circuit(&self, input: &CircuitInput) -> Result<CircuitRecord> {
        let _guard = self.write_lock.lock().await;

        let name = input.name.trim();
        if self.store.contains_name(name).await? {
            return Err(SizingError::DuplicateName(name.to_string()).into());
        }

        let prior = self.store.count().await?;
        let record = self.engine.compute_sizing(input, prior)?;
        self.store.append(record.clone()).await?;

        info!(
            id = %record.display_id(),
            name = %record.name,
            conductor = %record.phase_conductor,
            breaker_a = record.breaker_a,
            "circuit added"
        );
        Ok(record)
    }

    /// Size a circuit without storing it
    pub async fn preview(&self, input: &CircuitInput) -> Result<CircuitRecord> {
        let prior = self.store.count().await?;
        Ok(self.engine.compute_sizing(input, prior)?)
    }

    pub async fn list(&self) -> Result<Vec<CircuitRecord>> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, position: usize) -> Result<CircuitRecord> {
        self.store
            .get(position)
            .await?
            .ok_or_else(|| StoreError::NotFound(position).into())
    }

    pub async fn remove(&self, position: usize) -> Result<CircuitRecord> {
        let _guard = self.write_lock.lock().await;
        let removed = self.store.remove(position).await?;
        info!(position, id = %removed.display_id(), name = %removed.name, "circuit removed");
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let count = self.store.count().await?;
        self.store.clear().await?;
        info!(removed = count, "all circuits removed");
        Ok(count)
    }

    /// System view over every stored record; `None` when the store is empty
    pub async fn analysis(&self) -> Result<Option<SystemAnalysis>> {
        let records = self.store.list().await?;
        Ok(self.engine.analyze_system(&records))
    }

    pub async fn conformance(&self, position: usize) -> Result<Vec<Finding>> {
        let record = self.get(position).await?;
        Ok(self.engine.check_conformance(&record))
    }

    pub fn check_record(&self, record: &CircuitRecord) -> Vec<Finding> {
        self.engine.check_conformance(record)
    }

    /// Re-size a stored circuit under each variation; nothing is stored
    pub async fn scenarios(
        &self,
        position: usize,
        variations: &[ScenarioVariation],
    ) -> Result<Vec<ScenarioOutcome>> {
        let record = self.get(position).await?;
        let prior = self.store.count().await?;
        Ok(simulate_scenarios(&self.engine, &record.to_input(), variations, prior))
    }
}
