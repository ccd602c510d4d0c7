use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

use crate::db::Database;
use crate::generator::WeekGenerator;
use crate::service::WeekService;
use crate::store::SqliteContentStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub generator: WeekGenerator,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Seeds the shared random source from the generator config, or from the
    /// OS when no seed is set
    pub fn new(db: Database, generator: WeekGenerator) -> Self {
        let rng = match generator.config().rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            db,
            generator,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn week_service(&self) -> WeekService<SqliteContentStore> {
        WeekService::new(SqliteContentStore::new(self.db.clone()), self.generator.clone())
    }

    /// Independent generator for one request, split off the shared one
    pub fn fork_rng(&self) -> anyhow::Result<StdRng> {
        let mut shared = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("Random source lock poisoned"))?;
        Ok(StdRng::from_rng(&mut *shared))
    }
}
