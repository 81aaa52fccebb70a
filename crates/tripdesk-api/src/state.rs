//! Shared application state
//!
//! Built once during startup and handed to every handler behind an `Arc`.
//! Nothing here is mutated after construction except through the trip
//! repository's own interior locking.

use std::sync::Arc;
use tripdesk_core::Config;
use tripdesk_storage::ObjectStorage;

use crate::store::TripRepository;

pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn ObjectStorage>,
    pub trips: Arc<dyn TripRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn ObjectStorage>,
        trips: Arc<dyn TripRepository>,
    ) -> Self {
        Self {
            config,
            storage,
            trips,
        }
    }
}
