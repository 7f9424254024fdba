use std::sync::{Arc, Mutex};

use crate::config::{Config, StorageBackend};
use crate::error::{AppError, StorageError};
use crate::storage::{FileStorage, KeyValueStore, MemoryStorage, PersistenceAdapter};
use crate::tracker::collaborators::{FixedLocation, Geolocator};
use crate::tracker::headless::HeadlessView;
use crate::tracker::session::Session;

#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session<HeadlessView>>>,
    geolocator: Arc<dyn Geolocator>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, StorageError> {
        let backend: Arc<dyn KeyValueStore> = match config.storage {
            StorageBackend::File => Arc::new(FileStorage::open(&config.data_dir)?),
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        };
        let persistence = PersistenceAdapter::new(backend, config.storage_key);
        let geolocator: Arc<dyn Geolocator> = Arc::new(FixedLocation(config.home));

        let mut session = Session::new(HeadlessView::new(), persistence, config.zoom_level);
        session.startup();
        session.position_resolved(geolocator.locate());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            geolocator,
        })
    }

    /// Runs `f` against the session on the blocking pool, since storage
    /// backends may do file I/O.
    pub async fn with_session<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Session<HeadlessView>) -> Result<T, AppError> + Send + 'static,
    {
        let session = self.session.clone();
        tokio::task::spawn_blocking(move || {
            let mut session = session
                .lock()
                .map_err(|_| AppError::Internal("Session lock poisoned".to_string()))?;
            f(&mut *session)
        })
        .await
        .map_err(|err| AppError::Internal(format!("Session task failed: {}", err)))?
    }

    /// Clears stored workouts and replays startup, geolocation included.
    pub async fn reset(&self) -> Result<(), AppError> {
        let geolocator = self.geolocator.clone();
        self.with_session(move |session| {
            session.reset()?;
            session.position_resolved(geolocator.locate());
            Ok(())
        })
        .await
    }
}
