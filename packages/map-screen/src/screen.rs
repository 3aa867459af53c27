use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{
    config::{ScreenConfig, LOADING_MESSAGE, PERMISSION_DENIED_MESSAGE},
    libraries::{fit_request, normalize_ubicaciones},
    models::{Marker, Region, Ubicacion},
    services::{FetchError, Geolocator, PermissionStatus, UbicacionesClient},
    view::{MapView, ScreenView},
};

/// Permission and first-fix progress for the device location
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PermissionFlow {
    #[default]
    Unrequested,
    Requesting,
    Granted(Region),
    Denied(String),
}

#[derive(Debug, Default)]
struct ScreenState {
    permission: PermissionFlow,
    ubicaciones: Vec<Ubicacion>,
}

struct Shared {
    config: ScreenConfig,
    client: UbicacionesClient,
    geolocator: Arc<dyn Geolocator>,
    map_view: Arc<dyn MapView>,
    mounted: AtomicBool,
    state: Mutex<ScreenState>,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, ScreenState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a state change unless the screen has been torn down.
    /// The mounted flag is only flipped under the same lock.
    fn update<R>(&self, change: impl FnOnce(&mut ScreenState) -> R) -> Option<R> {
        let mut state = self.lock_state();
        if !self.mounted.load(Ordering::Acquire) {
            debug!("Screen unmounted, dropping state update");
            return None;
        }
        Some(change(&mut state))
    }

    /// Fit the viewport if the map is showing and there is something to show
    fn fit_if_ready(&self, state: &ScreenState) {
        if !matches!(state.permission, PermissionFlow::Granted(_)) {
            return;
        }
        if let Some(request) = fit_request(
            &state.ubicaciones,
            self.config.edge_padding,
            self.config.animated_fit,
        ) {
            debug!("Fitting map to {} markers", request.coordinates.len());
            self.map_view.fit_to_coordinates(&request);
        }
    }

    async fn locate_device(self: Arc<Self>) {
        if self
            .update(|state| state.permission = PermissionFlow::Requesting)
            .is_none()
        {
            return;
        }

        let status = self.geolocator.request_foreground_permissions().await;
        if status != PermissionStatus::Granted {
            warn!("Location permission not granted: {:?}", status);
            self.update(|state| {
                state.permission = PermissionFlow::Denied(PERMISSION_DENIED_MESSAGE.to_string())
            });
            return;
        }

        let position = match self.geolocator.current_position().await {
            Ok(position) => position,
            Err(e) => {
                error!("Failed to read current position: {}", e);
                return;
            }
        };

        let region = Region::around(
            position,
            self.config.latitude_delta,
            self.config.longitude_delta,
        );
        info!(
            "Device located at ({}, {})",
            region.latitude, region.longitude
        );

        self.update(|state| {
            state.permission = PermissionFlow::Granted(region);
            self.fit_if_ready(state);
        });
    }

    async fn load_ubicaciones(self: Arc<Self>) {
        let raw = match self.client.fetch_ubicaciones().await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to fetch ubicaciones: {}", e);
                return;
            }
        };

        let received = raw.len();
        let ubicaciones = normalize_ubicaciones(raw);
        debug!(
            "Received {} ubicaciones, {} with usable coordinates",
            received,
            ubicaciones.len()
        );

        self.update(|state| {
            state.ubicaciones = ubicaciones;
            self.fit_if_ready(state);
        });
    }
}

/// Map screen controller.
///
/// `mount` starts the geolocation and fetch tasks side by side; whichever
/// finishes second triggers the viewport fit. `unmount` aborts both and
/// guarantees no later state change.
pub struct MapScreen {
    shared: Arc<Shared>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl MapScreen {
    pub fn new(
        config: ScreenConfig,
        geolocator: Arc<dyn Geolocator>,
        map_view: Arc<dyn MapView>,
    ) -> Result<Self, FetchError> {
        let client = UbicacionesClient::new(config.api_base_url.clone())?;

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                client,
                geolocator,
                map_view,
                mounted: AtomicBool::new(false),
                state: Mutex::new(ScreenState::default()),
            }),
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Start loading. Must be called from within a tokio runtime.
    pub fn mount(&self) {
        if self.shared.mounted.swap(true, Ordering::AcqRel) {
            debug!("Screen already mounted");
            return;
        }

        let locate = tokio::spawn(Arc::clone(&self.shared).locate_device());
        let load = tokio::spawn(Arc::clone(&self.shared).load_ubicaciones());

        self.lock_tasks().extend([locate, load]);
    }

    /// Wait until every task started by `mount` has finished or been aborted
    pub async fn settled(&self) {
        let tasks = std::mem::take(&mut *self.lock_tasks());
        for task in tasks {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!("Map screen task failed: {}", e);
                }
            }
        }
    }

    pub fn unmount(&self) {
        {
            let _state = self.shared.lock_state();
            self.shared.mounted.store(false, Ordering::Release);
        }
        for task in self.lock_tasks().iter() {
            task.abort();
        }
        debug!("Screen unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.load(Ordering::Acquire)
    }

    pub fn permission(&self) -> PermissionFlow {
        self.shared.lock_state().permission.clone()
    }

    /// Locations that survived normalization, in service order
    pub fn ubicaciones(&self) -> Vec<Ubicacion> {
        self.shared.lock_state().ubicaciones.clone()
    }

    pub fn view(&self) -> ScreenView {
        let state = self.shared.lock_state();
        match &state.permission {
            PermissionFlow::Granted(region) => ScreenView::Map {
                region: *region,
                shows_user_location: true,
                markers: state.ubicaciones.iter().map(Marker::from).collect(),
            },
            PermissionFlow::Denied(message) => ScreenView::Status(message.clone()),
            PermissionFlow::Unrequested | PermissionFlow::Requesting => {
                ScreenView::Status(LOADING_MESSAGE.to_string())
            }
        }
    }

    fn lock_tasks(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for MapScreen {
    fn drop(&mut self) {
        if self.is_mounted() {
            self.unmount();
        }
    }
}
