//! Lazily loaded, shared model resource.
//!
//! Replaces the usual "global flag plus polling loop" pattern with an explicit
//! state machine guarded by a mutex and condition variable.
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use image::RgbImage;
use tracing::{info, warn};

use crate::error::{Error, Result};

use super::{SaliencyMap, Segmenter};

enum LoadState<T> {
    Unloaded,
    Loading,
    Ready(Arc<T>),
    Failed(String),
}

/// Loads a resource at most once and shares it between callers.
///
/// Concurrent callers of [`ensure_loaded`](Self::ensure_loaded) block on a
/// condition variable until the in-flight load settles. A failed load is
/// returned to the caller that performed it; the next call retries from
/// scratch. There is no timeout: a load that never returns blocks its
/// waiters forever.
pub struct ModelCache<T> {
    loader: Box<dyn Fn() -> Result<T> + Send + Sync>,
    state: Mutex<LoadState<T>>,
    settled: Condvar,
}

impl<T: Send + Sync + 'static> ModelCache<T> {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            state: Mutex::new(LoadState::Unloaded),
            settled: Condvar::new(),
        }
    }

    /// Blocking fetch; performs the load if nobody has yet.
    pub fn ensure_loaded(&self) -> Result<Arc<T>> {
        let poisoned = || Error::Processing("model cache lock poisoned".to_string());
        let mut state = self.state.lock().map_err(|_| poisoned())?;
        loop {
            match &*state {
                LoadState::Ready(model) => return Ok(Arc::clone(model)),
                LoadState::Loading => {
                    state = self.settled.wait(state).map_err(|_| poisoned())?;
                }
                LoadState::Unloaded | LoadState::Failed(_) => {
                    *state = LoadState::Loading;
                    drop(state);

                    info!("loading model");
                    let outcome = (self.loader)();

                    state = self.state.lock().map_err(|_| poisoned())?;
                    match outcome {
                        Ok(model) => {
                            let model = Arc::new(model);
                            *state = LoadState::Ready(Arc::clone(&model));
                            self.settled.notify_all();
                            info!("model loaded");
                            return Ok(model);
                        }
                        Err(e) => {
                            *state = LoadState::Failed(e.to_string());
                            self.settled.notify_all();
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    /// Kick off a load on a background thread without blocking the caller.
    pub fn preload(self: &Arc<Self>) {
        let cache = Arc::clone(self);
        thread::spawn(move || {
            if let Err(e) = cache.ensure_loaded() {
                warn!("background model load failed: {e}");
            }
        });
    }

    /// Non-blocking probe; true only once a load has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.state
            .lock()
            .map(|state| matches!(&*state, LoadState::Ready(_)))
            .unwrap_or(false)
    }
}

impl<T: Segmenter + 'static> Segmenter for ModelCache<T> {
    fn saliency_map(&self, image: &RgbImage) -> Result<SaliencyMap> {
        self.ensure_loaded()?.saliency_map(image)
    }
}
