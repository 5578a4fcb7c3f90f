//! Cross-thread plumbing for the view controller
//!
//! The controller lives on a single interaction thread. Work produced
//! elsewhere (feature-info lookups, data loaders) is posted as a closure
//! through a [`DispatchHandle`] and runs the next time the controller drains
//! its [`DispatchQueue`].
//!
//! With the `tokio-runtime` feature, [`TokioFeatureInfo`] adapts an
//! [`AsyncFeatureInfoSource`] onto a tokio runtime.

use crate::{
    core::{geo::Point, view::ViewController, viewport::Viewport},
    layers::feature_info::{FeatureInfoMap, FeatureInfoReply, FeatureInfoSource},
    DataFetchError, MapError, Result,
};
use async_trait::async_trait;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;

/// A unit of work executed on the interaction thread
pub type DispatchTask = Box<dyn FnOnce(&mut ViewController) + Send + 'static>;

/// Single-consumer task queue owned by the view controller
pub struct DispatchQueue {
    tx: Sender<DispatchTask>,
    rx: Receiver<DispatchTask>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn handle(&self) -> DispatchHandle {
        DispatchHandle {
            tx: self.tx.clone(),
        }
    }

    /// Takes every task queued so far without blocking
    pub fn take_pending(&self) -> Vec<DispatchTask> {
        self.rx.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for DispatchQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DispatchQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchQueue")
            .field("pending", &self.rx.len())
            .finish()
    }
}

/// Cloneable, `Send` sender side of a [`DispatchQueue`]
#[derive(Clone)]
pub struct DispatchHandle {
    tx: Sender<DispatchTask>,
}

impl DispatchHandle {
    /// Queues `task`; fails once the owning controller has been dropped
    pub fn post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce(&mut ViewController) + Send + 'static,
    {
        self.tx
            .send(Box::new(task))
            .map_err(|_| MapError::Dispatch("view controller is gone".to_string()))
    }
}

impl std::fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("queued", &self.tx.len())
            .finish()
    }
}

/// Feature-info lookup written as an async function
#[async_trait]
pub trait AsyncFeatureInfoSource: Send + Sync + 'static {
    async fn feature_info(
        &self,
        viewport: Viewport,
        position: Point,
    ) -> std::result::Result<FeatureInfoMap, DataFetchError>;
}

async fn run_lookup<S>(source: Arc<S>, viewport: Viewport, position: Point, reply: FeatureInfoReply)
where
    S: AsyncFeatureInfoSource + ?Sized,
{
    log::trace!("Feature info lookup for {} at {:?}", reply.layer_name(), position);
    match source.feature_info(viewport, position).await {
        Ok(info) => reply.send(info),
        Err(e) => {
            log::debug!("Feature info lookup for {} failed: {}", reply.layer_name(), e);
            reply.fail(e)
        }
    }
}

/// Runs an async source to completion on a dedicated OS thread per request
pub struct ThreadedFeatureInfo<S: ?Sized> {
    source: Arc<S>,
}

impl<S: AsyncFeatureInfoSource> ThreadedFeatureInfo<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

impl<S: AsyncFeatureInfoSource + ?Sized> FeatureInfoSource for ThreadedFeatureInfo<S> {
    fn request_feature_info(&self, viewport: &Viewport, position: Point, reply: FeatureInfoReply) {
        let source = self.source.clone();
        let viewport = *viewport;
        let spawned = std::thread::Builder::new()
            .name("mapview-feature-info".to_string())
            .spawn(move || {
                futures::executor::block_on(run_lookup(source, viewport, position, reply));
            });
        if let Err(e) = spawned {
            log::warn!("Could not start feature info thread: {}", e);
        }
    }
}

#[cfg(feature = "tokio-runtime")]
pub use self::tokio_bridge::{spawn_feature_info, TokioFeatureInfo};

#[cfg(feature = "tokio-runtime")]
mod tokio_bridge {
    use super::*;
    use ::tokio::{runtime::Handle, task::JoinHandle};

    /// Spawns one lookup on `handle`; the result is posted through `reply`
    pub fn spawn_feature_info<S>(
        handle: &Handle,
        source: Arc<S>,
        viewport: Viewport,
        position: Point,
        reply: FeatureInfoReply,
    ) -> JoinHandle<()>
    where
        S: AsyncFeatureInfoSource + ?Sized,
    {
        handle.spawn(run_lookup(source, viewport, position, reply))
    }

    /// Adapts an async source onto a tokio runtime
    pub struct TokioFeatureInfo<S: ?Sized> {
        handle: Handle,
        source: Arc<S>,
    }

    impl<S: AsyncFeatureInfoSource> TokioFeatureInfo<S> {
        pub fn new(handle: Handle, source: S) -> Self {
            Self {
                handle,
                source: Arc::new(source),
            }
        }

        /// Uses the runtime the caller is currently inside of
        pub fn current(source: S) -> Option<Self> {
            Handle::try_current()
                .ok()
                .map(|handle| Self::new(handle, source))
        }
    }

    impl<S: AsyncFeatureInfoSource + ?Sized> FeatureInfoSource for TokioFeatureInfo<S> {
        fn request_feature_info(
            &self,
            viewport: &Viewport,
            position: Point,
            reply: FeatureInfoReply,
        ) {
            // Detached; completion is observed through the dispatch queue.
            let _ = spawn_feature_info(&self.handle, self.source.clone(), *viewport, position, reply);
        }
    }
}
