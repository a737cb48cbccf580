//! DispatcherBuilder - registry / queue / pool / ID 生成の組み立て

use std::sync::Arc;

use crate::config::CourierConfig;
use crate::error::CourierError;
use crate::impls::{InMemoryRegistry, SimulatedWork};
use crate::observability::StatusMonitor;
use crate::ports::{IdGenerator, SystemClock, TaskExecutor, TaskRegistry, UlidGenerator};
use crate::queue::BoundedQueue;
use crate::worker::WorkerPool;

use super::Dispatcher;

/// Builds a running [`Dispatcher`].
///
/// ```ignore
/// let dispatcher = DispatcherBuilder::new()
///     .config(CourierConfig::from_env())
///     .build()?;
/// ```
///
/// 未設定のものはデフォルトで埋める:
/// - registry: `InMemoryRegistry`
/// - executor: `config.work_duration` の `SimulatedWork`
/// - id_generator: システム時計の ULID
///
/// `build()` は最初に config を検証する（fail-fast）。ワーカーを spawn するので
/// tokio runtime の中で呼ぶこと。
#[derive(Default)]
pub struct DispatcherBuilder {
    config: CourierConfig,
    registry: Option<Arc<dyn TaskRegistry>>,
    executor: Option<Arc<dyn TaskExecutor>>,
    id_generator: Option<Arc<dyn IdGenerator>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: CourierConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: Arc<dyn TaskRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn executor(mut self, executor: Arc<dyn TaskExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(id_generator);
        self
    }

    pub fn build(self) -> Result<Dispatcher, CourierError> {
        self.config.validate()?;

        let registry: Arc<dyn TaskRegistry> = match self.registry {
            Some(registry) => registry,
            None => Arc::new(InMemoryRegistry::new()),
        };
        let executor: Arc<dyn TaskExecutor> = match self.executor {
            Some(executor) => executor,
            None => Arc::new(SimulatedWork::new(self.config.work_duration)),
        };
        let id_generator: Arc<dyn IdGenerator> = match self.id_generator {
            Some(id_generator) => id_generator,
            None => Arc::new(UlidGenerator::new(SystemClock)),
        };

        let queue = Arc::new(BoundedQueue::new(self.config.queue_capacity)?);
        let pool = WorkerPool::start(
            Arc::clone(&registry),
            queue,
            self.config.worker_count,
            executor,
        )?;
        let monitor = self
            .config
            .monitor_interval
            .map(|interval| StatusMonitor::spawn(Arc::clone(&registry), interval));

        Ok(Dispatcher {
            registry,
            pool,
            id_generator,
            monitor,
        })
    }
}
