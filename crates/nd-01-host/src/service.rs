//! # Host Service
//!
//! Async front of the [`World`]. Transactions are serialized through a
//! single write lock; once a transaction commits, its logs are published to
//! the event bus in emission order, tagged with the transaction id. The lock
//! is held until publishing is done, so the bus sees transactions in commit
//! order. Reverted transactions publish nothing.

use crate::domain::config::{ConfigError, HostConfig};
use crate::domain::receipt::Receipt;
use crate::domain::world::World;
use crate::ports::inbound::HostApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_bus::{ContractEvent, EventPublisher};
use shared_types::{Address, Bytes, Contract, ContractError, Environment, Log, Message, U256};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Host service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Execution limits of the underlying world.
    pub host: HostConfig,
    /// Publish committed logs to the event bus.
    pub publish_events: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: HostConfig::default(),
            publish_events: true,
        }
    }
}

/// Statistics for the host service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Transactions submitted, including deployments.
    pub transactions_submitted: u64,
    /// Transactions that committed.
    pub transactions_committed: u64,
    /// Transactions that reverted.
    pub transactions_reverted: u64,
    /// Contracts deployed.
    pub contracts_deployed: u64,
    /// Logs handed to the event bus.
    pub events_published: u64,
    /// Total execution time in microseconds, saturating.
    pub total_execution_time_us: u64,
    /// Average execution time in microseconds.
    pub avg_execution_time_us: u64,
}

impl ServiceStats {
    fn record(&mut self, committed: bool, elapsed_us: u64) {
        self.transactions_submitted += 1;
        if committed {
            self.transactions_committed += 1;
        } else {
            self.transactions_reverted += 1;
        }
        self.total_execution_time_us = self.total_execution_time_us.saturating_add(elapsed_us);
        self.avg_execution_time_us = self.total_execution_time_us / self.transactions_submitted;
    }
}

/// The host service.
pub struct HostService<P: EventPublisher> {
    config: ServiceConfig,
    world: Arc<RwLock<World>>,
    publisher: Arc<P>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<P: EventPublisher> HostService<P> {
    /// Creates a service over an empty world.
    ///
    /// # Errors
    ///
    /// Returns the validation error of an invalid host configuration.
    pub fn new(publisher: Arc<P>, config: ServiceConfig) -> Result<Self, ConfigError> {
        config.host.validate()?;
        Ok(Self {
            world: Arc::new(RwLock::new(World::new(config.host.clone()))),
            config,
            publisher,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        })
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Runs `f` with exclusive access to the world, e.g. to fund accounts.
    pub async fn with_world<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        let mut world = self.world.write().await;
        f(&mut world)
    }

    /// Deploys a contract and publishes its constructor logs.
    ///
    /// # Errors
    ///
    /// Propagates the constructor's error.
    pub async fn deploy<C, F>(&self, deployer: Address, build: F) -> Result<Receipt, ContractError>
    where
        C: Contract + 'static,
        F: FnOnce(Address, &mut dyn Environment) -> Result<C, ContractError> + Send,
    {
        let tx_id = Uuid::new_v4();
        let start = Instant::now();
        let mut world = self.world.write().await;
        let result = world.deploy(deployer, build);
        self.finish(tx_id, start, &result).await;
        drop(world);

        if let Ok(receipt) = &result {
            self.stats.write().await.contracts_deployed += 1;
            info!(
                %tx_id,
                %deployer,
                address = ?receipt.contract_address,
                "Contract deployed"
            );
        }
        result
    }

    #[instrument(skip(self, msg), fields(sender = %msg.sender, to = %msg.to))]
    async fn execute(&self, tx_id: Uuid, msg: Message) -> Result<Receipt, ContractError> {
        let start = Instant::now();
        let mut world = self.world.write().await;
        let result = world.transact(msg);
        self.finish(tx_id, start, &result).await;
        drop(world);
        result
    }

    /// Records statistics and publishes the logs of a committed transaction.
    /// Called with the world lock held.
    async fn finish(&self, tx_id: Uuid, start: Instant, result: &Result<Receipt, ContractError>) {
        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.write().await.record(result.is_ok(), elapsed_us);

        match result {
            Ok(receipt) => {
                debug!(%tx_id, logs = receipt.logs.len(), "Transaction committed");
                if self.config.publish_events {
                    self.publish(tx_id, &receipt.logs).await;
                }
            }
            Err(err) => {
                warn!(%tx_id, error = %err, kind = ?err.kind(), "Transaction reverted");
            }
        }
    }

    async fn publish(&self, tx_id: Uuid, logs: &[Log]) {
        for (index, log) in logs.iter().enumerate() {
            let event = ContractEvent {
                tx_id,
                log_index: u32::try_from(index).unwrap_or(u32::MAX),
                log: log.clone(),
            };
            self.publisher.publish(event).await;
        }
        self.stats.write().await.events_published += logs.len() as u64;
    }
}

#[async_trait]
impl<P: EventPublisher + 'static> HostApi for HostService<P> {
    async fn submit(&self, msg: Message) -> Result<Receipt, ContractError> {
        let tx_id = Uuid::new_v4();
        self.execute(tx_id, msg).await
    }

    async fn query(&self, msg: Message) -> Result<Bytes, ContractError> {
        self.world.write().await.view_raw(msg)
    }

    async fn balance(&self, address: Address) -> U256 {
        self.world.read().await.balance_of(address)
    }
}

// =============================================================================
// TESTS
// =============================================================================
