//! # World
//!
//! The in-process host the contracts run against: balances, nonces,
//! deployed contracts, and the transaction engine.
//!
//! ## Transaction model
//!
//! Every entry point (`transact`, `deploy`, `view`) runs as one atomic unit.
//! Before it starts the world takes a checkpoint of every contract's storage
//! and of all balances and nonces; if any frame inside the unit fails, the
//! checkpoint is restored and the buffered logs are dropped. A failed nested
//! call poisons the whole unit even if the calling contract swallows the
//! error, so no partial commit is ever observable.
//!
//! ## Frames
//!
//! While a contract executes it is taken out of the contract table and its
//! address is pushed onto the call stack. A nested call back into any
//! address on the stack is rejected as re-entrancy; contracts that need to
//! reach a caller further up check `Environment::is_executing` and hand the
//! work back through their return value instead.

use super::config::HostConfig;
use super::invariants::{
    check_call_depth_invariant, check_log_limit_invariant, check_value_conservation,
};
use super::receipt::Receipt;
use shared_types::{
    compute_contract_address, Address, Bytes, Contract, ContractCall, ContractError,
    Environment, Log, Message, U256,
};
use std::collections::HashMap;
use std::mem;
use tracing::{debug, warn};

/// State captured at the start of a transaction.
struct Checkpoint {
    contracts: HashMap<Address, Box<dyn Contract>>,
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
}

/// The host environment.
pub struct World {
    config: HostConfig,
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    contracts: HashMap<Address, Box<dyn Contract>>,
    /// Addresses of the frames currently executing, outermost first.
    call_stack: Vec<Address>,
    /// Logs buffered for the running transaction.
    logs: Vec<Log>,
    /// First failure observed in the running transaction.
    failure: Option<ContractError>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            balances: HashMap::new(),
            nonces: HashMap::new(),
            contracts: HashMap::new(),
            call_stack: Vec::new(),
            logs: Vec::new(),
            failure: None,
        }
    }

    /// Host configuration.
    #[must_use]
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    // =========================================================================
    // ACCOUNTS
    // =========================================================================

    /// Credits `amount` to `address` outside of any transaction.
    ///
    /// This is the only way value enters the world.
    pub fn fund(&mut self, address: Address, amount: U256) {
        let balance = self.balances.entry(address).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Balance of `address`.
    #[must_use]
    pub fn balance_of(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    /// Number of contracts `address` has deployed.
    #[must_use]
    pub fn nonce(&self, address: Address) -> u64 {
        self.nonces.get(&address).copied().unwrap_or_default()
    }

    /// True if a contract is deployed at `address`.
    #[must_use]
    pub fn is_contract(&self, address: Address) -> bool {
        self.contracts.contains_key(&address) || self.call_stack.contains(&address)
    }

    /// Number of deployed contracts.
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }

    /// Sum of every balance in the world.
    #[must_use]
    pub fn total_value(&self) -> U256 {
        self.balances
            .values()
            .fold(U256::zero(), |acc, balance| acc.saturating_add(*balance))
    }

    // =========================================================================
    // ENTRY POINTS
    // =========================================================================

    /// Deploys a contract built by `build`.
    ///
    /// The new address is derived from `deployer` and its nonce. `build`
    /// runs as the constructor: it may emit logs and call other contracts
    /// with the new address as sender. A failing constructor leaves no trace.
    ///
    /// # Errors
    ///
    /// Propagates the constructor's error.
    pub fn deploy<C, F>(&mut self, deployer: Address, build: F) -> Result<Receipt, ContractError>
    where
        C: Contract + 'static,
        F: FnOnce(Address, &mut dyn Environment) -> Result<C, ContractError>,
    {
        let nonce = self.nonce(deployer);
        let address = compute_contract_address(deployer, nonce);

        let (_, logs) = self.run_transaction(|world| {
            world.nonces.insert(deployer, nonce + 1);
            if world.is_contract(address) {
                return Err(ContractError::Revert(format!(
                    "contract already deployed at {address:?}"
                )));
            }
            world.call_stack.push(address);
            let built = build(address, &mut *world);
            world.call_stack.pop();
            world.contracts.insert(address, Box::new(built?));
            Ok(())
        })?;

        debug!(%deployer, %address, nonce, "Contract deployed");
        Ok(Receipt {
            output: Bytes::new(),
            logs,
            contract_address: Some(address),
        })
    }

    /// Executes a transaction submitted by an external account.
    ///
    /// # Errors
    ///
    /// Returns the abort reason; all effects are rolled back.
    pub fn transact(&mut self, msg: Message) -> Result<Receipt, ContractError> {
        let (output, logs) = self.run_transaction(|world| world.execute(msg))?;
        Ok(Receipt {
            output,
            logs,
            contract_address: None,
        })
    }

    /// Executes a typed call as a transaction.
    ///
    /// # Errors
    ///
    /// Returns the abort reason; all effects are rolled back.
    pub fn send<C: ContractCall>(
        &mut self,
        sender: Address,
        to: Address,
        call: &C,
    ) -> Result<Receipt, ContractError> {
        self.transact(Message::new(sender, to, call.encode()?))
    }

    /// Executes a typed call with value attached as a transaction.
    ///
    /// # Errors
    ///
    /// Returns the abort reason; all effects are rolled back.
    pub fn send_with_value<C: ContractCall>(
        &mut self,
        sender: Address,
        to: Address,
        value: U256,
        call: &C,
    ) -> Result<Receipt, ContractError> {
        self.transact(Message::new(sender, to, call.encode()?).with_value(value))
    }

    /// Executes `msg` and discards every effect, returning the output.
    ///
    /// # Errors
    ///
    /// Returns the abort reason of the call.
    pub fn view_raw(&mut self, msg: Message) -> Result<Bytes, ContractError> {
        let checkpoint = self.checkpoint();
        let result = self.run_transaction(|world| world.execute(msg));
        self.restore(checkpoint);
        result.map(|(output, _)| output)
    }

    /// Executes a typed read-only call.
    ///
    /// # Errors
    ///
    /// Returns the abort reason of the call or a decoding failure.
    pub fn view<C: ContractCall>(
        &mut self,
        sender: Address,
        to: Address,
        call: &C,
    ) -> Result<C::Output, ContractError> {
        let output = self.view_raw(Message::new(sender, to, call.encode()?))?;
        C::decode_output(output.as_slice())
    }

    // =========================================================================
    // TRANSACTION ENGINE
    // =========================================================================

    fn run_transaction<T, F>(&mut self, body: F) -> Result<(T, Vec<Log>), ContractError>
    where
        F: FnOnce(&mut Self) -> Result<T, ContractError>,
    {
        let checkpoint = self.checkpoint();
        let value_before = self.total_value();
        self.logs.clear();
        self.failure = None;

        let outcome = body(self);
        let poisoned = self.failure.take();
        let outcome = match (outcome, poisoned) {
            (Ok(_), Some(err)) | (Err(err), _) => Err(err),
            (Ok(value), None) => {
                if let Err(violation) = check_value_conservation(value_before, self.total_value())
                {
                    Err(ContractError::Revert(violation.to_string()))
                } else {
                    Ok(value)
                }
            }
        };

        match outcome {
            Ok(value) => Ok((value, mem::take(&mut self.logs))),
            Err(err) => {
                warn!(error = %err, "Transaction reverted");
                self.restore(checkpoint);
                self.logs.clear();
                self.call_stack.clear();
                Err(err)
            }
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            contracts: self
                .contracts
                .iter()
                .map(|(address, contract)| (*address, contract.snapshot()))
                .collect(),
            balances: self.balances.clone(),
            nonces: self.nonces.clone(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.contracts = checkpoint.contracts;
        self.balances = checkpoint.balances;
        self.nonces = checkpoint.nonces;
    }

    /// Runs one call frame.
    fn execute(&mut self, msg: Message) -> Result<Bytes, ContractError> {
        let depth = self.call_stack.len();
        if let Err(violation) = check_call_depth_invariant(depth, &self.config) {
            debug!(%violation, "Call rejected");
            return Err(ContractError::CallDepthExceeded {
                depth: u16::try_from(depth).unwrap_or(u16::MAX),
                max: self.config.max_call_depth,
            });
        }
        if self.call_stack.contains(&msg.to) {
            return Err(ContractError::Reentrancy(msg.to));
        }

        if !msg.value.is_zero() {
            self.move_value(msg.sender, msg.to, msg.value)?;
        }

        let Some(mut contract) = self.contracts.remove(&msg.to) else {
            // Plain value transfer to an account without code.
            if msg.data.is_empty() {
                return Ok(Bytes::new());
            }
            return Err(ContractError::NoCode(msg.to));
        };

        self.call_stack.push(msg.to);
        let result = contract.call(self, &msg);
        self.call_stack.pop();
        self.contracts.insert(msg.to, contract);
        result
    }

    fn move_value(&mut self, from: Address, to: Address, value: U256) -> Result<(), ContractError> {
        let available = self.balance_of(from);
        if available < value {
            return Err(ContractError::InsufficientBalance {
                required: value,
                available,
            });
        }
        self.balances.insert(from, available - value);
        let credited = self.balance_of(to).saturating_add(value);
        self.balances.insert(to, credited);
        Ok(())
    }

    /// Records the first failure of the running transaction.
    fn record_failure(&mut self, err: ContractError) -> ContractError {
        if self.failure.is_none() {
            self.failure = Some(err.clone());
        }
        err
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

impl Environment for World {
    fn call(&mut self, msg: Message) -> Result<Bytes, ContractError> {
        if self.call_stack.last() != Some(&msg.sender) {
            let err = ContractError::unauthorized(format!(
                "nested call sender {:?} is not the executing contract",
                msg.sender
            ));
            return Err(self.record_failure(err));
        }
        let result = self.execute(msg);
        result.map_err(|err| self.record_failure(err))
    }

    fn emit(&mut self, log: Log) {
        if let Err(violation) = check_log_limit_invariant(self.logs.len() + 1, &self.config) {
            debug!(%violation, "Log rejected");
            let limit = u64::try_from(self.config.max_logs_per_transaction).unwrap_or(u64::MAX);
            self.record_failure(ContractError::LimitReached {
                what: "logs per transaction",
                limit,
            });
            return;
        }
        self.logs.push(log);
    }

    fn balance(&self, address: Address) -> U256 {
        self.balance_of(address)
    }

    fn has_code(&self, address: Address) -> bool {
        self.is_contract(address)
    }

    fn is_executing(&self, address: Address) -> bool {
        self.call_stack.contains(&address)
    }
}

// =============================================================================
// TESTS
// =============================================================================
