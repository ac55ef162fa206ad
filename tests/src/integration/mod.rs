//! # Integration Flows
//!
//! Diamonds, the authentication manager and nestable collections deployed
//! together on one host, driven the way external accounts would drive them.

#[cfg(test)]
mod fixtures;

pub mod bus_flows;
pub mod cascade_flows;
pub mod nesting_scenario;
pub mod tracker_flows;
