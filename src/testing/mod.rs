//! Testing utilities and mock implementations
//!
//! This module provides a mock broker transport so the failover loop can be
//! exercised without a real broker.

pub mod mocks;

pub use mocks::*;
