//! Helpers shared by the workspace tests: seeded randomness, byte tampering,
//! error assertions and log setup.

pub mod asserts;
pub mod logging;
pub mod random;
pub mod tamper;
