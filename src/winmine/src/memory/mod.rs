//! Memory Source Abstraction
//!
//! Everything the decoder needs from the game process goes through
//! [`MemorySource`]:
//! - the live process implementation lives in the CLI
//! - `MockMemorySource` backs the tests

mod traits;

#[cfg(test)]
mod mock;

#[cfg(test)]
pub use mock::MockMemorySource;
pub use traits::MemorySource;
