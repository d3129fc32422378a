//! Configuration and dependency wiring for the maintenance binary.

mod dependencies;
mod firebase;

pub use dependencies::Dependencies;
pub use firebase::FirebaseConfig;
