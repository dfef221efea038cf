// Adapters layer: concrete implementations of the domain ports.

pub mod sink;
pub mod storage;

pub use sink::JsonFileSink;
pub use storage::LocalStorage;
