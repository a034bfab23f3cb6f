#[cfg(test)]
pub mod memory;
pub mod mongo;
pub mod store;

pub use mongo::MongoDB;
pub use store::Store;
