pub mod clock;
pub mod memory_store;

pub use clock::*;
pub use memory_store::*;
