pub mod clock;
pub mod store;

pub use clock::*;
pub use store::*;
