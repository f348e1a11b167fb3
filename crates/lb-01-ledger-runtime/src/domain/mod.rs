pub mod access;
pub mod derivation;
pub mod entities;
pub mod errors;
pub mod instruction;
pub mod rent;

pub use access::*;
pub use derivation::*;
pub use entities::*;
pub use errors::*;
pub use instruction::*;
pub use rent::*;
