//! # LastBid Test Suite
//!
//! Unified test crate exercising the runtime and the round program together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Service fixture with a manual clock
//! └── integration/
//!     ├── scenarios.rs     # End-to-end round lifecycles
//!     ├── properties.rs    # Randomized operation sequences
//!     ├── concurrency.rs   # Parallel joins and closes
//!     ├── substitution.rs  # Forged and substituted accounts
//!     └── rollback.rs      # All-or-nothing execution
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p lb-tests
//! cargo test -p lb-tests integration::concurrency::
//! cargo bench -p lb-tests
//! ```

pub mod harness;
pub mod integration;
