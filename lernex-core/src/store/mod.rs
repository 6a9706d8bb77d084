//! Repository ports and store adapters.
//!
//! The engine only ever talks to the traits in [`ports`]; adapters are
//! interchangeable. [`MemoryStore`] is always available, [`PgStore`] sits
//! behind the `database` feature.

pub mod memory;
pub mod ports;

#[cfg(feature = "database")]
#[cfg_attr(docsrs, doc(cfg(feature = "database")))]
pub mod postgres;

pub use memory::MemoryStore;
pub use ports::{
    CertificateRepository, EnrollmentRepository, ProgressRepository, StoreError,
    StoreResult,
};

#[cfg(feature = "database")]
pub use postgres::PgStore;
