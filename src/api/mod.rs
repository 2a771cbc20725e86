pub mod client;
pub mod faults;
pub mod fixture;
pub mod simulated;
pub mod traits;

pub use client::CatalogClient;
pub use faults::{AlwaysFail, FaultPolicy, NeverFail, RandomFaults};
pub use fixture::FixtureCatalog;
pub use simulated::SimulatedBackend;
pub use traits::CatalogSource;
