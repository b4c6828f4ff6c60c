// Adapters layer: concrete implementations of the domain ports.

pub mod diagnostics;
pub mod token_store;

pub use diagnostics::{CollectingDiagnostics, TracingDiagnostics};
pub use token_store::{FileTokenStore, MemoryTokenStore, NoToken};
