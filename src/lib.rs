//! Console client for a multi-period NDVI analysis service
//!
//! The single component is `MapSession`: it holds the drawn region of
//! interest, the ordered period list and the overlay layer registry, and it
//! orchestrates the statistics and tile requests against the remote analysis
//! service, plus address geocoding. All I/O goes through injectable service
//! traits so the session logic stays independent of any particular UI.

pub mod console;
pub mod core;
pub mod error;
pub mod logging;
pub mod services;
pub mod session_impl;
pub mod state;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{SessionError, SessionResult};
pub use services::*;
pub use session_impl::MapSession;
pub use state::{create_shared_state, SessionState, SharedSessionState};
pub use traits::*;
pub use types::*;
