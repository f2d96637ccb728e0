//! The request layer of the weather app.
//!
//! Handlers take an [`AppState`] of shared port implementations, pull the
//! account out of the session cookie with [`SessionAccount`] (pages) or
//! [`ApiSessionAccount`] (JSON endpoints), and delegate to the use cases in
//! `nimbus_application`. JSON bodies go through [`ApiJson`] so malformed
//! payloads are answered like any other invalid input.

pub mod error;
pub mod extract;
pub mod notice;
pub mod routes;
pub mod session;
pub mod state;
pub mod templates;

pub use error::{ApiError, PageError};
pub use extract::ApiJson;
pub use notice::Notice;
pub use session::{ApiSessionAccount, SessionAccount};
pub use state::AppState;
