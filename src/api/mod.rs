//! # API Module
//!
//! HTTP endpoints of the short-lived local server started by `discografy auth`.
//!
//! - [`callback`] - receives the authorization code from Spotify and
//!   exchanges it, together with the PKCE verifier, for a token.
//! - [`health`] - reports that the server is up and which version runs.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use discografy::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
