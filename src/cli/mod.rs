//! # CLI Module
//!
//! User-facing commands of discografy. Each command loads what it needs,
//! delegates to the catalog pipeline or the Spotify client and reports the
//! outcome with the crate's console macros.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify OAuth PKCE flow and stores the token
//! - [`tracks`] - Prints the canonical track list of an artist
//! - [`playlist`] - Creates a playlist with the canonical track list and
//!   follows the artist
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Catalog Pipeline (fetch → load → resolve → filter)
//!     ↓
//! Spotify Client (HTTP, token refresh)
//! ```
//!
//! ## Usage
//!
//! ```bash
//! discografy auth
//! discografy tracks 4NHQUGzhtTLFvgF5SZesLK
//! discografy playlist https://open.spotify.com/artist/4NHQUGzhtTLFvgF5SZesLK --public
//! ```
//!
//! Fatal errors print a message and exit with status 1. A failed run is
//! never resumed; running the command again starts over.

mod auth;
mod playlist;
mod tracks;

pub use auth::auth;
pub use playlist::playlist;
pub use tracks::tracks;
