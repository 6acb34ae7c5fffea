//! Stateless pagination protocol: opaque callback tokens plus page math.
//!
//! A button press carries a [`CallbackToken`] which round-trips the original
//! query and target page. No per-session state survives between interactions;
//! every transition re-derives the result list from the decoded token, so the
//! protocol is restartable from any token.

mod error;
mod pager;
mod token;

pub use error::{ProtocolError, Result};
pub use pager::Pager;
pub use token::{CallbackToken, MAX_TOKEN_BYTES};
