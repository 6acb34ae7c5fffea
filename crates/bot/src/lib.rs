//! Handler surface of the movie-search bot.
//!
//! Everything transport-specific stays outside: inbound updates arrive as
//! [`InboundUpdate`] values, collaborators are reached through the
//! `FeedFetcher`, `MembershipLookup` and [`NotificationSink`] ports, and
//! every handler answers with an [`OutboundResponse`] for the adapter to
//! deliver.

mod config;
mod inbound;
mod notify;
mod present;
mod response;
mod service;

pub use config::BotConfig;
pub use inbound::{ChatContext, ChatKind, InboundUpdate, UserRef};
pub use notify::{LogSink, NotificationSink};
pub use present::Presenter;
pub use response::{escape_markdown, Button, ButtonAction, OutboundResponse, ParseMode};
pub use service::BotService;
