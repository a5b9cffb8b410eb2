//! Notification side of the review herald.
//!
//! - [`template`]: status translator (review status to message text)
//! - [`telegram`]: delivery through the Telegram Bot API

pub mod telegram;
pub mod template;

use std::future::Future;

use herald_common::error::DispatchError;

/// Destination for notification messages.
///
/// One call is one delivery attempt; implementations do not retry.
pub trait MessageSink {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), DispatchError>> + Send;
}
