use std::fmt;

use thiserror::Error;

/// Opaque identifier of a post, as carried by the page markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostId(String);

impl PostId {
    /// Trims the raw attribute value; blank identifiers are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a like notification did not reach the server, or was refused by it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("like request could not be sent: {0}")]
    Network(String),
    #[error("like request was rejected with status {status}")]
    Rejected { status: u16 },
}

impl NotifyError {
    /// Maps a response status to the outcome of a notification.
    pub fn check_status(status: u16) -> Result<(), NotifyError> {
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(NotifyError::Rejected { status })
        }
    }

    /// The viewer has no session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NotifyError::Rejected { status: 401 })
    }

    /// The viewer may not like this post, e.g. because they wrote it.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, NotifyError::Rejected { status: 403 })
    }

    /// The post no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NotifyError::Rejected { status: 404 })
    }
}

/// Called once with the outcome of a notification.
pub type NotifyDone = Box<dyn FnOnce(Result<(), NotifyError>)>;

/// Tells the server that a post's like state should be toggled.
pub trait Notifier {
    /// Dispatches the request for `post_id` to `url` and returns without waiting for it.
    ///
    /// `done` is invoked later, from the event loop, with the outcome. Implementations
    /// must not call it before `notify` returns.
    fn notify(&self, post_id: &PostId, url: &str, done: NotifyDone);
}
