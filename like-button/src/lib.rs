#[cfg(test)]
mod tests;

///A reference-counted interior-mutable type designed to reduce runtime borrow rule violations.
pub mod shared;
///The explicit liked/count state of a single button and its projections.
pub mod state;
///The markup contract and behavior knobs of the controller.
pub mod config;
///Traits abstracting the element tree the controller binds to.
pub mod page;
///Best-effort server notification.
pub mod notify;
///Discovery of like buttons and their click behavior.
pub mod controller;

pub use config::{ConfigError, FailurePolicy, LikeConfig};
pub use controller::{BindError, Bindings, LikeButton, LikeButtonController};
pub use notify::{NotifyError, Notifier, PostId};
pub use page::{ClickEvent, Element, Page};
pub use state::{Icon, LikeState};
