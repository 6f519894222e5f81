use serde::Deserialize;
use thiserror::Error;

use crate::notify::PostId;

/// Placeholder substituted with the post identifier in [`LikeConfig::endpoint`].
pub const POST_ID_PLACEHOLDER: &str = "{post_id}";

/// What happens to an optimistic toggle whose server notification failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the toggle in place. The displayed state may diverge from the server.
    #[default]
    Keep,
    /// Undo the toggle made by the click whose notification failed.
    Revert,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid like button configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must not be empty")]
    Empty { field: &'static str },
    #[error("endpoint `{0}` has no {{post_id}} placeholder")]
    MissingPlaceholder(String),
    #[error("liked and unliked icons must differ, both are `{0}`")]
    IndistinctIcons(String),
}

/// Describes how like buttons appear in the page markup and how the controller behaves.
///
/// The defaults match the markup rendered by the feed templates:
///
/// ```html
/// <button class="like_button" data-id="42">
///     <img class="like_icon" src="/static/like_hollow.png">
///     <span class="like_count">7</span>
/// </button>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LikeConfig {
    /// Selector matching every like button.
    pub button_selector: String,
    /// Data attribute (without the `data-` prefix) carrying the post identifier.
    pub post_id_attribute: String,
    /// Selector of the icon image, relative to the button.
    pub icon_selector: String,
    /// Selector of the counter element, relative to the button.
    pub counter_selector: String,
    pub liked_icon: String,
    pub unliked_icon: String,
    /// Notification URL, containing [`POST_ID_PLACEHOLDER`].
    pub endpoint: String,
    pub on_failure: FailurePolicy,
}

impl Default for LikeConfig {
    fn default() -> Self {
        Self {
            button_selector: "button.like_button".to_owned(),
            post_id_attribute: "id".to_owned(),
            icon_selector: ".like_icon".to_owned(),
            counter_selector: ".like_count".to_owned(),
            liked_icon: "/static/like_filled.png".to_owned(),
            unliked_icon: "/static/like_hollow.png".to_owned(),
            endpoint: "/like_post/{post_id}".to_owned(),
            on_failure: FailurePolicy::Keep,
        }
    }
}

impl LikeConfig {
    /// Parses a JSON object, taking defaults for absent fields, and validates the result.
    ///
    /// ```
    /// # use like_button::{LikeConfig, FailurePolicy};
    /// let config = LikeConfig::from_json(r#"{"on_failure": "revert"}"#).unwrap();
    /// assert_eq!(config.on_failure, FailurePolicy::Revert);
    /// assert_eq!(config.endpoint, "/like_post/{post_id}");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("button_selector", &self.button_selector),
            ("post_id_attribute", &self.post_id_attribute),
            ("icon_selector", &self.icon_selector),
            ("counter_selector", &self.counter_selector),
            ("liked_icon", &self.liked_icon),
            ("unliked_icon", &self.unliked_icon),
            ("endpoint", &self.endpoint),
        ];
        if let Some(&(field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Empty { field });
        }
        if !self.endpoint.contains(POST_ID_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder(self.endpoint.clone()));
        }
        if self.liked_icon == self.unliked_icon {
            return Err(ConfigError::IndistinctIcons(self.liked_icon.clone()));
        }
        Ok(())
    }

    /// The notification URL for the given post.
    ///
    /// ```
    /// # use like_button::{LikeConfig, PostId};
    /// let post = PostId::parse("17").unwrap();
    /// assert_eq!(LikeConfig::default().endpoint_for(&post), "/like_post/17");
    /// ```
    pub fn endpoint_for(&self, post_id: &PostId) -> String {
        self.endpoint.replace(POST_ID_PLACEHOLDER, post_id.as_str())
    }

    pub fn with_button_selector(mut self, selector: impl Into<String>) -> Self {
        self.button_selector = selector.into();
        self
    }

    pub fn with_post_id_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.post_id_attribute = attribute.into();
        self
    }

    pub fn with_icon_selector(mut self, selector: impl Into<String>) -> Self {
        self.icon_selector = selector.into();
        self
    }

    pub fn with_counter_selector(mut self, selector: impl Into<String>) -> Self {
        self.counter_selector = selector.into();
        self
    }

    pub fn with_icons(mut self, liked: impl Into<String>, unliked: impl Into<String>) -> Self {
        self.liked_icon = liked.into();
        self.unliked_icon = unliked.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }
}
