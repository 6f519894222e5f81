use crate::config::LikeConfig;

/// Which of the two known icons a button displays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Icon {
    /// The filled icon.
    Liked,
    /// The hollow icon.
    Unliked,
}

impl Icon {
    /// Classifies an image source reported by the page.
    ///
    /// Browsers report the resolved, absolute URL of an image, so the configured
    /// paths are matched as substrings. The unliked path is checked first.
    pub fn classify(src: &str, config: &LikeConfig) -> Option<Self> {
        if src.contains(config.unliked_icon.as_str()) {
            Some(Icon::Unliked)
        } else if src.contains(config.liked_icon.as_str()) {
            Some(Icon::Liked)
        } else {
            None
        }
    }

    pub fn is_liked(self) -> bool {
        self == Icon::Liked
    }
}

/// The state of one like button: whether the viewer likes the post and the displayed count.
///
/// The icon source and counter text on the page are projections of this value;
/// they are written from it and never read back once a button is bound.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub count: i64,
}

impl LikeState {
    pub fn new(liked: bool, count: i64) -> Self {
        Self { liked, count }
    }

    /// Whether the count can move one step in the direction the next toggle takes it.
    ///
    /// Once this holds it holds for every later state, since toggles alternate direction.
    pub fn can_toggle(&self) -> bool {
        if self.liked {
            self.count.checked_sub(1).is_some()
        } else {
            self.count.checked_add(1).is_some()
        }
    }

    /// Flips `liked` and moves `count` one step in the same direction.
    ///
    /// The count saturates at the `i64` limits; states built from markup always
    /// satisfy [`can_toggle`](Self::can_toggle), so the step is exact for them.
    ///
    /// ```
    /// # use like_button::LikeState;
    /// let mut state = LikeState::new(false, 4);
    /// state.toggle();
    /// assert_eq!(state, LikeState::new(true, 5));
    /// state.toggle();
    /// assert_eq!(state, LikeState::new(false, 4));
    /// ```
    pub fn toggle(&mut self) {
        self.liked = !self.liked;
        self.count = if self.liked {
            self.count.saturating_add(1)
        } else {
            self.count.saturating_sub(1)
        };
    }

    pub fn icon(&self) -> Icon {
        if self.liked {
            Icon::Liked
        } else {
            Icon::Unliked
        }
    }

    /// The image source to display for this state.
    pub fn icon_src<'a>(&self, config: &'a LikeConfig) -> &'a str {
        match self.icon() {
            Icon::Liked => &config.liked_icon,
            Icon::Unliked => &config.unliked_icon,
        }
    }

    /// The counter text to display for this state, always a base-10 integer.
    pub fn count_text(&self) -> String {
        self.count.to_string()
    }
}
