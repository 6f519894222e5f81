use std::rc::Rc;

use log::{debug, warn};
use thiserror::Error;

use crate::{
    config::{ConfigError, FailurePolicy, LikeConfig},
    notify::{Notifier, NotifyError, PostId},
    page::{ClickEvent, ClickHandler, Element, Page},
    shared::Shared,
    state::{Icon, LikeState},
};

/// Data attribute set on every button the controller has attached a click handler to.
pub const BOUND_MARKER: &str = "like-bound";

/// Observes notifications that failed, after the failure policy has been applied.
pub type FailureObserver = Rc<dyn Fn(&PostId, &NotifyError)>;

/// Why a like button found on the page was not bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("like button #{index} has no `data-{attribute}` post identifier")]
    MissingPostId { index: usize, attribute: String },
    #[error("like button for post {post_id} has no icon matching `{selector}`")]
    MissingIcon { post_id: PostId, selector: String },
    #[error("like button for post {post_id} has no counter matching `{selector}`")]
    MissingCounter { post_id: PostId, selector: String },
    #[error("like button for post {post_id} shows unrecognized icon `{src}`")]
    UnknownIcon { post_id: PostId, src: String },
    #[error("like button for post {post_id} has non-numeric count `{text}`")]
    InvalidCount { post_id: PostId, text: String },
}

/// The outcome of one [`LikeButtonController::initialize`] pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bindings {
    /// Buttons that received a click handler during this pass.
    pub bound: usize,
    /// Buttons skipped because an earlier pass already bound them.
    pub already_bound: usize,
    /// Buttons left without behavior because their markup is malformed.
    pub rejected: Vec<BindError>,
}

/// A like button with behavior attached.
pub struct LikeButton<E: Element> {
    post_id: PostId,
    state: Shared<LikeState>,
    element: E,
    icon: E,
    counter: E,
}

impl<E: Element> Clone for LikeButton<E> {
    fn clone(&self) -> Self {
        Self {
            post_id: self.post_id.clone(),
            state: self.state.clone(),
            element: self.element.clone(),
            icon: self.icon.clone(),
            counter: self.counter.clone(),
        }
    }
}

impl<E: Element> LikeButton<E> {
    /// Reads the post identifier, the displayed icon and the displayed count from the markup.
    fn read(index: usize, element: E, config: &LikeConfig) -> Result<Self, BindError> {
        let post_id = element
            .data(&config.post_id_attribute)
            .as_deref()
            .and_then(PostId::parse)
            .ok_or_else(|| BindError::MissingPostId {
                index,
                attribute: config.post_id_attribute.clone(),
            })?;

        let icon = element
            .query(&config.icon_selector)
            .ok_or_else(|| BindError::MissingIcon {
                post_id: post_id.clone(),
                selector: config.icon_selector.clone(),
            })?;
        let counter = element
            .query(&config.counter_selector)
            .ok_or_else(|| BindError::MissingCounter {
                post_id: post_id.clone(),
                selector: config.counter_selector.clone(),
            })?;

        let src = icon.src().unwrap_or_default();
        let liked = Icon::classify(&src, config)
            .ok_or_else(|| BindError::UnknownIcon {
                post_id: post_id.clone(),
                src: src.clone(),
            })?
            .is_liked();

        let text = counter.text();
        let state = text
            .trim()
            .parse::<i64>()
            .ok()
            .map(|count| LikeState::new(liked, count))
            .filter(LikeState::can_toggle)
            .ok_or_else(|| BindError::InvalidCount {
                post_id: post_id.clone(),
                text: text.clone(),
            })?;

        Ok(Self {
            post_id,
            state: Shared::new(state),
            element,
            icon,
            counter,
        })
    }

    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn state(&self) -> LikeState {
        self.state.exec(|state| *state)
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Writes the icon source and counter text for the current state to the page.
    fn render(&self, config: &LikeConfig) {
        let state = self.state();
        self.icon.set_src(state.icon_src(config));
        self.counter.set_text(&state.count_text());
    }

    fn toggle(&self, config: &LikeConfig) -> LikeState {
        let state = self.state.exec_mut(|state| {
            state.toggle();
            *state
        });
        self.render(config);
        state
    }

    /// Handles one click: stops propagation, notifies the server without waiting,
    /// then toggles the displayed state.
    fn click<N: Notifier>(
        &self,
        event: &dyn ClickEvent,
        notifier: &N,
        config: &Rc<LikeConfig>,
        on_failure: Option<&FailureObserver>,
    ) {
        event.stop_propagation();

        let url = config.endpoint_for(&self.post_id);
        let done = {
            let button = self.clone();
            let config = config.clone();
            let on_failure = on_failure.cloned();
            Box::new(move |result: Result<(), NotifyError>| {
                if let Err(err) = result {
                    button.notification_failed(&err, &config, on_failure.as_ref());
                }
            })
        };
        notifier.notify(&self.post_id, &url, done);

        let state = self.toggle(config);
        debug!(
            "post {} now {} with {} likes",
            self.post_id,
            if state.liked { "liked" } else { "unliked" },
            state.count
        );
    }

    fn notification_failed(
        &self,
        err: &NotifyError,
        config: &LikeConfig,
        on_failure: Option<&FailureObserver>,
    ) {
        warn!("like notification for post {} failed: {}", self.post_id, err);
        if config.on_failure == FailurePolicy::Revert {
            let state = self.toggle(config);
            debug!("reverted post {} to {} likes", self.post_id, state.count);
        }
        if let Some(on_failure) = on_failure {
            on_failure(&self.post_id, err);
        }
    }
}

/// Binds optimistic like behavior to every like button of a page.
pub struct LikeButtonController<P: Page, N: Notifier> {
    page: P,
    notifier: Rc<N>,
    config: Rc<LikeConfig>,
    on_failure: Option<FailureObserver>,
    buttons: Vec<LikeButton<P::Element>>,
}

impl<P: Page + 'static, N: Notifier + 'static> LikeButtonController<P, N> {
    pub fn new(page: P, notifier: N, config: LikeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            page,
            notifier: Rc::new(notifier),
            config: Rc::new(config),
            on_failure: None,
            buttons: Vec::new(),
        })
    }

    /// Registers an observer for failed notifications. Only buttons bound afterwards use it.
    pub fn on_failure(mut self, observer: impl Fn(&PostId, &NotifyError) + 'static) -> Self {
        self.on_failure = Some(Rc::new(observer));
        self
    }

    /// Finds every like button on the page and attaches a click handler to each
    /// one that has not been bound before.
    ///
    /// Buttons with malformed markup are reported in [`Bindings::rejected`] and left
    /// untouched. Calling this again only binds buttons that are new or were rejected.
    pub fn initialize(&mut self) -> Bindings {
        let mut bindings = Bindings::default();
        let elements = self.page.query_all(&self.config.button_selector);
        for (index, element) in elements.into_iter().enumerate() {
            if element.data(BOUND_MARKER).is_some() {
                bindings.already_bound += 1;
                continue;
            }
            match LikeButton::read(index, element, &self.config) {
                Ok(button) => {
                    self.attach(&button);
                    self.buttons.push(button);
                    bindings.bound += 1;
                }
                Err(err) => {
                    warn!("{}", err);
                    bindings.rejected.push(err);
                }
            }
        }
        debug!(
            "bound {} like buttons ({} already bound, {} rejected)",
            bindings.bound,
            bindings.already_bound,
            bindings.rejected.len()
        );
        bindings
    }

    fn attach(&mut self, button: &LikeButton<P::Element>) {
        let handler: ClickHandler<P::Event> = {
            let button = button.clone();
            let notifier = self.notifier.clone();
            let config = self.config.clone();
            let on_failure = self.on_failure.clone();
            Rc::new(move |event: &P::Event| {
                button.click(event, &*notifier, &config, on_failure.as_ref())
            })
        };
        self.page.listen_click(&button.element, handler);
        button.element.set_data(BOUND_MARKER, "true");
    }

    /// The buttons bound so far, in the order they were bound.
    pub fn buttons(&self) -> &[LikeButton<P::Element>] {
        &self.buttons
    }

    /// The bound buttons for `post_id`. A post may appear more than once on a page.
    pub fn buttons_for<'a>(
        &'a self,
        post_id: &'a PostId,
    ) -> impl Iterator<Item = &'a LikeButton<P::Element>> + 'a {
        self.buttons
            .iter()
            .filter(move |button| button.post_id() == post_id)
    }

    pub fn config(&self) -> &LikeConfig {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }
}
