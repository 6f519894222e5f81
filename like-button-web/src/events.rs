use like_button::ClickEvent;

/// A click delivered by the browser to a like button.
pub struct DomClick {
    event: web_sys::Event,
}

impl DomClick {
    pub(crate) fn new(event: web_sys::Event) -> Self {
        Self { event }
    }
}

impl ClickEvent for DomClick {
    fn stop_propagation(&self) {
        self.event.stop_propagation();
    }
}
