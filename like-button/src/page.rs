use std::rc::Rc;

/// A handler for clicks on one element, receiving the originating event.
pub type ClickHandler<E> = Rc<dyn Fn(&E)>;

/// The interaction event delivered to a click handler.
pub trait ClickEvent {
    /// Prevents the event from reaching ancestors of the element it was delivered to.
    fn stop_propagation(&self);
}

/// A handle to one element of the page.
///
/// Handles are cheap to clone and refer to the same underlying element.
pub trait Element: Clone + 'static {
    /// Reads the data attribute `data-{key}`.
    fn data(&self, key: &str) -> Option<String>;

    /// Writes the data attribute `data-{key}`.
    fn set_data(&self, key: &str, value: &str);

    /// Returns the first descendant matching `selector`.
    fn query(&self, selector: &str) -> Option<Self>;

    /// Returns the image source, if the element has one.
    fn src(&self) -> Option<String>;

    fn set_src(&self, src: &str);

    /// Returns the text content.
    fn text(&self) -> String;

    /// Replaces the text content.
    fn set_text(&self, text: &str);
}

/// The page whose like buttons are to be bound.
///
/// This allows the controller to be independent of any concrete document model.
pub trait Page {
    type Element: Element;
    type Event: ClickEvent + 'static;

    /// Returns every element matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Registers `handler` to run on every click on `element`, for the lifetime of the page.
    fn listen_click(&mut self, element: &Self::Element, handler: ClickHandler<Self::Event>);
}
