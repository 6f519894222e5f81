use gloo_events::EventListener;
use like_button::{page::ClickHandler, Element, Page};
use log::warn;
use wasm_bindgen::JsCast;

use crate::events::DomClick;

/// A handle to an element of the current document.
#[derive(Clone, Debug, PartialEq)]
pub struct DomElement(pub web_sys::Element);

impl DomElement {
    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            warn!("could not set `{}` on like button: {:?}", name, err);
        }
    }
}

impl Element for DomElement {
    fn data(&self, key: &str) -> Option<String> {
        self.0.get_attribute(&format!("data-{}", key))
    }

    fn set_data(&self, key: &str, value: &str) {
        self.set_attribute(&format!("data-{}", key), value);
    }

    fn query(&self, selector: &str) -> Option<Self> {
        match self.0.query_selector(selector) {
            Ok(found) => found.map(DomElement),
            Err(err) => {
                warn!("invalid selector `{}`: {:?}", selector, err);
                None
            }
        }
    }

    /// Images report their resolved, absolute source.
    fn src(&self) -> Option<String> {
        match self.0.dyn_ref::<web_sys::HtmlImageElement>() {
            Some(image) => Some(image.src()),
            None => self.0.get_attribute("src"),
        }
    }

    fn set_src(&self, src: &str) {
        match self.0.dyn_ref::<web_sys::HtmlImageElement>() {
            Some(image) => image.set_src(src),
            None => self.set_attribute("src", src),
        }
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

/// The current document, owning the click listeners registered on it.
///
/// Dropping the page removes every listener it registered.
pub struct DomPage {
    document: web_sys::Document,
    listeners: Vec<EventListener>,
}

impl DomPage {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            listeners: Vec::new(),
        }
    }
}

impl Page for DomPage {
    type Element = DomElement;
    type Event = DomClick;

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!("invalid selector `{}`: {:?}", selector, err);
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|idx| nodes.item(idx))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(DomElement)
            .collect()
    }

    fn listen_click(&mut self, element: &DomElement, handler: ClickHandler<DomClick>) {
        let listener = EventListener::new(&element.0, "click", move |event| {
            handler(&DomClick::new(event.clone()))
        });
        self.listeners.push(listener);
    }
}
