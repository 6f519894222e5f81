use like_button::{Bindings, ConfigError, LikeButtonController, LikeConfig};
use log::info;
use thiserror::Error;
use wasm_bindgen::prelude::{wasm_bindgen, JsValue};

///Element and page handles over the current document.
pub mod dom;
///Typed wrappers over the browser events delivered to like buttons.
pub mod events;
///Server notification over `fetch`.
pub mod notify;

pub use dom::{DomElement, DomPage};
pub use events::DomClick;
pub use notify::FetchNotifier;

/// A controller bound to the current document.
pub type WebController = LikeButtonController<DomPage, FetchNotifier>;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("the window has no document")]
    NoDocument,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Creates a controller for the current document without binding anything yet.
pub fn controller(config: LikeConfig) -> Result<WebController, WebError> {
    let document = web_sys::window()
        .ok_or(WebError::NoWindow)?
        .document()
        .ok_or(WebError::NoDocument)?;
    Ok(LikeButtonController::new(
        DomPage::new(document),
        FetchNotifier,
        config,
    )?)
}

/// Binds every like button currently in the document, keeping the bindings alive
/// for the lifetime of the page.
///
/// Safe to call again after more posts have been inserted; buttons bound by an
/// earlier call are skipped.
pub fn bind(config: LikeConfig) -> Result<Bindings, WebError> {
    let mut controller = controller(config)?;
    let bindings = controller.initialize();
    info!(
        "like buttons: {} bound, {} already bound, {} rejected",
        bindings.bound,
        bindings.already_bound,
        bindings.rejected.len()
    );
    //the listeners live in the page, which must outlive every button
    Box::leak(Box::new(controller));
    Ok(bindings)
}

fn init_logging() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Entry point for the hosting page: binds like buttons using the default markup contract.
/// Returns the number of buttons bound.
#[wasm_bindgen(js_name = bindLikeButtons)]
pub fn bind_like_buttons() -> Result<u32, JsValue> {
    init_logging();
    let bindings = bind(LikeConfig::default())?;
    Ok(bindings.bound as u32)
}

/// Like [`bind_like_buttons`], with a JSON object overriding parts of the default [`LikeConfig`].
#[wasm_bindgen(js_name = bindLikeButtonsWithConfig)]
pub fn bind_like_buttons_with_config(json: &str) -> Result<u32, JsValue> {
    init_logging();
    let config = LikeConfig::from_json(json).map_err(WebError::from)?;
    let bindings = bind(config)?;
    Ok(bindings.bound as u32)
}
