use gloo_net::http::Request;
use like_button::{notify::NotifyDone, Notifier, NotifyError, PostId};
use log::debug;
use wasm_bindgen_futures::spawn_local;

/// Sends like notifications as body-less `GET` requests on the browser's event loop.
///
/// There is no timeout and no retry; the outcome is handed to the controller's
/// completion callback once the response, or a transport failure, arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchNotifier;

impl Notifier for FetchNotifier {
    fn notify(&self, post_id: &PostId, url: &str, done: NotifyDone) {
        debug!("notifying {} for post {}", url, post_id);
        let request = Request::get(url);
        spawn_local(async move {
            let result = match request.send().await {
                Ok(response) => NotifyError::check_status(response.status()),
                Err(err) => Err(NotifyError::Network(err.to_string())),
            };
            done(result);
        });
    }
}
