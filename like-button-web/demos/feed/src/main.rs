use like_button::{FailurePolicy, LikeConfig};

pub fn main() {
    // This provides better error messages in debug mode.
    // It's disabled in release mode so it doesn't bloat up the file size.
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    // The demo has no server behind it, so every notification fails; revert to show it.
    let config = LikeConfig::default()
        .with_icons("/static/like_filled.svg", "/static/like_hollow.svg")
        .with_failure_policy(FailurePolicy::Revert);
    if let Err(err) = like_button_web::bind(config) {
        log::error!("{}", err);
    }
}
