//! LITRevu Frontend Entry Point
//!
//! Confirms ticket and review deletions before the browser follows the
//! server's delete endpoints.

mod models;
mod routes;
mod i18n;
mod error;
mod config;
mod logging;
mod confirm;
mod binder;
mod components;
mod app;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    // Without the binder the page still works, only unconfirmed
    if let Err(e) = app::start() {
        log::error!("delete confirmation disabled: {}", e);
    }
}
