mod api;
mod app;
mod components;
mod hooks;
mod pages;
mod routes;
mod storage;
mod store;

use app::Root;
use yew::Renderer;

fn main() {
    // Disable truncation of panic payloads to debug any panics
    std::panic::set_hook(Box::new(|info| {
        if let Some(s) = info.payload().downcast_ref::<String>() {
            web_sys::console::error_1(&format!("Panic: {s}").into());
        } else if let Some(s) = info.payload().downcast_ref::<&str>() {
            web_sys::console::error_1(&format!("Panic: {s}").into());
        } else {
            web_sys::console::error_1(&"Unknown panic".into());
        }
        if let Some(location) = info.location() {
            web_sys::console::error_1(
                &format!(
                    "  at {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                )
                .into(),
            );
        }
    }));

    web_sys::console::log_1(
        &format!("Starting IPHMS dashboard against {}", api::api_base_url()).into(),
    );

    // Mount the app to the element with id="app"
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("app"));
    match root {
        Some(root) => Renderer::<Root>::with_root(root).render(),
        None => Renderer::<Root>::new().render(),
    };
}
