//! LITRevu Frontend Startup
//!
//! Loads configuration, renders client-side triggers into their slots and
//! installs the delete confirmation binder.

use std::cell::RefCell;

use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;

use crate::binder::DeleteConfirmationBinder;
use crate::components::DeletePostLink;
use crate::config::{self, BinderConfig};
use crate::error::BindError;
use crate::logging;
use crate::models::{POST_ID_ATTR, POST_TYPE_ATTR};

/// Placeholder attribute for client-rendered trigger links
pub const SLOT_ATTR: &str = "data-delete-slot";
/// Optional link text on a slot
pub const SLOT_LABEL_ATTR: &str = "data-label";
const DEFAULT_LABEL: &str = "×";

thread_local! {
    /// Installed binder, kept for later rebinds
    static BINDER: RefCell<Option<DeleteConfirmationBinder>> = const { RefCell::new(None) };
}

pub fn start() -> Result<(), BindError> {
    let window = web_sys::window().ok_or(BindError::NoWindow)?;
    let document = window.document().ok_or(BindError::NoDocument)?;

    let config = config::load(&window, &document);
    logging::init(config.log_level);

    let lang = document
        .document_element()
        .and_then(|el| el.get_attribute("lang"));

    let binder = DeleteConfirmationBinder::new(&config, lang.as_deref())?;
    binder.install(&document)?;

    render_slots(&binder, &document, &config);

    BINDER.with(|slot| *slot.borrow_mut() = Some(binder));
    Ok(())
}

/// Bind trigger elements inserted since startup (per-element mode).
///
/// Exposed to page scripts; returns how many elements were newly bound.
#[wasm_bindgen(js_name = rebindDeleteTriggers)]
pub fn rebind_delete_triggers() -> usize {
    let Some(document) = web_sys::window().and_then(|win| win.document()) else {
        return 0;
    };
    BINDER.with(|slot| match slot.borrow().as_ref() {
        Some(binder) => binder.rebind(&document).unwrap_or_else(|e| {
            log::error!("rebind failed: {}", e);
            0
        }),
        None => {
            log::warn!("rebind requested before the binder was installed");
            0
        }
    })
}

/// Optional step after install: failures are logged, server-rendered
/// triggers stay covered either way
fn render_slots(binder: &DeleteConfirmationBinder, document: &web_sys::Document, config: &BinderConfig) {
    match mount_delete_slots(document, config) {
        Ok(0) => {}
        Ok(mounted) => {
            log::info!("rendered {} delete links", mounted);
            if let Err(e) = binder.rebind(document) {
                log::error!("rendered delete links not bound: {}", e);
            }
        }
        Err(e) => log::error!("delete slots not rendered: {}", e),
    }
}

/// Render a `DeletePostLink` into every `[data-delete-slot]` element
fn mount_delete_slots(document: &web_sys::Document, config: &BinderConfig) -> Result<usize, BindError> {
    let slots = document.query_selector_all(&format!("[{}]", SLOT_ATTR))?;
    if slots.length() == 0 {
        return Ok(0);
    }

    let Some(class) = config.trigger_class() else {
        log::warn!("selector `{}` is not a plain class, delete slots left empty", config.selector);
        return Ok(0);
    };

    let mut mounted = 0;
    for index in 0..slots.length() {
        let Some(slot) = slots.item(index).and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok()) else {
            continue;
        };
        // Rendered once even if startup runs again
        slot.remove_attribute(SLOT_ATTR)?;

        let (Some(post_id), Some(post_type)) = (slot.get_attribute(POST_ID_ATTR), slot.get_attribute(POST_TYPE_ATTR)) else {
            log::warn!("delete slot without {} / {}, skipped", POST_ID_ATTR, POST_TYPE_ATTR);
            continue;
        };
        let label = slot
            .get_attribute(SLOT_LABEL_ATTR)
            .unwrap_or_else(|| DEFAULT_LABEL.to_string());
        let class = class.to_string();

        mount_to(slot, move || {
            view! {
                <DeletePostLink trigger_class=class post_id=post_id post_type=post_type label=label />
            }
        })
        .forget();
        mounted += 1;
    }
    Ok(mounted)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::binder::BOUND_MARKER;
    use crate::config::BindMode;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_rendered_links_bound_after_install() {
        let document = web_sys::window().unwrap().document().unwrap();
        let slot = document.create_element("span").unwrap();
        slot.set_attribute(SLOT_ATTR, "").unwrap();
        slot.set_attribute(POST_ID_ATTR, "42").unwrap();
        slot.set_attribute(POST_TYPE_ATTR, "ticket").unwrap();
        document.body().unwrap().append_child(&slot).unwrap();

        let config = BinderConfig { mode: BindMode::PerElement, ..Default::default() };
        let binder = DeleteConfirmationBinder::new(&config, None).unwrap();
        binder.install(&document).unwrap();
        render_slots(&binder, &document, &config);

        let link = slot.query_selector(".delete-post").unwrap().expect("link rendered");
        assert_eq!(link.get_attribute(POST_ID_ATTR).as_deref(), Some("42"));
        assert!(link.has_attribute(BOUND_MARKER));
        assert!(!slot.has_attribute(SLOT_ATTR));
    }
}
