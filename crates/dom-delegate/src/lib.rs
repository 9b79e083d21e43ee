//! DOM Delegation Utilities
//!
//! Event binding helpers for server-rendered pages.
//! Delegated listeners live on a stable root and resolve the matching
//! element at event time, so elements inserted later are covered too.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Something that can run `querySelectorAll`
pub trait QueryRoot {
    fn query_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue>;
}

impl QueryRoot for web_sys::Document {
    fn query_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl QueryRoot for web_sys::Element {
    fn query_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

/// Find the element matching `selector` at or above the event target.
///
/// Text nodes are resolved to their parent element first.
pub fn closest_match(target: &web_sys::EventTarget, selector: &str) -> Option<web_sys::Element> {
    let element = match target.dyn_ref::<web_sys::Element>() {
        Some(el) => el.clone(),
        None => target.dyn_ref::<web_sys::Node>()?.parent_element()?,
    };
    match element.closest(selector) {
        Ok(found) => found,
        Err(e) => {
            log::error!("selector `{}` rejected by the browser: {:?}", selector, e);
            None
        }
    }
}

/// Bind one listener on `root` for `event`.
///
/// `handler` runs only when the event target has an ancestor-or-self
/// matching `selector`, and receives that element.
/// With `capture = true` the listener runs before any bubble handler on
/// the path, so calling `stop_propagation` inside it hides the event from
/// every other listener below the root.
pub fn bind_delegated<F>(
    root: &web_sys::EventTarget,
    event: &str,
    selector: &str,
    capture: bool,
    handler: F,
) -> Result<(), JsValue>
where
    F: Fn(web_sys::Event, web_sys::Element) + 'static,
{
    let selector = selector.to_string();
    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let Some(target) = ev.target() else { return };
        if let Some(matched) = closest_match(&target, &selector) {
            handler(ev, matched);
        }
    });

    root.add_event_listener_with_callback_and_bool(event, listener.as_ref().unchecked_ref(), capture)?;
    // Listener lives as long as the page
    listener.forget();
    Ok(())
}

/// Bind `handler` directly on every element under `root` matching `selector`.
///
/// Elements already carrying the `marker` attribute are skipped and newly
/// bound ones get it, so calling this again after inserting content only
/// binds the new elements. Returns the number of elements bound by this call.
pub fn bind_each<R, F>(
    root: &R,
    selector: &str,
    marker: &str,
    event: &str,
    handler: F,
) -> Result<usize, JsValue>
where
    R: QueryRoot + ?Sized,
    F: Fn(web_sys::Event, web_sys::Element) + Clone + 'static,
{
    let nodes = root.query_all(selector)?;
    let mut bound = 0;

    for index in 0..nodes.length() {
        let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
            continue;
        };
        if element.has_attribute(marker) {
            continue;
        }

        let on_event = handler.clone();
        let owner = element.clone();
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            on_event(ev, owner.clone());
        });
        element.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
        listener.forget();

        element.set_attribute(marker, "")?;
        bound += 1;
    }

    Ok(bound)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKER: &str = "data-delete-bound";

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn make_trigger(doc: &web_sys::Document, parent: &web_sys::Element) -> web_sys::Element {
        let el = doc.create_element("a").unwrap();
        el.set_attribute("class", "delete-post").unwrap();
        parent.append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn test_closest_match_text_node() {
        let doc = document();
        let root = doc.create_element("div").unwrap();
        let trigger = make_trigger(&doc, &root);
        let text = doc.create_text_node("delete");
        trigger.append_child(&text).unwrap();

        let found = closest_match(&text, ".delete-post").expect("text node resolves to its parent");
        assert_eq!(found, trigger);
        assert!(closest_match(&text, ".other").is_none());
    }

    #[wasm_bindgen_test]
    fn test_closest_match_malformed_selector() {
        let doc = document();
        let root = doc.create_element("div").unwrap();
        let trigger = make_trigger(&doc, &root);

        assert!(closest_match(&trigger, ".delete-post[").is_none());
    }

    #[wasm_bindgen_test]
    fn test_bind_each_skips_marked_elements() {
        let doc = document();
        let root = doc.create_element("div").unwrap();
        make_trigger(&doc, &root);
        make_trigger(&doc, &root);

        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let handler = move |_ev: web_sys::Event, _el: web_sys::Element| counter.set(counter.get() + 1);

        assert_eq!(bind_each(&root, ".delete-post", MARKER, "click", handler.clone()).unwrap(), 2);
        assert_eq!(bind_each(&root, ".delete-post", MARKER, "click", handler.clone()).unwrap(), 0);

        let late = make_trigger(&doc, &root);
        assert_eq!(bind_each(&root, ".delete-post", MARKER, "click", handler).unwrap(), 1);
        assert!(late.has_attribute(MARKER));

        // One listener per element even after repeated binds
        late.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
        assert_eq!(clicks.get(), 1);
    }

    #[wasm_bindgen_test]
    fn test_bind_delegated_covers_late_elements() {
        let doc = document();
        let root = doc.create_element("div").unwrap();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        bind_delegated(&root, "click", ".delete-post", true, move |_ev, _el| {
            counter.set(counter.get() + 1)
        })
        .unwrap();

        let late = make_trigger(&doc, &root);
        late.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
        root.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
        assert_eq!(hits.get(), 1);
    }
}
