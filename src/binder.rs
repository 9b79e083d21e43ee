//! Delete Confirmation Binder
//!
//! Wires `DeleteFlow` to the trigger elements of the page.

use std::rc::Rc;

use crate::config::{BindMode, BinderConfig};
use crate::confirm::{BrowserConfirm, BrowserNavigator, DeleteFlow};
use crate::error::BindError;
use crate::i18n;
use crate::models::PostRef;

/// Marker attribute set on elements bound in per-element mode
pub const BOUND_MARKER: &str = "data-delete-bound";

pub struct DeleteConfirmationBinder {
    flow: Rc<DeleteFlow<BrowserConfirm, BrowserNavigator>>,
    selector: String,
    mode: BindMode,
}

impl DeleteConfirmationBinder {
    /// `lang` is the page language, used when the config has no message
    pub fn new(config: &BinderConfig, lang: Option<&str>) -> Result<Self, BindError> {
        config.validate()?;
        let message = config
            .message
            .clone()
            .unwrap_or_else(|| i18n::confirm_message(lang).to_string());

        Ok(Self {
            flow: Rc::new(DeleteFlow::new(
                config.route_table(),
                message,
                BrowserConfirm,
                BrowserNavigator,
            )),
            selector: config.selector.clone(),
            mode: config.mode,
        })
    }

    /// Attach click handling to the document according to the bind mode
    pub fn install(&self, document: &web_sys::Document) -> Result<(), BindError> {
        match self.mode {
            BindMode::Delegated => {
                // The browser parser is stricter than `BinderConfig::validate`
                document.query_selector(&self.selector)?;
                // Capture phase on the root runs before every bubble handler
                let root: &web_sys::EventTarget = document.as_ref();
                dom_delegate::bind_delegated(root, "click", &self.selector, true, self.handler())?;
                log::info!("delete confirmation delegated for `{}`", self.selector);
            }
            BindMode::PerElement => {
                let bound = dom_delegate::bind_each(document, &self.selector, BOUND_MARKER, "click", self.handler())?;
                log::info!("delete confirmation bound to {} `{}` elements", bound, self.selector);
            }
        }
        Ok(())
    }

    /// Bind trigger elements not bound yet; call again after inserting content.
    ///
    /// Returns how many elements were newly bound. Delegated mode already
    /// covers new elements, so nothing is bound there.
    pub fn rebind(&self, document: &web_sys::Document) -> Result<usize, BindError> {
        if self.mode == BindMode::Delegated {
            return Ok(0);
        }
        let bound = dom_delegate::bind_each(document, &self.selector, BOUND_MARKER, "click", self.handler())?;
        log::debug!("rebind: {} new `{}` elements", bound, self.selector);
        Ok(bound)
    }

    fn handler(&self) -> impl Fn(web_sys::Event, web_sys::Element) + Clone + 'static {
        let flow = self.flow.clone();
        move |ev: web_sys::Event, trigger: web_sys::Element| {
            let post = PostRef::from_element(&trigger);
            flow.on_click(&ev, &post);
        }
    }
}
