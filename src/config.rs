//! Binder Configuration
//!
//! Optional page-level settings. The first source found wins:
//! 1. `window.LITREVU_DELETE_CONFIG` object
//! 2. `<script type="application/json" id="delete-confirm-config">`
//! 3. Built-in defaults

use std::collections::BTreeMap;

use log::LevelFilter;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::ConfigError;
use crate::routes::{default_routes, RouteTable, ID_PLACEHOLDER};

/// Global JS object holding the configuration
pub const CONFIG_GLOBAL: &str = "LITREVU_DELETE_CONFIG";
/// Id of the JSON script element holding the configuration
pub const CONFIG_SCRIPT_ID: &str = "delete-confirm-config";

pub const DEFAULT_SELECTOR: &str = ".delete-post";

/// How trigger elements get their click listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindMode {
    /// One capture listener on the document, covers elements added later
    #[default]
    Delegated,
    /// One listener per element found at bind time
    PerElement,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// CSS selector of trigger elements
    pub selector: String,
    /// Prompt text, `None` = pick from the page language
    pub message: Option<String>,
    /// Extra or overriding routes; ticket and review are always present
    pub routes: BTreeMap<String, String>,
    pub mode: BindMode,
    pub log_level: LevelFilter,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            message: None,
            routes: default_routes(),
            mode: BindMode::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl BinderConfig {
    /// Decode from JSON text, then normalize and validate
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.finish()
    }

    /// Decode from a JS object, then normalize and validate
    pub fn from_js(value: JsValue) -> Result<Self, ConfigError> {
        let config: Self = serde_wasm_bindgen::from_value(value)?;
        config.finish()
    }

    fn finish(mut self) -> Result<Self, ConfigError> {
        for (post_type, template) in default_routes() {
            self.routes.entry(post_type).or_insert(template);
        }
        self.selector = self.selector.trim().to_string();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selector.is_empty() {
            return Err(ConfigError::EmptySelector);
        }
        if !selector_is_balanced(&self.selector) {
            return Err(ConfigError::MalformedSelector(self.selector.clone()));
        }
        if let Some((post_type, _)) = self
            .routes
            .iter()
            .find(|(_, template)| !template.contains(ID_PLACEHOLDER))
        {
            return Err(ConfigError::MissingPlaceholder(post_type.clone()));
        }
        Ok(())
    }

    pub fn route_table(&self) -> RouteTable {
        RouteTable::new(self.routes.clone())
    }

    /// Class name when the selector is a single `.class`, for rendering triggers
    pub fn trigger_class(&self) -> Option<&str> {
        let class = self.selector.strip_prefix('.')?;
        let simple = !class.is_empty()
            && class
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        simple.then_some(class)
    }
}

/// Cheap structural check: brackets, parens and quotes close, and the
/// selector does not end in a combinator. The browser parser still has the
/// last word (see `DeleteConfirmationBinder::install`).
fn selector_is_balanced(selector: &str) -> bool {
    let mut open = Vec::new();
    let mut quote = None;
    let mut escaped = false;

    for c in selector.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => open.push(c),
            (None, ']') if open.pop() != Some('[') => return false,
            (None, ')') if open.pop() != Some('(') => return false,
            _ => {}
        }
    }

    let trailing_combinator = selector.trim_end().ends_with(['>', '+', '~', ',']);
    open.is_empty() && quote.is_none() && !escaped && !trailing_combinator
}

/// Load configuration from the page, falling back to defaults
pub fn load(window: &web_sys::Window, document: &web_sys::Document) -> BinderConfig {
    let global = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
        .map(BinderConfig::from_js);

    let script = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
        .map(|text| BinderConfig::from_json(&text));

    choose([(CONFIG_GLOBAL, global), (CONFIG_SCRIPT_ID, script)])
}

/// First source that is present and valid, else the defaults
fn choose<const N: usize>(sources: [(&str, Option<Result<BinderConfig, ConfigError>>); N]) -> BinderConfig {
    sources
        .into_iter()
        .find_map(|(source, parsed)| accept(source, parsed))
        .unwrap_or_default()
}

fn accept(source: &str, parsed: Option<Result<BinderConfig, ConfigError>>) -> Option<BinderConfig> {
    match parsed? {
        Ok(config) => {
            log::debug!("using config from {}", source);
            Some(config)
        }
        Err(e) => {
            log::error!("ignoring config from {}: {}", source, e);
            None
        }
    }
}
