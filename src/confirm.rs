//! Delete Confirmation Flow
//!
//! What happens when a trigger element is clicked, independent of how the
//! listener was attached. The prompt and the navigation are injected so the
//! branching can run without a browser.

use crate::models::PostRef;
use crate::routes::RouteTable;

/// Asks the user a yes/no question, blocking until answered
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

/// Sends the top-level browsing context somewhere
pub trait Navigator {
    fn navigate(&self, url: &str);
}

/// The parts of a click event the flow touches
pub trait ClickEvent {
    fn prevent_default(&self);
    fn stop_propagation(&self);
}

impl ClickEvent for web_sys::Event {
    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }

    fn stop_propagation(&self) {
        web_sys::Event::stop_propagation(self);
    }
}

/// `window.confirm`; a missing window or a thrown error counts as "no"
pub struct BrowserConfirm;

impl Confirmer for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|win| win.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// `location.href = url`
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) {
        let Some(win) = web_sys::window() else {
            log::error!("no window to navigate to {}", url);
            return;
        };
        if let Err(e) = win.location().set_href(url) {
            log::error!("navigation to {} failed: {}", url, crate::error::js_error_text(&e));
        }
    }
}

/// Why an accepted prompt led nowhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No `data-post-type` attribute
    MissingType,
    /// A type without a deletion route
    UnknownType(String),
}

/// Result of one click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Cancelled,
    Navigated(String),
    Ignored(IgnoreReason),
}

pub struct DeleteFlow<C, N> {
    routes: RouteTable,
    message: String,
    confirmer: C,
    navigator: N,
}

impl<C: Confirmer, N: Navigator> DeleteFlow<C, N> {
    pub fn new(routes: RouteTable, message: impl Into<String>, confirmer: C, navigator: N) -> Self {
        Self {
            routes,
            message: message.into(),
            confirmer,
            navigator,
        }
    }

    /// Full click handling: suppress the event, then prompt and route
    pub fn on_click(&self, event: &impl ClickEvent, post: &PostRef) -> ClickOutcome {
        event.prevent_default();
        event.stop_propagation();
        self.handle(post)
    }

    /// Prompt, then navigate to the deletion URL on acceptance
    pub fn handle(&self, post: &PostRef) -> ClickOutcome {
        if !self.confirmer.confirm(&self.message) {
            log::debug!("deletion cancelled for {:?}", post);
            return ClickOutcome::Cancelled;
        }

        let Some(post_type) = &post.post_type else {
            log::warn!("trigger without post type, nothing to delete");
            return ClickOutcome::Ignored(IgnoreReason::MissingType);
        };

        let id = post.id.as_deref().unwrap_or_else(|| {
            log::warn!("{} trigger without post id", post_type);
            ""
        });

        match self.routes.url_for(post_type, id) {
            Some(url) => {
                log::debug!("deleting {} {} via {}", post_type, id, url);
                self.navigator.navigate(&url);
                ClickOutcome::Navigated(url)
            }
            None => {
                log::warn!("no deletion route for post type `{}`", post_type);
                ClickOutcome::Ignored(IgnoreReason::UnknownType(post_type.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::CONFIRM_EN;
    use crate::models::PostType;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared record of everything the flow did, in order
    type Journal = Rc<RefCell<Vec<String>>>;

    struct FakeConfirm {
        answer: bool,
        journal: Journal,
    }

    impl Confirmer for FakeConfirm {
        fn confirm(&self, message: &str) -> bool {
            self.journal.borrow_mut().push(format!("confirm:{}", message));
            self.answer
        }
    }

    struct FakeNavigator {
        journal: Journal,
    }

    impl Navigator for FakeNavigator {
        fn navigate(&self, url: &str) {
            self.journal.borrow_mut().push(format!("navigate:{}", url));
        }
    }

    struct FakeEvent {
        journal: Journal,
    }

    impl ClickEvent for FakeEvent {
        fn prevent_default(&self) {
            self.journal.borrow_mut().push("prevent_default".to_string());
        }

        fn stop_propagation(&self) {
            self.journal.borrow_mut().push("stop_propagation".to_string());
        }
    }

    fn make_flow(answer: bool) -> (DeleteFlow<FakeConfirm, FakeNavigator>, FakeEvent, Journal) {
        let journal: Journal = Rc::default();
        let flow = DeleteFlow::new(
            RouteTable::default(),
            CONFIRM_EN,
            FakeConfirm { answer, journal: journal.clone() },
            FakeNavigator { journal: journal.clone() },
        );
        let event = FakeEvent { journal: journal.clone() };
        (flow, event, journal)
    }

    fn navigations(journal: &Journal) -> Vec<String> {
        journal
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with("navigate:"))
            .cloned()
            .collect()
    }

    #[test]
    fn test_accept_ticket() {
        let (flow, event, journal) = make_flow(true);
        let outcome = flow.on_click(&event, &PostRef::new("42", PostType::Ticket));

        assert_eq!(outcome, ClickOutcome::Navigated("/ticket/42/delete".to_string()));
        assert_eq!(navigations(&journal), vec!["navigate:/ticket/42/delete"]);
    }

    #[test]
    fn test_accept_review() {
        let (flow, event, journal) = make_flow(true);
        let outcome = flow.on_click(&event, &PostRef::new("7", PostType::Review));

        assert_eq!(outcome, ClickOutcome::Navigated("/review/7/delete".to_string()));
        assert_eq!(navigations(&journal), vec!["navigate:/review/7/delete"]);
    }

    #[test]
    fn test_decline_does_nothing() {
        for post_type in [PostType::Ticket, PostType::Review] {
            let (flow, event, journal) = make_flow(false);
            let outcome = flow.on_click(&event, &PostRef::new("1", post_type));

            assert_eq!(outcome, ClickOutcome::Cancelled);
            assert!(navigations(&journal).is_empty());
        }
    }

    #[test]
    fn test_event_suppressed_before_prompt() {
        for answer in [true, false] {
            let (flow, event, journal) = make_flow(answer);
            flow.on_click(&event, &PostRef::new("3", PostType::Ticket));

            let entries = journal.borrow();
            assert_eq!(entries[0], "prevent_default");
            assert_eq!(entries[1], "stop_propagation");
            assert_eq!(entries[2], format!("confirm:{}", CONFIRM_EN));
        }
    }

    #[test]
    fn test_unknown_type_accepted_without_navigation() {
        let (flow, event, journal) = make_flow(true);
        let outcome = flow.on_click(&event, &PostRef::new("5", PostType::parse("comment")));

        assert_eq!(
            outcome,
            ClickOutcome::Ignored(IgnoreReason::UnknownType("comment".to_string()))
        );
        assert!(navigations(&journal).is_empty());
        // The prompt is still shown
        assert!(journal.borrow().iter().any(|e| e.starts_with("confirm:")));
    }

    #[test]
    fn test_missing_type() {
        let (flow, event, journal) = make_flow(true);
        let post = PostRef::from_attributes(Some("5".to_string()), None);

        assert_eq!(flow.on_click(&event, &post), ClickOutcome::Ignored(IgnoreReason::MissingType));
        assert!(navigations(&journal).is_empty());
    }

    #[test]
    fn test_missing_id_gives_empty_segment() {
        let (flow, _event, _journal) = make_flow(true);
        let post = PostRef::from_attributes(None, Some("ticket".to_string()));

        assert_eq!(flow.handle(&post), ClickOutcome::Navigated("/ticket//delete".to_string()));
    }
}
