//! Page host
//!
//! Owns the document, the listener registry and the event loop, and plays
//! the browser's part: it turns simulated user input into DOM events,
//! routes them to registered [`Action`]s, and runs timers on a virtual
//! clock. Every handler runs to completion before the next event or timer
//! is looked at.

use std::path::Path;

use tracing::{debug, info, warn};
use vitrine_dom::serialize::outer_html;
use vitrine_dom::{Document, Event, EventType, ListenerId, ListenerRegistry, NodeId};
use vitrine_runtime::EventLoop;

use crate::carousel::{Carousel, CarouselCommand};
use crate::config::ScriptConfig;
use crate::contact::{ContactForm, ContactSubmission};
use crate::{ScriptError, news};

/// Handler value attached to a listener or timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `DOMContentLoaded` startup hook
    Startup,
    Carousel(CarouselCommand),
    /// Arrow keys, decoded from the event's `key`
    CarouselKey,
    ContactSubmit,
}

/// A loaded page and its script state
#[derive(Debug)]
pub struct Page {
    document: Document,
    config: ScriptConfig,
    listeners: ListenerRegistry<Action>,
    event_loop: EventLoop<Action>,
    carousel: Option<Carousel>,
    contact: Option<ContactForm>,
    focused: Option<NodeId>,
    /// Elements under the pointer, outermost first
    hovered: Vec<NodeId>,
    startup_listener: Option<ListenerId>,
    loaded: bool,
    navigations: Vec<String>,
    submissions: Vec<ContactSubmission>,
}

impl Page {
    /// Host an already-built document. The startup hook is registered but
    /// does not run until [`Page::content_loaded`].
    pub fn new(document: Document, config: ScriptConfig) -> Self {
        let mut listeners = ListenerRegistry::new();
        let startup = listeners.add(NodeId::ROOT, EventType::DomContentLoaded, Action::Startup);

        Self {
            document,
            config,
            listeners,
            event_loop: EventLoop::new(),
            carousel: None,
            contact: None,
            focused: None,
            hovered: Vec::new(),
            startup_listener: Some(startup),
            loaded: false,
            navigations: Vec::new(),
            submissions: Vec::new(),
        }
    }

    /// Parse `html` and host it
    pub fn load(html: &str, config: ScriptConfig) -> Self {
        Self::new(vitrine_html::parse(html), config)
    }

    /// Read an HTML file and host it
    pub fn open(path: impl AsRef<Path>, config: ScriptConfig) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let html = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let url = format!("file://{}", path.display());
        let document = vitrine_html::HtmlParser::new().parse_with_url(&html, &url);
        Ok(Self::new(document, config))
    }

    /// Fire `DOMContentLoaded`. Only the first call has any effect.
    pub fn content_loaded(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.dispatch(Event::new(EventType::DomContentLoaded, NodeId::ROOT));
    }

    fn startup(&mut self) -> Result<(), ScriptError> {
        info!("Running startup hook for {}", self.document.url());

        // The hook runs once; drop its listener like `{ once: true }`.
        if let Some(id) = self.startup_listener.take() {
            self.listeners.remove(id);
        }

        self.carousel = Carousel::mount(
            &mut self.document,
            &mut self.listeners,
            &mut self.event_loop,
            &self.config.carousel,
        )?;
        news::populate_index_news(&mut self.document, &self.config.news)?;
        news::populate_news_page(&mut self.document, &self.config.news)?;
        self.contact = ContactForm::mount(&self.document, &mut self.listeners, &self.config.contact);
        Ok(())
    }

    /// Route `event` through the listeners, target first then ancestors
    fn dispatch(&mut self, mut event: Event) -> Event {
        let route = self.listeners.route(self.document.tree(), &event);
        for (node, action) in route {
            event.current_target = Some(node);
            self.apply(action, Some(&mut event));
        }
        event
    }

    /// Central interpreter for every listener and timer action
    fn apply(&mut self, action: Action, event: Option<&mut Event>) {
        let result = match action {
            Action::Startup => self.startup(),
            Action::Carousel(command) => match self.carousel.as_mut() {
                Some(carousel) => carousel
                    .apply(&mut self.document, &mut self.event_loop, command)
                    .map_err(ScriptError::from),
                None => Ok(()),
            },
            Action::CarouselKey => {
                let key = event.and_then(|e| e.key.clone());
                match (self.carousel.as_mut(), key) {
                    (Some(carousel), Some(key)) => carousel
                        .handle_key(&mut self.document, &mut self.event_loop, &key)
                        .map_err(ScriptError::from),
                    _ => Ok(()),
                }
            }
            Action::ContactSubmit => match (self.contact.as_ref(), event) {
                (Some(contact), Some(event)) => {
                    let now = self.event_loop.now();
                    match contact.handle_submit(&mut self.document, event, now) {
                        Ok(submission) => {
                            self.submissions.push(submission);
                            Ok(())
                        }
                        Err(err) => Err(err.into()),
                    }
                }
                _ => Ok(()),
            },
        };

        if let Err(err) = result {
            warn!("Handler for {:?} failed: {}", action, err);
        }
    }

    /// Click `target`. An unprevented click on a submit button submits its
    /// form.
    pub fn click(&mut self, target: NodeId) {
        let event = self.dispatch(Event::new(EventType::Click, target));
        if event.is_default_prevented() || !self.is_submit_button(target) {
            return;
        }
        if let Some(form) = self.form_owner(target) {
            self.submit(form);
        }
    }

    /// Press a key with focus on the focused element (or the body)
    pub fn key_down(&mut self, key: &str) {
        let target = self
            .focused
            .or_else(|| self.document.body())
            .unwrap_or(NodeId::ROOT);
        self.dispatch(Event::key_down(target, key));
    }

    /// Pointer moves onto `target`
    pub fn pointer_enter(&mut self, target: NodeId) {
        self.move_pointer(Some(target));
    }

    /// Pointer moves off `target` onto its parent
    pub fn pointer_leave(&mut self, target: NodeId) {
        let parent = self
            .document
            .tree()
            .ancestors(target)
            .next()
            .filter(|&p| p != NodeId::ROOT);
        self.move_pointer(parent);
    }

    /// Move the pointer onto `target`, or off the page with `None`
    ///
    /// `mouseleave` fires on every element the pointer left, innermost
    /// first, then `mouseenter` on every element it entered, outermost
    /// first. Elements that stay under the pointer see nothing.
    pub fn move_pointer(&mut self, target: Option<NodeId>) {
        let mut chain = Vec::new();
        if let Some(target) = target {
            let tree = self.document.tree();
            chain.extend(tree.ancestors(target).filter(|&a| a != NodeId::ROOT));
            chain.reverse();
            chain.push(target);
        }

        let previous = std::mem::replace(&mut self.hovered, chain);
        let left: Vec<NodeId> = previous
            .iter()
            .rev()
            .copied()
            .filter(|n| !self.hovered.contains(n))
            .collect();
        let entered: Vec<NodeId> = self
            .hovered
            .iter()
            .copied()
            .filter(|n| !previous.contains(n))
            .collect();

        for node in left {
            self.dispatch(Event::new(EventType::MouseLeave, node));
        }
        for node in entered {
            self.dispatch(Event::new(EventType::MouseEnter, node));
        }
    }

    /// Move focus to `target`: `focusout` on the old element, then `focusin`
    pub fn focus(&mut self, target: NodeId) {
        if self.focused == Some(target) {
            return;
        }
        self.blur();
        self.focused = Some(target);
        self.dispatch(Event::new(EventType::FocusIn, target));
    }

    /// Drop focus
    pub fn blur(&mut self) {
        if let Some(previous) = self.focused.take() {
            self.dispatch(Event::new(EventType::FocusOut, previous));
        }
    }

    /// Submit `form`. Without a handler cancelling it the page navigates to
    /// the form's `action`.
    pub fn submit(&mut self, form: NodeId) {
        let event = self.dispatch(Event::new(EventType::Submit, form));
        if event.is_default_prevented() {
            return;
        }
        let target = self
            .document
            .tree()
            .get_attribute(form, "action")
            .filter(|a| !a.is_empty())
            .unwrap_or(self.document.url())
            .to_string();
        debug!("Form submission navigates to {}", target);
        self.navigations.push(target);
    }

    /// Let `ms` of virtual time pass, running every timer that comes due
    pub fn advance_time(&mut self, ms: u64) {
        let deadline = self.event_loop.now() + ms;
        while let Some(action) = self.event_loop.next_ready(deadline) {
            self.apply(action, None);
        }
    }

    /// Tear down every mounted behavior
    pub fn dispose(&mut self) {
        if let Some(mut carousel) = self.carousel.take() {
            carousel.dispose(&mut self.listeners, &mut self.event_loop);
        }
        if let Some(contact) = self.contact.take() {
            contact.dispose(&mut self.listeners);
        }
    }

    fn is_submit_button(&self, node: NodeId) -> bool {
        let tree = self.document.tree();
        let kind = tree.get_attribute(node, "type").map(str::to_ascii_lowercase);
        match tree.tag_name(node) {
            Some("button") => matches!(kind.as_deref(), None | Some("submit")),
            Some("input") => matches!(kind.as_deref(), Some("submit" | "image")),
            _ => false,
        }
    }

    fn form_owner(&self, node: NodeId) -> Option<NodeId> {
        let tree = self.document.tree();
        tree.ancestors(node).find(|&a| tree.tag_name(a) == Some("form"))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct DOM access for hosts that edit the page between events
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    /// Element with focus
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Innermost element under the pointer
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered.last().copied()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.event_loop.pending_timers()
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.event_loop.now()
    }

    /// Navigations caused by unprevented form submissions
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Simulated contact submissions
    pub fn submissions(&self) -> &[ContactSubmission] {
        &self.submissions
    }

    /// Serialize the current document
    pub fn to_html(&self) -> String {
        outer_html(self.document.tree(), NodeId::ROOT)
    }

    /// Look up an element by id
    pub fn element(&self, id: &str) -> Option<NodeId> {
        self.document.get_element_by_id(id)
    }
}
