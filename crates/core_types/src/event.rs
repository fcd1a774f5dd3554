use crate::NodeKey;
use std::fmt;
use std::rc::Rc;

/// Resolves selectors against nodes of the document an event is dispatched in.
pub trait SelectorMatcher {
    fn matches(&self, node: NodeKey, selector: &str) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Capturing,
    AtTarget,
    Bubbling,
}

/// A dispatched event as seen by one listener.
pub struct Event<'a> {
    pub name: &'a str,
    pub target: NodeKey,
    pub current_target: NodeKey,
    pub phase: Phase,
    matcher: &'a dyn SelectorMatcher,
}

impl<'a> Event<'a> {
    pub fn new(
        name: &'a str,
        target: NodeKey,
        current_target: NodeKey,
        phase: Phase,
        matcher: &'a dyn SelectorMatcher,
    ) -> Self {
        Self {
            name,
            target,
            current_target,
            phase,
            matcher,
        }
    }

    /// Whether the node the event originated from matches `selector`.
    pub fn target_matches(&self, selector: &str) -> bool {
        self.matcher.matches(self.target, selector)
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("current_target", &self.current_target)
            .field("phase", &self.phase)
            .finish()
    }
}

/// Event listener callback plus its delivery phase.
#[derive(Clone)]
pub struct Handler {
    callback: Rc<dyn Fn(&Event<'_>)>,
    capture: bool,
}

impl Handler {
    pub fn new(callback: impl Fn(&Event<'_>) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
            capture: false,
        }
    }

    /// Same callback, delivered during the capture phase.
    pub fn capturing(mut self) -> Self {
        self.capture = true;
        self
    }

    pub fn capture(&self) -> bool {
        self.capture
    }

    pub fn call(&self, event: &Event<'_>) {
        (self.callback)(event)
    }

    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback) && self.capture == other.capture
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}
