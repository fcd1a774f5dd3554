use crate::document::{Dom, DomPatchError};
use core_types::{Event, Handler, NodeKey, Phase};

/// Event names that are delivered to the target only, never bubbled.
const NON_BUBBLING: &[&str] = &[
    "focus",
    "blur",
    "load",
    "unload",
    "mouseenter",
    "mouseleave",
    "scroll",
];

pub fn bubbles(event: &str) -> bool {
    !NON_BUBBLING.iter().any(|name| name.eq_ignore_ascii_case(event))
}

impl Dom {
    /// Dispatch `event` at `target`.
    ///
    /// Capture listeners run from the root down to the target's parent, then
    /// every listener on the target in registration order, then (for bubbling
    /// events) non-capture listeners from the parent up to the root.
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, target: NodeKey, event: &str) -> Result<usize, DomPatchError> {
        if !self.contains(target) {
            return Err(DomPatchError::MissingKey(target));
        }
        let mut path = Vec::new();
        let mut current = self.record(target).and_then(|r| r.parent);
        while let Some(key) = current {
            path.push(key);
            current = self.record(key).and_then(|r| r.parent);
        }

        let mut invoked = 0;
        for &node in path.iter().rev() {
            invoked += self.invoke(node, target, event, Phase::Capturing, |h| h.capture());
        }
        invoked += self.invoke(target, target, event, Phase::AtTarget, |_| true);
        if bubbles(event) {
            for &node in &path {
                invoked += self.invoke(node, target, event, Phase::Bubbling, |h| !h.capture());
            }
        }
        log::debug!(target: "dom.events", "dispatched {event} at {target:?}: {invoked} listener(s)");
        Ok(invoked)
    }

    fn invoke(
        &self,
        node: NodeKey,
        target: NodeKey,
        event: &str,
        phase: Phase,
        accept: impl Fn(&Handler) -> bool,
    ) -> usize {
        let Some(record) = self.record(node) else {
            return 0;
        };
        let handlers: Vec<Handler> = record
            .listeners
            .iter()
            .filter(|(name, handler)| name.eq_ignore_ascii_case(event) && accept(handler))
            .map(|(_, handler)| handler.clone())
            .collect();
        let dispatched = Event::new(event, target, node, phase, self);
        for handler in &handlers {
            handler.call(&dispatched);
        }
        handlers.len()
    }

    pub fn listener_count(&self, node: NodeKey, event: &str) -> usize {
        self.record(node)
            .map(|r| {
                r.listeners
                    .iter()
                    .filter(|(name, _)| name.eq_ignore_ascii_case(event))
                    .count()
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Document;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, label: &str) -> Handler {
        let log = Rc::clone(log);
        let label = label.to_string();
        Handler::new(move |ev| log.borrow_mut().push(format!("{label}:{:?}", ev.phase)))
    }

    #[test]
    fn capture_then_target_then_bubble() {
        let mut dom = Dom::new();
        let outer = dom.create_element("div").unwrap();
        let inner = dom.create_element("button").unwrap();
        dom.append_child(outer, inner).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        dom.add_listener(outer, "click", recorder(&log, "outer-bubble"))
            .unwrap();
        dom.add_listener(outer, "click", recorder(&log, "outer-capture").capturing())
            .unwrap();
        dom.add_listener(inner, "click", recorder(&log, "inner")).unwrap();

        let invoked = dom.dispatch(inner, "click").unwrap();

        assert_eq!(invoked, 3);
        assert_eq!(
            *log.borrow(),
            vec![
                "outer-capture:Capturing".to_string(),
                "inner:AtTarget".to_string(),
                "outer-bubble:Bubbling".to_string(),
            ]
        );
    }

    #[test]
    fn focus_does_not_bubble_but_is_captured() {
        let mut dom = Dom::new();
        let form = dom.create_element("form").unwrap();
        let input = dom.create_element("input").unwrap();
        dom.append_child(form, input).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        dom.add_listener(form, "focus", recorder(&log, "bubble")).unwrap();
        dom.add_listener(form, "focus", recorder(&log, "capture").capturing())
            .unwrap();

        dom.dispatch(input, "focus").unwrap();

        assert_eq!(*log.borrow(), vec!["capture:Capturing".to_string()]);
    }

    #[test]
    fn dispatch_to_unknown_node_fails() {
        let dom = Dom::new();
        assert_eq!(
            dom.dispatch(NodeKey(999), "click"),
            Err(DomPatchError::MissingKey(NodeKey(999)))
        );
    }
}
