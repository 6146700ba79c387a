//! Route tree nodes.
//!
//! Each node owns its children in four buckets, one per segment kind.
//! Lookups try the buckets in a fixed order: literal, regex, variable,
//! wildcard. Regex and variable alternatives are tried one after another,
//! backtracking when a subtree fails to produce a handler chain.

use crate::error::FailureReason;
use crate::params::Captures;
use crate::segment::{PathSegment, Segment};

/// Terminal payload of a node: callbacks plus the hooks guarding them.
///
/// Registering the same path again appends to both lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handlers<T> {
    callbacks: Vec<T>,
    hooks: Vec<String>,
}

impl<T> Default for Handlers<T> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
            hooks: Vec::new(),
        }
    }
}

impl<T> Handlers<T> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks in registration order.
    #[must_use]
    pub fn callbacks(&self) -> &[T] {
        &self.callbacks
    }

    /// Hook names in registration order.
    #[must_use]
    pub fn hooks(&self) -> &[String] {
        &self.hooks
    }

    /// Returns true if the chain has neither callbacks nor hooks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty() && self.hooks.is_empty()
    }

    /// Appends callbacks and hooks.
    pub fn extend(
        &mut self,
        callbacks: impl IntoIterator<Item = T>,
        hooks: impl IntoIterator<Item = String>,
    ) {
        self.callbacks.extend(callbacks);
        self.hooks.extend(hooks);
    }
}

/// A node in the route tree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// The segment this node was created for (the root uses an empty literal).
    segment: Segment,

    /// Present iff at least one registration ends here.
    handlers: Option<Handlers<T>>,

    /// Literal children, sorted by text for binary search.
    literal_children: Vec<Node<T>>,

    /// Regex children, in registration order.
    regex_children: Vec<Node<T>>,

    /// Variable children, in registration order.
    variable_children: Vec<Node<T>>,

    /// Wildcard child; always terminal.
    wildcard_child: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new(segment: Segment) -> Self {
        Self {
            segment,
            handlers: None,
            literal_children: Vec::new(),
            regex_children: Vec::new(),
            variable_children: Vec::new(),
            wildcard_child: None,
        }
    }

    /// Creates the root node of a method's tree.
    #[must_use]
    pub fn root() -> Self {
        Self::new(Segment::Literal(String::new()))
    }

    /// The segment this node matches.
    #[must_use]
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// The handler chain, if a route ends at this node.
    #[must_use]
    pub fn handlers(&self) -> Option<&Handlers<T>> {
        self.handlers.as_ref()
    }

    /// Finds a literal child by exact text.
    #[must_use]
    pub fn literal_child(&self, text: &str) -> Option<&Node<T>> {
        self.literal_children
            .binary_search_by(|c| c.segment.key().cmp(text))
            .ok()
            .map(|i| &self.literal_children[i])
    }

    /// Regex children in registration order.
    #[must_use]
    pub fn regex_children(&self) -> &[Node<T>] {
        &self.regex_children
    }

    /// Variable children in registration order.
    #[must_use]
    pub fn variable_children(&self) -> &[Node<T>] {
        &self.variable_children
    }

    /// The wildcard child, if any.
    #[must_use]
    pub fn wildcard_child(&self) -> Option<&Node<T>> {
        self.wildcard_child.as_deref()
    }

    /// Descends along `segments`, creating nodes as needed, and appends the
    /// callbacks and hooks to the final node.
    ///
    /// Callers must have checked that a wildcard only appears last.
    pub(crate) fn insert(&mut self, segments: &[Segment], callbacks: Vec<T>, hooks: Vec<String>) {
        let Some((segment, rest)) = segments.split_first() else {
            self.handlers
                .get_or_insert_with(Handlers::new)
                .extend(callbacks, hooks);
            return;
        };

        self.child_for(segment).insert(rest, callbacks, hooks);
    }

    /// Returns the child for `segment`, creating it if absent.
    fn child_for(&mut self, segment: &Segment) -> &mut Node<T> {
        match segment {
            Segment::Literal(text) => {
                let index = match self
                    .literal_children
                    .binary_search_by(|c| c.segment.key().cmp(text))
                {
                    Ok(index) => index,
                    Err(index) => {
                        self.literal_children
                            .insert(index, Node::new(segment.clone()));
                        index
                    }
                };
                &mut self.literal_children[index]
            }
            Segment::Variable { .. } => Self::find_or_push(&mut self.variable_children, segment),
            Segment::Regex { .. } => Self::find_or_push(&mut self.regex_children, segment),
            Segment::Wildcard => self
                .wildcard_child
                .get_or_insert_with(|| Box::new(Node::new(Segment::Wildcard))),
        }
    }

    fn find_or_push<'a>(children: &'a mut Vec<Node<T>>, segment: &Segment) -> &'a mut Node<T> {
        let index = match children
            .iter()
            .position(|c| c.segment.key() == segment.key())
        {
            Some(index) => index,
            None => {
                children.push(Node::new(segment.clone()));
                children.len() - 1
            }
        };
        &mut children[index]
    }

    /// Looks up the handler chain for the remaining `segments`.
    ///
    /// `path` is the text the segments were split from; it is only used to
    /// slice the wildcard remainder. On failure `captures` holds exactly what
    /// it held on entry.
    pub(crate) fn search<'n>(
        &'n self,
        path: &str,
        segments: &[PathSegment<'_>],
        captures: &mut Captures,
    ) -> Result<&'n Handlers<T>, FailureReason> {
        let Some((current, rest)) = segments.split_first() else {
            return self.handlers.as_ref().ok_or(FailureReason::NoHandler);
        };

        // A literal match is the only candidate for this segment.
        if let Some(child) = self.literal_child(current.text) {
            return child.search(path, rest, captures);
        }

        if self.regex_children.is_empty()
            && self.variable_children.is_empty()
            && self.wildcard_child.is_none()
        {
            return Err(FailureReason::NoMatch);
        }

        for child in &self.regex_children {
            let Segment::Regex { regex, capture, .. } = &child.segment else {
                continue;
            };
            let Some(matched) = regex.captures(current.text) else {
                continue;
            };

            let checkpoint = captures.checkpoint();
            match capture {
                Some(name) => captures.named.push(name.as_str(), current.text),
                None => captures.groups.extend(
                    matched
                        .iter()
                        .map(|group| group.map_or_else(String::new, |g| g.as_str().to_string())),
                ),
            }
            // An empty chain does not end the search for an alternative.
            match child.search(path, rest, captures) {
                Ok(handlers) if !handlers.is_empty() => return Ok(handlers),
                _ => captures.rollback(checkpoint),
            }
        }

        for child in &self.variable_children {
            let Segment::Variable {
                name, constraint, ..
            } = &child.segment
            else {
                continue;
            };
            if constraint.is_some_and(|c| !c.accepts(current.text)) {
                continue;
            }

            let checkpoint = captures.checkpoint();
            captures.variables.push(name.as_str(), current.text);
            match child.search(path, rest, captures) {
                Ok(handlers) if !handlers.is_empty() => return Ok(handlers),
                _ => captures.rollback(checkpoint),
            }
        }

        if let Some(child) = &self.wildcard_child {
            let end = segments.last().map_or(current.end(), PathSegment::end);
            captures.remainder = Some(path[current.start..end].to_string());
            return child.handlers.as_ref().ok_or(FailureReason::NoHandler);
        }

        Err(FailureReason::NoMatch)
    }
}
