//! Hook and error-handler registries.
//!
//! Both map a key to a single handler; registering the same key again
//! replaces the previous handler.

use std::collections::HashMap;
use std::fmt;

use crate::handler::{SharedErrorHandler, SharedHook};

/// Hooks by name.
#[derive(Default, Clone)]
pub(crate) struct HookRegistry {
    hooks: HashMap<String, SharedHook>,
}

impl HookRegistry {
    /// Inserts a hook, returning true if it replaced an earlier one.
    pub(crate) fn insert(&mut self, name: String, hook: SharedHook) -> bool {
        self.hooks.insert(name, hook).is_some()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&SharedHook> {
        self.hooks.get(name)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.hooks.len()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HookRegistry").field("hooks", &names).finish()
    }
}

/// Error handlers by code.
#[derive(Default, Clone)]
pub(crate) struct ErrorRegistry {
    handlers: HashMap<u16, SharedErrorHandler>,
}

impl ErrorRegistry {
    /// Inserts a handler, returning true if it replaced an earlier one.
    pub(crate) fn insert(&mut self, code: u16, handler: SharedErrorHandler) -> bool {
        self.handlers.insert(code, handler).is_some()
    }

    pub(crate) fn get(&self, code: u16) -> Option<&SharedErrorHandler> {
        self.handlers.get(&code)
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for ErrorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<u16> = self.handlers.keys().copied().collect();
        codes.sort_unstable();
        f.debug_struct("ErrorRegistry").field("codes", &codes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{ErrorHandler, Hook};
    use crate::ResolutionContext;
    use std::sync::Arc;

    #[test]
    fn test_hook_last_registration_wins() {
        let mut hooks = HookRegistry::default();
        assert!(!hooks.insert("auth".to_string(), Arc::new(|_: &ResolutionContext| true)));
        assert!(hooks.insert("auth".to_string(), Arc::new(|_: &ResolutionContext| false)));

        assert_eq!(hooks.len(), 1);
        assert!(hooks.contains("auth"));
        let hook = hooks.get("auth").unwrap();
        assert!(!hook.check(&ResolutionContext::default()));
        assert!(hooks.get("other").is_none());
    }

    #[test]
    fn test_error_last_registration_wins() {
        let mut errors = ErrorRegistry::default();
        errors.insert(404, Arc::new(|_: &ResolutionContext| false));
        assert!(errors.insert(404, Arc::new(|_: &ResolutionContext| true)));

        assert_eq!(errors.len(), 1);
        assert!(errors.get(404).unwrap().handle(&ResolutionContext::default()));
        assert!(errors.get(500).is_none());
    }

    #[test]
    fn test_debug_lists_keys() {
        let mut errors = ErrorRegistry::default();
        errors.insert(500, Arc::new(|_: &ResolutionContext| false));
        errors.insert(404, Arc::new(|_: &ResolutionContext| false));
        assert_eq!(format!("{errors:?}"), "ErrorRegistry { codes: [404, 500] }");
    }
}
