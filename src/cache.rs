//! Thread-local cache of compiled rules and patterns.
//!
//! Compiling a rule parses both fragments, so repeated rewrites with the
//! same rule text (a config rule run over a whole directory, say) reuse one
//! compiled value per thread. Each cache is capped at 256 entries and is
//! cleared when full.

use crate::rule::{CompileError, Pattern, Rule};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

const MAX_CACHE_ENTRIES: usize = 256;

thread_local! {
    static RULE_CACHE: RefCell<HashMap<String, Arc<Rule>>> = RefCell::new(HashMap::new());
    static PATTERN_CACHE: RefCell<HashMap<String, Arc<Pattern>>> = RefCell::new(HashMap::new());
}

/// Get a compiled rule from cache, or compile and cache it. Compile errors
/// are not cached.
pub fn get_or_compile_rule(text: &str) -> Result<Arc<Rule>, CompileError> {
    RULE_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(rule) = cache.get(text) {
            trace!(rule = text, "rule cache hit");
            return Ok(Arc::clone(rule));
        }
        trace!(rule = text, "rule cache miss");

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }
        let compiled = Arc::new(Rule::compile(text)?);
        cache.insert(text.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    })
}

/// Same as [`get_or_compile_rule`] for bare search patterns.
pub fn get_or_compile_pattern(text: &str) -> Result<Arc<Pattern>, CompileError> {
    PATTERN_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(pattern) = cache.get(text) {
            trace!(pattern = text, "pattern cache hit");
            return Ok(Arc::clone(pattern));
        }
        trace!(pattern = text, "pattern cache miss");

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }
        let compiled = Arc::new(Pattern::compile(text)?);
        cache.insert(text.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    })
}

/// Clear both caches (mainly for testing).
pub fn clear_cache() {
    RULE_CACHE.with(|cache| cache.borrow_mut().clear());
    PATTERN_CACHE.with(|cache| cache.borrow_mut().clear());
}

/// Number of cached rules and patterns.
pub fn cache_size() -> usize {
    RULE_CACHE.with(|cache| cache.borrow().len())
        + PATTERN_CACHE.with(|cache| cache.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_compiled_rules() {
        clear_cache();
        let first = get_or_compile_rule("foo(a) -> bar(a)").unwrap();
        let second = get_or_compile_rule("foo(a) -> bar(a)").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache_size(), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        clear_cache();
        assert!(get_or_compile_rule("no delimiter").is_err());
        assert_eq!(cache_size(), 0);
    }

    #[test]
    fn patterns_have_their_own_cache() {
        clear_cache();
        get_or_compile_pattern("call(a, b);").unwrap();
        get_or_compile_rule("call(a, b) -> call(b, a)").unwrap();
        assert_eq!(cache_size(), 2);
    }

    #[test]
    fn evicts_when_full() {
        clear_cache();
        for i in 0..MAX_CACHE_ENTRIES {
            get_or_compile_pattern(&format!("f{i}(a)")).unwrap();
        }
        assert_eq!(cache_size(), MAX_CACHE_ENTRIES);
        get_or_compile_pattern("overflow(a)").unwrap();
        assert_eq!(cache_size(), 1);
    }
}
