//! Rule compilation.
//!
//! Rule text has the form `pattern -> replacement`. Both halves are parsed
//! on their own as JavaScript fragments; the pattern's wildcards are
//! classified once here and carried in the compiled [`Rule`], so matching
//! never re-derives them.
//!
//! ```
//! use jsreshape::rule::{Rule, WildcardKind};
//!
//! let rule = Rule::compile("f(a, ...r) -> g(a)").unwrap();
//! assert_eq!(rule.wildcards().get("r"), Some(WildcardKind::Rest));
//! ```

pub mod compiler;
pub mod errors;
pub mod wildcard;

pub use compiler::{split_rule, Fragment, Pattern, Rule};
pub use errors::{CompileError, Side};
pub use wildcard::{is_literal_callee, is_wildcard_name, WildcardKind, WildcardSet};
