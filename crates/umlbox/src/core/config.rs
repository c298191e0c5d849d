//! Generation options
//!
//! A [`Config`] is an immutable value: every `with_*` call consumes the
//! receiver and hands back a new value.
//!
//! ```rust
//! use umlbox::{Access, Config};
//!
//! let config = Config::new()
//!     .with_added_visibility(Access::Protected)
//!     .with_sorting(false)
//!     .with_superclasses(true);
//!
//! assert!(config.is_visible(Access::Protected));
//! assert!(config.is_visible(Access::Public));
//! assert!(!config.is_visible(Access::Private));
//! ```

use std::sync::Arc;

use super::{Access, Formatter, PlainFormatter, VisibilitySet};

#[derive(Debug, Clone)]
pub struct Config {
    visibility: VisibilitySet,
    use_fqn: bool,
    show_generics: bool,
    truncate_generic_bounds: bool,
    sort_members: bool,
    include_superclasses: bool,
    include_universal_base: bool,
    suppress_ui: bool,
    formatter: Arc<dyn Formatter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            visibility: VisibilitySet::default(),
            use_fqn: false,
            show_generics: true,
            truncate_generic_bounds: false,
            sort_members: true,
            include_superclasses: false,
            include_universal_base: false,
            suppress_ui: false,
            formatter: Arc::new(PlainFormatter),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the visibility filter
    pub fn with_visibility(mut self, visibility: VisibilitySet) -> Self {
        self.visibility = visibility;
        self
    }

    /// Add one level to the visibility filter
    pub fn with_added_visibility(mut self, access: Access) -> Self {
        self.visibility.insert(access);
        self
    }

    pub fn with_all_visible(self) -> Self {
        self.with_visibility(VisibilitySet::all())
    }

    /// Use binary names (`java.util.Map$Entry`) in headers
    pub fn with_fqn(mut self, use_fqn: bool) -> Self {
        self.use_fqn = use_fqn;
        self
    }

    /// `false` renders every type erased and drops the header's type parameters
    pub fn with_generics(mut self, show_generics: bool) -> Self {
        self.show_generics = show_generics;
        self
    }

    /// Render header type parameters without their `extends` clauses
    pub fn with_truncated_bounds(mut self, truncate: bool) -> Self {
        self.truncate_generic_bounds = truncate;
        self
    }

    pub fn with_sorting(mut self, sort: bool) -> Self {
        self.sort_members = sort;
        self
    }

    pub fn with_superclasses(mut self, include: bool) -> Self {
        self.include_superclasses = include;
        self
    }

    /// Keep `Object` at the root of an ancestor chain
    pub fn with_universal_base(mut self, include: bool) -> Self {
        self.include_universal_base = include;
        self
    }

    /// Carried for front ends; generation ignores it
    pub fn with_suppressed_ui(mut self, suppress: bool) -> Self {
        self.suppress_ui = suppress;
        self
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    pub fn is_visible(&self, access: Access) -> bool {
        self.visibility.contains(access)
    }

    pub fn use_fqn(&self) -> bool {
        self.use_fqn
    }

    pub fn show_generics(&self) -> bool {
        self.show_generics
    }

    pub fn truncate_generic_bounds(&self) -> bool {
        self.truncate_generic_bounds
    }

    pub fn sort_members(&self) -> bool {
        self.sort_members
    }

    pub fn include_superclasses(&self) -> bool {
        self.include_superclasses
    }

    pub fn include_universal_base(&self) -> bool {
        self.include_universal_base
    }

    pub fn suppress_ui(&self) -> bool {
        self.suppress_ui
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }
}
