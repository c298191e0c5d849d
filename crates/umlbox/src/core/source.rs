//! The extraction contract shared by both backends
//!
//! A backend only gathers members. Sorting, row padding, separators and the
//! header row are laid out here, identically for every backend, which is
//! what lets two backends agree byte for byte.

use tracing::{debug, span, Level};

use super::text::display_width;
use super::{Config, Diagram, FieldData, Line, MethodData, Result};

/// Everything a backend collects from one class.
///
/// Members must already be filtered by visibility, with synthetic members
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMembers {
    pub class_name: String,
    pub fields: Vec<FieldData>,
    pub constructors: Vec<MethodData>,
    pub methods: Vec<MethodData>,
}

impl ClassMembers {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    pub fn member_count(&self) -> usize {
        self.fields.len() + self.constructors.len() + self.methods.len()
    }
}

/// A metadata collector for one kind of input
pub trait Source: Send + Sync {
    /// What this backend reads
    type Input: ?Sized;

    /// Collect the visible members of `input`
    fn collect(&self, input: &Self::Input, config: &Config) -> Result<ClassMembers>;

    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Collect and lay out one class box
    fn generate(&self, input: &Self::Input, config: &Config) -> Result<Diagram> {
        let members = self.collect(input, config)?;
        Ok(Diagram::new(assemble(members, config)))
    }
}

/// Turn collected members into diagram lines: header, then fields, then
/// constructors and methods, with a separator before each non-empty group.
pub fn assemble(mut members: ClassMembers, config: &Config) -> Vec<Line> {
    let span = span!(
        Level::DEBUG,
        "assemble",
        class_name = members.class_name.as_str(),
        members = members.member_count()
    );
    let _enter = span.enter();

    if config.sort_members() {
        members.fields.sort();
        members.constructors.sort();
        members.methods.sort();
    }

    let f = config.formatter();
    let mut lines = Vec::with_capacity(members.member_count() + 3);

    lines.push(Line::new(
        f.class_name(&members.class_name),
        display_width(&members.class_name),
    ));

    if !members.fields.is_empty() {
        lines.push(Line::Separator);
    }
    for field in &members.fields {
        lines.push(member_row(field.formatted(f), &field.to_string()));
    }

    if !members.constructors.is_empty() || !members.methods.is_empty() {
        lines.push(Line::Separator);
    }
    for method in members.constructors.iter().chain(&members.methods) {
        lines.push(member_row(method.formatted(f), &method.to_string()));
    }

    debug!(
        fields = members.fields.len(),
        constructors = members.constructors.len(),
        methods = members.methods.len(),
        "Assembled class"
    );
    lines
}

fn member_row(formatted: String, plain: &str) -> Line {
    Line::new(format!(" {} ", formatted), display_width(plain) + 2)
}
