//! The generation facade
//!
//! Picks a backend by input kind, builds the subject's box and, when asked,
//! the boxes of its ancestors, chained root first with the subject last.

use tracing::{debug, info, span, warn, Level};

use super::binary::{BinarySource, ClassFile};
use super::structural::{Ancestor, ClassDescriptor, StructuralSource};
use crate::core::{Config, Diagram, Rendered, Result, Source};

const UNIVERSAL_BASE_INTERNAL: &str = "java/lang/Object";

/// What to draw
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    /// A loaded type; ancestors are found through its supertype links
    Descriptor(&'a ClassDescriptor),
    /// Class-file bytes. Ancestors cannot be discovered from bytes, so the
    /// caller supplies them, root first.
    Bytes {
        class: &'a [u8],
        ancestors: &'a [&'a [u8]],
    },
}

impl Input<'_> {
    fn backend(&self) -> &'static str {
        match self {
            Input::Descriptor(_) => StructuralSource.name(),
            Input::Bytes { .. } => BinarySource.name(),
        }
    }
}

/// Runs the generation pipeline for one configuration
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    config: Config,
    structural: StructuralSource,
    binary: BinarySource,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            structural: StructuralSource::new(),
            binary: BinarySource::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate the subject's box, chained below its ancestors when
    /// superclasses are included. A chain is returned even when no ancestor
    /// survives, so callers can tell the two modes apart.
    pub fn generate(&self, input: Input<'_>) -> Result<Rendered> {
        let span = span!(Level::INFO, "generate", backend = input.backend());
        let _enter = span.enter();

        let rendered = match input {
            Input::Descriptor(class) => self.generate_structural(class)?,
            Input::Bytes { class, ancestors } => self.generate_binary(class, ancestors)?,
        };

        info!(
            class_name = rendered.subject().class_name(),
            min_width = rendered.min_width(),
            "Generated diagram"
        );
        Ok(rendered)
    }

    fn generate_structural(&self, class: &ClassDescriptor) -> Result<Rendered> {
        let subject = self.structural.generate(class, &self.config)?;
        if !self.config.include_superclasses() {
            return Ok(Rendered::Single(subject));
        }

        // Nearest ancestor first while walking
        let mut ancestors = Vec::new();
        let mut link = class.superclass.as_ref();
        while let Some(ancestor) = link {
            match ancestor {
                Ancestor::Unresolved { name } => {
                    warn!(
                        class = class.name.as_str(),
                        ancestor = name.as_str(),
                        "Ancestor cannot be introspected, chain ends here"
                    );
                    break;
                }
                Ancestor::Resolved(parent) => {
                    if parent.is_universal_base() && !self.config.include_universal_base() {
                        break;
                    }
                    ancestors.push(self.structural.generate(parent, &self.config)?);
                    link = parent.superclass.as_ref();
                }
            }
        }
        ancestors.reverse();

        debug!(ancestors = ancestors.len(), "Walked supertype links");
        Ok(Rendered::Chained(subject.chain_below(ancestors)))
    }

    fn generate_binary(&self, bytes: &[u8], ancestor_bytes: &[&[u8]]) -> Result<Rendered> {
        let class = ClassFile::parse(bytes)?;
        let subject = self.binary.generate_class(&class, &self.config)?;
        if !self.config.include_superclasses() {
            return Ok(Rendered::Single(subject));
        }

        let ancestors = ancestor_bytes
            .iter()
            .map(|bytes| ClassFile::parse(bytes))
            .collect::<Result<Vec<_>>>()?;
        check_lineage(&class, &ancestors);

        let skip = match ancestors.first() {
            Some(root)
                if root.header.name == UNIVERSAL_BASE_INTERNAL
                    && !self.config.include_universal_base() =>
            {
                1
            }
            _ => 0,
        };
        let diagrams = ancestors[skip..]
            .iter()
            .map(|ancestor| self.binary.generate_class(ancestor, &self.config))
            .collect::<Result<Vec<Diagram>>>()?;

        debug!(
            supplied = ancestors.len(),
            chained = diagrams.len(),
            "Chained supplied ancestors"
        );
        Ok(Rendered::Chained(subject.chain_below(diagrams)))
    }
}

/// Warn when the supplied ancestors are not the declared superclass chain
fn check_lineage(class: &ClassFile, ancestors: &[ClassFile]) {
    if ancestors.is_empty() {
        if let Some(super_name) = class.header.super_name.as_deref() {
            if super_name != UNIVERSAL_BASE_INTERNAL {
                warn!(
                    class = class.header.name.as_str(),
                    missing = super_name,
                    "Superclasses requested but no ancestor classes were supplied"
                );
            }
        }
        return;
    }

    let lineage: Vec<&ClassFile> = ancestors.iter().chain(std::iter::once(class)).collect();
    for pair in lineage.windows(2) {
        let (parent, child) = (pair[0], pair[1]);
        if child.header.super_name.as_deref() != Some(parent.header.name.as_str()) {
            warn!(
                class = child.header.name.as_str(),
                declared = child.header.super_name.as_deref().unwrap_or("<none>"),
                supplied = parent.header.name.as_str(),
                "Supplied ancestor is not the declared superclass"
            );
        }
    }
}

/// One-shot [`Orchestrator::generate`]
pub fn generate(config: &Config, input: Input<'_>) -> Result<Rendered> {
    Orchestrator::new(config.clone()).generate(input)
}
