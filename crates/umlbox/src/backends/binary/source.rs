//! The binary backend as a [`Source`]

use tracing::{span, Level};

use super::reader::ClassFile;
use super::visitor::MemberCollector;
use crate::core::{assemble, ClassMembers, Config, Diagram, Result, Source};

/// Reads members from raw class-file bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySource;

impl BinarySource {
    pub fn new() -> Self {
        Self
    }

    /// Collect from an already parsed class
    pub fn collect_class(&self, class: &ClassFile, config: &Config) -> Result<ClassMembers> {
        let span = span!(
            Level::DEBUG,
            "collect_binary",
            class = class.header.name.as_str()
        );
        let _enter = span.enter();

        let mut collector = MemberCollector::new(config);
        class.accept(&mut collector)?;
        Ok(collector.finish())
    }

    pub fn generate_class(&self, class: &ClassFile, config: &Config) -> Result<Diagram> {
        let members = self.collect_class(class, config)?;
        Ok(Diagram::new(assemble(members, config)))
    }
}

impl Source for BinarySource {
    type Input = [u8];

    fn collect(&self, bytes: &[u8], config: &Config) -> Result<ClassMembers> {
        let class = ClassFile::parse(bytes)?;
        self.collect_class(&class, config)
    }

    fn name(&self) -> &'static str {
        "binary"
    }
}
