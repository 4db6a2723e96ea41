use crate::{
    error::{Error, Result},
    extract::extract,
    model::{Model, Process},
    reader::{Extension, load},
};
use log::debug;

/// Namespace of the extension attributes and elements.
pub const EXTENSION_NAMESPACE: &str = "https://agreements.network/bpmn/extensions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    pub extension_namespace: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            extension_namespace: EXTENSION_NAMESPACE.into(),
        }
    }
}

/// Parses one BPMN document at a time and keeps the last successful result.
///
/// ```
/// use bpmn_model::Parser;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut parser = Parser::new();
///     parser.parse(&std::fs::read_to_string("tests/fixtures/formation.bpmn")?)?;
///     for process in parser.processes()? {
///         println!("{} has {} activities", process.id, process.activity_map.len());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    options: ParserOptions,
    parsed: Option<(Model, Vec<Process>)>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            parsed: None,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse `xml` and replace the cached model and processes.
    ///
    /// On error the previously cached result, if any, is kept.
    pub fn parse(&mut self, xml: &str) -> Result<()> {
        let parsed = parse_document(xml, &self.options)?;
        self.parsed = Some(parsed);
        Ok(())
    }

    /// Run [`Parser::parse`] on a blocking task.
    #[cfg(feature = "async")]
    pub async fn parse_async(&mut self, xml: impl Into<String>) -> Result<()> {
        let xml = xml.into();
        let options = self.options.clone();
        let parsed = tokio::task::spawn_blocking(move || parse_document(&xml, &options))
            .await
            .map_err(|e| Error::Task(e.to_string()))??;
        self.parsed = Some(parsed);
        Ok(())
    }

    pub fn model(&self) -> Result<&Model> {
        self.parsed
            .as_ref()
            .map(|(model, _)| model)
            .ok_or(Error::NotParsed)
    }

    /// Processes in document order.
    pub fn processes(&self) -> Result<&[Process]> {
        self.parsed
            .as_ref()
            .map(|(_, processes)| processes.as_slice())
            .ok_or(Error::NotParsed)
    }

    pub fn process(&self, id: &str) -> Result<Option<&Process>> {
        Ok(self.processes()?.iter().find(|p| p.id == id))
    }

    /// Consume the parser and return the cached result.
    pub fn into_parts(self) -> Result<(Model, Vec<Process>)> {
        self.parsed.ok_or(Error::NotParsed)
    }
}

fn parse_document(xml: &str, options: &ParserOptions) -> Result<(Model, Vec<Process>)> {
    debug!("parsing {} bytes", xml.len());
    let root = load(xml)?;
    extract(&root, Extension::new(&options.extension_namespace))
}
