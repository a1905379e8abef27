use std::sync::Arc;

use crate::{
    AnchorKind, AnchorRegistry, DocumentAttributes, ElementAttributes, HEADER, HeaderMetadata,
    InlineRenderer, Location, Logger, Options, Substitute, TracingLogger, VerbatimRenderer,
    header::parse_header_metadata, style::parse_style_attribute_with,
};

/// The per-parse state of one document: its attribute table, the ids registered so
/// far and the collaborators used to report warnings and render inline markup.
///
/// A `Document` is never shared between parses. Independent documents can be
/// processed on different threads.
pub struct Document {
    attributes: DocumentAttributes,
    anchors: AnchorRegistry,
    source: String,
    logger: Arc<dyn Logger>,
    renderer: Box<dyn InlineRenderer>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("attributes", &self.attributes)
            .field("anchors", &self.anchors)
            .field("source", &self.source)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl Document {
    /// Create a document, seeding the attribute table with the host attributes.
    ///
    /// Host attributes are locked, which keeps the document body from changing them,
    /// unless they were configured as soft.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let mut attributes = DocumentAttributes::new();
        for (name, host) in &options.attributes {
            attributes.seed(name, host.value.clone(), !host.soft);
        }
        Self {
            attributes,
            anchors: AnchorRegistry::new(),
            source: options.source.clone(),
            logger: Arc::new(TracingLogger),
            renderer: Box::new(VerbatimRenderer),
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: impl InlineRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    #[must_use]
    pub fn attributes(&self) -> &DocumentAttributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut DocumentAttributes {
        &mut self.attributes
    }

    #[must_use]
    pub fn anchors(&self) -> &AnchorRegistry {
        &self.anchors
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The location of `line` in this document's source.
    #[must_use]
    pub fn location(&self, line: usize) -> Location {
        Location::new(self.source.clone(), line)
    }

    pub fn warn(&self, location: &Location, message: &str) {
        self.logger.warn(location, message);
    }

    /// Report a warning, through the logger when the line is known.
    pub(crate) fn report(&self, location: Option<&Location>, message: &str) {
        if let Some(location) = location {
            self.warn(location, message);
        } else {
            tracing::warn!(source = %self.source, "{message}");
        }
    }

    /// Render inline markup through the configured renderer.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        self.renderer.render(text)
    }

    /// Escape special characters, then resolve attribute references against this
    /// document.
    #[must_use]
    pub fn apply_header_subs(&self, text: &str) -> String {
        text.substitute(HEADER, &self.attributes)
    }

    /// Register an id, warning when it is already in use. Returns whether the id was
    /// new.
    pub fn register_anchor(&mut self, id: &str, kind: AnchorKind, location: &Location) -> bool {
        if self.anchors.register(id, location) {
            return true;
        }
        self.warn(location, &kind.duplicate_message(id));
        false
    }

    /// Decompose the style shorthand of a block, reporting malformed shorthand at
    /// `location`. See [`crate::parse_style_attribute`].
    pub fn parse_style_attribute(
        &self,
        attributes: &mut ElementAttributes,
        location: &Location,
    ) -> Option<String> {
        parse_style_attribute_with(attributes, |message| self.warn(location, message))
    }

    /// Parse the header lines of this document. See [`crate::parse_header_metadata`].
    pub fn parse_header<'a, L: AsRef<str>>(
        &mut self,
        lines: &'a [L],
    ) -> (HeaderMetadata, &'a [L]) {
        parse_header_metadata(lines, Some(self))
    }
}
