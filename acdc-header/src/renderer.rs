/// Renders inline markup in a header value.
///
/// The header layer calls this exactly once, on an explicit `:author:` value that
/// overrides the author line, before splitting it into name parts.
pub trait InlineRenderer: Send + Sync {
    fn render(&self, text: &str) -> String;
}

/// Returns the text untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerbatimRenderer;

impl InlineRenderer for VerbatimRenderer {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

impl<F> InlineRenderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, text: &str) -> String {
        self(text)
    }
}
