/*!
 * Prompt templates for chat based translation engines.
 */

/// User prompt template for page translation.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// System message sent ahead of every page.
    pub const SYSTEM: &'static str = "You are a helpful assistant for translation.";

    /// Default user instruction; the page text follows on the next line.
    pub const PAGE_TRANSLATOR: &'static str =
        "Please translate the following text from {source_language} to {target_language}:\n{text}";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render the template in one pass; substituted values are embedded verbatim.
    pub fn render(&self, source_language: &str, target_language: &str, text: &str) -> String {
        let placeholders = [
            ("{source_language}", source_language),
            ("{target_language}", target_language),
            ("{text}", text),
        ];

        let mut rendered = String::with_capacity(self.template.len() + text.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let tail = &rest[start..];

            match placeholders.iter().find(|(name, _)| tail.starts_with(name)) {
                Some((name, value)) => {
                    rendered.push_str(value);
                    rest = &tail[name.len()..];
                }
                None => {
                    rendered.push('{');
                    rest = &tail[1..];
                }
            }
        }
        rendered.push_str(rest);

        rendered
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(Self::PAGE_TRANSLATOR)
    }
}
