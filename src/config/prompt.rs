//! Prompt Formatting
//!
//! Renders the prompt template with variable substitution. Values come from
//! configuration, never from the process environment, so every instance of
//! the terminal shows the same prompt.
//!
//! Supported variables: `$USER`, `$HOST` (or `$HOSTNAME`), `$PWD`.
//! `$$` renders a literal `$`, so `$$USER` renders as `$USER`.

/// Values substituted into the prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVars {
    pub user: String,
    pub host: String,
    pub cwd: String,
}

/// Prompt formatter that handles variable substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFormatter {
    /// The format template
    format: String,
}

impl PromptFormatter {
    /// Create a new prompt formatter with the given format string
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Render the prompt by substituting variables
    pub fn render(&self, vars: &PromptVars) -> String {
        // Longest names first so $HOSTNAME is not read as $HOST + "NAME"
        let table: [(&str, &str); 4] = [
            ("HOSTNAME", vars.host.as_str()),
            ("HOST", vars.host.as_str()),
            ("USER", vars.user.as_str()),
            ("PWD", vars.cwd.as_str()),
        ];

        let mut result = String::with_capacity(self.format.len());
        let mut rest = self.format.as_str();
        while let Some(pos) = rest.find('$') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(escaped) = after.strip_prefix('$') {
                result.push('$');
                rest = escaped;
                continue;
            }

            match table.iter().find(|(name, _)| after.starts_with(name)) {
                Some((name, value)) => {
                    result.push_str(value);
                    rest = &after[name.len()..];
                }
                None => {
                    result.push('$');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        result
    }

    /// Update the format template
    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
    }

    /// Get the current format template
    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for PromptFormatter {
    fn default() -> Self {
        Self::new(super::DEFAULT_PROMPT)
    }
}
