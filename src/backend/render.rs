//! Output renderers
//!
//! Turn a finished [`Translation`] into the text printed by the tool.

use std::fmt::Write;

use serde::Serialize;

use crate::utils::Result;
use crate::Translation;

/// Output backend trait
pub trait Render {
    /// Render every declaration of `translation`
    fn render(&self, translation: &Translation) -> Result<String>;

    /// Name used on the command line
    fn name(&self) -> &str;
}

/// One Rust declaration per line, optionally preceded by its C original
/// and followed by a blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer {
    pub show_c: bool,
}

impl Render for PlainRenderer {
    fn render(&self, translation: &Translation) -> Result<String> {
        let mut output = String::new();
        for (c, rust) in translation.pairs() {
            if self.show_c {
                let _ = writeln!(output, "{}\n{}\n", c, rust);
            } else {
                let _ = writeln!(output, "{}", rust);
            }
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// The declarations wrapped in an `extern "C"` block
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternBlockRenderer {
    /// Put each C original above its declaration as a comment
    pub show_c: bool,
}

impl Render for ExternBlockRenderer {
    fn render(&self, translation: &Translation) -> Result<String> {
        let mut output = String::new();
        output.push_str("extern \"C\" {\n");
        for (c, rust) in translation.pairs() {
            if self.show_c {
                let _ = writeln!(output, "    // {}", c);
            }
            let _ = writeln!(output, "    {}", rust);
        }
        output.push_str("}\n");
        Ok(output)
    }

    fn name(&self) -> &str {
        "extern"
    }
}

#[derive(Debug, Serialize)]
struct Binding<'a> {
    c: &'a str,
    rust: &'a str,
}

/// A pretty-printed JSON array of `{ "c": ..., "rust": ... }` objects
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Render for JsonRenderer {
    fn render(&self, translation: &Translation) -> Result<String> {
        let bindings: Vec<Binding<'_>> = translation
            .pairs()
            .map(|(c, rust)| Binding { c, rust })
            .collect();
        let mut output = serde_json::to_string_pretty(&bindings)?;
        output.push('\n');
        Ok(output)
    }

    fn name(&self) -> &str {
        "json"
    }
}
