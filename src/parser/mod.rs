pub mod source_code;

use std::path::Path;

use crate::SpanKind;

/// Languages the bundled extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
}

impl SourceLang {
    /// Detect the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLang::JavaScript),
            "ts" | "mts" | "cts" => Some(SourceLang::TypeScript),
            "jsx" => Some(SourceLang::Jsx),
            "tsx" => Some(SourceLang::Tsx),
            _ => None,
        }
    }
}

/// Where a node sits syntactically, as far as checking cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    /// Module specifier of an import/export (`from "./x"`, `require("x")`).
    ModuleSpecifier,
    Other,
}

/// One text-bearing node of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNode {
    pub kind: SpanKind,
    /// Text as written between the delimiters. For templates this is the
    /// raw fragment.
    pub value: String,
    /// Byte range of the whole node, delimiters included.
    pub range: (usize, usize),
    /// Byte offset of `value` within the file.
    pub content_start: usize,
    pub parent: ParentKind,
}

impl HostNode {
    pub fn is_checkable(&self) -> bool {
        !(self.kind == SpanKind::String && self.parent == ParentKind::ModuleSpecifier)
    }
}

/// Extract the text-bearing nodes of a file.
pub fn parse_file(path: &Path, content: &str) -> Option<Vec<HostNode>> {
    SourceLang::from_path(path).map(|lang| source_code::parse(content, lang))
}
