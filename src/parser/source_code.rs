use crate::parser::{HostNode, ParentKind, SourceLang};
use crate::SpanKind;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "break", "case", "catch", "class", "const",
    "continue", "debugger", "declare", "default", "delete", "do", "else", "enum", "export",
    "extends", "false", "finally", "for", "from", "function", "get", "if", "implements",
    "import", "in", "instanceof", "interface", "keyof", "let", "new", "null", "of",
    "private", "protected", "public", "readonly", "return", "set", "static", "super",
    "switch", "this", "throw", "true", "try", "type", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
];

/// Scan JavaScript-family source for comments, string literals, template
/// fragments and identifiers. Regex literals are not recognized; a `/` is
/// only special when it starts a comment.
///
/// For JSX and TSX the text children of elements are extracted as string
/// nodes, and attribute values are scanned like any other string.
pub fn parse(content: &str, lang: SourceLang) -> Vec<HostNode> {
    let mut scanner = Scanner {
        src: content,
        pos: 0,
        nodes: Vec::new(),
        last_word: None,
        after_require_paren: false,
        jsx: matches!(lang, SourceLang::Jsx | SourceLang::Tsx),
        prev_sig: None,
    };
    scanner.run(false);
    scanner.nodes
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    nodes: Vec<HostNode>,
    last_word: Option<&'a str>,
    // Just saw `require(` or `import(`.
    after_require_paren: bool,
    jsx: bool,
    // Last significant character outside comments. Words count as `a`.
    prev_sig: Option<char>,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Scan code. When `nested`, stop after the `}` that closes the
    /// expression container we were called for.
    fn run(&mut self, nested: bool) {
        let mut depth = 0usize;
        while let Some(ch) = self.peek() {
            let rest = self.rest();
            if rest.starts_with("//") {
                self.line_comment();
            } else if rest.starts_with("/*") {
                self.block_comment();
            } else if ch == '"' || ch == '\'' {
                self.string(ch);
            } else if ch == '`' {
                self.template();
            } else if ch.is_alphabetic() || ch == '_' || ch == '$' {
                self.word();
            } else if ch.is_ascii_digit() {
                self.skip_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
                self.prev_sig = Some('0');
            } else if ch == '<' && self.at_jsx_tag() {
                self.jsx_element();
            } else if nested && ch == '}' && depth == 0 {
                self.pos += 1;
                self.prev_sig = Some('}');
                return;
            } else {
                if !ch.is_whitespace() {
                    match ch {
                        '{' => depth += 1,
                        '}' => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                    self.after_require_paren =
                        ch == '(' && matches!(self.last_word, Some("require" | "import"));
                    if ch != '(' {
                        self.last_word = None;
                    }
                    self.prev_sig = Some(ch);
                }
                self.pos += ch.len_utf8();
            }
        }
    }

    // `<` opens an element only where an expression can start, so `a < b`
    // and TypeScript generics stay code.
    fn at_jsx_tag(&self) -> bool {
        if !self.jsx {
            return false;
        }
        let next = self.rest()[1..].chars().next();
        if !matches!(next, Some(c) if c.is_alphabetic() || c == '>') {
            return false;
        }
        self.last_word == Some("return")
            || matches!(
                self.prev_sig,
                None | Some('(' | ',' | '=' | '?' | ':' | '{' | '[' | '&' | '|' | '!' | ';' | '>')
            )
    }

    fn jsx_element(&mut self) {
        self.pos += 1;
        self.last_word = None;
        self.after_require_paren = false;
        if !self.jsx_tag_rest() {
            self.jsx_children();
        }
        self.last_word = None;
        self.prev_sig = Some('a');
    }

    /// Scan from just inside `<` to past the closing `>`. Returns true when
    /// the element has no children (`/>` or end of input).
    fn jsx_tag_rest(&mut self) -> bool {
        while let Some(ch) = self.peek() {
            match ch {
                '"' | '\'' => self.string(ch),
                '{' => {
                    self.pos += 1;
                    self.run(true);
                }
                '/' if self.rest().starts_with("/>") => {
                    self.pos += 2;
                    return true;
                }
                '>' => {
                    self.pos += 1;
                    return false;
                }
                _ => self.pos += ch.len_utf8(),
            }
        }
        true
    }

    fn jsx_children(&mut self) {
        loop {
            let start = self.pos;
            let stop = self
                .rest()
                .find(['<', '{'])
                .map_or(self.src.len(), |i| self.pos + i);
            let text = &self.src[start..stop];
            let lead = text.len() - text.trim_start().len();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                let content_start = start + lead;
                let content_end = content_start + trimmed.len();
                self.push(
                    SpanKind::String,
                    start,
                    stop,
                    content_start,
                    content_end,
                    ParentKind::Other,
                );
            }
            self.pos = stop;

            match self.peek() {
                None => return,
                Some('{') => {
                    self.pos += 1;
                    self.run(true);
                }
                Some(_) if self.rest().starts_with("</") => {
                    self.pos = self
                        .rest()
                        .find('>')
                        .map_or(self.src.len(), |i| self.pos + i + 1);
                    return;
                }
                Some(_) => self.jsx_element(),
            }
        }
    }

    fn skip_while(&mut self, keep: impl Fn(char) -> bool) {
        let len: usize = self
            .rest()
            .chars()
            .take_while(|&c| keep(c))
            .map(char::len_utf8)
            .sum();
        self.pos += len;
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        let end = self.rest().find('\n').map_or(self.src.len(), |i| self.pos + i);
        self.push(SpanKind::Comment, start, end, start + 2, end, ParentKind::Other);
        self.pos = end;
    }

    fn block_comment(&mut self) {
        let start = self.pos;
        let (content_end, end) = match self.src[start + 2..].find("*/") {
            Some(i) => (start + 2 + i, start + 2 + i + 2),
            None => (self.src.len(), self.src.len()),
        };
        self.push(SpanKind::Comment, start, end, start + 2, content_end, ParentKind::Other);
        self.pos = end;
    }

    fn string(&mut self, quote: char) {
        let start = self.pos;
        let mut escaped = false;
        let mut close = None;
        for (i, c) in self.src[start + 1..].char_indices() {
            let at = start + 1 + i;
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote || c == '\n' {
                close = Some(at);
                break;
            }
        }
        let content_end = close.unwrap_or(self.src.len());
        let end = close.map_or(content_end, |c| c + 1);

        let parent = if self.after_require_paren
            || matches!(self.last_word, Some("from" | "import"))
        {
            ParentKind::ModuleSpecifier
        } else {
            ParentKind::Other
        };
        self.push(SpanKind::String, start, end, start + 1, content_end, parent);

        self.pos = end;
        self.last_word = None;
        self.after_require_paren = false;
        self.prev_sig = Some('"');
    }

    // Each literal fragment between `${...}` substitutions is its own node.
    fn template(&mut self) {
        let start = self.pos;
        let mut fragment_start = start + 1;
        let mut i = start + 1;
        let bytes = self.src.as_bytes();

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'`' => {
                    self.push_template(fragment_start, i);
                    i += 1;
                    self.pos = i;
                    self.last_word = None;
                    self.prev_sig = Some('`');
                    return;
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    self.push_template(fragment_start, i);
                    let mut depth = 0usize;
                    while i < bytes.len() {
                        match bytes[i] {
                            b'{' => depth += 1,
                            b'}' => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                        i += 1;
                    }
                    i += 1;
                    fragment_start = i.min(bytes.len());
                }
                _ => i += 1,
            }
        }

        let end = self.src.len();
        self.push_template(fragment_start, end);
        self.pos = end;
    }

    fn push_template(&mut self, start: usize, end: usize) {
        self.push(SpanKind::Template, start, end, start, end, ParentKind::Other);
    }

    fn word(&mut self) {
        let start = self.pos;
        self.skip_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let word = &self.src[start..self.pos];
        if !KEYWORDS.contains(&word) {
            self.push(SpanKind::Identifier, start, self.pos, start, self.pos, ParentKind::Other);
        }
        self.last_word = Some(word);
        self.after_require_paren = false;
        self.prev_sig = Some('a');
    }

    fn push(
        &mut self,
        kind: SpanKind,
        start: usize,
        end: usize,
        content_start: usize,
        content_end: usize,
        parent: ParentKind,
    ) {
        // Escapes can push the cursor past the end of an unterminated node.
        let content_end = content_end.min(self.src.len());
        let content_start = content_start.min(content_end);
        if content_start == content_end || !self.src.is_char_boundary(content_start) {
            return;
        }
        let Some(value) = self.src.get(content_start..content_end) else {
            return;
        };
        self.nodes.push(HostNode {
            kind,
            value: value.to_string(),
            range: (start, end.min(self.src.len())),
            content_start,
            parent,
        });
    }
}
