use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::config::CheckConfiguration;

// Global identifiers of the JavaScript environments the host lints.
const BUILTIN_GLOBALS: &[&str] = &[
    "AggregateError", "Array", "ArrayBuffer", "Atomics", "BigInt", "BigInt64Array",
    "BigUint64Array", "Boolean", "DataView", "Date", "decodeURI", "decodeURIComponent",
    "encodeURI", "encodeURIComponent", "Error", "escape", "eval", "EvalError",
    "FinalizationRegistry", "Float32Array", "Float64Array", "Function", "globalThis",
    "Infinity", "Int16Array", "Int32Array", "Int8Array", "Intl", "isFinite", "isNaN",
    "JSON", "Map", "Math", "NaN", "Number", "Object", "parseFloat", "parseInt", "Promise",
    "Proxy", "RangeError", "ReferenceError", "Reflect", "RegExp", "Set",
    "SharedArrayBuffer", "String", "Symbol", "SyntaxError", "TypeError", "Uint16Array",
    "Uint32Array", "Uint8Array", "Uint8ClampedArray", "undefined", "unescape", "URIError",
    "WeakMap", "WeakRef", "WeakSet",
];

const BROWSER_GLOBALS: &[&str] = &[
    "addEventListener", "alert", "atob", "Blob", "btoa", "cancelAnimationFrame",
    "clearInterval", "clearTimeout", "console", "CustomEvent", "document", "Element",
    "Event", "EventTarget", "fetch", "File", "FileReader", "FormData", "getComputedStyle",
    "Headers", "history", "HTMLElement", "IntersectionObserver", "localStorage",
    "location", "MutationObserver", "navigator", "Node", "NodeList", "Notification",
    "performance", "postMessage", "removeEventListener", "Request", "requestAnimationFrame",
    "ResizeObserver", "Response", "screen", "sessionStorage", "setInterval", "setTimeout",
    "TextDecoder", "TextEncoder", "URL", "URLSearchParams", "WebSocket", "window",
    "Worker", "XMLHttpRequest",
];

const NODE_GLOBALS: &[&str] = &[
    "__dirname", "__filename", "Buffer", "clearImmediate", "exports", "global", "module",
    "process", "queueMicrotask", "require", "setImmediate", "structuredClone",
];

const WORKER_GLOBALS: &[&str] = &["importScripts", "onmessage", "self", "WorkerGlobalScope"];

// Member names of the builtin objects.
const BUILTIN_MEMBERS: &[&str] = &[
    "apply", "bind", "call", "charAt", "charCodeAt", "codePointAt", "concat", "constructor",
    "copyWithin", "defineProperty", "endsWith", "entries", "every", "fill", "filter", "find",
    "findIndex", "flat", "flatMap", "forEach", "freeze", "fromCharCode", "fromEntries",
    "getOwnPropertyNames", "getPrototypeOf", "hasOwnProperty", "includes", "indexOf",
    "isArray", "isPrototypeOf", "join", "keys", "lastIndexOf", "localeCompare", "map",
    "matchAll", "normalize", "padEnd", "padStart", "pop", "propertyIsEnumerable", "push",
    "reduce", "reduceRight", "repeat", "replaceAll", "reverse", "shift", "slice", "some",
    "sort", "splice", "split", "startsWith", "stringify", "substr", "substring",
    "toFixed", "toLocaleString", "toLowerCase", "toPrecision", "toString", "toUpperCase",
    "trim", "trimEnd", "trimStart", "unshift", "valueOf", "abs", "ceil", "floor", "hypot",
    "max", "min", "pow", "random", "round", "sign", "sqrt", "trunc",
];

// Vocabulary that shows up in code prose but not in general dictionaries.
const PROGRAMMING_WORDS: &[&str] = &[
    "ajax", "api", "apis", "args", "argv", "async", "auth", "bool", "callback", "cb",
    "charset", "cli", "config", "const", "css", "ctx", "dev", "dom", "env", "eslint",
    "func", "href", "html", "http", "https", "init", "js", "json", "jsx", "lang", "len",
    "lib", "localhost", "msg", "namespace", "npm", "num", "obj", "param", "params",
    "pathname", "prev", "readme", "regex", "regexp", "repo", "req", "res", "src", "str",
    "stylesheet", "sql", "tmp", "todo", "fixme", "ts", "tsx", "ui", "uri", "url", "utf",
    "utils", "uuid", "var", "webpack", "xml", "yaml",
];

lazy_static! {
    static ref DEFAULT_SKIP_WORDS: HashSet<String> = [
        BUILTIN_GLOBALS,
        BROWSER_GLOBALS,
        NODE_GLOBALS,
        WORKER_GLOBALS,
        BUILTIN_MEMBERS,
        PROGRAMMING_WORDS,
    ]
    .iter()
    .flat_map(|list| list.iter())
    .map(|word| word.to_lowercase())
    .collect();
}

/// Process-wide baseline every configuration's skip list is unioned with.
/// Built on first use and read-only afterwards.
pub fn default_skip_words() -> &'static HashSet<String> {
    &DEFAULT_SKIP_WORDS
}

/// Decides which values and words are excluded from checking.
pub struct SkipPolicy<'a> {
    config: &'a CheckConfiguration,
}

impl<'a> SkipPolicy<'a> {
    pub fn new(config: &'a CheckConfiguration) -> Self {
        Self { config }
    }

    /// True when `value` must not be checked at all: it is a skip word
    /// (case folded) or matches one of the `skip_if_match` patterns.
    pub fn should_skip_value(&self, value: &str) -> bool {
        self.config.skip_words.contains(&value.to_lowercase())
            || self
                .config
                .skip_if_match
                .iter()
                .any(|pattern| pattern.is_match(value))
    }

    /// Keep predicate for spelling candidates: returns `false` for words that
    /// are too short or match a `skip_word_if_match` pattern, `true` for
    /// words that should be checked.
    pub fn should_skip_word(&self, word: &str) -> bool {
        if word.chars().count() < self.config.min_length {
            return false;
        }
        !self
            .config
            .skip_word_if_match
            .iter()
            .any(|pattern| pattern.is_match(word))
    }

    pub fn is_skip_word(&self, word: &str) -> bool {
        self.config.skip_words.contains(&word.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn config() -> CheckConfiguration {
        CheckConfiguration {
            min_length: 3,
            skip_if_match: vec![Regex::new(r"^https?://").unwrap()],
            skip_word_if_match: vec![Regex::new(r"^[A-Z]{2,}$").unwrap()],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_set_is_case_folded() {
        let words = default_skip_words();
        assert!(words.contains("xmlhttprequest"));
        assert!(words.contains("tolowercase"));
        assert!(words.contains("eslint"));
        assert!(!words.contains("XMLHttpRequest"));
    }

    #[test]
    fn test_should_skip_value() {
        let config = config();
        let policy = SkipPolicy::new(&config);
        assert!(policy.should_skip_value("JSON"));
        assert!(policy.should_skip_value("https://example.com/path"));
        assert!(!policy.should_skip_value("A plain comment"));
    }

    #[test]
    fn test_should_skip_word_is_a_keep_predicate() {
        let config = config();
        let policy = SkipPolicy::new(&config);
        assert!(!policy.should_skip_word("ab"));
        assert!(!policy.should_skip_word("HTTP"));
        assert!(policy.should_skip_word("word"));
    }
}
