//! Cart minifier — strips comments and insignificant whitespace from the Lua
//! section of a PICO-8 cart and applies renames declared in the source.
//!
//! Renames are declared with a comment of the form
//! `-- replaces: long_name x other_name y`.

use regex::Regex;
use std::sync::LazyLock;

static RE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r*\n").unwrap());
static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());
static RE_REPLACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*--.*replaces: |.*)").unwrap());
static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(^.*-- *debug| *--).*").unwrap());
static RE_COMPOUND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r".*[-+*/%]=.*").unwrap());
static RE_ZERO_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"0 ([g-wyz])").unwrap());
static RE_DIGIT_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([1-9]) ([g-z])").unwrap());
static RE_UNPROTECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" *X[ X]*").unwrap());
static RE_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *([\[\]<>(){}#+*%^/=:!~,\-]) *").unwrap());

/// Lines of cart header preceding the Lua code.
pub const CART_HEADER_LINES: usize = 3;

#[derive(Debug, Clone)]
pub struct MinifyOptions {
    pub skip_header_lines: usize,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self { skip_header_lines: CART_HEADER_LINES }
    }
}

#[derive(Debug, Clone)]
pub struct MinifyResult {
    pub output: String,
    /// (from, to) pairs collected from `replaces:` comments, in source order.
    pub renames: Vec<(String, String)>,
    pub original_len: usize,
    pub minified_len: usize,
}

impl MinifyResult {
    pub fn reduction_pct(&self) -> f64 {
        if self.original_len == 0 {
            return 0.0;
        }
        (self.original_len.saturating_sub(self.minified_len)) as f64 / self.original_len as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Minifier {
    pub options: MinifyOptions,
}

impl Minifier {
    pub fn new(options: MinifyOptions) -> Self {
        Self { options }
    }

    pub fn minify(&self, text: &str) -> MinifyResult {
        let mut lines: Vec<&str> = RE_LINE_BREAK.split(text).collect();
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let skip = self.options.skip_header_lines.min(lines.len());

        let mut renames = Vec::new();
        let mut result = String::new();
        for line in &lines[skip..] {
            renames.extend(parse_renames(line));

            let line = RE_COMMENT.replace_all(line, "");
            // `+=` and friends are expanded per line by the cart runtime, so
            // the statement boundary after them must survive minification.
            let line = RE_COMPOUND.replace(&line, "X ${0} X");

            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(&line);
        }

        for (from, to) in &renames {
            result = rename(&result, from, to);
        }

        let result = RE_SPACES.replace_all(&result, " ");
        let result = RE_ZERO_IDENT.replace_all(&result, "0${1}");
        let result = RE_DIGIT_IDENT.replace_all(&result, "${1}${2}");
        let result = RE_UNPROTECT.replace_all(&result, " ");
        let mut output = RE_SYMBOL.replace_all(&result, "${1}").into_owned();
        output.push('\n');

        tracing::debug!(
            lines = lines.len() - skip,
            renames = renames.len(),
            bytes = output.len(),
            "minified cart"
        );

        MinifyResult {
            original_len: text.len(),
            minified_len: output.len(),
            output,
            renames,
        }
    }
}

/// Minify with default options.
pub fn minify(text: &str) -> MinifyResult {
    Minifier::default().minify(text)
}

/// Rename pairs declared on `line`. Lines without a `replaces:` comment
/// declare nothing.
pub fn parse_renames(line: &str) -> Vec<(String, String)> {
    let list = RE_REPLACES.replace(line, "");
    let words: Vec<&str> = RE_SPACES.split(&list).filter(|w| !w.is_empty()).collect();
    words
        .chunks_exact(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect()
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_'
}

/// Replace identifier `from` with `to` wherever it is not part of a longer
/// name. Occurrences at either end of the text count.
pub fn rename(text: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return text.to_string();
    }
    let re = match Regex::new(&regex::escape(from)) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!(from, error = %e, "skipping rename");
            return text.to_string();
        }
    };

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        let before_ok = m.start() == 0 || !is_ident_byte(bytes[m.start() - 1]);
        let after_ok = m.end() == bytes.len() || !is_ident_byte(bytes[m.end()]);
        if before_ok && after_ok {
            out.push_str(&text[last..m.start()]);
            out.push_str(to);
            last = m.end();
        }
    }
    out.push_str(&text[last..]);
    out
}
