//! Go build constraints.
//!
//! A file belongs to the build when its `_GOOS`/`_GOARCH` name suffixes and
//! its header constraint (`//go:build expr`, or legacy `// +build` lines)
//! are satisfied by the [`BuildContext`]. Unknown tags are false, so a file
//! guarded by `ignore` or a custom tag is left out.

use std::env;
use tracing::trace;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// Target platform the package is loaded for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub cgo: bool,
}

impl Default for BuildContext {
    fn default() -> Self {
        BuildContext::new(host_os(), host_arch())
    }
}

impl BuildContext {
    pub fn new(goos: &str, goarch: &str) -> Self {
        BuildContext {
            goos: goos.to_string(),
            goarch: goarch.to_string(),
            cgo: false,
        }
    }

    /// `GOOS`, `GOARCH` and `CGO_ENABLED` from the environment, as set by
    /// `go generate`. Missing values fall back to the host platform; cgo
    /// defaults to on for native builds only.
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|value| !value.is_empty());
        let goos = var("GOOS").unwrap_or_else(|| host_os().to_string());
        let goarch = var("GOARCH").unwrap_or_else(|| host_arch().to_string());
        let native = goos == host_os() && goarch == host_arch();
        let cgo = match var("CGO_ENABLED") {
            Some(value) => value == "1",
            None => native,
        };
        BuildContext { goos, goarch, cgo }
    }

    /// Whether a single build tag is satisfied.
    pub fn tag_enabled(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch {
            return true;
        }
        match tag {
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "cgo" => self.cgo,
            "gc" => true,
            _ => is_release_tag(tag),
        }
    }

    /// Apply the `name_GOOS_GOARCH.go` / `name_GOOS.go` / `name_GOARCH.go`
    /// convention. A trailing `_test` is ignored.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        let Some(index) = stem.find('_') else {
            return true;
        };
        let mut parts: Vec<&str> = stem[index..].split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }

        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.tag_enabled(parts[n - 2]) && self.tag_enabled(parts[n - 1]);
        }
        match parts.last() {
            Some(last) if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => {
                self.tag_enabled(last)
            }
            _ => true,
        }
    }

    /// Evaluate the constraint lines among a file's header comments.
    ///
    /// A `//go:build` line wins over `// +build` lines. Returns `None` when
    /// the constraint is malformed.
    pub fn matches_header<'a>(&self, comments: impl IntoIterator<Item = &'a str>) -> Option<bool> {
        let mut go_build = None;
        let mut plus_build = Vec::new();
        for comment in comments {
            let comment = comment.trim();
            if let Some(expr) = directive_body(comment, "//go:build") {
                if go_build.is_some() {
                    return None;
                }
                go_build = Some(expr);
            } else if let Some(line) = plus_build_body(comment) {
                plus_build.push(line);
            }
        }

        if let Some(expr) = go_build {
            let result = self.eval_expr(expr);
            trace!(expr, ?result, "go:build constraint");
            return result;
        }
        let mut result = true;
        for line in plus_build {
            result &= self.eval_plus_build(line)?;
        }
        Some(result)
    }

    /// Evaluate a `//go:build` expression such as `linux && (amd64 || arm64)`.
    pub fn eval_expr(&self, expr: &str) -> Option<bool> {
        let tokens = tokenize(expr)?;
        let mut parser = ConstraintParser {
            context: self,
            tokens,
            pos: 0,
        };
        let value = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return None;
        }
        Some(value)
    }

    /// Evaluate one `// +build` line: space separates alternatives, comma
    /// joins required tags.
    fn eval_plus_build(&self, line: &str) -> Option<bool> {
        let mut any = false;
        for option in line.split_whitespace() {
            let mut all = true;
            for term in option.split(',') {
                let (negated, tag) = match term.strip_prefix('!') {
                    Some(tag) => (true, tag),
                    None => (false, term),
                };
                if !is_valid_tag(tag) {
                    return None;
                }
                all &= self.tag_enabled(tag) != negated;
            }
            any |= all;
        }
        Some(any)
    }
}

fn directive_body<'a>(comment: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = comment.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with([' ', '\t']) {
        Some(rest.trim())
    } else {
        None
    }
}

fn plus_build_body(comment: &str) -> Option<&str> {
    let body = comment.strip_prefix("//")?.trim_start();
    directive_body(body, "+build")
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

/// `go1.N` release tags. The toolchain version is unknown here, so every
/// Go 1 release is considered reached.
fn is_release_tag(tag: &str) -> bool {
    tag.strip_prefix("go1.")
        .is_some_and(|minor| !minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit()))
}

// =============================================================================
// Expression parsing
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    Tag(&'a str),
    Or,
    And,
    Not,
    OpenParen,
    CloseParen,
}

fn tokenize(expr: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = expr.trim_start();
    while let Some(c) = rest.chars().next() {
        let (token, len) = match c {
            '(' => (Token::OpenParen, 1),
            ')' => (Token::CloseParen, 1),
            '!' => (Token::Not, 1),
            '|' if rest.starts_with("||") => (Token::Or, 2),
            '&' if rest.starts_with("&&") => (Token::And, 2),
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let len = rest
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                    .unwrap_or(rest.len());
                (Token::Tag(&rest[..len]), len)
            }
            _ => return None,
        };
        tokens.push(token);
        rest = rest[len..].trim_start();
    }
    Some(tokens)
}

struct ConstraintParser<'a> {
    context: &'a BuildContext,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl ConstraintParser<'_> {
    fn eat(&mut self, token: Token<'_>) -> bool {
        if self.tokens.get(self.pos) == Some(&token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Option<bool> {
        let mut value = self.parse_and()?;
        while self.eat(Token::Or) {
            value |= self.parse_and()?;
        }
        Some(value)
    }

    fn parse_and(&mut self) -> Option<bool> {
        let mut value = self.parse_not()?;
        while self.eat(Token::And) {
            value &= self.parse_not()?;
        }
        Some(value)
    }

    fn parse_not(&mut self) -> Option<bool> {
        if self.eat(Token::Not) {
            return self.parse_not().map(|value| !value);
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Option<bool> {
        if self.eat(Token::OpenParen) {
            let value = self.parse_or()?;
            return self.eat(Token::CloseParen).then_some(value);
        }
        match self.tokens.get(self.pos).copied() {
            Some(Token::Tag(tag)) => {
                self.pos += 1;
                Some(self.context.tag_enabled(tag))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Host platform
// =============================================================================

fn host_os() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn host_arch() -> &'static str {
    match env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "wasm32" => "wasm",
        "powerpc" => "ppc",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "mips64" if cfg!(target_endian = "little") => "mips64le",
        "mips" if cfg!(target_endian = "little") => "mipsle",
        other => other,
    }
}

#[cfg(test)]
#[path = "tests/build_tags_tests.rs"]
mod build_tags_tests;
