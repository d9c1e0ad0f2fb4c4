//! PHP message files: `<?php return ['source' => 'translation', ...];`
//!
//! Only the subset of PHP that message files use is understood: a single
//! `return` of an array literal whose keys and values are string (or
//! integer) literals, with comments anywhere between tokens.

use super::HEADER_LINES;
use crate::types::Catalog;

/// Parse the content of a PHP message file into entries in file order
pub fn parse(content: &str) -> Result<Vec<(String, String)>, String> {
    let mut parser = PhpParser::new(content);
    parser.parse_file()
}

/// Render a catalog as a PHP message file, header comment included
pub fn render(catalog: &Catalog) -> String {
    let mut out = String::from("<?php\n/**\n");
    for line in HEADER_LINES {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(" */\nreturn ");

    if catalog.is_empty() {
        out.push_str("[]");
    } else {
        out.push_str("[\n");
        for (source, translation) in catalog.iter() {
            out.push_str("    ");
            out.push_str(&quote(source));
            out.push_str(" => ");
            out.push_str(&quote(translation));
            out.push_str(",\n");
        }
        out.push(']');
    }
    out.push_str(";\n");
    out
}

/// Single-quoted PHP string literal
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

struct PhpParser {
    chars: Vec<char>,
    pos: usize,
}

impl PhpParser {
    fn new(content: &str) -> Self {
        Self {
            chars: content.trim_start_matches('\u{feff}').chars().collect(),
            pos: 0,
        }
    }

    fn parse_file(&mut self) -> Result<Vec<(String, String)>, String> {
        self.skip_whitespace();
        if !self.eat_keyword("<?php") {
            return Err("Expected '<?php' at start of file".to_string());
        }
        self.skip_trivia();

        if !self.eat_keyword("return") {
            return Err(self.error("Expected 'return'"));
        }
        self.skip_trivia();

        let closer = if self.eat('[') {
            ']'
        } else if self.eat_keyword("array") {
            self.skip_trivia();
            if !self.eat('(') {
                return Err(self.error("Expected '(' after 'array'"));
            }
            ')'
        } else {
            return Err(self.error("Expected an array literal after 'return'"));
        };

        let entries = self.parse_items(closer)?;

        self.skip_trivia();
        self.eat(';');
        self.skip_trivia();
        self.eat_keyword("?>");
        self.skip_trivia();
        if self.pos < self.chars.len() {
            return Err(self.error("Unexpected content after array literal"));
        }

        Ok(entries)
    }

    fn parse_items(&mut self, closer: char) -> Result<Vec<(String, String)>, String> {
        let mut entries = Vec::new();
        loop {
            self.skip_trivia();
            if self.eat(closer) {
                return Ok(entries);
            }

            let key = self.parse_key()?;
            self.skip_trivia();
            if !self.eat_keyword("=>") {
                return Err(self.error("Expected '=>' after array key"));
            }
            self.skip_trivia();
            let value = self.parse_value()?;
            entries.push((key, value));

            self.skip_trivia();
            if self.eat(',') {
                continue;
            }
            if self.eat(closer) {
                return Ok(entries);
            }
            return Err(self.error(&format!("Expected ',' or '{}'", closer)));
        }
    }

    fn parse_key(&mut self) -> Result<String, String> {
        match self.peek() {
            Some('\'') | Some('"') => self.parse_string(),
            Some(c) if c.is_ascii_digit() || c == '-' => Ok(self.parse_integer()),
            _ => Err(self.error("Expected a string or integer key")),
        }
    }

    fn parse_value(&mut self) -> Result<String, String> {
        match self.peek() {
            Some('\'') | Some('"') => self.parse_string(),
            _ if self.eat_keyword_ci("null") => Ok(String::new()),
            _ => Err(self.error("Expected a string value")),
        }
    }

    fn parse_integer(&mut self) -> String {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn parse_string(&mut self) -> Result<String, String> {
        let quote = self.chars[self.pos];
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();

        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let Some(next) = self.peek() else {
                break;
            };
            if quote == '\'' {
                match next {
                    '\\' | '\'' => {
                        out.push(next);
                        self.pos += 1;
                    }
                    _ => out.push('\\'),
                }
            } else {
                self.pos += 1;
                match next {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'v' => out.push('\u{0b}'),
                    'e' => out.push('\u{1b}'),
                    'f' => out.push('\u{0c}'),
                    '\\' | '$' | '"' => out.push(next),
                    'u' if self.peek() == Some('{') => out.push(self.parse_unicode_escape()?),
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
        }

        self.pos = start;
        Err(self.error("Unterminated string literal"))
    }

    /// `\u{1F600}`, positioned on the opening brace
    fn parse_unicode_escape(&mut self) -> Result<char, String> {
        self.pos += 1;
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        let hex: String = self.chars[start..self.pos].iter().collect();
        if !self.eat('}') {
            return Err(self.error("Unterminated unicode escape"));
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(&format!("Invalid unicode escape '\\u{{{}}}'", hex)))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if self.starts_with("//") || self.starts_with("#") {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if self.starts_with("/*") {
                self.pos += 2;
                while self.pos < self.chars.len() && !self.starts_with("*/") {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.chars.len());
            } else {
                return;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut i = self.pos;
        for c in s.chars() {
            if self.chars.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.starts_with(keyword) {
            self.pos += keyword.chars().count();
            true
        } else {
            false
        }
    }

    fn eat_keyword_ci(&mut self, keyword: &str) -> bool {
        let len = keyword.chars().count();
        if self.pos + len > self.chars.len() {
            return false;
        }
        let word: String = self.chars[self.pos..self.pos + len].iter().collect();
        if word.eq_ignore_ascii_case(keyword) {
            self.pos += len;
            true
        } else {
            false
        }
    }

    fn error(&self, message: &str) -> String {
        let line = self.chars[..self.pos.min(self.chars.len())]
            .iter()
            .filter(|&&c| c == '\n')
            .count()
            + 1;
        format!("{} (line {})", message, line)
    }
}
