//! HCL structural parser
//!
//! This module parses configuration text into a `hclsense_ast::File`.
//!
//! # Supported Syntax
//!
//! - Attributes: `name = expression`
//! - Blocks: `type "label" other_label { ... }`, including one-line blocks
//! - Comments: `# line`, `// line`, `/* block */`
//! - Expressions are not evaluated. They run to the end of the line at
//!   bracket depth zero, honouring strings, templates and heredocs.
//!   `null`, booleans, numbers and plain strings become literals; anything
//!   else keeps its source text.
//!
//! # Example
//!
//! ```
//! use hclsense_core::parse;
//!
//! let file = parse("provider \"aws\" {\n  region = \"eu-west-1\"\n}\n", "main.tf").unwrap();
//! assert_eq!(file.body.blocks[0].type_name, "provider");
//! assert!(file.body.blocks[0].body.has_attribute("region"));
//! ```

use hclsense_ast::{Attribute, Block, Body, ExprKind, Expression, File, Pos, Range, Value};

use crate::error::{ParseError, Result};

/// Parse a document
///
/// `filename` is recorded in every range of the resulting tree.
pub fn parse(source: &str, filename: &str) -> Result<File> {
    Parser::new(source, filename).parse_file()
}

/// Character-level recursive descent parser
struct Parser<'a> {
    source: &'a str,
    filename: String,
    /// Byte offset and character for every character of the source
    chars: Vec<(usize, char)>,
    index: usize,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, filename: &str) -> Self {
        Self {
            source,
            filename: filename.to_string(),
            chars: source.char_indices().collect(),
            index: 0,
            line: 1,
            column: 1,
        }
    }

    fn parse_file(mut self) -> Result<File> {
        let mut body = Body::new(Range::default());
        self.parse_body_contents(&mut body, None)?;
        body.range = self.range(Pos::start(), self.pos());

        Ok(File {
            filename: self.filename,
            body,
        })
    }

    /// Parse attributes and blocks until end of input or a closing brace
    ///
    /// `open` carries the type and opening brace position of the enclosing
    /// block; `None` means the file's root body.
    fn parse_body_contents(&mut self, body: &mut Body, open: Option<(&str, Pos)>) -> Result<()> {
        loop {
            self.skip_trivia()?;

            match self.peek() {
                None => {
                    return match open {
                        Some((block_type, pos)) => Err(ParseError::UnclosedBlock {
                            block_type: block_type.to_string(),
                            pos,
                        }),
                        None => Ok(()),
                    };
                }
                Some('}') => {
                    if open.is_some() {
                        return Ok(());
                    }
                    return Err(ParseError::UnexpectedClosingBrace { pos: self.pos() });
                }
                Some(c) if is_ident_start(c) => self.parse_item(body, open.is_some())?,
                Some(c) => {
                    return Err(ParseError::UnexpectedCharacter {
                        found: c,
                        expected: "attribute or block",
                        pos: self.pos(),
                    })
                }
            }
        }
    }

    /// Parse one attribute or block starting at an identifier
    fn parse_item(&mut self, body: &mut Body, in_block: bool) -> Result<()> {
        let start = self.pos();
        let name = self.parse_identifier();
        self.skip_inline_trivia()?;

        match self.peek() {
            Some('=') if self.peek_at(1) != Some('=') => {
                self.bump();
                self.skip_inline_trivia()?;
                let expr = self.parse_expression()?;
                let range = self.range(start, expr.range.end);
                self.expect_item_end(in_block)?;

                if let Some(previous) = body.attribute(&name) {
                    let previous = previous.range.start;
                    return Err(ParseError::DuplicateAttribute {
                        name,
                        pos: start,
                        previous,
                    });
                }
                body.insert_attribute(Attribute::new(name, expr, range));
                Ok(())
            }
            Some(c) if c == '"' || c == '{' || is_ident_start(c) => {
                self.parse_block(body, name, start, in_block)
            }
            Some(c) => Err(ParseError::UnexpectedCharacter {
                found: c,
                expected: "'=' or block",
                pos: self.pos(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: "'=' or block",
                pos: self.pos(),
            }),
        }
    }

    fn parse_block(
        &mut self,
        body: &mut Body,
        type_name: String,
        start: Pos,
        in_block: bool,
    ) -> Result<()> {
        let mut labels = Vec::new();
        loop {
            match self.peek() {
                Some('{') => break,
                Some('"') => labels.push(self.parse_label()?),
                Some(c) if is_ident_start(c) => labels.push(self.parse_identifier()),
                Some(c) => {
                    return Err(ParseError::UnexpectedCharacter {
                        found: c,
                        expected: "block label or '{'",
                        pos: self.pos(),
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEof {
                        expected: "block label or '{'",
                        pos: self.pos(),
                    })
                }
            }
            self.skip_inline_trivia()?;
        }

        let open = self.pos();
        self.bump();
        let mut block_body = Body::new(Range::default());
        self.parse_body_contents(&mut block_body, Some((type_name.as_str(), open)))?;
        self.bump();
        let end = self.pos();
        block_body.range = self.range(open, end);
        self.expect_item_end(in_block)?;

        body.blocks.push(Block {
            type_name,
            labels,
            body: block_body,
            range: self.range(start, end),
        });
        Ok(())
    }

    fn parse_label(&mut self) -> Result<String> {
        let start = self.pos();
        self.skip_string()?;
        unquote(self.slice(start, self.pos())).ok_or(ParseError::InvalidLabel { pos: start })
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.pos();
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        self.slice(start, self.pos()).to_string()
    }

    /// Scan an expression up to the end of its line at bracket depth zero
    fn parse_expression(&mut self) -> Result<Expression> {
        let start = self.pos();
        let mut end = start;
        let mut depth = 0usize;

        loop {
            match self.peek() {
                None => break,
                Some('\n') | Some('}') if depth == 0 => break,
                Some(_) if self.at_comment() => {
                    if depth == 0 {
                        break;
                    }
                    self.skip_comment()?;
                }
                Some('"') => {
                    self.skip_string()?;
                    end = self.pos();
                }
                Some('<') if self.at_heredoc() => {
                    self.skip_heredoc()?;
                    end = self.pos();
                }
                Some(c) => {
                    match c {
                        '(' | '[' | '{' => depth += 1,
                        ')' | ']' | '}' => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                    self.bump();
                    if !c.is_whitespace() {
                        end = self.pos();
                    }
                }
            }
        }

        if end == start {
            return Err(match self.peek() {
                Some(found) => ParseError::UnexpectedCharacter {
                    found,
                    expected: "expression",
                    pos: start,
                },
                None => ParseError::UnexpectedEof {
                    expected: "expression",
                    pos: start,
                },
            });
        }

        let text = self.slice(start, end);
        Ok(Expression {
            kind: classify_expression(text),
            range: self.range(start, end),
        })
    }

    /// After an item only a comment, a newline, end of input or (inside a
    /// block) the closing brace may follow
    fn expect_item_end(&mut self, in_block: bool) -> Result<()> {
        self.skip_inline_trivia()?;
        match self.peek() {
            None | Some('\n') => Ok(()),
            Some('}') if in_block => Ok(()),
            Some(found) => Err(ParseError::UnexpectedCharacter {
                found,
                expected: "newline",
                pos: self.pos(),
            }),
        }
    }

    fn skip_string(&mut self) -> Result<()> {
        let start = self.pos();
        self.bump();

        loop {
            match self.bump() {
                None | Some('\n') => return Err(ParseError::UnterminatedString { pos: start }),
                Some('"') => return Ok(()),
                Some('\\') => {
                    self.bump();
                }
                Some(c @ ('$' | '%')) => {
                    if self.peek() == Some(c) {
                        // `$${` and `%%{` are escapes, not templates
                        self.bump();
                    } else if self.peek() == Some('{') {
                        self.bump();
                        self.skip_template(start)?;
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn skip_template(&mut self, string_start: Pos) -> Result<()> {
        let mut depth = 1usize;
        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedString { pos: string_start }),
                Some('"') => self.skip_string()?,
                Some('{') => {
                    depth += 1;
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn at_heredoc(&self) -> bool {
        if self.peek() != Some('<') || self.peek_at(1) != Some('<') {
            return false;
        }
        match self.peek_at(2) {
            Some('-') => self.peek_at(3).is_some_and(is_ident_start),
            Some(c) => is_ident_start(c),
            None => false,
        }
    }

    fn skip_heredoc(&mut self) -> Result<()> {
        let start = self.pos();
        self.bump();
        self.bump();
        if self.peek() == Some('-') {
            self.bump();
        }
        let marker = self.parse_identifier();

        self.skip_to_line_end();
        if self.bump().is_none() {
            return Err(ParseError::UnterminatedHeredoc { marker, pos: start });
        }

        loop {
            let line_start = self.pos();
            self.skip_to_line_end();
            if self.slice(line_start, self.pos()).trim() == marker {
                return Ok(());
            }
            if self.bump().is_none() {
                return Err(ParseError::UnterminatedHeredoc { marker, pos: start });
            }
        }
    }

    fn skip_to_line_end(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.bump();
        }
    }

    fn at_comment(&self) -> bool {
        match self.peek() {
            Some('#') => true,
            Some('/') => matches!(self.peek_at(1), Some('/') | Some('*')),
            _ => false,
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        if self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            let start = self.pos();
            self.bump();
            self.bump();
            loop {
                match self.peek() {
                    None => return Err(ParseError::UnterminatedComment { pos: start }),
                    Some('*') if self.peek_at(1) == Some('/') => {
                        self.bump();
                        self.bump();
                        return Ok(());
                    }
                    Some(_) => {
                        self.bump();
                    }
                }
            }
        }
        self.skip_to_line_end();
        Ok(())
    }

    /// Skip spaces, tabs and comments, stopping at a newline
    fn skip_inline_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\u{feff}') => {
                    self.bump();
                }
                Some(_) if self.at_comment() => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Skip whitespace, comments and newlines
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            self.skip_inline_trivia()?;
            if self.peek() != Some('\n') {
                return Ok(());
            }
            self.bump();
        }
    }

    fn pos(&self) -> Pos {
        let byte = self
            .chars
            .get(self.index)
            .map(|(byte, _)| *byte)
            .unwrap_or(self.source.len());
        Pos::new(self.line, self.column, byte)
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn slice(&self, start: Pos, end: Pos) -> &'a str {
        &self.source[start.byte..end.byte]
    }

    fn range(&self, start: Pos, end: Pos) -> Range {
        Range::new(self.filename.clone(), start, end)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn classify_expression(text: &str) -> ExprKind {
    match text {
        "null" => ExprKind::Literal(Value::Null),
        "true" => ExprKind::Literal(Value::Bool(true)),
        "false" => ExprKind::Literal(Value::Bool(false)),
        _ => {
            if let Some(number) = parse_number(text) {
                return ExprKind::Literal(Value::Number(number));
            }
            match unquote(text) {
                Some(s) => ExprKind::Literal(Value::String(s)),
                None => ExprKind::Raw(text.to_string()),
            }
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let leading_digit = match first {
        '-' => chars.next().is_some_and(|c| c.is_ascii_digit()),
        c => c.is_ascii_digit(),
    };
    if !leading_digit
        || !text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    text.parse().ok()
}

/// Decode a quoted string without templates
///
/// Returns `None` if `text` is not exactly one quoted string or contains an
/// interpolation or directive.
fn unquote(text: &str) -> Option<String> {
    let inner: Vec<char> = text.strip_prefix('"')?.strip_suffix('"')?.chars().collect();
    let mut out = String::with_capacity(inner.len());
    let mut i = 0;

    while i < inner.len() {
        let c = inner[i];
        match c {
            '"' => return None,
            '\\' => {
                i += 1;
                match *inner.get(i)? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    'u' => {
                        out.push(decode_unicode(inner.get(i + 1..i + 5)?)?);
                        i += 4;
                    }
                    'U' => {
                        out.push(decode_unicode(inner.get(i + 1..i + 9)?)?);
                        i += 8;
                    }
                    _ => return None,
                }
            }
            '$' | '%' => match (inner.get(i + 1), inner.get(i + 2)) {
                (Some(&next), Some('{')) if next == c => {
                    out.push(c);
                    out.push('{');
                    i += 2;
                }
                (Some('{'), _) => return None,
                _ => out.push(c),
            },
            _ => out.push(c),
        }
        i += 1;
    }

    Some(out)
}

fn decode_unicode(digits: &[char]) -> Option<char> {
    let hex: String = digits.iter().collect();
    char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
}
