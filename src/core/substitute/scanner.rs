//! Argument scanner for marker calls in generated code.
//!
//! Generated bundles are not parsed. Instead, starting right after the
//! opening parenthesis of a marker call, a small state machine walks the
//! text, tracking string and template literal state plus a stack of open
//! delimiters, and cuts the top-level arguments out as raw slices.

use super::SubstituteError;

/// Lexical state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    SingleQuote,
    DoubleQuote,
    TemplateLiteral,
    /// The next character is taken literally, then scanning resumes in the
    /// wrapped state.
    Escape(Resume),
}

/// State to return to after an escaped character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Normal,
    SingleQuote,
    DoubleQuote,
    TemplateLiteral,
}

impl From<Resume> for ScanState {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::Normal => ScanState::Normal,
            Resume::SingleQuote => ScanState::SingleQuote,
            Resume::DoubleQuote => ScanState::DoubleQuote,
            Resume::TemplateLiteral => ScanState::TemplateLiteral,
        }
    }
}

impl ScanState {
    fn resume(self) -> Resume {
        match self {
            ScanState::Normal | ScanState::Escape(_) => Resume::Normal,
            ScanState::SingleQuote => Resume::SingleQuote,
            ScanState::DoubleQuote => Resume::DoubleQuote,
            ScanState::TemplateLiteral => Resume::TemplateLiteral,
        }
    }
}

/// An open delimiter on the scanner's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Paren,
    Bracket,
    Brace,
    /// `${` inside a template literal; its `}` returns to the template.
    TemplateExpr,
}

impl Delimiter {
    fn closer(self) -> u8 {
        match self {
            Delimiter::Paren => b')',
            Delimiter::Bracket => b']',
            Delimiter::Brace | Delimiter::TemplateExpr => b'}',
        }
    }
}

/// A top-level argument of a marker call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument<'a> {
    /// Any expression, as trimmed source text.
    Expr(&'a str),
    /// An array literal, split into its trimmed element expressions.
    Array(Vec<&'a str>),
}

/// A scanned marker call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedCall<'a> {
    pub args: Vec<Argument<'a>>,
    /// Byte offset just past the closing parenthesis.
    pub end: usize,
}

/// An array argument being collected.
struct OpenArray<'a> {
    elements: Vec<&'a str>,
    element_start: usize,
}

/// Scanner over the arguments of one call.
pub struct CallScanner<'a> {
    text: &'a str,
    state: ScanState,
    stack: Vec<Delimiter>,
    args: Vec<Argument<'a>>,
    arg_start: usize,
    array: Option<OpenArray<'a>>,
    /// Elements of the array argument just closed, and the offset after its `]`.
    closed_array: Option<(Vec<&'a str>, usize)>,
}

impl<'a> CallScanner<'a> {
    /// `open` is the byte offset right after the call's `(`.
    pub fn new(text: &'a str, open: usize) -> Self {
        Self {
            text,
            state: ScanState::Normal,
            stack: vec![Delimiter::Paren],
            args: Vec::new(),
            arg_start: open,
            array: None,
            closed_array: None,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Scan up to the matching `)`.
    pub fn scan(mut self) -> Result<ScannedCall<'a>, SubstituteError> {
        let bytes = self.text.as_bytes();
        let mut i = self.arg_start;
        while i < bytes.len() {
            let byte = bytes[i];
            match self.state {
                ScanState::Escape(resume) => self.state = resume.into(),
                _ if byte == b'\\' => self.state = ScanState::Escape(self.state.resume()),
                ScanState::SingleQuote => {
                    if byte == b'\'' {
                        self.state = ScanState::Normal;
                    }
                }
                ScanState::DoubleQuote => {
                    if byte == b'"' {
                        self.state = ScanState::Normal;
                    }
                }
                ScanState::TemplateLiteral => {
                    if byte == b'`' {
                        self.state = ScanState::Normal;
                    } else if byte == b'$' && bytes.get(i + 1) == Some(&b'{') {
                        self.stack.push(Delimiter::TemplateExpr);
                        self.state = ScanState::Normal;
                        i += 1;
                    }
                }
                ScanState::Normal => {
                    if let Some(end) = self.structural(i, byte)? {
                        return Ok(ScannedCall {
                            args: self.args,
                            end,
                        });
                    }
                }
            }
            i += 1;
        }
        Err(SubstituteError::Unbalanced { offset: i })
    }

    /// Handle a character outside of any literal. Returns the end offset
    /// once the call's closing parenthesis is reached.
    fn structural(&mut self, i: usize, byte: u8) -> Result<Option<usize>, SubstituteError> {
        match byte {
            b'\'' => self.state = ScanState::SingleQuote,
            b'"' => self.state = ScanState::DoubleQuote,
            b'`' => self.state = ScanState::TemplateLiteral,
            b'(' => self.stack.push(Delimiter::Paren),
            b'{' => self.stack.push(Delimiter::Brace),
            b'[' => {
                if self.stack.len() == 1 && self.text[self.arg_start..i].trim().is_empty() {
                    self.array = Some(OpenArray {
                        elements: Vec::new(),
                        element_start: i + 1,
                    });
                }
                self.stack.push(Delimiter::Bracket);
            }
            b')' | b']' | b'}' => {
                let open = self
                    .stack
                    .pop()
                    .ok_or(SubstituteError::Unbalanced { offset: i })?;
                if open.closer() != byte {
                    return Err(SubstituteError::Unbalanced { offset: i });
                }
                match open {
                    Delimiter::TemplateExpr => self.state = ScanState::TemplateLiteral,
                    Delimiter::Bracket if self.stack.len() == 1 => self.close_array(i),
                    Delimiter::Paren if self.stack.is_empty() => {
                        self.finish_arg(i);
                        return Ok(Some(i + 1));
                    }
                    _ => {}
                }
            }
            b',' => match self.stack.len() {
                1 => {
                    self.finish_arg(i);
                    self.arg_start = i + 1;
                }
                2 => {
                    if let Some(array) = &mut self.array {
                        array
                            .elements
                            .push(self.text[array.element_start..i].trim());
                        array.element_start = i + 1;
                    }
                }
                _ => {}
            },
            _ => {}
        }
        Ok(None)
    }

    fn close_array(&mut self, i: usize) {
        if let Some(mut array) = self.array.take() {
            let last = self.text[array.element_start..i].trim();
            // `[]` has no elements and `[a, b,]` has no element after the comma.
            if !last.is_empty() {
                array.elements.push(last);
            }
            self.closed_array = Some((array.elements, i + 1));
        }
    }

    fn finish_arg(&mut self, i: usize) {
        let text = self.text[self.arg_start..i].trim();
        match self.closed_array.take() {
            // `[a][0]` or `[a].length` is an expression, not an array argument.
            Some((elements, end)) if self.text[end..i].trim().is_empty() => {
                self.args.push(Argument::Array(elements))
            }
            _ if !text.is_empty() => self.args.push(Argument::Expr(text)),
            _ => {}
        }
    }
}

/// Scan the arguments of the call whose `(` ends right before `open`.
pub fn scan_call(text: &str, open: usize) -> Result<ScannedCall<'_>, SubstituteError> {
    CallScanner::new(text, open).scan()
}
