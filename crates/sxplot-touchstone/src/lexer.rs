//! Lexical analyzer for Touchstone source text.
//!
//! The lexer converts source text into a stream of [`Token`]s. It never
//! interprets a line; whether a word is an option, a keyword argument or a
//! stray token in the data is decided by the parser. The only lexical error
//! is a keyword whose `[` is not closed on the same line.

use winnow::{
    Parser as _,
    ascii::float,
    combinator::{alt, cut_err, not, peek, preceded, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Diagnostic details attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `! comment text` up to the end of the line
fn comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded('!', take_while(0.., |c| c != '\n' && c != '\r'))
        .map(Token::Comment)
        .parse_next(input)
}

/// `[Keyword Name]`, committed once the `[` is seen
fn keyword<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        '[',
        cut_err(terminated(
            take_while(0.., |c| c != ']' && c != '\n' && c != '\r'),
            ']',
        ))
        .context(LexerDiagnostic {
            code: ErrorCode::E002,
            message: "unterminated keyword",
            help: Some("close the keyword with `]` on the same line"),
            start,
        }),
    )
    .map(|name: &str| Token::Keyword(name.trim()))
    .parse_next(input)
}

/// Numeric literal not followed by a word character
fn number<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    // Keeps `12_21` a single word instead of `12` followed by `_21`
    (float, peek(not(one_of(is_word_char))))
        .map(|(value, _)| Token::Number(value))
        .parse_next(input)
}

fn word<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., is_word_char)
        .map(Token::Word)
        .parse_next(input)
}

/// Whitespace other than newlines; `\r` of CRLF endings lands here
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

fn other<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    any.map(Token::Other).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        comment,
        keyword,
        '#'.value(Token::Hash),
        number, // Must come before word
        word,
        newline, // Must come before whitespace
        whitespace,
        other,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                Err(e) => {
                    let error_pos = input.current_token_start();
                    self.diagnostics.emit(Self::convert_err_mode(e, error_pos));

                    // Skip the rest of the line; the newline itself is kept
                    while input.peek_token().is_some_and(|c| c != '\n') {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Falls back to E001 (unexpected character) when no context is found.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);
            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E001)
            .with_label(span, ErrorCode::E001.description())
    }
}

/// Tokenize Touchstone source, collecting every lexical error.
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    lexer.finish()
}
