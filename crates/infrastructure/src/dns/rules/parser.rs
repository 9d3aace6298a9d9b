//! A small parser-combinator engine over [`Tokenizer`].
//!
//! Parsers thread the tokenizer through `&mut` and report grammar mismatches
//! as `Err`. Only [`one_of`] rewinds on failure; every other combinator
//! leaves the cursor wherever the failing parser stopped.

use super::tokenizer::{Token, TokenKind, Tokenizer};
use ruledns_domain::CompileError;

pub type ParseResult<T> = Result<T, CompileError>;

pub trait Parser<T> {
    fn parse(&self, input: &mut Tokenizer<'_>) -> ParseResult<T>;

    fn boxed<'a>(self) -> BoxedParser<'a, T>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

pub type BoxedParser<'a, T> = Box<dyn Parser<T> + 'a>;

impl<T, P: Parser<T> + ?Sized> Parser<T> for Box<P> {
    fn parse(&self, input: &mut Tokenizer<'_>) -> ParseResult<T> {
        (**self).parse(input)
    }
}

/// Adapts a closure into a parser.
pub struct FnParser<F>(F);

impl<T, F> Parser<T> for FnParser<F>
where
    F: Fn(&mut Tokenizer<'_>) -> ParseResult<T>,
{
    fn parse(&self, input: &mut Tokenizer<'_>) -> ParseResult<T> {
        (self.0)(input)
    }
}

pub fn from_fn<T, F>(f: F) -> FnParser<F>
where
    F: Fn(&mut Tokenizer<'_>) -> ParseResult<T>,
{
    FnParser(f)
}

/// Consumes any comment tokens at the cursor.
pub fn skip_comments(input: &mut Tokenizer<'_>) {
    while input.peek().kind == TokenKind::Comment {
        input.next_token();
    }
}

/// Next non-comment token, which must be of `kind`.
pub fn expect<'a>(kind: TokenKind) -> BoxedParser<'a, Token> {
    from_fn(move |input: &mut Tokenizer<'_>| {
        skip_comments(input);
        let token = input.next_token();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(CompileError::TokenMismatch {
                expected: kind.as_str(),
                found: token.kind.as_str(),
                text: token.value.to_string(),
                offset: token.start,
            })
        }
    })
    .boxed()
}

pub fn succeed<'a, T: Clone + 'a>(value: T) -> BoxedParser<'a, T> {
    from_fn(move |_: &mut Tokenizer<'_>| Ok(value.clone())).boxed()
}

pub fn fail<'a, T: 'a>(error: CompileError) -> BoxedParser<'a, T> {
    from_fn(move |_: &mut Tokenizer<'_>| -> ParseResult<T> { Err(error.clone()) }).boxed()
}

/// First alternative that succeeds, each tried from the same position.
///
/// When all fail, the cursor is back where it started and the error lists
/// every branch's failure in order.
pub fn one_of<'a, T: 'a>(alternatives: Vec<BoxedParser<'a, T>>) -> BoxedParser<'a, T> {
    from_fn(move |input: &mut Tokenizer<'_>| {
        let start = input.offset();
        let mut errors = Vec::with_capacity(alternatives.len());
        for alternative in &alternatives {
            input.rewind(start);
            match alternative.parse(input) {
                Ok(value) => return Ok(value),
                Err(e) => errors.push(e),
            }
        }
        input.rewind(start);
        Err(CompileError::NoAlternative(errors))
    })
    .boxed()
}

pub fn sequence<'a, T: 'a>(parsers: Vec<BoxedParser<'a, T>>) -> BoxedParser<'a, Vec<T>> {
    from_fn(move |input: &mut Tokenizer<'_>| {
        parsers.iter().map(|parser| parser.parse(input)).collect()
    })
    .boxed()
}

pub fn pair<'a, A: 'a, B: 'a>(
    first: BoxedParser<'a, A>,
    second: BoxedParser<'a, B>,
) -> BoxedParser<'a, (A, B)> {
    from_fn(move |input: &mut Tokenizer<'_>| {
        let a = first.parse(input)?;
        let b = second.parse(input)?;
        Ok((a, b))
    })
    .boxed()
}

pub fn map<'a, A: 'a, B: 'a, F>(f: F, parser: BoxedParser<'a, A>) -> BoxedParser<'a, B>
where
    F: Fn(A) -> B + 'a,
{
    from_fn(move |input: &mut Tokenizer<'_>| parser.parse(input).map(&f)).boxed()
}

/// Like [`map`], but the conversion may reject the value.
pub fn try_map<'a, A: 'a, B: 'a, F>(f: F, parser: BoxedParser<'a, A>) -> BoxedParser<'a, B>
where
    F: Fn(A) -> ParseResult<B> + 'a,
{
    from_fn(move |input: &mut Tokenizer<'_>| parser.parse(input).and_then(&f)).boxed()
}

/// Runs `parser`, then the parser `f` builds from its value, at the position
/// the first one stopped.
pub fn and_then<'a, A: 'a, B: 'a, F>(f: F, parser: BoxedParser<'a, A>) -> BoxedParser<'a, B>
where
    F: Fn(A) -> BoxedParser<'a, B> + 'a,
{
    from_fn(move |input: &mut Tokenizer<'_>| {
        let value = parser.parse(input)?;
        f(value).parse(input)
    })
    .boxed()
}

/// Runs `parser` until the next non-comment token is `stop`, which is left
/// unconsumed.
pub fn repeat_until<'a, T: 'a>(parser: BoxedParser<'a, T>, stop: TokenKind) -> BoxedParser<'a, Vec<T>> {
    from_fn(move |input: &mut Tokenizer<'_>| {
        let mut values = Vec::new();
        loop {
            skip_comments(input);
            let next = input.peek();
            if next.kind == stop {
                return Ok(values);
            }

            let before = input.offset();
            values.push(parser.parse(input)?);
            if input.offset() == before {
                return Err(CompileError::Custom(format!(
                    "Parser made no progress at offset {}",
                    next.start
                )));
            }
        }
    })
    .boxed()
}

/// Parses `source` from the beginning with `parser`.
pub fn run<T>(parser: &dyn Parser<T>, source: &str) -> ParseResult<T> {
    let mut input = Tokenizer::new(source);
    parser.parse(&mut input)
}
