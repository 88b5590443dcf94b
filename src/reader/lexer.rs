use logos::{Logos, SpannedIter};

pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) span: logos::Span,
}

pub(super) struct TokenIter<'a> {
    iter: SpannedIter<'a, LogosTokenKind>,
}

impl<'a> TokenIter<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            iter: LogosTokenKind::lexer(input).spanned(),
        }
    }
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        match self.iter.next() {
            Some((Ok(kind), span)) => {
                let kind = match kind {
                    LogosTokenKind::Word => TokenKind::Word,
                    LogosTokenKind::WS => unreachable!(),
                };
                Some(Token { kind, span })
            }
            Some((Err(_), span)) => Some(Token {
                kind: TokenKind::Error,
                span,
            }),
            None => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TokenKind {
    Word,
    Error,
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
enum LogosTokenKind {
    #[regex(r"[^ \t\r\f\n]+")]
    Word,
    #[regex(r"[ \t\r\f\n]+", logos::skip)]
    WS,
}
