//! Status codes and the positioned parse error.

use thiserror::Error;

/// Everything that can cut a parse short.
///
/// A value of this type names the *cause*; [`ParseError`] pairs it with the
/// input position at which the cause was detected. Sinks and refill sources
/// also speak this type: whatever `ErrorKind` a collaborator returns is
/// propagated out of the entry point unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The event sink refused an event and aborted the parse.
    #[error("the event sink aborted the parse")]
    SinkAbort,
    /// The refill source failed to produce its next chunk.
    #[error("the input source failed to produce a chunk")]
    InputFailed,
    /// There was no input to parse at all.
    #[error("there was no input provided")]
    NoInput,
    /// The input does not form a valid document.
    #[error("the input is not valid")]
    BadInput,
    /// Expected `:` after an object member name.
    #[error("expected ':' after an object member name")]
    ExpectedColon,
    /// Expected `,` between two elements or members.
    #[error("expected ',' between elements")]
    ExpectedComma,
    /// A string ran out of input before its closing quote.
    #[error("expected a closing '\"'")]
    ExpectedQuote,
    /// `\` was followed by an unrecognized escape character.
    #[error("expected a valid escape character")]
    ExpectedEscape,
    /// `\u` was not followed by four hexadecimal digits.
    #[error("expected four hex digits after \\u")]
    ExpectedHexDigit,
    /// A number production required a digit that was not there.
    #[error("expected a digit in a number")]
    ExpectedDigit,
    /// A collaborator broke its side of the parse contract.
    #[error("a collaborator broke the parse contract")]
    Contract,
    /// The allocator failed to return the requested storage.
    #[error("the allocator failed to return the requested storage")]
    AllocFailed,
    /// A literal started like `true`/`false`/`null` but deviated.
    #[error("invalid literal")]
    BadLiteral,
    /// A raw control character appeared inside a string.
    #[error("control characters are not allowed inside strings")]
    ControlChar,
    /// Non-whitespace input remained after the top-level value.
    #[error("input remaining after the top-level value")]
    TrailingInput,
    /// A block record's element count differs from its header's.
    #[error("block arrays must all match the header's element count")]
    BlockArity,
}

/// A hard parse failure, positioned in the input stream.
///
/// `offset` is the global byte offset of the offending input (counted across
/// refills); `line` and `column` are 1-based and track `\n` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Byte offset into the overall stream.
    pub offset: usize,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based column of the offending byte.
    pub column: usize,
}
