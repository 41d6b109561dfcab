//! Node kinds and the event sink capability.

use bstr::BStr;

use crate::error::ErrorKind;

/// The kind of node reported to the [`Sink`].
///
/// The block kinds are only produced when
/// [`ParseOptions::blocks`](crate::ParseOptions::blocks) is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeKind {
    /// `{` — members follow.
    ObjectBegin,
    /// `}` — the object is complete.
    ObjectEnd,
    /// `[` — elements follow.
    ArrayBegin,
    /// `]` — the array is complete.
    ArrayEnd,
    /// A number; the value is the byte-exact source lexeme.
    Number,
    /// A string; the value carries the decoded content with escape
    /// sequences left raw.
    String,
    /// The literal `true`.
    True,
    /// The literal `false`.
    False,
    /// The literal `null`.
    Null,
    /// `(` — a block; its header and record arrays follow.
    BlockBegin,
    /// `)` — the block is complete.
    BlockEnd,
    /// The block's header array has started.
    HeaderBegin,
    /// The block's header array is complete.
    HeaderEnd,
    /// A record array inside a block has started.
    RecordBegin,
    /// The current record array is complete.
    RecordEnd,
    /// One field name from a block header; the value is the name itself.
    HeaderName,
}

#[cfg(feature = "descriptions")]
impl NodeKind {
    /// A short english description of the node kind.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            NodeKind::ObjectBegin => "object",
            NodeKind::ObjectEnd => "object end",
            NodeKind::ArrayBegin => "array",
            NodeKind::ArrayEnd => "array end",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::True => "true",
            NodeKind::False => "false",
            NodeKind::Null => "null",
            NodeKind::BlockBegin => "block",
            NodeKind::BlockEnd => "block end",
            NodeKind::HeaderBegin => "block header",
            NodeKind::HeaderEnd => "block header end",
            NodeKind::RecordBegin => "block record",
            NodeKind::RecordEnd => "block record end",
            NodeKind::HeaderName => "block header name",
        }
    }
}

/// Receives one call per recognized node.
///
/// The engine builds no tree; hierarchy is reconstructed by the sink
/// through the `parent` handle. On a container-begin event the sink may
/// replace `*parent` with a handle of its own choosing, and every child of
/// that container then receives a clone of it. The engine never interprets
/// handles.
///
/// `name` and `value` are transient: ownership of the underlying storage
/// returns to the engine as soon as `node` returns.
///
/// Returning an `Err` cancels the parse immediately; no further events are
/// emitted and the returned kind is surfaced from the entry point
/// unchanged. [`ErrorKind::SinkAbort`] is the conventional choice.
pub trait Sink {
    /// Opaque parent reference threaded from containers to their children.
    type Handle: Clone;

    /// Handle one node.
    fn node(
        &mut self,
        parent: &mut Option<Self::Handle>,
        kind: NodeKind,
        name: Option<&BStr>,
        value: Option<&BStr>,
    ) -> Result<(), ErrorKind>;
}
