//! The recursive-descent engine: value dispatch, container productions,
//! and the entry points.
//!
//! The engine builds no tree. Each recognized node is reported to the
//! caller's [`Sink`] as it completes, with buffers for decoded names and
//! values obtained from the caller's [`Allocator`] and handed back before
//! the owning production returns. The only state is the recursion stack,
//! the cursor, and the buffers currently owned by live productions.
//!
//! Cancellation is cooperative: the first `Err` from the sink, the refill
//! source, or the allocator unwinds the whole call stack, with every frame
//! releasing exactly the buffers it allocated on the way out.

mod literal;
mod number;
mod string;


use alloc::{string::ToString, vec::Vec};

use bstr::BStr;

use crate::{
    allocator::{Allocator, HeapAllocator, Purpose, Scratch},
    error::{ErrorKind, ParseError},
    event::{NodeKind, Sink},
    input::{Cursor, NoMoreInput, Refill},
    options::ParseOptions,
};

/// Outcome of offering the input to a lexer that may not apply.
///
/// `NotApplicable` is only ever produced before the lexer has consumed
/// anything; once a lexer commits past a distinguishing prefix, failure is
/// a hard error instead. The dispatcher relies on this to try alternatives
/// in order, and never lets `NotApplicable` escape past itself.
pub(crate) enum Lexed {
    Matched,
    NotApplicable,
}

/// Parse a complete in-memory document with the default allocator and
/// options.
///
/// # Errors
///
/// Returns the positioned [`ParseError`] of the first hard failure.
///
/// # Examples
///
/// ```
/// use bstr::BStr;
/// use jsonblocks::{ErrorKind, NodeKind, Sink};
///
/// struct Count(usize);
///
/// impl Sink for Count {
///     type Handle = ();
///     fn node(
///         &mut self,
///         _parent: &mut Option<()>,
///         _kind: NodeKind,
///         _name: Option<&BStr>,
///         _value: Option<&BStr>,
///     ) -> Result<(), ErrorKind> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
///
/// let mut sink = Count(0);
/// jsonblocks::parse(b"[1, 2, 3]", &mut sink).unwrap();
/// assert_eq!(sink.0, 5);
/// ```
pub fn parse<S: Sink>(input: &[u8], sink: &mut S) -> Result<(), ParseError> {
    parse_with(
        Some(input),
        &mut NoMoreInput,
        sink,
        &mut HeapAllocator,
        ParseOptions::default(),
    )
}

/// Parse with an explicit refill source, allocator, and options.
///
/// When `initial` is `None` the refill source is invoked once before
/// parsing begins. The top level must hold exactly one object, array, or
/// (when enabled) block; anything after it except whitespace is
/// [`ErrorKind::TrailingInput`].
///
/// # Errors
///
/// Returns the positioned [`ParseError`] of the first hard failure,
/// including any `ErrorKind` a collaborator returned, unchanged.
pub fn parse_with<R, S, A>(
    initial: Option<&[u8]>,
    refill: &mut R,
    sink: &mut S,
    alloc: &mut A,
    options: ParseOptions,
) -> Result<(), ParseError>
where
    R: Refill + ?Sized,
    S: Sink,
    A: Allocator,
{
    let cur = Cursor::new(initial, refill)?;
    let mut parse = Parse {
        cur,
        sink,
        alloc,
        options,
    };
    let root: Option<S::Handle> = None;
    parse.any(true, &root, None)?;
    parse.cur.skip_ws()?;
    if parse.cur.peek().is_some() {
        return Err(parse.cur.fail(ErrorKind::TrailingInput));
    }
    Ok(())
}

/// Which production an array is being driven for.
enum Mode<'h, A: Allocator> {
    /// Ordinary JSON array; elements get ordinal names.
    Plain,
    /// A block's first array; elements must be strings and move into the
    /// header table.
    Header(&'h mut HeaderTable<A>),
    /// A subsequent block array; elements are named from the header.
    Record(&'h HeaderTable<A>),
}

/// Field names collected from a block's header array, in order.
///
/// Owns its name buffers; the block parser releases them on every exit
/// path, arity failures included.
struct HeaderTable<A: Allocator> {
    names: Vec<Scratch<A>>,
}

impl<A: Allocator> HeaderTable<A> {
    fn new() -> Self {
        Self { names: Vec::new() }
    }

    fn release(&mut self, alloc: &mut A) {
        for name in self.names.drain(..) {
            name.release(alloc);
        }
    }
}

pub(crate) struct Parse<'a, R: ?Sized, S, A> {
    pub(crate) cur: Cursor<'a, R>,
    pub(crate) sink: &'a mut S,
    pub(crate) alloc: &'a mut A,
    pub(crate) options: ParseOptions,
}

impl<R, S, A> Parse<'_, R, S, A>
where
    R: Refill + ?Sized,
    S: Sink,
    A: Allocator,
{
    fn emit(
        &mut self,
        parent: &mut Option<S::Handle>,
        kind: NodeKind,
        name: Option<&[u8]>,
        value: Option<&[u8]>,
    ) -> Result<(), ParseError> {
        self.sink
            .node(parent, kind, name.map(BStr::new), value.map(BStr::new))
            .map_err(|kind| self.cur.fail(kind))
    }

    pub(crate) fn push_out(
        &mut self,
        out: &mut Scratch<A>,
        byte: u8,
    ) -> Result<(), ParseError> {
        out.push(self.alloc, byte).map_err(|kind| self.cur.fail(kind))
    }

    /// Classify the next token and route to the matching production.
    fn any(
        &mut self,
        top: bool,
        parent: &Option<S::Handle>,
        name: Option<&[u8]>,
    ) -> Result<(), ParseError> {
        self.cur.skip_ws()?;
        match self.cur.peek() {
            Some(b'{') => self.object(parent, name),
            Some(b'[') => self.array(parent, name, Mode::Plain).map(|_| ()),
            Some(b'(') if self.options.blocks => self.block(parent, name),
            None if top => Err(self.cur.fail(ErrorKind::NoInput)),
            None => Err(self.cur.fail(ErrorKind::BadInput)),
            Some(_) if top => Err(self.cur.fail(ErrorKind::BadInput)),
            Some(_) => self.scalar(parent, name),
        }
    }

    /// `{` ( member (`,` member)* )? `}`
    fn object(
        &mut self,
        parent: &Option<S::Handle>,
        name: Option<&[u8]>,
    ) -> Result<(), ParseError> {
        let mut slot = parent.clone();
        self.emit(&mut slot, NodeKind::ObjectBegin, name, None)?;
        self.cur.bump()?;
        self.cur.skip_ws()?;
        let mut first = true;
        while self.cur.peek() != Some(b'}') {
            if self.cur.peek().is_none() {
                return Err(self.cur.fail(ErrorKind::BadInput));
            }
            if !first {
                if self.cur.peek() != Some(b',') {
                    return Err(self.cur.fail(ErrorKind::ExpectedComma));
                }
                self.cur.bump()?;
                self.cur.skip_ws()?;
            }
            first = false;
            let mut member_name = Scratch::new(Purpose::MemberName);
            let member = self.member(&slot, &mut member_name);
            member_name.release(self.alloc);
            member?;
            self.cur.skip_ws()?;
        }
        // Consuming the close bracket tolerates end of stream.
        self.cur.bump()?;
        self.emit(&mut slot, NodeKind::ObjectEnd, name, None)
    }

    /// string `:` value, with the name buffer owned by the caller so it is
    /// released on every path.
    fn member(
        &mut self,
        slot: &Option<S::Handle>,
        member_name: &mut Scratch<A>,
    ) -> Result<(), ParseError> {
        match self.string(member_name)? {
            Lexed::Matched => {}
            Lexed::NotApplicable => return Err(self.cur.fail(ErrorKind::BadInput)),
        }
        self.cur.skip_ws()?;
        if self.cur.peek() != Some(b':') {
            return Err(self.cur.fail(ErrorKind::ExpectedColon));
        }
        self.cur.bump()?;
        self.any(false, slot, Some(member_name.bytes()))
    }

    /// `[` ( element (`,` element)* )? `]`, also driven by the block
    /// parser for header and record arrays. Returns the element count.
    fn array(
        &mut self,
        parent: &Option<S::Handle>,
        name: Option<&[u8]>,
        mut mode: Mode<'_, A>,
    ) -> Result<usize, ParseError> {
        let (begin, end) = match &mode {
            Mode::Plain => (NodeKind::ArrayBegin, NodeKind::ArrayEnd),
            Mode::Header(_) => (NodeKind::HeaderBegin, NodeKind::HeaderEnd),
            Mode::Record(_) => (NodeKind::RecordBegin, NodeKind::RecordEnd),
        };
        let mut slot = parent.clone();
        self.emit(&mut slot, begin, name, None)?;
        self.cur.bump()?;
        self.cur.skip_ws()?;
        let mut count = 0usize;
        while self.cur.peek() != Some(b']') {
            if self.cur.peek().is_none() {
                return Err(self.cur.fail(ErrorKind::BadInput));
            }
            if count != 0 {
                if self.cur.peek() != Some(b',') {
                    return Err(self.cur.fail(ErrorKind::ExpectedComma));
                }
                self.cur.bump()?;
                self.cur.skip_ws()?;
            }
            let ordinal = count + 1;
            match &mut mode {
                Mode::Plain => {
                    let ordinal_text;
                    let elem_name = if self.options.index_names {
                        ordinal_text = ordinal.to_string();
                        Some(ordinal_text.as_bytes())
                    } else {
                        None
                    };
                    self.any(false, &slot, elem_name)?;
                }
                Mode::Header(table) => {
                    self.header_field(&mut slot, table, ordinal)?;
                }
                Mode::Record(table) => {
                    let ordinal_text;
                    let field_name = if let Some(field) = table.names.get(count) {
                        Some(field.bytes())
                    } else if self.options.index_names {
                        // Past the header's arity; the mismatch is
                        // reported once the record completes.
                        ordinal_text = ordinal.to_string();
                        Some(ordinal_text.as_bytes())
                    } else {
                        None
                    };
                    self.any(false, &slot, field_name)?;
                }
            }
            count += 1;
            self.cur.skip_ws()?;
        }
        // Consuming the close bracket tolerates end of stream.
        self.cur.bump()?;
        self.emit(&mut slot, end, name, None)?;
        Ok(count)
    }

    /// One header element: a string, reported as a name-kind event, whose
    /// buffer then belongs to the header table.
    fn header_field(
        &mut self,
        slot: &mut Option<S::Handle>,
        table: &mut HeaderTable<A>,
        ordinal: usize,
    ) -> Result<(), ParseError> {
        let mut field = Scratch::new(Purpose::HeaderName);
        match self.string(&mut field) {
            Ok(Lexed::Matched) => {}
            Ok(Lexed::NotApplicable) => {
                field.release(self.alloc);
                return Err(self.cur.fail(ErrorKind::BadInput));
            }
            Err(e) => {
                field.release(self.alloc);
                return Err(e);
            }
        }
        let ordinal_text;
        let elem_name = if self.options.index_names {
            ordinal_text = ordinal.to_string();
            Some(ordinal_text.as_bytes())
        } else {
            None
        };
        let reported = self.emit(slot, NodeKind::HeaderName, elem_name, Some(field.bytes()));
        // The table owns the name from here on, even if the sink aborted;
        // the block parser releases the whole table on unwind.
        table.names.push(field);
        reported
    }

    /// `(` header-array (`,` record-array)* `)`
    fn block(
        &mut self,
        parent: &Option<S::Handle>,
        name: Option<&[u8]>,
    ) -> Result<(), ParseError> {
        let mut slot = parent.clone();
        self.emit(&mut slot, NodeKind::BlockBegin, name, None)?;
        self.cur.bump()?;
        let mut header = HeaderTable::new();
        let body = self.block_body(&slot, &mut header);
        header.release(self.alloc);
        body?;
        self.emit(&mut slot, NodeKind::BlockEnd, name, None)
    }

    fn block_body(
        &mut self,
        slot: &Option<S::Handle>,
        header: &mut HeaderTable<A>,
    ) -> Result<(), ParseError> {
        self.cur.skip_ws()?;
        match self.cur.peek() {
            None => return Err(self.cur.fail(ErrorKind::BadInput)),
            Some(b')') => {
                // An empty block has no header and no records.
                self.cur.bump()?;
                return Ok(());
            }
            Some(b'[') => {}
            Some(_) => return Err(self.cur.fail(ErrorKind::BadInput)),
        }
        let arity = self.array(slot, None, Mode::Header(header))?;
        loop {
            self.cur.skip_ws()?;
            match self.cur.peek() {
                None => return Err(self.cur.fail(ErrorKind::BadInput)),
                Some(b')') => break,
                Some(b',') => self.cur.bump()?,
                Some(_) => return Err(self.cur.fail(ErrorKind::ExpectedComma)),
            }
            self.cur.skip_ws()?;
            if self.cur.peek() != Some(b'[') {
                return Err(self.cur.fail(ErrorKind::BadInput));
            }
            let count = self.array(slot, None, Mode::Record(header))?;
            if count != arity {
                return Err(self.cur.fail(ErrorKind::BlockArity));
            }
        }
        // Consuming the close parenthesis tolerates end of stream.
        self.cur.bump()?;
        Ok(())
    }

    /// A scalar value: the lexers are tried in fixed order, and a position
    /// that requires a value but matches none of them is malformed input.
    fn scalar(
        &mut self,
        parent: &Option<S::Handle>,
        name: Option<&[u8]>,
    ) -> Result<(), ParseError> {
        let mut value = Scratch::new(Purpose::Value);
        let outcome = match self.scalar_value(&mut value) {
            Ok(Some(kind)) => {
                let mut slot = parent.clone();
                let payload = matches!(kind, NodeKind::Number | NodeKind::String);
                self.emit(&mut slot, kind, name, payload.then(|| value.bytes()))
            }
            Ok(None) => Err(self.cur.fail(ErrorKind::BadInput)),
            Err(e) => Err(e),
        };
        value.release(self.alloc);
        outcome
    }

    fn scalar_value(
        &mut self,
        value: &mut Scratch<A>,
    ) -> Result<Option<NodeKind>, ParseError> {
        if let Lexed::Matched = self.literal(b"true")? {
            return Ok(Some(NodeKind::True));
        }
        if let Lexed::Matched = self.literal(b"false")? {
            return Ok(Some(NodeKind::False));
        }
        if let Lexed::Matched = self.literal(b"null")? {
            return Ok(Some(NodeKind::Null));
        }
        if let Lexed::Matched = self.number(value)? {
            return Ok(Some(NodeKind::Number));
        }
        if let Lexed::Matched = self.string(value)? {
            return Ok(Some(NodeKind::String));
        }
        Ok(None)
    }
}
