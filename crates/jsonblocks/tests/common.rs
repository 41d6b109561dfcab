#![allow(missing_docs)]
#![allow(dead_code)]

use bstr::BStr;
use jsonblocks::{ErrorKind, NodeKind, Sink};

/// One reported node, with the parent handle it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ev {
    pub kind: NodeKind,
    pub name: Option<String>,
    pub value: Option<String>,
    pub parent: Option<u32>,
}

pub fn ev(kind: NodeKind, name: Option<&str>, value: Option<&str>, parent: Option<u32>) -> Ev {
    Ev {
        kind,
        name: name.map(str::to_string),
        value: value.map(str::to_string),
        parent,
    }
}

/// Sink that records every event and hands each container a fresh numeric
/// handle, so both the event order and the parent threading are visible in
/// assertions.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Ev>,
    next_id: u32,
}

impl Sink for Recorder {
    type Handle = u32;

    fn node(
        &mut self,
        parent: &mut Option<u32>,
        kind: NodeKind,
        name: Option<&BStr>,
        value: Option<&BStr>,
    ) -> Result<(), ErrorKind> {
        self.events.push(Ev {
            kind,
            name: name.map(|b| b.to_string()),
            value: value.map(|b| b.to_string()),
            parent: *parent,
        });
        if matches!(
            kind,
            NodeKind::ObjectBegin
                | NodeKind::ArrayBegin
                | NodeKind::BlockBegin
                | NodeKind::HeaderBegin
                | NodeKind::RecordBegin
        ) {
            self.next_id += 1;
            *parent = Some(self.next_id);
        }
        Ok(())
    }
}

/// Parse a whole in-memory document and return the recorded events, or the
/// error kind of the first failure together with everything recorded before
/// it.
pub fn run(input: &str) -> Result<Vec<Ev>, (ErrorKind, Vec<Ev>)> {
    let mut sink = Recorder::default();
    match jsonblocks::parse(input.as_bytes(), &mut sink) {
        Ok(()) => Ok(sink.events),
        Err(e) => Err((e.kind, sink.events)),
    }
}
