//! Reconstructs a document tree from the event stream, using the parent
//! handle to do it without any lookups or path bookkeeping.
//!
//! The sink keeps an arena of nodes and uses the arena index as its
//! [`Handle`](jsonblocks::Sink::Handle) type: on every container-begin
//! event it appends a node and writes the new index back through the
//! `parent` slot, so each child event arrives already knowing where it
//! belongs. Scalars append a leaf to the parent's child list and leave the
//! slot alone.
//!
//! The input is a block document fed to the parser in small chunks, the
//! way it would arrive from a socket. Note how the record fields come out
//! carrying the names declared once in the header.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonblocks --example tree
//! ```

use std::fmt::Write as _;

use jsonblocks::{
    BStr, Chunks, ErrorKind, HeapAllocator, NodeKind, ParseOptions, Sink, parse_with,
};

struct Node {
    kind: NodeKind,
    name: Option<String>,
    value: Option<String>,
    children: Vec<usize>,
}

/// Arena-backed tree; `roots` holds the top-level node.
#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
    roots: Vec<usize>,
}

impl Tree {
    fn attach(&mut self, parent: Option<usize>, node: Node) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn render(&self, out: &mut String, id: usize, depth: usize) {
        let node = &self.nodes[id];
        let _ = write!(out, "{:indent$}{}", "", node.kind.description(), indent = depth * 2);
        if let Some(name) = &node.name {
            let _ = write!(out, " name={name}");
        }
        if let Some(value) = &node.value {
            let _ = write!(out, " value={value}");
        }
        out.push('\n');
        for &child in &node.children {
            self.render(out, child, depth + 1);
        }
    }
}

impl Sink for Tree {
    type Handle = usize;

    fn node(
        &mut self,
        parent: &mut Option<usize>,
        kind: NodeKind,
        name: Option<&BStr>,
        value: Option<&BStr>,
    ) -> Result<(), ErrorKind> {
        // End events refer to a container that is already in the arena.
        if matches!(
            kind,
            NodeKind::ObjectEnd
                | NodeKind::ArrayEnd
                | NodeKind::BlockEnd
                | NodeKind::HeaderEnd
                | NodeKind::RecordEnd
        ) {
            return Ok(());
        }
        let node = Node {
            kind,
            name: name.map(|b| b.to_string()),
            value: value.map(|b| b.to_string()),
            children: Vec::new(),
        };
        let id = self.attach(*parent, node);
        if matches!(
            kind,
            NodeKind::ObjectBegin
                | NodeKind::ArrayBegin
                | NodeKind::BlockBegin
                | NodeKind::HeaderBegin
                | NodeKind::RecordBegin
        ) {
            *parent = Some(id);
        }
        Ok(())
    }
}

fn main() {
    // 1929 National League pitching leaders, as a block: field names appear
    // once in the header instead of repeating in every record.
    let wire: [&str; 6] = [
        r#"{"year": 1929, "leaders": (["#,
        r#""rank", "team", "era"], "#,
        r#"[1, "Chi Cubs"#,
        r#"", 3.12], "#,
        r#"[2, "Washington", 3.53]"#,
        r#")}"#,
    ];

    let mut tree = Tree::default();
    let mut src = Chunks::new(wire.into_iter().map(str::as_bytes));
    if let Err(e) = parse_with(
        None,
        &mut src,
        &mut tree,
        &mut HeapAllocator,
        ParseOptions::default(),
    ) {
        eprintln!("parse failed: {e}");
        return;
    }

    let mut rendered = String::new();
    for &root in &tree.roots {
        tree.render(&mut rendered, root, 0);
    }
    print!("{rendered}");

    assert_eq!(
        rendered,
        "\
object
  number name=year value=1929
  block name=leaders
    block header
      block header name name=1 value=rank
      block header name name=2 value=team
      block header name name=3 value=era
    block record
      number name=rank value=1
      string name=team value=Chi Cubs
      number name=era value=3.12
    block record
      number name=rank value=2
      string name=team value=Washington
      number name=era value=3.53
"
    );
}
