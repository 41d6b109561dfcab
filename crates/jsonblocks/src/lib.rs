//! A streaming, event-driven JSON parser with a non-standard
//! homogeneous-record extension called *blocks*.
//!
//! The engine consumes a pull-based byte stream, recognizes JSON grammar
//! productions, and reports each node to a caller-supplied [`Sink`]
//! without building a tree; hierarchy is the sink's business, helped along
//! by an opaque parent handle threaded from containers to their children.
//! All storage for decoded names and values comes from a caller-supplied
//! [`Allocator`].
//!
//! # Blocks
//!
//! A block is a compact encoding for an array of homogeneous records:
//!
//! ```text
//! (["rank", "team", "era"],
//!  [1, "Chi Cubs", 3.12],
//!  [2, "Washington", 3.53])
//! ```
//!
//! The first array is the header and names the fields; every following
//! array is a record and must have exactly as many elements as the header.
//! Record fields are reported with the header's names, in header order.
//!
//! # Example
//!
//! ```
//! use bstr::BStr;
//! use jsonblocks::{ErrorKind, NodeKind, Sink};
//!
//! struct Names(Vec<String>);
//!
//! impl Sink for Names {
//!     type Handle = ();
//!     fn node(
//!         &mut self,
//!         _parent: &mut Option<()>,
//!         _kind: NodeKind,
//!         name: Option<&BStr>,
//!         _value: Option<&BStr>,
//!     ) -> Result<(), ErrorKind> {
//!         if let Some(name) = name {
//!             self.0.push(name.to_string());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut sink = Names(Vec::new());
//! jsonblocks::parse(br#"{"a": 1, "b": [true, null]}"#, &mut sink).unwrap();
//! assert_eq!(sink.0, ["a", "b", "1", "2", "b"]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod allocator;
mod error;
mod event;
mod input;
mod options;
mod parser;

pub use allocator::{Allocator, HeapAllocator, Purpose};
pub use bstr::BStr;
pub use error::{ErrorKind, ParseError};
pub use event::{NodeKind, Sink};
pub use input::{Chunks, NoMoreInput, Refill};
pub use options::ParseOptions;
pub use parser::{parse, parse_with};
