//! Scaffolding of assembled contigs from mate-pair links and Hi-C contacts.
//!
//! Mate-pair alignments are bundled into contig linkage edges with gap
//! estimates ([`links`], [`graph`]); Hi-C contact counts score and reorder
//! contigs within groups ([`hic`]).

pub mod error;
pub mod graph;
pub mod hic;
pub mod io;
pub mod links;
pub mod pipeline;
pub mod range;
pub mod strand;
pub mod visualize;
