//! Physical plans and the planner that builds them.

mod builder;
mod node;

pub use builder::Planner;
pub use node::{
    AggregateNode, DdlKind, DdlNode, DmlKind, DmlNode, GroupByNode, IndexScanNode, JoinNode, Plan,
    ProjectNode, SeqScanNode, SortNode,
};
