pub mod markers;
pub mod newick;
pub mod root;
pub mod store;
pub mod types;

pub use markers::{MarkerImportStats, MarkerTable};
pub use newick::{tree_to_newick, NewickConversion};
pub use root::{find_root, root_candidates};
pub use store::TreeStore;
pub use types::{MarkerRecord, TreeNode};
