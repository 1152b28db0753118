use serde::{Deserialize, Serialize};

/// One row of an organism's tree relation: a node and the names of its children.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<String>,
    pub organism: String,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, organism: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            organism: organism.into(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends `child` unless it is already listed. Returns whether it was added.
    pub(crate) fn add_child(&mut self, child: &str) -> bool {
        if self.children.iter().any(|c| c == child) {
            return false;
        }
        self.children.push(child.to_string());
        true
    }
}

/// A diagnostic SNP introduced at the tree node of the same name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    pub marker_id: String,
    pub reference: String,
    pub strain: String,
    /// 1-based offset into the aligned sequence of `strain`.
    pub position: usize,
    pub derived_base: String,
    pub ancestral_base: String,
}

impl MarkerRecord {
    pub fn is_derived(&self, base: u8) -> bool {
        matches!(self.derived_base.as_bytes(), [derived] if derived.eq_ignore_ascii_case(&base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_keeps_first_insertion() {
        let mut node = TreeNode::new("ROOT", "Francisella");
        assert!(node.add_child("N1"));
        assert!(node.add_child("N2"));
        assert!(!node.add_child("N1"));
        assert_eq!(node.children, vec!["N1", "N2"]);
    }

    #[test]
    fn derived_comparison_ignores_case() {
        let marker = MarkerRecord {
            marker_id: "B.1".to_string(),
            reference: "Svensson".to_string(),
            strain: "LVS".to_string(),
            position: 23942,
            derived_base: "A".to_string(),
            ancestral_base: "G".to_string(),
        };
        assert!(marker.is_derived(b'A'));
        assert!(marker.is_derived(b'a'));
        assert!(!marker.is_derived(b'G'));
        assert!(!marker.is_derived(b'-'));
    }
}
