use crate::classifier::sample::AlignedSample;
use crate::error::{Result, TyperError};
use crate::tree::{MarkerTable, TreeStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Outcome of one tree walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Deepest node consistent with the sample, `None` when unclassified.
    pub assigned_node: Option<String>,
    /// Markers not in the derived state that were walked through anyway.
    pub overridden_markers: Vec<String>,
    /// Tree nodes without a marker record; their subtrees were pruned.
    pub absent_markers: Vec<String>,
}

/// Mutable state of a single walk. One per sample; never shared.
#[derive(Debug)]
pub struct WalkContext<'s> {
    sample: &'s AlignedSample,
    overridden: Vec<String>,
    absent: Vec<String>,
    /// Nodes from the root down to the one being evaluated.
    path: Vec<String>,
}

impl<'s> WalkContext<'s> {
    pub fn new(sample: &'s AlignedSample) -> Self {
        Self {
            sample,
            overridden: Vec::new(),
            absent: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Tolerance credits spent so far.
    pub fn spent(&self) -> usize {
        self.overridden.len()
    }

    pub fn overridden(&self) -> &[String] {
        &self.overridden
    }

    fn credit(&mut self, node: &str) {
        if !self.overridden.iter().any(|n| n == node) {
            self.overridden.push(node.to_string());
        }
    }

    fn refund(&mut self, node: &str) {
        self.overridden.retain(|n| n != node);
    }

    fn note_absent(&mut self, node: &str) {
        if !self.absent.iter().any(|n| n == node) {
            self.absent.push(node.to_string());
        }
    }

    fn into_result(self, assigned_node: Option<String>) -> ClassificationResult {
        ClassificationResult {
            assigned_node,
            overridden_markers: self.overridden,
            absent_markers: self.absent,
        }
    }
}

/// Threshold-tolerant tree walker.
///
/// Descends one committed path from the root. At every node the children are
/// first probed quietly without forcing; the first child carrying its derived
/// SNP is entered and its siblings are never looked at again. Only when no
/// child is derived, and fewer than `threshold` SNPs have been overridden so
/// far, are the children probed again with forcing.
pub struct Classifier<'a> {
    tree: &'a TreeStore,
    markers: &'a MarkerTable,
    threshold: usize,
}

impl<'a> Classifier<'a> {
    pub fn new(tree: &'a TreeStore, markers: &'a MarkerTable, threshold: usize) -> Self {
        Self {
            tree,
            markers,
            threshold,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Classifies `sample` starting at `root`. The root itself is forced when
    /// any differences are allowed.
    pub fn classify(&self, root: &str, sample: &AlignedSample) -> Result<ClassificationResult> {
        let mut ctx = WalkContext::new(sample);
        let assigned = self.walk(&mut ctx, root, self.threshold > 0, false)?;
        Ok(ctx.into_result(assigned))
    }

    /// Evaluates `node` and, unless probing quietly, descends below it.
    ///
    /// `force` accepts the node even if its SNP is not derived, spending one
    /// tolerance credit. `quiet` marks a probe made by the parent to decide
    /// where to go; an unforced quiet probe never descends.
    ///
    /// Fails with [`TyperError::CyclicTree`] when `node` is already on the
    /// path from the root.
    pub fn walk(
        &self,
        ctx: &mut WalkContext<'_>,
        node: &str,
        force: bool,
        quiet: bool,
    ) -> Result<Option<String>> {
        if ctx.path.iter().any(|n| n == node) {
            return Err(TyperError::CyclicTree {
                organism: self.tree.organism().to_string(),
                node: node.to_string(),
            });
        }
        ctx.path.push(node.to_string());
        let outcome = self.visit(ctx, node, force, quiet);
        ctx.path.pop();
        outcome
    }

    fn visit(
        &self,
        ctx: &mut WalkContext<'_>,
        node: &str,
        force: bool,
        quiet: bool,
    ) -> Result<Option<String>> {
        trace!(
            "{} into {} {}",
            if force { "Forcing" } else { "Walking" },
            node,
            if quiet { "quiet" } else { "not quiet" }
        );

        let Some(marker) = self.markers.get(node) else {
            warn!("SNP not in database: {}", node);
            ctx.note_absent(node);
            ctx.refund(node);
            return Ok(None);
        };
        let derived = marker.is_derived(ctx.sample.base_at(marker)?);

        if !derived && !force {
            trace!("{} was not derived", node);
            ctx.refund(node);
            return Ok(None);
        }
        if !derived {
            ctx.credit(node);
        }
        if quiet && !force {
            return Ok(Some(node.to_string()));
        }

        let children = self.tree.children(node);
        if children.is_empty() {
            if derived && !quiet {
                debug!("{} was a derived leaf", node);
            }
            return Ok(Self::settle(ctx, node, derived));
        }

        for child in children {
            if self.walk(ctx, child, false, true)?.is_some() {
                if !quiet {
                    debug!("Child {} of {} is derived, going into it", child, node);
                }
                return self.walk(ctx, child, false, quiet);
            }
        }

        if ctx.spent() >= self.threshold {
            if !quiet {
                debug!(
                    "Number of forced SNPs: {}, threshold: {}, {:?}",
                    ctx.spent(),
                    self.threshold,
                    ctx.overridden()
                );
            }
            return Ok(Self::settle(ctx, node, derived));
        }

        if !quiet {
            debug!("Trying to force children of {}: {:?}", node, children);
        }
        for child in children {
            if self.walk(ctx, child, true, true)?.is_some() {
                return self.walk(ctx, child, true, quiet);
            }
        }

        Ok(Self::settle(ctx, node, derived))
    }

    /// Stops at `node`: accepted if derived, otherwise its credit is returned.
    fn settle(ctx: &mut WalkContext<'_>, node: &str, derived: bool) -> Option<String> {
        if derived {
            Some(node.to_string())
        } else {
            ctx.refund(node);
            None
        }
    }
}
