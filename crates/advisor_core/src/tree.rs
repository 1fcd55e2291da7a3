//! Decision tree structures for categorical inference
//!
//! A node is either a leaf carrying an output code or a split on one
//! attribute with one child per symbol seen at that node. Splits cache the
//! majority output of their training rows, which is returned when the queried
//! symbol has no child.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::codebook::Code;
use crate::errors::{AdvisorError, Result};
use crate::serialization::fingerprint_hex;
use crate::variable::DecisionVariable;

/// A decision tree node (split or leaf)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Terminal node predicting `output`
    Leaf { output: Code },

    /// Internal node on `attribute` (index into the feature vector)
    Split {
        attribute: usize,
        majority: Code,
        children: BTreeMap<Code, Node>,
    },
}

impl Node {
    pub fn leaf(output: Code) -> Self {
        Self::Leaf { output }
    }

    pub fn split(attribute: usize, majority: Code, children: BTreeMap<Code, Node>) -> Self {
        Self::Split {
            attribute,
            majority,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Output code if this is a leaf
    pub fn leaf_value(&self) -> Option<Code> {
        match self {
            Self::Leaf { output } => Some(*output),
            Self::Split { .. } => None,
        }
    }

    /// Code returned when traversal stops at this node
    pub fn fallback(&self) -> Code {
        match self {
            Self::Leaf { output } => *output,
            Self::Split { majority, .. } => *majority,
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Split { children, .. } => {
                1 + children.values().map(Node::depth).max().unwrap_or(0)
            }
        }
    }

    fn count(&self, leaves_only: bool) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { children, .. } => {
                let below: usize = children.values().map(|c| c.count(leaves_only)).sum();
                if leaves_only {
                    below
                } else {
                    below + 1
                }
            }
        }
    }
}

/// A learned decision tree over categorical codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionTree {
    root: Node,
    variables: Vec<DecisionVariable>,
    output_arity: usize,
}

impl DecisionTree {
    pub fn new(root: Node, variables: Vec<DecisionVariable>, output_arity: usize) -> Self {
        Self {
            root,
            variables,
            output_arity,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Variables in feature vector order
    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    pub fn output_arity(&self) -> usize {
        self.output_arity
    }

    /// Predict the output code for an encoded feature vector
    pub fn decide(&self, features: &[Code]) -> Result<Code> {
        if features.len() != self.variables.len() {
            return Err(AdvisorError::DimensionMismatch {
                expected: self.variables.len(),
                actual: features.len(),
            });
        }

        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { output } => return Ok(*output),
                Node::Split {
                    attribute,
                    majority,
                    children,
                } => match children.get(&features[*attribute]) {
                    Some(child) => node = child,
                    // Symbol never reached this node during training
                    None => return Ok(*majority),
                },
            }
        }
    }

    /// Longest root-to-leaf path, counted in splits
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.root.count(false)
    }

    pub fn leaf_count(&self) -> usize {
        self.root.count(true)
    }

    /// Fraction of rows whose prediction differs from the recorded output
    pub fn training_error(&self, inputs: &[Vec<Code>], outputs: &[Code]) -> Result<f64> {
        if inputs.len() != outputs.len() {
            return Err(AdvisorError::config(format!(
                "{} input rows but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }
        if inputs.is_empty() {
            return Ok(0.0);
        }

        let mut misses = 0usize;
        for (row, &expected) in inputs.iter().zip(outputs) {
            if self.decide(row)? != expected {
                misses += 1;
            }
        }

        Ok(misses as f64 / inputs.len() as f64)
    }

    /// BLAKE3 digest of the canonical JSON form; equal for structurally equal trees
    pub fn fingerprint(&self) -> Result<String> {
        fingerprint_hex(self)
    }
}
