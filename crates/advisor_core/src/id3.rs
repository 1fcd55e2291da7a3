//! ID3 (Iterative Dichotomiser 3) tree builder
//!
//! Implements deterministic, unpruned decision tree induction over
//! categorical symbol codes. Attributes are chosen by information gain and
//! every tie is broken by declared variable order, so identical inputs always
//! produce identical trees.

use std::collections::BTreeMap;

use crate::codebook::Code;
use crate::entropy::{class_counts, information_gain, majority};
use crate::errors::{AdvisorError, Result};
use crate::tree::{DecisionTree, Node};
use crate::variable::{validate_variables, DecisionVariable};

/// Gains closer than this to the current best count as ties
const GAIN_TOLERANCE: f64 = 1e-12;

/// Split candidate with gain and position in the remaining attribute list
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    position: usize,
    attribute: usize,
    gain: f64,
}

/// ID3 learner configured with its decision variables and output arity
#[derive(Clone, Debug)]
pub struct Id3Learning {
    variables: Vec<DecisionVariable>,
    output_arity: usize,
}

impl Id3Learning {
    /// Create a learner; zero arities, duplicates and empty lists fail fast
    pub fn new(variables: Vec<DecisionVariable>, output_arity: usize) -> Result<Self> {
        validate_variables(&variables)?;
        if output_arity == 0 {
            return Err(AdvisorError::config("output arity must be at least 1"));
        }

        Ok(Self {
            variables,
            output_arity,
        })
    }

    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    pub fn output_arity(&self) -> usize {
        self.output_arity
    }

    /// Learn a tree from encoded inputs (rows x variables) and outputs
    pub fn learn(&self, inputs: &[Vec<Code>], outputs: &[Code]) -> Result<DecisionTree> {
        self.check_shape(inputs, outputs)?;

        let builder = TreeBuilder {
            inputs,
            outputs,
            variables: &self.variables,
            output_arity: self.output_arity,
        };

        let rows: Vec<usize> = (0..inputs.len()).collect();
        let attributes: Vec<usize> = (0..self.variables.len()).collect();
        let fallback = majority(&class_counts(outputs, &rows, self.output_arity));

        let root = builder.build_node(&rows, &attributes, fallback);
        let tree = DecisionTree::new(root, self.variables.clone(), self.output_arity);

        tracing::info!(
            rows = inputs.len(),
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "ID3 tree learned"
        );

        Ok(tree)
    }

    /// Reject inputs that cannot be partitioned under the declared arities
    fn check_shape(&self, inputs: &[Vec<Code>], outputs: &[Code]) -> Result<()> {
        if inputs.is_empty() {
            return Err(AdvisorError::config("training set has no rows"));
        }
        if inputs.len() != outputs.len() {
            return Err(AdvisorError::config(format!(
                "{} input rows but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }

        for (row_idx, row) in inputs.iter().enumerate() {
            if row.len() != self.variables.len() {
                return Err(AdvisorError::config(format!(
                    "row {} has {} values, expected {}",
                    row_idx,
                    row.len(),
                    self.variables.len()
                )));
            }
            for (variable, &code) in self.variables.iter().zip(row) {
                if code >= variable.arity {
                    return Err(AdvisorError::config(format!(
                        "row {} has code {} for {:?}, declared arity is {}",
                        row_idx, code, variable.name, variable.arity
                    )));
                }
            }
        }

        if let Some((row_idx, &code)) = outputs
            .iter()
            .enumerate()
            .find(|(_, &code)| code >= self.output_arity)
        {
            return Err(AdvisorError::config(format!(
                "row {} has output code {}, output arity is {}",
                row_idx, code, self.output_arity
            )));
        }

        Ok(())
    }
}

/// Borrowed training state for one tree build
struct TreeBuilder<'a> {
    inputs: &'a [Vec<Code>],
    outputs: &'a [Code],
    variables: &'a [DecisionVariable],
    output_arity: usize,
}

impl TreeBuilder<'_> {
    /// Recursively build the node for `rows` using `remaining` attributes
    fn build_node(&self, rows: &[usize], remaining: &[usize], fallback: Code) -> Node {
        if rows.is_empty() {
            return Node::leaf(fallback);
        }

        let counts = class_counts(self.outputs, rows, self.output_arity);
        let majority_code = majority(&counts);

        // Pure partition
        if counts[majority_code] == rows.len() {
            return Node::leaf(majority_code);
        }

        if remaining.is_empty() {
            return Node::leaf(majority_code);
        }

        let split = self.find_best_split(rows, remaining, &counts);
        let attribute = split.attribute;

        tracing::debug!(
            variable = %self.variables[attribute].name,
            gain = split.gain,
            rows = rows.len(),
            "splitting"
        );

        let rest: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&a| a != attribute)
            .collect();

        let mut children = BTreeMap::new();
        for (code, group) in self.partition(rows, attribute).into_iter().enumerate() {
            if group.is_empty() {
                continue;
            }
            children.insert(code, self.build_node(&group, &rest, majority_code));
        }

        // Collapse splits whose every branch predicts the split's own fallback
        let uniform = children
            .values()
            .all(|child| child.leaf_value() == Some(majority_code));
        if uniform {
            return Node::leaf(majority_code);
        }

        Node::split(attribute, majority_code, children)
    }

    /// Attribute with maximum gain; earliest position wins ties
    fn find_best_split(&self, rows: &[usize], remaining: &[usize], counts: &[usize]) -> SplitCandidate {
        let mut best: Option<SplitCandidate> = None;

        for (position, &attribute) in remaining.iter().enumerate() {
            let partitions: Vec<Vec<usize>> = self
                .partition(rows, attribute)
                .iter()
                .map(|group| class_counts(self.outputs, group, self.output_arity))
                .collect();

            let candidate = SplitCandidate {
                position,
                attribute,
                gain: information_gain(counts, &partitions),
            };

            best = match best {
                None => Some(candidate),
                Some(current) => {
                    if candidate.gain > current.gain + GAIN_TOLERANCE {
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            };
        }

        tracing::trace!(position = best.map(|b| b.position), "best split position");

        // `remaining` is non-empty at every call site
        best.unwrap_or(SplitCandidate {
            position: 0,
            attribute: remaining[0],
            gain: 0.0,
        })
    }

    /// Group rows by their code for `attribute`, one group per declared symbol
    fn partition(&self, rows: &[usize], attribute: usize) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.variables[attribute].arity];
        for &row in rows {
            groups[self.inputs[row][attribute]].push(row);
        }
        groups
    }
}
