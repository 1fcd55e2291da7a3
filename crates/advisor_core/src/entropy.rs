//! Class distributions, Shannon entropy and information gain

use crate::codebook::Code;

/// Count how often each output code occurs among `rows`
pub fn class_counts(outputs: &[Code], rows: &[usize], output_arity: usize) -> Vec<usize> {
    let mut counts = vec![0usize; output_arity];
    for &row in rows {
        counts[outputs[row]] += 1;
    }
    counts
}

/// Most frequent code; ties go to the lowest code
pub fn majority(counts: &[usize]) -> Code {
    let mut best = 0;
    for (code, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = code;
        }
    }
    best
}

/// Shannon entropy in bits, with 0 * log2(0) taken as 0
pub fn entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Entropy reduction from splitting `parent` into `partitions`
///
/// Each partition is weighted by its share of the parent's rows.
pub fn information_gain(parent: &[usize], partitions: &[Vec<usize>]) -> f64 {
    let total: usize = parent.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let remainder: f64 = partitions
        .iter()
        .map(|counts| {
            let size: usize = counts.iter().sum();
            (size as f64 / total as f64) * entropy(counts)
        })
        .sum();

    entropy(parent) - remainder
}
