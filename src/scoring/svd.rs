// Truncated SVD with a single component, by power iteration.
//
// TF-IDF weights are non-negative, so the leading right singular vector of
// each connected block of the document–term graph is strictly positive and
// power iteration from a uniform start converges to it. The matrix's leading
// vector is the leading vector of the block with the largest singular value,
// with exact zeros everywhere else. Splitting into blocks first keeps those
// zeros exact instead of merely small, which matters because a review is
// judged on whether its score is exactly zero.

use std::collections::HashMap;

use tracing::debug;

use super::tfidf::TfIdfMatrix;

/// Relative tolerance under which two blocks' singular values count as tied.
const TIE_TOLERANCE: f64 = 1e-9;

/// Early-exit threshold on the largest per-entry change between iterations.
const CONVERGENCE_EPSILON: f64 = 1e-14;

/// The dominant latent concept of a TF-IDF matrix.
#[derive(Debug, Clone)]
pub struct LeadingComponent {
    pub singular_value: f64,
    /// One weight per vocabulary term
    pub weights: Vec<f64>,
}

/// Compute the leading singular triple's right vector.
///
/// `iterations` caps the power iteration per block. Returns `None` when the
/// matrix has no non-zero entries (empty vocabulary).
///
/// Ties between blocks go to the block holding the latest document in input
/// order. The sign is fixed so the largest-magnitude weight is positive.
pub fn leading_component(matrix: &TfIdfMatrix, iterations: usize) -> Option<LeadingComponent> {
    let blocks = connected_blocks(matrix);

    let mut best: Option<(f64, usize, Vec<(usize, f64)>)> = None;
    for block in &blocks {
        let (sigma, vector) = power_iterate(matrix, block, iterations);
        let last_doc = block.docs.last().copied().unwrap_or(0);
        debug!(
            docs = block.docs.len(),
            terms = block.terms.len(),
            sigma,
            "Block leading singular value"
        );

        let replace = match &best {
            None => true,
            Some((best_sigma, best_last, _)) => {
                let scale = sigma.max(*best_sigma).max(f64::MIN_POSITIVE);
                if (sigma - best_sigma).abs() <= TIE_TOLERANCE * scale {
                    last_doc > *best_last
                } else {
                    sigma > *best_sigma
                }
            }
        };
        if replace {
            best = Some((sigma, last_doc, vector));
        }
    }

    let (singular_value, _, vector) = best?;
    let mut weights = vec![0.0; matrix.n_terms()];
    for (term, w) in vector {
        weights[term] = w;
    }
    flip_sign(&mut weights);

    Some(LeadingComponent {
        singular_value,
        weights,
    })
}

/// A connected block of the bipartite document–term graph.
#[derive(Debug)]
struct Block {
    /// Document indices, ascending
    docs: Vec<usize>,
    /// Term (column) indices, ascending
    terms: Vec<usize>,
}

/// Partition documents and terms into connected blocks with union-find.
/// Documents with empty rows belong to no block.
fn connected_blocks(matrix: &TfIdfMatrix) -> Vec<Block> {
    let n_docs = matrix.n_docs();
    let mut parent: Vec<usize> = (0..n_docs + matrix.n_terms()).collect();

    for (d, row) in matrix.rows.iter().enumerate() {
        for &(t, _) in row {
            union(&mut parent, d, n_docs + t);
        }
    }

    let mut by_root: HashMap<usize, usize> = HashMap::new();
    let mut blocks: Vec<Block> = Vec::new();

    for (d, row) in matrix.rows.iter().enumerate() {
        if row.is_empty() {
            continue;
        }
        let root = find(&mut parent, d);
        let idx = *by_root.entry(root).or_insert_with(|| {
            blocks.push(Block {
                docs: Vec::new(),
                terms: Vec::new(),
            });
            blocks.len() - 1
        });
        blocks[idx].docs.push(d);
    }

    for t in 0..matrix.n_terms() {
        let root = find(&mut parent, n_docs + t);
        if let Some(&idx) = by_root.get(&root) {
            blocks[idx].terms.push(t);
        }
    }

    blocks
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Smaller root wins so the layout never depends on visit order
        let (keep, merge) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[merge] = keep;
    }
}

/// Power iteration on `XᵀX` restricted to one block.
///
/// Returns the singular value and the (term, weight) pairs of the unit
/// right singular vector.
fn power_iterate(matrix: &TfIdfMatrix, block: &Block, iterations: usize) -> (f64, Vec<(usize, f64)>) {
    let local: HashMap<usize, usize> = block
        .terms
        .iter()
        .enumerate()
        .map(|(i, &t)| (t, i))
        .collect();
    let k = block.terms.len();

    let start = 1.0 / (k as f64).sqrt();
    let mut v = vec![start; k];

    for _ in 0..iterations.max(1) {
        let u = multiply(matrix, block, &local, &v);

        let mut next = vec![0.0; k];
        for (&d, &ud) in block.docs.iter().zip(&u) {
            for &(t, x) in &matrix.rows[d] {
                next[local[&t]] += x * ud;
            }
        }

        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm == 0.0 {
            break;
        }
        for x in &mut next {
            *x /= norm;
        }

        let delta = next
            .iter()
            .zip(&v)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        v = next;
        if delta < CONVERGENCE_EPSILON {
            break;
        }
    }

    let u = multiply(matrix, block, &local, &v);
    let sigma = u.iter().map(|x| x * x).sum::<f64>().sqrt();

    (sigma, block.terms.iter().copied().zip(v).collect())
}

/// `u = X v` over the block's documents.
fn multiply(
    matrix: &TfIdfMatrix,
    block: &Block,
    local: &HashMap<usize, usize>,
    v: &[f64],
) -> Vec<f64> {
    block
        .docs
        .iter()
        .map(|&d| matrix.rows[d].iter().map(|&(t, x)| x * v[local[&t]]).sum())
        .collect()
}

/// Make the largest-magnitude entry positive.
fn flip_sign(weights: &mut [f64]) {
    let pivot = weights
        .iter()
        .copied()
        .fold(0.0f64, |acc, w| if w.abs() > acc.abs() { w } else { acc });
    if pivot < 0.0 {
        for w in weights.iter_mut() {
            *w = -*w;
        }
    }
}
