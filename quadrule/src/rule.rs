//! The `Rule` type: an ordered set of nodes with aligned weights.

/// A quadrature rule in `dim` dimensions.
///
/// Nodes are stored row-major: node `k` occupies
/// `nodes[k * dim..(k + 1) * dim]`, and `weights[k]` is its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The number of coordinates per node.
    dim: usize,
    /// The flattened node table, of size `len * dim`.
    nodes: Vec<f64>,
    /// One weight per node.
    weights: Vec<f64>,
}

impl Rule {
    /// Builds a rule from a flat row-major node table.
    ///
    /// # Panics
    ///
    /// Panics if `nodes.len() != weights.len() * dim`. All constructors in
    /// this crate uphold this.
    pub(crate) fn new(dim: usize, nodes: Vec<f64>, weights: Vec<f64>) -> Self {
        assert_eq!(
            nodes.len(),
            weights.len() * dim,
            "node table does not match weight count"
        );
        Rule {
            dim,
            nodes,
            weights,
        }
    }

    /// Builds a one-dimensional rule.
    pub(crate) fn one_dim(nodes: Vec<f64>, weights: Vec<f64>) -> Self {
        Rule::new(1, nodes, weights)
    }

    /// Returns the number of coordinates per node.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the coordinates of node `k`.
    pub fn node(&self, k: usize) -> &[f64] {
        &self.nodes[k * self.dim..(k + 1) * self.dim]
    }

    /// Returns the flattened, row-major node table.
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterates over `(node, weight)` pairs in rule order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], f64)> + '_ {
        self.nodes
            .chunks_exact(self.dim)
            .zip(self.weights.iter().copied())
    }

    /// Returns the sum of the weights, i.e. the measure the rule assigns to
    /// its domain.
    pub fn volume(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Consumes the rule, returning `(dim, nodes, weights)`.
    pub fn into_parts(self) -> (usize, Vec<f64>, Vec<f64>) {
        (self.dim, self.nodes, self.weights)
    }

    /// Applies `f` to every node in place.
    pub(crate) fn map_nodes_mut<F: FnMut(&mut [f64])>(&mut self, mut f: F) {
        for node in self.nodes.chunks_exact_mut(self.dim) {
            f(node);
        }
    }

    pub(crate) fn scale_weights(&mut self, factor: f64) {
        for w in &mut self.weights {
            *w *= factor;
        }
    }
}
