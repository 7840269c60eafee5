//! Square multi-channel sample grid.

use crate::error::{BlueNoiseError, BlueNoiseResult};
use rand::Rng;

/// A `size × size` grid of cells, each holding `dims` channels.
///
/// Cells are stored row-major in one flat buffer; cell `(x, y)` occupies
/// `data[(y * size + x) * dims..][..dims]`. The buffer length is fixed at
/// construction.
///
/// Coordinates are preconditions: out-of-range access panics.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    size: usize,
    dims: usize,
    data: Vec<f32>,
}

impl Pattern {
    /// Creates a pattern with every channel drawn uniformly from `[0, 1)`
    /// using the thread-local generator.
    ///
    /// # Panics
    /// Panics if `size` or `dims` is zero.
    pub fn new(size: usize, dims: usize) -> Self {
        Self::random(size, dims, &mut rand::rng())
    }

    /// Creates a pattern with every channel drawn uniformly from `[0, 1)`.
    ///
    /// # Panics
    /// Panics if `size` or `dims` is zero.
    pub fn random<R: Rng + ?Sized>(size: usize, dims: usize, rng: &mut R) -> Self {
        assert!(size != 0, "pattern size must be non-zero");
        assert!(dims != 0, "pattern dims must be non-zero");

        let data = (0..size * size * dims)
            .map(|_| rng.random_range(0.0f32..1.0))
            .collect();
        Self { size, dims, data }
    }

    /// Wraps existing channel values, laid out row-major.
    ///
    /// # Panics
    /// Panics if `size` or `dims` is zero.
    pub fn from_values(size: usize, dims: usize, values: Vec<f32>) -> BlueNoiseResult<Self> {
        assert!(size != 0, "pattern size must be non-zero");
        assert!(dims != 0, "pattern dims must be non-zero");

        let expected = size * size * dims;
        if values.len() != expected {
            return Err(BlueNoiseError::validation(format!(
                "expected {expected} values for a {size}x{size}x{dims} pattern, got {}",
                values.len()
            )));
        }
        Ok(Self {
            size,
            dims,
            data: values,
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Channels per cell.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of cells (`size * size`).
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Number of cells. Same as [`Pattern::cell_count`].
    pub fn len(&self) -> usize {
        self.cell_count()
    }

    /// Always false; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The `size * size` plane of channel `c`, row-major.
    ///
    /// # Panics
    /// Panics if `c >= dims`.
    pub fn channel(&self, c: usize) -> Vec<f32> {
        assert!(c < self.dims, "channel {c} out of range for {} dims", self.dims);
        self.data.iter().skip(c).step_by(self.dims).copied().collect()
    }

    /// The flat backing buffer.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Coordinates of the cell at flat cell index `index`.
    pub fn position(&self, index: usize) -> (usize, usize) {
        assert!(index < self.cell_count(), "cell index {index} out of range");
        (index % self.size, index / self.size)
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(x < self.size, "x = {x} out of range for size {}", self.size);
        assert!(y < self.size, "y = {y} out of range for size {}", self.size);
        (y * self.size + x) * self.dims
    }

    /// Channel values of cell `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> &[f32] {
        let start = self.offset(x, y);
        &self.data[start..start + self.dims]
    }

    /// Mutable channel values of cell `(x, y)`.
    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut [f32] {
        let start = self.offset(x, y);
        &mut self.data[start..start + self.dims]
    }

    /// Channel values of the cell at flat cell index `index`.
    pub(crate) fn cell_at(&self, index: usize) -> &[f32] {
        let start = index * self.dims;
        &self.data[start..start + self.dims]
    }

    /// Exchanges the channel vectors of two cells. A self-swap is a no-op.
    pub fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.offset(a.0, a.1);
        let ib = self.offset(b.0, b.1);
        if ia == ib {
            return;
        }
        for c in 0..self.dims {
            self.data.swap(ia + c, ib + c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_fills_unit_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        let pattern = Pattern::random(8, 3, &mut rng);

        assert_eq!(pattern.values().len(), 8 * 8 * 3);
        assert_eq!(pattern.cell_count(), 64);
        assert!(pattern.values().iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_new_is_unseeded() {
        let a = Pattern::new(16, 1);
        let b = Pattern::new(16, 1);
        assert_eq!(a.values().len(), 256);
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_values_layout() {
        let pattern = Pattern::from_values(2, 2, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7])
            .expect("valid");
        assert_eq!(pattern.cell(0, 0), &[0.0, 0.1]);
        assert_eq!(pattern.cell(1, 0), &[0.2, 0.3]);
        assert_eq!(pattern.cell(0, 1), &[0.4, 0.5]);
        assert_eq!(pattern.cell(1, 1), &[0.6, 0.7]);
        assert_eq!(pattern.position(3), (1, 1));
    }

    #[test]
    fn test_from_values_length_mismatch() {
        let err = Pattern::from_values(2, 1, vec![0.5; 3]).unwrap_err();
        assert!(err.to_string().contains("expected 4 values"));
    }

    #[test]
    fn test_len_counts_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let pattern = Pattern::random(5, 3, &mut rng);
        assert_eq!(pattern.len(), 25);
        assert_eq!(pattern.len(), pattern.cell_count());
        assert!(!pattern.is_empty());
    }

    #[test]
    fn test_channel_extracts_plane() {
        let pattern = Pattern::from_values(2, 2, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7])
            .expect("valid");
        assert_eq!(pattern.channel(0), vec![0.0, 0.2, 0.4, 0.6]);
        assert_eq!(pattern.channel(1), vec![0.1, 0.3, 0.5, 0.7]);
    }

    #[test]
    #[should_panic(expected = "channel 2 out of range")]
    fn test_channel_out_of_range_panics() {
        let pattern = Pattern::from_values(1, 2, vec![0.1, 0.2]).expect("valid");
        let _ = pattern.channel(2);
    }

    #[test]
    fn test_cell_mut_edits_in_place() {
        let mut pattern = Pattern::from_values(2, 1, vec![0.0; 4]).expect("valid");
        pattern.cell_mut(1, 0)[0] = 0.75;
        assert_eq!(pattern.values(), &[0.0, 0.75, 0.0, 0.0]);
    }

    #[test]
    fn test_swap_cells_moves_whole_vectors() {
        let mut pattern =
            Pattern::from_values(2, 2, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]).expect("valid");
        pattern.swap_cells((0, 0), (1, 1));
        assert_eq!(pattern.cell(0, 0), &[0.6, 0.7]);
        assert_eq!(pattern.cell(1, 1), &[0.0, 0.1]);
        assert_eq!(pattern.cell(1, 0), &[0.2, 0.3]);
    }

    #[test]
    fn test_self_swap_is_noop() {
        let mut rng = StdRng::seed_from_u64(2);
        let original = Pattern::random(4, 2, &mut rng);
        let mut pattern = original.clone();
        pattern.swap_cells((2, 3), (2, 3));
        assert_eq!(pattern, original);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        let pattern = Pattern::from_values(2, 1, vec![0.0; 4]).expect("valid");
        let _ = pattern.cell(2, 0);
    }

    #[test]
    #[should_panic(expected = "size must be non-zero")]
    fn test_zero_size_panics() {
        let _ = Pattern::new(0, 1);
    }

    #[test]
    #[should_panic(expected = "dims must be non-zero")]
    fn test_zero_dims_panics() {
        let _ = Pattern::from_values(2, 0, vec![]);
    }
}
