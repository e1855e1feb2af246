//! First-fit placement
//!
//! Scans blocks in index order and takes the first one large enough.

use super::PlacementPolicy;

/// Lowest-index block with enough remaining capacity
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl PlacementPolicy for FirstFit {
    fn select(&self, capacities: &[u64], size: u64) -> Option<usize> {
        capacities.iter().position(|&capacity| capacity >= size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fitting_block() {
        assert_eq!(FirstFit.select(&[100, 50], 60), Some(0));
        assert_eq!(FirstFit.select(&[10, 50, 80], 60), Some(2));
    }

    #[test]
    fn test_exact_fit_accepted() {
        assert_eq!(FirstFit.select(&[20, 60], 60), Some(1));
    }

    #[test]
    fn test_no_fit() {
        assert_eq!(FirstFit.select(&[10, 20], 60), None);
        assert_eq!(FirstFit.select(&[], 0), None);
    }
}
