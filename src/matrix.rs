use crate::similarity::PairScore;
use serde::Serialize;

/// Square, symmetric similarity matrix in batch order. The diagonal is
/// fixed at 100 (self-similarity) and is never run through the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SimilarityMatrix {
    cells: Vec<Vec<PairScore>>,
}

impl SimilarityMatrix {
    /// Assemble the full matrix from upper-triangle pair scores, mirroring
    /// each score so `matrix[i][j] == matrix[j][i]` holds by construction.
    pub fn from_pair_scores(size: usize, scores: &[(usize, usize, PairScore)]) -> SimilarityMatrix {
        let mut cells = vec![vec![PairScore::Percent(100); size]; size];
        for &(i, j, score) in scores {
            debug_assert!(i < j && j < size);
            cells[i][j] = score;
            cells[j][i] = score;
        }
        SimilarityMatrix { cells }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> PairScore {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[Vec<PairScore>] {
        &self.cells
    }
}
