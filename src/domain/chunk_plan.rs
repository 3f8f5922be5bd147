use crate::domain::chunk_error::{ChunkError, ChunkResult};

/// Lower bound of the first chunk, whatever the smallest sampled key was.
pub const CANONICAL_MIN_KEY: i64 = 1;

/// Primary-key values of a table in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence(Vec<i64>);

impl KeySequence {
    pub fn new(keys: Vec<i64>) -> Self {
        Self(keys)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRange {
    pub start: i64,
    /// Exclusive; `None` for the final chunk.
    pub end: Option<i64>,
}

/// `chunk_count + 1` cut points. The last one is the final sampled key and is
/// never used as an upper bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundarySequence(Vec<i64>);

impl BoundarySequence {
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn chunk_count(&self) -> usize {
        self.0.len() - 1
    }

    pub fn iter_ranges(&self) -> impl Iterator<Item = KeyRange> + '_ {
        let chunk_count = self.chunk_count();
        self.0[..chunk_count]
            .iter()
            .enumerate()
            .map(move |(index, &start)| KeyRange {
                start,
                end: (index + 1 < chunk_count).then(|| self.0[index + 1]),
            })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChunkPlanner {
    chunk_count: usize,
}

impl ChunkPlanner {
    pub fn new(chunk_count: usize) -> ChunkResult<Self> {
        if chunk_count == 0 {
            return Err(ChunkError::InvalidChunkCount);
        }
        Ok(Self { chunk_count })
    }

    /// Samples every `len / chunk_count`-th key by position. Rows left over by
    /// the integer division land in the final, open-ended chunk.
    pub fn plan(&self, keys: &KeySequence) -> ChunkResult<BoundarySequence> {
        let rows = keys.as_slice().len();
        if rows <= self.chunk_count {
            return Err(ChunkError::TooFewRows {
                rows,
                chunk_count: self.chunk_count,
            });
        }

        let stride = rows / self.chunk_count;
        let last_position = rows - 1;
        let keys = keys.as_slice();
        let mut boundaries = (0..=self.chunk_count)
            .map(|index| keys[(index * stride).min(last_position)])
            .collect::<Vec<_>>();
        boundaries[0] = CANONICAL_MIN_KEY;

        tracing::info!("total rows: {rows}");
        tracing::info!("chunk size: {stride}");
        tracing::info!("chunks: {boundaries:?}");

        Ok(BoundarySequence(boundaries))
    }
}
