use std::ops::Range;

use crate::StaticRmq;
use crate::config::{Layout, RmqConfig};
use crate::error::Result;
use crate::microblock::MicroblockTable;
use crate::sparse::{BlockTable, SuperblockTable, scan_minima};

/// Constant-time range minimum queries over an owned array of `i64`.
///
/// The array is cut into microblocks, blocks (two microblocks) and
/// superblocks. Ranges inside one microblock are answered from masks shared
/// by all microblocks of the same Cartesian tree shape; longer ranges combine
/// up to four such lookups with a sparse table over block minima and, for
/// ranges crossing whole superblocks, a sparse table over superblock minima.
///
/// When the minimum occurs more than once in the range, the returned index is
/// one of its occurrences but not necessarily the leftmost.
#[derive(Clone, Debug)]
pub struct SuccinctRmq {
    pub(crate) values: Vec<i64>,
    pub(crate) config: RmqConfig,
    pub(crate) layout: Layout,
    pub(crate) micro: MicroblockTable,
    pub(crate) blocks: BlockTable,
    pub(crate) superblocks: SuperblockTable,
}

impl SuccinctRmq {
    /// Builds the structure with the default partition sizes.
    ///
    /// Fails with [`Error::ArrayTooSmall`](crate::Error::ArrayTooSmall) for
    /// fewer than [`RmqConfig::min_len`] elements.
    pub fn new(values: Vec<i64>) -> Result<Self> {
        Self::with_config(values, RmqConfig::default())
    }

    pub fn with_config(values: Vec<i64>, config: RmqConfig) -> Result<Self> {
        let _span = tracing::debug_span!("SuccinctRmq::build", n = values.len()).entered();
        let layout = Layout::new(values.len(), &config)?;

        let micro = MicroblockTable::new(&values, config.microblock_size());
        let (level0, super0) =
            scan_minima(&values, config.block_size(), config.superblock_size());
        let blocks = BlockTable::new(&values, &layout, config.block_size(), level0);
        let superblocks = SuperblockTable::new(&values, &layout, super0);

        tracing::debug!(
            blocks = layout.blocks,
            superblocks = layout.superblocks,
            block_depth = layout.block_depth,
            superblock_depth = layout.superblock_depth,
            "built sparse tables"
        );

        Ok(Self {
            values,
            config,
            layout,
            micro,
            blocks,
            superblocks,
        })
    }

    pub fn len(&self) -> usize {
        self.layout.len
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn config(&self) -> &RmqConfig {
        &self.config
    }

    /// Bytes owned by the structure, the array included.
    pub fn size_in_bytes(&self) -> usize {
        size_of::<Self>()
            + self.values.len() * size_of::<i64>()
            + self.micro.heap_size()
            + self.blocks.heap_size()
            + self.superblocks.heap_size()
    }

    /// Keeps `current` unless `candidate` is strictly smaller.
    #[inline(always)]
    fn smaller(&self, current: usize, candidate: usize) -> usize {
        if self.values[candidate] < self.values[current] {
            candidate
        } else {
            current
        }
    }

    /// Index of a minimum of `values[i..=j]`.
    ///
    /// # Panics
    ///
    /// Panics unless `i <= j < self.len()`.
    pub fn query(&self, i: usize, j: usize) -> usize {
        assert!(i <= j && j < self.layout.len, "invalid query [{i}, {j}]");
        let s = self.config.microblock_size();
        let mb_i = i / s;
        let mb_j = j / s;
        let s_mi = mb_i * s;

        if mb_i == mb_j {
            return self.micro.range_min(mb_i, i - s_mi, j - s_mi);
        }

        let s_mj = mb_j * s;
        let mut min = self.micro.range_min(mb_i, i - s_mi, s - 1);
        min = self.smaller(min, self.micro.range_min(mb_j, 0, j - s_mj));
        if mb_j == mb_i + 1 {
            return min;
        }

        let sprime = self.config.block_size();
        let b_i = i / sprime;
        let b_j = j / sprime;
        // A block holds two microblocks: cover the rest of i's block and the
        // start of j's block so that only whole blocks remain in between.
        if i < b_i * sprime + s {
            min = self.smaller(min, self.micro.range_min(mb_i + 1, 0, s - 1));
        }
        if j >= b_j * sprime + s {
            min = self.smaller(min, self.micro.range_min(mb_j - 1, 0, s - 1));
        }

        let lo = b_i + 1;
        if lo >= b_j {
            return min;
        }

        let bps = self.config.blocks_per_superblock();
        if b_j - lo < bps {
            return self.smaller(min, self.blocks.argmin(&self.values, lo, b_j));
        }

        // At least a superblock's worth of blocks: the rest of i's superblock,
        // the whole superblocks in between and the start of j's superblock.
        let sb_i = b_i / bps;
        let sb_j = b_j / bps;
        let left_end = (sb_i + 1) * bps;
        let right_start = sb_j * bps;
        if lo < left_end {
            min = self.smaller(min, self.blocks.argmin(&self.values, lo, left_end));
        }
        if right_start < b_j {
            min = self.smaller(min, self.blocks.argmin(&self.values, right_start, b_j));
        }
        if sb_i + 1 < sb_j {
            let mid = self.superblocks.argmin(&self.values, sb_i + 1, sb_j);
            min = self.smaller(min, mid);
        }
        min
    }
}

impl StaticRmq for SuccinctRmq {
    fn build(values: Vec<i64>) -> Result<Self> {
        Self::new(values)
    }

    fn argmin(&self, range: Range<usize>) -> Option<usize> {
        if range.start >= range.end || range.end > self.len() {
            return None;
        }
        Some(self.query(range.start, range.end - 1))
    }
}
