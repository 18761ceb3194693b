use crate::bits::floor_log2_len;
use crate::config::Layout;

#[inline(always)]
fn leftmost_min(values: &[i64], a: usize, b: usize) -> usize {
    if values[a] <= values[b] { a } else { b }
}

pub(crate) fn scan_minima(
    values: &[i64],
    block_size: usize,
    superblock_size: usize,
) -> (Vec<u16>, Vec<u32>) {
    let n = values.len();
    let mut block_offsets = Vec::with_capacity(n.div_ceil(block_size));
    let mut superblock_mins = Vec::with_capacity(n.div_ceil(superblock_size));

    let mut superblock_min = 0_usize;
    for (b, block) in values.chunks(block_size).enumerate() {
        let start = b * block_size;
        let mut best = 0_usize;
        for (offset, &v) in block.iter().enumerate().skip(1) {
            if v < block[best] {
                best = offset;
            }
        }
        block_offsets.push(best as u16);
        if values[start + best] < values[superblock_min] {
            superblock_min = start + best;
        }

        let end = start + block.len();
        if end % superblock_size == 0 || end == n {
            superblock_mins.push(superblock_min as u32);
            superblock_min = end;
        }
    }

    (block_offsets, superblock_mins)
}

// offsets[k * blocks + b]: offset from the start of b of a minimum of blocks b..b + 2^k
#[derive(Clone, Debug)]
pub(crate) struct BlockTable {
    block_size: usize,
    blocks: usize,
    offsets: Vec<u16>,
}

impl BlockTable {
    pub(crate) fn new(
        values: &[i64],
        layout: &Layout,
        block_size: usize,
        level0: Vec<u16>,
    ) -> Self {
        let blocks = layout.blocks;
        debug_assert_eq!(level0.len(), blocks);
        let mut offsets = level0;
        offsets.reserve(blocks * (layout.block_depth - 1));

        for level in 1..layout.block_depth {
            let dist = 1_usize << (level - 1);
            // The size check in `Layout::new` keeps every dist below the block count.
            debug_assert!(dist <= blocks);
            let prev = (level - 1) * blocks;
            for b in 0..blocks {
                let offset = if b + dist < blocks {
                    let left = offsets[prev + b];
                    let right = offsets[prev + b + dist];
                    let left_pos = b * block_size + left as usize;
                    let right_pos = (b + dist) * block_size + right as usize;
                    if values[left_pos] <= values[right_pos] {
                        left
                    } else {
                        right + (dist * block_size) as u16
                    }
                } else {
                    offsets[prev + b]
                };
                offsets.push(offset);
            }
        }

        Self {
            block_size,
            blocks,
            offsets,
        }
    }

    pub(crate) fn from_parts(block_size: usize, blocks: usize, offsets: Vec<u16>) -> Self {
        Self {
            block_size,
            blocks,
            offsets,
        }
    }

    pub(crate) fn offsets(&self) -> &[u16] {
        &self.offsets
    }

    #[inline(always)]
    pub(crate) fn position(&self, level: usize, block: usize) -> usize {
        block * self.block_size + self.offsets[level * self.blocks + block] as usize
    }

    #[inline(always)]
    pub(crate) fn argmin(&self, values: &[i64], lo: usize, hi: usize) -> usize {
        debug_assert!(lo < hi && hi <= self.blocks);
        let k = floor_log2_len(hi - lo);
        let a = self.position(k, lo);
        let b = self.position(k, hi - (1 << k));
        leftmost_min(values, a, b)
    }

    pub(crate) fn heap_size(&self) -> usize {
        self.offsets.len() * size_of::<u16>()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SuperblockTable {
    superblocks: usize,
    positions: Vec<u32>,
}

impl SuperblockTable {
    pub(crate) fn new(values: &[i64], layout: &Layout, level0: Vec<u32>) -> Self {
        let superblocks = layout.superblocks;
        debug_assert_eq!(level0.len(), superblocks);
        let mut positions = level0;
        positions.reserve(superblocks * (layout.superblock_depth - 1));

        for level in 1..layout.superblock_depth {
            let dist = 1_usize << (level - 1);
            let prev = (level - 1) * superblocks;
            for sb in 0..superblocks {
                let pos = if sb + dist < superblocks {
                    let left = positions[prev + sb];
                    let right = positions[prev + sb + dist];
                    leftmost_min(values, left as usize, right as usize) as u32
                } else {
                    positions[prev + sb]
                };
                positions.push(pos);
            }
        }

        Self {
            superblocks,
            positions,
        }
    }

    pub(crate) fn from_parts(superblocks: usize, positions: Vec<u32>) -> Self {
        Self {
            superblocks,
            positions,
        }
    }

    pub(crate) fn positions(&self) -> &[u32] {
        &self.positions
    }

    #[inline(always)]
    pub(crate) fn position(&self, level: usize, superblock: usize) -> usize {
        self.positions[level * self.superblocks + superblock] as usize
    }

    #[inline(always)]
    pub(crate) fn argmin(&self, values: &[i64], lo: usize, hi: usize) -> usize {
        debug_assert!(lo < hi && hi <= self.superblocks);
        let k = floor_log2_len(hi - lo);
        let a = self.position(k, lo);
        let b = self.position(k, hi - (1 << k));
        leftmost_min(values, a, b)
    }

    pub(crate) fn heap_size(&self) -> usize {
        self.positions.len() * size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::RmqConfig;

    fn tables(values: &[i64], config: &RmqConfig) -> (Layout, BlockTable, SuperblockTable) {
        let layout = Layout::new(values.len(), config).unwrap();
        let (level0, super0) = scan_minima(values, config.block_size(), config.superblock_size());
        let blocks = BlockTable::new(values, &layout, config.block_size(), level0);
        let superblocks = SuperblockTable::new(values, &layout, super0);
        (layout, blocks, superblocks)
    }

    fn range_min(values: &[i64], start: usize, end: usize) -> i64 {
        *values[start..end.min(values.len())].iter().min().unwrap()
    }

    #[test]
    fn entries_hold_minima_of_their_ranges() {
        let mut rng = StdRng::seed_from_u64(0xB10C_5EED);
        let configs = [
            RmqConfig::default(),
            RmqConfig::new(1, 4).unwrap(),
            RmqConfig::new(2, 16).unwrap(),
            RmqConfig::new(4, 64).unwrap(),
        ];
        for config in configs {
            let bs = config.block_size();
            let ss = config.superblock_size();
            for n in [config.min_len(), config.min_len() + 1, 300, 777, 1500] {
                let values: Vec<i64> = (0..n).map(|_| rng.random_range(-20..=20)).collect();
                let (layout, blocks, superblocks) = tables(&values, &config);

                for level in 0..layout.block_depth {
                    for b in 0..layout.blocks {
                        let pos = blocks.position(level, b);
                        let (start, end) = (b * bs, (b + (1 << level)) * bs);
                        assert!(start <= pos && pos < end.min(n), "n={n} level={level} b={b}");
                        assert_eq!(values[pos], range_min(&values, start, end));
                    }
                }
                for level in 0..layout.superblock_depth {
                    for sb in 0..layout.superblocks {
                        let pos = superblocks.position(level, sb);
                        let (start, end) = (sb * ss, (sb + (1 << level)) * ss);
                        assert!(start <= pos && pos < end.min(n), "n={n} level={level} sb={sb}");
                        assert_eq!(values[pos], range_min(&values, start, end));
                    }
                }
            }
        }
    }

    #[test]
    fn level_zero_prefers_leftmost() {
        let mut values = vec![7_i64; 600];
        values[20] = 1;
        values[21] = 1;
        values[300] = 1;
        values[599] = 0;
        let (_, blocks, superblocks) = tables(&values, &RmqConfig::default());
        assert_eq!(blocks.position(0, 1), 20);
        assert_eq!(blocks.position(0, 0), 0);
        assert_eq!(superblocks.position(0, 0), 20);
        assert_eq!(superblocks.position(0, 1), 300);
        assert_eq!(superblocks.position(0, 2), 599);
        assert_eq!(superblocks.position(1, 0), 20);
    }

    #[test]
    fn argmin_over_block_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = RmqConfig::default();
        let values: Vec<i64> = (0..5000).map(|_| rng.random_range(-1000..=1000)).collect();
        let (layout, blocks, superblocks) = tables(&values, &config);
        let bps = config.blocks_per_superblock();
        for lo in 0..layout.blocks {
            for hi in lo + 1..=(lo + bps - 1).min(layout.blocks) {
                let pos = blocks.argmin(&values, lo, hi);
                assert_eq!(values[pos], range_min(&values, lo * 16, hi * 16));
            }
        }
        for lo in 0..layout.superblocks {
            for hi in lo + 1..=layout.superblocks {
                let pos = superblocks.argmin(&values, lo, hi);
                assert_eq!(values[pos], range_min(&values, lo * 256, hi * 256));
            }
        }
    }
}
