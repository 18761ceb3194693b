use crate::bits::floor_log2_len;
use crate::error::{Error, Result};

/// Largest microblock: in-microblock answers are stored as one byte per position.
pub const MAX_MICROBLOCK_SIZE: usize = 8;

/// Largest superblock: block-relative offsets are stored in 16 bits.
pub const MAX_SUPERBLOCK_SIZE: usize = 1 << 16;

/// Sizes of the three nested partitions of the input array.
///
/// Blocks are always twice as long as microblocks, so a query boundary never
/// needs more than one extra in-microblock lookup to reach a block boundary.
/// The default is the classic sizing for 32-bit words: microblocks of 8,
/// blocks of 16 and superblocks of 256 elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RmqConfig {
    microblock_size: usize,
    superblock_size: usize,
}

impl Default for RmqConfig {
    fn default() -> Self {
        Self {
            microblock_size: 1 << 3,
            superblock_size: 1 << 8,
        }
    }
}

impl RmqConfig {
    pub fn new(microblock_size: usize, superblock_size: usize) -> Result<Self> {
        if !microblock_size.is_power_of_two() || microblock_size > MAX_MICROBLOCK_SIZE {
            return Err(Error::InvalidConfig(format!(
                "microblock size {microblock_size} must be a power of two in 1..={MAX_MICROBLOCK_SIZE}"
            )));
        }
        let block_size = 2 * microblock_size;
        if !superblock_size.is_power_of_two()
            || superblock_size < 2 * block_size
            || superblock_size > MAX_SUPERBLOCK_SIZE
        {
            return Err(Error::InvalidConfig(format!(
                "superblock size {superblock_size} must be a power of two in {}..={MAX_SUPERBLOCK_SIZE}",
                2 * block_size
            )));
        }
        Ok(Self {
            microblock_size,
            superblock_size,
        })
    }

    pub fn microblock_size(&self) -> usize {
        self.microblock_size
    }

    pub fn block_size(&self) -> usize {
        2 * self.microblock_size
    }

    pub fn superblock_size(&self) -> usize {
        self.superblock_size
    }

    pub(crate) fn blocks_per_superblock(&self) -> usize {
        self.superblock_size / self.block_size()
    }

    fn min_blocks(&self) -> usize {
        self.superblock_size / (2 * self.block_size())
    }

    /// Smallest array length the structure can be built over.
    pub fn min_len(&self) -> usize {
        (self.min_blocks() - 1) * self.block_size() + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) len: usize,
    pub(crate) microblocks: usize,
    pub(crate) blocks: usize,
    pub(crate) superblocks: usize,
    pub(crate) block_depth: usize,
    pub(crate) superblock_depth: usize,
}

impl Layout {
    pub(crate) fn new(len: usize, config: &RmqConfig) -> Result<Self> {
        if len > u32::MAX as usize {
            return Err(Error::ArrayTooLarge(len));
        }
        let blocks = len.div_ceil(config.block_size());
        let required = config.min_blocks();
        if blocks < required {
            return Err(Error::ArrayTooSmall {
                len,
                blocks,
                required,
            });
        }
        let superblocks = len.div_ceil(config.superblock_size());
        Ok(Self {
            len,
            microblocks: len.div_ceil(config.microblock_size()),
            blocks,
            superblocks,
            block_depth: floor_log2_len(config.blocks_per_superblock()),
            superblock_depth: floor_log2_len(superblocks) + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_sizing() {
        let config = RmqConfig::default();
        assert_eq!(config.microblock_size(), 8);
        assert_eq!(config.block_size(), 16);
        assert_eq!(config.superblock_size(), 256);
        assert_eq!(config.min_len(), 113);
        assert_eq!(RmqConfig::new(8, 256).unwrap(), config);
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(matches!(RmqConfig::new(3, 256), Err(Error::InvalidConfig(_))));
        assert!(matches!(RmqConfig::new(16, 256), Err(Error::InvalidConfig(_))));
        assert!(matches!(RmqConfig::new(0, 256), Err(Error::InvalidConfig(_))));
        assert!(matches!(RmqConfig::new(8, 16), Err(Error::InvalidConfig(_))));
        assert!(matches!(RmqConfig::new(8, 48), Err(Error::InvalidConfig(_))));
        assert!(matches!(RmqConfig::new(8, 1 << 17), Err(Error::InvalidConfig(_))));
        assert!(RmqConfig::new(1, 4).is_ok());
        assert!(RmqConfig::new(2, 8).is_ok());
    }

    #[test]
    fn layout_threshold() {
        let config = RmqConfig::default();
        assert!(matches!(
            Layout::new(112, &config),
            Err(Error::ArrayTooSmall {
                len: 112,
                blocks: 7,
                required: 8
            })
        ));
        assert!(matches!(Layout::new(0, &config), Err(Error::ArrayTooSmall { .. })));

        let layout = Layout::new(113, &config).unwrap();
        assert_eq!(layout.microblocks, 15);
        assert_eq!(layout.blocks, 8);
        assert_eq!(layout.superblocks, 1);
        assert_eq!(layout.block_depth, 4);
        assert_eq!(layout.superblock_depth, 1);

        let layout = Layout::new(1000, &config).unwrap();
        assert_eq!(layout.microblocks, 125);
        assert_eq!(layout.blocks, 63);
        assert_eq!(layout.superblocks, 4);
        assert_eq!(layout.superblock_depth, 3);
    }

    #[test]
    fn small_config_accepts_single_element() {
        let config = RmqConfig::new(1, 4).unwrap();
        assert_eq!(config.min_len(), 1);
        let layout = Layout::new(1, &config).unwrap();
        assert_eq!(layout.block_depth, 1);
        assert_eq!(layout.superblock_depth, 1);
    }
}
