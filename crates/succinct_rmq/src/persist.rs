// Little-endian, no header: n (u32), array (i64), types (u16), block table
// (u8 offsets up to superblock 512, else u16), superblock table (u32), masks (u8).
use std::io::{self, Read, Write};

use crate::catalan::type_count;
use crate::config::{Layout, RmqConfig};
use crate::error::{Error, Result};
use crate::microblock::MicroblockTable;
use crate::sparse::{BlockTable, SuperblockTable};
use crate::succinct::SuccinctRmq;

const CHUNK_WORDS: usize = 1 << 14;

trait LeWord: Copy {
    const WIDTH: usize;
    fn put(self, out: &mut Vec<u8>);
    fn get(bytes: &[u8]) -> Self;
}

macro_rules! impl_le_word {
    ($($t:ty),*) => {$(
        impl LeWord for $t {
            const WIDTH: usize = size_of::<$t>();

            #[inline]
            fn put(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn get(bytes: &[u8]) -> Self {
                let mut buf = [0_u8; size_of::<$t>()];
                buf.copy_from_slice(bytes);
                <$t>::from_le_bytes(buf)
            }
        }
    )*};
}

impl_le_word!(u8, u16, u32, i64);

fn write_words<W: Write, T: LeWord>(writer: &mut W, words: &[T]) -> io::Result<()> {
    let mut buf = Vec::with_capacity(words.len().min(CHUNK_WORDS) * T::WIDTH);
    for chunk in words.chunks(CHUNK_WORDS) {
        buf.clear();
        for &w in chunk {
            w.put(&mut buf);
        }
        writer.write_all(&buf)?;
    }
    Ok(())
}

fn read_words<R: Read, T: LeWord>(
    reader: &mut R,
    count: usize,
    section: &'static str,
) -> Result<Vec<T>> {
    let mut words = Vec::with_capacity(count.min(CHUNK_WORDS));
    let mut buf = vec![0_u8; count.min(CHUNK_WORDS) * T::WIDTH];
    let mut remaining = count;
    while remaining > 0 {
        let take = remaining.min(CHUNK_WORDS);
        let bytes = &mut buf[..take * T::WIDTH];
        reader.read_exact(bytes).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::Truncated { section },
            _ => Error::Io(e),
        })?;
        words.extend(bytes.chunks_exact(T::WIDTH).map(T::get));
        remaining -= take;
    }
    Ok(words)
}

fn corrupt(section: &'static str, reason: String) -> Error {
    Error::Corrupt { section, reason }
}

fn narrow_offsets(config: &RmqConfig) -> bool {
    config.superblock_size() <= 512
}

impl SuccinctRmq {
    pub fn save<W: Write>(&self, mut writer: W) -> Result<()> {
        let _span = tracing::debug_span!("SuccinctRmq::save", n = self.len()).entered();

        writer.write_all(&(self.len() as u32).to_le_bytes())?;
        write_words(&mut writer, &self.values)?;
        write_words(&mut writer, self.micro.types())?;
        if narrow_offsets(&self.config) {
            let offsets: Vec<u8> = self.blocks.offsets().iter().map(|&o| o as u8).collect();
            write_words(&mut writer, &offsets)?;
        } else {
            write_words(&mut writer, self.blocks.offsets())?;
        }
        write_words(&mut writer, self.superblocks.positions())?;
        write_words(&mut writer, self.micro.masks())?;
        writer.flush()?;

        tracing::debug!(bytes = self.size_in_bytes(), "saved");
        Ok(())
    }

    /// Reads a structure saved with the default partition sizes.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        Self::load_with_config(reader, RmqConfig::default())
    }

    /// Reads a structure saved with `config`. Bytes after the last table are left unread.
    pub fn load_with_config<R: Read>(mut reader: R, config: RmqConfig) -> Result<Self> {
        let _span = tracing::debug_span!("SuccinctRmq::load").entered();

        let n = read_words::<_, u32>(&mut reader, 1, "length")?[0] as usize;
        let layout = Layout::new(n, &config)?;
        let s = config.microblock_size();

        let values: Vec<i64> = read_words(&mut reader, n, "array")?;
        let types: Vec<u16> = read_words(&mut reader, layout.microblocks, "microblock types")?;
        let offset_count = layout.block_depth * layout.blocks;
        let offsets: Vec<u16> = if narrow_offsets(&config) {
            read_words::<_, u8>(&mut reader, offset_count, "block table")?
                .into_iter()
                .map(u16::from)
                .collect()
        } else {
            read_words(&mut reader, offset_count, "block table")?
        };
        let positions: Vec<u32> = read_words(
            &mut reader,
            layout.superblock_depth * layout.superblocks,
            "superblock table",
        )?;
        let masks: Vec<u8> = read_words(&mut reader, type_count(s) * s, "microblock masks")?;

        validate(&layout, &config, &types, &offsets, &positions, &masks)?;
        tracing::debug!(
            n,
            blocks = layout.blocks,
            superblocks = layout.superblocks,
            "loaded"
        );

        Ok(Self {
            values,
            config,
            layout,
            micro: MicroblockTable::from_parts(s, types, masks),
            blocks: BlockTable::from_parts(config.block_size(), layout.blocks, offsets),
            superblocks: SuperblockTable::from_parts(layout.superblocks, positions),
        })
    }
}

fn validate(
    layout: &Layout,
    config: &RmqConfig,
    types: &[u16],
    offsets: &[u16],
    positions: &[u32],
    masks: &[u8],
) -> Result<()> {
    let s = config.microblock_size();
    let count = type_count(s);
    let mut referenced = vec![false; count];
    for (mb, &ty) in types.iter().enumerate() {
        let ty = ty as usize;
        if ty >= count {
            return Err(corrupt(
                "microblock types",
                format!("microblock {mb} has type {ty}, expected below {count}"),
            ));
        }
        referenced[ty] = true;
    }

    for (ty, row) in masks.chunks_exact(s).enumerate() {
        if !referenced[ty] {
            continue;
        }
        for (pos, &mask) in row.iter().enumerate() {
            // A mask may only name offsets to the left of its position.
            if u32::from(mask) >> pos != 0 {
                return Err(corrupt(
                    "microblock masks",
                    format!("type {ty} position {pos} has mask {mask:#010b}"),
                ));
            }
        }
    }

    let block_size = config.block_size();
    for (k, &offset) in offsets.iter().enumerate() {
        let (level, block) = (k / layout.blocks, k % layout.blocks);
        let pos = block * block_size + offset as usize;
        if offset as usize >= block_size << level || pos >= layout.len {
            return Err(corrupt(
                "block table",
                format!("level {level} block {block} points to {pos}"),
            ));
        }
    }

    let superblock_size = config.superblock_size();
    for (k, &pos) in positions.iter().enumerate() {
        let (level, sb) = (k / layout.superblocks, k % layout.superblocks);
        let pos = pos as usize;
        let start = sb * superblock_size;
        if pos < start || pos >= layout.len {
            return Err(corrupt(
                "superblock table",
                format!("level {level} superblock {sb} points to {pos}"),
            ));
        }
    }

    Ok(())
}
