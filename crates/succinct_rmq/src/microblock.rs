// Fischer & Heun type encoding, Alstrup et al. in-block masks.
use crate::bits::{clear_below, lsb};
use crate::catalan::{CATALAN, type_count};

#[derive(Clone, Debug)]
pub(crate) struct MicroblockTable {
    size: usize,
    types: Vec<u16>,
    // type_count(size) rows of size masks
    prec: Vec<u8>,
}

impl MicroblockTable {
    pub(crate) fn new(values: &[i64], size: usize) -> Self {
        let count = type_count(size);
        let mut types = Vec::with_capacity(values.len().div_ceil(size));
        let mut prec = vec![0_u8; count * size];
        let mut seen = vec![false; count];

        let mut path = vec![0_i64; size + 1];
        let mut stack = Vec::with_capacity(size);

        for block in values.chunks(size) {
            let ty = classify(block, size, &mut path);
            types.push(ty as u16);
            if !seen[ty] {
                seen[ty] = true;
                fill_masks(block, &mut prec[ty * size..(ty + 1) * size], &mut stack);
            }
        }

        tracing::debug!(
            microblocks = types.len(),
            distinct_types = seen.iter().filter(|&&s| s).count(),
            type_count = count,
            "classified microblocks"
        );

        Self { size, types, prec }
    }

    pub(crate) fn from_parts(size: usize, types: Vec<u16>, prec: Vec<u8>) -> Self {
        debug_assert_eq!(prec.len(), type_count(size) * size);
        Self { size, types, prec }
    }

    pub(crate) fn types(&self) -> &[u16] {
        &self.types
    }

    pub(crate) fn masks(&self) -> &[u8] {
        &self.prec
    }

    #[inline(always)]
    fn row(&self, microblock: usize) -> &[u8] {
        let ty = self.types[microblock] as usize;
        &self.prec[ty * self.size..(ty + 1) * self.size]
    }

    #[inline(always)]
    pub(crate) fn range_min(&self, microblock: usize, from: usize, to: usize) -> usize {
        debug_assert!(from <= to && to < self.size);
        let start = microblock * self.size;
        let mask = clear_below(self.row(microblock)[to], from);
        if mask == 0 {
            start + to
        } else {
            start + lsb(u32::from(mask)) as usize
        }
    }

    pub(crate) fn heap_size(&self) -> usize {
        self.types.len() * size_of::<u16>() + self.prec.len()
    }
}

fn classify(block: &[i64], size: usize, path: &mut [i64]) -> usize {
    let mut q = size;
    let mut p = size - 1;
    let mut ty = 0_u32;
    // path[1..=q - p] is the rightmost path; q - p never drops below 1.
    path[1] = block[0];
    for &x in &block[1..] {
        p -= 1;
        while q - p > 1 && path[q - p - 1] > x {
            ty += CATALAN[p][q];
            q -= 1;
        }
        path[q - p] = x;
    }
    ty as usize
}

fn fill_masks(block: &[i64], row: &mut [u8], stack: &mut Vec<usize>) {
    stack.clear();
    for (pos, &x) in block.iter().enumerate() {
        while let Some(&top) = stack.last() {
            if x < block[top] {
                stack.pop();
            } else {
                break;
            }
        }
        row[pos] = match stack.last() {
            Some(&g) => row[g] | (1 << g),
            None => 0,
        };
        stack.push(pos);
    }
}
