use std::ops::Range;

use crate::StaticRmq;
use crate::error::Result;

#[inline(always)]
fn better_index(values: &[i64], a: usize, b: usize) -> usize {
    let va = values[a];
    let vb = values[b];
    if va < vb || (va == vb && a < b) { a } else { b }
}

/// Plain sparse table with `O(n log n)` words, returning the leftmost minimum.
///
/// The baseline the succinct structure is measured against.
#[derive(Clone, Debug)]
pub struct SparseTableRmq {
    values: Vec<i64>,
    row_offsets: Vec<usize>,
    table: Vec<u32>,
}

impl SparseTableRmq {
    pub fn new(values: Vec<i64>) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                values,
                row_offsets: Vec::new(),
                table: Vec::new(),
            };
        }

        let levels = n.ilog2() as usize + 1;
        let total_len: usize = (0..levels).map(|k| n + 1 - (1 << k)).sum();
        let mut row_offsets = Vec::with_capacity(levels);
        let mut table = Vec::with_capacity(total_len);

        row_offsets.push(0);
        table.extend(0..n as u32);
        for k in 1..levels {
            let half = 1_usize << (k - 1);
            let len = n + 1 - (1 << k);
            let prev = row_offsets[k - 1];
            row_offsets.push(table.len());
            for i in 0..len {
                let a = table[prev + i] as usize;
                let b = table[prev + i + half] as usize;
                table.push(better_index(&values, a, b) as u32);
            }
        }

        Self {
            values,
            row_offsets,
            table,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn size_in_bytes(&self) -> usize {
        size_of::<Self>()
            + self.values.len() * size_of::<i64>()
            + self.row_offsets.len() * size_of::<usize>()
            + self.table.len() * size_of::<u32>()
    }
}

impl StaticRmq for SparseTableRmq {
    fn build(values: Vec<i64>) -> Result<Self> {
        Ok(Self::new(values))
    }

    fn argmin(&self, range: Range<usize>) -> Option<usize> {
        if range.start >= range.end || range.end > self.len() {
            return None;
        }
        let k = (range.end - range.start).ilog2() as usize;
        let base = self.row_offsets[k];
        let a = self.table[base + range.start] as usize;
        let b = self.table[base + range.end - (1 << k)] as usize;
        Some(better_index(&self.values, a, b))
    }
}
