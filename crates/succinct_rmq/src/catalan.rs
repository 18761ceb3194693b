pub(crate) const MAX_SHAPE_LEN: usize = 16;

// CATALAN[s][s] is the s-th Catalan number.
pub(crate) const CATALAN: [[u32; MAX_SHAPE_LEN + 1]; MAX_SHAPE_LEN + 1] = build_catalan();

const fn build_catalan() -> [[u32; MAX_SHAPE_LEN + 1]; MAX_SHAPE_LEN + 1] {
    let mut table = [[0_u32; MAX_SHAPE_LEN + 1]; MAX_SHAPE_LEN + 1];
    let mut q = 0;
    while q <= MAX_SHAPE_LEN {
        table[0][q] = 1;
        q += 1;
    }
    let mut p = 1;
    while p <= MAX_SHAPE_LEN {
        let mut q = p;
        while q <= MAX_SHAPE_LEN {
            table[p][q] = table[p - 1][q] + table[p][q - 1];
            q += 1;
        }
        p += 1;
    }
    table
}

#[inline]
pub(crate) fn type_count(size: usize) -> usize {
    CATALAN[size][size] as usize
}
