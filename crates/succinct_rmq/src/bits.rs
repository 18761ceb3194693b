pub(crate) const LSB_TABLE_256: [u8; 256] = build_lsb_table();

pub(crate) const LOG_TABLE_256: [u8; 256] = build_log_table();

const fn build_lsb_table() -> [u8; 256] {
    let mut table = [0_u8; 256];
    let mut v = 1;
    while v < 256 {
        let mut x = v;
        let mut count = 0;
        while x & 1 == 0 {
            x >>= 1;
            count += 1;
        }
        table[v] = count;
        v += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let mut table = [0_u8; 256];
    let mut v = 2;
    while v < 256 {
        table[v] = table[v / 2] + 1;
        v += 1;
    }
    table
}

#[inline(always)]
pub(crate) fn lsb(x: u32) -> u32 {
    debug_assert!(x != 0);
    if x & 0xFFFF != 0 {
        if x & 0xFF != 0 {
            LSB_TABLE_256[(x & 0xFF) as usize] as u32
        } else {
            8 + LSB_TABLE_256[((x >> 8) & 0xFF) as usize] as u32
        }
    } else if x & 0xFF_0000 != 0 {
        16 + LSB_TABLE_256[((x >> 16) & 0xFF) as usize] as u32
    } else {
        24 + LSB_TABLE_256[(x >> 24) as usize] as u32
    }
}

#[inline(always)]
pub(crate) fn floor_log2(x: u32) -> u32 {
    debug_assert!(x != 0);
    let hi = x >> 16;
    if hi != 0 {
        let t = x >> 24;
        if t != 0 {
            24 + LOG_TABLE_256[t as usize] as u32
        } else {
            16 + LOG_TABLE_256[(hi & 0xFF) as usize] as u32
        }
    } else {
        let t = x >> 8;
        if t != 0 {
            8 + LOG_TABLE_256[t as usize] as u32
        } else {
            LOG_TABLE_256[x as usize] as u32
        }
    }
}

#[inline(always)]
pub(crate) fn floor_log2_len(x: usize) -> usize {
    debug_assert!(x > 0 && x <= u32::MAX as usize);
    floor_log2(x as u32) as usize
}

#[inline(always)]
pub(crate) fn clear_below(mask: u8, pos: usize) -> u8 {
    debug_assert!(pos < 8);
    mask & (u8::MAX << pos)
}
