//! Rule table generation for B3/S23.
//!
//! A neighborhood key packs the 3x3 window into 9 bits, MSB first:
//! `nw n ne w c e sw s se`. The center cell sits at bit 4.

pub const KEY_COUNT: usize = 1 << 9;
pub const SELF_BIT: u16 = 4;

/// Conway's rule evaluated directly.
#[inline(always)]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub fn pack_key(
    nw: u8,
    n: u8,
    ne: u8,
    w: u8,
    c: u8,
    e: u8,
    sw: u8,
    s: u8,
    se: u8,
) -> u16 {
    ((nw as u16) << 8)
        | ((n as u16) << 7)
        | ((ne as u16) << 6)
        | ((w as u16) << 5)
        | ((c as u16) << 4)
        | ((e as u16) << 3)
        | ((sw as u16) << 2)
        | ((s as u16) << 1)
        | (se as u16)
}

#[inline(always)]
pub fn key_alive(key: u16) -> bool {
    (key >> SELF_BIT) & 1 != 0
}

#[inline(always)]
pub fn key_neighbors(key: u16) -> u8 {
    ((key & !(1 << SELF_BIT)) & 0x1FF).count_ones() as u8
}

/// Precomputed verdicts for every 9-bit neighborhood.
///
/// Built once per run and shared by reference across workers.
pub struct RuleTable {
    table: [bool; KEY_COUNT],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTable {
    pub fn new() -> Self {
        let mut table = [false; KEY_COUNT];
        for key in 0..KEY_COUNT as u16 {
            table[key as usize] = next_state(key_alive(key), key_neighbors(key));
        }
        Self { table }
    }

    #[inline(always)]
    pub fn lookup(&self, key: u16) -> bool {
        self.table[key as usize]
    }
}
