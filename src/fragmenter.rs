//! Sliding windows over a sequence, sized to a recognition site.
//!
//! Both window sets are plain vectors indexed by offset. Sense window `i`
//! starts `i` bases from the sense 5' end. Antisense window `p` is the reverse
//! complement of a sense window, stored so that `p` is the distance of its own
//! 5' end from the 5' end of the antisense strand.

use crate::iupac_code::IupacCode;

/// Sense windows `bases[i..i + k]` for `i` in `0..=len - k`
pub fn windows(bases: &[u8], k: usize) -> Vec<&[u8]> {
    if k == 0 || bases.len() < k {
        return vec![];
    }
    bases.windows(k).collect()
}

/// Reverse-complemented windows; entry `p` comes from sense offset `len - p - k`
pub fn anti_windows(bases: &[u8], k: usize) -> Vec<Vec<u8>> {
    windows(bases, k)
        .into_iter()
        .rev()
        .map(reverse_complement)
        .collect()
}

/// The bases that straddle the origin of a circular sequence: the last window
/// and the first window joined, minus the base at each end that a regular
/// window already covers. Windows of this joint start at sense offsets
/// `len - k + 1 ..= len - 1`.
pub fn joint_window(bases: &[u8], k: usize) -> Option<Vec<u8>> {
    if k < 2 || bases.len() < k {
        return None;
    }
    let len = bases.len();
    let mut joint = Vec::with_capacity(2 * k - 2);
    joint.extend_from_slice(&bases[len - k + 1..]);
    joint.extend_from_slice(&bases[..k - 1]);
    Some(joint)
}

#[inline(always)]
fn reverse_complement(window: &[u8]) -> Vec<u8> {
    window
        .iter()
        .rev()
        .map(|&c| IupacCode::letter_complement(c))
        .collect()
}
