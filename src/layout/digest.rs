//! Fingerprints of resolved layout trees.
//!
//! Consumers that cache anything derived from cell geometry can compare
//! digests across rebuilds instead of walking both trees.

use std::fmt;

use blake3::{Hash, Hasher};

use crate::geometry::Rect;
use crate::layout::core::Cell;

/// blake3 hash over the names, bounds and areas of a tree in pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDigest(Hash);

impl LayoutDigest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }
}

impl fmt::Display for LayoutDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<T> Cell<T> {
    /// Contents are not part of the digest; only the resolved layout is.
    pub fn digest(&self) -> LayoutDigest {
        let mut hasher = Hasher::new();
        hash_cell(&mut hasher, self);
        LayoutDigest(hasher.finalize())
    }
}

fn hash_cell<T>(hasher: &mut Hasher, cell: &Cell<T>) {
    let name = cell.name().as_bytes();
    hasher.update(&(name.len() as u64).to_le_bytes());
    hasher.update(name);
    hash_rect(hasher, cell.bounds());
    hash_rect(hasher, cell.area());
    hasher.update(&(cell.cells().len() as u64).to_le_bytes());
    for child in cell.cells() {
        hash_cell(hasher, child);
    }
}

fn hash_rect(hasher: &mut Hasher, rect: Rect) {
    for value in [rect.x, rect.y, rect.width, rect.height] {
        hasher.update(&value.to_bits().to_le_bytes());
    }
}
