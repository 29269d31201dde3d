//! Structural degree-of-freedom catalog
//!
//! Every node carries six structural DOFs: three translations (X, Y, Z) and
//! three rotations (DX, DY, DZ). A [`Dof`] is a bitmask over those six slots
//! and is used both for constraint bookkeeping and for the set of DOFs an
//! element type can resist.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Number of structural DOFs per node
pub const NUM_STRUC_DOF: usize = 6;

/// Sentinel for a DOF that has no row in the reduced system
pub const INACTIVE_DOF: usize = usize::MAX;

/// Slot positions inside a node's DOF arrays
pub const IX: usize = 0;
pub const IY: usize = 1;
pub const IZ: usize = 2;
pub const IDX: usize = 3;
pub const IDY: usize = 4;
pub const IDZ: usize = 5;

/// Bitmask over the six structural DOFs of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dof(u8);

impl Dof {
    pub const NONE: Dof = Dof(0);
    pub const X: Dof = Dof(1);
    pub const Y: Dof = Dof(2);
    pub const Z: Dof = Dof(4);
    pub const ALL_TRANS: Dof = Dof(7);
    pub const DX: Dof = Dof(8);
    pub const DY: Dof = Dof(16);
    /// Out-of-plane DOFs of a structure lying in the XY plane (Z, DX, DY)
    pub const ALL_NON2D: Dof = Dof(28);
    pub const DZ: Dof = Dof(32);
    pub const ALL_ROT: Dof = Dof(56);
    pub const ALL: Dof = Dof(63);

    /// Single-DOF masks in slot order
    pub const SLOTS: [Dof; NUM_STRUC_DOF] = [
        Dof::X,
        Dof::Y,
        Dof::Z,
        Dof::DX,
        Dof::DY,
        Dof::DZ,
    ];

    /// Build a mask from raw bits; bits above the six structural DOFs are dropped
    pub const fn from_bits(bits: u8) -> Self {
        Dof(bits & Dof::ALL.0)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Mask for the DOF stored at `slot` (0..6)
    pub fn from_slot(slot: usize) -> Option<Self> {
        Dof::SLOTS.get(slot).copied()
    }

    /// True if every DOF in `other` is also in `self`
    pub const fn contains(self, other: Dof) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if `self` and `other` share at least one DOF
    pub const fn intersects(self, other: Dof) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of DOFs in the mask
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Slot indices (0..6) of the DOFs in the mask, in ascending order
    pub fn slots(self) -> impl Iterator<Item = usize> {
        (0..NUM_STRUC_DOF).filter(move |&slot| self.contains(Dof::SLOTS[slot]))
    }
}

impl BitOr for Dof {
    type Output = Dof;

    fn bitor(self, rhs: Dof) -> Dof {
        Dof(self.0 | rhs.0)
    }
}

impl BitOrAssign for Dof {
    fn bitor_assign(&mut self, rhs: Dof) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Dof {
    type Output = Dof;

    fn bitand(self, rhs: Dof) -> Dof {
        Dof(self.0 & rhs.0)
    }
}

impl Not for Dof {
    type Output = Dof;

    /// Complement within the six structural DOFs
    fn not(self) -> Dof {
        Dof(!self.0 & Dof::ALL.0)
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; NUM_STRUC_DOF] = ["X", "Y", "Z", "DX", "DY", "DZ"];
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let names: Vec<&str> = self.slots().map(|slot| NAMES[slot]).collect();
        write!(f, "{}", names.join("|"))
    }
}
