//! Node element - represents a point in 3D space

use serde::Serialize;

use crate::dof::{Dof, INACTIVE_DOF, NUM_STRUC_DOF};

/// A 3D node in the finite element model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,

    /// DOFs prescribed by a constraint
    pub constrained_dofs: Dof,

    /// Row of each DOF in the reduced system, or `INACTIVE_DOF`
    #[serde(skip)]
    pub active_dof_index: [usize; NUM_STRUC_DOF],

    /// Position of each DOF in the unreduced, node-major numbering
    #[serde(skip)]
    pub global_dof_index: [usize; NUM_STRUC_DOF],
}

fn inactive() -> [usize; NUM_STRUC_DOF] {
    [INACTIVE_DOF; NUM_STRUC_DOF]
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            constrained_dofs: Dof::NONE,
            active_dof_index: inactive(),
            global_dof_index: inactive(),
        }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// True if the DOF at `slot` is free to move (not constrained)
    pub fn is_active(&self, slot: usize) -> bool {
        Dof::from_slot(slot).is_some_and(|dof| !self.constrained_dofs.contains(dof))
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
