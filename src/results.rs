//! Result types for truss analysis

use serde::{Deserialize, Serialize};

use crate::error::TrussResult;
use crate::math::iterative::SolveReport;

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }
}

/// Applied nodal force (and moment) components
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeForce {
    pub fx: f64,
    pub fy: f64,
    pub fz: f64,
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
}

impl NodeForce {
    /// Create from array [FX, FY, FZ, MX, MY, MZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }
}

/// Axial forces of one element block, in element order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockAxialForces {
    pub block: String,
    /// Axial force per element (positive = tension)
    pub forces: Vec<f64>,
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements over all blocks
    pub num_elements: usize,
    /// Total DOFs (6 per node)
    pub total_dofs: usize,
    /// Rows of the reduced system
    pub active_dofs: usize,
    /// Outcome of the last solve, if any
    pub solve: Option<SolveReport>,
    /// Largest translation magnitude
    pub max_displacement: f64,
    /// Node ID with the largest translation
    pub max_disp_node: Option<usize>,
    /// Largest absolute axial force
    pub max_axial: f64,
}

impl AnalysisSummary {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> TrussResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
