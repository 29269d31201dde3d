//! Truss Solver - A native Rust finite element library for pin-jointed trusses
//!
//! This library assembles and solves the linear equilibrium of 3D truss
//! structures, supporting:
//! - Two-node bar elements grouped in homogeneous element blocks
//! - Per-DOF constraints and nodal loads with node-major DOF numbering
//! - Automatic constraint of DOFs no element can resist
//! - Jacobi, SOR and SSOR iterative solvers
//! - Axial force recovery and VTU output for ParaView
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//! use truss_solver::prelude::*;
//!
//! let mut model = Model::new();
//!
//! // Add nodes
//! model.add_node(1, 0.0, 0.0, 0.0).unwrap();
//! model.add_node(2, 2.0, 0.0, 0.0).unwrap();
//!
//! // Add a block of bars sharing one section
//! let steel = Rc::new(Material::steel());
//! let section = Rc::new(Property::bar("rod", steel, 1.0e-4));
//! let mut bars: ElementBlock<Bar> = ElementBlock::new("bars", section);
//! bars.add_element(&[1, 2]).unwrap();
//! model.add_block(bars);
//!
//! // Add supports and loads
//! model.add_constraint(Dof::ALL, 0.0, 1).unwrap();
//! model.add_constraint(Dof::Y | Dof::Z, 0.0, 2).unwrap();
//! model.add_force(Dof::X, 1000.0, 2).unwrap();
//!
//! // Analyze
//! model.assemble().unwrap();
//! let report = model.solve_with(&AnalysisOptions::sor(1.0)).unwrap();
//! assert!(report.converged);
//!
//! // Get results
//! let displacement = model.node_displacement(2).unwrap();
//! assert!((displacement.dx - 1.0e-4).abs() < 1e-12);
//! ```

pub mod analysis;
pub mod dof;
pub mod elements;
pub mod error;
pub mod io;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, SolverKind};
    pub use crate::dof::{Dof, INACTIVE_DOF, NUM_STRUC_DOF};
    pub use crate::elements::{
        Bar, Block, Element, ElementBlock, Material, MaterialList, Node, NodeList, Property,
        PropertyList,
    };
    pub use crate::error::{TrussError, TrussResult};
    pub use crate::io::VtkWriter;
    pub use crate::math::iterative::SolveReport;
    pub use crate::model::{DofNumbering, Model, ReducedSystem};
    pub use crate::results::{AnalysisSummary, BlockAxialForces, NodeDisplacement, NodeForce};
}
