//! Truss model - nodes, element blocks, constraints, loads and the reduced system

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::analysis::{AnalysisOptions, SolverKind};
use crate::dof::{Dof, INACTIVE_DOF, NUM_STRUC_DOF};
use crate::elements::{Block, NodeList};
use crate::error::{TrussError, TrussResult};
use crate::math::iterative::{jacobi, sor, ssor, SolveReport};
use crate::math::{Mat, Vector};
use crate::results::{AnalysisSummary, BlockAxialForces, NodeDisplacement, NodeForce};

/// Lifecycle of the global (unreduced) DOF numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DofNumbering {
    /// Nodes may still be added
    #[default]
    Unfrozen,
    /// Global indices are assigned; the node set is fixed
    Frozen { num_global: usize },
}

/// Linear system over the active (unconstrained) DOFs
#[derive(Debug, Clone)]
pub struct ReducedSystem {
    pub stiffness: Mat,
    pub displacement: Vector,
    pub force: Vector,
}

impl ReducedSystem {
    /// System with a zero initial displacement
    pub fn new(stiffness: Mat, force: Vector) -> TrussResult<Self> {
        let n = stiffness.nrows();
        if stiffness.ncols() != n || force.len() != n {
            return Err(TrussError::DimensionMismatch(format!(
                "stiffness is {}x{} but force has {} entries",
                n,
                stiffness.ncols(),
                force.len()
            )));
        }
        Ok(Self {
            stiffness,
            displacement: Vector::zeros(n),
            force,
        })
    }

    /// Number of active DOFs
    pub fn size(&self) -> usize {
        self.force.len()
    }

    /// Solve in place, starting from the current displacement
    pub fn solve(&mut self, options: &AnalysisOptions) -> TrussResult<SolveReport> {
        match options.solver {
            SolverKind::Jacobi => jacobi::solve(&self.stiffness, &mut self.displacement, &self.force),
            SolverKind::Sor => sor::solve_with_limit(
                &self.stiffness,
                &mut self.displacement,
                &self.force,
                options.tolerance,
                options.relaxation,
                options.max_iterations,
            ),
            SolverKind::Ssor => ssor::solve_with_limit(
                &self.stiffness,
                &mut self.displacement,
                &self.force,
                options.tolerance,
                options.relaxation,
                options.max_iterations,
            ),
        }
    }
}

/// A pin-jointed truss model
#[derive(Debug)]
pub struct Model {
    nodes: NodeList,
    blocks: Vec<Box<dyn Block>>,
    /// Accumulated constraint mask per internal node index
    constraints: BTreeMap<usize, Dof>,
    numbering: DofNumbering,
    system: Option<ReducedSystem>,
    /// Prescribed values, then the solution, in global numbering
    global_dof: Vector,
    /// Applied loads in global numbering
    global_force: Vector,
    last_solve: Option<SolveReport>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Create a new empty model
    pub fn new() -> Self {
        Self {
            nodes: NodeList::new(),
            blocks: Vec::new(),
            constraints: BTreeMap::new(),
            numbering: DofNumbering::Unfrozen,
            system: None,
            global_dof: Vector::zeros(0),
            global_force: Vector::zeros(0),
            last_solve: None,
        }
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node; rejected once the DOF numbering is frozen
    pub fn add_node(&mut self, id: usize, x: f64, y: f64, z: f64) -> TrussResult<()> {
        if self.is_frozen() {
            return Err(TrussError::NumberingFrozen);
        }
        self.nodes.add_node(id, x, y, z)
    }

    /// Add an element block, returning its position
    pub fn add_block<B: Block + 'static>(&mut self, block: B) -> usize {
        debug!(
            "Adding block '{}' with {} elements",
            block.name(),
            block.num_elements()
        );
        self.blocks.push(Box::new(block));
        self.blocks.len() - 1
    }

    /// Constrain `dof` of one node to `value`
    pub fn add_constraint(&mut self, dof: Dof, value: f64, node_id: usize) -> TrussResult<()> {
        self.add_constraint_many(dof, value, &[node_id])
    }

    /// Constrain `dof` of every listed node to `value`
    pub fn add_constraint_many(&mut self, dof: Dof, value: f64, node_ids: &[usize]) -> TrussResult<()> {
        let indices = self.resolve(node_ids)?;
        self.constrain_indices(dof, value, indices);
        Ok(())
    }

    /// Constrain `dof` of every node to `value`
    pub fn add_constraint_all(&mut self, dof: Dof, value: f64) {
        let indices = (0..self.nodes.len()).collect();
        self.constrain_indices(dof, value, indices);
    }

    /// Set the load on `dof` of one node to `value`
    pub fn add_force(&mut self, dof: Dof, value: f64, node_id: usize) -> TrussResult<()> {
        self.add_force_many(dof, value, &[node_id])
    }

    /// Set the load on `dof` of every listed node to `value`
    pub fn add_force_many(&mut self, dof: Dof, value: f64, node_ids: &[usize]) -> TrussResult<()> {
        let indices = self.resolve(node_ids)?;
        self.load_indices(dof, value, indices);
        Ok(())
    }

    /// Set the load on `dof` of every node to `value`
    pub fn add_force_all(&mut self, dof: Dof, value: f64) {
        let indices = (0..self.nodes.len()).collect();
        self.load_indices(dof, value, indices);
    }

    fn resolve(&self, node_ids: &[usize]) -> TrussResult<Vec<usize>> {
        node_ids.iter().map(|&id| self.nodes.index_of(id)).collect()
    }

    fn constrain_indices(&mut self, dof: Dof, value: f64, indices: Vec<usize>) {
        self.freeze_numbering();
        for index in indices {
            *self.constraints.entry(index).or_insert(Dof::NONE) |= dof;
            let node = &mut self.nodes[index];
            node.constrained_dofs |= dof;
            for slot in dof.slots() {
                self.global_dof[node.global_dof_index[slot]] = value;
            }
        }
    }

    fn load_indices(&mut self, dof: Dof, value: f64, indices: Vec<usize>) {
        self.freeze_numbering();
        for index in indices {
            let node = &self.nodes[index];
            for slot in dof.slots() {
                self.global_force[node.global_dof_index[slot]] = value;
            }
        }
    }

    /// Assign node-major global indices and size the global buffers, once
    fn freeze_numbering(&mut self) {
        if self.is_frozen() {
            return;
        }
        let num_global = NUM_STRUC_DOF * self.nodes.len();
        for (index, node) in self.nodes.iter_mut().enumerate() {
            for slot in 0..NUM_STRUC_DOF {
                node.global_dof_index[slot] = NUM_STRUC_DOF * index + slot;
            }
        }
        self.global_dof = Vector::zeros(num_global);
        self.global_force = Vector::zeros(num_global);
        self.numbering = DofNumbering::Frozen { num_global };
        debug!("DOF numbering frozen with {} global DOFs", num_global);
    }

    // ========================
    // Assembly and Solution
    // ========================

    /// Number the active DOFs and build the reduced system
    ///
    /// DOFs no block supports are constrained to zero on every node first.
    /// Every element is validated before anything is written.
    pub fn assemble(&mut self) -> TrussResult<()> {
        for block in &self.blocks {
            block.validate(&self.nodes)?;
        }
        self.freeze_numbering();

        let supported = self
            .blocks
            .iter()
            .fold(Dof::NONE, |acc, block| acc | block.supported_dofs());
        let unsupported = !supported;
        if !unsupported.is_empty() {
            debug!("Constraining unsupported DOFs {} on all nodes", unsupported);
            self.add_constraint_all(unsupported, 0.0);
        }

        let num_active = self.number_active_dofs();
        self.warn_on_prescribed_values();

        let mut stiffness = Mat::zeros(num_active, num_active);
        for block in &self.blocks {
            block.assemble(&self.nodes, &mut stiffness)?;
        }

        let mut force = Vector::zeros(num_active);
        for node in self.nodes.iter() {
            for slot in 0..NUM_STRUC_DOF {
                let active = node.active_dof_index[slot];
                if active != INACTIVE_DOF {
                    force[active] = self.global_force[node.global_dof_index[slot]];
                }
            }
        }

        self.system = Some(ReducedSystem::new(stiffness, force)?);
        self.last_solve = None;
        info!(
            "Assembled {} elements over {} nodes: {} active DOFs",
            self.num_elements(),
            self.nodes.len(),
            num_active
        );
        Ok(())
    }

    /// Node-major numbering of unconstrained slots; returns the active count
    fn number_active_dofs(&mut self) -> usize {
        let mut next = 0;
        for node in self.nodes.iter_mut() {
            for slot in 0..NUM_STRUC_DOF {
                node.active_dof_index[slot] = if node.is_active(slot) {
                    next += 1;
                    next - 1
                } else {
                    INACTIVE_DOF
                };
            }
        }
        next
    }

    fn warn_on_prescribed_values(&self) {
        let count = self
            .nodes
            .iter()
            .flat_map(|node| {
                node.constrained_dofs
                    .slots()
                    .map(move |slot| node.global_dof_index[slot])
            })
            .filter(|&global| self.global_dof[global] != 0.0)
            .count();
        if count > 0 {
            warn!(
                "{} non-zero prescribed displacements are kept in the results but do not load the reduced system",
                count
            );
        }
    }

    /// Solve with the default options (SOR, tolerance 1e-10, omega 1.5)
    pub fn solve(&mut self) -> TrussResult<SolveReport> {
        self.solve_with(&AnalysisOptions::default())
    }

    /// Solve the assembled system and scatter the solution into the global DOFs
    pub fn solve_with(&mut self, options: &AnalysisOptions) -> TrussResult<SolveReport> {
        let system = self.system.as_mut().ok_or(TrussError::NotAssembled)?;
        info!(
            "Solving {} active DOFs with {:?} (tol = {:e}, omega = {})",
            system.size(),
            options.solver,
            options.tolerance,
            options.relaxation
        );
        let report = system.solve(options)?;

        for node in self.nodes.iter() {
            for slot in 0..NUM_STRUC_DOF {
                let active = node.active_dof_index[slot];
                if active != INACTIVE_DOF {
                    self.global_dof[node.global_dof_index[slot]] = system.displacement[active];
                }
            }
        }

        info!(
            "Solve finished after {} iterations (converged: {})",
            report.iterations, report.converged
        );
        self.last_solve = Some(report);
        Ok(report)
    }

    // ========================
    // Accessors
    // ========================

    pub fn nodes(&self) -> &NodeList {
        &self.nodes
    }

    pub fn blocks(&self) -> &[Box<dyn Block>] {
        &self.blocks
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of elements over all blocks
    pub fn num_elements(&self) -> usize {
        self.blocks.iter().map(|block| block.num_elements()).sum()
    }

    pub fn numbering(&self) -> DofNumbering {
        self.numbering
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.numbering, DofNumbering::Frozen { .. })
    }

    /// Constraint mask registered for a node
    pub fn constraint(&self, node_id: usize) -> TrussResult<Dof> {
        let index = self.nodes.index_of(node_id)?;
        Ok(self.constraints.get(&index).copied().unwrap_or(Dof::NONE))
    }

    /// Rows of the reduced system, zero before assembly
    pub fn num_active_dofs(&self) -> usize {
        self.system.as_ref().map_or(0, ReducedSystem::size)
    }

    pub fn system(&self) -> Option<&ReducedSystem> {
        self.system.as_ref()
    }

    /// Prescribed values and, after a solve, the solution in global numbering
    pub fn global_dof(&self) -> &Vector {
        &self.global_dof
    }

    pub fn global_force(&self) -> &Vector {
        &self.global_force
    }

    pub fn last_solve(&self) -> Option<SolveReport> {
        self.last_solve
    }

    pub fn is_solved(&self) -> bool {
        self.last_solve.is_some()
    }

    // ========================
    // Result Access Methods
    // ========================

    fn node_values(&self, values: &Vector, node_id: usize) -> TrussResult<[f64; NUM_STRUC_DOF]> {
        let node = self.nodes.get_by_id(node_id)?;
        if !self.is_frozen() {
            return Err(TrussError::NotAssembled);
        }
        let mut out = [0.0; NUM_STRUC_DOF];
        for (slot, value) in out.iter_mut().enumerate() {
            *value = values[node.global_dof_index[slot]];
        }
        Ok(out)
    }

    /// Displacement of a node: prescribed values, or the solution after a solve
    pub fn node_displacement(&self, node_id: usize) -> TrussResult<NodeDisplacement> {
        Ok(NodeDisplacement::from_array(self.node_values(&self.global_dof, node_id)?))
    }

    /// Load registered on a node
    pub fn node_force(&self, node_id: usize) -> TrussResult<NodeForce> {
        Ok(NodeForce::from_array(self.node_values(&self.global_force, node_id)?))
    }

    /// Axial force of every element, grouped by block
    pub fn element_axial_forces(&self) -> TrussResult<Vec<BlockAxialForces>> {
        if !self.is_solved() {
            return Err(TrussError::NotSolved);
        }
        self.blocks
            .iter()
            .map(|block| {
                Ok(BlockAxialForces {
                    block: block.name().to_string(),
                    forces: block.axial_forces(&self.nodes, self.global_dof.as_slice())?,
                })
            })
            .collect()
    }

    /// Get analysis summary
    pub fn summary(&self) -> TrussResult<AnalysisSummary> {
        let mut summary = AnalysisSummary {
            num_nodes: self.nodes.len(),
            num_elements: self.num_elements(),
            total_dofs: NUM_STRUC_DOF * self.nodes.len(),
            active_dofs: self.num_active_dofs(),
            solve: self.last_solve,
            ..Default::default()
        };

        if self.is_frozen() {
            for (id, _) in self.nodes.iter_with_ids() {
                let magnitude = self.node_displacement(id)?.translation_magnitude();
                if magnitude > summary.max_displacement {
                    summary.max_displacement = magnitude;
                    summary.max_disp_node = Some(id);
                }
            }
        }

        if self.is_solved() {
            for block in self.element_axial_forces()? {
                for force in block.forces {
                    summary.max_axial = summary.max_axial.max(force.abs());
                }
            }
        }

        Ok(summary)
    }
}
