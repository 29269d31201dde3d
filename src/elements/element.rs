//! Element capability trait and shared scatter helpers

use std::fmt::Debug;
use std::rc::Rc;

use crate::dof::{Dof, INACTIVE_DOF, NUM_STRUC_DOF};
use crate::elements::{NodeList, Property};
use crate::error::{TrussError, TrussResult};
use crate::math::Mat;

/// A finite element type that can live in an [`ElementBlock`](crate::elements::ElementBlock)
///
/// Elements reference their nodes by external node ID and share the
/// property of the block they belong to.
pub trait Element: Sized + Debug {
    /// Number of nodes the element connects
    const NUM_NODES: usize;

    /// VTK cell type tag
    const VTK_TYPE: u8;

    /// Positions into `nodes()` giving the VTK node ordering
    const VTK_ORDER: &'static [usize];

    /// DOFs this element type contributes stiffness to
    fn supported_dofs() -> Dof;

    /// Create an element; `nodes` must hold exactly `NUM_NODES` IDs
    fn new(property: Rc<Property>, nodes: &[usize]) -> TrussResult<Self>;

    /// Node IDs in element order
    fn nodes(&self) -> &[usize];

    fn property(&self) -> &Property;

    /// Check the element against the node store before assembly
    fn validate(&self, nodes: &NodeList) -> TrussResult<()>;

    /// Scatter-add the element stiffness into the reduced stiffness matrix
    fn assemble(&self, nodes: &NodeList, stiffness: &mut Mat) -> TrussResult<()>;

    /// Axial force from a global DOF vector; tension positive
    fn axial_force(&self, nodes: &NodeList, global_dof: &[f64]) -> TrussResult<f64>;
}

/// Check the node count handed to an element constructor
pub(crate) fn check_node_count(expected: usize, nodes: &[usize]) -> TrussResult<()> {
    if nodes.len() != expected {
        return Err(TrussError::InvalidInput(format!(
            "element needs {} nodes, got {}",
            expected,
            nodes.len()
        )));
    }
    Ok(())
}

/// Reduced-system row of every `slots` DOF of every element node
///
/// Entries are laid out node by node, `slots.len()` per node. Constrained
/// DOFs map to `None`.
pub(crate) fn active_rows(
    nodes: &NodeList,
    element_nodes: &[usize],
    slots: &[usize],
    size: usize,
) -> TrussResult<Vec<Option<usize>>> {
    let mut rows = Vec::with_capacity(element_nodes.len() * slots.len());
    for &id in element_nodes {
        let node = nodes.get_by_id(id)?;
        for &slot in slots {
            if !node.is_active(slot) {
                rows.push(None);
                continue;
            }
            let row = node.active_dof_index[slot];
            if row == INACTIVE_DOF {
                return Err(TrussError::UnnumberedDof { node: id });
            }
            if row >= size {
                return Err(TrussError::DimensionMismatch(format!(
                    "node {} DOF slot {} maps to row {} of a {}x{} stiffness matrix",
                    id, slot, row, size, size
                )));
            }
            rows.push(Some(row));
        }
    }
    Ok(rows)
}

/// `K[rows[i], rows[j]] += ke[i, j]` over every pair of active rows
pub(crate) fn scatter_add<F>(rows: &[Option<usize>], ke: F, stiffness: &mut Mat)
where
    F: Fn(usize, usize) -> f64,
{
    for (i, row_i) in rows.iter().enumerate() {
        let Some(ai) = *row_i else { continue };
        for (j, row_j) in rows.iter().enumerate() {
            let Some(aj) = *row_j else { continue };
            stiffness[(ai, aj)] += ke(i, j);
        }
    }
}

/// All six structural slots in order
pub(crate) const ALL_SLOTS: [usize; NUM_STRUC_DOF] = [0, 1, 2, 3, 4, 5];
