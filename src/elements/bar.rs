//! Two-node pin-jointed bar (truss) element
//!
//! The bar only resists axial load. Its stiffness in local coordinates is
//!
//! ```text
//! k_local = (A*E/L) * [ 1  -1]
//!                     [-1   1]
//! ```
//!
//! and is rotated to the global axes with `k_global = T^T * k_local * T`,
//! where `T` holds the direction cosines of the bar axis.

use std::rc::Rc;

use crate::dof::{Dof, INACTIVE_DOF, IX, IY, IZ};
use crate::elements::element::{active_rows, check_node_count, scatter_add, Element};
use crate::elements::{NodeList, Property};
use crate::error::{TrussError, TrussResult};
use crate::math::{bar_global_stiffness, direction_cosines, Mat, Mat6};

const TRANSLATIONS: [usize; 3] = [IX, IY, IZ];

/// VTK_LINE
pub const VTK_LINE: u8 = 3;

/// A bar between two nodes sharing its block's property
#[derive(Debug, Clone)]
pub struct Bar {
    property: Rc<Property>,
    nodes: [usize; 2],
}

impl Bar {
    /// Bar between the nodes with IDs `n1` and `n2`
    pub fn between(property: Rc<Property>, n1: usize, n2: usize) -> Self {
        Self {
            property,
            nodes: [n1, n2],
        }
    }

    fn end_coords(&self, nodes: &NodeList) -> TrussResult<([f64; 3], [f64; 3])> {
        let i_node = nodes.get_by_id(self.nodes[0])?;
        let j_node = nodes.get_by_id(self.nodes[1])?;
        Ok((i_node.coords(), j_node.coords()))
    }

    /// Length of the bar
    pub fn length(&self, nodes: &NodeList) -> TrussResult<f64> {
        let (i, j) = self.end_coords(nodes)?;
        let (length, _) = direction_cosines(&i, &j)?;
        Ok(length)
    }

    /// Axial stiffness `A*E/L`
    pub fn axial_stiffness(&self, nodes: &NodeList) -> TrussResult<f64> {
        let length = self.length(nodes)?;
        Ok(self.property.area() * self.property.material().youngs_modulus() / length)
    }

    /// 6x6 stiffness over (x1, y1, z1, x2, y2, z2) in global axes
    pub fn global_stiffness(&self, nodes: &NodeList) -> TrussResult<Mat6> {
        let (i, j) = self.end_coords(nodes)?;
        bar_global_stiffness(
            self.property.material().youngs_modulus(),
            self.property.area(),
            &i,
            &j,
        )
    }
}

impl Element for Bar {
    const NUM_NODES: usize = 2;
    const VTK_TYPE: u8 = VTK_LINE;
    const VTK_ORDER: &'static [usize] = &[0, 1];

    fn supported_dofs() -> Dof {
        Dof::ALL_TRANS
    }

    fn new(property: Rc<Property>, nodes: &[usize]) -> TrussResult<Self> {
        check_node_count(Self::NUM_NODES, nodes)?;
        Ok(Self::between(property, nodes[0], nodes[1]))
    }

    fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    fn property(&self) -> &Property {
        &self.property
    }

    fn validate(&self, nodes: &NodeList) -> TrussResult<()> {
        self.length(nodes).map(|_| ())
    }

    fn assemble(&self, nodes: &NodeList, stiffness: &mut Mat) -> TrussResult<()> {
        let ke = self.global_stiffness(nodes)?;
        let size = stiffness.nrows().min(stiffness.ncols());
        let rows = active_rows(nodes, &self.nodes, &TRANSLATIONS, size)?;
        scatter_add(&rows, |i, j| ke[(i, j)], stiffness);
        Ok(())
    }

    fn axial_force(&self, nodes: &NodeList, global_dof: &[f64]) -> TrussResult<f64> {
        let (i, j) = self.end_coords(nodes)?;
        let (length, cosines) = direction_cosines(&i, &j)?;
        let k = self.property.area() * self.property.material().youngs_modulus() / length;

        let mut elongation = 0.0;
        for (sign, &id) in [-1.0, 1.0].iter().zip(self.nodes.iter()) {
            let node = nodes.get_by_id(id)?;
            for (axis, &slot) in TRANSLATIONS.iter().enumerate() {
                let index = node.global_dof_index[slot];
                if index == INACTIVE_DOF {
                    return Err(TrussError::NotAssembled);
                }
                let u = global_dof.get(index).copied().ok_or_else(|| {
                    TrussError::DimensionMismatch(format!(
                        "global DOF {} of node {} outside a vector of length {}",
                        index,
                        id,
                        global_dof.len()
                    ))
                })?;
                elongation += sign * u * cosines[axis];
            }
        }
        Ok(k * elongation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Material;
    use approx::assert_abs_diff_eq;

    const LENGTH: f64 = 100.0;

    fn property() -> Rc<Property> {
        let material = Rc::new(Material::new("Fake material", 1000.0, 0.3).unwrap());
        Rc::new(Property::bar("square", material, 10.0))
    }

    fn stiffness() -> f64 {
        10.0 * 1000.0 / LENGTH
    }

    fn two_nodes(end: [f64; 3]) -> NodeList {
        let mut nodes = NodeList::new();
        nodes.add_node(0, 0.0, 0.0, 0.0).unwrap();
        nodes.add_node(1, end[0], end[1], end[2]).unwrap();
        nodes
    }

    /// Only `axis` of the second node is free, numbered 0
    fn assemble_constrained(axis: usize) -> Mat {
        let mut end = [0.0; 3];
        end[axis] = LENGTH;
        let mut nodes = two_nodes(end);
        nodes[0].constrained_dofs = Dof::ALL;
        nodes[1].constrained_dofs = !Dof::SLOTS[axis];
        nodes[1].active_dof_index[axis] = 0;

        let bar = Bar::between(property(), 0, 1);
        let mut k = Mat::zeros(1, 1);
        bar.assemble(&nodes, &mut k).unwrap();
        k
    }

    /// Every translation numbered 0..6, rotations untouched
    fn assemble_unconstrained(end: [f64; 3]) -> Mat {
        let mut nodes = two_nodes(end);
        for n in 0..2 {
            nodes[n].constrained_dofs = Dof::ALL_ROT;
            for slot in 0..3 {
                nodes[n].active_dof_index[slot] = 3 * n + slot;
            }
        }
        let bar = Bar::between(property(), 0, 1);
        let mut k = Mat::zeros(6, 6);
        bar.assemble(&nodes, &mut k).unwrap();
        k
    }

    fn check_aligned(k: &Mat, axis: usize) {
        let kk = stiffness();
        for i in 0..6 {
            for j in 0..6 {
                let expected = if (i == axis && j == axis) || (i == axis + 3 && j == axis + 3) {
                    kk
                } else if (i == axis && j == axis + 3) || (i == axis + 3 && j == axis) {
                    -kk
                } else {
                    0.0
                };
                assert_eq!(k[(i, j)], expected, "entry ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_create_and_access() {
        let bar = Bar::new(property(), &[1000532, 47]).unwrap();
        assert_eq!(bar.nodes(), &[1000532, 47]);
        assert_eq!(Bar::supported_dofs(), Dof::ALL_TRANS);
        assert_eq!(Bar::VTK_TYPE, 3);
        assert_eq!(bar.property().name(), "square");
    }

    #[test]
    fn test_wrong_node_count() {
        assert!(matches!(
            Bar::new(property(), &[1, 2, 3]),
            Err(TrussError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_assemble_x_aligned_constrained() {
        assert_eq!(assemble_constrained(0)[(0, 0)], stiffness());
    }

    #[test]
    fn test_assemble_y_aligned_constrained() {
        assert_eq!(assemble_constrained(1)[(0, 0)], stiffness());
    }

    #[test]
    fn test_assemble_z_aligned_constrained() {
        assert_eq!(assemble_constrained(2)[(0, 0)], stiffness());
    }

    #[test]
    fn test_assemble_x_aligned_unconstrained() {
        check_aligned(&assemble_unconstrained([LENGTH, 0.0, 0.0]), 0);
    }

    #[test]
    fn test_assemble_y_aligned_unconstrained() {
        check_aligned(&assemble_unconstrained([0.0, LENGTH, 0.0]), 1);
    }

    #[test]
    fn test_assemble_z_aligned_unconstrained() {
        check_aligned(&assemble_unconstrained([0.0, 0.0, LENGTH]), 2);
    }

    #[test]
    fn test_assemble_arbitrary_unconstrained() {
        let p = (LENGTH * LENGTH / 3.0).sqrt();
        let k = assemble_unconstrained([p, p, p]);
        let third = stiffness() / 3.0;
        for i in 0..6 {
            for j in 0..6 {
                let expected = if (i < 3) == (j < 3) { third } else { -third };
                assert_abs_diff_eq!(k[(i, j)], expected, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        let nodes = two_nodes([0.0, 0.0, 0.0]);
        let bar = Bar::between(property(), 0, 1);
        assert!(matches!(bar.validate(&nodes), Err(TrussError::InvalidGeometry(_))));
        let mut k = Mat::zeros(6, 6);
        assert!(bar.assemble(&nodes, &mut k).is_err());
        assert_eq!(k, Mat::zeros(6, 6));
    }

    #[test]
    fn test_unnumbered_dof_rejected() {
        let nodes = two_nodes([LENGTH, 0.0, 0.0]);
        let bar = Bar::between(property(), 0, 1);
        let mut k = Mat::zeros(6, 6);
        assert!(matches!(
            bar.assemble(&nodes, &mut k),
            Err(TrussError::UnnumberedDof { node: 0 })
        ));
    }

    #[test]
    fn test_missing_node_rejected() {
        let nodes = two_nodes([LENGTH, 0.0, 0.0]);
        let bar = Bar::between(property(), 0, 7);
        assert!(matches!(bar.validate(&nodes), Err(TrussError::NodeNotFound(7))));
    }

    #[test]
    fn test_axial_force_in_tension() {
        let mut nodes = two_nodes([30.0, 40.0, 0.0]);
        for n in 0..2 {
            for slot in 0..6 {
                nodes[n].global_dof_index[slot] = 6 * n + slot;
            }
        }
        // Stretch along the axis by 0.5
        let mut u = vec![0.0; 12];
        u[6] = 0.3;
        u[7] = 0.4;
        let bar = Bar::between(property(), 0, 1);
        let n = bar.axial_force(&nodes, &u).unwrap();
        let k = 10.0 * 1000.0 / 50.0;
        assert_abs_diff_eq!(n, 0.5 * k, epsilon = 1e-12);

        // Rigid translation carries no force
        let u = [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0];
        assert_abs_diff_eq!(bar.axial_force(&nodes, &u).unwrap(), 0.0, epsilon = 1e-12);
    }
}
