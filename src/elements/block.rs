//! Homogeneous element blocks

use std::fmt::Debug;
use std::ops::Index;
use std::rc::Rc;

use log::debug;

use crate::dof::Dof;
use crate::elements::element::Element;
use crate::elements::{NodeList, Property};
use crate::error::TrussResult;
use crate::math::Mat;

/// Type-erased view of an element block, as held by the model
pub trait Block: Debug {
    fn name(&self) -> &str;

    fn property(&self) -> &Rc<Property>;

    fn num_elements(&self) -> usize;

    /// DOFs the block's element type contributes stiffness to
    fn supported_dofs(&self) -> Dof;

    /// Node IDs of element `index`
    fn element_nodes(&self, index: usize) -> Option<&[usize]>;

    fn vtk_type(&self) -> u8;

    /// Positions into `element_nodes` in VTK order
    fn vtk_order(&self) -> &'static [usize];

    /// Validate every element; nothing is assembled if this fails
    fn validate(&self, nodes: &NodeList) -> TrussResult<()>;

    fn assemble(&self, nodes: &NodeList, stiffness: &mut Mat) -> TrussResult<()>;

    /// Axial force of every element, in block order
    fn axial_forces(&self, nodes: &NodeList, global_dof: &[f64]) -> TrussResult<Vec<f64>>;
}

/// A named sequence of elements of one type sharing one property
#[derive(Debug, Clone)]
pub struct ElementBlock<T: Element> {
    name: String,
    property: Rc<Property>,
    elements: Vec<T>,
}

impl<T: Element> ElementBlock<T> {
    pub fn new(name: &str, property: Rc<Property>) -> Self {
        Self::with_capacity(name, property, 0)
    }

    /// Create a block with room for `capacity` elements
    pub fn with_capacity(name: &str, property: Rc<Property>, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            property,
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Append an element connecting the given node IDs
    ///
    /// Node IDs are resolved at assembly time, not here.
    pub fn add_element(&mut self, nodes: &[usize]) -> TrussResult<()> {
        let element = T::new(Rc::clone(&self.property), nodes)?;
        self.elements.push(element);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: Element> Index<usize> for ElementBlock<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T: Element> Block for ElementBlock<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn property(&self) -> &Rc<Property> {
        &self.property
    }

    fn num_elements(&self) -> usize {
        self.elements.len()
    }

    fn supported_dofs(&self) -> Dof {
        T::supported_dofs()
    }

    fn element_nodes(&self, index: usize) -> Option<&[usize]> {
        self.elements.get(index).map(|element| element.nodes())
    }

    fn vtk_type(&self) -> u8 {
        T::VTK_TYPE
    }

    fn vtk_order(&self) -> &'static [usize] {
        T::VTK_ORDER
    }

    fn validate(&self, nodes: &NodeList) -> TrussResult<()> {
        self.elements
            .iter()
            .try_for_each(|element| element.validate(nodes))
    }

    fn assemble(&self, nodes: &NodeList, stiffness: &mut Mat) -> TrussResult<()> {
        debug!(
            "Assembling block '{}' ({} elements)",
            self.name,
            self.elements.len()
        );
        for element in &self.elements {
            element.assemble(nodes, stiffness)?;
        }
        Ok(())
    }

    fn axial_forces(&self, nodes: &NodeList, global_dof: &[f64]) -> TrussResult<Vec<f64>> {
        self.elements
            .iter()
            .map(|element| element.axial_force(nodes, global_dof))
            .collect()
    }
}
