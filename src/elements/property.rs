//! Section properties shared by the elements of a block

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::elements::Material;
use crate::error::{TrussError, TrussResult};

/// Attribute key for the cross-sectional area of a bar
pub const AREA: &str = "area";

/// A named set of scalar section attributes bound to one material
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    material: Rc<Material>,
    attributes: BTreeMap<String, f64>,
}

impl Property {
    pub fn new(name: &str, material: Rc<Material>) -> Self {
        Self {
            name: name.to_string(),
            material,
            attributes: BTreeMap::new(),
        }
    }

    /// Convenience constructor for a bar section
    pub fn bar(name: &str, material: Rc<Material>, area: f64) -> Self {
        Self::new(name, material).with_attribute(AREA, area)
    }

    /// Set an attribute, builder style
    pub fn with_attribute(mut self, key: &str, value: f64) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    pub fn set(&mut self, key: &str, value: f64) {
        self.attributes.insert(key.to_string(), value);
    }

    /// Read an attribute; a missing key reads as zero
    pub fn get(&self, key: &str) -> f64 {
        self.attributes.get(key).copied().unwrap_or(0.0)
    }

    /// Mutable access to an attribute, inserting zero if it is missing
    pub fn attribute_mut(&mut self, key: &str) -> &mut f64 {
        self.attributes.entry(key.to_string()).or_insert(0.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Cross-sectional area
    pub fn area(&self) -> f64 {
        self.get(AREA)
    }
}

/// Name-keyed collection of shared properties
#[derive(Debug, Clone, Default)]
pub struct PropertyList {
    properties: HashMap<String, Rc<Property>>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property under its own name, rejecting duplicates
    pub fn add(&mut self, property: Property) -> TrussResult<Rc<Property>> {
        if self.properties.contains_key(property.name()) {
            return Err(TrussError::DuplicateName(property.name().to_string()));
        }
        let property = Rc::new(property);
        self.properties
            .insert(property.name().to_string(), Rc::clone(&property));
        Ok(property)
    }

    pub fn get(&self, name: &str) -> Option<Rc<Property>> {
        self.properties.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
