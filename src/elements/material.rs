//! Material properties

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{TrussError, TrussResult};

/// Linear elastic material
///
/// The name is fixed at construction; the constructor is the only place the
/// values are validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MaterialRecord")]
pub struct Material {
    name: String,
    /// Modulus of elasticity (Young's modulus) in Pa
    e: f64,
    /// Poisson's ratio
    nu: f64,
}

impl Material {
    /// Create a new material from Young's modulus and Poisson's ratio
    pub fn new(name: &str, e: f64, nu: f64) -> TrussResult<Self> {
        let invalid = |reason: &str| TrussError::InvalidMaterial {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !e.is_finite() || e <= 0.0 {
            return Err(invalid("Young's modulus must be positive and finite"));
        }
        if !(nu > -1.0 && nu < 0.5) {
            return Err(invalid("Poisson's ratio must lie in (-1, 0.5)"));
        }
        Ok(Self {
            name: name.to_string(),
            e,
            nu,
        })
    }

    /// Create a standard structural aluminum (E = 70 GPa)
    pub fn aluminum() -> Self {
        Self {
            name: "Aluminum".to_string(),
            e: 70.0e9,
            nu: 0.32,
        }
    }

    /// Create a standard structural steel (E = 200 GPa)
    pub fn steel() -> Self {
        Self {
            name: "Steel".to_string(),
            e: 200.0e9,
            nu: 0.3,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn youngs_modulus(&self) -> f64 {
        self.e
    }

    pub fn poissons_ratio(&self) -> f64 {
        self.nu
    }

    /// Shear modulus G = E / (2 (1 + nu))
    pub fn shear_modulus(&self) -> f64 {
        self.e / (2.0 * (1.0 + self.nu))
    }
}

/// Unvalidated form read from JSON
#[derive(Deserialize)]
struct MaterialRecord {
    name: String,
    e: f64,
    nu: f64,
}

impl TryFrom<MaterialRecord> for Material {
    type Error = TrussError;

    fn try_from(record: MaterialRecord) -> TrussResult<Self> {
        Material::new(&record.name, record.e, record.nu)
    }
}

/// Name-keyed collection of shared materials
#[derive(Debug, Clone, Default)]
pub struct MaterialList {
    materials: HashMap<String, Rc<Material>>,
}

impl MaterialList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material under its own name, rejecting duplicates
    pub fn add(&mut self, material: Material) -> TrussResult<Rc<Material>> {
        if self.materials.contains_key(material.name()) {
            return Err(TrussError::DuplicateName(material.name().to_string()));
        }
        let material = Rc::new(material);
        self.materials
            .insert(material.name().to_string(), Rc::clone(&material));
        Ok(material)
    }

    pub fn get(&self, name: &str) -> Option<Rc<Material>> {
        self.materials.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_accessors() {
        let mat = Material::new("Aluminum", 70.0e9, 0.3).unwrap();
        assert_eq!(mat.name(), "Aluminum");
        assert_eq!(mat.youngs_modulus(), 70.0e9);
        assert_eq!(mat.poissons_ratio(), 0.3);
        let expected_g = 70.0e9 / 2.6;
        assert!((mat.shear_modulus() - expected_g).abs() < 1.0);
    }

    #[test]
    fn test_material_validation() {
        assert!(Material::new("", 1.0, 0.1).is_err());
        assert!(Material::new("a", 0.0, 0.1).is_err());
        assert!(Material::new("a", f64::NAN, 0.1).is_err());
        assert!(Material::new("a", 1.0, 0.5).is_err());
        assert!(Material::new("a", 1.0, -1.0).is_err());
        assert!(Material::new("a", 1.0, 0.1).is_ok());
    }

    #[test]
    fn test_material_from_json_is_validated() {
        let mat: Material =
            serde_json::from_str(r#"{"name":"Steel","e":200.0e9,"nu":0.3}"#).unwrap();
        assert_eq!(mat, Material::steel());

        let json = serde_json::to_string(&Material::aluminum()).unwrap();
        assert_eq!(serde_json::from_str::<Material>(&json).unwrap(), Material::aluminum());

        assert!(serde_json::from_str::<Material>(r#"{"name":"","e":-5.0,"nu":0.9}"#).is_err());
        assert!(serde_json::from_str::<Material>(r#"{"name":"a","e":1.0,"nu":0.5}"#).is_err());
    }

    #[test]
    fn test_material_list_rejects_duplicates() {
        let mut list = MaterialList::new();
        list.add(Material::steel()).unwrap();
        let err = list.add(Material::new("Steel", 1.0, 0.2).unwrap()).unwrap_err();
        assert!(matches!(err, TrussError::DuplicateName(ref n) if n == "Steel"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("Steel").unwrap().youngs_modulus(), 200.0e9);
        assert!(list.get("Titanium").is_none());
    }
}
