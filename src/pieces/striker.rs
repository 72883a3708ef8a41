//! Strikers - the slammer thrown at the stack.
//!
//! A striker's impact is `weight × material multiplier`. The current rules
//! do not feed impact into flip odds; it is carried so hosts can display it
//! and so alternative rulesets have something to read.

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// What a striker is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Metal,
    Plastic,
    Rubber,
}

impl Material {
    /// Impact multiplier for this material.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Material::Metal => 1.5,
            Material::Plastic => 1.0,
            Material::Rubber => 1.2,
        }
    }
}

/// The implement used to attempt flips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Striker {
    id: String,
    weight: f64,
    material: Material,
}

impl Default for Striker {
    fn default() -> Self {
        Self {
            id: "default_striker".to_string(),
            weight: 50.0,
            material: Material::Metal,
        }
    }
}

impl Striker {
    /// Create a striker, rejecting non-positive or non-finite weights.
    ///
    /// ```
    /// use rust_pogs::pieces::{Material, Striker};
    ///
    /// let striker = Striker::new("heavy", 40.0, Material::Rubber).unwrap();
    /// assert_eq!(striker.impact_modifier(), 48.0);
    ///
    /// assert!(Striker::new("broken", 0.0, Material::Metal).is_err());
    /// ```
    pub fn new(id: impl Into<String>, weight: f64, material: Material) -> Result<Self, ConfigError> {
        let striker = Self { id: id.into(), weight, material };
        striker.validate()?;
        Ok(striker)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(id: &str, weight: f64, material: Material) -> Self {
        Self { id: id.to_string(), weight, material }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn material(&self) -> Material {
        self.material
    }

    /// `weight × material multiplier`.
    #[must_use]
    pub fn impact_modifier(&self) -> f64 {
        self.weight * self.material.multiplier()
    }

    /// Deserialized strikers bypass `new`, so configs re-check here.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.weight.is_finite() && self.weight > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidStrikerWeight { value: self.weight })
        }
    }
}
