use crate::fixed::Fixed64;
use crate::id::*;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Definition types
// ---------------------------------------------------------------------------

/// Physical category of a material. Presentation layers group and style
/// handles by category; the core only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialCategory {
    Unit,
    Bulk,
    Fluid,
    Molten,
}

/// A material definition in the catalog.
#[derive(Debug, Clone)]
pub struct MaterialDef {
    pub name: String,
    /// Asset key for the material icon. Asset resolution is out of scope.
    pub icon: String,
    pub category: MaterialCategory,
}

/// A machine definition in the catalog.
#[derive(Debug, Clone)]
pub struct MachineDef {
    pub name: String,
    pub display_name: String,
    pub energy_consumption: u32,
    pub workers: u32,
    pub maintenance: u32,
    pub icon: String,
}

/// Named fields for registering a machine, so call sites stay readable.
#[derive(Debug, Clone)]
pub struct MachineSpec {
    pub display_name: String,
    pub energy_consumption: u32,
    pub workers: u32,
    pub maintenance: u32,
    pub icon: String,
}

/// A recipe input/output entry: one material and its per-cycle quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ingredient {
    pub material: MaterialId,
    pub amount: Fixed64,
}

/// A recipe definition.
#[derive(Debug, Clone)]
pub struct RecipeDef {
    pub name: String,
    pub machine: MachineId,
    /// Scales the machine's base energy consumption when set.
    pub energy_multiplier: Option<Fixed64>,
    pub inputs: Vec<Ingredient>,
    pub outputs: Vec<Ingredient>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("recipe {recipe} references unknown material {material:?}")]
    InvalidMaterialRef { recipe: String, material: MaterialId },
    #[error("recipe {recipe} references unknown machine {machine:?}")]
    InvalidMachineRef { recipe: String, machine: MachineId },
    #[error("recipe {recipe} lists a non-positive amount for {material:?}")]
    NonPositiveAmount { recipe: String, material: MaterialId },
}

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing an immutable [`Catalog`].
/// Three-phase lifecycle: registration -> mutation -> finalization.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    materials: Vec<MaterialDef>,
    material_name_to_id: HashMap<String, MaterialId>,
    machines: Vec<MachineDef>,
    machine_name_to_id: HashMap<String, MachineId>,
    recipes: Vec<RecipeDef>,
    recipe_name_to_id: HashMap<String, RecipeId>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: Register a material. Returns its ID.
    pub fn register_material(
        &mut self,
        name: &str,
        icon: &str,
        category: MaterialCategory,
    ) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(MaterialDef {
            name: name.to_string(),
            icon: icon.to_string(),
            category,
        });
        self.material_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Phase 1: Register a machine. Returns its ID.
    pub fn register_machine(&mut self, name: &str, spec: MachineSpec) -> MachineId {
        let id = MachineId(self.machines.len() as u32);
        self.machines.push(MachineDef {
            name: name.to_string(),
            display_name: spec.display_name,
            energy_consumption: spec.energy_consumption,
            workers: spec.workers,
            maintenance: spec.maintenance,
            icon: spec.icon,
        });
        self.machine_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Phase 1: Register a recipe with no energy multiplier. Returns its ID.
    pub fn register_recipe(
        &mut self,
        name: &str,
        machine: MachineId,
        inputs: Vec<Ingredient>,
        outputs: Vec<Ingredient>,
    ) -> RecipeId {
        let id = RecipeId(self.recipes.len() as u32);
        self.recipes.push(RecipeDef {
            name: name.to_string(),
            machine,
            energy_multiplier: None,
            inputs,
            outputs,
        });
        self.recipe_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Phase 2: Mutate an existing recipe by name.
    pub fn mutate_recipe<F>(&mut self, name: &str, f: F) -> Result<(), CatalogError>
    where
        F: FnOnce(&mut RecipeDef),
    {
        let id = self
            .recipe_name_to_id
            .get(name)
            .ok_or(CatalogError::NotFound(name.to_string()))?;
        f(&mut self.recipes[id.0 as usize]);
        Ok(())
    }

    /// Lookup material ID by name.
    pub fn material_id(&self, name: &str) -> Option<MaterialId> {
        self.material_name_to_id.get(name).copied()
    }

    /// Lookup machine ID by name.
    pub fn machine_id(&self, name: &str) -> Option<MachineId> {
        self.machine_name_to_id.get(name).copied()
    }

    /// Lookup recipe ID by name.
    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    /// Phase 3: Finalize and build the immutable catalog.
    ///
    /// Validates that every recipe's material and machine references
    /// resolve, and that every ingredient amount is positive.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        for recipe in &self.recipes {
            if recipe.machine.0 as usize >= self.machines.len() {
                return Err(CatalogError::InvalidMachineRef {
                    recipe: recipe.name.clone(),
                    machine: recipe.machine,
                });
            }
            for entry in recipe.inputs.iter().chain(recipe.outputs.iter()) {
                if entry.material.0 as usize >= self.materials.len() {
                    return Err(CatalogError::InvalidMaterialRef {
                        recipe: recipe.name.clone(),
                        material: entry.material,
                    });
                }
                if entry.amount <= Fixed64::ZERO {
                    return Err(CatalogError::NonPositiveAmount {
                        recipe: recipe.name.clone(),
                        material: entry.material,
                    });
                }
            }
        }

        Ok(Catalog {
            materials: self.materials,
            material_name_to_id: self.material_name_to_id,
            machines: self.machines,
            machine_name_to_id: self.machine_name_to_id,
            recipes: self.recipes,
            recipe_name_to_id: self.recipe_name_to_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable catalog of materials, machines, and recipes. Frozen after
/// `build()`; thread-safe to share.
///
/// Every lookup has the same miss contract: an explicit `None`, never a
/// sentinel and never a panic. Callers that require the entity to exist
/// promote the miss to their own error.
#[derive(Debug)]
pub struct Catalog {
    materials: Vec<MaterialDef>,
    material_name_to_id: HashMap<String, MaterialId>,
    machines: Vec<MachineDef>,
    machine_name_to_id: HashMap<String, MachineId>,
    recipes: Vec<RecipeDef>,
    recipe_name_to_id: HashMap<String, RecipeId>,
}

impl Catalog {
    pub fn get_material(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.get(id.0 as usize)
    }

    pub fn get_machine(&self, id: MachineId) -> Option<&MachineDef> {
        self.machines.get(id.0 as usize)
    }

    pub fn get_recipe(&self, id: RecipeId) -> Option<&RecipeDef> {
        self.recipes.get(id.0 as usize)
    }

    pub fn material_id(&self, name: &str) -> Option<MaterialId> {
        self.material_name_to_id.get(name).copied()
    }

    pub fn machine_id(&self, name: &str) -> Option<MachineId> {
        self.machine_name_to_id.get(name).copied()
    }

    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    /// All recipe IDs, in registration order. Presentation layers use this
    /// to enumerate the available recipe cards.
    pub fn recipe_ids(&self) -> impl Iterator<Item = RecipeId> + '_ {
        (0..self.recipes.len()).map(|i| RecipeId(i as u32))
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::f64_to_fixed64;

    fn ing(material: MaterialId, amount: f64) -> Ingredient {
        Ingredient {
            material,
            amount: f64_to_fixed64(amount),
        }
    }

    fn refinery_spec() -> MachineSpec {
        MachineSpec {
            display_name: "Distillation (Stage I)".to_string(),
            energy_consumption: 0,
            workers: 6,
            maintenance: 3,
            icon: "Distillation_(Stage_I)".to_string(),
        }
    }

    fn setup_builder() -> CatalogBuilder {
        let mut b = CatalogBuilder::new();
        let crude = b.register_material("crude_oil", "Crude_Oil", MaterialCategory::Fluid);
        let medium = b.register_material("medium_oil", "Medium_Oil", MaterialCategory::Fluid);
        let refinery = b.register_machine("refinery_1", refinery_spec());
        b.register_recipe(
            "crude_oil_refining",
            refinery,
            vec![ing(crude, 60.0)],
            vec![ing(medium, 48.0)],
        );
        b
    }

    #[test]
    fn register_and_build() {
        let catalog = setup_builder().build().unwrap();
        assert_eq!(catalog.material_count(), 2);
        assert_eq!(catalog.machine_count(), 1);
        assert_eq!(catalog.recipe_count(), 1);
    }

    #[test]
    fn lookup_by_name() {
        let catalog = setup_builder().build().unwrap();
        assert!(catalog.material_id("crude_oil").is_some());
        assert!(catalog.material_id("nonexistent").is_none());
        assert!(catalog.machine_id("refinery_1").is_some());
        assert!(catalog.recipe_id("crude_oil_refining").is_some());
    }

    #[test]
    fn machine_fields_preserved() {
        let catalog = setup_builder().build().unwrap();
        let machine = catalog
            .get_machine(catalog.machine_id("refinery_1").unwrap())
            .unwrap();
        assert_eq!(machine.display_name, "Distillation (Stage I)");
        assert_eq!(machine.workers, 6);
        assert_eq!(machine.maintenance, 3);
        assert_eq!(machine.energy_consumption, 0);
    }

    #[test]
    fn mutate_recipe_sets_energy_multiplier() {
        let mut builder = setup_builder();
        builder
            .mutate_recipe("crude_oil_refining", |recipe| {
                recipe.energy_multiplier = Some(f64_to_fixed64(1.5));
            })
            .unwrap();
        let catalog = builder.build().unwrap();
        let recipe = catalog
            .get_recipe(catalog.recipe_id("crude_oil_refining").unwrap())
            .unwrap();
        assert_eq!(recipe.energy_multiplier, Some(f64_to_fixed64(1.5)));
    }

    #[test]
    fn mutate_nonexistent_fails() {
        let mut builder = setup_builder();
        let result = builder.mutate_recipe("nonexistent", |_| {});
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn invalid_material_ref_fails() {
        let mut b = CatalogBuilder::new();
        let machine = b.register_machine("refinery_1", refinery_spec());
        b.register_recipe("bad", machine, vec![ing(MaterialId(999), 1.0)], vec![]);
        let result = b.build();
        match result {
            Err(CatalogError::InvalidMaterialRef { material, .. }) => {
                assert_eq!(material, MaterialId(999));
            }
            other => panic!("expected InvalidMaterialRef, got: {other:?}"),
        }
    }

    #[test]
    fn invalid_machine_ref_fails() {
        let mut b = CatalogBuilder::new();
        let oil = b.register_material("oil", "Oil", MaterialCategory::Fluid);
        b.register_recipe("bad", MachineId(7), vec![ing(oil, 1.0)], vec![]);
        assert!(matches!(
            b.build(),
            Err(CatalogError::InvalidMachineRef { .. })
        ));
    }

    #[test]
    fn zero_amount_ingredient_fails() {
        let mut b = CatalogBuilder::new();
        let oil = b.register_material("oil", "Oil", MaterialCategory::Fluid);
        let machine = b.register_machine("refinery_1", refinery_spec());
        b.register_recipe("bad", machine, vec![ing(oil, 0.0)], vec![]);
        assert!(matches!(
            b.build(),
            Err(CatalogError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let catalog = setup_builder().build().unwrap();
        assert!(catalog.get_material(MaterialId(999)).is_none());
        assert!(catalog.get_machine(MachineId(999)).is_none());
        assert!(catalog.get_recipe(RecipeId(999)).is_none());
    }

    #[test]
    fn recipe_ids_enumerates_in_registration_order() {
        let mut builder = setup_builder();
        let heavy = builder.register_material("heavy_oil", "Heavy_Oil", MaterialCategory::Fluid);
        let machine = builder.machine_id("refinery_1").unwrap();
        let medium = builder.material_id("medium_oil").unwrap();
        builder.register_recipe(
            "medium_oil_refining",
            machine,
            vec![ing(medium, 48.0)],
            vec![ing(heavy, 12.0)],
        );
        let catalog = builder.build().unwrap();
        let ids: Vec<RecipeId> = catalog.recipe_ids().collect();
        assert_eq!(ids, vec![RecipeId(0), RecipeId(1)]);
    }

    #[test]
    fn empty_catalog_builds() {
        let catalog = CatalogBuilder::new().build().unwrap();
        assert_eq!(catalog.material_count(), 0);
        assert_eq!(catalog.recipe_count(), 0);
    }

    #[test]
    fn catalog_is_immutable_after_build() {
        // Catalog has no &mut self methods -- immutability enforced by the type system.
        let catalog = setup_builder().build().unwrap();
        let _ = catalog.get_material(MaterialId(0));
        let _ = catalog.get_machine(MachineId(0));
        let _ = catalog.get_recipe(RecipeId(0));
    }
}
