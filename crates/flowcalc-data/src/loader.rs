//! Data-driven catalog loading from JSON.
//!
//! Deserializes [`schema`](crate::schema) structs and resolves string
//! references by name into a [`CatalogBuilder`], in dependency order:
//! materials, then machines, then recipes.

use crate::schema::{CatalogData, IngredientData, MaterialCategoryData};
use flowcalc_core::catalog::{
    Catalog, CatalogBuilder, CatalogError, Ingredient, MachineSpec, MaterialCategory,
};
use flowcalc_core::fixed::f64_to_fixed64;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("unknown material reference: {0}")]
    UnknownMaterialRef(String),
    #[error("unknown machine reference: {0}")]
    UnknownMachineRef(String),
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Load a catalog builder from a JSON string. The caller can register
/// further content before calling `build()`.
pub fn load_catalog_json(json: &str) -> Result<CatalogBuilder, DataLoadError> {
    let data: CatalogData = serde_json::from_str(json)?;
    build_catalog(data)
}

/// The refinery dataset shipped with the crate: three distillation stages
/// over ten fluids.
pub fn refinery_catalog() -> Result<Catalog, DataLoadError> {
    let builder = load_catalog_json(include_str!("../data/refinery.json"))?;
    Ok(builder.build()?)
}

fn category(data: MaterialCategoryData) -> MaterialCategory {
    match data {
        MaterialCategoryData::Unit => MaterialCategory::Unit,
        MaterialCategoryData::Bulk => MaterialCategory::Bulk,
        MaterialCategoryData::Fluid => MaterialCategory::Fluid,
        MaterialCategoryData::Molten => MaterialCategory::Molten,
    }
}

fn build_catalog(data: CatalogData) -> Result<CatalogBuilder, DataLoadError> {
    let mut builder = CatalogBuilder::new();

    // Phase 1: Register all materials.
    for material in &data.materials {
        builder.register_material(
            &material.material_id,
            &material.icon,
            category(material.category),
        );
    }

    // Phase 2: Register all machines.
    for machine in &data.machines {
        builder.register_machine(
            &machine.machine_id,
            MachineSpec {
                display_name: machine.name.clone(),
                energy_consumption: machine.energy_consumption,
                workers: machine.workers,
                maintenance: machine.maintenance,
                icon: machine.icon.clone(),
            },
        );
    }

    // Phase 3: Register all recipes (resolve material and machine refs by name).
    for recipe in &data.recipes {
        let machine = builder
            .machine_id(&recipe.machine_id)
            .ok_or_else(|| DataLoadError::UnknownMachineRef(recipe.machine_id.clone()))?;
        let inputs = resolve_ingredients(&builder, &recipe.inputs)?;
        let outputs = resolve_ingredients(&builder, &recipe.outputs)?;
        builder.register_recipe(&recipe.recipe_id, machine, inputs, outputs);

        if let Some(multiplier) = recipe.energy_consumption_multiplier {
            builder.mutate_recipe(&recipe.recipe_id, |def| {
                def.energy_multiplier = Some(f64_to_fixed64(multiplier));
            })?;
        }
    }

    Ok(builder)
}

fn resolve_ingredients(
    builder: &CatalogBuilder,
    entries: &[IngredientData],
) -> Result<Vec<Ingredient>, DataLoadError> {
    entries
        .iter()
        .map(|entry| {
            let material = builder
                .material_id(&entry.material_id)
                .ok_or_else(|| DataLoadError::UnknownMaterialRef(entry.material_id.clone()))?;
            Ok(Ingredient {
                material,
                amount: f64_to_fixed64(entry.amount),
            })
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
