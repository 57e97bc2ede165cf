//! Serde data file structs for catalog content definitions.
//!
//! These structs define the on-disk format for materials, machines, and
//! recipes. They are deserialized from JSON data files and then resolved
//! into catalog types by the loader. Field names follow the camelCase
//! convention the datasets are authored in.

use serde::Deserialize;

/// Top-level catalog data structure for JSON deserialization.
#[derive(Debug, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub materials: Vec<MaterialData>,
    #[serde(default)]
    pub machines: Vec<MachineData>,
    #[serde(default)]
    pub recipes: Vec<RecipeData>,
}

/// JSON representation of a material.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialData {
    pub material_id: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type")]
    pub category: MaterialCategoryData,
}

/// The physical category of a material in a data file.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategoryData {
    Unit,
    Bulk,
    Fluid,
    Molten,
}

/// JSON representation of a machine.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineData {
    pub machine_id: String,
    pub name: String,
    #[serde(default)]
    pub energy_consumption: u32,
    #[serde(default)]
    pub workers: u32,
    #[serde(default)]
    pub maintenance: u32,
    #[serde(default)]
    pub icon: String,
}

/// JSON representation of a recipe ingredient.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientData {
    pub material_id: String,
    pub amount: f64,
}

/// JSON representation of a recipe.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeData {
    pub recipe_id: String,
    pub machine_id: String,
    #[serde(default)]
    pub energy_consumption_multiplier: Option<f64>,
    #[serde(default)]
    pub inputs: Vec<IngredientData>,
    #[serde(default)]
    pub outputs: Vec<IngredientData>,
}
