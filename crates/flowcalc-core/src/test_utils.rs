//! Shared test fixtures for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and downstream crates
//! (via the `test-utils` feature).

use crate::catalog::{Catalog, CatalogBuilder, Ingredient, MachineSpec, MaterialCategory};
use crate::chart::{Chart, Position};
use crate::fixed::Fixed64;
use crate::id::NodeId;

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

// ===========================================================================
// Catalog fixtures
// ===========================================================================

fn machine(display_name: &str, workers: u32) -> MachineSpec {
    MachineSpec {
        display_name: display_name.to_string(),
        energy_consumption: 0,
        workers,
        maintenance: 3,
        icon: display_name.replace(' ', "_"),
    }
}

fn ing(builder: &CatalogBuilder, material: &str, amount: f64) -> Ingredient {
    Ingredient {
        material: builder
            .material_id(material)
            .unwrap_or_else(|| panic!("fixture material not registered: {material}")),
        amount: fixed(amount),
    }
}

/// A minimal oil chain for connection tests:
///
/// - `oil_extraction` (pumpjack): outputs oil 60
/// - `diesel_generator`: inputs oil 40, outputs exhaust 16
/// - `oil_boiler`: inputs oil 30, outputs steam 10
pub fn oil_chain_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    b.register_material("oil", "Medium_Oil", MaterialCategory::Fluid);
    b.register_material("exhaust", "Exhaust", MaterialCategory::Fluid);
    b.register_material("steam", "SteamHp", MaterialCategory::Fluid);

    let pumpjack = b.register_machine("pumpjack", machine("Pumpjack", 2));
    let generator = b.register_machine("diesel_generator", machine("Diesel Generator", 1));
    let boiler = b.register_machine("oil_boiler", machine("Oil Boiler", 1));

    let oil_out = vec![ing(&b, "oil", 60.0)];
    b.register_recipe("oil_extraction", pumpjack, vec![], oil_out);

    let gen_in = vec![ing(&b, "oil", 40.0)];
    let gen_out = vec![ing(&b, "exhaust", 16.0)];
    b.register_recipe("diesel_generator", generator, gen_in, gen_out);

    let boiler_in = vec![ing(&b, "oil", 30.0)];
    let boiler_out = vec![ing(&b, "steam", 10.0)];
    b.register_recipe("oil_boiler", boiler, boiler_in, boiler_out);

    b.build().expect("oil chain fixture must build")
}

/// The three-stage distillation chain: crude oil in, diesel, naphtha and
/// fuel gas out, with steam driving every stage.
pub fn refinery_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    for name in [
        "crude_oil",
        "medium_oil",
        "light_oil",
        "heavy_oil",
        "naphtha",
        "fuel_gas",
        "steam_high",
        "sour_water",
        "diesel",
        "exhaust",
    ] {
        b.register_material(name, name, MaterialCategory::Fluid);
    }

    let stage_1 = b.register_machine("refinery_1", machine("Distillation (Stage I)", 6));
    let stage_2 = b.register_machine("refinery_2", machine("Distillation (Stage II)", 8));
    let stage_3 = b.register_machine("refinery_3", machine("Distillation (Stage III)", 8));

    let inputs = vec![ing(&b, "crude_oil", 60.0), ing(&b, "steam_high", 6.0)];
    let outputs = vec![
        ing(&b, "medium_oil", 48.0),
        ing(&b, "heavy_oil", 12.0),
        ing(&b, "sour_water", 18.0),
    ];
    b.register_recipe("crude_oil_refining", stage_1, inputs, outputs);

    let inputs = vec![ing(&b, "medium_oil", 48.0), ing(&b, "steam_high", 3.0)];
    let outputs = vec![ing(&b, "diesel", 36.0), ing(&b, "light_oil", 30.0)];
    b.register_recipe("medium_oil_refining", stage_2, inputs, outputs);

    let inputs = vec![ing(&b, "light_oil", 30.0), ing(&b, "steam_high", 3.0)];
    let outputs = vec![ing(&b, "naphtha", 24.0), ing(&b, "fuel_gas", 12.0)];
    b.register_recipe("light_oil_refining", stage_3, inputs, outputs);

    b.build().expect("refinery fixture must build")
}

// ===========================================================================
// Chart helpers
// ===========================================================================

/// Add a node for a recipe looked up by name, at the origin.
pub fn add_recipe_node(chart: &mut Chart, catalog: &Catalog, recipe: &str) -> NodeId {
    let id = catalog
        .recipe_id(recipe)
        .unwrap_or_else(|| panic!("fixture recipe not registered: {recipe}"));
    chart
        .add_node(catalog, id, Position::default())
        .expect("fixture recipe must resolve")
}
