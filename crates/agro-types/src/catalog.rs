//! Static reference lists (`/catalogo/*`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Terrain / irrigation type (`/catalogo/tipoterreno`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilType {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

/// Catalog data a plan page needs, fetched once per page instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub crops: Vec<Crop>,
    pub soil_types: Vec<SoilType>,
}

impl Catalogs {
    pub fn crop_name(&self, id: i64) -> Option<&str> {
        self.crops
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    pub fn soil_type_name(&self, id: i64) -> Option<&str> {
        self.soil_types
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }
}
