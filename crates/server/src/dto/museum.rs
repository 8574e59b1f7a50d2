use museo::{catalog::Museum, shared::geo::Coordinate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuseumDto {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl MuseumDto {
    pub fn from(museum: &Museum) -> Self {
        Self {
            id: museum.id.to_string(),
            name: museum.name.to_string(),
            coordinate: museum.coordinate,
            city: museum.city.as_deref().map(str::to_string),
            country: museum.country.as_deref().map(str::to_string),
        }
    }
}
