mod parks;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Catalog identifier of a park
pub type ParkId = u32;

const WEBSITE_BASE: &str = "https://www.ebparks.org/parks/";

/// One park (area record). Never mutated after the catalog is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Park {
    pub id: ParkId,
    pub name: String,
    pub city: String,
    pub county: String,
    pub acres: f64,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    pub website: String,
}

impl Park {
    /// Whether the park has a usable point location for a marker
    pub fn has_location(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Immutable, ordered collection of parks with an id index
#[derive(Clone, Debug)]
pub struct Catalog {
    parks: Vec<Park>,
    index: HashMap<ParkId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(parks: Vec<Park>) -> Result<Self> {
        let mut index = HashMap::with_capacity(parks.len());
        for (pos, park) in parks.iter().enumerate() {
            if index.insert(park.id, pos).is_some() {
                bail!("duplicate park id {} ({})", park.id, park.name);
            }
        }
        Ok(Self { parks, index })
    }

    /// The East Bay Regional Park District catalog compiled into the binary
    pub fn builtin() -> Self {
        let parks: Vec<Park> = parks::PARKS.iter().map(Park::from).collect();
        let index = parks.iter().enumerate().map(|(pos, p)| (p.id, pos)).collect();
        Self { parks, index }
    }

    /// Load a catalog from a JSON array of parks
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let parks: Vec<Park> = serde_json::from_str(&content)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        Self::new(parks)
    }

    pub fn get(&self, id: ParkId) -> Option<&Park> {
        self.index.get(&id).map(|&pos| &self.parks[pos])
    }

    pub fn contains(&self, id: ParkId) -> bool {
        self.index.contains_key(&id)
    }

    /// Exact-name lookup, used to associate boundary features with parks
    pub fn find_by_name(&self, name: &str) -> Option<&Park> {
        self.parks.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Park> {
        self.parks.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = ParkId> + '_ {
        self.parks.iter().map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.parks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parks.is_empty()
    }
}

impl From<&parks::ParkEntry> for Park {
    fn from(entry: &parks::ParkEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.to_string(),
            city: entry.city.to_string(),
            county: entry.county.to_string(),
            acres: entry.acres,
            lat: entry.lat,
            lng: entry.lng,
            description: entry.description.to_string(),
            website: format!("{}{}", WEBSITE_BASE, slug(entry.name)),
        }
    }
}

/// URL slug for a park name: lowercase words joined by '-'
fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
