use serde::{Deserialize, Serialize};

/// A community centre listed for a destination country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactCenter {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryContacts {
    pub country: String,
    #[serde(default)]
    pub centers: Vec<ContactCenter>,
}

/// Informational contacts keyed by country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactDirectory {
    countries: Vec<CountryContacts>,
}

impl ContactDirectory {
    pub fn new(countries: Vec<CountryContacts>) -> Self {
        Self { countries }
    }

    pub fn countries(&self) -> &[CountryContacts] {
        &self.countries
    }

    /// Case-insensitive exact match on the country name.
    pub fn find_country(&self, destination: &str) -> Option<&CountryContacts> {
        let wanted = destination.trim().to_lowercase();
        self.countries
            .iter()
            .find(|entry| entry.country.to_lowercase() == wanted)
    }
}
