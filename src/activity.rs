use serde::{Deserialize, Serialize};

/// A bookable activity from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Activity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Read-only activity catalog, kept in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
}

impl ActivityCatalog {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn filter(&self, destination: &str, preferences: &[String]) -> Vec<Activity> {
        filter_activities(&self.activities, destination, preferences)
    }
}

/// Every activity currently matches every destination. Narrowing by
/// destination is left for when the catalog carries more than one country.
pub fn matches_destination(_activity: &Activity, _destination: &str) -> bool {
    true
}

/// An empty preference list matches everything; otherwise at least one
/// category must be among the preferences.
pub fn matches_preferences(activity: &Activity, preferences: &[String]) -> bool {
    preferences.is_empty() || preferences.iter().any(|pref| activity.has_category(pref))
}

/// Activities matching `destination` and `preferences`, in catalog order.
pub fn filter_activities(
    catalog: &[Activity],
    destination: &str,
    preferences: &[String],
) -> Vec<Activity> {
    catalog
        .iter()
        .filter(|activity| {
            matches_destination(activity, destination) && matches_preferences(activity, preferences)
        })
        .cloned()
        .collect()
}
