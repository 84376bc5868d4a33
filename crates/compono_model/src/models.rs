//! Data models for architecture documents.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::strict::unique_keys;

/// An organizational or architectural grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Area {
    pub name: String,
    /// Key of the enclosing area. Absent or empty for a root area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Area {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent = Some(parent_key.into());
        self
    }

    /// The parent area key, treating an empty string as no parent.
    pub fn parent_key(&self) -> Option<&str> {
        self.parent.as_deref().filter(|key| !key.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.parent_key().is_none()
    }
}

/// A single software unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Component {
    pub name: String,
    pub description: String,
    pub git: String,
    pub release_date: String,
    #[serde(rename = "level")]
    pub level_key: String,
    #[serde(rename = "type")]
    pub type_key: String,
    #[serde(rename = "team")]
    pub team_key: String,
    #[serde(rename = "area")]
    pub area_key: String,
    /// Keys of the components this one depends on. Not checked at load time.
    #[serde(rename = "dependencies")]
    pub dependency_keys: Vec<String>,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn in_area(mut self, area_key: impl Into<String>) -> Self {
        self.area_key = area_key.into();
        self
    }

    pub fn at_level(mut self, level_key: impl Into<String>) -> Self {
        self.level_key = level_key.into();
        self
    }

    pub fn owned_by(mut self, team_key: impl Into<String>) -> Self {
        self.team_key = team_key.into();
        self
    }

    pub fn depends_on(mut self, component_key: impl Into<String>) -> Self {
        self.dependency_keys.push(component_key.into());
        self
    }
}

/// A horizontal tier used to rank-align components within an area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Level {
    pub name: String,
}

/// A name and email pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

/// Node colors for everything a team owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Display {
    pub background_color: String,
    pub foreground_color: String,
}

impl Display {
    pub fn new(background_color: impl Into<String>, foreground_color: impl Into<String>) -> Self {
        Self {
            background_color: background_color.into(),
            foreground_color: foreground_color.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.background_color.is_empty() && self.foreground_color.is_empty()
    }
}

/// An owning group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Team {
    pub name: String,
    pub team_contact: Contact,
    pub lead_contact: Contact,
    pub display: Display,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }
}

/// A kind of component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentType {
    pub name: String,
    pub description: String,
    pub shape: String,
}

/// The whole architecture, as decoded from the input documents.
///
/// Every section preserves document order and rejects duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Diagram {
    #[serde(default, deserialize_with = "unique_keys")]
    pub areas: IndexMap<String, Area>,
    #[serde(default, deserialize_with = "unique_keys")]
    pub components: IndexMap<String, Component>,
    #[serde(default, deserialize_with = "unique_keys")]
    pub levels: IndexMap<String, Level>,
    #[serde(default, deserialize_with = "unique_keys")]
    pub teams: IndexMap<String, Team>,
    #[serde(default, deserialize_with = "unique_keys")]
    pub types: IndexMap<String, ComponentType>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
            && self.components.is_empty()
            && self.levels.is_empty()
            && self.teams.is_empty()
            && self.types.is_empty()
    }

    /// Areas without a parent, in document order.
    pub fn root_areas(&self) -> impl Iterator<Item = (&str, &Area)> {
        self.areas
            .iter()
            .filter(|(_, area)| area.is_root())
            .map(|(key, area)| (key.as_str(), area))
    }

    /// Areas directly nested under `parent_key`, in document order.
    pub fn child_areas<'a>(&'a self, parent_key: &'a str) -> impl Iterator<Item = (&'a str, &'a Area)> {
        self.areas
            .iter()
            .filter(move |(_, area)| area.parent_key() == Some(parent_key))
            .map(|(key, area)| (key.as_str(), area))
    }

    /// Components placed directly in `area_key`, in document order.
    pub fn components_in_area<'a>(
        &'a self,
        area_key: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Component)> {
        self.components
            .iter()
            .filter(move |(_, component)| component.area_key == area_key)
            .map(|(key, component)| (key.as_str(), component))
    }

    /// The team owning `component`, if its key resolves.
    pub fn team_for(&self, component: &Component) -> Option<&Team> {
        self.teams.get(&component.team_key)
    }
}
