//! Seed Format v1 schema
//!
//! Defines the YAML structure for seed import. Children are nested under
//! their parent, so parent ids are implied by position.

use celltrack_core::model::Attributes;
use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV1 {
    /// Schema version (must be 1 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub companies: Vec<SeedCompany>,

    #[serde(default)]
    pub parts: Vec<SeedPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCompany {
    /// Stable across imports
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sites: Vec<SeedSite>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSite {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub value_streams: Vec<SeedValueStream>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedValueStream {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cells: Vec<SeedCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCell {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub machines: Vec<SeedMachine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMachine {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPart {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub ideal_cycle_time_secs: Option<f64>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl SeedV1 {
    /// Every `(kind, id, name)` in document order
    pub fn entries(&self) -> Vec<(&'static str, &str, &str)> {
        let mut entries = Vec::new();
        for company in &self.companies {
            entries.push(("company", company.id.as_str(), company.name.as_str()));
            for site in &company.sites {
                entries.push(("site", site.id.as_str(), site.name.as_str()));
                for vs in &site.value_streams {
                    entries.push(("value stream", vs.id.as_str(), vs.name.as_str()));
                    for cell in &vs.cells {
                        entries.push(("cell", cell.id.as_str(), cell.name.as_str()));
                        for machine in &cell.machines {
                            entries.push(("machine", machine.id.as_str(), machine.name.as_str()));
                        }
                    }
                }
            }
        }
        for part in &self.parts {
            entries.push(("part", part.id.as_str(), part.name.as_str()));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_seed() {
        let yaml = r#"
schema_version: 1
companies:
  - id: co-1
    name: Acme
    sites:
      - id: site-1
        name: Plant A
        value_streams:
          - id: vs-1
            name: Brackets
            cells:
              - id: cell-1
                name: Weld
                machines:
                  - id: m-1
                    name: Robot 1
parts:
  - id: part-1
    name: Bracket
    attributes:
      material: steel
"#;

        let seed: SeedV1 = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(seed.companies[0].sites[0].value_streams[0].cells[0].machines.len(), 1);
        assert_eq!(seed.parts[0].attributes.get("material").unwrap(), "steel");
        assert_eq!(seed.entries().len(), 6);
    }
}
