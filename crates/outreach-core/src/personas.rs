//! The fixed four-persona catalog and its pain-point mapping.
//!
//! Personas are immutable reference data loaded from `config/personas.yaml`.
//! The mapping from pain point to persona is a total table: validation
//! rejects catalogs that are not exactly four personas or that leave any
//! pain point uncovered, so selection can never fail at runtime.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::{PainPoint, DEFAULT_PRIORITY};
use crate::ConfigError;

/// Exactly this many personas, always.
pub const PERSONA_COUNT: usize = 4;

/// One fixed outreach voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    /// Signature title, e.g. "Brand & Content Strategist".
    pub title: String,
    /// Tone descriptor fed verbatim into the email prompt.
    pub tone: String,
    /// Pain points this persona answers. Together the four personas must
    /// cover every pain point exactly once.
    pub pain_points: Vec<PainPoint>,
    /// Talking points woven into the email prompt for this persona.
    pub talking_points: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PersonasFile {
    /// Optional classification priority override. `generic` is appended
    /// if omitted.
    #[serde(default)]
    priority: Vec<PainPoint>,
    personas: Vec<Persona>,
}

/// Validated persona catalog plus the classification priority order.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
    priority: Vec<PainPoint>,
    by_pain: HashMap<PainPoint, usize>,
}

impl PersonaCatalog {
    /// Load and validate the catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// validation (wrong persona count, uncovered or doubly-covered pain
    /// point, duplicate names, duplicate priority entries).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PersonasFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`PersonaCatalog::load`], minus file I/O.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: PersonasFile = serde_yaml::from_str(content)?;
        Self::build(file.personas, file.priority)
    }

    fn build(personas: Vec<Persona>, priority: Vec<PainPoint>) -> Result<Self, ConfigError> {
        if personas.len() != PERSONA_COUNT {
            return Err(ConfigError::Validation(format!(
                "catalog must define exactly {PERSONA_COUNT} personas, found {}",
                personas.len()
            )));
        }

        let mut seen_names = HashSet::new();
        let mut by_pain = HashMap::new();
        for (idx, persona) in personas.iter().enumerate() {
            if persona.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "persona name must be non-empty".to_string(),
                ));
            }
            if !seen_names.insert(persona.name.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate persona name '{}'",
                    persona.name
                )));
            }
            for &pain in &persona.pain_points {
                if by_pain.insert(pain, idx).is_some() {
                    return Err(ConfigError::Validation(format!(
                        "pain point '{pain}' is mapped to more than one persona"
                    )));
                }
            }
        }

        for pain in DEFAULT_PRIORITY {
            if !by_pain.contains_key(&pain) {
                return Err(ConfigError::Validation(format!(
                    "pain point '{pain}' has no persona mapped"
                )));
            }
        }

        let priority = normalize_priority(priority)?;

        Ok(Self {
            personas,
            priority,
            by_pain,
        })
    }

    /// Deterministic pain-point → persona lookup. Total by construction.
    #[must_use]
    pub fn select(&self, pain: PainPoint) -> &Persona {
        // by_pain covers every PainPoint; validated in build().
        &self.personas[self.by_pain[&pain]]
    }

    /// The classification priority order for this deployment.
    #[must_use]
    pub fn priority(&self) -> &[PainPoint] {
        &self.priority
    }

    #[must_use]
    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }
}

/// Apply defaulting rules to a configured priority order: empty means
/// [`DEFAULT_PRIORITY`], a missing trailing `generic` is appended, and
/// duplicates are rejected.
fn normalize_priority(priority: Vec<PainPoint>) -> Result<Vec<PainPoint>, ConfigError> {
    if priority.is_empty() {
        return Ok(DEFAULT_PRIORITY.to_vec());
    }

    let mut seen = HashSet::new();
    for &pain in &priority {
        if !seen.insert(pain) {
            return Err(ConfigError::Validation(format!(
                "priority order lists '{pain}' more than once"
            )));
        }
    }

    let mut priority = priority;
    if !priority.contains(&PainPoint::Generic) {
        priority.push(PainPoint::Generic);
    }
    Ok(priority)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CATALOG: &str = r"
personas:
  - name: Web Presence Builder
    title: Web Strategist
    tone: practical and reassuring
    pain_points: [no-website]
    talking_points:
      - a simple professional site customers can actually find
  - name: Performance Consultant
    title: Site Performance Consultant
    tone: direct and data-driven
    pain_points: [poor-performance]
    talking_points:
      - faster pages keep visitors from bouncing to competitors
  - name: Reputation Strategist
    title: Customer Experience Strategist
    tone: empathetic and constructive
    pain_points: [poor-reputation]
    talking_points:
      - responding to reviews rebuilds trust with future customers
  - name: Brand Content Strategist
    title: Brand & Content Strategist
    tone: aspirational and consultative
    pain_points: [low-visibility, generic]
    talking_points:
      - a curated social presence attracts high-value clients
";

    #[test]
    fn valid_catalog_parses_and_selection_is_total() {
        let catalog = PersonaCatalog::from_yaml_str(VALID_CATALOG).unwrap();
        assert_eq!(catalog.personas().len(), PERSONA_COUNT);
        for pain in DEFAULT_PRIORITY {
            let _ = catalog.select(pain);
        }
        assert_eq!(catalog.select(PainPoint::NoWebsite).name, "Web Presence Builder");
        assert_eq!(
            catalog.select(PainPoint::Generic).name,
            "Brand Content Strategist"
        );
    }

    #[test]
    fn missing_priority_defaults_to_builtin_order() {
        let catalog = PersonaCatalog::from_yaml_str(VALID_CATALOG).unwrap();
        assert_eq!(catalog.priority(), DEFAULT_PRIORITY);
    }

    #[test]
    fn configured_priority_is_respected_and_generic_appended() {
        let yaml = format!(
            "priority: [poor-reputation, no-website, poor-performance, low-visibility]\n{VALID_CATALOG}"
        );
        let catalog = PersonaCatalog::from_yaml_str(&yaml).unwrap();
        assert_eq!(catalog.priority()[0], PainPoint::PoorReputation);
        assert_eq!(
            *catalog.priority().last().unwrap(),
            PainPoint::Generic,
            "generic must be appended when omitted"
        );
    }

    #[test]
    fn duplicate_priority_entry_rejected() {
        let yaml = format!("priority: [no-website, no-website]\n{VALID_CATALOG}");
        let result = PersonaCatalog::from_yaml_str(&yaml);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn wrong_persona_count_rejected() {
        let yaml = r"
personas:
  - name: Only One
    title: T
    tone: t
    pain_points: [no-website, poor-performance, poor-reputation, low-visibility, generic]
    talking_points: []
";
        let result = PersonaCatalog::from_yaml_str(yaml);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("exactly 4")),
            "got: {result:?}"
        );
    }

    #[test]
    fn uncovered_pain_point_rejected() {
        // generic is not mapped anywhere.
        let yaml = VALID_CATALOG.replace("[low-visibility, generic]", "[low-visibility]");
        let result = PersonaCatalog::from_yaml_str(&yaml);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("generic")),
            "got: {result:?}"
        );
    }

    #[test]
    fn doubly_covered_pain_point_rejected() {
        let yaml = VALID_CATALOG.replace("[poor-performance]", "[poor-performance, no-website]");
        let result = PersonaCatalog::from_yaml_str(&yaml);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn duplicate_persona_name_rejected() {
        let yaml = VALID_CATALOG.replace("Performance Consultant", "Web Presence Builder");
        let result = PersonaCatalog::from_yaml_str(&yaml);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
            "got: {result:?}"
        );
    }

    #[test]
    fn shipped_catalog_file_is_valid() {
        let catalog =
            PersonaCatalog::from_yaml_str(include_str!("../../../config/personas.yaml")).unwrap();
        assert_eq!(catalog.personas().len(), PERSONA_COUNT);
    }
}
