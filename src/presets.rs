//! Named parameter bundles for common tree shapes.
//!
//! The built-in catalog is read-only; callers copy a [`Preset`] into their
//! own [`GeneratorParams`](crate::config::GeneratorParams) before changing
//! anything.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};
use crate::config::GeneratorParams;
use crate::grammar::RuleSet;

/// Grammar and growth settings for one tree shape. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Lookup key, matched case-insensitively
    pub key: String,
    /// Display name
    pub name: String,
    pub axiom: String,
    /// Production rules, one `symbol:replacement` per line
    pub rules: String,
    pub iterations: u32,
    pub angle: f32,
    #[serde(default = "one")]
    pub initial_length: f32,
    pub length_decay: f32,
    #[serde(default = "one")]
    pub initial_radius: f32,
    pub radius_decay: f32,
    #[serde(default = "default_bevel_depth")]
    pub bevel_depth: f32,
    #[serde(default = "default_tropism_strength")]
    pub tropism_strength: f32,
    #[serde(default = "default_rotation_jitter")]
    pub rotation_jitter: f32,
    #[serde(default = "default_length_jitter")]
    pub length_jitter: f32,
    #[serde(default = "default_leaf_jitter")]
    pub leaf_jitter: f32,
    #[serde(default = "default_branch_spread")]
    pub branch_spread: f32,
}

fn one() -> f32 {
    1.0
}

fn default_bevel_depth() -> f32 {
    0.05
}

fn default_tropism_strength() -> f32 {
    0.05
}

fn default_rotation_jitter() -> f32 {
    5.0
}

fn default_length_jitter() -> f32 {
    0.1
}

fn default_leaf_jitter() -> f32 {
    0.1
}

fn default_branch_spread() -> f32 {
    30.0
}

impl Preset {
    /// Preset with the shared variation defaults
    #[allow(clippy::too_many_arguments)]
    fn builtin(
        key: &str,
        name: &str,
        axiom: &str,
        rules: &str,
        iterations: u32,
        angle: f32,
        length_decay: f32,
        radius_decay: f32,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            axiom: axiom.to_string(),
            rules: rules.to_string(),
            iterations,
            angle,
            initial_length: one(),
            length_decay,
            initial_radius: one(),
            radius_decay,
            bevel_depth: default_bevel_depth(),
            tropism_strength: default_tropism_strength(),
            rotation_jitter: default_rotation_jitter(),
            length_jitter: default_length_jitter(),
            leaf_jitter: default_leaf_jitter(),
            branch_spread: default_branch_spread(),
        }
    }

    /// Parse the preset's rule text
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::parse(&self.rules)
    }

    /// Key, grammar and every numeric range a generation run would check
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(TreeError::invalid("key", "preset key is empty"));
        }
        GeneratorParams::from_preset(self).validate()?;
        self.rule_set().map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogInput {
    presets: Vec<Preset>,
}

/// Ordered, read-only collection of presets
#[derive(Debug, Clone, PartialEq)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Build a catalog, rejecting invalid entries and duplicate keys
    pub fn new(presets: Vec<Preset>) -> Result<Self> {
        let mut seen = HashSet::new();
        for preset in &presets {
            preset.validate()?;
            if !seen.insert(preset.key.to_ascii_uppercase()) {
                return Err(TreeError::invalid(
                    "key",
                    format!("duplicate preset key '{}'", preset.key),
                ));
            }
        }
        Ok(Self { presets })
    }

    /// The shapes shipped with the generator
    pub fn builtin() -> &'static PresetCatalog {
        static BUILTIN: OnceLock<PresetCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| PresetCatalog {
            presets: builtin_presets(),
        })
    }

    /// Parse a catalog document:
    ///
    /// ```yaml
    /// presets:
    ///   - key: WILLOW
    ///     name: Weeping Willow
    ///     axiom: X
    ///     rules: "X:F[-X][+X]FX\nF:FF"
    ///     iterations: 5
    ///     angle: 15
    ///     length_decay: 0.9
    ///     radius_decay: 0.9
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let input: CatalogInput = serde_yaml::from_str(yaml)?;
        Self::new(input.presets)
    }

    pub fn lookup(&self, key: &str) -> Result<&Preset> {
        let key = key.trim();
        self.presets
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| TreeError::UnknownPreset(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::builtin("CLASSIC", "Classic", "X", "X:F[+X]F[-X]FX\nF:FF", 6, 20.0, 0.88, 0.9),
        Preset::builtin("PINE", "Pine", "X", "X:F[+X][-X]FX\nF:FF", 7, 18.0, 0.93, 0.92),
        Preset::builtin("BROADLEAF", "Broadleaf", "F", "F:F[+F]F[-F][F]", 5, 22.0, 0.82, 0.88),
        Preset::builtin("OAK", "Oak", "X", "X:F-[[X]+X]+F[+FX]-X\nF:FF", 6, 25.0, 0.88, 0.88),
        Preset::builtin("FANTASY", "Fantasy Dense", "X", "X:F[+X][-X]F[+X]F[-X]X\nF:FF", 7, 18.0, 0.94, 0.92),
        Preset::builtin("BUSH", "Explosive Bush", "X", "X:FX[+X][-X]FX\nF:F[F]F", 5, 16.0, 0.9, 0.9),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = PresetCatalog::builtin();
        let keys: Vec<_> = catalog.keys().collect();
        assert_eq!(keys, vec!["CLASSIC", "PINE", "BROADLEAF", "OAK", "FANTASY", "BUSH"]);
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_builtin_presets_are_valid() {
        for preset in PresetCatalog::builtin().iter() {
            preset.validate().unwrap();
            assert!(preset.rule_set().unwrap().len() >= 1);
        }
        PresetCatalog::new(builtin_presets()).unwrap();
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = PresetCatalog::builtin();
        let oak = catalog.lookup("oak").unwrap();
        assert_eq!(oak.name, "Oak");
        assert_eq!(oak.angle, 25.0);
        assert_eq!(catalog.lookup(" Pine ").unwrap().iterations, 7);
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let err = PresetCatalog::builtin().lookup("ELM").unwrap_err();
        assert!(matches!(err, TreeError::UnknownPreset(ref key) if key == "ELM"));
    }

    #[test]
    fn test_bush_values() {
        let bush = PresetCatalog::builtin().lookup("BUSH").unwrap();
        assert_eq!(bush.name, "Explosive Bush");
        assert_eq!(bush.rules, "X:FX[+X][-X]FX\nF:F[F]F");
        assert_eq!(bush.iterations, 5);
        assert_eq!(bush.bevel_depth, 0.05);
    }

    #[test]
    fn test_yaml_catalog_fills_defaults() {
        let yaml = r#"
presets:
  - key: WILLOW
    name: Weeping Willow
    axiom: X
    rules: "X:F[-X][+X]FX\nF:FF"
    iterations: 5
    angle: 15
    length_decay: 0.9
    radius_decay: 0.85
"#;
        let catalog = PresetCatalog::from_yaml(yaml).unwrap();
        let willow = catalog.lookup("willow").unwrap();
        assert_eq!(willow.initial_length, 1.0);
        assert_eq!(willow.branch_spread, 30.0);
        assert_eq!(willow.rule_set().unwrap().len(), 2);
    }

    #[test]
    fn test_yaml_catalog_rejects_duplicates() {
        let mut presets = builtin_presets();
        let mut copy = presets[0].clone();
        copy.key = "classic".into();
        presets.push(copy);
        assert!(matches!(
            PresetCatalog::new(presets),
            Err(TreeError::InvalidParameter { name: "key", .. })
        ));
    }

    #[test]
    fn test_yaml_catalog_rejects_bad_rules() {
        let yaml = r#"
presets:
  - key: BROKEN
    name: Broken
    axiom: F
    rules: "FF"
    iterations: 2
    angle: 20
    length_decay: 0.9
    radius_decay: 0.9
"#;
        assert!(matches!(
            PresetCatalog::from_yaml(yaml),
            Err(TreeError::InvalidRule { line: 1, .. })
        ));
    }

    #[test]
    fn test_yaml_catalog_rejects_out_of_range_values() {
        let yaml = r#"
presets:
  - key: STRETCHY
    name: Stretchy
    axiom: F
    rules: "F:FF"
    iterations: 2
    angle: 20
    length_decay: 5.0
    radius_decay: 0.9
"#;
        assert!(matches!(
            PresetCatalog::from_yaml(yaml),
            Err(TreeError::InvalidParameter { name: "length_decay", .. })
        ));

        let mut preset = builtin_presets().remove(0);
        preset.iterations = 13;
        assert!(matches!(preset.validate(), Err(TreeError::IterationLimit { .. })));
        preset.iterations = 6;
        preset.axiom = " ".into();
        assert!(matches!(
            preset.validate(),
            Err(TreeError::InvalidParameter { name: "axiom", .. })
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            PresetCatalog::from_yaml("presets: [unclosed"),
            Err(TreeError::Yaml(_))
        ));
    }
}
