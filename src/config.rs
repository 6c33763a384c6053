use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};
use crate::geometry::AssemblyParams;
use crate::grammar::{ExpansionLimits, DEFAULT_MAX_SYMBOLS, MAX_ITERATIONS, MAX_SYMBOLS};
use crate::math::Vec3;
use crate::presets::{Preset, PresetCatalog};
use crate::turtle::TurtleParams;

/// Every knob of a generation run. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    pub axiom: String,
    /// Production rules, one `symbol:replacement` per line
    pub rules: String,
    pub iterations: u32,
    pub angle: f32,
    pub initial_length: f32,
    pub length_decay: f32,
    pub initial_radius: f32,
    pub radius_decay: f32,
    /// Tube radius per unit of branch radius
    pub bevel_depth: f32,
    /// Random yaw range applied on yaw symbols and branch pushes
    pub branch_spread: f32,
    pub rotation_jitter: f32,
    /// Fractional step length variation, in [0, 1)
    pub length_jitter: f32,
    pub tropism_strength: f32,
    pub tropism_direction: Vec3,
    pub seed: u64,
    pub add_leaves: bool,
    pub leaf_size: f32,
    pub leaf_jitter: f32,
    /// Random roll on every push
    pub branch_roll: bool,
    /// Ceiling on the expanded symbol count
    pub max_symbols: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            axiom: "X".to_string(),
            rules: "X:F[+X]F[-X]FX\nF:FF".to_string(),
            iterations: 6,
            angle: 20.0,
            initial_length: 1.0,
            length_decay: 0.88,
            initial_radius: 1.0,
            radius_decay: 0.9,
            bevel_depth: 0.05,
            branch_spread: 30.0,
            rotation_jitter: 5.0,
            length_jitter: 0.1,
            tropism_strength: 0.05,
            tropism_direction: Vec3::UP,
            seed: 42,
            add_leaves: true,
            leaf_size: 0.3,
            leaf_jitter: 0.1,
            branch_roll: true,
            max_symbols: DEFAULT_MAX_SYMBOLS,
        }
    }
}

impl GeneratorParams {
    /// Parse a (possibly partial) YAML document; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let params: Self = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Defaults overlaid with a preset's grammar and growth settings
    pub fn from_preset(preset: &Preset) -> Self {
        let mut params = Self::default();
        params.apply_preset(preset);
        params
    }

    /// Look up a built-in preset by key
    pub fn for_preset(key: &str) -> Result<Self> {
        PresetCatalog::builtin().lookup(key).map(Self::from_preset)
    }

    /// Overwrite the preset-owned fields. Seed, leaf settings, roll,
    /// tropism direction and the symbol ceiling are left untouched.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.axiom = preset.axiom.clone();
        self.rules = preset.rules.clone();
        self.iterations = preset.iterations;
        self.angle = preset.angle;
        self.initial_length = preset.initial_length;
        self.length_decay = preset.length_decay;
        self.initial_radius = preset.initial_radius;
        self.radius_decay = preset.radius_decay;
        self.bevel_depth = preset.bevel_depth;
        self.tropism_strength = preset.tropism_strength;
        self.rotation_jitter = preset.rotation_jitter;
        self.length_jitter = preset.length_jitter;
        self.leaf_jitter = preset.leaf_jitter;
        self.branch_spread = preset.branch_spread;
    }

    pub fn validate(&self) -> Result<()> {
        if self.axiom.trim().is_empty() {
            return Err(TreeError::invalid("axiom", "axiom must contain at least one symbol"));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(TreeError::IterationLimit {
                requested: self.iterations,
                max: MAX_ITERATIONS,
            });
        }
        if self.max_symbols == 0 || self.max_symbols > MAX_SYMBOLS {
            return Err(TreeError::invalid(
                "max_symbols",
                format!("{} is outside 1..={}", self.max_symbols, MAX_SYMBOLS),
            ));
        }
        self.turtle_params().validate()?;
        self.assembly_params().validate()
    }

    /// Interpreter parameters with angles converted to radians
    pub fn turtle_params(&self) -> TurtleParams {
        TurtleParams {
            angle: self.angle.to_radians(),
            initial_length: self.initial_length,
            initial_radius: self.initial_radius,
            length_decay: self.length_decay,
            radius_decay: self.radius_decay,
            rotation_jitter: self.rotation_jitter.to_radians(),
            length_jitter: self.length_jitter,
            branch_spread: self.branch_spread.to_radians(),
            branch_roll: self.branch_roll,
            tropism_strength: self.tropism_strength,
            tropism_direction: self.tropism_direction,
            leaf_jitter: self.leaf_jitter,
        }
    }

    pub fn assembly_params(&self) -> AssemblyParams {
        AssemblyParams {
            bevel_depth: self.bevel_depth,
            add_leaves: self.add_leaves,
            leaf_size: self.leaf_size,
            seed: self.seed,
        }
    }

    pub fn limits(&self) -> ExpansionLimits {
        ExpansionLimits::default().with_max_symbols(self.max_symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = GeneratorParams::default();
        params.validate().unwrap();
        assert_eq!(params.seed, 42);
        assert_eq!(params.iterations, 6);
    }

    #[test]
    fn test_turtle_params_use_radians() {
        let params = GeneratorParams {
            angle: 90.0,
            ..Default::default()
        };
        let turtle = params.turtle_params();
        assert!((turtle.angle - std::f32::consts::FRAC_PI_2).abs() < 0.0001);
        assert!((turtle.branch_spread - 30f32.to_radians()).abs() < 0.0001);
        assert_eq!(turtle.length_decay, 0.88);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let params = GeneratorParams::from_yaml("iterations: 3\nseed: 7\nrules: \"F:FF\"\naxiom: F\n").unwrap();
        assert_eq!(params.iterations, 3);
        assert_eq!(params.seed, 7);
        assert_eq!(params.axiom, "F");
        assert_eq!(params.leaf_size, 0.3);
        assert_eq!(params.tropism_direction, Vec3::UP);
    }

    #[test]
    fn test_yaml_validation_runs() {
        assert!(matches!(
            GeneratorParams::from_yaml("length_decay: 1.5"),
            Err(TreeError::InvalidParameter { name: "length_decay", .. })
        ));
        assert!(matches!(
            GeneratorParams::from_yaml("iterations: [1, 2]"),
            Err(TreeError::Yaml(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let params = GeneratorParams::for_preset("pine").unwrap();
        let back = GeneratorParams::from_yaml(&params.to_yaml().unwrap()).unwrap();
        assert_eq!(params, back);
    }

    #[test]
    fn test_apply_preset_keeps_run_settings() {
        let mut params = GeneratorParams {
            seed: 1234,
            leaf_size: 0.8,
            add_leaves: false,
            ..Default::default()
        };
        let oak = PresetCatalog::builtin().lookup("OAK").unwrap();
        params.apply_preset(oak);

        assert_eq!(params.rules, oak.rules);
        assert_eq!(params.angle, 25.0);
        assert_eq!(params.radius_decay, 0.88);
        assert_eq!(params.seed, 1234);
        assert_eq!(params.leaf_size, 0.8);
        assert!(!params.add_leaves);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            GeneratorParams::for_preset("cedar"),
            Err(TreeError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            GeneratorParams { initial_length: 0.0, ..Default::default() },
            GeneratorParams { initial_radius: -1.0, ..Default::default() },
            GeneratorParams { radius_decay: 0.0, ..Default::default() },
            GeneratorParams { bevel_depth: 0.0, ..Default::default() },
            GeneratorParams { length_jitter: 1.0, ..Default::default() },
            GeneratorParams { rotation_jitter: -1.0, ..Default::default() },
            GeneratorParams { leaf_size: 0.0, ..Default::default() },
            GeneratorParams { angle: f32::NAN, ..Default::default() },
            GeneratorParams { tropism_direction: Vec3::ZERO, ..Default::default() },
            GeneratorParams { max_symbols: 0, ..Default::default() },
            GeneratorParams { axiom: "  ".into(), ..Default::default() },
        ];
        for params in &cases {
            assert!(
                matches!(params.validate(), Err(TreeError::InvalidParameter { .. })),
                "{:?} should be rejected",
                params
            );
        }
    }

    #[test]
    fn test_huge_variation_rejected_before_generation() {
        let params = GeneratorParams {
            axiom: "F[F]".into(),
            iterations: 0,
            leaf_jitter: 3.0e38,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(TreeError::InvalidParameter { name: "leaf_jitter", .. })
        ));

        let caps = [
            ("rotation_jitter", GeneratorParams { rotation_jitter: 46.0, ..Default::default() }),
            ("branch_spread", GeneratorParams { branch_spread: 181.0, ..Default::default() }),
            ("tropism_strength", GeneratorParams { tropism_strength: 1.01, ..Default::default() }),
            ("leaf_jitter", GeneratorParams { leaf_jitter: 2.01, ..Default::default() }),
        ];
        for (field, params) in caps {
            match params.validate() {
                Err(TreeError::InvalidParameter { name, .. }) => assert_eq!(name, field),
                other => panic!("{} should be rejected, got {:?}", field, other),
            }
        }

        GeneratorParams {
            rotation_jitter: 45.0,
            branch_spread: 180.0,
            tropism_strength: 1.0,
            leaf_jitter: 2.0,
            ..Default::default()
        }
        .validate()
        .unwrap();
    }

    #[test]
    fn test_huge_symbol_ceiling_rejected() {
        let params = GeneratorParams {
            max_symbols: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(TreeError::InvalidParameter { name: "max_symbols", .. })
        ));

        let yaml = format!("max_symbols: {}", MAX_SYMBOLS + 1);
        assert!(matches!(
            GeneratorParams::from_yaml(&yaml),
            Err(TreeError::InvalidParameter { name: "max_symbols", .. })
        ));
        GeneratorParams::from_yaml(&format!("max_symbols: {}", MAX_SYMBOLS)).unwrap();
    }

    #[test]
    fn test_iteration_cap() {
        let params = GeneratorParams {
            iterations: MAX_ITERATIONS + 1,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(TreeError::IterationLimit { .. })));
    }

    #[test]
    fn test_leaf_size_ignored_without_leaves() {
        let params = GeneratorParams {
            add_leaves: false,
            leaf_size: 0.0,
            ..Default::default()
        };
        params.validate().unwrap();
    }
}
