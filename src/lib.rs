use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod grammar;
pub mod math;
pub mod presets;
pub mod turtle;
pub mod variation;

pub use config::GeneratorParams;
pub use error::{Result, TreeError};
pub use generator::{GeneratedTree, TreeGenerator};
pub use geometry::{assemble, AssemblyParams, BranchCurve, LeafInstance, TreeGeometry};
pub use grammar::{expand, ExpansionLimits, RuleSet, Symbol, SymbolString};
pub use presets::{Preset, PresetCatalog};
pub use turtle::{interpret, BranchSegment, Interpretation, LeafMarker, StackWarning, TurtleParams};
pub use variation::{RandomSource, SeededRandom};

use geometry::{leaf_template_mesh, Mesh, CURVE_RESOLUTION, RADIAL_SEGMENTS};

/// Install the panic hook and route `tracing` events to the browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    {
        tracing_wasm::set_as_global_default();
        web_sys::console::log_1(&concat!("lsystem-tree ", env!("CARGO_PKG_VERSION")).into());
    }
}

fn to_js(err: TreeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Tree generator exposed to JavaScript
#[wasm_bindgen]
pub struct LSystemTree {
    params: GeneratorParams,
    tree: Option<GeneratedTree>,
    /// Branch and leaf meshes, built on first request after each generate
    meshes: Option<(Mesh, Mesh)>,
}

impl Default for LSystemTree {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl LSystemTree {
    #[wasm_bindgen(constructor)]
    pub fn new() -> LSystemTree {
        Self {
            params: GeneratorParams::default(),
            tree: None,
            meshes: None,
        }
    }

    // === Configuration ===

    /// Load a built-in preset's grammar and growth settings
    #[wasm_bindgen]
    pub fn apply_preset(&mut self, name: &str) -> std::result::Result<(), JsValue> {
        self.try_apply_preset(name).map_err(to_js)
    }

    /// Replace the configuration with a YAML document (missing keys use defaults)
    #[wasm_bindgen]
    pub fn configure_yaml(&mut self, yaml: &str) -> std::result::Result<(), JsValue> {
        self.try_configure_yaml(yaml).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_axiom(&mut self, axiom: &str) {
        self.params.axiom = axiom.to_string();
    }

    #[wasm_bindgen]
    pub fn set_rules(&mut self, rules: &str) {
        self.params.rules = rules.to_string();
    }

    #[wasm_bindgen]
    pub fn set_iterations(&mut self, iterations: i32) -> std::result::Result<(), JsValue> {
        self.try_set_iterations(iterations).map_err(to_js)
    }

    /// Turn angle in degrees
    #[wasm_bindgen]
    pub fn set_angle(&mut self, degrees: f32) {
        self.params.angle = degrees;
    }

    #[wasm_bindgen]
    pub fn set_seed(&mut self, seed: u32) {
        self.params.seed = u64::from(seed);
    }

    #[wasm_bindgen]
    pub fn set_add_leaves(&mut self, add_leaves: bool) {
        self.params.add_leaves = add_leaves;
    }

    // === Generation ===

    /// Run the full pipeline with the current configuration
    #[wasm_bindgen]
    pub fn generate(&mut self) -> std::result::Result<(), JsValue> {
        self.try_generate().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn symbol_count(&self) -> usize {
        self.tree.as_ref().map_or(0, |t| t.symbol_count)
    }

    #[wasm_bindgen]
    pub fn segment_count(&self) -> usize {
        self.tree.as_ref().map_or(0, GeneratedTree::segment_count)
    }

    #[wasm_bindgen]
    pub fn curve_count(&self) -> usize {
        self.tree.as_ref().map_or(0, |t| t.geometry.curves.len())
    }

    #[wasm_bindgen]
    pub fn leaf_count(&self) -> usize {
        self.tree.as_ref().map_or(0, GeneratedTree::leaf_count)
    }

    /// Curve knots as `x, y, z, radius` quadruples; empty for a bad index
    #[wasm_bindgen]
    pub fn curve_points(&self, index: usize) -> Vec<f32> {
        self.tree
            .as_ref()
            .and_then(|t| t.geometry.curves.get(index))
            .map(|curve| {
                curve
                    .points
                    .iter()
                    .flat_map(|p| [p.position.x, p.position.y, p.position.z, p.radius])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Branch depth of a curve, or -1 for a bad index
    #[wasm_bindgen]
    pub fn curve_depth(&self, index: usize) -> i32 {
        self.tree
            .as_ref()
            .and_then(|t| t.geometry.curves.get(index))
            .map_or(-1, |c| c.depth as i32)
    }

    /// 16 column-major floats per leaf instance
    #[wasm_bindgen]
    pub fn leaf_matrices(&self) -> Vec<f32> {
        self.tree
            .as_ref()
            .map(|t| {
                t.geometry
                    .leaves
                    .iter()
                    .flat_map(|leaf| *leaf.matrix().as_slice())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Interleaved position/normal/uv floats of the beveled branches
    #[wasm_bindgen]
    pub fn branch_mesh_vertices(&mut self) -> Vec<f32> {
        self.meshes().map_or_else(Vec::new, |(branches, _)| branches.vertex_data())
    }

    #[wasm_bindgen]
    pub fn branch_mesh_indices(&mut self) -> Vec<u32> {
        self.meshes()
            .map_or_else(Vec::new, |(branches, _)| branches.index_data().to_vec())
    }

    /// Every leaf baked into one mesh, same layout as the branch mesh
    #[wasm_bindgen]
    pub fn leaf_mesh_vertices(&mut self) -> Vec<f32> {
        self.meshes().map_or_else(Vec::new, |(_, leaves)| leaves.vertex_data())
    }

    #[wasm_bindgen]
    pub fn leaf_mesh_indices(&mut self) -> Vec<u32> {
        self.meshes()
            .map_or_else(Vec::new, |(_, leaves)| leaves.index_data().to_vec())
    }

    /// Stack warnings from the last run as strings
    #[wasm_bindgen]
    pub fn warnings(&self) -> js_sys::Array {
        self.warning_messages()
            .into_iter()
            .map(|w| JsValue::from_str(&w))
            .collect()
    }

    #[wasm_bindgen]
    pub fn preset_names() -> js_sys::Array {
        PresetCatalog::builtin()
            .keys()
            .map(JsValue::from_str)
            .collect()
    }

    /// Summary of the last run as a JSON string
    #[wasm_bindgen]
    pub fn summary(&self) -> String {
        let Some(tree) = &self.tree else {
            return "null".to_string();
        };

        let bounds = tree
            .geometry
            .bounds()
            .map(|(min, max)| {
                format!(
                    "[{},{},{},{},{},{}]",
                    min.x, min.y, min.z, max.x, max.y, max.z
                )
            })
            .unwrap_or_else(|| "null".to_string());

        format!(
            r#"{{"axiom":"{}","iterations":{},"seed":{},"symbols":{},"segments":{},"curves":{},"leaves":{},"maxDepth":{},"warnings":{},"bounds":{}}}"#,
            escape_json(&self.params.axiom),
            self.params.iterations,
            self.params.seed,
            tree.symbol_count,
            tree.segment_count(),
            tree.geometry.curves.len(),
            tree.leaf_count(),
            tree.interpretation.max_depth(),
            tree.warnings().len(),
            bounds
        )
    }
}

impl LSystemTree {
    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    pub fn tree(&self) -> Option<&GeneratedTree> {
        self.tree.as_ref()
    }

    fn try_apply_preset(&mut self, name: &str) -> Result<()> {
        let preset = PresetCatalog::builtin().lookup(name)?;
        self.params.apply_preset(preset);
        Ok(())
    }

    fn try_configure_yaml(&mut self, yaml: &str) -> Result<()> {
        self.params = GeneratorParams::from_yaml(yaml)?;
        Ok(())
    }

    fn try_set_iterations(&mut self, iterations: i32) -> Result<()> {
        let iterations = u32::try_from(iterations).map_err(|_| {
            TreeError::invalid("iterations", format!("{} must not be negative", iterations))
        })?;
        self.params.iterations = iterations;
        Ok(())
    }

    /// A failed run keeps the previous tree
    fn try_generate(&mut self) -> Result<()> {
        let tree = TreeGenerator::new(self.params.clone())?.generate()?;
        self.tree = Some(tree);
        self.meshes = None;
        Ok(())
    }

    fn warning_messages(&self) -> Vec<String> {
        self.tree
            .as_ref()
            .map(|t| {
                t.warnings()
                    .iter()
                    .map(|w| match *w {
                        StackWarning::UnmatchedPop { index } => {
                            format!("unmatched ']' at symbol {} ignored", index)
                        }
                        StackWarning::UnclosedBranches { depth } => {
                            format!("{} branch(es) left open at end of string", depth)
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn meshes(&mut self) -> Option<&(Mesh, Mesh)> {
        if self.meshes.is_none() {
            let tree = self.tree.as_ref()?;
            let branches = tree.geometry.branch_mesh(CURVE_RESOLUTION, RADIAL_SEGMENTS);
            let leaves = tree.geometry.leaf_mesh(&leaf_template_mesh(1.0));
            self.meshes = Some((branches, leaves));
        }
        self.meshes.as_ref()
    }
}

/// Escape special characters for JSON
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
