use crate::config::GeneratorParams;
use crate::error::Result;
use crate::geometry::{assemble, AssemblyParams, TreeGeometry};
use crate::grammar::{expand, RuleSet, SymbolString};
use crate::turtle::{interpret, Interpretation, StackWarning};
use crate::variation::SeededRandom;

/// Output of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTree {
    /// Length of the expanded symbol string
    pub symbol_count: usize,
    pub interpretation: Interpretation,
    pub geometry: TreeGeometry,
}

impl GeneratedTree {
    pub fn segment_count(&self) -> usize {
        self.interpretation.segments.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.geometry.leaves.len()
    }

    pub fn warnings(&self) -> &[StackWarning] {
        &self.interpretation.warnings
    }
}

/// Runs expansion, interpretation and assembly for one parameter set.
///
/// Each call to [`generate`](Self::generate) builds everything from scratch,
/// so independent generators can run on separate threads.
#[derive(Debug, Clone)]
pub struct TreeGenerator {
    params: GeneratorParams,
    axiom: SymbolString,
    rules: RuleSet,
}

impl TreeGenerator {
    /// Validate the parameters and parse the grammar
    pub fn new(params: GeneratorParams) -> Result<Self> {
        params.validate()?;
        let rules = RuleSet::parse(&params.rules)?;
        let axiom = SymbolString::parse(&params.axiom);
        Ok(Self {
            params,
            axiom,
            rules,
        })
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Expanded symbol string for the current parameters
    pub fn expand(&self) -> Result<SymbolString> {
        expand(&self.axiom, &self.rules, self.params.iterations, &self.params.limits())
    }

    pub fn generate(&self) -> Result<GeneratedTree> {
        self.generate_with_seed(self.params.seed)
    }

    /// Same grammar and growth settings, different variation stream
    pub fn generate_with_seed(&self, seed: u64) -> Result<GeneratedTree> {
        let symbols = self.expand()?;

        let mut rng = SeededRandom::new(seed);
        let interpretation = interpret(&symbols, &self.params.turtle_params(), &mut rng)?;

        let assembly = AssemblyParams {
            seed,
            ..self.params.assembly_params()
        };
        let geometry = assemble(&interpretation.segments, &interpretation.leaves, &assembly)?;

        tracing::info!(
            seed,
            iterations = self.params.iterations,
            symbols = symbols.len(),
            segments = interpretation.segments.len(),
            curves = geometry.curves.len(),
            leaves = geometry.leaves.len(),
            warnings = interpretation.warnings.len(),
            "generated tree"
        );

        Ok(GeneratedTree {
            symbol_count: symbols.len(),
            interpretation,
            geometry,
        })
    }

    /// Like [`generate`](Self::generate), but an unbalanced branch stack is an error
    pub fn generate_strict(&self) -> Result<GeneratedTree> {
        let tree = self.generate()?;
        tree.interpretation.ensure_balanced()?;
        Ok(tree)
    }
}
