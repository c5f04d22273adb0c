use crate::prelude::*;
use log::{debug, trace};
use rand::Rng;
use std::fmt;

/// Feed-forward network: layers chained so that each layer's output width is
/// the next layer's input width.
///
/// Like `Layer`, a network is a single-owner value; concurrent evaluation
/// needs one clone per worker.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
}

/// Serializable description of a network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Widths including the input width, e.g. `[2, 3, 1]`.
    pub layer_sizes: Vec<usize>,
    #[serde(default)]
    pub activation: Activation,
    /// Draw initial parameters instead of starting from zeros.
    #[serde(default)]
    pub randomize: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            layer_sizes: vec![2, 2, 1],
            activation: Activation::Tanh,
            randomize: false,
        }
    }
}

impl Network {
    pub fn new(layer_sizes: &[usize]) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(NNError::StructuralInvariantViolation(format!(
                "a network needs at least an input and an output width, got {:?}",
                layer_sizes
            )));
        }
        if layer_sizes.contains(&0) {
            return Err(NNError::StructuralInvariantViolation(format!(
                "layer widths must be greater than 0, got {:?}",
                layer_sizes
            )));
        }
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;
        debug!("built network {:?}", layer_sizes);
        Ok(Self { layers })
    }

    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        let mut network = Self::new(&config.layer_sizes)?;
        network.set_activation_function(config.activation)?;
        if config.randomize {
            network.randomize();
        }
        Ok(network)
    }

    pub fn num_inputs(&self) -> usize {
        self.layers[0].num_inputs()
    }

    pub fn num_outputs(&self) -> usize {
        self.layers[self.layers.len() - 1].num_outputs()
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Widths of every column, input width first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.num_inputs())
            .chain(self.layers.iter().map(Layer::num_outputs))
            .collect()
    }

    /// Total chromosome length, `Σ num_outputs * (num_inputs + 1)`.
    pub fn chromosome_len(&self) -> usize {
        self.layers.iter().map(Layer::chromosome_len).sum()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, k: usize) -> Option<&Layer> {
        self.layers.get(k)
    }

    pub fn layer_mut(&mut self, k: usize) -> Option<&mut Layer> {
        self.layers.get_mut(k)
    }

    /// State captured by the latest `calculate_with_state`, one entry per layer.
    pub fn state(&self) -> StateView<'_> {
        StateView::new(&self.layers)
    }

    /// Sets the same activation on every layer. Nothing changes if the spec
    /// does not resolve.
    pub fn set_activation_function(&mut self, spec: impl IntoActivation) -> Result<()> {
        let resolved = spec.into_activation()?.resolve();
        debug!("setting activation {:?} on {} layers", resolved, self.layers.len());
        for layer in self.layers.iter_mut() {
            layer.set_resolved_activation(resolved.clone());
        }
        Ok(())
    }

    pub fn calculate(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.layers
            .iter()
            .try_fold(inputs.to_vec(), |cache, layer| layer.calculate(&cache))
    }

    /// Like `calculate`, leaving every layer's state buffer holding this pass.
    pub fn calculate_with_state(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.layers
            .iter_mut()
            .try_fold(inputs.to_vec(), |cache, layer| layer.calculate_with_state(&cache))
    }

    pub fn randomize(&mut self) {
        debug!("randomizing {} parameters", self.chromosome_len());
        for layer in self.layers.iter_mut() {
            layer.randomize();
        }
    }

    pub fn randomize_using<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in self.layers.iter_mut() {
            layer.randomize_using(rng);
        }
    }

    /// Concatenation of every layer's fragment, input layer first.
    pub fn to_staggered_array(&self) -> Vec<f64> {
        let mut chromosome = Vec::with_capacity(self.chromosome_len());
        for layer in self.layers.iter() {
            chromosome.extend(layer.to_staggered_array());
        }
        chromosome
    }

    /// Loads a chromosome produced by `to_staggered_array` (or an optimizer
    /// working on that format). The length is checked up front, so a rejected
    /// chromosome leaves every layer untouched.
    pub fn from_staggered_array(&mut self, chromosome: &[f64]) -> Result<()> {
        let expected = self.chromosome_len();
        if chromosome.len() != expected {
            return Err(NNError::DimensionMismatch {
                expected,
                actual: chromosome.len(),
            });
        }
        trace!("loading chromosome of {} genes", expected);
        let mut i = 0;
        for layer in self.layers.iter_mut() {
            let num_genes = layer.chromosome_len();
            layer.from_staggered_array(&chromosome[i..i + num_genes])?;
            i += num_genes;
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        let mut total_param = 0;
        let mut res = "\nModel Network\n".to_string();
        res.push_str("-------------------------------------------------------------\n");
        res.push_str("Layer (Type)\t\t Output shape\t\t No.of params\n");
        for layer in self.layers.iter() {
            let params = layer.chromosome_len();
            total_param += params;
            res.push_str(&format!(
                "{}\t\t\t  (None, {})\t\t  {}\n",
                layer.typ(),
                layer.num_outputs(),
                params
            ));
        }
        res.push_str("-------------------------------------------------------------\n");
        res.push_str(&format!("Total params: {}\n", total_param));
        res
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Fluent construction, e.g.
/// `Network::builder().input(2).add_dense(3).add_dense(1).activation(Activation::Sigmoid).build()`.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    input: Option<usize>,
    layer_sizes: Vec<usize>,
    activation: Option<ActivationSpec>,
    randomize: bool,
}

impl NetworkBuilder {
    /// Sets the input width; a later call replaces an earlier one.
    pub fn input(mut self, num_inputs: usize) -> Self {
        self.input = Some(num_inputs);
        self
    }

    pub fn add_dense(mut self, num_outputs: usize) -> Self {
        self.layer_sizes.push(num_outputs);
        self
    }

    pub fn activation(mut self, spec: impl Into<ActivationSpec>) -> Self {
        self.activation = Some(spec.into());
        self
    }

    pub fn randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub fn build(self) -> Result<Network> {
        let num_inputs = self.input.ok_or_else(|| {
            NNError::StructuralInvariantViolation("no input width set on the builder".to_string())
        })?;
        let layer_sizes: Vec<usize> = std::iter::once(num_inputs).chain(self.layer_sizes).collect();
        let mut network = Network::new(&layer_sizes)?;
        if let Some(spec) = self.activation {
            network.set_activation_function(spec)?;
        }
        if self.randomize {
            network.randomize();
        }
        Ok(network)
    }
}
