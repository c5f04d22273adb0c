use crate::prelude::*;
use crate::core::activations::{ActivationFn, IntoActivation};
use crate::core::state::LayerState;
use crate::{rand_array, rand_array_using};
use ndarray::s;
use rand::Rng;

pub trait LayerTrait {
    fn new(num_inputs: usize, num_outputs: usize) -> Result<Self>
    where
        Self: Sized;

    fn typ(&self) -> String;
}

/// Fully connected layer: `output[o] = activation(Σ_i weights[o][i] * inputs[i] + biases[o])`.
///
/// A layer is a single-owner value. Every mutating call takes `&mut self`;
/// to evaluate in parallel, clone one layer per worker.
#[derive(Debug, Clone)]
pub struct Layer {
    num_inputs: usize,
    num_outputs: usize,
    /// shape `(num_outputs, num_inputs)`
    weights: Array2<f64>,
    biases: Array1<f64>,
    activation: ActivationFn,
    state: LayerState,
}

impl LayerTrait for Layer {
    fn new(num_inputs: usize, num_outputs: usize) -> Result<Self> {
        if num_inputs == 0 || num_outputs == 0 {
            return Err(NNError::StructuralInvariantViolation(format!(
                "layer dimensions must be greater than 0, got {}x{}",
                num_inputs, num_outputs
            )));
        }
        Ok(Self {
            num_inputs,
            num_outputs,
            weights: Array2::zeros((num_outputs, num_inputs)),
            biases: Array1::zeros(num_outputs),
            activation: ActivationFn::default(),
            state: LayerState::new(num_inputs, num_outputs),
        })
    }

    fn typ(&self) -> String {
        "Dense".into()
    }
}

impl Layer {
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Length of this layer's chromosome fragment.
    pub fn chromosome_len(&self) -> usize {
        self.num_outputs * (self.num_inputs + 1)
    }

    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    pub fn weights_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.weights.view_mut()
    }

    pub fn biases(&self) -> ArrayView1<'_, f64> {
        self.biases.view()
    }

    pub fn biases_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.biases.view_mut()
    }

    pub fn activation(&self) -> &ActivationFn {
        &self.activation
    }

    pub fn state(&self) -> &LayerState {
        &self.state
    }

    /// Replaces the activation. Names are resolved first, so an unknown name
    /// leaves the current activation in place.
    pub fn set_activation_function(&mut self, spec: impl IntoActivation) -> Result<()> {
        let resolved = spec.into_activation()?.resolve();
        self.set_resolved_activation(resolved);
        Ok(())
    }

    pub(crate) fn set_resolved_activation(&mut self, activation: ActivationFn) {
        self.activation = activation;
    }

    fn check_inputs(&self, inputs: &[f64]) -> Result<()> {
        if inputs.len() != self.num_inputs {
            return Err(NNError::DimensionMismatch {
                expected: self.num_inputs,
                actual: inputs.len(),
            });
        }
        Ok(())
    }

    pub fn calculate(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.check_inputs(inputs)?;
        Ok(self
            .weights
            .outer_iter()
            .zip(self.biases.iter())
            .map(|(row, &bias)| {
                let sum = row
                    .iter()
                    .zip(inputs)
                    .fold(0.0, |sum, (w, x)| sum + w * x);
                self.activation.call(sum + bias)
            })
            .collect())
    }

    /// Same arithmetic as `calculate`, recording inputs, per-connection
    /// products and outputs into the layer's state buffer.
    pub fn calculate_with_state(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.check_inputs(inputs)?;
        let num_inputs = self.num_inputs;
        let state = &mut self.state;
        state.inputs.copy_from_slice(inputs);

        let mut results = Vec::with_capacity(self.num_outputs);
        for (o, (row, &bias)) in self.weights.outer_iter().zip(self.biases.iter()).enumerate() {
            let synapses = &mut state.synapses[o * num_inputs..(o + 1) * num_inputs];
            let mut sum = 0.0;
            for ((slot, w), x) in synapses.iter_mut().zip(row.iter()).zip(inputs) {
                let signal = w * x;
                *slot = signal;
                sum += signal;
            }
            let result = self.activation.call(sum + bias);
            state.outputs[o] = result;
            results.push(result);
        }
        Ok(results)
    }

    pub fn randomize(&mut self) {
        self.weights = rand_array!(self.num_outputs, self.num_inputs);
        self.biases = rand_array!(self.num_outputs);
    }

    pub fn randomize_using<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.weights = rand_array_using!(rng; self.num_outputs, self.num_inputs);
        self.biases = rand_array_using!(rng; self.num_outputs);
    }

    /// Chromosome fragment: per neuron, its bias followed by its input weights.
    pub fn to_staggered_array(&self) -> Vec<f64> {
        let mut genes = Vec::with_capacity(self.chromosome_len());
        for (&bias, row) in self.biases.iter().zip(self.weights.outer_iter()) {
            genes.push(bias);
            genes.extend(row.iter().copied());
        }
        genes
    }

    pub fn from_staggered_array(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.chromosome_len() {
            return Err(NNError::DimensionMismatch {
                expected: self.chromosome_len(),
                actual: values.len(),
            });
        }
        let genes = ArrayView2::from_shape((self.num_outputs, self.num_inputs + 1), values)?;
        self.biases.assign(&genes.column(0));
        self.weights.assign(&genes.slice(s![.., 1..]));
        Ok(())
    }
}
