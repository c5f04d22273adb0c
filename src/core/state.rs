use crate::core::layers::Layer;
use std::ops::Index;

/// Values captured by the most recent `calculate_with_state` call on a layer.
///
/// The buffers are sized once from the layer's dimensions and overwritten in
/// place, so repeated capturing calls never allocate.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    pub(crate) inputs: Vec<f64>,
    /// `synapses[o * num_inputs + i] = weights[o][i] * inputs[i]`
    pub(crate) synapses: Vec<f64>,
    pub(crate) outputs: Vec<f64>,
}

impl LayerState {
    pub(crate) fn new(num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            inputs: vec![0.0; num_inputs],
            synapses: vec![0.0; num_inputs * num_outputs],
            outputs: vec![0.0; num_outputs],
        }
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn synapses(&self) -> &[f64] {
        &self.synapses
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }
}

/// Read-only view over the state buffers of every layer of a network, in
/// layer order. Borrowed, so it always reflects the latest capturing pass.
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    layers: &'a [Layer],
}

impl<'a> StateView<'a> {
    pub(crate) fn new(layers: &'a [Layer]) -> Self {
        Self { layers }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, k: usize) -> Option<&'a LayerState> {
        let layers: &'a [Layer] = self.layers;
        layers.get(k).map(Layer::state)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a LayerState> + 'a {
        let layers: &'a [Layer] = self.layers;
        layers.iter().map(Layer::state)
    }

    /// Node values of one column of the network drawing: column 0 holds the
    /// inputs seen by the first layer, column `c > 0` the outputs of layer `c - 1`.
    pub fn column(&self, c: usize) -> Option<&'a [f64]> {
        if c == 0 {
            self.get(0).map(LayerState::inputs)
        } else {
            self.get(c - 1).map(LayerState::outputs)
        }
    }
}

impl<'a> Index<usize> for StateView<'a> {
    type Output = LayerState;

    fn index(&self, k: usize) -> &LayerState {
        self.layers[k].state()
    }
}
