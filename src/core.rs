// src/core.rs
pub mod activations;
pub mod layers;
pub mod state;

// Re-export commonly used items
pub use activations::{Activation, ActivationFn, ActivationSpec, IntoActivation};
pub use layers::{Layer, LayerTrait};
pub use state::{LayerState, StateView};
