pub use serde::{Serialize, Deserialize};

pub use ndarray::*;
pub use ndarray_rand::RandomExt;
pub use ndarray_rand::rand_distr::Uniform;

pub use crate::models::{Network, NetworkBuilder, NetworkConfig};
pub use crate::error::*;

// Internal re-exports
pub use crate::core::{
    Activation,
    ActivationFn,
    ActivationSpec,
    IntoActivation,
    Layer,
    LayerState,
    LayerTrait,
    StateView,
};
