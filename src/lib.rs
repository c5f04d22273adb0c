//! Feed-forward network evaluator whose parameters travel as a flat
//! "staggered" chromosome, for use with an external evolutionary optimizer.
//!
//! ```
//! use perceptron::prelude::*;
//!
//! # fn main() -> perceptron::error::Result<()> {
//! let mut net = Network::new(&[2, 3, 1])?;
//! net.randomize();
//!
//! // hand the genome to an optimizer, get a candidate back
//! let mut genome = net.to_staggered_array();
//! genome[0] += 0.1;
//! net.from_staggered_array(&genome)?;
//!
//! let out = net.calculate_with_state(&[0.5, -0.5])?;
//! assert_eq!(net.state()[1].outputs(), out.as_slice());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod models;
pub mod prelude;
pub mod utils;

// Re-export types
pub use crate::core::{Activation, ActivationSpec, Layer, LayerTrait};
pub use crate::models::{Network, NetworkConfig};

pub mod plot {
    pub mod plot_network;
}
