//! Integration tests for Network composition.
//!
//! Covers:
//! - Width validation at construction
//! - Sequential composition and error propagation
//! - State capture across layers
//! - Activation broadcast

use approx::assert_relative_eq;
use perceptron::prelude::*;

#[test]
fn test_invalid_topologies() {
    for sizes in [&[][..], &[3][..], &[2, 0, 1][..], &[0, 1][..]] {
        assert!(
            matches!(Network::new(sizes), Err(NNError::StructuralInvariantViolation(_))),
            "{:?} should be rejected",
            sizes
        );
    }
}

#[test]
fn test_adjacent_widths_chain() -> Result<()> {
    let net = Network::new(&[5, 4, 3, 2])?;
    assert_eq!(net.num_layers(), 3);
    for pair in net.layers().windows(2) {
        assert_eq!(pair[0].num_outputs(), pair[1].num_inputs());
    }
    assert_eq!(net.layer(0).map(Layer::num_inputs), Some(5));
    assert!(net.layer(3).is_none());
    Ok(())
}

#[test]
fn test_composition_example() -> Result<()> {
    let mut net = Network::new(&[2, 2, 1])?;
    // every weight 1, every bias 0
    let chromosome: Vec<f64> = net
        .to_staggered_array()
        .iter()
        .enumerate()
        .map(|(i, _)| if i % 3 == 0 { 0.0 } else { 1.0 })
        .collect();
    net.from_staggered_array(&chromosome)?;

    let out = net.calculate(&[1.0, 1.0])?;
    let hidden = 2.0f64.tanh();
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0], (2.0 * hidden).tanh());
    assert_relative_eq!(out[0], 0.9586, epsilon = 1e-4);
    Ok(())
}

#[test]
fn test_calculate_matches_layer_by_layer() -> Result<()> {
    let mut net = Network::new(&[3, 5, 4, 2])?;
    net.randomize();
    net.set_activation_function(Activation::Sigmoid)?;

    let x = [0.2, -0.4, 0.9];
    let mut expected = x.to_vec();
    for layer in net.layers() {
        expected = layer.calculate(&expected)?;
    }
    assert_eq!(net.calculate(&x)?, expected);
    Ok(())
}

#[test]
fn test_calculate_is_deterministic() -> Result<()> {
    let mut net = Network::new(&[4, 6, 3])?;
    net.randomize();
    let x = [0.1, 0.2, -0.3, 0.4];
    assert_eq!(net.calculate(&x)?, net.calculate(&x)?);
    Ok(())
}

#[test]
fn test_dimension_error_propagates() {
    let net = Network::new(&[3, 2, 1]).unwrap();
    assert!(matches!(
        net.calculate(&[1.0]),
        Err(NNError::DimensionMismatch { expected: 3, actual: 1 })
    ));
}

#[test]
fn test_calculate_with_state() -> Result<()> {
    let mut net = Network::new(&[2, 3, 2])?;
    net.randomize();

    let x = [0.7, -0.1];
    let out = net.calculate_with_state(&x)?;
    assert_eq!(out, net.calculate(&x)?);

    let state = net.state();
    assert_eq!(state.len(), 2);
    assert_eq!(state[0].inputs(), &x);
    assert_eq!(state[0].outputs(), state[1].inputs());
    assert_eq!(state[1].outputs(), out.as_slice());

    assert_eq!(state.column(0), Some(&x[..]));
    assert_eq!(state.column(2), Some(out.as_slice()));
    Ok(())
}

#[test]
fn test_state_tracks_latest_pass() -> Result<()> {
    let mut net = Network::new(&[1, 2, 1])?;
    net.randomize();

    net.calculate_with_state(&[0.5])?;
    let latest = net.calculate_with_state(&[-0.5])?;
    assert_eq!(net.state()[0].inputs(), &[-0.5]);
    assert_eq!(net.state()[1].outputs(), latest.as_slice());

    // plain passes do not touch the buffers
    net.calculate(&[0.25])?;
    assert_eq!(net.state()[0].inputs(), &[-0.5]);
    Ok(())
}

#[test]
fn test_activation_broadcast() -> Result<()> {
    let mut net = Network::new(&[2, 2, 2])?;
    net.set_activation_function("sigmoid")?;
    assert!(net
        .layers()
        .iter()
        .all(|l| l.activation().name() == Some(Activation::Sigmoid)));

    // zero parameters: sigmoid(0) at every neuron
    assert_eq!(net.calculate(&[3.0, -3.0])?, vec![0.5, 0.5]);

    assert!(matches!(
        net.set_activation_function("relu"),
        Err(NNError::UnknownActivation(_))
    ));
    assert_eq!(net.calculate(&[3.0, -3.0])?, vec![0.5, 0.5]);
    Ok(())
}

#[test]
fn test_per_layer_override() -> Result<()> {
    let mut net = Network::new(&[1, 1, 1])?;
    net.from_staggered_array(&[0.0, 1.0, 0.0, 1.0])?;
    if let Some(layer) = net.layer_mut(1) {
        layer.set_activation_function(ActivationSpec::custom(|z| z * 2.0))?;
    }
    assert_relative_eq!(net.calculate(&[0.5])?[0], 2.0 * 0.5f64.tanh());
    Ok(())
}

#[test]
fn test_randomize_covers_every_layer() {
    let mut net = Network::new(&[3, 4, 2]).unwrap();
    net.randomize();
    for layer in net.layers() {
        assert!(layer.to_staggered_array().iter().any(|&g| g != 0.0));
    }
}
