use crate::prelude::*;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Built-in activations, selectable by name.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Sigmoid,
    #[default]
    Tanh,
}

impl Activation {
    pub fn forward(&self, z: f64) -> f64 {
        match self {
            Self::Sigmoid => sigmoid_forward(z),
            Self::Tanh => tanh_forward(z),
        }
    }

    /// Analytic derivative at `z`. Nothing in the forward pass calls this; it is
    /// kept for callers that want the slope of a layer's transfer function.
    pub fn derivative(&self, z: f64) -> f64 {
        match self {
            Self::Sigmoid => sigmoid_backward(z),
            Self::Tanh => tanh_backward(z),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
        }
    }

    fn as_fn(&self) -> fn(f64) -> f64 {
        match self {
            Self::Sigmoid => sigmoid_forward,
            Self::Tanh => tanh_forward,
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = NNError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sigmoid" => Ok(Self::Sigmoid),
            "tanh" => Ok(Self::Tanh),
            other => Err(NNError::UnknownActivation(other.to_string())),
        }
    }
}

fn sigmoid_forward(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn sigmoid_backward(z: f64) -> f64 {
    let s = sigmoid_forward(z);
    s * (1.0 - s)
}

fn tanh_forward(z: f64) -> f64 {
    z.tanh()
}

fn tanh_backward(z: f64) -> f64 {
    let t = z.tanh();
    1.0 - t * t
}

/// An activation as configured by the caller: one of the registry's names, or
/// any unary function. No domain or range contract is imposed on custom ones.
#[derive(Clone)]
pub enum ActivationSpec {
    Named(Activation),
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl ActivationSpec {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Turns the spec into the callable a layer stores.
    pub fn resolve(&self) -> ActivationFn {
        match self {
            Self::Named(activation) => ActivationFn {
                func: Arc::new(activation.as_fn()),
                name: Some(*activation),
            },
            Self::Custom(func) => ActivationFn {
                func: Arc::clone(func),
                name: None,
            },
        }
    }
}

impl fmt::Debug for ActivationSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Named(activation) => f.debug_tuple("Named").field(activation).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Activation> for ActivationSpec {
    fn from(activation: Activation) -> Self {
        Self::Named(activation)
    }
}

/// Anything `set_activation_function` accepts.
pub trait IntoActivation {
    fn into_activation(self) -> Result<ActivationSpec>;
}

impl IntoActivation for ActivationSpec {
    fn into_activation(self) -> Result<ActivationSpec> {
        Ok(self)
    }
}

impl IntoActivation for Activation {
    fn into_activation(self) -> Result<ActivationSpec> {
        Ok(ActivationSpec::Named(self))
    }
}

impl IntoActivation for &str {
    fn into_activation(self) -> Result<ActivationSpec> {
        Ok(ActivationSpec::Named(self.parse()?))
    }
}

impl IntoActivation for String {
    fn into_activation(self) -> Result<ActivationSpec> {
        self.as_str().into_activation()
    }
}

/// The resolved activation held by a layer.
#[derive(Clone)]
pub struct ActivationFn {
    func: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    name: Option<Activation>,
}

impl ActivationFn {
    #[inline]
    pub fn call(&self, z: f64) -> f64 {
        (self.func)(z)
    }

    /// The registry entry this was resolved from, `None` for custom functions.
    pub fn name(&self) -> Option<Activation> {
        self.name
    }
}

impl Default for ActivationFn {
    fn default() -> Self {
        ActivationSpec::Named(Activation::default()).resolve()
    }
}

impl fmt::Debug for ActivationFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name {
            Some(activation) => write!(f, "ActivationFn({})", activation),
            None => f.write_str("ActivationFn(custom)"),
        }
    }
}
