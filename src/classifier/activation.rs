use std::fmt::Display;

use serde::Serialize;

/// Hidden-layer activation functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Identity, // -inf to inf
    Logistic, // 0 to 1
    Tanh,     // -1 to 1
    Relu,     // 0 to inf
}

pub fn activate(val: f32, act: Activation) -> f32 {
    match act {
        Activation::Identity => val,
        Activation::Logistic => 1. / (1. + (-val).exp()),
        Activation::Tanh => val.tanh(),
        Activation::Relu => val.max(0.),
    }
}

/// Derivative expressed in terms of the already activated value.
pub fn activate_der(activated: f32, act: Activation) -> f32 {
    match act {
        Activation::Identity => 1.,
        Activation::Logistic => activated * (1. - activated),
        Activation::Tanh => 1. - activated * activated,
        Activation::Relu => {
            if activated > 0. {
                1.
            } else {
                0.
            }
        }
    }
}

impl Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Activation::Identity => "identity",
            Activation::Logistic => "logistic",
            Activation::Tanh => "tanh",
            Activation::Relu => "relu",
        };
        write!(f, "{name}")
    }
}
