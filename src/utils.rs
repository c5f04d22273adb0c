#[allow(unused)]
use crate::prelude::*;

// Uniform draws over [-1, 1) for freshly randomized parameters.

#[macro_export]
macro_rules! rand_array {
    ($($x:expr),*) => {
        {
            Array::random(($($x),*), Uniform::new(-1.0f64, 1.0f64))
        }
    };
}

#[macro_export]
macro_rules! rand_array_using {
    ($rng:expr; $($x:expr),*) => {
        {
            Array::random_using(($($x),*), Uniform::new(-1.0f64, 1.0f64), $rng)
        }
    };
}
