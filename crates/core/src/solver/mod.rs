//! Diffusion solver for the thermal grid

mod diffusion;

pub use diffusion::{max_stable_timestep, step_diffusion, STABILITY_LIMIT};
