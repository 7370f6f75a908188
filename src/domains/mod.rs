//! Physics shared by the motion models.
//!
//! - Integration: semi-implicit Euler for scalar and planar coordinates
//! - Contact: Coulomb friction with an explicit Locked ⇄ Sliding regime

pub mod physics;

pub use physics::{
    semi_implicit_euler, semi_implicit_euler_2d, ContactStep, CoulombContact, FrictionRegime, FORCE_EPSILON,
};
