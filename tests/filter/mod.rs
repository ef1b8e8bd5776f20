//! Stabilizer behavior tests
//!
//! Cold start, passthrough, convergence, profile switching and the
//! quaternion norm of filtered rotations.

pub mod profile_test;
pub mod stabilizer_test;
