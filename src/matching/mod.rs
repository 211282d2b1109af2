//! Pose recovery between scanner pairs.
//!
//! Given a fixed scanner and a floating candidate that passed the coarse
//! overlap gate, [`solve_pose`] recovers the discrete rotation and
//! integer translation relating their frames by letting candidate
//! point-pair correspondences vote.

pub mod pose;

pub use pose::solve_pose;
