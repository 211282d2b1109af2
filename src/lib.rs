//! # Scanfuse: Multi-Sensor Point-Cloud Registration
//!
//! Registers several scanners that each report integer beacon positions
//! in their own unknown, axis-rotated and translated coordinate frame,
//! with no point correspondences given. Scanfuse recovers each scanner's
//! discrete pose relative to a single reference frame, merges every
//! observation into one deduplicated global beacon set, and answers
//! inter-scanner distance queries.
//!
//! ## Approach
//!
//! - **Distance fingerprints**: pairwise squared distances are invariant
//!   under axis permutation, mirroring, and translation, so each
//!   scanner's distance multiset identifies shared geometry without
//!   knowing poses.
//! - **Coarse screening**: profile-multiset intersection cheaply rules
//!   out scanner pairs that cannot meet the shared-beacon requirement.
//! - **Vote-based pose recovery**: candidate beacon-pair correspondences
//!   each imply a (permutation, signs, translation) hypothesis; the true
//!   pose is implied by every genuinely shared pair and wins by majority.
//! - **Worklist merge**: a fixed/floating partition grows from the
//!   reference scanner until all frames are resolved.
//!
//! Only the proper axis-aligned orientations are considered (24 in 3D,
//! 4 in 2D); inputs are guaranteed to align to integer axes.
//!
//! ## Quick Start
//!
//! ```rust
//! use scanfuse::{register, Point, RegistrationConfig, Scanner};
//!
//! let reference = Scanner::new(0, vec![
//!     Point::new([10, 2]),
//!     Point::new([14, 9]),
//!     Point::new([31, 17]),
//!     Point::new([70, -40]),
//! ]);
//! // Same three beacons as the reference plus one of its own.
//! let other = Scanner::new(1, vec![
//!     Point::new([10, 2]),
//!     Point::new([14, 9]),
//!     Point::new([31, 17]),
//!     Point::new([-55, 80]),
//! ]);
//!
//! let registration = register(vec![reference, other], RegistrationConfig::reduced_2d())?;
//! assert_eq!(registration.beacon_count(), 5);
//! assert_eq!(registration.max_scanner_distance(), 0);
//! # Ok::<(), scanfuse::RegistrationError>(())
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! scanner blocks ──io::parse_scanners──► Scanner (profile + pair index)
//!                                            │
//!                        profile::coarse_overlap gate
//!                                            │
//!                                matching::solve_pose (voting)
//!                                            │
//!                             merge::FrameMerger (fixed/floating)
//!                                            │
//!                          Registration (beacon set + offsets)
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod matching;
pub mod merge;
pub mod profile;
pub mod scanner;

pub use self::config::RegistrationConfig;
pub use self::core::{Point, Transform};
pub use self::error::{RegistrationError, Result};
pub use self::io::parse_scanners;
pub use self::matching::solve_pose;
pub use self::merge::{register, FrameMerger, Registration};
pub use self::scanner::{FixedScanner, Scanner, ScannerId};
