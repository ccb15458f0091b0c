//! Damage composition.
//!
//! This module provides the damage event value and the pure fold that turns
//! several independent multiplier contributions into one scalar.
//!
//! # Architecture
//!
//! - **Pure Functions**: The fold is side-effect free
//! - **Used by the runtime pipeline**: it gathers contributions from active
//!   modifiers and hands them here
//! - **Multiplicative**: contributions compose by product, never by sum or max

pub mod damage;

pub use damage::{DamageEvent, compose_multipliers, is_valid_multiplier};
