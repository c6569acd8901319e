//! Archipelago - a board randomizer for a hex island map
//!
//! This crate turns a fixed inventory of terrain tiles, number tokens and
//! harbors into a randomized board that honours a set of player-tunable
//! constraints:
//! - Land split into a chosen number of separate islands
//! - Bounded clusters of the same terrain and the same number
//! - The most likely numbers kept apart
//! - Harbors spread along the coasts, optionally one per island first
//!
//! # Architecture
//!
//! The generator is a pure function of (inventory, topology, settings, RNG).
//! The topology is built once; every call threads the same position array
//! through three stages: island layout, token assignment, harbor placement.
//! It can be compiled to:
//! - Native Rust for tools and servers
//! - WebAssembly for the browser
//!
//! # Modules
//!
//! - [`layout`]: Fixed board positions and hex directions
//! - [`topology`]: Adjacency graph built from position coordinates
//! - [`cluster`]: Same-category connected component checks
//! - [`islands`]: Island partition and terrain coloring
//! - [`tokens`]: Number token placement
//! - [`harbors`]: Harbor slot derivation and placement
//! - [`generator`]: The full pipeline

pub mod board;
pub mod cluster;
pub mod generator;
pub mod harbors;
pub mod inventory;
pub mod islands;
pub mod layout;
pub mod settings;
pub mod tokens;
pub mod topology;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{pips, Board, GenerationWarning, Harbor, HarborPlacement, Resource, Terrain, Tile, TokenValue};
pub use cluster::{label_clusters, largest_cluster, validate_clusters};
pub use generator::{generate_board, generate_board_with_inventory, BoardGenerator};
pub use inventory::Inventory;
pub use islands::{IslandLayout, IslandPartition};
pub use layout::{standard_positions, Direction, Position};
pub use settings::{HarborPlacementMode, Settings, SettingsError};
pub use topology::{build_adjacency, AdjacencyGraph};
