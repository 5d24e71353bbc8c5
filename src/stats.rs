//! Per-read-group statistics collection.
//!
//! Statistics are collected on a read-group basis: each record is routed to
//! the accumulator for the read group named by its `RG` tag (see
//! [`registry::StatsRegistry`]), and each accumulator maintains the tallies
//! and distributions for exactly one read group (see
//! [`read_group::ReadGroupMetrics`]).

pub mod command;
pub mod read_group;
pub mod registry;
