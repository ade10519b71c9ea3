//! # layerpath core
//!
//! Core types for layerpath: points, contour rings, open polylines and the
//! geometry measurements shared by every stage of the toolpath pipeline.

pub mod contour;
pub mod error;
pub mod geometry;

pub use contour::{Contour, Polyline};
pub use error::{Error, GeometryError, Result};
pub use geometry::{arc_length, interpolate, nearest_index, Point};
