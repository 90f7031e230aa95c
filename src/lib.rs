//! An interactive **best-fit plane** engine: tag a connectivity-bounded
//! neighborhood of mesh vertices, fit a total-least-squares plane to the
//! growing point set, orient an in-plane basis from a second pick, then
//! commit the result as drawn geometry or as a placed prototype instance.
//!
//! The crate is host-agnostic: picking, overlay drawing, document
//! mutation, and the settings dialog are consumed through the traits in
//! [`host`], which the embedder implements. Dispatch is single-threaded
//! and event-driven: every entry point on [`PlanerTool`] runs to
//! completion inside one host callback.
//!
//! # Features
//! - **f64**: use f64 as Real (default)
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod graph;
pub mod plane;
pub mod accumulator;
pub mod orientation;
pub mod config;
pub mod host;
pub mod session;
pub mod commit;
pub mod tool;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use accumulator::PlaneAccumulator;
pub use graph::VertexGraph;
pub use plane::Plane;
pub use session::{SessionRegistry, ToolSession};
pub use tool::PlanerTool;
