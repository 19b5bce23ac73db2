//! Exportar: CoreML export sweeps for YOLO11 checkpoints
//!
//! Drives the external Ultralytics `yolo` converter over the cross-product
//! of model sizes and task variants, then archives each resulting
//! `.mlpackage` into the `<id>.mlpackage.zip` form release tooling
//! expects. The sweep is sequential and fail-fast; the converter is an
//! opaque collaborator behind the [`bridge::Converter`] trait.
//!
//! # Example
//!
//! ```ignore
//! use exportar::bridge::YoloCli;
//! use exportar::config::SweepSpec;
//! use exportar::sweep;
//!
//! let jobs = sweep::plan(&SweepSpec::default());
//! let records = sweep::run(&YoloCli::new(), Path::new("."), &jobs)?;
//! ```

pub mod archive;
pub mod bridge;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod sweep;

pub use error::{Error, Result};
