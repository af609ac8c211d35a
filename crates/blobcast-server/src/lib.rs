#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod handler;
pub mod middleware;
pub mod service;
mod utility;

pub use crate::utility::tracing_targets;
