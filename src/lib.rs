//! partita: heading-driven section splitting for blog theme content.
//!
//! A post body arrives as one HTML blob. Authors mark its parts with headings such as
//! `要約` / `Summary` and `解説` / `Explanation`, and the theme wants those parts rendered into
//! separate page regions. [`splitter`] does the partitioning; [`helper`] and [`page`] are the
//! two call sites (render time and in-page), and [`audio`] and [`layout`] model the page glue
//! around them.
#![allow(clippy::multiple_crate_versions)]

pub mod audio;
pub mod config;
pub mod error;
pub mod fragment;
pub mod helper;
pub mod input;
pub mod keywords;
pub mod layout;
pub mod page;
pub mod section;
pub mod splitter;

pub use error::{PartitaError, Result};
pub use section::{Partition, SectionLabel};
pub use splitter::{partition, Splitter};
