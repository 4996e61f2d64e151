// SPDX-License-Identifier: MPL-2.0

//! Cascading (hierarchical) selection engine.
//!
//! A cascade is an ordered chain of dependent select widgets: picking a
//! value at level N determines the option set of level N+1, recursively,
//! so a user can walk a tree (region → province → city) without the whole
//! tree being loaded upfront. [`CascadeChain`] owns the chain and drives
//! it; records arrive through a [`DataSource`] (an in-memory collection or
//! a remote JSON endpoint) and are filtered and memoized per parent key,
//! so navigating back into an already-expanded branch never refetches.
//!
//! Rendering toolkits plug in by implementing [`SelectWidget`] for their
//! option widgets; [`MemorySelect`] is a ready-made in-memory
//! implementation for tests and headless use. Fetch errors never surface
//! into the cascade: a failed level renders as default-only and the failure
//! goes to the `tracing` log channel.
//!
//! # Example
//!
//! ```no_run
//! use cascade_select::{CascadeChain, CascadeConfig, MemorySelect, Record};
//!
//! # async fn demo() {
//! let data: Vec<Record> = serde_json::from_str(
//!     r#"[{"Value":"1","ParentID":"0","Text":"Asia"},
//!         {"Value":"2","ParentID":"1","Text":"Japan"}]"#,
//! )
//! .unwrap();
//!
//! let config = CascadeConfig {
//!     data,
//!     ..CascadeConfig::default()
//! };
//! let mut chain = CascadeChain::new(vec![MemorySelect::new(); 2], config)
//!     .unwrap()
//!     .on_selected(|level, _widget| println!("level {level} changed"));
//! chain.initialize().await;
//!
//! chain.set_values(&["1"], true).await;
//! assert_eq!(chain.values(), vec!["1", "0"]);
//! # }
//! ```

mod cache;
mod chain;
mod config;
mod filter;
mod present;
mod record;
mod select;
mod source;

pub use cache::ChildCache;
pub use chain::{CascadeChain, SelectedHook};
pub use config::{CascadeConfig, DefaultOption};
pub use filter::children_of;
pub use present::render;
pub use record::Record;
pub use select::{MemorySelect, SelectWidget};
pub use source::{CascadeSource, DataSource, RemoteSource, SourceError, StaticSource};
