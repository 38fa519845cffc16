//! Data layer: core types, loading, normalization, merging and selection.
//!
//! Architecture:
//! ```text
//!  panel .xlsx / .csv / .json / .parquet      industry table (optional)
//!        │   (or built-in sample)                   │
//!        ▼                                          ▼
//!   ┌──────────┐                              ┌──────────┐
//!   │  loader   │  first existing candidate   │  loader   │
//!   └──────────┘                              └──────────┘
//!        │                                          │
//!        ▼                                          ▼
//!   ┌───────────┐                             ┌───────────┐
//!   │ normalize │  6-digit codes              │ normalize │  codes, 年度 → 年份
//!   └───────────┘                             └───────────┘
//!        │                                          │
//!        ▼                                          │
//!   ┌──────────┐                                    │
//!   │  schema   │  header → role                    │
//!   └──────────┘                                    │
//!        │                                          │
//!        ▼                                          │
//!   ┌──────────┐                                    │
//!   │  merge    │◀───────────────────────────────────┘  left join on (code, year)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  (code, year selector) → row indices
//!   └──────────┘
//!        │
//!        ▼
//!   query / export   (read-only views for the UI, CSV download)
//! ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod sample;
pub mod schema;
