/// Data layer: dataset lookup, loading, caching and typed access.
///
/// Architecture:
/// ```text
///   dataset key
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  hit → Arc<Table>
///   └──────────┘
///        │ miss
///        ▼
///   ┌──────────┐
///   │ locator   │  search dirs × candidate files → path
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  .parquet / .csv → Table, match_date → datetime
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ records   │  Table → MatchOverview / ClubMatchKpis / Club
///   └──────────┘
///        │
///        ▼
///   filter (matchday pages) · matchup (match analysis)
/// ```

pub mod cache;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod ids;
pub mod loader;
pub mod locator;
pub mod matchup;
pub mod model;
pub mod records;
