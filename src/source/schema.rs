// src/source/schema.rs
//! Declarative per-source column layout for the kworb chart tables.
//!
//! The three chart pages share one table shape except for the title column:
//! iTunes puts the title one column earlier than YouTube/Spotify. Keeping the
//! layout as data means a fourth source is a new schema entry, not new logic.

use crate::source::types::SourceId;

/// Zero-based cell indices for one source's table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    pub title: usize,
    pub peak: usize,
    pub weeks: usize,
    /// Rows with fewer than this many cells are unusable and skipped.
    pub min_cells: usize,
}

/// Schema for a given source identity.
pub fn schema_for(source: SourceId) -> ColumnSchema {
    match source {
        SourceId::Itunes => ColumnSchema {
            title: 1,
            peak: 4,
            weeks: 5,
            min_cells: 6,
        },
        SourceId::Youtube | SourceId::Spotify => ColumnSchema {
            title: 2,
            peak: 4,
            weeks: 5,
            min_cells: 6,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itunes_title_column_differs() {
        assert_eq!(schema_for(SourceId::Itunes).title, 1);
        assert_eq!(schema_for(SourceId::Youtube).title, 2);
        assert_eq!(schema_for(SourceId::Spotify).title, 2);
    }

    #[test]
    fn peak_and_weeks_columns_shared() {
        for id in SourceId::ALL {
            let s = schema_for(id);
            assert_eq!(s.peak, 4);
            assert_eq!(s.weeks, 5);
            assert_eq!(s.min_cells, 6);
        }
    }
}
