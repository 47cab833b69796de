//! Resolve which coincident event a report describes.

use tracing::{debug, info};

use crate::domain::{ColumnTable, EventQuery, SelectedEvent, SortOrder};
use crate::error::{ReportError, ReportResult};

/// Picks the target row of the coincidence table.
pub struct EventSelector<'a> {
    coinc: &'a ColumnTable,
}

impl<'a> EventSelector<'a> {
    #[must_use]
    pub fn new(coinc: &'a ColumnTable) -> Self {
        Self { coinc }
    }

    /// Resolve `query` to a row index with its default title and caption.
    ///
    /// Id queries are passed through without bounds checks; later lookups
    /// report an out-of-range index.
    pub fn select(&self, query: EventQuery) -> ReportResult<SelectedEvent> {
        let index = match &query {
            EventQuery::Rank {
                rank,
                sort_key,
                order,
            } => {
                let ranked = self.ranked_indices(sort_key, *order)?;
                let len = ranked.len();
                let index = *ranked.get(*rank).ok_or(ReportError::OutOfRange {
                    what: "rank",
                    index: *rank,
                    len,
                })?;
                info!(rank = *rank, index, sort_key = %sort_key, order = %order, "Selected event by rank");
                index
            }
            EventQuery::Id { index } => {
                info!(index = *index, "Selected event by id");
                *index
            }
        };

        let title = query.default_title();
        Ok(SelectedEvent {
            index,
            caption: title.clone(),
            title,
            query,
        })
    }

    /// Row indices ordered by `sort_key`.
    ///
    /// The sort is stable in both directions: equal keys keep their
    /// original index order.
    pub fn ranked_indices(&self, sort_key: &str, order: SortOrder) -> ReportResult<Vec<usize>> {
        let values = self.coinc.column(sort_key)?;
        let mut indices: Vec<usize> = (0..values.len()).collect();
        match order {
            SortOrder::Ascending => indices.sort_by(|&a, &b| values[a].total_cmp(&values[b])),
            SortOrder::Descending => indices.sort_by(|&a, &b| values[b].total_cmp(&values[a])),
        }
        debug!(sort_key, events = indices.len(), "Ranked coincident events");
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coinc() -> ColumnTable {
        ColumnTable::new("coinc").with_column("ifar", vec![3.0, 10.0, 1.0, 10.0, 5.0])
    }

    fn rank(k: usize, order: SortOrder) -> EventQuery {
        EventQuery::Rank {
            rank: k,
            sort_key: "ifar".into(),
            order,
        }
    }

    #[test]
    fn loudest_event_descending() {
        let table = coinc();
        let selected = EventSelector::new(&table)
            .select(rank(0, SortOrder::Descending))
            .unwrap();
        assert_eq!(selected.index, 1);
        assert_eq!(selected.title, "Parameters of event ranked 1");
        assert_eq!(selected.caption, selected.title);
    }

    #[test]
    fn ties_keep_original_order() {
        let table = coinc();
        let ranked = EventSelector::new(&table)
            .ranked_indices("ifar", SortOrder::Descending)
            .unwrap();
        assert_eq!(ranked, vec![1, 3, 4, 0, 2]);
    }

    #[test]
    fn ascending_order() {
        let table = coinc();
        let ranked = EventSelector::new(&table)
            .ranked_indices("ifar", SortOrder::Ascending)
            .unwrap();
        assert_eq!(ranked, vec![2, 0, 4, 1, 3]);
    }

    #[test]
    fn rank_out_of_range() {
        let table = coinc();
        let err = EventSelector::new(&table)
            .select(rank(5, SortOrder::Descending))
            .unwrap_err();
        assert_eq!(
            err,
            ReportError::OutOfRange {
                what: "rank",
                index: 5,
                len: 5,
            }
        );
    }

    #[test]
    fn missing_sort_key() {
        let table = coinc();
        let err = EventSelector::new(&table)
            .select(EventQuery::Rank {
                rank: 0,
                sort_key: "stat".into(),
                order: SortOrder::Descending,
            })
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingField { field, .. } if field == "stat"));
    }

    #[test]
    fn id_is_used_verbatim() {
        let table = coinc();
        let selected = EventSelector::new(&table)
            .select(EventQuery::Id { index: 42 })
            .unwrap();
        assert_eq!(selected.index, 42);
        assert_eq!(selected.title, "Details of trigger");
    }
}
