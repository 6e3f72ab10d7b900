use crate::error::{AnalyticsError, Result};
use crate::models::{FilterCriteria, Observation, ObservationTable};
use tracing::debug;

/// Rows of a table matching a [`FilterCriteria`], in table order.
///
/// Borrows the table, so any number of selections can be taken from the
/// same snapshot at once.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    criteria: FilterCriteria,
    rows: Vec<&'a Observation>,
}

impl<'a> Selection<'a> {
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn rows(&self) -> &[&'a Observation] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Filter this selection again
    pub fn refine(&self, criteria: &FilterCriteria) -> Selection<'a> {
        filter_rows(self.rows.iter().copied(), criteria)
    }

    /// Error out when there is nothing to compute over
    pub fn require_rows(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(AnalyticsError::InsufficientData(format!(
                "no observations for {}",
                self.criteria
            )));
        }
        Ok(())
    }
}

/// Rows with `year == criteria.year` at one of the selected stations.
/// An empty station set selects nothing.
pub fn filter<'a>(table: &'a ObservationTable, criteria: &FilterCriteria) -> Selection<'a> {
    let selection = filter_rows(table.iter(), criteria);
    debug!(
        criteria = %criteria,
        selected = selection.len(),
        total = table.len(),
        "filtered observations"
    );
    selection
}

fn filter_rows<'a, I>(rows: I, criteria: &FilterCriteria) -> Selection<'a>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let rows = if criteria.has_stations() {
        rows.into_iter().filter(|row| criteria.matches(row)).collect()
    } else {
        Vec::new()
    };

    Selection {
        criteria: criteria.clone(),
        rows,
    }
}
