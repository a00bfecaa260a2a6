use async_trait::async_trait;

use crate::error::FetchError;
use crate::records::{normalize, ExpenseRecord, RawPage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    /// Main expense list.
    Primary,
    /// Card expenses; optional, its failure is tolerated.
    Secondary,
    /// Static payload bundled with the app, used when the API is down.
    Fallback,
}

/// Where the records of a [`LoadOutcome`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Fallback,
    Unavailable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadOutcome {
    pub records: Vec<ExpenseRecord>,
    pub origin: Origin,
}

#[async_trait(?Send)]
pub trait ExpenseSource {
    async fn fetch(&self, source: DataSource) -> Result<RawPage, FetchError>;
}

/// Fetches and normalizes every available expense. Never fails: the worst
/// case is an empty list with [`Origin::Unavailable`].
pub async fn load_expenses<S>(source: &S) -> LoadOutcome
where
    S: ExpenseSource + ?Sized,
{
    let (primary, secondary) = futures::join!(
        source.fetch(DataSource::Primary),
        source.fetch(DataSource::Secondary)
    );

    match primary {
        Ok(page) => {
            let mut records = normalize(&page);
            match secondary {
                Ok(page) => records.extend(normalize(&page)),
                Err(e) => log::warn!("Card expenses unavailable, skipping: {}", e),
            }
            log::info!("Loaded {} expenses", records.len());
            LoadOutcome {
                records,
                origin: Origin::Remote,
            }
        }
        Err(e) => {
            log::error!("Error fetching expenses: {}", e);
            load_fallback(source).await
        }
    }
}

async fn load_fallback<S>(source: &S) -> LoadOutcome
where
    S: ExpenseSource + ?Sized,
{
    match source.fetch(DataSource::Fallback).await {
        Ok(page) => {
            let records = normalize(&page);
            log::info!("Loaded {} expenses from fallback data", records.len());
            LoadOutcome {
                records,
                origin: Origin::Fallback,
            }
        }
        Err(e) => {
            log::error!("Error loading fallback data: {}", e);
            LoadOutcome {
                records: Vec::new(),
                origin: Origin::Unavailable,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct FakeSource {
        pages: HashMap<&'static str, Result<RawPage, FetchError>>,
        requested: RefCell<Vec<DataSource>>,
    }

    fn key(source: DataSource) -> &'static str {
        match source {
            DataSource::Primary => "primary",
            DataSource::Secondary => "secondary",
            DataSource::Fallback => "fallback",
        }
    }

    impl FakeSource {
        fn with(mut self, source: DataSource, page: Result<RawPage, FetchError>) -> Self {
            self.pages.insert(key(source), page);
            self
        }
    }

    #[async_trait(?Send)]
    impl ExpenseSource for FakeSource {
        async fn fetch(&self, source: DataSource) -> Result<RawPage, FetchError> {
            self.requested.borrow_mut().push(source);
            self.pages
                .get(key(source))
                .cloned()
                .unwrap_or(Err(FetchError::Transport("unreachable".to_string())))
        }
    }

    fn page(names: &[&str]) -> RawPage {
        RawPage {
            results: names
                .iter()
                .map(|name| {
                    json!({
                        "properties": {
                            "Expense": { "title": [ { "text": { "content": name } } ] },
                            "Amount": { "number": 1 }
                        }
                    })
                })
                .collect(),
        }
    }

    fn names(outcome: &LoadOutcome) -> Vec<&str> {
        outcome.records.iter().map(|r| r.expense.as_str()).collect()
    }

    #[test]
    fn test_sources_are_concatenated_primary_first() {
        let source = FakeSource::default()
            .with(DataSource::Primary, Ok(page(&["Rent", "Bus"])))
            .with(DataSource::Secondary, Ok(page(&["Laptop"])));

        let outcome = block_on(load_expenses(&source));

        assert_eq!(outcome.origin, Origin::Remote);
        assert_eq!(names(&outcome), vec!["Rent", "Bus", "Laptop"]);
        assert!(!source.requested.borrow().contains(&DataSource::Fallback));
    }

    #[test]
    fn test_duplicates_across_sources_are_kept() {
        let source = FakeSource::default()
            .with(DataSource::Primary, Ok(page(&["Bus"])))
            .with(DataSource::Secondary, Ok(page(&["Bus"])));

        let outcome = block_on(load_expenses(&source));

        assert_eq!(names(&outcome), vec!["Bus", "Bus"]);
    }

    #[test]
    fn test_secondary_failure_yields_primary_records() {
        let source = FakeSource::default()
            .with(DataSource::Primary, Ok(page(&["Rent", "Bus"])))
            .with(
                DataSource::Secondary,
                Err(FetchError::Decode("bad json".to_string())),
            );

        let outcome = block_on(load_expenses(&source));

        assert_eq!(outcome.origin, Origin::Remote);
        assert_eq!(names(&outcome), vec!["Rent", "Bus"]);
    }

    #[test]
    fn test_primary_failure_uses_fallback() {
        let source = FakeSource::default()
            .with(DataSource::Primary, Err(FetchError::Status(500)))
            .with(DataSource::Secondary, Ok(page(&["Laptop"])))
            .with(DataSource::Fallback, Ok(page(&["Cached"])));

        let outcome = block_on(load_expenses(&source));

        assert_eq!(outcome.origin, Origin::Fallback);
        assert_eq!(names(&outcome), vec!["Cached"]);
    }

    #[test]
    fn test_everything_failing_yields_empty() {
        let source = FakeSource::default();

        let outcome = block_on(load_expenses(&source));

        assert_eq!(outcome.origin, Origin::Unavailable);
        assert!(outcome.records.is_empty());
        assert_eq!(
            source
                .requested
                .borrow()
                .iter()
                .filter(|s| **s == DataSource::Fallback)
                .count(),
            1
        );
    }
}
