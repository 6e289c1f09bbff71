use std::collections::HashSet;

use crate::application::ports::{DocumentWriteError, PaginatedDocument};
use crate::domain::{RaceGroup, RaceNumber, RaceSplit};

/// Partitions page texts into contiguous race groups.
///
/// A page whose marker differs from the current race closes the open group.
/// Pages without a marker (`None` or no match) join the open group, so the
/// label of a group is the last marker seen at or before its pages.
pub fn group_pages<I, S>(page_texts: I) -> Vec<RaceGroup>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut groups = Vec::new();
    let mut buffer: Vec<usize> = Vec::new();
    let mut current: Option<RaceNumber> = None;

    for (index, text) in page_texts.into_iter().enumerate() {
        let candidate = text.as_ref().and_then(|t| RaceNumber::extract(t.as_ref()));

        if let Some(number) = candidate {
            if current != Some(number) && !buffer.is_empty() {
                groups.push(RaceGroup::new(current, std::mem::take(&mut buffer)));
            }
            current = Some(number);
        }

        buffer.push(index);
    }

    if !buffer.is_empty() {
        groups.push(RaceGroup::new(current, buffer));
    }

    groups
}

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("failed to write {file_name}: {source}")]
    Write {
        file_name: String,
        #[source]
        source: DocumentWriteError,
    },
}

/// Splits a multi-race document into one container per race group.
#[derive(Debug, Default, Clone, Copy)]
pub struct RaceDocumentSplitter;

impl RaceDocumentSplitter {
    pub fn new() -> Self {
        Self
    }

    pub fn split(&self, document: &dyn PaginatedDocument) -> Result<Vec<RaceSplit>, SplitError> {
        let page_count = document.page_count();

        let texts = (0..page_count).map(|index| match document.page_text(index) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(page = index, error = %e, "Page text unavailable, keeping page in current race");
                None
            }
        });

        let groups = group_pages(texts);
        let extension = document.extension();
        let mut seen = HashSet::new();
        let mut splits = Vec::with_capacity(groups.len());

        for group in groups {
            let file_name = group.file_name(extension);
            if !seen.insert(file_name.clone()) {
                tracing::warn!(file_name = %file_name, "Race number reappears non-contiguously, later output replaces earlier one");
            }

            let bytes = document
                .write_pages(&group.pages)
                .map_err(|source| SplitError::Write {
                    file_name: file_name.clone(),
                    source,
                })?;

            tracing::debug!(file_name = %file_name, pages = group.pages.len(), "Race group flushed");

            splits.push(RaceSplit {
                race_number: group.race_number,
                file_name,
                pages: group.pages,
                bytes,
            });
        }

        tracing::info!(page_count, races = splits.len(), "Document split by race");

        Ok(splits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(groups: &[RaceGroup]) -> Vec<Option<u32>> {
        groups
            .iter()
            .map(|g| g.race_number.map(|n| n.get()))
            .collect()
    }

    fn some(texts: &[&str]) -> Vec<Option<String>> {
        texts.iter().map(|t| Some(t.to_string())).collect()
    }

    #[test]
    fn intro_and_stats_pages_form_two_groups() {
        let groups = group_pages(some(&["Race 1 intro", "stats", "Race 2 intro", "stats"]));

        assert_eq!(labels(&groups), vec![Some(1), Some(2)]);
        assert_eq!(groups[0].pages, vec![0, 1]);
        assert_eq!(groups[1].pages, vec![2, 3]);
    }

    #[test]
    fn repeated_marker_keeps_single_group() {
        let groups = group_pages(some(&["Race 5", "Race 5 cont.", "Race 5 cont."]));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].pages, vec![0, 1, 2]);
    }

    #[test]
    fn marker_change_on_every_page() {
        let groups = group_pages(some(&["Race 1", "Race 2", "Race 3"]));

        assert_eq!(labels(&groups), vec![Some(1), Some(2), Some(3)]);
        assert!(groups.iter().all(|g| g.pages.len() == 1));
    }

    #[test]
    fn no_pages_no_groups() {
        let groups = group_pages(Vec::<Option<String>>::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn no_markers_single_unlabelled_group() {
        let groups = group_pages(some(&["cover", "index", "notes"]));

        assert_eq!(labels(&groups), vec![None]);
        assert_eq!(groups[0].pages, vec![0, 1, 2]);
    }

    #[test]
    fn leading_unmarked_pages_form_unlabelled_group() {
        let groups = group_pages(some(&["cover", "Race 1", "Race 2"]));

        assert_eq!(labels(&groups), vec![None, Some(1), Some(2)]);
        assert_eq!(groups[0].pages, vec![0]);
        assert_eq!(groups[1].pages, vec![1]);
    }

    #[test]
    fn failed_extraction_joins_open_group() {
        let texts = vec![Some("Race 3".to_string()), None, Some("Race 4".to_string())];
        let groups = group_pages(texts);

        assert_eq!(labels(&groups), vec![Some(3), Some(4)]);
        assert_eq!(groups[0].pages, vec![0, 1]);
    }

    #[test]
    fn non_contiguous_repeat_is_not_merged() {
        let groups = group_pages(some(&["Race 1", "Race 2", "Race 1"]));
        assert_eq!(labels(&groups), vec![Some(1), Some(2), Some(1)]);
    }

    #[test]
    fn partition_preserves_page_order() {
        let texts = some(&[
            "x", "Race 2", "y", "Race 2", "Race 9", "z", "Race 1", "w", "Race 1",
        ]);
        let groups = group_pages(texts.clone());

        let flattened: Vec<usize> = groups.iter().flat_map(|g| g.pages.clone()).collect();
        assert_eq!(flattened, (0..texts.len()).collect::<Vec<_>>());
    }
}
