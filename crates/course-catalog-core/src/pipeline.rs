// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Derived view pipeline
//
// Pure transformations from the raw course list and the current
// filter state to the list that is rendered. Nothing here touches storage.

use crate::types::{Course, CourseList, ViewFilterState, ALL_INSTRUCTORS};

/// Minimum title word count for the long-title filter
pub const LONG_TITLE_MIN_WORDS: usize = 5;

/// Number of whitespace-delimited tokens in `title`.
///
/// A blank title counts as one (empty) word.
pub fn word_count(title: &str) -> usize {
    title.split_whitespace().count().max(1)
}

/// Apply instructor, long-title and search filters, then sort by title word count.
///
/// Filters run in that fixed order. The sort is stable, so courses with the
/// same word count keep their post-filter relative order.
pub fn project(courses: &[Course], filters: &ViewFilterState) -> CourseList {
    let search = filters.search_term.trim().to_lowercase();

    let mut data: Vec<(usize, &Course)> = courses
        .iter()
        .filter(|c| matches_instructor(c, &filters.selected_instructor))
        .map(|c| (word_count(&c.title), c))
        .filter(|(words, _)| !filters.show_long_titles_only || *words >= LONG_TITLE_MIN_WORDS)
        .filter(|(_, c)| search.is_empty() || c.title.to_lowercase().contains(&search))
        .collect();

    if filters.sort_ascending_by_word_count {
        data.sort_by(|(a, _), (b, _)| a.cmp(b));
    } else {
        data.sort_by(|(a, _), (b, _)| b.cmp(a));
    }

    data.into_iter().map(|(_, c)| c.clone()).collect()
}

fn matches_instructor(course: &Course, selected: &str) -> bool {
    selected == ALL_INSTRUCTORS || course.user_id.to_string() == selected
}

/// `"All"` followed by each distinct instructor id in first-seen order
pub fn instructors(courses: &[Course]) -> Vec<String> {
    let mut seen: Vec<u64> = Vec::new();
    for course in courses {
        if !seen.contains(&course.user_id) {
            seen.push(course.user_id);
        }
    }

    std::iter::once(ALL_INSTRUCTORS.to_string())
        .chain(seen.into_iter().map(|id| id.to_string()))
        .collect()
}

/// Display label for an instructor choice
pub fn instructor_label(choice: &str) -> String {
    if choice == ALL_INSTRUCTORS {
        "All Instructors".to_string()
    } else {
        format!("Instructor {}", choice)
    }
}
