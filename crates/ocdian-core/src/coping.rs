//! Coping-strategy lookup.
//!
//! A fixed, ordered table maps obsession categories to strategy lists.
//! Matching is a case-insensitive substring test of each category label
//! against the input, and the first category in table order wins.

/// Ordered `(category, strategies)` table. Order decides which category
/// wins when several labels appear in one text.
pub const COPING_STRATEGIES: &[(&str, &[&str])] = &[
    (
        "Fear of contamination",
        &[
            "Delay hand-washing by 5 minutes and notice the urge rise and fall",
            "Touch a 'contaminated' object and resist cleaning afterwards",
            "Remind yourself: the feeling of dirtiness is anxiety, not danger",
        ],
    ),
    (
        "Checking",
        &[
            "Check once, say out loud what you saw, then walk away",
            "Write down that you checked instead of checking again",
            "Tolerate the doubt: 'Maybe it is, maybe it isn't'",
        ],
    ),
    (
        "Intrusive thoughts",
        &[
            "Label it: 'This is an intrusive thought, not a wish'",
            "Let the thought stay without arguing with it",
            "Return attention to what you were doing",
        ],
    ),
    (
        "Symmetry",
        &[
            "Leave one item slightly out of place and sit with the discomfort",
            "Set a timer and stop arranging when it ends",
            "Notice the 'not just right' feeling and name it",
        ],
    ),
    (
        "Counting",
        &[
            "Deliberately stop on an 'unsafe' number",
            "Redirect counting into slow breathing",
            "Accept the uncertainty of not finishing the count",
        ],
    ),
    (
        "Reassurance",
        &[
            "Postpone asking for reassurance by 15 minutes",
            "Answer your own question once, then let it go",
            "Tell a trusted person you are practicing not asking",
        ],
    ),
    (
        "Harm",
        &[
            "Remember that having a thought is not the same as acting on it",
            "Keep the feared object nearby instead of avoiding it",
            "Practice self-compassion: the thought distresses you because it conflicts with your values",
        ],
    ),
];

/// Static tips shown regardless of what the user wrote.
pub const GENERAL_TIPS: &[&str] = &[
    "Deep Breathing Exercise: Inhale for 4 seconds, hold for 4 seconds, exhale for 4 seconds.",
    "Mindfulness Tip: Focus on the present moment and observe your surroundings without judgment.",
    "Reassuring Message: You're in control. Anxiety will pass, and you are stronger than your fears.",
];

/// Strategies for the first category whose label occurs in `text`, or an
/// empty list when none does.
pub fn match_strategies(text: &str) -> Vec<&'static str> {
    match_category(text)
        .map(|(_, strategies)| strategies.to_vec())
        .unwrap_or_default()
}

/// The winning `(category, strategies)` row for `text`, if any.
pub fn match_category(text: &str) -> Option<(&'static str, &'static [&'static str])> {
    let haystack = text.to_lowercase();
    COPING_STRATEGIES
        .iter()
        .find(|(category, _)| haystack.contains(&category.to_lowercase()))
        .copied()
}

/// Category labels in table order.
pub fn categories() -> impl Iterator<Item = &'static str> {
    COPING_STRATEGIES.iter().map(|(category, _)| *category)
}

pub fn general_tips() -> &'static [&'static str] {
    GENERAL_TIPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_category_inside_sentence() {
        let strategies = match_strategies("I have a fear of contamination issue");
        assert_eq!(strategies, COPING_STRATEGIES[0].1);
    }

    #[test]
    fn no_keyword_gives_empty_list() {
        assert!(match_strategies("had a pleasant walk").is_empty());
        assert!(match_strategies("").is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        let (category, _) = match_category("CHECKING the stove again").unwrap();
        assert_eq!(category, "Checking");
    }

    #[test]
    fn first_category_in_table_order_wins() {
        // Both "Checking" and "Fear of contamination" occur; the table lists
        // contamination first.
        let (category, _) =
            match_category("checking taps out of fear of contamination").unwrap();
        assert_eq!(category, "Fear of contamination");
    }

    #[test]
    fn categories_are_listed_in_order() {
        let all: Vec<_> = categories().collect();
        assert_eq!(all.first(), Some(&"Fear of contamination"));
        assert_eq!(all.len(), COPING_STRATEGIES.len());
        assert_eq!(general_tips().len(), 3);
    }
}
