//! Case-insensitive substring matching of user text against FAQ records.

use crate::faq::types::FaqRecord;

/// Lower-case and trim text for comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Find the first record related to `user_text` by substring containment.
///
/// `user_text` must already be normalized. A record matches when its question
/// contains the text, its keywords contain the text, or the text contains its
/// question. Records are scanned in the given order and the first hit wins.
/// The empty string is contained in every string, so empty text matches the
/// first record and a record with an empty question matches any text.
pub fn find_match<'a>(records: &'a [FaqRecord], user_text: &str) -> Option<&'a FaqRecord> {
    records.iter().find(|faq| {
        let question = normalize(&faq.question);
        let keywords = normalize(&faq.keywords);

        question.contains(user_text) || keywords.contains(user_text) || user_text.contains(&question)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faqs() -> Vec<FaqRecord> {
        vec![
            FaqRecord::new("hours", "", "9-5"),
            FaqRecord::new("refund", "", "no refunds"),
        ]
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  What are your Hours?\n"), "what are your hours?");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_user_text_contains_question() {
        let records = faqs();
        let hit = find_match(&records, &normalize("What are your Hours?")).unwrap();
        assert_eq!(hit.answer, "9-5");
    }

    #[test]
    fn test_question_contains_user_text() {
        let records = vec![FaqRecord::new("How do I request a REFUND?", "", "Email us")];
        let hit = find_match(&records, "refund").unwrap();
        assert_eq!(hit.answer, "Email us");
    }

    #[test]
    fn test_keywords_contain_user_text() {
        let records = vec![FaqRecord::new("Where are you located?", "address, location, map", "Main St 1")];
        assert_eq!(find_match(&records, "location").unwrap().answer, "Main St 1");
    }

    #[test]
    fn test_keywords_do_not_match_in_reverse() {
        let records = vec![FaqRecord::new("Where are you located?", "address", "Main St 1")];
        assert!(find_match(&records, "what is your address please").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let records = vec![
            FaqRecord::new("hours", "", "first"),
            FaqRecord::new("opening hours", "", "second"),
        ];
        assert_eq!(find_match(&records, "hours").unwrap().answer, "first");
    }

    #[test]
    fn test_no_match() {
        assert!(find_match(&faqs(), "do you ship abroad?").is_none());
    }

    #[test]
    fn test_empty_user_text_matches_first_record() {
        assert_eq!(find_match(&faqs(), "").unwrap().answer, "9-5");
        assert!(find_match(&[], "").is_none());
    }

    #[test]
    fn test_empty_question_matches_any_text() {
        let records = vec![
            FaqRecord::new("", "", "catch-all"),
            FaqRecord::new("refund", "", "no refunds"),
        ];
        assert_eq!(find_match(&records, "refund policy?").unwrap().answer, "catch-all");
        assert_eq!(find_match(&records, "hello").unwrap().answer, "catch-all");
    }

    #[test]
    fn test_duplicates_tolerated() {
        let records = vec![
            FaqRecord::new("hours", "", "9-5"),
            FaqRecord::new("hours", "", "9-5"),
        ];
        assert_eq!(find_match(&records, "hours").unwrap().answer, "9-5");
    }
}
