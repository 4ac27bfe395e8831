use itertools::Itertools;

/// Trims every review, drops the blank ones and removes exact duplicates,
/// keeping the first occurrence of each.
pub fn clean_reviews<I, S>(reviews: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    reviews
        .into_iter()
        .map(|r| r.as_ref().trim().to_string())
        .filter(|r| !r.is_empty())
        .unique()
        .collect()
}

pub fn is_review_fragment(text: &str, company: &str, min_len: usize) -> bool {
    text.chars().count() > min_len && text.to_lowercase().contains(&company.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{clean_reviews, is_review_fragment};

    #[test]
    fn clean_reviews_trims_and_dedupes_in_order() {
        let reviews = vec![
            "  Great culture at Acme  ",
            "Long hours at Acme",
            "",
            "   ",
            "Great culture at Acme",
            "Long hours at Acme\n",
        ];

        assert_eq!(
            clean_reviews(reviews),
            vec!["Great culture at Acme", "Long hours at Acme"]
        );
    }

    #[test]
    fn clean_reviews_keeps_case_variants_apart() {
        let reviews = vec!["Acme pays well", "acme pays well"];
        assert_eq!(clean_reviews(reviews).len(), 2);
    }

    #[test]
    fn fragment_must_mention_company_case_insensitively() {
        assert!(is_review_fragment(
            "Working at ACME was a great experience overall",
            "Acme",
            30
        ));
        assert!(!is_review_fragment(
            "Working here was a great experience overall",
            "Acme",
            30
        ));
    }

    #[test]
    fn fragment_must_be_strictly_longer_than_minimum() {
        let exactly_thirty = "Acme is a nice place to workkk";
        assert_eq!(exactly_thirty.chars().count(), 30);
        assert!(!is_review_fragment(exactly_thirty, "Acme", 30));
        assert!(is_review_fragment(
            "Acme is a nice place to workkk!",
            "Acme",
            30
        ));
    }
}
