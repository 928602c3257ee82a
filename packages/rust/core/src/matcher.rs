//! Keyword matching over a section forest.

use tracing::trace;

use profiler_classify::{PatternFamily, degree_sentences};
use profiler_shared::{DegreeSentence, MatchRecord, SectionNode, Vocabulary};

/// Sections whose title contains a vocabulary keyword, in pre-order.
///
/// Each section yields at most one record, for the first keyword (in vocabulary
/// order) that is a case-sensitive substring of its title. Children are always
/// visited, whether or not their parent matched.
pub fn match_sections(forest: &[SectionNode], vocabulary: &Vocabulary) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    walk(forest, vocabulary, &mut records);
    records
}

fn walk(nodes: &[SectionNode], vocabulary: &Vocabulary, records: &mut Vec<MatchRecord>) {
    for node in nodes {
        let keyword = vocabulary
            .iter()
            .filter(|k| !k.is_empty())
            .find(|k| node.title.contains(k));

        if let Some(keyword) = keyword {
            trace!(title = %node.title, keyword, "section matched");
            records.push(MatchRecord {
                id: node.id.clone(),
                title: node.title.clone(),
                content: node.content.clone(),
                level: node.level,
                keyword: keyword.to_string(),
            });
        }

        walk(&node.children, vocabulary, records);
    }
}

/// Strict-pattern degree sentences of matched sections, in record order.
pub fn classify_records(records: &[MatchRecord]) -> Vec<DegreeSentence> {
    records
        .iter()
        .flat_map(|record| {
            degree_sentences(&record.content, PatternFamily::Strict)
                .into_iter()
                .map(|text| DegreeSentence {
                    section_id: record.id.clone(),
                    section_title: record.title.clone(),
                    text,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> Vocabulary {
        terms.iter().copied().collect()
    }

    fn forest() -> Vec<SectionNode> {
        let mut early = SectionNode::new(2, "Early life", Some("Early_life".into()), "Born in Ohio.");
        early.children.push(SectionNode::new(
            3,
            "Education",
            Some("Education".into()),
            "She earned a B.A. in 1990.",
        ));
        vec![early, SectionNode::new(2, "Career", Some("Career".into()), "She taught.")]
    }

    #[test]
    fn matches_nested_section() {
        let records = match_sections(&forest(), &vocab(&["Education"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Education");
        assert_eq!(records[0].level, 3);
        assert_eq!(records[0].keyword, "Education");
        assert_eq!(records[0].id.as_deref(), Some("Education"));
    }

    #[test]
    fn first_keyword_wins_per_branch() {
        let forest = vec![SectionNode::new(2, "Early life and education", None, "")];
        let records = match_sections(&forest, &vocab(&["life", "education", "Early"]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keyword, "life");
    }

    #[test]
    fn descends_into_matched_parents() {
        let mut parent = SectionNode::new(2, "Education", None, "");
        parent
            .children
            .push(SectionNode::new(3, "Graduate education", None, ""));
        let records = match_sections(&[parent], &vocab(&["ducation"]));
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Education", "Graduate education"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(match_sections(&forest(), &vocab(&["education"])).is_empty());
    }

    #[test]
    fn empty_vocabulary_matches_nothing() {
        assert!(match_sections(&forest(), &Vocabulary::new()).is_empty());
        assert!(match_sections(&forest(), &vocab(&[""])).is_empty());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let forest = forest();
        let vocabulary = vocab(&["Career", "Education"]);
        assert_eq!(
            match_sections(&forest, &vocabulary),
            match_sections(&forest, &vocabulary)
        );
    }

    #[test]
    fn classifies_matched_content() {
        let records = match_sections(&forest(), &vocab(&["Education"]));
        let sentences = classify_records(&records);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "She earned a B.A. in 1990.");
        assert_eq!(sentences[0].section_title, "Education");
    }
}
