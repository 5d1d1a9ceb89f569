//! Field-of-study inference from program names

/// Ordered keyword table. The first row with a matching keyword wins, so a
/// "Computer Science (AI)" program stays in Computer Science.
const FIELD_KEYWORDS: &[(&str, &[&str])] = &[
    ("Computer Science", &["computer science", "computing", "software", "cs"]),
    ("Engineering", &["engineering", "robotics"]),
    ("Data Science", &["data science", "machine learning", "artificial intelligence", "ai"]),
    ("Mathematics", &["mathematics", "statistics", "math"]),
    ("Physics", &["physics", "astronomy"]),
    ("Economics", &["economics", "finance"]),
    ("Business", &["business", "management", "mba"]),
    ("Life Sciences", &["biology", "biomedical", "neuroscience", "medicine", "public health"]),
    ("Chemistry", &["chemistry"]),
    ("Psychology", &["psychology"]),
    ("Law", &["law", "legal"]),
    ("Education", &["education"]),
    ("Social Sciences", &["political", "policy", "sociology", "international relations"]),
    ("Design", &["design", "architecture"]),
];

pub const DEFAULT_FIELD: &str = "Graduate Studies";

/// Keywords this short only match whole words ("cs" must not match "physics").
const WHOLE_WORD_MAX_LEN: usize = 3;

fn keyword_matches(lowered: &str, keyword: &str) -> bool {
    if keyword.len() <= WHOLE_WORD_MAX_LEN {
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == keyword)
    } else {
        lowered.contains(keyword)
    }
}

/// Classify one program name, case-insensitively.
pub fn classify_program(program: &str) -> &'static str {
    let lowered = program.to_lowercase();

    FIELD_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| keyword_matches(&lowered, kw)))
        .map(|(field, _)| *field)
        .unwrap_or(DEFAULT_FIELD)
}

/// Most frequent field across `programs`. Ties go to the field seen first.
pub fn primary_field<'a, I>(programs: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    // Insertion-ordered tally keeps tie-breaking deterministic.
    let mut tally: Vec<(&'static str, usize)> = Vec::new();

    for program in programs {
        let field = classify_program(program);
        match tally.iter_mut().find(|(name, _)| *name == field) {
            Some((_, count)) => *count += 1,
            None => tally.push((field, 1)),
        }
    }

    let mut best: Option<(&'static str, usize)> = None;
    for (field, count) in tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((field, count));
        }
    }

    best.map(|(field, _)| field)
        .unwrap_or(DEFAULT_FIELD)
        .to_string()
}
