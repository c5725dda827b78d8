//! Completion-response parser.
//!
//! Grammar: the reply is a sequence of named sections. A section starts at a
//! line whose trimmed form begins with one of the known headers
//! (`Score:`, `Highlights:`, `List Summary:`, `Detailed Summary:`,
//! `Analysis:`, case-insensitive) and runs until the next header or the end
//! of the text. `Score` takes its number from the header line itself;
//! `Highlights` keeps only bullet lines (`•` or `-`); the remaining sections
//! keep their body verbatim, trimmed.
//!
//! Parsing is total: missing sections come back as `None`/empty, never as an
//! error. The scorer supplies fallbacks.

/// Headerwise-parsed assessment. All fields optional.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedAssessment {
    pub score: Option<u8>,
    pub highlights: Vec<String>,
    pub list_summary: Option<String>,
    pub detailed_summary: Option<String>,
    pub analysis: Option<String>,
}

const HEADERS: [&str; 5] = [
    "score:",
    "highlights:",
    "list summary:",
    "detailed summary:",
    "analysis:",
];

/// Parses a free-form completion reply against the fixed-header template.
pub fn parse_assessment(text: &str) -> ParsedAssessment {
    let mut parsed = ParsedAssessment::default();
    let mut current: Option<usize> = None;
    let mut body: Vec<&str> = Vec::new();

    let mut flush = |section: Option<usize>, body: &mut Vec<&str>, parsed: &mut ParsedAssessment| {
        let Some(idx) = section else {
            body.clear();
            return;
        };
        let content = body.join("\n").trim().to_string();
        body.clear();

        match idx {
            1 => parsed.highlights = extract_bullets(&content),
            2 => parsed.list_summary = non_empty(content),
            3 => parsed.detailed_summary = non_empty(content),
            4 => parsed.analysis = non_empty(content),
            _ => {}
        }
    };

    for line in text.lines() {
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        if let Some(idx) = HEADERS.iter().position(|h| lowered.starts_with(h)) {
            flush(current, &mut body, &mut parsed);
            current = Some(idx);

            if idx == 0 {
                parsed.score = extract_score(&trimmed[HEADERS[0].len()..]);
                current = None;
            } else {
                // Content after the header on the same line belongs to it.
                let rest = trimmed[HEADERS[idx].len()..].trim();
                if !rest.is_empty() {
                    body.push(rest);
                }
            }
        } else if current.is_some() {
            body.push(line);
        }
    }
    flush(current, &mut body, &mut parsed);

    parsed
}

fn extract_score(rest: &str) -> Option<u8> {
    let digits: String = rest
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse::<u64>().ok().map(|n| n.min(100) as u8)
}

fn extract_bullets(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            line.strip_prefix('\u{2022}')
                .or_else(|| line.strip_prefix('-'))
                .map(|rest| rest.trim().to_string())
        })
        .filter(|b| !b.is_empty())
        .collect()
}

fn non_empty(content: String) -> Option<String> {
    if content.is_empty() { None } else { Some(content) }
}
