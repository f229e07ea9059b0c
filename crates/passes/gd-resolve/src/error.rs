//! Error types for scope resolution

use gd_span::Span;

/// Errors that occur during scope resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// Identifier is not assigned in any visible scope before its use
    #[error("unbound identifier `{name}` at {span}{}", format_suggestions(.suggestions))]
    Unbound {
        /// The identifier that was not found
        name: String,
        /// Where the identifier was used
        span: Span,
        /// Similar names that are visible from the use site
        suggestions: Vec<String>,
    },

    /// An assignment node without a value child
    #[error("assignment to `{name}` at {span} has no value")]
    MalformedAssignment {
        /// The assigned identifier
        name: String,
        /// Location of the assignment
        span: Span,
    },
}

impl ResolutionError {
    /// Pick up to three visible names within edit distance 3 of `name`, closest first
    pub fn compute_suggestions(name: &str, available_names: &[String]) -> Vec<String> {
        let mut suggestions: Vec<(&String, usize)> = available_names
            .iter()
            .filter(|candidate| candidate.as_str() != name)
            .map(|candidate| (candidate, levenshtein_distance(name, candidate)))
            .filter(|(_, distance)| *distance <= 3)
            .collect();

        suggestions.sort_by_key(|(_, distance)| *distance);
        suggestions.dedup_by(|left, right| left.0 == right.0);
        suggestions
            .into_iter()
            .take(3)
            .map(|(candidate, _)| candidate.clone())
            .collect()
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean `{}`?)", suggestions.join("`, `"))
    }
}

/// Compute Levenshtein distance between two strings
fn levenshtein_distance(source: &str, target: &str) -> usize {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();

    if source.is_empty() {
        return target.len();
    }
    if target.is_empty() {
        return source.len();
    }

    // Single rolling row of the edit matrix
    let mut row: Vec<usize> = (0..=target.len()).collect();
    for (idx, source_char) in source.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = idx + 1;
        for (jdx, target_char) in target.iter().enumerate() {
            let cost = usize::from(source_char != target_char);
            let next = (row[jdx + 1] + 1).min(row[jdx] + 1).min(diagonal + cost);
            diagonal = row[jdx + 1];
            row[jdx + 1] = next;
        }
    }

    row[target.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "def"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn test_suggestions_and_message() {
        let names = vec![
            "score".to_string(),
            "scores".to_string(),
            "board".to_string(),
            "score".to_string(),
        ];
        let suggestions = ResolutionError::compute_suggestions("scor", &names);
        assert_eq!(suggestions, vec!["score".to_string(), "scores".to_string()]);

        let error = ResolutionError::Unbound {
            name: "scor".to_string(),
            span: Span::new(10, 14),
            suggestions,
        };
        assert_eq!(
            error.to_string(),
            "unbound identifier `scor` at 10..14 (did you mean `score`, `scores`?)"
        );
    }
}
