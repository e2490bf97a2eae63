//! Topical categorization of tracked bills.
//!
//! A lightweight term-frequency/cosine scorer over the bill title and
//! chronology text. Fast, deterministic, and dependency-free — no external
//! models.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

/// User-defined topical category: a name plus the terms that characterize it
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    pub terms: Vec<String>,
    /// Minimum cosine score (0.0 - 1.0). Defaults to 0.1.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.1
}

/// Normalize and tokenize text; short fragments carry no topical signal
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() > 2)
        .map(|word| word.to_string())
        .collect()
}

/// Term frequency normalized by document length
fn compute_tf(tokens: &[String]) -> HashMap<String, f64> {
    let mut tf = HashMap::new();
    let total = tokens.len() as f64;
    for token in tokens {
        *tf.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    for count in tf.values_mut() {
        *count /= total;
    }
    tf
}

fn cosine_similarity(tf1: &HashMap<String, f64>, tf2: &HashMap<String, f64>) -> f64 {
    let mut dot_product = 0.0;
    let mut norm1 = 0.0;
    let mut norm2 = 0.0;

    let all_keys: HashSet<_> = tf1.keys().chain(tf2.keys()).cloned().collect();
    for key in all_keys {
        let v1 = tf1.get(&key).copied().unwrap_or(0.0);
        let v2 = tf2.get(&key).copied().unwrap_or(0.0);
        dot_product += v1 * v2;
        norm1 += v1 * v1;
        norm2 += v2 * v2;
    }

    if norm1 == 0.0 || norm2 == 0.0 {
        return 0.0;
    }
    dot_product / (norm1.sqrt() * norm2.sqrt())
}

/// Score one category against a bill's text
pub fn score_category(definition: &CategoryDefinition, text: &str) -> f64 {
    let category_tokens = tokenize(&definition.terms.join(" "));
    let text_tokens = tokenize(text);
    if category_tokens.is_empty() || text_tokens.is_empty() {
        return 0.0;
    }
    cosine_similarity(&compute_tf(&category_tokens), &compute_tf(&text_tokens))
}

/// The best-scoring category that clears its threshold, if any. Ties break
/// on definition order.
pub fn best_category(definitions: &[CategoryDefinition], text: &str) -> Option<String> {
    let mut best: Option<(&CategoryDefinition, f64)> = None;
    for definition in definitions {
        let score = score_category(definition, text);
        if score < definition.threshold {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((definition, score)),
        }
    }
    best.map(|(definition, _)| definition.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str, terms: &[&str]) -> CategoryDefinition {
        CategoryDefinition {
            name: name.to_string(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
            threshold: 0.1,
        }
    }

    #[test]
    fn test_score_matches_topical_text() {
        let education = definition("Education", &["school", "teacher", "education"]);
        let score = score_category(&education, "Public school teacher salary increases");
        assert!(score > 0.0);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_best_category_picks_strongest() {
        let definitions = vec![
            definition("Education", &["school", "teacher", "education"]),
            definition("Transportation", &["highway", "transit", "vehicle"]),
        ];
        let best = best_category(&definitions, "Education funding for public school programs");
        assert_eq!(best.as_deref(), Some("Education"));
    }

    #[test]
    fn test_no_category_below_threshold() {
        let definitions = vec![definition("Transportation", &["highway", "transit"])];
        assert_eq!(best_category(&definitions, "Judicial appointment procedures"), None);
        assert_eq!(best_category(&definitions, ""), None);
    }
}
