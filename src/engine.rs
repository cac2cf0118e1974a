//! Translation driver
//!
//! Splits input into logical lines, runs each through the statement rules,
//! generates Python and assembles the full feedback record. `translate` is
//! total: any input string, including garbage, yields a usable result.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::backend::python::{summary, PyGen};
use crate::feedback::{Confidence, Translation};
use crate::frontend::ast::Stmt;
use crate::frontend::normalize::normalize;
use crate::frontend::rules::{parse_line_traced, FALLBACK_RULE};

/// Python topics the translator deliberately does not cover
static SCOPE_WORDS: OnceLock<Regex> = OnceLock::new();
static SCOPE_PHRASES: OnceLock<Regex> = OnceLock::new();

fn scope_words() -> &'static Regex {
    SCOPE_WORDS.get_or_init(|| {
        Regex::new(
            r"(?i)\b(class(?:es)?|exceptions?|lambda|recursion|recursive|comprehensions?|async|await|decorators?|generators?|threads?|databases?)\b",
        )
        .expect("scope words")
    })
}

fn scope_phrases() -> &'static Regex {
    SCOPE_PHRASES.get_or_init(|| {
        Regex::new(r"(?i)\b(open|read|write to|save to|append to)\s+(?:a|the)\s+file\b")
            .expect("scope phrases")
    })
}

/// Translate plain English into Python with full feedback.
pub fn translate(input: &str) -> Translation {
    if input.trim().is_empty() {
        return empty_input();
    }
    if let Some(found) = out_of_scope_term(input) {
        return out_of_scope(&found);
    }

    // A logical line per newline or semicolon
    let lines: Vec<&str> = input
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    log::debug!("split input into {} logical line(s)", lines.len());

    let parsed: Vec<(&str, Stmt, &'static str)> = lines
        .iter()
        .map(|line| {
            let (stmt, rule) = parse_line_traced(line);
            (*line, stmt, rule)
        })
        .collect();

    let mut gen = PyGen::new();

    // Auto-insert imports for modules the normalized text reaches for, so
    // they land above the code that needs them
    for module in detected_modules(&lines) {
        gen.emit_auto_import(module);
    }

    let mut sentences = Vec::new();
    for (line, stmt, rule) in &parsed {
        // An explicit import already satisfied by auto-insertion is dropped
        if let Stmt::Import { module } = stmt {
            if gen.has_import(module) {
                continue;
            }
        }

        gen.emit(stmt, line);
        if *rule == FALLBACK_RULE {
            log::info!("line {:?} translated as a literal print", line);
            gen.lower_confidence(Confidence::Medium);
        }
        sentences.push(summary(stmt));
    }

    let explanation = if sentences.is_empty() {
        "There was nothing to translate.".to_string()
    } else {
        format!("{}.", sentences.join(". "))
    };

    let concepts = gen.concepts.iter().copied().collect();
    let confidence = gen.confidence;
    let mappings = std::mem::take(&mut gen.mappings);
    let alternatives = std::mem::take(&mut gen.alternatives);
    let suggestions = std::mem::take(&mut gen.suggestions);

    Translation {
        generated_code: gen.finish(),
        explanation,
        mappings,
        alternatives,
        confidence,
        suggestions,
        concepts,
        out_of_scope: false,
    }
}

/// Modules referenced by the normalized text, in stable order
fn detected_modules(lines: &[&str]) -> Vec<&'static str> {
    let mut modules = BTreeSet::new();
    for line in lines {
        let norm = normalize(line);
        if norm.contains("math.") {
            modules.insert("math");
        }
        if norm.contains("random.") {
            modules.insert("random");
        }
    }
    modules.into_iter().collect()
}

fn out_of_scope_term(input: &str) -> Option<String> {
    if let Some(m) = scope_words().find(input) {
        return Some(m.as_str().to_lowercase());
    }
    scope_phrases()
        .find(input)
        .map(|m| m.as_str().to_lowercase())
}

fn empty_input() -> Translation {
    Translation {
        generated_code: String::new(),
        explanation: "There is nothing to translate yet.".to_string(),
        mappings: Vec::new(),
        alternatives: Vec::new(),
        confidence: Confidence::Low,
        suggestions: vec![
            "Try: print Hello World".to_string(),
            "Try: set x to 10".to_string(),
            "Try: loop 5 times and print Hi".to_string(),
        ],
        concepts: Vec::new(),
        out_of_scope: false,
    }
}

fn out_of_scope(term: &str) -> Translation {
    Translation {
        generated_code: format!("# Not supported yet: {}", term),
        explanation: format!(
            "\"{}\" needs Python ideas beyond the seven concepts this translator covers.",
            term
        ),
        mappings: Vec::new(),
        alternatives: Vec::new(),
        confidence: Confidence::Low,
        suggestions: vec![
            "This translator covers printing, variables, math, conditions, loops, lists and functions.".to_string(),
            "Try one small step at a time, like 'create a list called items'.".to_string(),
        ],
        concepts: Vec::new(),
        out_of_scope: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::ConceptTag;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_print_round_trip() {
        let t = translate("print Hello World");
        assert_eq!(t.generated_code, "print(\"Hello World\")");
        assert_eq!(t.mappings.len(), 1);
        assert_eq!(t.mappings[0].line_number, 1);
        assert_eq!(t.confidence, Confidence::High);
        assert_eq!(t.concepts, vec![ConceptTag::Print]);
        assert!(!t.out_of_scope);
    }

    #[test]
    fn test_deterministic() {
        let input = "set x to 10\nif x is greater than 5 print big else print small";
        assert_eq!(translate(input), translate(input));
    }

    #[test]
    fn test_multi_line_numbers() {
        let t = translate("set x to 5\nprint x");
        assert_eq!(t.generated_code, "x = 5\nprint(x)");
        let lines: Vec<usize> = t.mappings.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn test_semicolons_split_lines() {
        let t = translate("set x to 5; print x");
        assert_eq!(t.generated_code, "x = 5\nprint(x)");
    }

    #[test]
    fn test_auto_import_single_and_synthetic_mapping() {
        let t = translate("print the square root of 16\nset r to the square root of 25");
        let code_lines: Vec<&str> = t.generated_code.lines().collect();
        // Exactly one import, placed first
        assert_eq!(code_lines[0], "import math");
        assert_eq!(
            code_lines.iter().filter(|l| **l == "import math").count(),
            1
        );
        // Synthetic provenance carries line number 0
        assert_eq!(t.mappings[0].line_number, 0);
        assert!(t.mappings[0].generated_fragment.contains("import math"));
        // Real statements start after the import
        assert_eq!(t.mappings[1].line_number, 2);
    }

    #[test]
    fn test_explicit_import_not_duplicated() {
        let t = translate("import math\nprint math.sqrt(9)");
        assert_eq!(
            t.generated_code
                .lines()
                .filter(|l| *l == "import math")
                .count(),
            1
        );
    }

    #[test]
    fn test_out_of_scope_gate() {
        // Singular and plural forms must both be flagged
        let t = translate("create a class called Dog");
        assert!(t.out_of_scope, "singular 'class' must be out of scope");
        assert_eq!(t.confidence, Confidence::Low);
        assert!(t.generated_code.starts_with('#'));
        assert!(!t.suggestions.is_empty());

        assert!(translate("make some classes for my game").out_of_scope);
        assert!(translate("use a lambda here").out_of_scope);
    }

    #[test]
    fn test_empty_input() {
        let t = translate("   \n  ");
        assert_eq!(t.generated_code, "");
        assert_eq!(t.confidence, Confidence::Low);
        assert!(!t.out_of_scope);
        assert!(!t.suggestions.is_empty());
    }

    #[test]
    fn test_fallback_lowers_confidence_to_medium() {
        let t = translate("the quick brown fox");
        assert_eq!(t.generated_code, "print(\"the quick brown fox\")");
        assert_eq!(t.confidence, Confidence::Medium);
    }

    #[test]
    fn test_clarification_forces_low_confidence() {
        let t = translate("make it faster");
        assert_eq!(t.confidence, Confidence::Low);
        assert!(!t.suggestions.is_empty());
        assert!(!t.out_of_scope);
        assert!(t.generated_code.starts_with("# Could not translate:"));
    }

    #[test]
    fn test_comment_line_stays_a_comment() {
        let t = translate("# remember to check the score\nprint score");
        assert_eq!(
            t.generated_code,
            "# remember to check the score\nprint(score)"
        );
        // The comment is mapped like any other statement
        assert_eq!(t.mappings[0].line_number, 1);
        assert!(t.mappings[0].generated_fragment.starts_with('#'));
        assert_eq!(t.confidence, Confidence::High);
    }

    #[test]
    fn test_totality_on_garbage() {
        for input in ["@@@ ???", "🙂🙂", "))((", "if", "set to to to"] {
            let t = translate(input);
            assert!(!t.generated_code.is_empty(), "input {:?}", input);
        }
    }

    #[test]
    fn test_nested_mapping_line_numbers() {
        let t = translate("if score is greater than 90 print Great else print Again");
        assert_eq!(
            t.generated_code,
            "if score > 90:\n    print(\"Great\")\nelse:\n    print(\"Again\")"
        );
        // The top-level mapping keeps the verbatim input phrase
        assert_eq!(
            t.mappings[0].source_phrase,
            "if score is greater than 90 print Great else print Again"
        );
        let lines: Vec<usize> = t.mappings.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_concepts_in_curriculum_order() {
        let t = translate("create a list called nums with 3, 1 and 2\nloop 3 times and print Hi");
        assert_eq!(
            t.concepts,
            vec![
                ConceptTag::Print,
                ConceptTag::Variables,
                ConceptTag::Loops,
                ConceptTag::Lists,
            ]
        );
    }

    #[test]
    fn test_explanation_is_sentence_per_line() {
        let t = translate("set x to 5\nprint x");
        assert!(t.explanation.contains("Stores 5 in the variable x"));
        assert!(t.explanation.ends_with('.'));
    }
}
