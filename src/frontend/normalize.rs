//! Normalizer
//!
//! Rewrites an input line's English comparison/arithmetic phrases, math
//! vocabulary and number words into canonical symbolic form before lexing.
//! Quoted literals are protected so no pass can corrupt them. Normalization
//! is total: unmatched text passes through unchanged.

use regex::Regex;
use std::sync::OnceLock;

/// Verbs that start an action clause. These double as clause boundaries
/// when capturing a math-function operand ("square root of x print x" must
/// stop at `print`) and when deciding whether `times` is arithmetic or a
/// loop-count marker.
pub(crate) const ACTION_VERBS: &[&str] = &[
    "print", "show", "display", "output", "say", "echo", "log", "write", "set", "let", "make",
    "create", "define", "store", "add", "append", "push", "remove", "delete", "sort", "loop",
    "repeat", "return", "ask", "get", "increase", "increment", "decrease", "decrement", "reduce",
    "greet", "round", "import", "use", "if", "while", "do",
];

/// Multi-word comparison phrases, most specific first so a longer phrase is
/// never partially consumed by a shorter one it contains.
const COMPARISONS: &[(&str, &str)] = &[
    ("is greater than or equal to", ">="),
    ("is less than or equal to", "<="),
    ("is not equal to", "!="),
    ("does not equal", "!="),
    ("is equal to", "=="),
    ("is the same as", "=="),
    ("is greater than", ">"),
    ("is less than", "<"),
    ("is more than", ">"),
    ("is fewer than", "<"),
    ("is at least", ">="),
    ("is at most", "<="),
    ("is above", ">"),
    ("is below", "<"),
    ("is not", "!="),
    ("equals", "=="),
];

/// Arithmetic phrases; `times` and the postfix forms need context and are
/// handled separately.
const ARITHMETIC: &[(&str, &str)] = &[
    ("raised to the power of", "**"),
    ("to the power of", "**"),
    ("divided by", "/"),
    ("multiplied by", "*"),
    ("modulo", "%"),
    ("plus", "+"),
    ("minus", "-"),
];

/// Math-function phrases rewritten into call syntax.
const FUNCTIONS: &[(&str, &str)] = &[
    ("the square root of", "math.sqrt"),
    ("square root of", "math.sqrt"),
    ("the absolute value of", "abs"),
    ("absolute value of", "abs"),
];

const NUMBER_WORDS: &[(&str, &str)] = &[
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
    ("eleven", "11"),
    ("twelve", "12"),
    ("thirteen", "13"),
    ("fourteen", "14"),
    ("fifteen", "15"),
    ("sixteen", "16"),
    ("seventeen", "17"),
    ("eighteen", "18"),
    ("nineteen", "19"),
    ("twenty", "20"),
];

fn phrase_table(cell: &OnceLock<Vec<(Regex, &'static str)>>, table: &[(&str, &'static str)]) {
    cell.get_or_init(|| {
        table
            .iter()
            .map(|(phrase, symbol)| {
                let pattern = format!(r"\b{}\b", regex::escape(phrase));
                (Regex::new(&pattern).expect("static phrase pattern"), *symbol)
            })
            .collect()
    });
}

fn is_clause_boundary(word: &str) -> bool {
    matches!(word, "and" | "or" | "then")
        || ACTION_VERBS.contains(&word)
        || word.starts_with(['+', '-', '*', '/', '%', '<', '>', '=', '!'])
}

/// Normalize one logical line. Total over any input string.
pub fn normalize(text: &str) -> String {
    let (protected, literals) = protect_literals(text);

    let mut s = protected.to_lowercase();
    s = rewrite_comparisons(&s);
    s = rewrite_arithmetic(&s);
    s = rewrite_functions(&s);
    s = rewrite_constants(&s);
    s = rewrite_number_words(&s);

    let restored = restore_literals(&s, &literals);
    collapse_whitespace(&restored)
}

// ==================== Literal Protection ====================

fn quoted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#).expect("quoted"))
}

fn marker(index: usize) -> String {
    // Control characters survive lowercasing, word boundaries and the
    // whitespace collapse untouched.
    format!("\u{1}{}\u{2}", index)
}

fn protect_literals(text: &str) -> (String, Vec<String>) {
    let mut literals = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in quoted_re().find_iter(text) {
        out.push_str(&text[last..m.start()]);
        out.push_str(&marker(literals.len()));
        literals.push(m.as_str().to_string());
        last = m.end();
    }
    out.push_str(&text[last..]);

    (out, literals)
}

fn restore_literals(text: &str, literals: &[String]) -> String {
    let mut out = text.to_string();
    for (i, literal) in literals.iter().enumerate() {
        out = out.replace(&marker(i), literal);
    }
    out
}

// ==================== Rewrite Passes ====================

fn rewrite_comparisons(s: &str) -> String {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    phrase_table(&TABLE, COMPARISONS);

    let mut out = s.to_string();
    for (re, symbol) in TABLE.get().expect("initialized") {
        out = re.replace_all(&out, *symbol).into_owned();
    }
    out
}

fn rewrite_arithmetic(s: &str) -> String {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    phrase_table(&TABLE, ARITHMETIC);

    let mut out = s.to_string();
    for (re, symbol) in TABLE.get().expect("initialized") {
        out = re.replace_all(&out, *symbol).into_owned();
    }
    out = rewrite_times(&out);

    static SQUARED: OnceLock<Regex> = OnceLock::new();
    let squared = SQUARED.get_or_init(|| Regex::new(r"\b([a-z0-9_.]+)\s+squared\b").expect("sq"));
    out = squared.replace_all(&out, "$1 ** 2").into_owned();

    static CUBED: OnceLock<Regex> = OnceLock::new();
    let cubed = CUBED.get_or_init(|| Regex::new(r"\b([a-z0-9_.]+)\s+cubed\b").expect("cb"));
    cubed.replace_all(&out, "$1 ** 3").into_owned()
}

/// `times` is multiplication only when an operand follows; before a clause
/// boundary (or at end of line) it is the loop-count marker and must stay.
fn rewrite_times(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\btimes\b").expect("times"));

    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for m in re.find_iter(s) {
        out.push_str(&s[last..m.start()]);
        let next_word = s[m.end()..].split_whitespace().next().unwrap_or("");
        if next_word.is_empty() || is_clause_boundary(next_word) {
            out.push_str("times");
        } else {
            out.push('*');
        }
        last = m.end();
    }
    out.push_str(&s[last..]);
    out
}

fn rewrite_functions(s: &str) -> String {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    phrase_table(&TABLE, FUNCTIONS);
    static WORD: OnceLock<Regex> = OnceLock::new();
    let word = WORD.get_or_init(|| Regex::new(r"\S+").expect("word"));

    let mut out = s.to_string();
    for (re, func) in TABLE.get().expect("initialized") {
        loop {
            let Some((start, end)) = re.find(&out).map(|m| (m.start(), m.end())) else {
                break;
            };
            let after = out[end..].to_string();

            // Capture the operand up to the next clause boundary. The first
            // word is always part of the operand (it may itself be signed).
            let mut operand_end = 0;
            for (i, w) in word.find_iter(&after).enumerate() {
                if i > 0 && is_clause_boundary(w.as_str()) {
                    break;
                }
                operand_end = w.end();
            }

            let operand = after[..operand_end].trim().to_string();
            let tail = after[operand_end..].to_string();
            out = format!("{}{}({}){}", &out[..start], func, operand, tail);
        }
    }
    out
}

fn rewrite_constants(s: &str) -> String {
    // The leading group keeps already-qualified names (math.pi) intact.
    static PI: OnceLock<Regex> = OnceLock::new();
    let pi = PI.get_or_init(|| Regex::new(r"(^|[^.\w])pi\b").expect("pi"));
    let out = pi.replace_all(s, "${1}math.pi").into_owned();

    static EULER: OnceLock<Regex> = OnceLock::new();
    let euler =
        EULER.get_or_init(|| Regex::new(r"(^|[^.\w])euler(?:'s)?(?:\s+number)?\b").expect("e"));
    euler.replace_all(&out, "${1}math.e").into_owned()
}

fn rewrite_number_words(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        let words: Vec<&str> = NUMBER_WORDS.iter().map(|(w, _)| *w).collect();
        Regex::new(&format!(r"\b(?:{})\b", words.join("|"))).expect("number words")
    });

    re.replace_all(s, |caps: &regex::Captures| {
        let word = caps.get(0).expect("match").as_str();
        NUMBER_WORDS
            .iter()
            .find(|(w, _)| *w == word)
            .map(|(_, d)| (*d).to_string())
            .unwrap_or_else(|| word.to_string())
    })
    .into_owned()
}

fn collapse_whitespace(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("ws"));
    re.replace_all(s.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_comparison_wins() {
        assert_eq!(
            normalize("x is greater than or equal to 5"),
            "x >= 5",
            "must never leave 'or equal to' residue"
        );
        assert_eq!(normalize("x is greater than 5"), "x > 5");
        assert_eq!(normalize("x is at least 3"), "x >= 3");
        assert_eq!(normalize("x is not equal to y"), "x != y");
    }

    #[test]
    fn test_arithmetic_phrases() {
        assert_eq!(normalize("10 plus 5 times 2"), "10 + 5 * 2");
        assert_eq!(normalize("8 divided by 2"), "8 / 2");
        assert_eq!(normalize("2 to the power of 8"), "2 ** 8");
        assert_eq!(normalize("3 squared"), "3 ** 2");
        assert_eq!(normalize("x modulo 2"), "x % 2");
    }

    #[test]
    fn test_loop_count_times_is_preserved() {
        assert_eq!(
            normalize("loop 5 times and print hello"),
            "loop 5 times and print hello"
        );
        assert_eq!(normalize("repeat five times"), "repeat 5 times");
        assert_eq!(normalize("loop 3 times print i"), "loop 3 times print i");
    }

    #[test]
    fn test_math_function_operand_capture() {
        assert_eq!(normalize("the square root of 16"), "math.sqrt(16)");
        assert_eq!(
            normalize("square root of x and print y"),
            "math.sqrt(x) and print y"
        );
        assert_eq!(normalize("absolute value of -4"), "abs(-4)");
    }

    #[test]
    fn test_constants() {
        assert_eq!(normalize("2 times pi"), "2 * math.pi");
        // Already-qualified names stay intact
        assert_eq!(normalize("math.pi"), "math.pi");
    }

    #[test]
    fn test_number_words_whole_word_only() {
        assert_eq!(normalize("loop twenty times"), "loop 20 times");
        // "one" inside a word is untouched
        assert_eq!(normalize("print money"), "print money");
    }

    #[test]
    fn test_quoted_literals_protected() {
        assert_eq!(
            normalize(r#"print "Five Times Greater""#),
            r#"print "Five Times Greater""#
        );
        assert_eq!(
            normalize("set msg to 'It is greater than that'"),
            "set msg to 'It is greater than that'"
        );
    }

    #[test]
    fn test_total_on_garbage() {
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("@@@ ??? !!!"), "@@@ ??? !!!");
    }
}
