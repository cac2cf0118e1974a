//! Statement parser
//!
//! An ordered battery of independent pattern rules, tried in sequence; the
//! first match wins, and rule order encodes precedence (clarification
//! heuristics before everything, if/else before if, loop-with-body before
//! count-only loops). `parse_line` never fails: a line matching no rule
//! degrades to printing itself as a literal string, so every input line
//! produces some code.

use regex::Regex;
use std::sync::OnceLock;

use crate::frontend::ast::{BinOp, Expr, Segment, Stmt};
use crate::frontend::expr::parse_expression;
use crate::frontend::lexer::tokenize;
use crate::frontend::normalize::{normalize, ACTION_VERBS};

/// A single statement rule: (normalized text, cleaned original) -> match
pub type Rule = fn(&str, &str) -> Option<Stmt>;

/// The rule battery, in precedence order
pub const RULES: &[(&str, Rule)] = &[
    ("comment", rule_comment),
    ("clarify", rule_clarify),
    ("import", rule_import),
    ("input", rule_input),
    ("round", rule_round),
    ("greet", rule_greet),
    ("function-def", rule_function_def),
    ("if-else", rule_if_else),
    ("if", rule_if),
    ("while", rule_while),
    ("loop-body", rule_loop_body),
    ("loop-count", rule_loop_count),
    ("list-create", rule_list_create),
    ("dict-create", rule_dict_create),
    ("sort", rule_sort),
    ("append", rule_append),
    ("remove", rule_remove),
    ("aug-assign", rule_aug_assign),
    ("return", rule_return),
    ("assign", rule_assign),
    ("print", rule_print),
    ("bare-expr", rule_bare_expr),
];

/// Name reported when no rule matched and the line printed itself
pub const FALLBACK_RULE: &str = "literal-print";

/// Parse one logical line into a statement. Never fails.
pub fn parse_line(raw: &str) -> Stmt {
    parse_line_traced(raw).0
}

/// Like [`parse_line`], also reporting which rule matched
pub fn parse_line_traced(raw: &str) -> (Stmt, &'static str) {
    let original = clean(raw);
    let normalized = normalize(&original);

    for (name, rule) in RULES.iter().copied() {
        if let Some(stmt) = rule(&normalized, &original) {
            log::debug!("rule '{}' matched line {:?}", name, original);
            return (stmt, name);
        }
    }

    log::debug!("no rule matched line {:?}, printing it verbatim", original);
    (Stmt::Print(Expr::Str(original)), FALLBACK_RULE)
}

/// Light cleanup that preserves casing: trim and drop sentence-final
/// punctuation.
fn clean(raw: &str) -> String {
    raw.trim().trim_end_matches(['.', '!', '?']).trim().to_string()
}

// ==================== Shared Helpers ====================

fn re<'a>(cell: &'a OnceLock<Regex>, pattern: &str) -> &'a Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static rule pattern"))
}

/// Try to parse text as an expression; None means "not an expression".
fn expr_of(text: &str) -> Option<Expr> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_expression(&tokenize(trimmed)).ok()
}

/// Parse a condition. A leftover whole-word `is` ("if x is 5") gets one
/// retry as `==`; the normalizer cannot rewrite bare `is` globally without
/// corrupting assignment and print phrasing.
fn condition_of(text: &str) -> Option<Expr> {
    expr_of(text).or_else(|| {
        static IS: OnceLock<Regex> = OnceLock::new();
        let retry = re(&IS, r"\bis\b").replace_all(text, "==");
        expr_of(&retry)
    })
}

/// Locate the first action verb in a clause and split condition text from
/// action text around it. Works on original-cased text so the action can
/// recurse through `parse_line` without losing the user's casing.
fn split_cond_action(text: &str) -> Option<(String, String)> {
    static THEN: OnceLock<Regex> = OnceLock::new();
    if let Some(m) = re(&THEN, r"(?i)\bthen\b").find(text) {
        let cond = text[..m.start()].trim();
        let action = text[m.end()..].trim();
        if !cond.is_empty() && !action.is_empty() {
            return Some((cond.to_string(), action.to_string()));
        }
    }

    static WORD: OnceLock<Regex> = OnceLock::new();
    for m in re(&WORD, r"\S+").find_iter(text) {
        let word = m.as_str().to_ascii_lowercase();
        if m.start() > 0 && ACTION_VERBS.contains(&word.as_str()) {
            let cond = text[..m.start()].trim().to_string();
            let action = text[m.start()..].trim().to_string();
            return Some((cond, action));
        }
    }
    None
}

/// Parse an action clause, dropping a filler "do" in front
fn parse_action(text: &str) -> Stmt {
    static DO: OnceLock<Regex> = OnceLock::new();
    let action = re(&DO, r"(?i)^do\s+").replace(text.trim(), "");
    parse_line(&action)
}

/// Parse a condition written in original casing
fn condition_of_orig(text: &str) -> Option<Expr> {
    condition_of(&normalize(text))
}

/// Split a comma/`and`-delimited item list
fn split_items(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    re(&RE, r"\s*,\s*|\s+and\s+")
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a list/dict item as a number or a string literal
fn classify_item(text: &str) -> Expr {
    let trimmed = text.trim();
    match expr_of(trimmed) {
        Some(e @ Expr::Number(_)) => e,
        Some(Expr::Str(s)) => Expr::Str(s),
        _ => Expr::Str(trimmed.trim_matches(['"', '\'']).to_string()),
    }
}

/// A single all-lowercase word that could be a variable name
fn is_plain_lower_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Right-hand side of an assignment or return: expression first, opaque
/// string literal otherwise. A bare capitalized word ("Alice") stays a
/// string; only a plain lowercase word reads as a variable reference.
fn value_or_literal(norm_rhs: &str, orig_rhs: &str) -> Expr {
    match expr_of(norm_rhs) {
        Some(Expr::Ident(name)) => {
            if is_plain_lower_word(orig_rhs.trim()) {
                Expr::Ident(name)
            } else {
                Expr::Str(orig_rhs.trim().to_string())
            }
        }
        Some(expr) => expr,
        None => Expr::Str(orig_rhs.trim().trim_matches(['"', '\'']).to_string()),
    }
}

/// A capture group of `pattern` applied case-insensitively to the cleaned
/// original, preserving the user's casing; falls back to the normalized
/// capture when the original no longer matches (a phrase was rewritten).
fn original_capture(
    cell: &OnceLock<Regex>,
    pattern: &str,
    group: usize,
    orig: &str,
    fallback: &str,
) -> String {
    re(cell, pattern)
        .captures(orig)
        .and_then(|c| c.get(group))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

// ==================== Rules ====================

const VAGUE_REQUESTS: &[&str] = &[
    "make it faster",
    "make it better",
    "make it work",
    "make this better",
    "optimize",
    "optimize it",
    "fix it",
    "fix this",
    "improve it",
    "do something",
    "do something cool",
    "help",
    "help me",
];

const PROGRAM_OPENERS: &[&str] = &[
    "create a program",
    "write a program",
    "make a program",
    "build a program",
    "create an app",
    "make an app",
    "build an app",
    "create a game",
    "make a game",
];

fn rule_comment(_norm: &str, orig: &str) -> Option<Stmt> {
    let text = orig.strip_prefix('#')?;
    Some(Stmt::Comment(text.trim().to_string()))
}

fn rule_clarify(norm: &str, orig: &str) -> Option<Stmt> {
    let vague = VAGUE_REQUESTS.contains(&norm)
        || PROGRAM_OPENERS.iter().any(|p| norm.starts_with(p));
    if !vague {
        return None;
    }

    Some(Stmt::Clarify {
        original: orig.to_string(),
        explanation: "This request is too broad to translate directly.".to_string(),
        questions: vec![
            "What should the program take as input?".to_string(),
            "What should it print or return at the end?".to_string(),
            "Can you break it into single steps, like 'loop 5 times and print Hello'?".to_string(),
        ],
    })
}

fn rule_import(norm: &str, _orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let caps = re(&CELL, r"^(?:import|use)\s+([a-z_][\w.]*)$").captures(norm)?;
    Some(Stmt::Import {
        module: caps[1].to_string(),
    })
}

fn rule_input(norm: &str, _orig: &str) -> Option<Stmt> {
    static ASK: OnceLock<Regex> = OnceLock::new();
    static GET: OnceLock<Regex> = OnceLock::new();

    let name = re(
        &ASK,
        r"^ask\s+(?:the\s+user\s+)?(?:for\s+)?(?:their\s+|a\s+|the\s+)?([a-z_]\w*)$",
    )
    .captures(norm)
    .or_else(|| re(&GET, r"^get\s+([a-z_]\w*)\s+from\s+the\s+user$").captures(norm))
    .map(|c| c[1].to_string())?;

    let prompt = format!("Enter {}: ", name.replace('_', " "));
    Some(Stmt::Input { name, prompt })
}

fn rule_round(norm: &str, _orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let caps = re(&CELL, r"^round\s+(.+?)\s+to\s+(\d+)\s+decimal\s+places?$").captures(norm)?;
    let value = expr_of(&caps[1])?;

    Some(Stmt::Assign {
        name: "result".to_string(),
        value: Expr::Call {
            name: "round".to_string(),
            args: vec![value, Expr::Number(caps[2].to_string())],
        },
    })
}

fn rule_greet(norm: &str, orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    static ORIG: OnceLock<Regex> = OnceLock::new();
    let pattern = r"^(?:greet|say\s+hello\s+to)\s+([a-z_]\w*)$";
    let caps = re(&CELL, pattern).captures(norm)?;

    // "greet name" interpolates the variable; "greet Alice" greets the
    // literal person
    let orig_word = original_capture(
        &ORIG,
        r"(?i)^(?:greet|say\s+hello\s+to)\s+(\S+)$",
        1,
        orig,
        &caps[1],
    );
    if !is_plain_lower_word(&orig_word) {
        return Some(Stmt::Print(Expr::Str(format!("Hello, {}!", orig_word))));
    }

    Some(Stmt::Print(Expr::FString(vec![
        Segment::Text("Hello, ".to_string()),
        Segment::Expr(Expr::Ident(caps[1].to_string())),
        Segment::Text("!".to_string()),
    ])))
}

fn rule_function_def(norm: &str, orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    static ORIG: OnceLock<Regex> = OnceLock::new();
    let pattern = r"^(?:define|create|make)\s+(?:a\s+)?function\s+(?:called\s+|named\s+)?([a-z_]\w*)(?:\s+(?:with|taking)\s+(?:parameters\s+|parameter\s+|params\s+)?([\w\s,]+?))?(?:\s+(?:that|which|to)\s+(.+))?$";
    let caps = re(&CELL, pattern).captures(norm)?;

    let name = caps[1].to_string();
    let params: Vec<String> = caps
        .get(2)
        .map(|m| split_items(m.as_str()))
        .unwrap_or_default();
    let body = match caps.get(3) {
        Some(m) => {
            let orig_pattern = r"(?i)^(?:define|create|make)\s+(?:a\s+)?function\s+(?:called\s+|named\s+)?[a-z_]\w*(?:\s+(?:with|taking)\s+(?:parameters\s+|parameter\s+|params\s+)?[\w\s,]+?)?(?:\s+(?:that|which|to)\s+(.+))?$";
            let body_text = original_capture(&ORIG, orig_pattern, 1, orig, m.as_str());
            vec![parse_line(&body_text)]
        }
        None => vec![Stmt::Pass],
    };

    Some(Stmt::FunctionDef { name, params, body })
}

fn rule_if_else(norm: &str, orig: &str) -> Option<Stmt> {
    if !norm.starts_with("if ") {
        return None;
    }
    static IF: OnceLock<Regex> = OnceLock::new();
    let rest = re(&IF, r"(?i)^if\s+(.+)$").captures(orig)?.get(1)?.as_str();

    // Else split happens on the leftmost literal `else`
    static ELSE: OnceLock<Regex> = OnceLock::new();
    let m = re(&ELSE, r"(?i)\belse\b").find(rest)?;
    let if_part = rest[..m.start()].trim();
    let else_part = rest[m.end()..].trim();
    if else_part.is_empty() {
        return None;
    }

    let (cond_text, action) = split_cond_action(if_part)?;
    let cond = condition_of_orig(&cond_text)?;
    let then_body = vec![parse_action(&action)];

    // A nested conditional in the else position lifts into an elif chain
    let (elif_branches, else_body) = match parse_line(else_part) {
        Stmt::If {
            cond,
            then_body,
            mut elif_branches,
            else_body,
        } => {
            let mut branches = vec![(cond, then_body)];
            branches.append(&mut elif_branches);
            (branches, else_body)
        }
        other => (Vec::new(), Some(vec![other])),
    };

    Some(Stmt::If {
        cond,
        then_body,
        elif_branches,
        else_body,
    })
}

fn rule_if(norm: &str, orig: &str) -> Option<Stmt> {
    if !norm.starts_with("if ") {
        return None;
    }
    static IF: OnceLock<Regex> = OnceLock::new();
    let rest = re(&IF, r"(?i)^if\s+(.+)$").captures(orig)?.get(1)?.as_str();

    let (cond_text, action) = split_cond_action(rest)?;
    let cond = condition_of_orig(&cond_text)?;

    Some(Stmt::If {
        cond,
        then_body: vec![parse_action(&action)],
        elif_branches: Vec::new(),
        else_body: None,
    })
}

fn rule_while(norm: &str, orig: &str) -> Option<Stmt> {
    if !norm.starts_with("while ") {
        return None;
    }
    static WHILE: OnceLock<Regex> = OnceLock::new();
    let rest = re(&WHILE, r"(?i)^while\s+(.+)$")
        .captures(orig)?
        .get(1)?
        .as_str();

    static DO: OnceLock<Regex> = OnceLock::new();
    let (cond_text, action) = match re(&DO, r"(?i)\bdo\b").find(rest) {
        Some(m) if m.start() > 0 && m.end() < rest.len() => (
            rest[..m.start()].trim().to_string(),
            rest[m.end()..].trim().to_string(),
        ),
        _ => split_cond_action(rest)?,
    };
    let cond = condition_of_orig(&cond_text)?;

    Some(Stmt::While {
        cond,
        body: vec![parse_action(&action)],
    })
}

fn rule_loop_body(norm: &str, orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    static ORIG: OnceLock<Regex> = OnceLock::new();
    let pattern = r"^(?:loop|repeat|for)\s+(.+?)\s+times\s+(?:and\s+|then\s+)?(.+)$";
    let caps = re(&CELL, pattern).captures(norm)?;

    // Count comes from the normalized text (number words already folded);
    // the body keeps the user's casing.
    let count = expr_of(&caps[1])?;
    let orig_pattern =
        r"(?i)^(?:loop|repeat|for)\s+(.+?)\s+times\s+(?:and\s+|then\s+)?(.+)$";
    let body_text = original_capture(&ORIG, orig_pattern, 2, orig, &caps[2]);

    Some(Stmt::ForRange {
        var: "i".to_string(),
        count,
        body: vec![parse_action(&body_text)],
    })
}

fn rule_loop_count(norm: &str, _orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let caps = re(&CELL, r"^(?:loop|repeat|for)\s+(.+?)\s+times$").captures(norm)?;
    let count = expr_of(&caps[1])?;

    // No body named: print the loop counter so the loop shows its work
    Some(Stmt::ForRange {
        var: "i".to_string(),
        count,
        body: vec![Stmt::Print(Expr::Ident("i".to_string()))],
    })
}

fn rule_list_create(norm: &str, _orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let pattern = r"^(?:create|make)\s+(?:a\s+)?list\s+(?:called\s+|named\s+)?([a-z_]\w*)(?:\s+(?:with|of|containing)\s+(.+))?$";
    let caps = re(&CELL, pattern).captures(norm)?;

    let items = caps
        .get(2)
        .map(|m| split_items(m.as_str()).iter().map(|s| classify_item(s)).collect())
        .unwrap_or_default();

    Some(Stmt::ListCreate {
        name: caps[1].to_string(),
        items,
    })
}

fn rule_dict_create(norm: &str, _orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    static PAIR: OnceLock<Regex> = OnceLock::new();
    let pattern = r"^(?:create|make)\s+(?:a\s+)?(?:dictionary|dict)\s+(?:called\s+|named\s+)?([a-z_]\w*)(?:\s+with\s+(.+))?$";
    let caps = re(&CELL, pattern).captures(norm)?;

    let pairs = caps
        .get(2)
        .map(|m| {
            split_items(m.as_str())
                .iter()
                .filter_map(|item| {
                    let pc = re(&PAIR, r"^(.+?)\s+(?:==|is|as|:)\s+(.+)$").captures(item)?;
                    Some((classify_item(&pc[1]), classify_item(&pc[2])))
                })
                .collect()
        })
        .unwrap_or_default();

    Some(Stmt::DictCreate {
        name: caps[1].to_string(),
        pairs,
    })
}

fn rule_sort(norm: &str, _orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let caps = re(&CELL, r"^sort\s+(?:the\s+)?(?:list\s+)?([a-z_]\w*)$").captures(norm)?;
    Some(Stmt::Sort {
        name: caps[1].to_string(),
    })
}

fn rule_append(norm: &str, _orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let pattern =
        r"^(?:add|append|push)\s+(.+?)\s+(?:to|onto|into)\s+(?:the\s+)?(?:list\s+)?([a-z_]\w*)$";
    let caps = re(&CELL, pattern).captures(norm)?;

    Some(Stmt::Append {
        name: caps[2].to_string(),
        value: classify_item(&caps[1]),
    })
}

fn rule_remove(norm: &str, _orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    let pattern =
        r"^(?:remove|delete)\s+(.+?)\s+from\s+(?:the\s+)?(?:list\s+)?([a-z_]\w*)$";
    let caps = re(&CELL, pattern).captures(norm)?;

    Some(Stmt::Remove {
        name: caps[2].to_string(),
        value: classify_item(&caps[1]),
    })
}

fn rule_aug_assign(norm: &str, _orig: &str) -> Option<Stmt> {
    static UP: OnceLock<Regex> = OnceLock::new();
    static DOWN: OnceLock<Regex> = OnceLock::new();

    let (caps, op) = match re(&UP, r"^(?:increase|increment)\s+([a-z_]\w*)(?:\s+by\s+(.+))?$")
        .captures(norm)
    {
        Some(c) => (c, BinOp::Add),
        None => {
            let c = re(
                &DOWN,
                r"^(?:decrease|decrement|reduce)\s+([a-z_]\w*)(?:\s+by\s+(.+))?$",
            )
            .captures(norm)?;
            (c, BinOp::Sub)
        }
    };

    let value = caps
        .get(2)
        .and_then(|m| expr_of(m.as_str()))
        .unwrap_or(Expr::Number("1".to_string()));

    Some(Stmt::AugAssign {
        name: caps[1].to_string(),
        op,
        value,
    })
}

fn rule_return(norm: &str, orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    static ORIG: OnceLock<Regex> = OnceLock::new();
    let pattern = r"^return(?:\s+(.+))?$";
    let caps = re(&CELL, pattern).captures(norm)?;

    let value = caps.get(1).map(|m| {
        let orig_rhs = original_capture(&ORIG, r"(?i)^return(?:\s+(.+))?$", 1, orig, m.as_str());
        value_or_literal(m.as_str(), &orig_rhs)
    });

    Some(Stmt::Return(value))
}

fn rule_assign(norm: &str, orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    static ORIG: OnceLock<Regex> = OnceLock::new();
    let pattern =
        r"^(?:set|let|make|create|define|store)\s+([a-z_]\w*)\s+(?:=|==|is|to|equals?|as)\s+(.+)$";
    let caps = re(&CELL, pattern).captures(norm)?;

    let orig_pattern = r"(?i)^(?:set|let|make|create|define|store)\s+[a-z_]\w*\s+(?:=|==|is|to|equals?|as)\s+(.+)$";
    let orig_rhs = original_capture(&ORIG, orig_pattern, 1, orig, &caps[2]);

    Some(Stmt::Assign {
        name: caps[1].to_string(),
        value: value_or_literal(&caps[2], &orig_rhs),
    })
}

fn rule_print(norm: &str, orig: &str) -> Option<Stmt> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    static ORIG: OnceLock<Regex> = OnceLock::new();
    let pattern = r"^(?:print|show|display|output|say|echo|log|write)\s+(.+)$";
    let caps = re(&CELL, pattern).captures(norm)?;
    let rest_norm = &caps[1];

    let orig_pattern = r"(?i)^(?:print|show|display|output|say|echo|log|write)\s+(.+)$";
    let rest_orig = original_capture(&ORIG, orig_pattern, 1, orig, rest_norm);

    // Identifier/string disambiguation: a numeric rest prints a number, a
    // parsed non-identifier expression prints as-is, a bare lowercase word
    // prints the variable, and anything else prints the original-cased
    // literal text.
    let stmt = match expr_of(rest_norm) {
        Some(Expr::Ident(name)) => {
            if is_plain_lower_word(&rest_orig) {
                Stmt::Print(Expr::Ident(name))
            } else {
                Stmt::Print(Expr::Str(rest_orig))
            }
        }
        Some(expr) => Stmt::Print(expr),
        None => Stmt::Print(Expr::Str(rest_orig)),
    };

    Some(stmt)
}

fn rule_bare_expr(norm: &str, orig: &str) -> Option<Stmt> {
    match expr_of(norm)? {
        // A bare name only reads as a variable when the original is a
        // plain lowercase word; "Hello" falls through to the literal print
        Expr::Ident(name) => {
            if is_plain_lower_word(orig.trim()) {
                Some(Stmt::ExprStmt(Expr::Ident(name)))
            } else {
                None
            }
        }
        expr => Some(Stmt::ExprStmt(expr)),
    }
}
