//! Python code generator
//!
//! Walks statement trees and accumulates Python 3 source plus the feedback
//! that travels with it: per-statement provenance mappings, alternative
//! renderings, follow-up suggestions, concept tags and a confidence level.
//! Generation is infallible; every statement the frontend can build has a
//! rendering here.

use std::collections::BTreeSet;

use crate::feedback::{Alternative, ConceptTag, Confidence, Mapping};
use crate::frontend::ast::{BinOp, Expr, Segment, Stmt, UnOp};

const INDENT: &str = "    ";

/// Render an expression as Python source
pub fn expr_py(expr: &Expr) -> String {
    render_expr(expr, 0)
}

/// Precedence-aware rendering: parenthesize whenever this node binds
/// looser than its context requires.
fn render_expr(expr: &Expr, min_bp: u8) -> String {
    match expr {
        Expr::Number(n) => n.clone(),
        Expr::Ident(name) => name.clone(),
        Expr::Str(s) => format!("\"{}\"", escape_str(s)),
        Expr::Bool(true) => "True".to_string(),
        Expr::Bool(false) => "False".to_string(),
        Expr::NoneLit => "None".to_string(),

        Expr::Unary { op, operand } => match op {
            UnOp::Neg => format!("-{}", render_expr(operand, 50)),
            UnOp::Pos => format!("+{}", render_expr(operand, 50)),
            UnOp::Not => format!("not {}", render_expr(operand, 30)),
        },

        Expr::Binary { left, op, right } => {
            let bp = op.precedence();
            // Power folds to the right, everything else to the left
            let (left_bp, right_bp) = if *op == BinOp::Pow {
                (bp + 1, bp)
            } else {
                (bp, bp + 1)
            };
            let text = format!(
                "{} {} {}",
                render_expr(left, left_bp),
                op.py(),
                render_expr(right, right_bp)
            );
            if bp < min_bp {
                format!("({})", text)
            } else {
                text
            }
        }

        Expr::Call { name, args } => {
            let args: Vec<String> = args.iter().map(|a| render_expr(a, 0)).collect();
            format!("{}({})", name, args.join(", "))
        }

        Expr::Index { target, index } => {
            format!("{}[{}]", render_expr(target, 100), render_expr(index, 0))
        }

        Expr::List(items) => {
            let items: Vec<String> = items.iter().map(|i| render_expr(i, 0)).collect();
            format!("[{}]", items.join(", "))
        }

        Expr::Dict(pairs) => {
            let pairs: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("{}: {}", render_expr(k, 0), render_expr(v, 0)))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }

        Expr::FString(segments) => {
            let mut body = String::new();
            for segment in segments {
                match segment {
                    Segment::Text(text) => {
                        body.push_str(&escape_str(text).replace('{', "{{").replace('}', "}}"));
                    }
                    Segment::Expr(e) => {
                        body.push('{');
                        body.push_str(&render_expr(e, 0));
                        body.push('}');
                    }
                }
            }
            format!("f\"{}\"", body)
        }
    }
}

fn escape_str(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Statement-level code generator and feedback accumulator
pub struct PyGen {
    lines: Vec<String>,
    pub mappings: Vec<Mapping>,
    pub alternatives: Vec<Alternative>,
    pub suggestions: Vec<String>,
    pub concepts: BTreeSet<ConceptTag>,
    pub confidence: Confidence,
}

impl Default for PyGen {
    fn default() -> Self {
        Self::new()
    }
}

impl PyGen {
    pub fn new() -> Self {
        PyGen {
            lines: Vec::new(),
            mappings: Vec::new(),
            alternatives: Vec::new(),
            suggestions: Vec::new(),
            concepts: BTreeSet::new(),
            confidence: Confidence::High,
        }
    }

    /// Emit one top-level statement, mapped to its verbatim source line
    pub fn emit(&mut self, stmt: &Stmt, source: &str) {
        self.emit_stmt(stmt, source, 0);
    }

    /// Emit an auto-detected import. Synthetic provenance: the mapping
    /// carries line number 0 because no input phrase asked for it.
    pub fn emit_auto_import(&mut self, module: &str) {
        self.lines.push(format!("import {}", module));
        self.mappings.push(Mapping {
            source_phrase: format!("(uses {} functions)", module),
            generated_fragment: format!("import {}", module),
            line_number: 0,
            explanation: format!(
                "import {} was added automatically because the code uses it",
                module
            ),
            educational_note: None,
        });
    }

    /// True when `import module` is already in the output
    pub fn has_import(&self, module: &str) -> bool {
        let line = format!("import {}", module);
        self.lines.iter().any(|l| l == &line)
    }

    /// Lower the overall confidence; it is never raised back
    pub fn lower_confidence(&mut self, level: Confidence) {
        self.confidence = self.confidence.min(level);
    }

    /// The generated source
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }

    fn push_line(&mut self, indent: usize, text: String) -> usize {
        self.lines.push(format!("{}{}", INDENT.repeat(indent), text));
        self.lines.len()
    }

    fn map(&mut self, phrase: &str, fragment: &str, line: usize, explanation: &str) {
        self.mappings.push(Mapping {
            source_phrase: phrase.to_string(),
            generated_fragment: fragment.to_string(),
            line_number: line,
            explanation: explanation.to_string(),
            educational_note: None,
        });
    }

    fn map_with_note(
        &mut self,
        phrase: &str,
        fragment: &str,
        line: usize,
        explanation: &str,
        note: &str,
    ) {
        self.mappings.push(Mapping {
            source_phrase: phrase.to_string(),
            generated_fragment: fragment.to_string(),
            line_number: line,
            explanation: explanation.to_string(),
            educational_note: Some(note.to_string()),
        });
    }

    fn emit_body(&mut self, body: &[Stmt], indent: usize) {
        if body.is_empty() {
            self.push_line(indent, "pass".to_string());
            return;
        }
        for stmt in body {
            let phrase = phrase_of(stmt);
            self.emit_stmt(stmt, &phrase, indent);
        }
    }

    fn emit_stmt(&mut self, stmt: &Stmt, phrase: &str, indent: usize) {
        match stmt {
            Stmt::Assign { name, value } => {
                self.concepts.insert(ConceptTag::Variables);
                self.collect_expr_concepts(value);
                let text = format!("{} = {}", name, expr_py(value));
                let line = self.push_line(indent, text.clone());
                self.map(phrase, &text, line, "= stores a value in a variable");
            }

            Stmt::AugAssign { name, op, value } => {
                self.concepts.insert(ConceptTag::Variables);
                self.concepts.insert(ConceptTag::Math);
                self.collect_expr_concepts(value);
                let text = format!("{} {}= {}", name, op.py(), expr_py(value));
                let line = self.push_line(indent, text.clone());
                let explanation = match op {
                    BinOp::Add => "+= grows a variable in place",
                    BinOp::Sub => "-= shrinks a variable in place",
                    _ => "an augmented assignment updates a variable in place",
                };
                self.map(phrase, &text, line, explanation);
            }

            Stmt::Print(value) => {
                self.concepts.insert(ConceptTag::Print);
                self.collect_expr_concepts(value);
                let text = format!("print({})", expr_py(value));
                let line = self.push_line(indent, text.clone());
                self.map(phrase, &text, line, "print() writes a value to the screen");

                // A literal print at top level gets a named-variable variant;
                // an interpolated print gets the concatenation spelling
                if indent == 0 {
                    match value {
                        Expr::Str(s) => {
                            self.alternatives.push(Alternative {
                                description: "Store the message in a variable first".to_string(),
                                code: format!(
                                    "message = \"{}\"\nprint(message)",
                                    escape_str(s)
                                ),
                                reason:
                                    "a named variable lets you reuse or change the message later"
                                        .to_string(),
                            });
                        }
                        Expr::FString(segments) => {
                            let parts: Vec<String> = segments
                                .iter()
                                .map(|segment| match segment {
                                    Segment::Text(t) => format!("\"{}\"", escape_str(t)),
                                    Segment::Expr(e) => render_expr(e, 100),
                                })
                                .collect();
                            self.alternatives.push(Alternative {
                                description: "Join the pieces with +".to_string(),
                                code: format!("print({})", parts.join(" + ")),
                                reason: "string concatenation works too, but every piece must already be a string"
                                    .to_string(),
                            });
                        }
                        _ => {}
                    }
                }
            }

            Stmt::If {
                cond,
                then_body,
                elif_branches,
                else_body,
            } => {
                self.concepts.insert(ConceptTag::Conditions);
                self.collect_expr_concepts(cond);
                let header = format!("if {}:", expr_py(cond));
                let line = self.push_line(indent, header.clone());
                self.map(
                    phrase,
                    &header,
                    line,
                    "if runs the indented block only when the condition is true",
                );
                self.emit_body(then_body, indent + 1);

                for (elif_cond, elif_body) in elif_branches {
                    self.collect_expr_concepts(elif_cond);
                    let header = format!("elif {}:", expr_py(elif_cond));
                    let line = self.push_line(indent, header.clone());
                    self.map(
                        &format!("else if {}", expr_py(elif_cond)),
                        &header,
                        line,
                        "elif checks another condition when the ones above were false",
                    );
                    self.emit_body(elif_body, indent + 1);
                }

                if let Some(else_body) = else_body {
                    let line = self.push_line(indent, "else:".to_string());
                    self.map(
                        "else",
                        "else:",
                        line,
                        "else runs when no condition above was true",
                    );
                    self.emit_body(else_body, indent + 1);
                }
            }

            Stmt::ForRange { var, count, body } => {
                self.concepts.insert(ConceptTag::Loops);
                self.collect_expr_concepts(count);
                let count_py = expr_py(count);
                let header = format!("for {} in range({}):", var, count_py);
                let line = self.push_line(indent, header.clone());
                self.map_with_note(
                    phrase,
                    &header,
                    line,
                    "for ... in range(n) repeats the block n times",
                    "range(5) counts 0, 1, 2, 3, 4",
                );
                self.emit_body(body, indent + 1);

                if indent == 0 {
                    self.alternatives.push(Alternative {
                        description: "Use a while loop instead".to_string(),
                        code: format!(
                            "{var} = 0\nwhile {var} < {count}:\n    ...\n    {var} += 1",
                            var = var,
                            count = count_py
                        ),
                        reason: "while gives you manual control over the counter".to_string(),
                    });
                }
            }

            Stmt::While { cond, body } => {
                self.concepts.insert(ConceptTag::Loops);
                self.collect_expr_concepts(cond);
                let header = format!("while {}:", expr_py(cond));
                let line = self.push_line(indent, header.clone());
                self.map_with_note(
                    phrase,
                    &header,
                    line,
                    "while repeats the block as long as the condition stays true",
                    "something in the block must move the condition toward false, or the loop never ends",
                );
                self.emit_body(body, indent + 1);
            }

            Stmt::FunctionDef { name, params, body } => {
                self.concepts.insert(ConceptTag::Functions);
                let header = format!("def {}({}):", name, params.join(", "));
                let line = self.push_line(indent, header.clone());
                self.map(
                    phrase,
                    &header,
                    line,
                    "def names a reusable block of code",
                );
                self.emit_body(body, indent + 1);
            }

            Stmt::Return(value) => {
                self.concepts.insert(ConceptTag::Functions);
                let text = match value {
                    Some(v) => {
                        self.collect_expr_concepts(v);
                        format!("return {}", expr_py(v))
                    }
                    None => "return".to_string(),
                };
                let line = self.push_line(indent, text.clone());
                self.map(phrase, &text, line, "return sends a value back to the caller");
            }

            Stmt::ExprStmt(value) => {
                self.collect_expr_concepts(value);
                let text = expr_py(value);
                let line = self.push_line(indent, text.clone());
                self.map(
                    phrase,
                    &text,
                    line,
                    "a bare expression is evaluated where it stands",
                );
            }

            Stmt::ListCreate { name, items } => {
                self.concepts.insert(ConceptTag::Lists);
                self.concepts.insert(ConceptTag::Variables);
                for item in items {
                    self.collect_expr_concepts(item);
                }
                let rendered: Vec<String> = items.iter().map(expr_py).collect();
                let text = format!("{} = [{}]", name, rendered.join(", "));
                let line = self.push_line(indent, text.clone());
                self.map(phrase, &text, line, "[...] builds a list of values in order");
            }

            Stmt::DictCreate { name, pairs } => {
                self.concepts.insert(ConceptTag::Lists);
                self.concepts.insert(ConceptTag::Variables);
                let rendered: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", expr_py(k), expr_py(v)))
                    .collect();
                let text = format!("{} = {{{}}}", name, rendered.join(", "));
                let line = self.push_line(indent, text.clone());
                self.map(
                    phrase,
                    &text,
                    line,
                    "{key: value} builds a dictionary for looking things up by name",
                );
            }

            Stmt::Sort { name } => {
                self.concepts.insert(ConceptTag::Lists);
                let text = format!("{}.sort()", name);
                let line = self.push_line(indent, text.clone());
                self.map(
                    phrase,
                    &text,
                    line,
                    ".sort() reorders the list in place, smallest first",
                );
                if indent == 0 {
                    self.alternatives.push(Alternative {
                        description: "Keep the original list unchanged".to_string(),
                        code: format!("{name}_sorted = sorted({name})", name = name),
                        reason: "sorted() returns a new sorted list instead of reordering this one"
                            .to_string(),
                    });
                }
            }

            Stmt::Append { name, value } => {
                self.concepts.insert(ConceptTag::Lists);
                self.collect_expr_concepts(value);
                let text = format!("{}.append({})", name, expr_py(value));
                let line = self.push_line(indent, text.clone());
                self.map(
                    phrase,
                    &text,
                    line,
                    ".append() adds a value to the end of the list",
                );
            }

            Stmt::Remove { name, value } => {
                self.concepts.insert(ConceptTag::Lists);
                self.collect_expr_concepts(value);
                let text = format!("{}.remove({})", name, expr_py(value));
                let line = self.push_line(indent, text.clone());
                self.map(
                    phrase,
                    &text,
                    line,
                    ".remove() deletes the first matching value from the list",
                );
            }

            Stmt::Import { module } => {
                let text = format!("import {}", module);
                let line = self.push_line(indent, text.clone());
                self.map(
                    phrase,
                    &text,
                    line,
                    "import makes a library's functions available",
                );
            }

            Stmt::Input { name, prompt } => {
                self.concepts.insert(ConceptTag::Variables);
                let text = format!("{} = input(\"{}\")", name, escape_str(prompt));
                let line = self.push_line(indent, text.clone());
                self.map_with_note(
                    phrase,
                    &text,
                    line,
                    "input() pauses and reads a line typed by the user",
                    "input() always returns a string; wrap it in int() when you need a number",
                );
            }

            Stmt::Comment(text) => {
                let rendered = format!("# {}", text);
                let line = self.push_line(indent, rendered.clone());
                self.map(
                    phrase,
                    &rendered,
                    line,
                    "a # line is a note for people; Python ignores it",
                );
            }

            Stmt::Pass => {
                let line = self.push_line(indent, "pass".to_string());
                self.map(phrase, "pass", line, "pass is a placeholder that does nothing");
            }

            Stmt::Clarify {
                original,
                explanation,
                questions,
            } => {
                self.lower_confidence(Confidence::Low);
                let text = format!("# Could not translate: {}", original);
                let line = self.push_line(indent, text.clone());
                self.map(original, &text, line, explanation);
                self.suggestions.extend(questions.iter().cloned());
            }
        }
    }

    fn collect_expr_concepts(&mut self, expr: &Expr) {
        match expr {
            Expr::Binary { left, op, right } => {
                if op.is_math() {
                    self.concepts.insert(ConceptTag::Math);
                }
                self.collect_expr_concepts(left);
                self.collect_expr_concepts(right);
            }
            Expr::Unary { op, operand } => {
                if matches!(op, UnOp::Neg | UnOp::Pos) {
                    self.concepts.insert(ConceptTag::Math);
                }
                self.collect_expr_concepts(operand);
            }
            Expr::Call { name, args } => {
                if name.starts_with("math.") || name == "abs" || name == "round" {
                    self.concepts.insert(ConceptTag::Math);
                }
                for arg in args {
                    self.collect_expr_concepts(arg);
                }
            }
            Expr::Index { target, index } => {
                self.concepts.insert(ConceptTag::Lists);
                self.collect_expr_concepts(target);
                self.collect_expr_concepts(index);
            }
            Expr::List(items) => {
                self.concepts.insert(ConceptTag::Lists);
                for item in items {
                    self.collect_expr_concepts(item);
                }
            }
            Expr::Dict(pairs) => {
                self.concepts.insert(ConceptTag::Lists);
                for (k, v) in pairs {
                    self.collect_expr_concepts(k);
                    self.collect_expr_concepts(v);
                }
            }
            Expr::FString(segments) => {
                for segment in segments {
                    if let Segment::Expr(e) = segment {
                        self.collect_expr_concepts(e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Reconstruct an English-ish phrase for a nested statement whose original
/// wording was consumed by an enclosing rule.
fn phrase_of(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Print(Expr::Str(s)) => format!("print {}", s),
        Stmt::Print(value) => format!("print {}", expr_py(value)),
        Stmt::Assign { name, value } => format!("set {} to {}", name, expr_py(value)),
        Stmt::AugAssign {
            name,
            op: BinOp::Sub,
            value,
        } => format!("decrease {} by {}", name, expr_py(value)),
        Stmt::AugAssign { name, value, .. } => {
            format!("increase {} by {}", name, expr_py(value))
        }
        Stmt::Return(Some(value)) => format!("return {}", expr_py(value)),
        Stmt::Return(None) => "return".to_string(),
        Stmt::Append { name, value } => format!("add {} to {}", expr_py(value), name),
        Stmt::Remove { name, value } => format!("remove {} from {}", expr_py(value), name),
        Stmt::Sort { name } => format!("sort {}", name),
        Stmt::Input { name, .. } => format!("ask the user for {}", name),
        Stmt::Pass => "do nothing".to_string(),
        Stmt::If { cond, .. } => format!("if {}", expr_py(cond)),
        Stmt::While { cond, .. } => format!("while {}", expr_py(cond)),
        Stmt::ForRange { count, .. } => format!("loop {} times", expr_py(count)),
        Stmt::ListCreate { name, .. } => format!("create a list called {}", name),
        Stmt::DictCreate { name, .. } => format!("create a dictionary called {}", name),
        Stmt::FunctionDef { name, .. } => format!("define a function called {}", name),
        Stmt::Import { module } => format!("import {}", module),
        Stmt::ExprStmt(value) => expr_py(value),
        Stmt::Comment(text) => text.clone(),
        Stmt::Clarify { original, .. } => original.clone(),
    }
}

/// One beginner-friendly sentence (no trailing period) per statement, used
/// to assemble the overall explanation.
pub fn summary(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Print(Expr::Str(s)) => format!("Prints the text \"{}\"", s),
        Stmt::Print(Expr::FString(_)) => "Prints a message built from a variable".to_string(),
        Stmt::Print(value) => format!("Prints the value of {}", expr_py(value)),
        Stmt::Assign { name, value } => {
            format!("Stores {} in the variable {}", expr_py(value), name)
        }
        Stmt::AugAssign {
            name,
            op: BinOp::Sub,
            value,
        } => format!("Decreases {} by {}", name, expr_py(value)),
        Stmt::AugAssign { name, value, .. } => {
            format!("Increases {} by {}", name, expr_py(value))
        }
        Stmt::If { cond, else_body, .. } => {
            if else_body.is_some() {
                format!("Checks whether {} and picks a branch", expr_py(cond))
            } else {
                format!("Checks whether {}", expr_py(cond))
            }
        }
        Stmt::ForRange { count, .. } => format!("Repeats a block {} times", expr_py(count)),
        Stmt::While { cond, .. } => format!("Repeats while {}", expr_py(cond)),
        Stmt::FunctionDef { name, params, .. } => {
            format!("Defines the function {}({})", name, params.join(", "))
        }
        Stmt::Return(Some(value)) => format!("Returns {}", expr_py(value)),
        Stmt::Return(None) => "Returns from the function".to_string(),
        Stmt::ExprStmt(value) => format!("Evaluates {}", expr_py(value)),
        Stmt::ListCreate { name, items } => {
            format!("Creates the list {} with {} items", name, items.len())
        }
        Stmt::DictCreate { name, .. } => format!("Creates the dictionary {}", name),
        Stmt::Sort { name } => format!("Sorts the list {} in place", name),
        Stmt::Append { name, value } => format!("Adds {} to {}", expr_py(value), name),
        Stmt::Remove { name, value } => format!("Removes {} from {}", expr_py(value), name),
        Stmt::Import { module } => format!("Imports the {} module", module),
        Stmt::Input { name, .. } => format!("Asks the user to type in {}", name),
        Stmt::Comment(_) => "Keeps a note in the code".to_string(),
        Stmt::Pass => "Does nothing yet".to_string(),
        Stmt::Clarify { .. } => "Needs more detail before it can be translated".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::rules::parse_line;
    use pretty_assertions::assert_eq;

    fn gen_one(line: &str) -> (String, PyGen) {
        let stmt = parse_line(line);
        let mut py = PyGen::new();
        py.emit(&stmt, line);
        let code = py.lines.join("\n");
        (code, py)
    }

    #[test]
    fn test_expr_precedence_parens() {
        let e = parse_line("set x to 10 plus 5 times 2");
        if let Stmt::Assign { value, .. } = e {
            assert_eq!(expr_py(&value), "10 + 5 * 2");
        } else {
            panic!("expected assignment");
        }
    }

    #[test]
    fn test_parens_preserved_when_needed() {
        use crate::frontend::ast::{BinOp, Expr};
        // (10 + 5) * 2 must keep its parentheses
        let expr = Expr::Binary {
            left: Box::new(Expr::Binary {
                left: Box::new(Expr::Number("10".to_string())),
                op: BinOp::Add,
                right: Box::new(Expr::Number("5".to_string())),
            }),
            op: BinOp::Mul,
            right: Box::new(Expr::Number("2".to_string())),
        };
        assert_eq!(expr_py(&expr), "(10 + 5) * 2");
    }

    #[test]
    fn test_power_renders_right_associative() {
        use crate::frontend::ast::{BinOp, Expr};
        let expr = Expr::Binary {
            left: Box::new(Expr::Number("2".to_string())),
            op: BinOp::Pow,
            right: Box::new(Expr::Binary {
                left: Box::new(Expr::Number("3".to_string())),
                op: BinOp::Pow,
                right: Box::new(Expr::Number("2".to_string())),
            }),
        };
        // Python's ** is right-associative, so no parentheses needed
        assert_eq!(expr_py(&expr), "2 ** 3 ** 2");
    }

    #[test]
    fn test_print_literal() {
        let (code, py) = gen_one("print Hello World");
        assert_eq!(code, "print(\"Hello World\")");
        assert_eq!(py.mappings.len(), 1);
        assert_eq!(py.mappings[0].line_number, 1);
        assert!(py.concepts.contains(&ConceptTag::Print));
    }

    #[test]
    fn test_if_block_layout() {
        let (code, py) =
            gen_one("if score is greater than 90 print Excellent else print Keep trying");
        assert_eq!(
            code,
            "if score > 90:\n    print(\"Excellent\")\nelse:\n    print(\"Keep trying\")"
        );
        // Header, then-body, else, else-body all mapped with real line numbers
        let lines: Vec<usize> = py.mappings.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
        assert!(py.concepts.contains(&ConceptTag::Conditions));
    }

    #[test]
    fn test_loop_layout_and_note() {
        let (code, py) = gen_one("loop 5 times and print Hi");
        assert_eq!(code, "for i in range(5):\n    print(\"Hi\")");
        assert!(py.mappings[0]
            .educational_note
            .as_deref()
            .is_some_and(|n| n.contains("range(5)")));
        assert!(py.concepts.contains(&ConceptTag::Loops));
    }

    #[test]
    fn test_sort_offers_sorted_alternative() {
        let (code, py) = gen_one("sort the list nums");
        assert_eq!(code, "nums.sort()");
        assert_eq!(py.alternatives.len(), 1);
        assert!(py.alternatives[0].code.contains("sorted(nums)"));
    }

    #[test]
    fn test_function_def_layout() {
        let (code, _) = gen_one("define function called add taking a and b that return a plus b");
        assert_eq!(code, "def add(a, b):\n    return a + b");
    }

    #[test]
    fn test_fstring_rendering() {
        let (code, _) = gen_one("greet name");
        assert_eq!(code, "print(f\"Hello, {name}!\")");
    }

    #[test]
    fn test_clarify_lowers_confidence_and_suggests() {
        let (code, py) = gen_one("make it faster");
        assert!(code.starts_with("# Could not translate:"));
        assert_eq!(py.confidence, Confidence::Low);
        assert!(!py.suggestions.is_empty());
    }

    #[test]
    fn test_string_escaping() {
        use crate::frontend::ast::Expr;
        assert_eq!(
            expr_py(&Expr::Str("say \"hi\"".to_string())),
            "\"say \\\"hi\\\"\""
        );
    }
}
