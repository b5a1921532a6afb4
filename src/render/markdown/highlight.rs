//! Token highlighting for fenced code.
//!
//! Two language families are recognized. Code is first cut into pieces:
//! string and comment literals (leftmost match wins, contents never looked
//! at again), identifier-like words, and single other characters. Words are
//! then classified with a little lookahead for definitions, calls and
//! decorators.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    Keyword,
    Function,
    Class,
    Builtin,
    Number,
    Decorator,
    String,
    Comment,
}

impl HighlightClass {
    /// CSS class name used in the HTML output.
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightClass::Keyword => "keyword",
            HighlightClass::Function => "function",
            HighlightClass::Class => "class",
            HighlightClass::Builtin => "builtin",
            HighlightClass::Number => "number",
            HighlightClass::Decorator => "decorator",
            HighlightClass::String => "string",
            HighlightClass::Comment => "comment",
        }
    }
}

impl fmt::Display for HighlightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeToken {
    pub text: String,
    pub class: Option<HighlightClass>,
}

impl CodeToken {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    fn marked(text: impl Into<String>, class: HighlightClass) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFamily {
    Python,
    /// C-style / ECMAScript languages.
    Script,
}

impl LanguageFamily {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Some(LanguageFamily::Python),
            "javascript" | "js" | "jsx" | "typescript" | "ts" | "tsx" => {
                Some(LanguageFamily::Script)
            }
            _ => None,
        }
    }

    fn rules(self) -> &'static FamilyRules {
        match self {
            LanguageFamily::Python => &PYTHON,
            LanguageFamily::Script => &SCRIPT,
        }
    }
}

struct FamilyRules {
    keywords: &'static [&'static str],
    builtins: &'static [&'static str],
    /// Keyword → class given to the identifier that follows it.
    definitions: &'static [(&'static str, HighlightClass)],
    decorators: bool,
    literals: &'static [Literal],
}

impl FamilyRules {
    fn is_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| *k == word)
    }

    fn is_builtin(&self, word: &str) -> bool {
        self.builtins.iter().any(|b| *b == word)
    }
}

#[derive(Clone, Copy)]
enum Literal {
    /// `open ... close`, may span lines.
    Delimited {
        open: &'static str,
        close: &'static str,
        class: HighlightClass,
    },
    /// `open` to the end of the line.
    LineComment { open: &'static str },
}

static PYTHON: FamilyRules = FamilyRules {
    keywords: &[
        "def", "class", "if", "elif", "else", "for", "while", "try", "except", "finally", "with",
        "import", "from", "as", "return", "yield", "lambda", "and", "or", "not", "in", "is",
        "True", "False", "None", "break", "continue", "pass", "global", "nonlocal", "raise",
        "assert", "del", "async", "await",
    ],
    builtins: &[
        "print", "len", "str", "int", "float", "list", "dict", "tuple", "set", "range",
        "enumerate", "zip", "map", "filter", "sorted", "max", "min", "sum", "abs", "round",
        "type", "isinstance", "hasattr", "getattr", "setattr", "open", "input", "any", "all",
        "reversed",
    ],
    definitions: &[
        ("def", HighlightClass::Function),
        ("class", HighlightClass::Class),
    ],
    decorators: true,
    literals: &[
        Literal::Delimited {
            open: "\"\"\"",
            close: "\"\"\"",
            class: HighlightClass::String,
        },
        Literal::Delimited {
            open: "'''",
            close: "'''",
            class: HighlightClass::String,
        },
        Literal::Delimited {
            open: "\"",
            close: "\"",
            class: HighlightClass::String,
        },
        Literal::Delimited {
            open: "'",
            close: "'",
            class: HighlightClass::String,
        },
        Literal::LineComment { open: "#" },
    ],
};

static SCRIPT: FamilyRules = FamilyRules {
    keywords: &[
        "function", "const", "let", "var", "if", "else", "for", "while", "do", "switch", "case",
        "break", "continue", "return", "try", "catch", "finally", "throw", "class", "extends",
        "import", "export", "from", "default", "async", "await", "true", "false", "null",
        "undefined", "typeof", "instanceof", "new", "this", "super", "of", "delete", "void",
        "yield", "static",
    ],
    builtins: &[
        "parseInt",
        "parseFloat",
        "isNaN",
        "isFinite",
        "setTimeout",
        "setInterval",
        "clearTimeout",
        "clearInterval",
        "fetch",
        "require",
        "alert",
    ],
    definitions: &[("function", HighlightClass::Function)],
    decorators: false,
    literals: &[
        Literal::Delimited {
            open: "/*",
            close: "*/",
            class: HighlightClass::Comment,
        },
        Literal::LineComment { open: "//" },
        Literal::Delimited {
            open: "`",
            close: "`",
            class: HighlightClass::String,
        },
        Literal::Delimited {
            open: "\"",
            close: "\"",
            class: HighlightClass::String,
        },
        Literal::Delimited {
            open: "'",
            close: "'",
            class: HighlightClass::String,
        },
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PieceKind {
    Literal(HighlightClass),
    Word,
    Other,
}

#[derive(Debug, Clone, Copy)]
struct Piece<'a> {
    text: &'a str,
    kind: PieceKind,
}

impl Piece<'_> {
    fn is_char(&self, c: char) -> bool {
        self.kind == PieceKind::Other && self.text.len() == c.len_utf8() && self.text.starts_with(c)
    }

    fn is_whitespace(&self) -> bool {
        self.kind == PieceKind::Other && self.text.chars().all(char::is_whitespace)
    }

    fn is_word(&self) -> bool {
        self.kind == PieceKind::Word
    }

    fn is_digits(&self) -> bool {
        self.is_word() && self.text.bytes().all(|b| b.is_ascii_digit())
    }

    fn starts_identifier(&self) -> bool {
        self.is_word()
            && self
                .text
                .bytes()
                .next()
                .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Highlight `code` for a language tag, or `None` when the tag names no
/// recognized family.
pub fn highlight_code(lang: &str, code: &str) -> Option<Vec<CodeToken>> {
    LanguageFamily::from_tag(lang).map(|family| highlight(code, family))
}

pub fn highlight(code: &str, family: LanguageFamily) -> Vec<CodeToken> {
    let rules = family.rules();
    let pieces = split_pieces(code, rules);
    classify(&pieces, rules)
}

fn split_pieces<'a>(code: &'a str, rules: &FamilyRules) -> Vec<Piece<'a>> {
    let bytes = code.as_bytes();
    let mut pieces = Vec::new();
    let mut pos = 0;

    while pos < code.len() {
        let rest = &code[pos..];

        if let Some((len, class)) = match_literal(rest, rules.literals) {
            pieces.push(Piece {
                text: &rest[..len],
                kind: PieceKind::Literal(class),
            });
            pos += len;
            continue;
        }

        if is_word_byte(bytes[pos]) {
            let len = rest.bytes().take_while(|b| is_word_byte(*b)).count();
            pieces.push(Piece {
                text: &rest[..len],
                kind: PieceKind::Word,
            });
            pos += len;
            continue;
        }

        let len = rest.chars().next().map_or(1, char::len_utf8);
        pieces.push(Piece {
            text: &rest[..len],
            kind: PieceKind::Other,
        });
        pos += len;
    }

    pieces
}

/// First literal alternative that matches at the start of `text`.
fn match_literal(text: &str, literals: &[Literal]) -> Option<(usize, HighlightClass)> {
    literals.iter().find_map(|literal| match *literal {
        Literal::Delimited { open, close, class } => {
            let body = text.strip_prefix(open)?;
            let end = body.find(close)?;
            Some((open.len() + end + close.len(), class))
        }
        Literal::LineComment { open } => {
            if !text.starts_with(open) {
                return None;
            }
            let len = text.find('\n').unwrap_or(text.len());
            Some((len, HighlightClass::Comment))
        }
    })
}

fn classify(pieces: &[Piece<'_>], rules: &FamilyRules) -> Vec<CodeToken> {
    let mut tokens: Vec<CodeToken> = Vec::with_capacity(pieces.len());
    let is_keyword = |piece: &Piece<'_>| piece.is_word() && rules.is_keyword(piece.text);
    let whitespace_run = |from: usize| {
        pieces[from.min(pieces.len())..]
            .iter()
            .take_while(|p| p.is_whitespace())
            .count()
    };
    let is_call = |index: usize| {
        let next = index + 1 + whitespace_run(index + 1);
        pieces.get(next).is_some_and(|p| p.is_char('('))
    };

    let mut i = 0;
    while i < pieces.len() {
        let piece = pieces[i];
        match piece.kind {
            PieceKind::Literal(class) => {
                push(CodeToken::marked(piece.text, class), &mut tokens);
                i += 1;
            }
            PieceKind::Word if is_keyword(&piece) => {
                push(CodeToken::marked(piece.text, HighlightClass::Keyword), &mut tokens);
                i += 1;

                let definition = rules
                    .definitions
                    .iter()
                    .find(|(keyword, _)| *keyword == piece.text);
                if let Some((_, class)) = definition {
                    let gap = whitespace_run(i);
                    if let Some(name) = pieces.get(i + gap) {
                        if gap > 0 && name.starts_identifier() && !is_keyword(name) {
                            push(CodeToken::plain(" "), &mut tokens);
                            push(CodeToken::marked(name.text, *class), &mut tokens);
                            i += gap + 1;
                        }
                    }
                }
            }
            PieceKind::Word if rules.is_builtin(piece.text) && is_call(i) => {
                push(CodeToken::marked(piece.text, HighlightClass::Builtin), &mut tokens);
                i += 1;
            }
            PieceKind::Word if piece.is_digits() => {
                let (len, consumed) = number_extent(pieces, i);
                let text: String = pieces[i..i + consumed]
                    .iter()
                    .map(|p| p.text)
                    .collect::<String>();
                push(
                    CodeToken::marked(&text[..len], HighlightClass::Number),
                    &mut tokens,
                );
                i += consumed;
            }
            PieceKind::Other
                if rules.decorators
                    && piece.is_char('@')
                    && pieces.get(i + 1).is_some_and(|name| {
                        name.starts_identifier()
                            && !is_keyword(name)
                            && !(rules.is_builtin(name.text) && is_call(i + 1))
                    }) =>
            {
                let decorator = format!("@{}", pieces[i + 1].text);
                push(CodeToken::marked(decorator, HighlightClass::Decorator), &mut tokens);
                i += 2;
            }
            PieceKind::Word | PieceKind::Other => {
                push(CodeToken::plain(piece.text), &mut tokens);
                i += 1;
            }
        }
    }

    tokens
}

/// Adjacent unmarked text is merged into one token.
fn push(token: CodeToken, tokens: &mut Vec<CodeToken>) {
    match tokens.last_mut() {
        Some(last) if last.class.is_none() && token.class.is_none() => {
            last.text.push_str(&token.text);
        }
        _ => tokens.push(token),
    }
}

/// Extent of a numeric literal starting at an all-digit word.
///
/// Mirrors `\b\d+\.?\d*\b`: `1.5` is one number; `1.x` marks `1.` (the
/// boundary falls between `.` and `x`); `1.` before a space or the end
/// marks only `1`. Returns the marked byte length and how many pieces it
/// spans.
fn number_extent(pieces: &[Piece<'_>], start: usize) -> (usize, usize) {
    let int_len = pieces[start].text.len();
    if !pieces.get(start + 1).is_some_and(|p| p.is_char('.')) {
        return (int_len, 1);
    }
    match pieces.get(start + 2) {
        Some(fraction) if fraction.is_digits() => (int_len + 1 + fraction.text.len(), 3),
        Some(fraction) if fraction.is_word() => (int_len + 1, 2),
        _ => (int_len, 1),
    }
}
