//! Inline spans: code, strong and emphasis.
//!
//! Parsing works on a sequence of atoms, each either a single character or
//! an already-built node. Code spans become nodes first, so delimiters
//! inside them are invisible to the emphasis passes; each later pass only
//! pairs up the characters the earlier passes left behind.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
}

impl Inline {
    /// Text with all markup removed.
    pub fn plain_text(inlines: &[Inline]) -> String {
        let mut out = String::new();
        for inline in inlines {
            match inline {
                Inline::Text(text) | Inline::Code(text) => out.push_str(text),
                Inline::Strong(children) | Inline::Emphasis(children) => {
                    out.push_str(&Inline::plain_text(children));
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
enum Atom {
    Char(char),
    Node(Inline),
}

impl Atom {
    fn is(&self, c: char) -> bool {
        matches!(self, Atom::Char(ch) if *ch == c)
    }
}

pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let atoms = code_spans(text);
    let atoms = strong_pass(atoms, '*', |inner| italic_pass(strong_pass(inner, '_', italic_pass)));
    let atoms = strong_pass(atoms, '_', italic_pass);
    let atoms = italic_pass(atoms);
    into_inlines(atoms)
}

/// `` `code` `` with at least one character between the backticks.
fn code_spans(text: &str) -> Vec<Atom> {
    let chars: Vec<char> = text.chars().collect();
    let mut atoms = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '`' {
            if let Some(len) = chars[i + 1..].iter().position(|c| *c == '`') {
                if len > 0 {
                    let code: String = chars[i + 1..i + 1 + len].iter().collect();
                    atoms.push(Atom::Node(Inline::Code(code)));
                    i += len + 2;
                    continue;
                }
            }
        }
        atoms.push(Atom::Char(chars[i]));
        i += 1;
    }
    atoms
}

/// Pair doubled delimiters (`**x**`, `__x__`) left to right, shortest match
/// first, never across a line break. `inner` runs the remaining passes on
/// the enclosed atoms.
fn strong_pass(atoms: Vec<Atom>, delim: char, inner: fn(Vec<Atom>) -> Vec<Atom>) -> Vec<Atom> {
    let is_double = |i: usize| i + 1 < atoms.len() && atoms[i].is(delim) && atoms[i + 1].is(delim);

    let mut out = Vec::with_capacity(atoms.len());
    let mut i = 0;
    while i < atoms.len() {
        if is_double(i) {
            let close = (i + 2..atoms.len())
                .take_while(|&k| !atoms[k].is('\n'))
                .find(|&k| is_double(k));
            if let Some(close) = close {
                let children = inner(atoms[i + 2..close].to_vec());
                out.push(Atom::Node(Inline::Strong(into_inlines(children))));
                i = close + 2;
                continue;
            }
        }
        out.push(atoms[i].clone());
        i += 1;
    }
    out
}

/// `*x*` where neither asterisk touches another asterisk. Underscores are
/// never emphasis, which keeps `snake_case` intact.
fn italic_pass(atoms: Vec<Atom>) -> Vec<Atom> {
    let star = |i: usize| atoms.get(i).is_some_and(|a| a.is('*'));

    let mut out = Vec::with_capacity(atoms.len());
    let mut i = 0;
    while i < atoms.len() {
        let opens = star(i) && !(i > 0 && star(i - 1)) && !star(i + 1);
        if opens {
            let close = (i + 1..atoms.len()).find(|&k| star(k));
            if let Some(close) = close {
                if close > i + 1 && !star(close + 1) {
                    let children = atoms[i + 1..close].to_vec();
                    out.push(Atom::Node(Inline::Emphasis(into_inlines(children))));
                    i = close + 1;
                    continue;
                }
            }
        }
        out.push(atoms[i].clone());
        i += 1;
    }
    out
}

fn into_inlines(atoms: Vec<Atom>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut text = String::new();
    for atom in atoms {
        match atom {
            Atom::Char(c) => text.push(c),
            Atom::Node(node) => {
                if !text.is_empty() {
                    inlines.push(Inline::Text(std::mem::take(&mut text)));
                }
                inlines.push(node);
            }
        }
    }
    if !text.is_empty() {
        inlines.push(Inline::Text(text));
    }
    inlines
}
