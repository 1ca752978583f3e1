//! LaTeX to plain unicode for terminal display
//!
//! Only the notation the lessons use is covered: fractions, blackboard bold,
//! Greek letters, common operators and simple sub/superscripts. Anything else
//! is passed through with the backslash dropped.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FONT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(mathbb|mathbf|mathrm|mathit|mathcal|text|operatorname)\{([^{}]*)\}").unwrap());

// Some lessons lost the backslash before frac/binom
static FRAC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\?d?frac\{([^{}]*)\}\{([^{}]*)\}").unwrap());
static BINOM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\?binom\{([^{}]*)\}\{([^{}]*)\}").unwrap());
static SQRT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\sqrt\{([^{}]*)\}").unwrap());
static COMMAND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\([A-Za-z]+)").unwrap());
static BARE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(times|cdot|pi|tau|Gamma|infty|leq|geq|neq|circ)\b").unwrap());
static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\^_])(?:\{([^{}]*)\}|([A-Za-z0-9]))").unwrap());

/// Render a TeX expression as readable unicode
pub fn prettify(expr: &str) -> String {
    let mut out = expr.replace(r"\left", "").replace(r"\right", "");
    for (from, to) in [(r"\,", " "), (r"\;", " "), (r"\!", ""), (r"\{", "{"), (r"\}", "}"), (r"\\", " ")] {
        out = out.replace(from, to);
    }

    let out = FONT_RE.replace_all(&out, |caps: &Captures| match &caps[1] {
        "mathbb" => caps[2].chars().map(double_struck).collect::<String>(),
        _ => caps[2].to_string(),
    });
    let out = FRAC_RE.replace_all(&out, |caps: &Captures| format!("{}/{}", group(&caps[1]), group(&caps[2])));
    let out = BINOM_RE.replace_all(&out, |caps: &Captures| format!("C({}, {})", &caps[1], &caps[2]));
    let out = SQRT_RE.replace_all(&out, |caps: &Captures| format!("√{}", group(&caps[1])));
    let out = COMMAND_RE.replace_all(&out, |caps: &Captures| {
        symbol(&caps[1]).map(Cow::Borrowed).unwrap_or_else(|| Cow::Owned(caps[1].to_string()))
    });
    let out = BARE_RE.replace_all(&out, |caps: &Captures| symbol(&caps[1]).unwrap_or_default().to_string());
    let out = SCRIPT_RE.replace_all(&out, |caps: &Captures| {
        let raised = &caps[1] == "^";
        let body = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        script(body, raised)
    });

    out.into_owned()
}

/// Parenthesize compound operands of `/`
fn group(part: &str) -> String {
    let part = part.trim();
    let compound = part.chars().count() > 1
        && part.chars().any(|c| c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '^'));
    if compound { format!("({})", part) } else { part.to_string() }
}

fn script(body: &str, raised: bool) -> String {
    let map = if raised { superscript } else { subscript };
    match body.chars().map(map).collect::<Option<String>>() {
        Some(converted) => converted,
        None if raised => format!("^({})", body),
        None => format!("_({})", body),
    }
}

fn symbol(name: &str) -> Option<&'static str> {
    let s = match name {
        "times" => "×",
        "cdot" => "·",
        "div" => "÷",
        "pm" => "±",
        "in" => "∈",
        "notin" => "∉",
        "subset" => "⊂",
        "subseteq" => "⊆",
        "cup" => "∪",
        "cap" => "∩",
        "emptyset" => "∅",
        "forall" => "∀",
        "exists" => "∃",
        "le" | "leq" => "≤",
        "ge" | "geq" => "≥",
        "ne" | "neq" => "≠",
        "approx" => "≈",
        "equiv" => "≡",
        "circ" => "∘",
        "to" | "rightarrow" => "→",
        "Rightarrow" | "implies" => "⇒",
        "iff" | "Leftrightarrow" => "⇔",
        "mapsto" => "↦",
        "infty" => "∞",
        "sum" => "Σ",
        "prod" => "Π",
        "int" => "∫",
        "sqrt" => "√",
        "langle" => "⟨",
        "rangle" => "⟩",
        "lfloor" => "⌊",
        "rfloor" => "⌋",
        "ldots" | "dots" | "cdots" => "…",
        "mod" | "bmod" => "mod",
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "Gamma" => "Γ",
        "delta" => "δ",
        "Delta" => "Δ",
        "epsilon" | "varepsilon" => "ε",
        "theta" => "θ",
        "lambda" => "λ",
        "mu" => "μ",
        "pi" => "π",
        "rho" => "ρ",
        "sigma" => "σ",
        "Sigma" => "Σ",
        "tau" => "τ",
        "phi" | "varphi" => "φ",
        "omega" => "ω",
        "Omega" => "Ω",
        _ => return None,
    };
    Some(s)
}

fn double_struck(c: char) -> char {
    match c {
        'N' => 'ℕ',
        'Z' => 'ℤ',
        'Q' => 'ℚ',
        'R' => 'ℝ',
        'C' => 'ℂ',
        other => other,
    }
}

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'a' => 'ᵃ',
        'b' => 'ᵇ',
        'c' => 'ᶜ',
        'd' => 'ᵈ',
        'e' => 'ᵉ',
        'i' => 'ⁱ',
        'j' => 'ʲ',
        'k' => 'ᵏ',
        'm' => 'ᵐ',
        'n' => 'ⁿ',
        'p' => 'ᵖ',
        'r' => 'ʳ',
        's' => 'ˢ',
        't' => 'ᵗ',
        'x' => 'ˣ',
        'y' => 'ʸ',
        'T' => 'ᵀ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'k' => 'ₖ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'r' => 'ᵣ',
        't' => 'ₜ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        'x' => 'ₓ',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn vector_space_membership() {
        assert_eq!(prettify(r"\mathbf{v} \in \mathbb{R}^n"), "v ∈ ℝⁿ");
    }

    #[test]
    fn operators_and_brackets() {
        assert_eq!(prettify(r"2 \times 3"), "2 × 3");
        assert_eq!(prettify(r"A \circ B"), "A ∘ B");
        assert_eq!(prettify(r"\langle u, v \rangle"), "⟨ u, v ⟩");
    }

    #[test]
    fn fractions_with_or_without_backslash() {
        assert_eq!(prettify("frac{a}{b}"), "a/b");
        assert_eq!(prettify(r"\frac{n(n+1)}{2}"), "(n(n+1))/2");
    }

    #[test]
    fn bare_greek_names() {
        assert_eq!(prettify("2 pi r"), "2 π r");
        assert_eq!(prettify("pilha"), "pilha");
    }

    #[test]
    fn scripts_fall_back_when_unmappable() {
        assert_eq!(prettify("x^{-1}"), "x⁻¹");
        assert_eq!(prettify("a_{ij}"), "aᵢⱼ");
        assert_eq!(prettify(r"e^{i\pi}"), "e^(iπ)");
    }

    #[test]
    fn unknown_commands_drop_the_backslash() {
        assert_eq!(prettify(r"\gcd(a, b)"), "gcd(a, b)");
    }
}
