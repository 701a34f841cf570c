use std::fmt;

use logos::Logos;

/// Represents a lexical token in the source input.
///
/// Variants are listed in the priority the language defines: keywords come
/// before identifiers, then literals, multi-character operators and finally
/// single-character symbols. Logos resolves an exact keyword match over the
/// identifier regex, while a longer word such as `printer` still lexes as an
/// identifier.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// `contradiction`
    #[token("contradiction")]
    Contradiction,
    /// `sol`
    #[token("sol")]
    Sol,
    /// `boundary`
    #[token("boundary")]
    Boundary,
    /// `bifurcator`
    #[token("bifurcator")]
    Bifurcator,
    /// `posit`
    #[token("posit")]
    Posit,
    /// `varnothing`
    #[token("varnothing")]
    Varnothing,
    /// `nabla`
    #[token("nabla")]
    Nabla,
    /// `infty`
    #[token("infty")]
    Infty,
    /// `ds2`, the name of the entry point.
    #[token("ds2")]
    Ds2,
    /// `coeternal`
    #[token("coeternal")]
    Coeternal,
    /// `octyl`
    #[token("octyl")]
    Octyl,
    /// `equiangular`
    #[token("equiangular")]
    Equiangular,
    /// `intertillage`
    #[token("intertillage")]
    Intertillage,
    /// `delineator`
    #[token("delineator")]
    Delineator,
    /// `recur`
    #[token("recur")]
    Recur,
    /// `print`
    #[token("print")]
    Print,

    /// Identifier tokens such as `light` or `frame`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Numeric literals such as `42` or `0.9`.
    #[regex(r"[0-9]+\.[0-9]+", parse_number)]
    #[regex(r"[0-9]+", parse_number)]
    Number(f64),
    /// String literals. The surrounding quotes are stripped.
    #[regex(r#""[^"]*""#, parse_string)]
    Str(String),

    /// `:=`
    #[token(":=")]
    Assign,
    /// `..`
    #[token("..")]
    DotDot,
    /// `->`
    #[token("->")]
    Arrow,

    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,

    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `=`. Lexically valid but not part of any statement form.
    #[token("=")]
    Equals,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `∞`, the infinity glyph.
    #[token("∞")]
    Infinity,

    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks are skipped but counted.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Contradiction => "contradiction",
            Self::Sol => "sol",
            Self::Boundary => "boundary",
            Self::Bifurcator => "bifurcator",
            Self::Posit => "posit",
            Self::Varnothing => "varnothing",
            Self::Nabla => "nabla",
            Self::Infty => "infty",
            Self::Ds2 => "ds2",
            Self::Coeternal => "coeternal",
            Self::Octyl => "octyl",
            Self::Equiangular => "equiangular",
            Self::Intertillage => "intertillage",
            Self::Delineator => "delineator",
            Self::Recur => "recur",
            Self::Print => "print",
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Number(n) => return write!(f, "number {n}"),
            Self::Str(s) => return write!(f, "string \"{s}\""),
            Self::Assign => ":=",
            Self::DotDot => "..",
            Self::Arrow => "->",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Equals => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Infinity => "∞",
            Self::Comment => "comment",
            Self::NewLine => "newline",
            Self::Ignored => "whitespace",
        };
        write!(f, "'{text}'")
    }
}
