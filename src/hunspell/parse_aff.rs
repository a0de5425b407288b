/// Parser for hunspell-format .aff files
use anyhow::{anyhow, Error, Result};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{char, i32, line_ending, not_line_ending, space0, space1, u8};
use nom::combinator::{cut, eof, map, opt, success, value};
use nom::error::{Error as NomError, ErrorKind, ParseError};
use nom::multi::many0;
use nom::sequence::{delimited, preceded, terminated};
use nom::{Compare, Err, Finish, IResult, InputLength, Parser};

use crate::hunspell::affixdata::{AffixData, FlagMode};
use crate::hunspell::condition::AffixCondition;
use crate::hunspell::rule::{AffixEntry, AffixKind, AffixRule};

type Input<'a> = &'a str;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

struct AffError {
    message: String,
}

impl AffError {
    fn new(message: &str) -> Self {
        AffError {
            message: message.to_string(),
        }
    }

    fn wrapped(message: &str) -> Err<Self> {
        Err::Error(Self::new(message))
    }

    fn from_nom(e: Err<NomError<Input>>) -> Err<Self> {
        Err::Error(Self::new(&e.to_string()))
    }
}

impl<'a> ParseError<Input<'a>> for AffError {
    fn from_error_kind(input: Input, kind: ErrorKind) -> Self {
        let message = format!("{kind:?}:\t{input}\n");
        AffError { message }
    }

    fn append(_input: Input, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl std::fmt::Display for AffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn from_anyhow(e: Error) -> Err<AffError> {
    AffError::wrapped(&e.to_string())
}

#[derive(Clone)]
enum AffixLine<'a> {
    Empty,
    SetFlagMode(FlagMode),
    SetKeyboardString(&'a str),
    SetTryString(&'a str),
    SetWordChars(&'a str),
    SetCompoundMin(u8),
    SetFlag(&'a str, &'a str),
    SetForbidWarn,
    AddRep(&'a str, &'a str),
    AddIconv(&'a str, &'a str),
    AddOconv(&'a str, &'a str),
    AddCompoundRule(&'a str),
    RuleHeader {
        kind: AffixKind,
        flag: &'a str,
        combineable: bool,
    },
    RuleEntry {
        kind: AffixKind,
        flag: &'a str,
        remove: &'a str,
        add: &'a str,
        condition: Option<&'a str>,
    },
}

/// Parse a line starting with a keyword and then a value.
/// Takes the tag for the keyword, and a parser for the value.
/// Returns the result of the value parser.
fn keyword<'a, T, O, E: ParseError<Input<'a>>, F>(
    key: T,
    mut value: F,
) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, O, E>
where
    F: Parser<Input<'a>, O, E>,
    Input<'a>: Compare<T>,
    T: InputLength + Copy,
{
    move |s: Input<'a>| {
        let (s, _) = tag(key).parse(s)?;
        let (s, _) = space1.parse(s)?;
        value.parse(s)
    }
}

fn comment(s: &str) -> IResult<&str, ()> {
    value((), preceded(char('#'), not_line_ending))(s)
}

fn ending(s: &str) -> IResult<&str, (), AffError> {
    value((), delimited(space0, opt(comment), line_ending))(s).map_err(AffError::from_nom)
}

fn value_string(s: &str) -> IResult<&str, &str, AffError> {
    take_till1(|c: char| c.is_whitespace())(s)
}

fn two_values(s: &str) -> IResult<&str, (&str, &str), AffError> {
    let (s, a) = value_string(s)?;
    let (s, _) = space1(s)?;
    let (s, b) = cut(value_string)(s)?;
    Ok((s, (a, b)))
}

const FLAG_NAMES: [&str; 11] = [
    "COMPOUNDBEGIN",
    "COMPOUNDMIDDLE",
    "COMPOUNDEND",
    "COMPOUNDPERMITFLAG",
    "ONLYINCOMPOUND",
    "NOSUGGEST",
    "CIRCUMFIX",
    "NEEDAFFIX",
    "FORBIDDENWORD",
    "KEEPCASE",
    "WARN",
];

fn assign_flag(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    let (s, key) = value_string(s)?;
    if !FLAG_NAMES.contains(&key) {
        return Err(AffError::wrapped("Keyword not a known flag"));
    }
    let (s, _) = space1(s)?;
    let (s, v) = cut(value_string)(s)?;
    Ok((s, AffixLine::SetFlag(key, v)))
}

fn set_forbid_warn(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    value(AffixLine::SetForbidWarn, tag("FORBIDWARN"))(s)
}

fn flag_mode(s: &str) -> IResult<&str, FlagMode, AffError> {
    alt((
        value(FlagMode::DoubleCharFlags, tag("long")),
        value(FlagMode::NumericFlags, tag("num")),
        value(FlagMode::Utf8Flags, tag("UTF-8")),
    ))(s)
}

fn set_flag_mode(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    map(keyword("FLAG", flag_mode), AffixLine::SetFlagMode)(s)
}

fn set_keyboard_string(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    map(keyword("KEY", value_string), AffixLine::SetKeyboardString)(s)
}

fn set_try_string(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    map(keyword("TRY", value_string), AffixLine::SetTryString)(s)
}

fn set_word_chars(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    map(keyword("WORDCHARS", value_string), AffixLine::SetWordChars)(s)
}

fn set_compound_min(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    map(keyword("COMPOUNDMIN", u8), AffixLine::SetCompoundMin)(s)
}

/// `KEYWORD n` (the header line of a counted block) parses to `Empty`;
/// it only exists to announce how many of the following lines to expect,
/// which this line-oriented parser doesn't need since every data line
/// repeats the same keyword.
fn counted_header<'a>(key: &'static str) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, AffixLine<'a>, AffError> {
    move |s| value(AffixLine::Empty, keyword(key, i32))(s)
}

fn add_rep(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    alt((
        counted_header("REP"),
        map(keyword("REP", two_values), |(from, to)| {
            AffixLine::AddRep(from, to)
        }),
    ))(s)
}

fn add_iconv(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    alt((
        counted_header("ICONV"),
        map(keyword("ICONV", two_values), |(from, to)| {
            AffixLine::AddIconv(from, to)
        }),
    ))(s)
}

fn add_oconv(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    alt((
        counted_header("OCONV"),
        map(keyword("OCONV", two_values), |(from, to)| {
            AffixLine::AddOconv(from, to)
        }),
    ))(s)
}

fn add_compound_rule(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    alt((
        counted_header("COMPOUNDRULE"),
        map(keyword("COMPOUNDRULE", value_string), AffixLine::AddCompoundRule),
    ))(s)
}

fn yes_no(s: &str) -> IResult<&str, bool, AffError> {
    alt((value(true, char('Y')), value(false, char('N'))))(s)
}

// Neither parser below uses `cut`: a header line ("PFX A Y 3") and an
// entry line ("PFX A 0 s .") share the same "PFX <flag>" prefix, so `alt`
// needs to backtrack freely between them rather than committing once the
// prefix matches (spec §4.1/§7: a malformed line is skipped, not a hard
// parse failure that aborts the rest of the file).
fn rule_header(kind: AffixKind, key: &'static str) -> impl FnMut(Input) -> IResult<Input, AffixLine, AffError> {
    move |s| {
        let (s, _) = tag(key)(s)?;
        let (s, _) = space1(s)?;
        let (s, flag) = value_string(s)?;
        let (s, _) = space1(s)?;
        let (s, combineable) = yes_no(s)?;
        let (s, _) = space1(s)?;
        let (s, _count) = u8(s)?;
        Ok((
            s,
            AffixLine::RuleHeader {
                kind,
                flag,
                combineable,
            },
        ))
    }
}

fn rule_entry(kind: AffixKind, key: &'static str) -> impl FnMut(Input) -> IResult<Input, AffixLine, AffError> {
    move |s| {
        let (s, _) = tag(key)(s)?;
        let (s, _) = space1(s)?;
        let (s, flag) = value_string(s)?;
        let (s, _) = space1(s)?;
        let (s, remove) = value_string(s)?;
        let (s, _) = space1(s)?;
        let (s, add) = value_string(s)?;
        let (s, condition) = opt(preceded(space1, value_string))(s)?;
        Ok((
            s,
            AffixLine::RuleEntry {
                kind,
                flag,
                remove,
                add,
                condition,
            },
        ))
    }
}

fn pfx(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    alt((
        rule_header(AffixKind::Prefix, "PFX"),
        rule_entry(AffixKind::Prefix, "PFX"),
    ))(s)
}

fn sfx(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    alt((
        rule_header(AffixKind::Suffix, "SFX"),
        rule_entry(AffixKind::Suffix, "SFX"),
    ))(s)
}

fn line(s: &str) -> IResult<&str, AffixLine<'_>, AffError> {
    alt((
        alt((
            set_flag_mode,
            set_keyboard_string,
            set_try_string,
            set_word_chars,
            set_compound_min,
            set_forbid_warn,
            assign_flag,
        )),
        alt((add_rep, add_iconv, add_oconv, add_compound_rule, pfx, sfx)),
        success(AffixLine::Empty),
    ))(s)
}

fn zero_or(field: &str) -> &str {
    if field == "0" {
        ""
    } else {
        field
    }
}

fn apply_rule_entry(
    d: &mut AffixData,
    kind: AffixKind,
    flag: &str,
    remove: &str,
    add: &str,
    condition: Option<&str>,
) -> Result<()> {
    let flags = d.parse_flags(flag)?;
    let flag = *flags.first().ok_or_else(|| anyhow!("empty rule flag"))?;

    let (add, continuation_str) = match add.split_once('/') {
        Some((add, cont)) => (add, Some(cont)),
        None => (add, None),
    };
    let continuation = match continuation_str {
        Some(cont) => d.parse_flags(cont)?,
        None => Vec::new(),
    };

    let entry = AffixEntry {
        add: zero_or(add).to_string(),
        remove: zero_or(remove).to_string(),
        condition: condition
            .filter(|c| *c != ".")
            .map(AffixCondition::new),
        continuation,
    };

    let rule = d
        .rules
        .entry(flag)
        .or_insert_with(|| AffixRule::new(kind, true));
    rule.entries.push(entry);
    Ok(())
}

fn affix_file(s: &str) -> IResult<&str, AffixData, AffError> {
    let (s, _) = opt(char(BYTE_ORDER_MARK)).parse(s)?; // discard BOM

    let mut d = AffixData::new();
    let (s, lines) = many0(terminated(line, ending))(s)?;
    for l in lines.iter() {
        match l {
            AffixLine::Empty => (),
            AffixLine::SetFlagMode(fm) => d.flags.flag_mode = *fm,
            AffixLine::SetKeyboardString(k) => d.flags.key = Some(k.to_string()),
            AffixLine::SetTryString(t) => d.flags.try_chars = Some(t.to_string()),
            AffixLine::SetWordChars(t) => d.flags.word_chars = Some(t.to_string()),
            AffixLine::SetCompoundMin(v) => d.flags.compound_min = *v,
            AffixLine::SetForbidWarn => d.flags.forbid_warn = true,
            AffixLine::SetFlag(f, v) => {
                let fflag = d.parse_flags(v).map_err(from_anyhow)?;
                let flag = *fflag.first().ok_or_else(|| AffError::wrapped("empty flag value"))?;
                match *f {
                    "FORBIDDENWORD" => d.flags.forbidden_word = Some(flag),
                    "COMPOUNDBEGIN" => d.flags.compound_begin = Some(flag),
                    "COMPOUNDMIDDLE" => d.flags.compound_middle = Some(flag),
                    "COMPOUNDEND" => d.flags.compound_end = Some(flag),
                    "COMPOUNDPERMITFLAG" => d.flags.compound_permit = Some(flag),
                    "ONLYINCOMPOUND" => {
                        d.flags.only_in_compound = Some(flag);
                        d.compound_rule_codes.entry(flag).or_default();
                    }
                    "NOSUGGEST" => d.flags.no_suggest = Some(flag),
                    "CIRCUMFIX" => d.flags.circumfix = Some(flag),
                    "NEEDAFFIX" => d.flags.need_affix = Some(flag),
                    "KEEPCASE" => d.flags.keep_case = Some(flag),
                    "WARN" => d.flags.warn = Some(flag),
                    other => {
                        d.flags.overflow.insert(other.to_string(), v.to_string());
                    }
                }
            }
            AffixLine::AddRep(from, to) => d.replacement_table.push(from, to),
            AffixLine::AddIconv(from, to) => d.conversion_in.push(from, to),
            AffixLine::AddOconv(from, to) => d.conversion_out.push(from, to),
            AffixLine::AddCompoundRule(pattern) => {
                d.compound_rule_patterns.push(pattern.to_string());
                for c in pattern.chars().filter(|c| !"()*?".contains(*c)) {
                    if let Ok(flags) = d.parse_flags(&c.to_string()) {
                        for f in flags {
                            d.compound_rule_codes.entry(f).or_default();
                        }
                    }
                }
            }
            AffixLine::RuleHeader {
                kind,
                flag,
                combineable,
            } => {
                let fflag = d.parse_flags(flag).map_err(from_anyhow)?;
                let flag = *fflag
                    .first()
                    .ok_or_else(|| AffError::wrapped("empty rule flag"))?;
                d.rules.insert(flag, AffixRule::new(*kind, *combineable));
            }
            AffixLine::RuleEntry {
                kind,
                flag,
                remove,
                add,
                condition,
            } => {
                apply_rule_entry(&mut d, *kind, flag, remove, add, *condition).map_err(from_anyhow)?;
            }
        };
    }
    let (s, _) = eof(s)?;
    Ok((s, d))
}

pub fn parse_affix_data(text: &str) -> Result<AffixData> {
    match delimited(opt(char(BYTE_ORDER_MARK)), affix_file, eof)
        .parse(text)
        .finish()
    {
        Ok((_, d)) => Ok(d),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hunspell::affixdata::AffixFlag;

    #[test]
    fn parses_scalar_flags_and_compound_min() {
        let aff = "FLAG long\nCOMPOUNDMIN 2\nNOSUGGEST #~\nWARN !!\n";
        let d = parse_affix_data(aff).unwrap();
        assert_eq!(d.flags.flag_mode, FlagMode::DoubleCharFlags);
        assert_eq!(d.flags.compound_min, 2);
        assert!(d.flags.no_suggest.is_some());
        assert!(d.flags.warn.is_some());
    }

    #[test]
    fn parses_suffix_rule_with_condition_and_continuation() {
        let aff = "SFX M Y 1\nSFX M 0 s/X .\n";
        let d = parse_affix_data(aff).unwrap();
        let rule = d.rules.get(&('M' as AffixFlag)).unwrap();
        assert!(rule.combineable);
        assert_eq!(rule.entries.len(), 1);
        assert_eq!(rule.entries[0].add, "s");
        assert_eq!(rule.entries[0].continuation, vec!['X' as AffixFlag]);
    }

    #[test]
    fn parses_rep_table() {
        let aff = "REP 1\nREP ^a A\n";
        let d = parse_affix_data(aff).unwrap();
        let mut hit = None;
        d.replacement_table.suggest("apple", |sugg| {
            hit = Some(sugg);
            false
        });
        assert_eq!(hit.as_deref(), Some("Apple"));
    }

    #[test]
    fn parses_compound_rule_pattern() {
        let aff = "COMPOUNDRULE 1\nCOMPOUNDRULE AB\n";
        let d = parse_affix_data(aff).unwrap();
        assert_eq!(d.compound_rule_patterns, vec!["AB".to_string()]);
        assert!(d.compound_rule_codes.contains_key(&('A' as AffixFlag)));
        assert!(d.compound_rule_codes.contains_key(&('B' as AffixFlag)));
    }

    #[test]
    fn onlyincompound_registers_a_compound_rule_code_bucket() {
        let aff = "ONLYINCOMPOUND C\n";
        let d = parse_affix_data(aff).unwrap();
        assert_eq!(d.flags.only_in_compound, Some('C' as AffixFlag));
        assert!(d.compound_rule_codes.contains_key(&('C' as AffixFlag)));
    }
}
