//! Trailing `--name=value` option tokens

use crate::conversion::ConversionOptions;

/// Recognized option names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    Summarize,
    Annotate,
    Format,
}

impl OptionName {
    pub const ALL: [OptionName; 3] = [
        OptionName::Summarize,
        OptionName::Annotate,
        OptionName::Format,
    ];

    /// Look up a token name such as `--format`; exact, case-sensitive match
    pub fn from_token(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.flag() == name)
    }

    pub fn flag(&self) -> &'static str {
        match self {
            OptionName::Summarize => "--summarize",
            OptionName::Annotate => "--annotate",
            OptionName::Format => "--format",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OptionName::Summarize => "if yes, omit segment-level detail (default is no)",
            OptionName::Annotate => {
                "if yes, include descriptive \"annotations\" (default is no)"
            }
            OptionName::Format => "if yes, format JSON output (default is yes)",
        }
    }

    fn apply(&self, options: ConversionOptions, enabled: bool) -> ConversionOptions {
        match self {
            OptionName::Summarize => options.with_summarize(enabled),
            OptionName::Annotate => options.with_annotate(enabled),
            OptionName::Format => options.with_format(enabled),
        }
    }
}

/// Split a token on `=`; anything but exactly two parts is not an option
pub fn parse_option_token(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(value), None) => Some((name, value)),
        _ => None,
    }
}

/// `yes` in any letter case is true, everything else is false
pub fn yes_or_no(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes")
}

/// Fold option tokens over `options` left to right, so later tokens win.
/// Malformed tokens and unknown names are skipped.
pub fn apply_option_tokens<'a, I>(options: ConversionOptions, tokens: I) -> ConversionOptions
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter().fold(options, |options, token| {
        let Some((name, value)) = parse_option_token(token) else {
            tracing::debug!(token, "ignoring malformed option token");
            return options;
        };
        match OptionName::from_token(name) {
            Some(option) => option.apply(options, yes_or_no(value)),
            None => {
                tracing::debug!(name, "ignoring unknown option");
                options
            }
        }
    })
}
