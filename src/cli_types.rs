use clap::{Args, ValueEnum};
use mdabbr_lib::abbreviation::AbbreviationInfo;
use mdabbr_lib::utils::text::is_word;

/// Output format for scan and list results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by every command that reads documents
#[derive(Args, Debug, Default)]
pub struct DocumentArgs {
    /// Files or directories to scan (use '-' for stdin)
    #[arg(required = false)]
    pub paths: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Frontmatter key holding abbreviations (empty disables metadata abbreviations)
    #[arg(long)]
    pub keyword: Option<String>,

    /// Comma-separated affixes that may follow an abbreviation (enables affix matching)
    #[arg(long)]
    pub affixes: Option<String>,

    /// Look for abbreviations inside words of scripts written without spaces
    #[arg(long)]
    pub non_spaced_script: bool,

    /// Ignore `*[KEY]: title` definition lines
    #[arg(long)]
    pub no_extra: bool,

    /// Global abbreviation, repeatable
    #[arg(long = "abbr", value_name = "KEY=TITLE", value_parser = parse_abbreviation_arg)]
    pub abbreviations: Vec<AbbreviationInfo>,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Output format: text (default) or json
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Exit with code 1 if any abbreviation was found
    #[arg(long)]
    pub fail_on_match: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Output format: text (default) or json
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration file
    #[arg(long, default_value = mdabbr_lib::config::CONFIG_FILE_NAME)]
    pub path: String,
}

/// Parse a `KEY=TITLE` argument. The title may be empty to disable a key.
///
/// The key must be a single word, otherwise the tokenizer could never
/// produce it.
pub fn parse_abbreviation_arg(value: &str) -> Result<AbbreviationInfo, String> {
    let (key, title) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=TITLE, got '{value}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing abbreviation key in '{value}'"));
    }
    if !is_word(key) {
        return Err(format!("abbreviation key '{key}' must be a single word"));
    }

    Ok(AbbreviationInfo::new(key, title.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_abbreviation_arg() {
        assert_eq!(
            parse_abbreviation_arg("HTML=HyperText Markup Language"),
            Ok(AbbreviationInfo::new("HTML", "HyperText Markup Language"))
        );
        assert_eq!(parse_abbreviation_arg("HTML="), Ok(AbbreviationInfo::new("HTML", "")));
        assert_eq!(parse_abbreviation_arg("E=mc=2"), Ok(AbbreviationInfo::new("E", "mc=2")));
        assert!(parse_abbreviation_arg("HTML").is_err());
        assert!(parse_abbreviation_arg("=title").is_err());
        assert_eq!(parse_abbreviation_arg("R&D=Research"), Ok(AbbreviationInfo::new("R&D", "Research")));
        assert!(parse_abbreviation_arg("C++=C Plus Plus").is_err());
        assert!(parse_abbreviation_arg("two words=Nope").is_err());
    }
}
