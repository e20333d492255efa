//! Command argument tokenizer.
//!
//! Splits raw arguments into flags and positional filter params. A token
//! starting with `-` names a flag and always consumes the following token
//! as its value; a flag at the very end gets the value `"true"`.

use indexmap::IndexMap;

/// Short flag aliases.
const ALIASES: &[(&str, &str)] = &[("c", "config"), ("e", "environment"), ("p", "prefix")];

/// Value given to a flag with no following token.
pub const FLAG_PRESENT: &str = "true";

/// Tokenized command arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    flags: IndexMap<String, String>,
    params: Vec<String>,
}

impl Args {
    /// Tokenize raw arguments.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut parsed = Self::default();
        let mut tokens = args.iter().map(AsRef::as_ref);

        while let Some(token) = tokens.next() {
            if token.starts_with('-') {
                let name = token.trim_start_matches('-');
                let name = ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == name)
                    .map_or(name, |(_, full)| *full);
                let value = match tokens.next() {
                    Some(value) if !value.is_empty() => value,
                    _ => FLAG_PRESENT,
                };
                parsed.flags.insert(name.to_string(), value.to_string());
            } else {
                parsed.params.push(token.to_string());
            }
        }

        parsed
    }

    /// Value of a flag, if given.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    /// Whether a boolean flag is set (present and not `"false"`).
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| v != "false")
    }

    /// Positional params, in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// All flags, in order of appearance.
    pub fn flags(&self) -> &IndexMap<String, String> {
        &self.flags
    }

    /// Set a flag value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.flags.insert(name.to_string(), value.into());
    }
}
