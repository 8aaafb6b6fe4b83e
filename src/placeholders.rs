//! Placeholder registry: the bidirectional mapping between `{name}` tokens
//! and regex fragments.
//!
//! Templates are ordinary regex text with `{name}` tokens embedded. Forward
//! substitution turns a template into a matchable pattern; reverse
//! substitution restores tokens from a pattern; `fill` produces a concrete
//! string by validating caller-supplied values against each token's fragment.
//!
//! Custom entries take priority over the built-in defaults, and entries added
//! later take priority over earlier ones: lookups short-circuit on the first
//! hit in the combined ordered view.

use crate::error::RouterError;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use std::fmt;

/// Matches one `{name}` token. Names follow the same charset the default
/// table uses plus `-`, so custom entries like `a-b` resolve.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_-]+)\}").expect("token regex must compile"));

/// Built-in placeholder table. Customs shadow these by name.
const DEFAULT_PLACEHOLDERS: &[(&str, &str)] = &[
    ("alpha", "([a-zA-Z]+)"),
    ("alphanum", "([a-zA-Z0-9]+)"),
    ("any", "(.*)"),
    ("hex", "([[:xdigit:]]+)"),
    ("int", "([0-9]{1,18})"),
    ("md5", "([a-f0-9]{32})"),
    ("num", "([0-9]+)"),
    ("port", "([0-9]{1,5})"),
    ("scheme", "(https?)"),
    ("segment", "([^/]+)"),
    ("slug", "([a-z0-9_-]+)"),
    ("subdomain", "([^.]+)"),
    ("title", "([a-zA-Z0-9_-]+)"),
];

/// Ordered token/fragment registry shared by a router, its collections and
/// its routes.
///
/// Interior locking keeps the registry shareable behind an `Arc`:
/// registration-time `add` calls take the write lock, while substitution and
/// fill during serving only ever read.
pub struct Placeholders {
    /// Custom entries in priority order (front = highest priority).
    custom: RwLock<Vec<(String, String)>>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self {
            custom: RwLock::new(Vec::new()),
        }
    }

    /// Register one placeholder, overwriting the fragment if the name is
    /// already present.
    ///
    /// The fragment must be a valid regex containing exactly one capturing
    /// group, otherwise `RouterError::InvalidPlaceholder` is returned and the
    /// registry is left untouched.
    pub fn add(&self, name: &str, fragment: &str) -> Result<(), RouterError> {
        self.add_all(&[(name, fragment)])
    }

    /// Bulk insert, preserving the given order ahead of previously-added
    /// custom entries. The whole batch is validated before anything is
    /// inserted.
    pub fn add_all(&self, entries: &[(&str, &str)]) -> Result<(), RouterError> {
        for (name, fragment) in entries {
            validate_fragment(name, fragment)?;
        }
        let mut custom = self.custom.write();
        let mut fresh = Vec::with_capacity(entries.len());
        for (name, fragment) in entries {
            if let Some(slot) = custom.iter_mut().find(|(n, _)| n == name) {
                slot.1 = fragment.to_string();
            } else {
                fresh.push((name.to_string(), fragment.to_string()));
            }
        }
        if !fresh.is_empty() {
            fresh.extend(custom.drain(..));
            *custom = fresh;
        }
        Ok(())
    }

    /// Ordered view of every active entry as `{name}` → fragment pairs:
    /// customs first, then the defaults, skipping defaults shadowed by a
    /// custom entry of the same name.
    pub fn all(&self) -> Vec<(String, String)> {
        let custom = self.custom.read();
        let mut entries = Vec::with_capacity(custom.len() + DEFAULT_PLACEHOLDERS.len());
        for (name, fragment) in custom.iter() {
            entries.push((format!("{{{}}}", name), fragment.clone()));
        }
        for (name, fragment) in DEFAULT_PLACEHOLDERS {
            if !custom.iter().any(|(n, _)| n == name) {
                entries.push((format!("{{{}}}", name), (*fragment).to_string()));
            }
        }
        entries
    }

    /// Look up the fragment for a bare token name.
    fn fragment_for(&self, name: &str) -> Option<String> {
        let custom = self.custom.read();
        if let Some((_, fragment)) = custom.iter().find(|(n, _)| n == name) {
            return Some(fragment.clone());
        }
        DEFAULT_PLACEHOLDERS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| (*f).to_string())
    }

    /// Substitute in either direction.
    ///
    /// Forward (`reverse == false`): every registered `{name}` token is
    /// replaced by its fragment; unknown tokens are left untouched and match
    /// as literal text. Reverse: every registered fragment occurrence is
    /// replaced by its token.
    ///
    /// Both directions are a single left-to-right pass — substituted text is
    /// never rescanned, so a fragment that happens to contain another token
    /// does not cascade.
    pub fn substitute(&self, template: &str, reverse: bool) -> String {
        if reverse {
            self.restore(template)
        } else {
            self.resolve(template)
        }
    }

    fn resolve(&self, template: &str) -> String {
        TOKEN_RE
            .replace_all(template, |caps: &regex::Captures<'_>| {
                match self.fragment_for(&caps[1]) {
                    Some(fragment) => fragment,
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn restore(&self, template: &str) -> String {
        let entries = self.all();
        let mut out = String::with_capacity(template.len());
        let mut i = 0;
        while i < template.len() {
            let rest = &template[i..];
            if let Some((token, fragment)) = entries
                .iter()
                .find(|(_, fragment)| rest.starts_with(fragment.as_str()))
            {
                out.push_str(token);
                i += fragment.len();
                continue;
            }
            match rest.chars().next() {
                Some(ch) => {
                    out.push(ch);
                    i += ch.len_utf8();
                }
                None => break,
            }
        }
        out
    }

    /// Fill every `{name}` token in `template` with the positionally
    /// corresponding value.
    ///
    /// The number of values must equal the number of tokens found
    /// (`PlaceholderCountMismatch` otherwise). Each value must fully match
    /// the token's registered fragment; a token with no registered fragment
    /// cannot be validated and fails the same way
    /// (`PlaceholderValidation`).
    pub fn fill(&self, template: &str, values: &[&dyn fmt::Display]) -> Result<String, RouterError> {
        let tokens: Vec<regex::Match<'_>> = TOKEN_RE.find_iter(template).collect();
        if tokens.len() != values.len() {
            return Err(RouterError::PlaceholderCountMismatch {
                expected: tokens.len(),
                found: values.len(),
            });
        }
        let mut out = String::with_capacity(template.len());
        let mut tail = 0;
        for (token, value) in tokens.iter().zip(values) {
            let name = &token.as_str()[1..token.as_str().len() - 1];
            let fragment =
                self.fragment_for(name)
                    .ok_or_else(|| RouterError::PlaceholderValidation {
                        token: token.as_str().to_string(),
                        value: None,
                    })?;
            let value = value.to_string();
            if !anchored_match(&fragment, &value) {
                return Err(RouterError::PlaceholderValidation {
                    token: token.as_str().to_string(),
                    value: Some(value),
                });
            }
            out.push_str(&template[tail..token.start()]);
            out.push_str(&value);
            tail = token.end();
        }
        out.push_str(&template[tail..]);
        Ok(out)
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Placeholders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholders")
            .field("custom", &*self.custom.read())
            .finish()
    }
}

fn validate_fragment(name: &str, fragment: &str) -> Result<(), RouterError> {
    let invalid = || RouterError::InvalidPlaceholder {
        name: name.to_string(),
        fragment: fragment.to_string(),
    };
    let compiled = Regex::new(fragment).map_err(|_| invalid())?;
    // captures_len() counts the implicit whole-match group.
    if compiled.captures_len() != 2 {
        return Err(invalid());
    }
    Ok(())
}

/// Full anchored match of `value` against a fragment validated at
/// registration time.
fn anchored_match(fragment: &str, value: &str) -> bool {
    match Regex::new(&format!("^{}$", fragment)) {
        Ok(re) => re.is_match(value),
        Err(_) => false,
    }
}
