use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(first|last|first_initial|last_initial)\]").expect("email token pattern is valid")
});

/// Build an address from a pattern like `"[first].[last]"` and the company domain.
///
/// Tokens are substituted in one left-to-right pass, so name text that happens to
/// look like a token is left alone. No pattern means no email. A pattern with no
/// domain is logged and yields no email instead of a dangling `"x@"`.
pub fn synthesize_email(
    pattern: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    domain: Option<&str>,
) -> Option<String> {
    let pattern = pattern?;

    let Some(domain) = domain else {
        warn!(pattern, "Email pattern present but homepage_base_url is missing; no email synthesized");
        return None;
    };

    let first = first_name.unwrap_or_default().to_lowercase();
    let last = last_name.unwrap_or_default().to_lowercase();
    let first_initial = initial(&first);
    let last_initial = initial(&last);

    let local = TOKEN.replace_all(pattern, |caps: &Captures| match &caps[1] {
        "first" => first.clone(),
        "last" => last.clone(),
        "first_initial" => first_initial.clone(),
        _ => last_initial.clone(),
    });

    Some(format!("{local}@{domain}"))
}

fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_dot_last() {
        let email = synthesize_email(
            Some("[first].[last]"),
            Some("Ada"),
            Some("Lovelace"),
            Some("example.com"),
        );
        assert_eq!(email.as_deref(), Some("ada.lovelace@example.com"));
    }

    #[test]
    fn test_initial_tokens() {
        let email = synthesize_email(
            Some("[first_initial][last]"),
            Some("Grace"),
            Some("Hopper"),
            Some("navy.mil"),
        );
        assert_eq!(email.as_deref(), Some("ghopper@navy.mil"));

        let email = synthesize_email(
            Some("[first]_[last_initial]"),
            Some("Alan"),
            Some("Turing"),
            Some("bletchley.uk"),
        );
        assert_eq!(email.as_deref(), Some("alan_t@bletchley.uk"));
    }

    #[test]
    fn test_no_pattern_means_no_email() {
        let email = synthesize_email(None, Some("Ada"), Some("Lovelace"), Some("example.com"));
        assert_eq!(email, None);
    }

    #[test]
    fn test_missing_names_substitute_empty() {
        let email = synthesize_email(
            Some("[first_initial][last]"),
            None,
            Some("Curie"),
            Some("sorbonne.fr"),
        );
        assert_eq!(email.as_deref(), Some("curie@sorbonne.fr"));
    }

    #[test]
    fn test_missing_domain_means_no_email() {
        let email = synthesize_email(Some("[first]"), Some("Ada"), None, None);
        assert_eq!(email, None);
    }

    #[test]
    fn test_substituted_values_are_not_resubstituted() {
        let email = synthesize_email(
            Some("[first].[last]"),
            Some("[LAST]"),
            Some("Smith"),
            Some("example.com"),
        );
        assert_eq!(email.as_deref(), Some("[last].smith@example.com"));
    }

    #[test]
    fn test_literal_text_and_unknown_tokens_are_kept() {
        let email = synthesize_email(
            Some("sales.[first][middle]"),
            Some("Bo"),
            None,
            Some("acme.io"),
        );
        assert_eq!(email.as_deref(), Some("sales.bo[middle]@acme.io"));
    }
}
