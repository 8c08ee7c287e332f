//! Slug overrides declared in a page component's doc comment.
//!
//! ```text
//! /**
//!  * I18n
//!  *
//!  * @slug {en} /hello/again
//!  * @slug {it} /ciao/ancora
//!  */
//! ```
//!
//! Only the first block whose description mentions `i18n` (any case) counts.

use std::sync::LazyLock;

use regex::Regex;

static RE_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/").ok());

static RE_SLUG_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^@slug[ \t]+\{[ \t]*([^} \t]+)[ \t]*\}[ \t]+([^ \t]+)").ok());

/// A `@slug {locale} /path` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugOverride {
    pub locale: String,
    pub slug: String,
}

/// Slug overrides of the i18n doc block in `source`, in declaration order.
/// A later tag for the same locale replaces the earlier one.
pub fn slugs_from_comment(source: &str) -> Vec<SlugOverride> {
    let (Some(block_re), Some(tag_re)) = (RE_BLOCK.as_ref(), RE_SLUG_TAG.as_ref()) else {
        return Vec::new();
    };

    let Some(lines) = block_re
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|body| comment_lines(body.as_str()))
        .find(|lines| describes_i18n(lines))
    else {
        return Vec::new();
    };

    let mut slugs: Vec<SlugOverride> = Vec::new();
    for line in &lines {
        let Some(caps) = tag_re.captures(line) else {
            continue;
        };
        let locale = caps[1].to_string();
        let slug = caps[2].to_string();
        match slugs.iter_mut().find(|s| s.locale == locale) {
            Some(existing) => existing.slug = slug,
            None => slugs.push(SlugOverride { locale, slug }),
        }
    }
    slugs
}

/// Strip the leading ` * ` of every comment line.
fn comment_lines(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| line.trim().trim_start_matches('*').trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Description = every line before the first tag.
fn describes_i18n(lines: &[String]) -> bool {
    lines
        .iter()
        .take_while(|line| !line.starts_with('@'))
        .any(|line| line.to_ascii_lowercase().contains("i18n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
import React from "react";

/**
 * Ignored
 *
 * @slug {en} /not/this
 */

/**
 * I18n
 *
 * @slug {en} /hello/again
 * @slug {it} /ciao/ancora
 */
export default function Page() {}
"#;

    #[test]
    fn test_first_i18n_block_wins() {
        let slugs = slugs_from_comment(PAGE);
        assert_eq!(
            slugs,
            vec![
                SlugOverride {
                    locale: "en".into(),
                    slug: "/hello/again".into(),
                },
                SlugOverride {
                    locale: "it".into(),
                    slug: "/ciao/ancora".into(),
                },
            ]
        );
    }

    #[test]
    fn test_no_i18n_block() {
        assert!(slugs_from_comment("/** Page */\nexport default 1;").is_empty());
        assert!(slugs_from_comment("// I18n\n// @slug {en} /x").is_empty());
    }

    #[test]
    fn test_single_line_block_and_repeated_locale() {
        let source = "/** i18n routes\n * @slug { de } /hallo\n * @slug {de} /hallo-welt */";
        let slugs = slugs_from_comment(source);
        assert_eq!(slugs.len(), 1);
        assert_eq!(slugs[0].locale, "de");
        assert_eq!(slugs[0].slug, "/hallo-welt");
    }

    #[test]
    fn test_tag_in_description_does_not_count() {
        let source = "/**\n * @slug {en} /x\n * I18n\n */";
        assert!(slugs_from_comment(source).is_empty());
    }
}
