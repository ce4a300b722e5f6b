//! Meta-line recognition (`# meta-name: Fireball`).

/// Metadata keys understood in template headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    Name,
    Description,
    Version,
    SpaceIndent,
}

impl MetaKey {
    /// All keys, in match priority order.
    pub const ALL: [MetaKey; 4] = [
        MetaKey::Name,
        MetaKey::Description,
        MetaKey::Version,
        MetaKey::SpaceIndent,
    ];

    /// Key as written after the `meta-` prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            MetaKey::Name => "name",
            MetaKey::Description => "description",
            MetaKey::Version => "version",
            MetaKey::SpaceIndent => "space-indent",
        }
    }
}

/// What a single source line turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum MetaLine<'a> {
    /// Ordinary script text.
    Body,
    /// A known key and its trimmed value.
    Field(MetaKey, &'a str),
    /// Meta-prefixed, but no known key. Holds the text after the prefix.
    Unrecognized(&'a str),
}

pub(crate) fn meta_prefix(delimiter: &str) -> String {
    format!("{delimiter} meta-")
}

/// Classify one line (line terminator included) against a meta prefix.
pub(crate) fn classify<'a>(line: &'a str, prefix: &str) -> MetaLine<'a> {
    let Some(rest) = line.strip_prefix(prefix) else {
        return MetaLine::Body;
    };

    for key in MetaKey::ALL {
        if let Some(after_key) = rest.strip_prefix(key.as_str()) {
            // One separator character follows the key, whatever it is.
            let mut chars = after_key.chars();
            chars.next();
            return MetaLine::Field(key, chars.as_str().trim());
        }
    }

    MetaLine::Unrecognized(rest.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_keys() {
        let prefix = meta_prefix("#");
        assert_eq!(
            classify("# meta-name: Fireball\n", &prefix),
            MetaLine::Field(MetaKey::Name, "Fireball")
        );
        assert_eq!(
            classify("# meta-description:   A ranged attack  \n", &prefix),
            MetaLine::Field(MetaKey::Description, "A ranged attack")
        );
        assert_eq!(
            classify("# meta-space-indent: 2\n", &prefix),
            MetaLine::Field(MetaKey::SpaceIndent, "2")
        );
    }

    #[test]
    fn test_separator_can_be_any_character() {
        let prefix = meta_prefix("//");
        assert_eq!(
            classify("// meta-version=1.2\n", &prefix),
            MetaLine::Field(MetaKey::Version, "1.2")
        );
    }

    #[test]
    fn test_key_without_value() {
        let prefix = meta_prefix("#");
        assert_eq!(
            classify("# meta-space-indent\n", &prefix),
            MetaLine::Field(MetaKey::SpaceIndent, "")
        );
        assert_eq!(
            classify("# meta-name", &prefix),
            MetaLine::Field(MetaKey::Name, "")
        );
    }

    #[test]
    fn test_unknown_key() {
        let prefix = meta_prefix("#");
        assert_eq!(
            classify("# meta-author: someone\n", &prefix),
            MetaLine::Unrecognized("author: someone")
        );
    }

    #[test]
    fn test_body_lines() {
        let prefix = meta_prefix("#");
        assert_eq!(classify("extends Node\n", &prefix), MetaLine::Body);
        assert_eq!(classify("  # meta-name: Indented\n", &prefix), MetaLine::Body);
        assert_eq!(classify("#meta-name: NoSpace\n", &prefix), MetaLine::Body);
        // C# delimiter in a GDScript file is just text.
        assert_eq!(classify("// meta-name: Wrong\n", &prefix), MetaLine::Body);
    }
}
