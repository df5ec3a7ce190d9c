//! Module header: the leading shebang, comment and blank lines of a source
//! file, carried verbatim into the output.

pub const DEFAULT_ENCODING: &str = "utf-8";

/// Header text and the source encoding it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHeader {
    pub encoding: String,
    /// Newline-terminated header lines, always including a coding line.
    pub text: String,
}

impl Default for ModuleHeader {
    fn default() -> Self {
        parse_module_header("")
    }
}

fn coding_declaration(encoding: &str) -> String {
    format!("# -*- coding: {encoding} -*-")
}

/// Encoding named by a PEP 263 declaration (`# ... coding[:=] name`).
fn declared_coding(line: &str) -> Option<&str> {
    let comment = line
        .trim_start_matches([' ', '\t', '\x0b'])
        .strip_prefix('#')?;
    comment.match_indices("coding").find_map(|(at, word)| {
        let rest = &comment[at + word.len()..];
        let rest = rest.strip_prefix([':', '='])?;
        let rest = rest.trim_start_matches([' ', '\t']);
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    })
}

/// Splits off the header of `source`.
///
/// Header lines are the leading lines that are blank or start with `#`. A
/// shebang is recognized on the first line, a coding declaration on either of
/// the first two. Without a declaration, `# -*- coding: utf-8 -*-` is added
/// after the shebang, or first when there is none.
pub fn parse_module_header(source: &str) -> ModuleHeader {
    let mut shebang = false;
    let mut encoding = None;
    let mut lines: Vec<String> = Vec::new();

    for (i, line) in source.lines().enumerate() {
        if i == 0 && line.starts_with("#!") && line.contains("python") {
            shebang = true;
        } else if i < 2 && encoding.is_none() {
            encoding = declared_coding(line).map(str::to_string);
        }

        let trimmed = line.trim_end();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            lines.push(line.to_string());
        } else {
            break;
        }
    }

    let encoding = match encoding {
        Some(encoding) => encoding,
        None => {
            let at = usize::from(shebang);
            lines.insert(at, coding_declaration(DEFAULT_ENCODING));
            DEFAULT_ENCODING.to_string()
        }
    };

    let mut text = lines.join("\n");
    text.push('\n');
    ModuleHeader { encoding, text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_source_gets_default_declaration() {
        let header = parse_module_header("");
        assert_eq!(header.encoding, "utf-8");
        assert_eq!(header.text, "# -*- coding: utf-8 -*-\n");
        assert_eq!(ModuleHeader::default(), header);
    }

    #[test]
    fn declaration_goes_after_shebang() {
        let header = parse_module_header("#!/usr/bin/env python3\nimport os\n");
        assert_eq!(
            header.text,
            "#!/usr/bin/env python3\n# -*- coding: utf-8 -*-\n"
        );
    }

    #[test]
    fn existing_declaration_is_kept_verbatim() {
        let src = "#!/usr/bin/python\n# vim: set fileencoding=latin-1 :\n\n# comment\nx = 1\n";
        let header = parse_module_header(src);
        assert_eq!(header.encoding, "latin-1");
        assert_eq!(
            header.text,
            "#!/usr/bin/python\n# vim: set fileencoding=latin-1 :\n\n# comment\n"
        );
    }

    #[test]
    fn declaration_on_third_line_does_not_count() {
        let header = parse_module_header("# a\n# b\n# coding: latin-1\n");
        assert_eq!(header.encoding, "utf-8");
        assert!(header.text.starts_with("# -*- coding: utf-8 -*-\n# a\n"));
    }

    #[test]
    fn non_python_shebang_is_an_ordinary_comment() {
        let header = parse_module_header("#!/bin/sh\nx = 1\n");
        assert_eq!(header.text, "# -*- coding: utf-8 -*-\n#!/bin/sh\n");
    }

    #[test]
    fn docstring_ends_the_header() {
        let header = parse_module_header("# coding=ascii\n\"\"\"Doc.\"\"\"\n# trailing\n");
        assert_eq!(header.encoding, "ascii");
        assert_eq!(header.text, "# coding=ascii\n");
    }

    #[test]
    fn coding_requires_separator_and_name() {
        assert_eq!(declared_coding("# coding: utf-8"), Some("utf-8"));
        assert_eq!(declared_coding("  #-*- coding:latin_1 -*-"), Some("latin_1"));
        assert_eq!(declared_coding("# encoding coding=x.y"), Some("x.y"));
        assert_eq!(declared_coding("# coding utf-8"), None);
        assert_eq!(declared_coding("# coding: "), None);
        assert_eq!(declared_coding("x = 1  # coding: utf-8"), None);
    }
}
