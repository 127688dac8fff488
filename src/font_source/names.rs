//! Production glyph names
//!
//! ASCII characters get their Adobe Glyph List names, everything else
//! falls back to `uniXXXX` / `uXXXXX`.

/// Glyph name for a character
pub fn glyph_name(ch: char) -> String {
    if ch.is_ascii_alphabetic() {
        return ch.to_string();
    }
    if let Some(name) = ascii_name(ch) {
        return name.to_string();
    }
    let code = ch as u32;
    if code <= 0xFFFF {
        format!("uni{code:04X}")
    } else {
        format!("u{code:05X}")
    }
}

fn ascii_name(ch: char) -> Option<&'static str> {
    let name = match ch {
        ' ' => "space",
        '!' => "exclam",
        '"' => "quotedbl",
        '#' => "numbersign",
        '$' => "dollar",
        '%' => "percent",
        '&' => "ampersand",
        '\'' => "quotesingle",
        '(' => "parenleft",
        ')' => "parenright",
        '*' => "asterisk",
        '+' => "plus",
        ',' => "comma",
        '-' => "hyphen",
        '.' => "period",
        '/' => "slash",
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        ':' => "colon",
        ';' => "semicolon",
        '<' => "less",
        '=' => "equal",
        '>' => "greater",
        '?' => "question",
        '@' => "at",
        '[' => "bracketleft",
        '\\' => "backslash",
        ']' => "bracketright",
        '^' => "asciicircum",
        '_' => "underscore",
        '`' => "grave",
        '{' => "braceleft",
        '|' => "bar",
        '}' => "braceright",
        '~' => "asciitilde",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_keep_their_own_name() {
        assert_eq!(glyph_name('A'), "A");
        assert_eq!(glyph_name('z'), "z");
    }

    #[test]
    fn test_ascii_symbols_and_digits() {
        assert_eq!(glyph_name(' '), "space");
        assert_eq!(glyph_name('1'), "one");
        assert_eq!(glyph_name('&'), "ampersand");
    }

    #[test]
    fn test_unicode_fallback() {
        assert_eq!(glyph_name('é'), "uni00E9");
        assert_eq!(glyph_name('𝒜'), "u1D49C");
    }
}
