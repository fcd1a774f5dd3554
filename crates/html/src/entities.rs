/// Decode the small entity subset markup templates actually contain.
///
/// Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// Numeric: `&#215;` and `&#xD7;`, semicolon-terminated, valid scalars only.
/// Anything else is copied through unchanged, so decoding is idempotent on
/// its own output for every input that contains no decodable entity.
pub(crate) fn decode_entities(s: &str) -> String {
    const NAMED: &[(&str, char)] = &[
        ("amp;", '&'),
        ("lt;", '<'),
        ("gt;", '>'),
        ("quot;", '"'),
        ("apos;", '\''),
        ("nbsp;", '\u{00A0}'),
    ];
    // 0x10FFFF / 1114111
    const MAX_HEX_DIGITS: usize = 6;
    const MAX_DEC_DIGITS: usize = 7;

    let Some(first) = memchr::memchr(b'&', s.as_bytes()) else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut rest = &s[first..];

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        if let Some((name, ch)) = NAMED.iter().find(|(name, _)| tail.starts_with(name)) {
            out.push(*ch);
            rest = &tail[name.len()..];
            continue;
        }

        if let Some(numeric) = tail.strip_prefix('#') {
            let (digits_src, radix, max) = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => (hex, 16, MAX_HEX_DIGITS),
                None => (numeric, 10, MAX_DEC_DIGITS),
            };
            if let Some(end) = digits_src.find(';') {
                let digits = &digits_src[..end];
                let decoded = (!digits.is_empty()
                    && digits.len() <= max
                    && digits.chars().all(|c| c.is_digit(radix)))
                .then(|| u32::from_str_radix(digits, radix).ok())
                .flatten()
                .and_then(char::from_u32);
                if let Some(ch) = decoded {
                    out.push(ch);
                    let consumed = tail.len() - digits_src.len() + end + 1;
                    rest = &tail[consumed..];
                    continue;
                }
            }
        }

        out.push('&');
        rest = tail;
    }

    out.push_str(rest);
    out
}
