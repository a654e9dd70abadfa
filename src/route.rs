use anyhow::{Result, anyhow};

/// Decodes the `<owner>/<repo>` routing parameter.
///
/// The parameter arrives percent-encoded (`facebook%2Freact`) because the
/// slash would otherwise split the route. Every `%XX` sequence is decoded,
/// other characters pass through unchanged, and the decoded bytes must form
/// valid UTF-8.
pub fn decode_repository_param(param: &str) -> Result<String> {
    let decoded = percent_decode(param)?;
    validate_repository(&decoded)?;
    Ok(decoded)
}

fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .filter(|pair| pair.iter().all(u8::is_ascii_hexdigit))
                .and_then(|pair| std::str::from_utf8(pair).ok())
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| anyhow!("Invalid percent-encoding in '{input}'"))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| anyhow!("Invalid percent-encoding in '{input}'"))
}

fn validate_repository(repository: &str) -> Result<()> {
    let parts: Vec<&str> = repository.split('/').collect();
    if parts.len() == 2 && parts.iter().all(|part| !part.is_empty()) {
        Ok(())
    } else {
        Err(anyhow!(
            "Invalid repository format. Please use <owner>/<repo>."
        ))
    }
}
