/// Lowercase ASCII slug: runs of anything that is not a letter or digit
/// collapse into a single `-`, with none at either end.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());

    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}
