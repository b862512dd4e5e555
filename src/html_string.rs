use std::ops::Deref;

use derive_more::Display;

/// Text that has been escaped for use inside html elements and attributes.
#[derive(Debug, Clone, Display, PartialEq, Eq)]
#[display("{}", _0)]
pub struct HtmlString(String);

impl From<&str> for HtmlString {
    fn from(value: &str) -> Self {
        HtmlString(v_htmlescape::escape(value).to_string())
    }
}

impl Deref for HtmlString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            &*HtmlString::from("<b>Smith & Sons</b>"),
            "&lt;b&gt;Smith &amp; Sons&lt;&#x2f;b&gt;"
        );
        assert_eq!(HtmlString::from("$600.00").to_string(), "$600.00");
    }
}
