/// The values of one header as seen through [`Request::header`](crate::Request::header).
///
/// A header that appears once yields [`HeaderField::Single`]; a header repeated
/// on the wire (or appended with `with_added_header`) yields every value in
/// arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderField<'a> {
    Single(&'a str),
    Multiple(Vec<&'a str>),
}

impl<'a> HeaderField<'a> {
    pub(crate) fn from_values(mut values: Vec<&'a str>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(HeaderField::Single),
            _ => Some(HeaderField::Multiple(values)),
        }
    }

    /// Returns the first value of the header.
    pub fn first(&self) -> &'a str {
        match self {
            HeaderField::Single(value) => *value,
            HeaderField::Multiple(values) => values.first().copied().unwrap_or_default(),
        }
    }

    /// Returns all values, one element for a single-valued header.
    pub fn to_vec(&self) -> Vec<&'a str> {
        match self {
            HeaderField::Single(value) => vec![*value],
            HeaderField::Multiple(values) => values.clone(),
        }
    }

    #[inline]
    pub fn is_multiple(&self) -> bool {
        matches!(self, HeaderField::Multiple(_))
    }
}

#[cfg(test)]
mod tests {
    use super::HeaderField;

    #[test]
    fn no_values_is_none() {
        assert_eq!(HeaderField::from_values(vec![]), None);
    }

    #[test]
    fn one_value_is_single() {
        let field = HeaderField::from_values(vec!["text/html"]).unwrap();
        assert_eq!(field, HeaderField::Single("text/html"));
        assert!(!field.is_multiple());
        assert_eq!(field.to_vec(), vec!["text/html"]);
    }

    #[test]
    fn many_values_keep_order() {
        let field = HeaderField::from_values(vec!["text/html", "text/plain"]).unwrap();
        assert!(field.is_multiple());
        assert_eq!(field.first(), "text/html");
        assert_eq!(field.to_vec(), vec!["text/html", "text/plain"]);
    }
}
