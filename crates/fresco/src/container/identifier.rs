use std::any::type_name;
use std::borrow::Cow;
use std::fmt;

/// A capability key used to look up definitions and resolved instances.
///
/// Identifiers are usually derived from a type with [`Identifier::of`], which
/// works for trait objects as well (`Identifier::of::<dyn Router>()`), so a
/// contract and its lookup key cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Cow<'static, str>);

impl Identifier {
    /// The identifier of type `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self(Cow::Borrowed(type_name::<T>()))
    }

    /// An identifier that is not tied to a type.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Identifier {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Identifier;
    use std::fmt::Debug;

    struct Concrete;

    #[test]
    fn type_identifiers_are_stable() {
        assert_eq!(Identifier::of::<Concrete>(), Identifier::of::<Concrete>());
        assert_ne!(Identifier::of::<Concrete>(), Identifier::of::<dyn Debug>());
    }

    #[test]
    fn named_identifiers_compare_by_name() {
        assert_eq!(Identifier::named("logger"), Identifier::from("logger"));
        assert_eq!(Identifier::named(String::from("mailer")).to_string(), "mailer");
    }
}
